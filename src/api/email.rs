use std::{fmt::Display, str::FromStr, sync::OnceLock};

use regex::Regex;

use crate::error::Error;

/// An account identifier in the `user@domain` shape.
///
/// Only the shape is checked; whether the mailbox exists is the remote
/// service's concern.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EmailAddress(String);

impl EmailAddress {
    pub fn parse<S: Into<String>>(value: S) -> Result<Self, Error> {
        static PATTERN: OnceLock<Regex> = OnceLock::new();
        let re = PATTERN.get_or_init(|| {
            Regex::new(r"^[^@\s]+@[^@\s]+$").expect("email pattern is a valid regex")
        });

        let value = value.into();

        if re.is_match(&value) {
            Ok(Self(value))
        } else {
            Err(Error::invalid_argument(
                value,
                "email address must have the form user@domain",
            ))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for EmailAddress {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Display for EmailAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
