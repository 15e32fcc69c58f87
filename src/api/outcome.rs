use serde_json::Value;

use super::{Mode, Query};

/// Result of a data-returning lookup.
#[derive(Debug, Clone, PartialEq)]
pub enum Lookup {
    /// The response body, exactly as the API returned it.
    Found(Value),
    NotFound(String),
    TransportError(String),
}

/// Result of a password check. Only the status code is interpreted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PasswordStatus {
    Pwned,
    BadRequest,
    Forbidden,
    NotPwned,
    RateLimited,
    Failed(String),
}

impl PasswordStatus {
    pub fn from_status_code(status_code: u16) -> Self {
        match status_code {
            200 => Self::Pwned,
            400 => Self::BadRequest,
            403 => Self::Forbidden,
            404 => Self::NotPwned,
            429 => Self::RateLimited,
            other => Self::Failed(format!("unexpected HTTP status {}", other)),
        }
    }

    pub fn message(&self) -> String {
        match self {
            Self::Pwned => "Password pwned! This password has previously appeared in a data breach \
                and should never be used. If you've ever used it anywhere before, change it!"
                .to_string(),
            Self::BadRequest => {
                "Bad request: the password does not comply with an acceptable format".to_string()
            }
            Self::Forbidden => {
                "Forbidden: no user agent has been specified in the request".to_string()
            }
            Self::NotPwned => {
                "Password not found: this password was not found in any known data breach"
                    .to_string()
            }
            Self::RateLimited => "Too many requests: the rate limit has been exceeded".to_string(),
            Self::Failed(detail) => {
                format!("Failed to execute {}: {}", Mode::PwnedPasswords, detail)
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Data(Lookup),
    Password(PasswordStatus),
}

impl Outcome {
    pub fn value(&self) -> Option<&Value> {
        match self {
            Self::Data(Lookup::Found(value)) => Some(value),
            _ => None,
        }
    }

    pub fn into_value(self) -> Option<Value> {
        match self {
            Self::Data(Lookup::Found(value)) => Some(value),
            _ => None,
        }
    }

    /// Whether the message deserves the user's attention. A password that
    /// was not found is good news; everything else short of data is not.
    pub fn is_warning(&self) -> bool {
        !matches!(
            self,
            Self::Data(Lookup::Found(_)) | Self::Password(PasswordStatus::NotPwned)
        )
    }

    /// Human-readable text for every outcome that carries no data.
    pub fn message(&self, query: &Query) -> Option<String> {
        match self {
            Self::Data(Lookup::Found(_)) => None,
            Self::Data(Lookup::NotFound(detail) | Lookup::TransportError(detail)) => {
                Some(not_found_message(query, detail))
            }
            Self::Password(status) => Some(status.message()),
        }
    }
}

fn not_found_message(query: &Query, detail: &str) -> String {
    match query {
        Query::SingleBreachedSite { site_name } => format!("{} was not found.", site_name),
        _ => format!("{} was not found: {}", query.subject(), detail),
    }
}
