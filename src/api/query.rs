use std::fmt::{Debug, Display};

use url::Url;

use crate::error::Error;

use super::EmailAddress;

pub const DEFAULT_API_URL: &str = "https://haveibeenpwned.com/api/v2/";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    BreachedAccount,
    AllBreachedSites,
    SingleBreachedSite,
    DataClasses,
    AllPastes,
    PwnedPasswords,
}

impl Mode {
    pub fn name(&self) -> &'static str {
        match self {
            Self::BreachedAccount => "BreachedAccount",
            Self::AllBreachedSites => "AllBreachedSites",
            Self::SingleBreachedSite => "SingleBreachedSite",
            Self::DataClasses => "DataClasses",
            Self::AllPastes => "AllPastes",
            Self::PwnedPasswords => "PwnedPasswords",
        }
    }
}

impl Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Clone, PartialEq, Eq)]
pub struct Password(String);

impl Password {
    pub fn new<S: Into<String>>(value: S) -> Self {
        Self(value.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Password {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Debug for Password {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Password(<redacted>)")
    }
}

/// Loosely collected inputs, as they arrive from the command line.
#[derive(Debug, Clone, Default)]
pub struct Parameters {
    pub email_address: Option<String>,
    pub password: Option<Password>,
    pub site_name: Option<String>,
    pub domain: Option<String>,
}

/// One lookup against the API, carrying exactly the input its mode needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Query {
    BreachedAccount { email: EmailAddress },
    AllBreachedSites { domain: Option<String> },
    SingleBreachedSite { site_name: String },
    DataClasses,
    AllPastes { email: EmailAddress },
    PwnedPasswords { password: Password },
}

impl Query {
    /// Validates `parameters` against `mode`.
    ///
    /// A missing required parameter, a parameter the mode does not take, or
    /// a malformed email address is an [`Error::InvalidArgument`].
    pub fn from_parts(mode: Mode, parameters: Parameters) -> Result<Self, Error> {
        let Parameters {
            email_address,
            password,
            site_name,
            domain,
        } = parameters;

        let mut unused = Vec::new();

        let query = match mode {
            Mode::BreachedAccount | Mode::AllPastes => {
                let email = EmailAddress::parse(require(mode, "email-address", email_address)?)?;
                unused.extend([
                    ("password", password.is_some()),
                    ("site-name", site_name.is_some()),
                    ("domain", domain.is_some()),
                ]);

                if mode == Mode::BreachedAccount {
                    Self::BreachedAccount { email }
                } else {
                    Self::AllPastes { email }
                }
            }
            Mode::AllBreachedSites => {
                unused.extend([
                    ("email-address", email_address.is_some()),
                    ("password", password.is_some()),
                    ("site-name", site_name.is_some()),
                ]);
                Self::AllBreachedSites {
                    domain: domain.filter(|domain| !domain.is_empty()),
                }
            }
            Mode::SingleBreachedSite => {
                let site_name = require(mode, "site-name", site_name)?;
                unused.extend([
                    ("email-address", email_address.is_some()),
                    ("password", password.is_some()),
                    ("domain", domain.is_some()),
                ]);
                Self::SingleBreachedSite { site_name }
            }
            Mode::DataClasses => {
                unused.extend([
                    ("email-address", email_address.is_some()),
                    ("password", password.is_some()),
                    ("site-name", site_name.is_some()),
                    ("domain", domain.is_some()),
                ]);
                Self::DataClasses
            }
            Mode::PwnedPasswords => {
                let password = require(mode, "password", password)?;
                unused.extend([
                    ("email-address", email_address.is_some()),
                    ("site-name", site_name.is_some()),
                    ("domain", domain.is_some()),
                ]);
                Self::PwnedPasswords { password }
            }
        };

        if let Some((name, _)) = unused.into_iter().find(|(_, present)| *present) {
            return Err(Error::invalid_argument(
                name,
                format!("not accepted by validation type {}", mode),
            ));
        }

        Ok(query)
    }

    pub fn mode(&self) -> Mode {
        match self {
            Self::BreachedAccount { .. } => Mode::BreachedAccount,
            Self::AllBreachedSites { .. } => Mode::AllBreachedSites,
            Self::SingleBreachedSite { .. } => Mode::SingleBreachedSite,
            Self::DataClasses => Mode::DataClasses,
            Self::AllPastes { .. } => Mode::AllPastes,
            Self::PwnedPasswords { .. } => Mode::PwnedPasswords,
        }
    }

    /// Whether the request URL carries a secret.
    pub fn is_sensitive(&self) -> bool {
        matches!(self, Self::PwnedPasswords { .. })
    }

    /// What a failed lookup is reported against.
    pub fn subject(&self) -> &str {
        match self {
            Self::BreachedAccount { email } | Self::AllPastes { email } => email.as_str(),
            Self::AllBreachedSites {
                domain: Some(domain),
            } => domain.as_str(),
            Self::AllBreachedSites { domain: None } => "breached sites",
            Self::SingleBreachedSite { site_name } => site_name.as_str(),
            Self::DataClasses => "data classes",
            Self::PwnedPasswords { .. } => "password",
        }
    }

    pub fn resolve_endpoint(&self, base: &ApiBase) -> Url {
        let mut url = base.url().clone();
        url.set_query(None);
        url.set_fragment(None);

        {
            let mut segments = url
                .path_segments_mut()
                .expect("ApiBase only holds URLs that can be a base");
            segments.pop_if_empty();

            match self {
                Self::BreachedAccount { email } => {
                    segments.extend(["breachedaccount", email.as_str()]);
                }
                Self::AllBreachedSites { .. } => {
                    segments.push("breaches");
                }
                Self::SingleBreachedSite { site_name } => {
                    segments.extend(["breach", site_name.as_str()]);
                }
                Self::DataClasses => {
                    segments.push("dataclasses");
                }
                Self::AllPastes { email } => {
                    segments.extend(["pasteaccount", email.as_str()]);
                }
                Self::PwnedPasswords { password } => {
                    segments.extend(["pwnedpassword", password.expose()]);
                }
            }
        }

        if let Self::AllBreachedSites {
            domain: Some(domain),
        } = self
        {
            url.query_pairs_mut().append_pair("domain", domain);
        }

        url
    }
}

/// A required value given as an empty string counts as missing.
fn require<T: AsRef<str>>(mode: Mode, name: &str, value: Option<T>) -> Result<T, Error> {
    value
        .filter(|value| !value.as_ref().is_empty())
        .ok_or_else(|| {
            Error::invalid_argument(name, format!("required by validation type {}", mode))
        })
}

/// Root of the API that endpoint paths are appended to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiBase(Url);

impl ApiBase {
    pub fn new(url: Url) -> Result<Self, Error> {
        if url.cannot_be_a_base() || !matches!(url.scheme(), "http" | "https") {
            return Err(Error::invalid_argument(
                url.as_str(),
                "API URL must be an http or https base URL",
            ));
        }

        Ok(Self(url))
    }

    pub fn parse(value: &str) -> Result<Self, Error> {
        let url = Url::parse(value)
            .map_err(|error| Error::invalid_argument(value, error.to_string()))?;
        Self::new(url)
    }

    pub fn url(&self) -> &Url {
        &self.0
    }
}

impl Default for ApiBase {
    fn default() -> Self {
        Self(Url::parse(DEFAULT_API_URL).expect("default API URL is valid"))
    }
}
