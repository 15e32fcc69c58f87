use std::path::PathBuf;

use breachcheck::api::{Mode, DEFAULT_API_URL};
use clap::{Parser, ValueEnum};
use url::Url;

#[derive(Parser)]
#[command(version, about = "Query the Have I Been Pwned breach API")]
pub struct ProgramArgs {
    #[arg(long, value_enum)]
    /// Kind of lookup to perform.
    pub validation_type: ValidationType,

    #[arg(long)]
    /// Account to look up (BreachedAccount, AllPastes).
    pub email_address: Option<String>,

    #[arg(long)]
    /// Password to check (PwnedPasswords).
    pub password: Option<String>,

    #[arg(long)]
    /// Name of the breach (SingleBreachedSite).
    pub site_name: Option<String>,

    #[arg(long)]
    /// Only list breaches of this domain (AllBreachedSites).
    pub domain: Option<String>,

    #[arg(long, default_value = DEFAULT_API_URL)]
    /// Base URL of the API.
    pub api_url: Url,

    #[arg(long)]
    /// User-Agent header to send. An empty value sends none.
    pub user_agent: Option<String>,

    #[arg(long)]
    /// Print JSON results on a single line.
    pub compact: bool,

    #[arg(long, default_value = "warn")]
    /// Verbosity of logging output.
    pub log_level: tracing::level_filters::LevelFilter,

    #[arg(long)]
    /// Write logging output to a file.
    pub log_file: Option<PathBuf>,

    #[arg(long)]
    /// Send logging output to Systemd's Journal service.
    pub log_journald: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ValidationType {
    #[value(name = "BreachedAccount")]
    BreachedAccount,
    #[value(name = "AllBreachedSites")]
    AllBreachedSites,
    #[value(name = "SingleBreachedSite")]
    SingleBreachedSite,
    #[value(name = "DataClasses")]
    DataClasses,
    #[value(name = "AllPastes")]
    AllPastes,
    #[value(name = "PwnedPasswords")]
    PwnedPasswords,
}

impl From<ValidationType> for Mode {
    fn from(value: ValidationType) -> Self {
        match value {
            ValidationType::BreachedAccount => Mode::BreachedAccount,
            ValidationType::AllBreachedSites => Mode::AllBreachedSites,
            ValidationType::SingleBreachedSite => Mode::SingleBreachedSite,
            ValidationType::DataClasses => Mode::DataClasses,
            ValidationType::AllPastes => Mode::AllPastes,
            ValidationType::PwnedPasswords => Mode::PwnedPasswords,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_args() {
        let args = ProgramArgs::try_parse_from([
            "breachcheck",
            "--validation-type",
            "BreachedAccount",
            "--email-address",
            "test@example.com",
        ])
        .unwrap();

        assert_eq!(args.validation_type, ValidationType::BreachedAccount);
        assert_eq!(args.email_address.as_deref(), Some("test@example.com"));
        assert_eq!(args.api_url.as_str(), DEFAULT_API_URL);
        assert_eq!(args.log_level, tracing::level_filters::LevelFilter::WARN);
        assert!(!args.compact);
    }

    #[test]
    fn test_validation_type_required() {
        assert!(ProgramArgs::try_parse_from(["breachcheck"]).is_err());
        assert!(
            ProgramArgs::try_parse_from(["breachcheck", "--validation-type", "Everything"])
                .is_err()
        );
    }

    #[test]
    fn test_validation_type_to_mode() {
        assert_eq!(Mode::from(ValidationType::PwnedPasswords), Mode::PwnedPasswords);
        assert_eq!(Mode::from(ValidationType::DataClasses).name(), "DataClasses");
    }
}
