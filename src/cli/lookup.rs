use std::io::Write;

use breachcheck::{
    api::{ApiBase, Dispatcher, Outcome, Parameters, Password, Query},
    client::{Client, Config, TlsVersion},
};

use super::args::ProgramArgs;

pub fn run(args: &ProgramArgs) -> anyhow::Result<()> {
    // Everything that can be rejected is rejected before the request goes out.
    let query = build_query(args)?;
    let base = ApiBase::new(args.api_url.clone())?;

    let client = Client::new(build_config(args));
    let dispatcher = Dispatcher::new(client, base);

    let outcome = dispatcher.execute(&query);
    report(
        &query,
        outcome,
        args.compact,
        &mut std::io::stdout().lock(),
        &mut std::io::stderr().lock(),
    )
}

fn build_query(args: &ProgramArgs) -> anyhow::Result<Query> {
    let parameters = Parameters {
        email_address: args.email_address.clone(),
        password: args.password.as_deref().map(Password::new),
        site_name: args.site_name.clone(),
        domain: args.domain.clone(),
    };

    Ok(Query::from_parts(args.validation_type.into(), parameters)?)
}

fn build_config(args: &ProgramArgs) -> Config {
    let mut config = Config::new();
    config
        .set_tls_min_version(TlsVersion::Tls12)
        .set_http_compression(true);

    if let Some(user_agent) = &args.user_agent {
        config.set_http_user_agent(user_agent.as_str());
    }

    config
}

/// Writes the JSON data to `stdout` and the diagnostic, if any, to `stderr`.
fn report<O: Write, E: Write>(
    query: &Query,
    outcome: Outcome,
    compact: bool,
    stdout: &mut O,
    stderr: &mut E,
) -> anyhow::Result<()> {
    if let Some(message) = outcome.message(query) {
        tracing::debug!(mode = %query.mode(), warning = outcome.is_warning(), "lookup reported");

        if outcome.is_warning() {
            writeln!(stderr, "WARNING: {}", message)?;
        } else {
            writeln!(stderr, "{}", message)?;
        }
    }

    if let Some(value) = outcome.into_value() {
        if compact {
            serde_json::to_writer(&mut *stdout, &value)?;
        } else {
            serde_json::to_writer_pretty(&mut *stdout, &value)?;
        }
        writeln!(stdout)?;
    }

    stdout.flush()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use breachcheck::{
        api::{Lookup, Mode, PasswordStatus},
        error::Error,
    };
    use clap::Parser;
    use serde_json::json;

    use super::*;

    fn parse(extra: &[&str]) -> ProgramArgs {
        let mut argv = vec!["breachcheck"];
        argv.extend_from_slice(extra);
        ProgramArgs::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_build_query() {
        let args = parse(&["--validation-type", "AllBreachedSites", "--domain", "adobe.com"]);
        let query = build_query(&args).unwrap();

        assert_eq!(
            query,
            Query::AllBreachedSites {
                domain: Some("adobe.com".to_string())
            }
        );
    }

    #[test]
    fn test_build_query_rejects_invalid_email() {
        let args = parse(&[
            "--validation-type",
            "BreachedAccount",
            "--email-address",
            "not-an-email",
        ]);
        let error = build_query(&args).unwrap_err();

        assert!(matches!(
            error.downcast_ref::<Error>(),
            Some(Error::InvalidArgument { .. })
        ));
    }

    #[test]
    fn test_build_query_password() {
        let args = parse(&["--validation-type", "PwnedPasswords", "--password", "hunter2"]);
        let query = build_query(&args).unwrap();

        assert_eq!(query.mode(), Mode::PwnedPasswords);
        assert!(query.is_sensitive());
    }

    #[test]
    fn test_build_config() {
        let args = parse(&["--validation-type", "DataClasses", "--user-agent", ""]);
        let config = build_config(&args);

        assert_eq!(config.http_user_agent(), "");
        assert_eq!(config.tls_min_version(), TlsVersion::Tls12);

        let args = parse(&["--validation-type", "DataClasses"]);
        assert!(!build_config(&args).http_user_agent().is_empty());
    }

    #[test]
    fn test_build_query_rejects_empty_values() {
        for extra in [
            &["--validation-type", "SingleBreachedSite", "--site-name", ""][..],
            &["--validation-type", "PwnedPasswords", "--password", ""],
            &["--validation-type", "BreachedAccount", "--email-address", ""],
        ] {
            let error = build_query(&parse(extra)).unwrap_err();

            assert!(
                matches!(
                    error.downcast_ref::<Error>(),
                    Some(Error::InvalidArgument { .. })
                ),
                "{extra:?}"
            );
        }
    }

    fn render(query: &Query, outcome: Outcome, compact: bool) -> (String, String) {
        let mut stdout = Vec::new();
        let mut stderr = Vec::new();

        report(query, outcome, compact, &mut stdout, &mut stderr).unwrap();

        (
            String::from_utf8(stdout).unwrap(),
            String::from_utf8(stderr).unwrap(),
        )
    }

    #[test]
    fn test_report_data_to_stdout() {
        let value = json!([{"Name": "Adobe", "PwnCount": 152445165}]);
        let outcome = Outcome::Data(Lookup::Found(value.clone()));

        let (stdout, stderr) = render(&Query::AllBreachedSites { domain: None }, outcome, false);

        assert!(stderr.is_empty());
        assert!(stdout.ends_with('\n'));
        assert_eq!(serde_json::from_str::<serde_json::Value>(&stdout).unwrap(), value);
    }

    #[test]
    fn test_report_compact() {
        let outcome = Outcome::Data(Lookup::Found(json!(["Email addresses", "Passwords"])));

        let (stdout, _) = render(&Query::DataClasses, outcome, true);

        assert_eq!(stdout, "[\"Email addresses\",\"Passwords\"]\n");
    }

    #[test]
    fn test_report_warning_once_on_stderr() {
        let query = Query::SingleBreachedSite {
            site_name: "Nowhere".to_string(),
        };
        let outcome = Outcome::Data(Lookup::NotFound("HTTP 404 Not Found".to_string()));

        let (stdout, stderr) = render(&query, outcome, false);

        assert!(stdout.is_empty());
        assert_eq!(stderr, "WARNING: Nowhere was not found.\n");
    }

    #[test]
    fn test_report_not_pwned_without_prefix() {
        let query = Query::PwnedPasswords {
            password: Password::new("hunter2"),
        };
        let outcome = Outcome::Password(PasswordStatus::NotPwned);

        let (stdout, stderr) = render(&query, outcome, false);

        assert!(stdout.is_empty());
        assert_eq!(stderr.lines().count(), 1);
        assert!(stderr.starts_with("Password not found"));
        assert!(!stderr.contains("hunter2"));
    }
}
