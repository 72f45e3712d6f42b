//! Bearer token command line tool.
//!
//! Loads provider configuration from an optional settings file and the
//! `JWT_SECRET_KEY`, `JWT_ISSUER` and `JWT_AUDIENCE` environment variables,
//! then issues or validates a single token.

use anyhow::{Context, Result};
use bearer_jwt::{BEARER_PREFIX, ProviderConfig, TokenProvider};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Settings file with a `jwt` table of `secret_key`, `issuer` and `audience`
    #[arg(short, long, global = true, env = "BEARER_JWT_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Issue a token for a subject and print it
    Issue {
        /// Authenticated principal, e.g. a username
        subject: String,
    },
    /// Validate a token and print its claims as JSON
    Validate {
        /// Token, with or without the `Bearer ` prefix
        value: String,
    },
}

fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::WARN.into())
                .from_env_lossy(),
        )
        .with_writer(std::io::stderr)
        .with_target(true)
        .init();
}

/// Accept bare tokens as well as full `Bearer` credentials
fn as_credential(value: &str) -> String {
    if value.starts_with(BEARER_PREFIX) {
        value.to_string()
    } else {
        format!("{BEARER_PREFIX}{value}")
    }
}

fn run(cli: Cli) -> Result<String> {
    let config = ProviderConfig::load(cli.config.as_deref())
        .context("failed to load provider configuration")?;
    let provider = TokenProvider::new(config);

    match cli.command {
        Command::Issue { subject } => Ok(provider.issue(&subject)),
        Command::Validate { value } => {
            let claims = provider
                .validate(&as_credential(value.trim()))
                .context("token rejected")?;
            serde_json::to_string_pretty(&claims).context("failed to render claims")
        }
    }
}

fn main() -> Result<()> {
    init_logging();
    let cli = Cli::parse();
    tracing::debug!(command = ?cli.command, "starting");
    let output = run(cli)?;
    println!("{output}");
    Ok(())
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_subcommands() {
        let cli = Cli::try_parse_from(["bearer-jwt", "--config", "jwt.toml", "issue", "alice"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("jwt.toml")));
        assert!(matches!(cli.command, Command::Issue { ref subject } if subject == "alice"));

        let cli = Cli::try_parse_from(["bearer-jwt", "validate", "a.b.c"]).unwrap();
        assert!(matches!(cli.command, Command::Validate { ref value } if value == "a.b.c"));
    }

    #[test]
    fn bare_tokens_gain_prefix() {
        assert_eq!(as_credential("a.b.c"), "Bearer a.b.c");
        assert_eq!(as_credential("Bearer a.b.c"), "Bearer a.b.c");
    }

    #[test]
    fn issue_then_validate_through_settings_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("jwt.toml");
        std::fs::write(
            &path,
            "[jwt]\nsecret_key = \"testing_secret\"\nissuer = \"Foo\"\naudience = \"Foo\"\n",
        )
        .unwrap();

        let token = run(Cli {
            config: Some(path.clone()),
            command: Command::Issue {
                subject: "alice".to_string(),
            },
        })
        .unwrap();

        let claims = run(Cli {
            config: Some(path.clone()),
            command: Command::Validate { value: token },
        })
        .unwrap();
        let claims: serde_json::Value = serde_json::from_str(&claims).unwrap();
        assert_eq!(claims["user"], "alice");
        assert_eq!(claims["iss"], "Foo");

        let rejected = run(Cli {
            config: Some(path),
            command: Command::Validate {
                value: "Bearer a.b.c".to_string(),
            },
        });
        assert!(rejected.is_err());
    }
}
