//! ssm-env - sync .env.<stage> files with AWS SSM Parameter Store.

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use ssm_env::cli::output;
use ssm_env::cli::{execute, Cli};
use ssm_env::error::{Error, PromptError, RemoteError, UsageError, ValidationError};

fn main() {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_env("SSM_ENV_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("ssm_env=debug")
        } else {
            EnvFilter::new("ssm_env=warn")
        }
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false).without_time())
        .init();

    if let Err(e) = execute(cli.command, &cli.dir) {
        let suggestion = match &e {
            Error::Usage(UsageError::MissingEnvFile { .. }) => {
                Some("create it, or run env:pull to fetch the current remote values")
            }
            Error::Usage(UsageError::InvalidEnvFile { .. }) => {
                Some("quote values containing spaces, e.g. NAME=\"two words\"")
            }
            Error::Validation(ValidationError::EmptyValue(_)) => {
                Some("give the variable a value or remove the line")
            }
            Error::Remote(RemoteError::Exhausted { .. }) => {
                Some("check your credentials, region and network, then retry")
            }
            Error::Prompt(PromptError::NotInteractive(_)) => {
                Some("pass --appName, --accessKey, --secretKey and --region, or set them in .env.<stage>")
            }
            _ => None,
        };

        output::error(&error_chain(&e));
        if let Some(hint) = suggestion {
            output::hint(hint);
        }
        std::process::exit(1);
    }
}

/// Render an error with its sources, e.g. `PutParameter failed after 4 attempts: ...`.
fn error_chain(e: &Error) -> String {
    let mut message = e.to_string();
    let mut source = std::error::Error::source(e);
    while let Some(cause) = source {
        let text = cause.to_string();
        if !message.contains(&text) {
            message.push_str(": ");
            message.push_str(&text);
        }
        source = cause.source();
    }
    message
}
