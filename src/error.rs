//! Error types.
//!
//! Each concern gets its own enum; [`Error`] wraps them so commands can use
//! a single `Result` and `main` can match on the variant to print a hint.

use std::path::PathBuf;

use thiserror::Error;

/// Top-level error for every ssm-env operation.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Usage(#[from] UsageError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Remote(#[from] RemoteError),

    #[error(transparent)]
    Sync(#[from] SyncError),

    #[error(transparent)]
    Prompt(#[from] PromptError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<dialoguer::Error> for Error {
    fn from(err: dialoguer::Error) -> Self {
        Error::Prompt(PromptError::Interaction(err))
    }
}

/// Invalid invocation, detected before any remote call.
#[derive(Debug, Error)]
pub enum UsageError {
    #[error("'{}' doesn't exist", path.display())]
    MissingEnvFile { path: PathBuf },

    #[error("'{}' is not a valid env file", path.display())]
    InvalidEnvFile {
        path: PathBuf,
        #[source]
        source: dotenvy::Error,
    },

    #[error("invalid {kind} '{value}': {reason}")]
    InvalidSegment {
        kind: &'static str,
        value: String,
        reason: String,
    },
}

/// Variables in a local env file that cannot be stored.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("variable name cannot be empty")]
    EmptyKey,

    #[error("invalid variable name '{key}': {reason}")]
    InvalidKey { key: String, reason: String },

    #[error("variable name '{0}' uses the reserved chunk suffix '.part<N>'")]
    ReservedSuffix(String),

    #[error("variable '{0}' has an empty value, which Parameter Store cannot hold")]
    EmptyValue(String),
}

/// Failures talking to the parameter store.
#[derive(Debug, Error)]
pub enum RemoteError {
    #[error("{operation} failed: {message}")]
    Request {
        operation: &'static str,
        message: String,
    },

    #[error("{operation} failed after {attempts} attempts")]
    Exhausted {
        operation: &'static str,
        attempts: usize,
        #[source]
        source: Box<RemoteError>,
    },

    #[error("failed to start async runtime: {0}")]
    Runtime(#[source] std::io::Error),
}

impl RemoteError {
    /// Build a [`RemoteError::Request`] from any displayable error.
    pub fn request(operation: &'static str, err: impl std::fmt::Display) -> Self {
        RemoteError::Request {
            operation,
            message: err.to_string(),
        }
    }
}

/// Sync engine outcomes that stop a command.
#[derive(Debug, Error)]
pub enum SyncError {
    #[error("push aborted: remote variables were left untouched")]
    Aborted,
}

/// Interactive input failures.
#[derive(Debug, Error)]
pub enum PromptError {
    #[error("{0} is required but the terminal is not interactive")]
    NotInteractive(String),

    #[error("prompt failed: {0}")]
    Interaction(#[source] dialoguer::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
