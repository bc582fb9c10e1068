//! Input validation for ssm-env operations.
//!
//! Parameter Store names allow `a-zA-Z0-9_.-` within a path segment and use
//! `/` as the hierarchy separator, so neither variables nor the app/stage
//! segments may contain one.

use crate::core::chunk;
use crate::error::{Result, UsageError, ValidationError};

fn is_allowed(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || matches!(ch, '_' | '.' | '-')
}

/// Validate a variable name read from a local env file.
///
/// # Errors
///
/// Returns `ValidationError` if the name is empty, contains a character
/// Parameter Store rejects, or ends in a `.part<N>` chunk suffix.
pub fn validate_key(key: &str) -> Result<()> {
    if key.is_empty() {
        return Err(ValidationError::EmptyKey.into());
    }

    if let Some((i, ch)) = key.chars().enumerate().find(|(_, ch)| !is_allowed(*ch)) {
        return Err(ValidationError::InvalidKey {
            key: key.to_string(),
            reason: format!(
                "invalid character '{}' at position {}. Only A-Z, a-z, 0-9, '_', '.' and '-' are allowed",
                ch,
                i + 1
            ),
        }
        .into());
    }

    if chunk::parse_chunk_name(key).is_some() {
        return Err(ValidationError::ReservedSuffix(key.to_string()).into());
    }

    Ok(())
}

/// Validate an app name or stage used as a path segment.
///
/// # Errors
///
/// Returns `UsageError::InvalidSegment` if the value is empty or contains a
/// disallowed character.
pub fn validate_segment(kind: &'static str, value: &str) -> Result<()> {
    if value.is_empty() {
        return Err(UsageError::InvalidSegment {
            kind,
            value: value.to_string(),
            reason: "cannot be empty".to_string(),
        }
        .into());
    }

    if let Some(ch) = value.chars().find(|ch| !is_allowed(*ch)) {
        return Err(UsageError::InvalidSegment {
            kind,
            value: value.to_string(),
            reason: format!("'{ch}' is not allowed"),
        }
        .into());
    }

    Ok(())
}
