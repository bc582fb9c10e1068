//! Interactive input.
//!
//! Settings resolution and the push guard ask the user for input through
//! this trait so callers can swap the terminal for canned answers.

use crate::error::Result;

/// Source of interactive answers.
pub trait Prompt {
    /// Ask for a plain text value.
    fn ask(&self, label: &str) -> Result<String>;

    /// Ask for a value without echoing it.
    fn secret(&self, label: &str) -> Result<String>;

    /// Ask a yes/no question. Declining is the default.
    fn confirm(&self, question: &str) -> Result<bool>;
}
