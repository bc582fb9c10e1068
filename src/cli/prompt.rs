//! Terminal prompts backed by dialoguer.

use std::io::{self, IsTerminal};

use dialoguer::{Confirm, Input, Password};

use crate::core::prompt::Prompt;
use crate::error::{PromptError, Result};

/// Prompts the user on the controlling terminal.
#[derive(Debug, Default)]
pub struct Terminal;

impl Terminal {
    fn ensure_interactive(label: &str) -> Result<()> {
        if io::stdin().is_terminal() {
            Ok(())
        } else {
            Err(PromptError::NotInteractive(label.to_string()).into())
        }
    }
}

impl Prompt for Terminal {
    fn ask(&self, label: &str) -> Result<String> {
        Self::ensure_interactive(label)?;
        let value: String = Input::new().with_prompt(label).interact_text()?;
        Ok(value.trim().to_string())
    }

    fn secret(&self, label: &str) -> Result<String> {
        Self::ensure_interactive(label)?;
        Ok(Password::new().with_prompt(label).interact()?)
    }

    fn confirm(&self, question: &str) -> Result<bool> {
        Self::ensure_interactive(question)?;
        Ok(Confirm::new()
            .with_prompt(question)
            .default(false)
            .interact()?)
    }
}
