//! Push progress bar.

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

use crate::cli::output;
use crate::core::prompt::Prompt;
use crate::core::sync::Progress;
use crate::error::Result;

const TEMPLATE: &str = "{elapsed_precise:.green}  [{wide_bar:.cyan/blue}] {pos}/{len}";

/// Progress bar on stderr, hidden until work starts.
#[derive(Debug, Clone)]
pub struct Bar {
    bar: ProgressBar,
}

impl Default for Bar {
    fn default() -> Self {
        Self::new()
    }
}

impl Bar {
    pub fn new() -> Self {
        Self {
            bar: ProgressBar::with_draw_target(Some(0), ProgressDrawTarget::hidden()),
        }
    }

    /// Wrap `prompt` so questions are asked with the bar out of the way.
    pub fn suspending<'a>(&self, prompt: &'a dyn Prompt) -> Suspended<'a> {
        Suspended {
            bar: self.bar.clone(),
            prompt,
        }
    }
}

impl Progress for Bar {
    fn start(&mut self, total: u64) {
        let style = ProgressStyle::with_template(TEMPLATE)
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=> ");
        self.bar.set_style(style);
        self.bar.set_length(total);
        self.bar.set_draw_target(ProgressDrawTarget::stderr());
    }

    fn advance(&mut self) {
        self.bar.inc(1);
    }

    fn note(&mut self, message: &str) {
        if self.bar.is_hidden() {
            output::warn(message);
        } else {
            self.bar.suspend(|| output::warn(message));
        }
    }

    fn finish(&mut self) {
        self.bar.finish_and_clear();
    }
}

/// Prompt that hides the progress bar while waiting for input.
pub struct Suspended<'a> {
    bar: ProgressBar,
    prompt: &'a dyn Prompt,
}

impl Prompt for Suspended<'_> {
    fn ask(&self, label: &str) -> Result<String> {
        self.bar.suspend(|| self.prompt.ask(label))
    }

    fn secret(&self, label: &str) -> Result<String> {
        self.bar.suspend(|| self.prompt.secret(label))
    }

    fn confirm(&self, question: &str) -> Result<bool> {
        self.bar.suspend(|| self.prompt.confirm(question))
    }
}
