//! env:push - make the remote store match `.env.<stage>`.

use std::path::Path;

use crate::cli::progress::Bar;
use crate::cli::prompt::Terminal;
use crate::cli::{connect, output, RemoteArgs};
use crate::core::env;
use crate::core::sync::Engine;
use crate::core::validation::validate_segment;
use crate::error::{Result, UsageError};

/// Push the stage file to Parameter Store.
pub fn execute(dir: &Path, args: &RemoteArgs) -> Result<()> {
    // Fail on a missing file before asking for credentials.
    validate_segment("stage", &args.stage)?;
    let path = env::stage_path(dir, &args.stage);
    if !path.exists() {
        return Err(UsageError::MissingEnvFile { path }.into());
    }

    let (settings, remote) = connect(dir, args)?;

    let mut bar = Bar::new();
    let prompt = bar.suspending(&Terminal);
    let report = Engine::new(&remote, &settings).push(&prompt, &mut bar)?;

    for key in &report.deleted {
        output::dimmed(&format!("removed {}", output::key(key)));
    }
    output::success(&format!(
        "pushed {} parameters to {}",
        report.upserted,
        settings.remote_path()
    ));
    Ok(())
}
