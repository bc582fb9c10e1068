//! env:pull - write remote variables to `.env.<stage>`.

use std::path::Path;

use crate::cli::{connect, output, RemoteArgs};
use crate::core::env::Backup;
use crate::core::sync::Engine;
use crate::error::Result;

/// Pull remote variables into the stage file.
pub fn execute(dir: &Path, args: &RemoteArgs) -> Result<()> {
    let (settings, remote) = connect(dir, args)?;
    let report = Engine::new(&remote, &settings).pull()?;

    match &report.backup {
        Backup::Created(path) => output::dimmed(&format!(
            "backed up previous file to {}",
            output::path(&path.display().to_string())
        )),
        Backup::Skipped(path) => output::dimmed(&format!(
            "skipping backup, {} already exists",
            output::path(&path.display().to_string())
        )),
        Backup::NotNeeded => {}
    }

    output::success(&format!(
        "pulled {} variables into {}",
        report.count,
        output::path(&report.path.display().to_string())
    ));
    Ok(())
}
