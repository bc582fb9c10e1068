//! Helpers for running the ssm-env binary.

use assert_cmd::Command;
use std::path::Path;

/// Create an ssm-env command rooted at `dir`.
///
/// Logging and directory overrides from the parent environment are cleared
/// so results do not depend on the machine running the tests.
pub fn ssm_env(dir: &Path) -> Command {
    #[allow(deprecated)]
    let mut cmd = Command::cargo_bin("ssm-env").expect("failed to find ssm-env binary");
    cmd.current_dir(dir);
    cmd.env("NO_COLOR", "1");
    cmd.env_remove("SSM_ENV_LOG");
    cmd.env_remove("SSM_ENV_DIR");
    cmd
}
