//! Log output wiring for the binary.

mod support;
use support::commands::ssm_env;
use support::*;

use tempfile::TempDir;

fn project() -> TempDir {
    let tmp = TempDir::new().unwrap();
    std::fs::write(tmp.path().join(".env.staging"), "APP_NAME=demo\n").unwrap();
    tmp
}

#[test]
fn test_quiet_by_default() {
    let tmp = project();

    let output = ssm_env(tmp.path())
        .args(["env:list", STAGE])
        .write_stdin("")
        .output()
        .unwrap();

    assert_failure(&output);
    assert!(!stderr(&output).contains("DEBUG"));
}

#[test]
fn test_verbose_enables_debug_logs() {
    let tmp = project();

    let output = ssm_env(tmp.path())
        .args(["-v", "env:list", STAGE])
        .write_stdin("")
        .output()
        .unwrap();

    assert_failure(&output);
    let err = stderr(&output);
    assert!(err.contains("DEBUG"), "got: {err}");
    assert!(err.contains("loaded env file"), "got: {err}");
}

#[test]
fn test_verbose_flag_is_global() {
    let tmp = project();

    let output = ssm_env(tmp.path())
        .args(["env:list", STAGE, "--verbose"])
        .write_stdin("")
        .output()
        .unwrap();

    assert!(stderr(&output).contains("DEBUG"));
}

#[test]
fn test_log_env_var_overrides_verbosity() {
    let tmp = project();

    let output = ssm_env(tmp.path())
        .env("SSM_ENV_LOG", "ssm_env=debug")
        .args(["env:list", STAGE])
        .write_stdin("")
        .output()
        .unwrap();

    assert!(stderr(&output).contains("DEBUG"));

    let output = ssm_env(tmp.path())
        .env("SSM_ENV_LOG", "off")
        .args(["-v", "env:list", STAGE])
        .write_stdin("")
        .output()
        .unwrap();

    assert!(!stderr(&output).contains("DEBUG"));
}
