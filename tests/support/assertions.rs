//! Test assertion helpers.

use std::process::Output;

use ssm_env::core::store::Call;

/// Assert that a command output was successful.
pub fn assert_success(output: &Output) {
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        panic!("Command failed:\n{}", stderr);
    }
}

/// Assert that a command output failed.
pub fn assert_failure(output: &Output) {
    assert!(
        !output.status.success(),
        "Expected command to fail but it succeeded"
    );
}

/// Get stdout as String.
pub fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

/// Get stderr as String.
pub fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}

/// Assert stderr contains a string.
pub fn assert_stderr_contains(output: &Output, expected: &str) {
    let err = stderr(output);
    assert!(
        err.contains(expected),
        "stderr missing '{}', got: {}",
        expected,
        err
    );
}

/// Assert that no delete request comes after the first put.
pub fn assert_deletes_before_puts(calls: &[Call]) {
    let first_put = calls.iter().position(|c| matches!(c, Call::Put { .. }));
    let last_delete = calls.iter().rposition(|c| matches!(c, Call::Delete { .. }));

    if let (Some(put), Some(delete)) = (first_put, last_delete) {
        assert!(
            delete < put,
            "delete at position {} came after put at position {}: {:?}",
            delete,
            put,
            calls
        );
    }
}

/// Assert the store received no mutating request.
pub fn assert_no_mutations(calls: &[Call]) {
    assert!(
        calls.iter().all(|c| matches!(c, Call::GetByPath { .. })),
        "expected read-only calls, got: {:?}",
        calls
    );
}
