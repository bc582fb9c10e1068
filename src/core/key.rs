//! Key qualification.
//!
//! Variables live under `/<app>/<stage>/<name>` in Parameter Store.

/// Path prefix holding every variable of an app's stage.
pub fn path(app_name: &str, stage: &str) -> String {
    format!("/{app_name}/{stage}")
}

/// Fully qualified parameter name for a variable.
pub fn qualify(app_name: &str, stage: &str, name: &str) -> String {
    format!("/{app_name}/{stage}/{name}")
}

/// Strip the namespace from a qualified parameter name.
pub fn unqualify(qualified: &str) -> &str {
    qualified
        .rsplit_once('/')
        .map_or(qualified, |(_, name)| name)
}
