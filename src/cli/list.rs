//! env:list - show remote variables for a stage.

use std::io::{self, Write};
use std::path::Path;

use crate::cli::{connect, output, RemoteArgs};
use crate::core::remote::Remote;
use crate::core::settings::Settings;
use crate::core::store::ParameterStore;
use crate::core::sync::Engine;
use crate::error::Result;

/// List remote variables, optionally just one key.
pub fn execute(dir: &Path, args: &RemoteArgs, key: Option<&str>, json: bool) -> Result<()> {
    let (settings, remote) = connect(dir, args)?;
    show(&remote, &settings, key, json, &mut io::stdout().lock())
}

/// Write the listing to `out` as a table, or as JSON when `json` is set.
///
/// An empty `key` lists everything.
pub fn show<S: ParameterStore>(
    remote: &Remote<S>,
    settings: &Settings,
    key: Option<&str>,
    json: bool,
    out: &mut impl Write,
) -> Result<()> {
    let key = key.filter(|k| !k.is_empty());
    let vars = Engine::new(remote, settings).list(key)?;

    if json {
        let variables: serde_json::Map<String, serde_json::Value> = vars
            .iter()
            .map(|(k, v)| (k.clone(), serde_json::Value::String(v.clone())))
            .collect();
        let result = serde_json::json!({
            "app": settings.app_name,
            "stage": settings.stage,
            "variables": variables,
            "count": vars.len(),
        });
        writeln!(out, "{}", serde_json::to_string_pretty(&result)?)?;
    } else if vars.is_empty() {
        let message = match key {
            Some(k) => format!("{} not found in {}", k, settings.remote_path()),
            None => format!("no variables under {}", settings.remote_path()),
        };
        writeln!(out, "{}", output::dim(&message))?;
    } else {
        let rows: Vec<Vec<String>> = vars.into_iter().map(|(k, v)| vec![k, v]).collect();
        write!(out, "{}", output::table(&["Key", "Value"], &rows))?;
    }

    Ok(())
}
