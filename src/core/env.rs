//! Stage env files.
//!
//! Reads `.env.<stage>` files into a sorted variable set and writes them
//! back grouped by name prefix.

#[cfg(unix)]
use std::io::Write;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::core::constants::{BACKUP_SUFFIX, ENV_FILE_PREFIX};
use crate::error::{Result, UsageError};

/// Path of the env file for a stage.
pub fn stage_path(root: &Path, stage: &str) -> PathBuf {
    root.join(format!("{ENV_FILE_PREFIX}{stage}"))
}

/// Path of the backup made before a pull overwrites the stage file.
pub fn backup_path(root: &Path, stage: &str) -> PathBuf {
    root.join(format!("{ENV_FILE_PREFIX}{stage}{BACKUP_SUFFIX}"))
}

/// What happened when backing up an env file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Backup {
    /// There was no file to back up.
    NotNeeded,
    /// The file was copied to the backup path.
    Created(PathBuf),
    /// A backup already existed and was left alone.
    Skipped(PathBuf),
}

/// Copy `path` to `backup` unless `path` is missing or `backup` exists.
///
/// # Errors
///
/// Returns error if the copy fails.
pub fn backup(path: &Path, backup: &Path) -> Result<Backup> {
    if !path.exists() {
        return Ok(Backup::NotNeeded);
    }

    if backup.exists() {
        debug!(backup = %backup.display(), "backup exists, skipping");
        return Ok(Backup::Skipped(backup.to_path_buf()));
    }

    std::fs::copy(path, backup)?;
    debug!(from = %path.display(), to = %backup.display(), "backed up env file");
    Ok(Backup::Created(backup.to_path_buf()))
}

/// A parsed env file.
#[derive(Debug, Clone)]
pub struct EnvFile {
    vars: BTreeMap<String, String>,
    path: PathBuf,
}

impl EnvFile {
    /// Parse an env file from disk.
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be read, or
    /// `UsageError::InvalidEnvFile` if it is not valid dotenv syntax.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        let vars = parse(&contents).map_err(|source| UsageError::InvalidEnvFile {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), vars = vars.len(), "loaded env file");

        Ok(Self {
            vars,
            path: path.to_path_buf(),
        })
    }

    /// Parse an env file if it exists, otherwise return an empty set.
    pub fn load_or_empty(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::from_vars(BTreeMap::new(), path.to_path_buf()))
        }
    }

    /// Create from an existing variable set.
    pub fn from_vars(vars: BTreeMap<String, String>, path: PathBuf) -> Self {
        Self { vars, path }
    }

    /// Write the grouped rendering to disk with owner-only permissions.
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be written.
    pub fn save(&self) -> Result<()> {
        let content = render_grouped(&self.vars);

        #[cfg(unix)]
        {
            use std::os::unix::fs::{OpenOptionsExt, PermissionsExt};

            let mut file = std::fs::OpenOptions::new()
                .create(true)
                .truncate(true)
                .write(true)
                .mode(0o600)
                .open(&self.path)?;
            file.write_all(content.as_bytes())?;
            file.flush()?;

            std::fs::set_permissions(&self.path, std::fs::Permissions::from_mode(0o600))?;
        }

        #[cfg(not(unix))]
        {
            std::fs::write(&self.path, content)?;
        }

        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars.get(key).map(String::as_str)
    }

    pub fn vars(&self) -> &BTreeMap<String, String> {
        &self.vars
    }

    pub fn into_vars(self) -> BTreeMap<String, String> {
        self.vars
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Parse dotenv content.
///
/// Handles `#` comments (whole-line or after an unquoted value), `export `
/// prefixes, literal single-quoted values, double-quoted values with escapes
/// that may span several lines, and `${VAR}` expansion outside single
/// quotes. Later duplicates win.
///
/// # Errors
///
/// Returns the first line that is not valid dotenv syntax, such as an
/// unquoted value containing spaces.
pub fn parse(contents: &str) -> std::result::Result<BTreeMap<String, String>, dotenvy::Error> {
    dotenvy::from_read_iter(contents.as_bytes()).collect()
}

/// Render variables grouped by the prefix before their first underscore.
///
/// Groups appear in order of their first key, each followed by a blank
/// line. Keys are sorted within a group.
pub fn render_grouped(vars: &BTreeMap<String, String>) -> String {
    let mut groups: Vec<(&str, Vec<String>)> = Vec::new();

    for (key, value) in vars {
        let prefix = key.split_once('_').map_or(key.as_str(), |(p, _)| p);
        let line = render_line(key, value);

        match groups.iter_mut().find(|(p, _)| *p == prefix) {
            Some((_, lines)) => lines.push(line),
            None => groups.push((prefix, vec![line])),
        }
    }

    let mut output = String::new();
    for (_, lines) in groups {
        output.push_str(&lines.join("\n"));
        output.push_str("\n\n");
    }
    output
}

fn render_line(key: &str, value: &str) -> String {
    if needs_quotes(value) {
        format!("{}=\"{}\"", key, escape_value(value))
    } else {
        format!("{}={}", key, value)
    }
}

fn needs_quotes(value: &str) -> bool {
    value.is_empty()
        || value.chars().any(char::is_whitespace)
        || value.contains(['#', '=', '"', '\'', '\\', '$'])
}

fn escape_value(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());

    for ch in value.chars() {
        match ch {
            '\\' => escaped.push_str("\\\\"),
            '"' => escaped.push_str("\\\""),
            '$' => escaped.push_str("\\$"),
            '\n' => escaped.push_str("\\n"),
            _ => escaped.push(ch),
        }
    }

    escaped
}
