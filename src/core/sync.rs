//! Sync engine.
//!
//! Implements `list`, `pull` and `push` on top of the remote facade, the
//! chunking codec and the stage env file.

use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;

use tracing::{debug, info, warn};

use crate::core::chunk;
use crate::core::constants::CHUNK_LIMIT;
use crate::core::env::{self, Backup, EnvFile};
use crate::core::prompt::Prompt;
use crate::core::remote::Remote;
use crate::core::settings::Settings;
use crate::core::store::ParameterStore;
use crate::core::validation::validate_key;
use crate::error::{Result, SyncError, UsageError, ValidationError};

/// Receives push progress.
///
/// All methods default to doing nothing.
pub trait Progress {
    /// Work is about to start; `total` steps are expected.
    fn start(&mut self, _total: u64) {}

    /// One step finished.
    fn advance(&mut self) {}

    /// A message worth showing alongside the progress display.
    fn note(&mut self, _message: &str) {}

    /// Work is over, successfully or not.
    fn finish(&mut self) {}
}

/// Progress sink that discards everything.
#[derive(Debug, Default)]
pub struct Silent;

impl Progress for Silent {}

/// Outcome of a pull.
#[derive(Debug)]
pub struct PullReport {
    /// Variables written.
    pub count: usize,
    /// File that was written.
    pub path: PathBuf,
    pub backup: Backup,
}

/// Outcome of a push.
#[derive(Debug, Default)]
pub struct PushReport {
    /// Parameters written, counting each chunk.
    pub upserted: usize,
    /// Unqualified names removed from the remote store.
    pub deleted: Vec<String>,
    /// Variables that were split into chunks.
    pub split: Vec<String>,
}

/// Runs sync commands for one app and stage.
#[derive(Debug)]
pub struct Engine<'a, S> {
    remote: &'a Remote<S>,
    settings: &'a Settings,
    chunk_limit: usize,
}

impl<'a, S: ParameterStore> Engine<'a, S> {
    pub fn new(remote: &'a Remote<S>, settings: &'a Settings) -> Self {
        Self {
            remote,
            settings,
            chunk_limit: CHUNK_LIMIT,
        }
    }

    /// Override the per-parameter character limit.
    ///
    /// # Panics
    ///
    /// Panics if `limit` is zero.
    pub fn with_chunk_limit(mut self, limit: usize) -> Self {
        assert!(limit > 0, "chunk limit must be positive");
        self.chunk_limit = limit;
        self
    }

    /// Remote variables with chunks reassembled, sorted by name.
    ///
    /// When `key` is given only that variable is returned (if present). An
    /// empty `key` counts as no filter.
    ///
    /// # Errors
    ///
    /// Returns error if the remote fetch fails.
    pub fn list(&self, key: Option<&str>) -> Result<Vec<(String, String)>> {
        info!(stage = %self.settings.stage, ?key, "listing remote variables");

        let key = key.filter(|k| !k.is_empty());
        let vars = self.fetch_unified()?;
        Ok(vars
            .into_iter()
            .filter(|(name, _)| key.map_or(true, |k| k == name.as_str()))
            .collect())
    }

    /// Replace the local stage file with the remote variables.
    ///
    /// An existing file is backed up first unless a backup already exists.
    ///
    /// # Errors
    ///
    /// Returns error if the remote fetch, backup or write fails.
    pub fn pull(&self) -> Result<PullReport> {
        info!(stage = %self.settings.stage, "pulling remote variables");

        let vars = self.fetch_unified()?;
        let path = self.settings.env_path();
        let backup = env::backup(&path, &self.settings.backup_path())?;

        let file = EnvFile::from_vars(vars, path.clone());
        file.save()?;
        debug!(path = %path.display(), count = file.len(), "wrote env file");

        Ok(PullReport {
            count: file.len(),
            path,
            backup,
        })
    }

    /// Make the remote store match the local stage file.
    ///
    /// Remote variables missing locally are deleted before any upsert.
    /// Deleting everything (an empty local file) needs confirmation.
    ///
    /// # Errors
    ///
    /// Returns `UsageError::MissingEnvFile` before contacting the store if
    /// the stage file does not exist, a validation error for bad names or
    /// empty values,
    /// `SyncError::Aborted` if the confirmation is declined, or the first
    /// remote failure that outlasts the retry policy.
    pub fn push(&self, prompt: &dyn Prompt, progress: &mut dyn Progress) -> Result<PushReport> {
        let path = self.settings.env_path();
        if !path.exists() {
            return Err(UsageError::MissingEnvFile { path }.into());
        }

        info!(stage = %self.settings.stage, "pushing local variables");

        let local = EnvFile::load(&path)?.into_vars();
        for (key, value) in &local {
            validate_key(key)?;
            if value.is_empty() {
                return Err(ValidationError::EmptyValue(key.clone()).into());
            }
        }

        let (local, split) = self.expand(local);
        for key in &split {
            warn!(%key, "value exceeds parameter limit, splitting into chunks");
            progress.note(&format!(
                "Value for {key} is over {} characters, splitting into multiple keys.",
                self.chunk_limit
            ));
        }

        progress.start(local.len() as u64 + 1);
        let result = self.apply(&local, prompt, progress);
        progress.finish();

        let deleted = result?;
        Ok(PushReport {
            upserted: local.len(),
            deleted,
            split,
        })
    }

    fn apply(
        &self,
        local: &BTreeMap<String, String>,
        prompt: &dyn Prompt,
        progress: &mut dyn Progress,
    ) -> Result<Vec<String>> {
        // Raw names, so stale chunks of a shrunk value show up as removals.
        let remote = self
            .remote
            .fetch_all(&self.settings.remote_path(), self.settings.decrypt)?;
        progress.advance();

        let remote_only = remote_only(&remote, local);

        if !remote_only.is_empty() {
            progress.note(&format!(
                "{} variables found not present in {}. Deleting removed keys.",
                remote_only.len(),
                self.settings.env_path().display()
            ));

            if local.is_empty() {
                progress.note("There are no environment variables set locally.");
                let proceed = prompt
                    .confirm("This will remove all variables in SSM, are you sure you want to proceed?")?;
                if !proceed {
                    return Err(SyncError::Aborted.into());
                }
            }

            let qualified: Vec<String> = remote_only
                .iter()
                .map(|name| self.settings.qualify(name))
                .collect();
            self.remote.delete(&qualified)?;
        }

        for (name, value) in local {
            self.remote.put(&self.settings.qualify(name), value)?;
            progress.advance();
        }

        Ok(remote_only)
    }

    /// Replace oversized values with their chunks.
    ///
    /// Returns the expanded set and the names that were split.
    fn expand(&self, vars: BTreeMap<String, String>) -> (BTreeMap<String, String>, Vec<String>) {
        let mut expanded = BTreeMap::new();
        let mut split = Vec::new();

        for (key, value) in vars {
            if value.chars().count() >= self.chunk_limit {
                expanded.extend(chunk::expand(&key, &value, self.chunk_limit));
                split.push(key);
            } else {
                expanded.insert(key, value);
            }
        }

        (expanded, split)
    }

    fn fetch_unified(&self) -> Result<BTreeMap<String, String>> {
        let raw = self
            .remote
            .fetch_all(&self.settings.remote_path(), self.settings.decrypt)?;
        Ok(chunk::reunify(raw))
    }
}

/// Names present remotely but not locally.
fn remote_only(remote: &BTreeMap<String, String>, local: &BTreeMap<String, String>) -> Vec<String> {
    let remote_keys: BTreeSet<&String> = remote.keys().collect();
    let local_keys: BTreeSet<&String> = local.keys().collect();
    remote_keys
        .difference(&local_keys)
        .map(|k| k.to_string())
        .collect()
}
