//! Test support utilities for ssm-env integration tests.
//!
//! Provides an isolated project directory, an in-memory parameter store and
//! scripted prompts so sync scenarios run without AWS.

#![allow(dead_code)]

pub mod assertions;
pub mod commands;
pub mod fixtures;

#[allow(unused_imports)]
pub use assertions::*;
#[allow(unused_imports)]
pub use fixtures::*;

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::path::PathBuf;

use ssm_env::core::prompt::Prompt;
use ssm_env::core::remote::Remote;
use ssm_env::core::retry::RetryPolicy;
use ssm_env::core::settings::{Credentials, Settings};
use ssm_env::core::store::Memory;
use ssm_env::core::sync::{Engine, Progress, PullReport, PushReport};
use ssm_env::error::Result;
use tempfile::TempDir;

pub const APP: &str = "demo";
pub const STAGE: &str = "staging";

/// Test environment with an isolated project dir and in-memory store.
///
/// No process-global state is mutated, so tests can run in parallel.
pub struct Test {
    /// Temporary directory holding the .env.<stage> files
    pub dir: TempDir,
    pub remote: Remote<Memory>,
    pub settings: Settings,
}

impl Test {
    /// Create an empty environment: no local file, empty store.
    pub fn new() -> Self {
        Self::with_store(Memory::new())
    }

    /// Create an environment around a pre-built store.
    pub fn with_store(store: Memory) -> Self {
        let dir = TempDir::new().expect("failed to create temp dir");
        let settings = Settings {
            stage: STAGE.to_string(),
            app_name: APP.to_string(),
            region: "eu-west-1".to_string(),
            credentials: Credentials {
                access_key: "AKIATEST".to_string(),
                secret_key: "secret".to_string(),
            },
            decrypt: false,
            root: dir.path().to_path_buf(),
        };
        let remote = Remote::new(store, RetryPolicy::immediate(3));

        Self {
            dir,
            remote,
            settings,
        }
    }

    /// Seed the store with unqualified variables.
    pub fn with_remote(vars: &[(&str, &str)]) -> Self {
        let t = Self::new();
        for (k, v) in vars {
            t.store().insert(qualified(k), *v);
        }
        t
    }

    pub fn store(&self) -> &Memory {
        self.remote.store()
    }

    pub fn engine(&self) -> Engine<'_, Memory> {
        Engine::new(&self.remote, &self.settings)
    }

    pub fn env_path(&self) -> PathBuf {
        self.settings.env_path()
    }

    pub fn backup_path(&self) -> PathBuf {
        self.settings.backup_path()
    }

    /// Write the local stage file.
    pub fn write_env(&self, contents: &str) {
        std::fs::write(self.env_path(), contents).expect("failed to write env file");
    }

    pub fn read_env(&self) -> String {
        std::fs::read_to_string(self.env_path()).expect("failed to read env file")
    }

    /// Remote state keyed by unqualified name.
    pub fn remote_vars(&self) -> BTreeMap<String, String> {
        let prefix = format!("/{APP}/{STAGE}/");
        self.store()
            .snapshot()
            .into_iter()
            .filter_map(|(k, v)| k.strip_prefix(&prefix).map(|name| (name.to_string(), v)))
            .collect()
    }

    /// Push, answering any confirmation with `confirm`.
    pub fn push(&self, confirm: bool) -> (Result<PushReport>, Scripted, Recorder) {
        let prompt = Scripted::confirming(confirm);
        let mut progress = Recorder::default();
        let result = self.engine().push(&prompt, &mut progress);
        (result, prompt, progress)
    }

    pub fn pull(&self) -> Result<PullReport> {
        self.engine().pull()
    }
}

/// Qualified name under the test app and stage.
pub fn qualified(name: &str) -> String {
    format!("/{APP}/{STAGE}/{name}")
}

/// Prompt with fixed answers that records every confirmation asked.
#[derive(Debug, Default)]
pub struct Scripted {
    confirm: bool,
    pub confirmations: RefCell<Vec<String>>,
}

impl Scripted {
    pub fn confirming(confirm: bool) -> Self {
        Self {
            confirm,
            confirmations: RefCell::new(Vec::new()),
        }
    }

    pub fn was_asked(&self) -> bool {
        !self.confirmations.borrow().is_empty()
    }
}

impl Prompt for Scripted {
    fn ask(&self, label: &str) -> Result<String> {
        panic!("unexpected prompt: {label}")
    }

    fn secret(&self, label: &str) -> Result<String> {
        panic!("unexpected secret prompt: {label}")
    }

    fn confirm(&self, question: &str) -> Result<bool> {
        self.confirmations.borrow_mut().push(question.to_string());
        Ok(self.confirm)
    }
}

/// Progress sink that remembers what it was told.
#[derive(Debug, Default)]
pub struct Recorder {
    pub total: Option<u64>,
    pub advanced: u64,
    pub notes: Vec<String>,
    pub finished: bool,
}

impl Progress for Recorder {
    fn start(&mut self, total: u64) {
        self.total = Some(total);
    }

    fn advance(&mut self) {
        self.advanced += 1;
    }

    fn note(&mut self, message: &str) {
        self.notes.push(message.to_string());
    }

    fn finish(&mut self) {
        self.finished = true;
    }
}
