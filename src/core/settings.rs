//! Per-command settings.
//!
//! Everything a command needs to reach Parameter Store is resolved once,
//! up front, into an immutable [`Settings`]. Each value comes from the first
//! source that has it: command-line flag, the stage env file, then an
//! interactive prompt.

use std::fmt;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::core::constants::{ACCESS_KEY_VAR, APP_NAME_VAR, REGION_VAR, SECRET_KEY_VAR};
use crate::core::env::{self, EnvFile};
use crate::core::key;
use crate::core::prompt::Prompt;
use crate::core::validation::validate_segment;
use crate::error::Result;

/// Values supplied on the command line.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub app_name: Option<String>,
    pub access_key: Option<String>,
    pub secret_key: Option<String>,
    pub region: Option<String>,
    pub decrypt: bool,
}

/// Static AWS credentials.
#[derive(Clone)]
pub struct Credentials {
    pub access_key: String,
    pub secret_key: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("access_key", &self.access_key)
            .field("secret_key", &"<redacted>")
            .finish()
    }
}

/// Resolved configuration for one command invocation.
#[derive(Debug, Clone)]
pub struct Settings {
    pub stage: String,
    pub app_name: String,
    pub region: String,
    pub credentials: Credentials,
    pub decrypt: bool,
    pub root: PathBuf,
}

impl Settings {
    /// Resolve settings for `stage`, reading `.env.<stage>` under `root`.
    ///
    /// # Errors
    ///
    /// Returns `UsageError::InvalidSegment` if the stage or app name cannot
    /// be used in a parameter path, or a prompt error if a missing value
    /// cannot be asked for.
    pub fn resolve(
        stage: &str,
        root: &Path,
        overrides: Overrides,
        prompt: &dyn Prompt,
    ) -> Result<Self> {
        validate_segment("stage", stage)?;

        let file = EnvFile::load_or_empty(env::stage_path(root, stage))?;

        let app_name = pick(overrides.app_name, &file, APP_NAME_VAR, || {
            prompt.ask("App name")
        })?;
        validate_segment("app name", &app_name)?;

        let access_key = pick(overrides.access_key, &file, ACCESS_KEY_VAR, || {
            prompt.secret(ACCESS_KEY_VAR)
        })?;
        let secret_key = pick(overrides.secret_key, &file, SECRET_KEY_VAR, || {
            prompt.secret(SECRET_KEY_VAR)
        })?;
        let region = pick(overrides.region, &file, REGION_VAR, || prompt.ask(REGION_VAR))?;

        debug!(%stage, %app_name, %region, decrypt = overrides.decrypt, "resolved settings");

        Ok(Self {
            stage: stage.to_string(),
            app_name,
            region,
            credentials: Credentials {
                access_key,
                secret_key,
            },
            decrypt: overrides.decrypt,
            root: root.to_path_buf(),
        })
    }

    /// Local env file for this stage.
    pub fn env_path(&self) -> PathBuf {
        env::stage_path(&self.root, &self.stage)
    }

    /// Backup location for the local env file.
    pub fn backup_path(&self) -> PathBuf {
        env::backup_path(&self.root, &self.stage)
    }

    /// Parameter Store path holding this stage's variables.
    pub fn remote_path(&self) -> String {
        key::path(&self.app_name, &self.stage)
    }

    /// Qualified parameter name for a variable.
    pub fn qualify(&self, name: &str) -> String {
        key::qualify(&self.app_name, &self.stage, name)
    }
}

fn pick(
    flag: Option<String>,
    file: &EnvFile,
    var: &str,
    ask: impl FnOnce() -> Result<String>,
) -> Result<String> {
    if let Some(value) = flag.filter(|v| !v.is_empty()) {
        return Ok(value);
    }
    if let Some(value) = file.get(var).filter(|v| !v.is_empty()) {
        debug!(var, "using value from env file");
        return Ok(value.to_string());
    }
    ask()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use tempfile::TempDir;

    /// Answers prompts from a fixed list and records the labels asked.
    struct Canned {
        answers: RefCell<Vec<String>>,
        asked: RefCell<Vec<String>>,
    }

    impl Canned {
        fn new(answers: &[&str]) -> Self {
            Self {
                answers: RefCell::new(answers.iter().rev().map(|s| s.to_string()).collect()),
                asked: RefCell::new(Vec::new()),
            }
        }

        fn next(&self, label: &str) -> Result<String> {
            self.asked.borrow_mut().push(label.to_string());
            Ok(self.answers.borrow_mut().pop().expect("unexpected prompt"))
        }
    }

    impl Prompt for Canned {
        fn ask(&self, label: &str) -> Result<String> {
            self.next(label)
        }
        fn secret(&self, label: &str) -> Result<String> {
            self.next(label)
        }
        fn confirm(&self, _question: &str) -> Result<bool> {
            Ok(false)
        }
    }

    #[test]
    fn test_flags_take_priority() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(
            tmp.path().join(".env.staging"),
            "APP_NAME=fromfile\nAWS_DEFAULT_REGION=eu-west-1\n",
        )
        .unwrap();

        let overrides = Overrides {
            app_name: Some("fromflag".into()),
            access_key: Some("AKIA".into()),
            secret_key: Some("shh".into()),
            region: Some("us-east-1".into()),
            decrypt: true,
        };
        let prompt = Canned::new(&[]);
        let settings = Settings::resolve("staging", tmp.path(), overrides, &prompt).unwrap();

        assert_eq!(settings.app_name, "fromflag");
        assert_eq!(settings.region, "us-east-1");
        assert_eq!(settings.credentials.access_key, "AKIA");
        assert!(settings.decrypt);
        assert!(prompt.asked.borrow().is_empty());
    }

    #[test]
    fn test_env_file_before_prompt() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(
            tmp.path().join(".env.staging"),
            "APP_NAME=demo\nAWS_ACCESS_KEY_ID=AKIA\nAWS_SECRET_ACCESS_KEY=shh\nAWS_DEFAULT_REGION=eu-west-1\n",
        )
        .unwrap();

        let prompt = Canned::new(&[]);
        let settings =
            Settings::resolve("staging", tmp.path(), Overrides::default(), &prompt).unwrap();

        assert_eq!(settings.app_name, "demo");
        assert_eq!(settings.region, "eu-west-1");
        assert_eq!(settings.credentials.secret_key, "shh");
        assert_eq!(settings.remote_path(), "/demo/staging");
        assert_eq!(settings.qualify("FOO"), "/demo/staging/FOO");
        assert_eq!(settings.env_path(), tmp.path().join(".env.staging"));
    }

    #[test]
    fn test_prompts_for_missing_values() {
        let tmp = TempDir::new().unwrap();
        let prompt = Canned::new(&["demo", "AKIA", "shh", "ap-south-1"]);

        let settings =
            Settings::resolve("production", tmp.path(), Overrides::default(), &prompt).unwrap();

        assert_eq!(settings.app_name, "demo");
        assert_eq!(settings.credentials.access_key, "AKIA");
        assert_eq!(settings.credentials.secret_key, "shh");
        assert_eq!(settings.region, "ap-south-1");
        assert_eq!(
            *prompt.asked.borrow(),
            vec![
                "App name",
                "AWS_ACCESS_KEY_ID",
                "AWS_SECRET_ACCESS_KEY",
                "AWS_DEFAULT_REGION"
            ]
        );
    }

    #[test]
    fn test_rejects_slash_in_app_name() {
        let tmp = TempDir::new().unwrap();
        let overrides = Overrides {
            app_name: Some("a/b".into()),
            ..Overrides::default()
        };
        let result = Settings::resolve("staging", tmp.path(), overrides, &Canned::new(&[]));
        assert!(result.is_err());
    }

    #[test]
    fn test_rejects_bad_stage_before_reading_anything() {
        let tmp = TempDir::new().unwrap();
        let result = Settings::resolve("../etc", tmp.path(), Overrides::default(), &Canned::new(&[]));
        assert!(result.is_err());
    }

    #[test]
    fn test_debug_redacts_secret() {
        let creds = Credentials {
            access_key: "AKIA".into(),
            secret_key: "topsecret".into(),
        };
        let printed = format!("{:?}", creds);
        assert!(printed.contains("AKIA"));
        assert!(!printed.contains("topsecret"));
    }
}
