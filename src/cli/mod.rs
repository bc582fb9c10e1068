//! Command-line interface.

pub mod completions;
pub mod list;
pub mod output;
pub mod progress;
pub mod prompt;
pub mod pull;
pub mod push;

use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};

use crate::core::remote::Remote;
use crate::core::retry::RetryPolicy;
use crate::core::settings::{Overrides, Settings};
use crate::core::store::Ssm;
use crate::error::Result;

/// ssm-env - keep .env.<stage> files in AWS SSM Parameter Store.
#[derive(Parser)]
#[command(
    name = "ssm-env",
    about = "Sync .env.<stage> files with AWS SSM Parameter Store",
    version
)]
pub struct Cli {
    /// Show debug output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Directory holding the .env.<stage> files
    #[arg(
        short = 'C',
        long,
        global = true,
        env = "SSM_ENV_DIR",
        default_value = "."
    )]
    pub dir: PathBuf,

    #[command(subcommand)]
    pub command: Command,
}

/// Top-level commands.
#[derive(Subcommand)]
pub enum Command {
    /// Display the environment variables for the given stage from the SSM parameter store
    #[command(name = "env:list")]
    List {
        #[command(flatten)]
        remote: RemoteArgs,
        /// Display only this key
        #[arg(long)]
        key: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Retrieve environment variables for the given stage from the SSM parameter store
    #[command(name = "env:pull")]
    Pull {
        #[command(flatten)]
        remote: RemoteArgs,
    },

    /// Set the environment variables for the given stage in the SSM parameter store
    #[command(name = "env:push")]
    Push {
        #[command(flatten)]
        remote: RemoteArgs,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

/// Arguments shared by every command that talks to Parameter Store.
#[derive(Args, Debug, Clone)]
pub struct RemoteArgs {
    /// The environment of the app
    pub stage: String,

    /// Application name [default: APP_NAME from .env.<stage>]
    #[arg(long = "appName", value_name = "NAME")]
    pub app_name: Option<String>,

    /// AWS secret access key [default: AWS_SECRET_ACCESS_KEY from .env.<stage>]
    #[arg(long = "secretKey", value_name = "KEY")]
    pub secret_key: Option<String>,

    /// AWS access key id [default: AWS_ACCESS_KEY_ID from .env.<stage>]
    #[arg(long = "accessKey", value_name = "KEY")]
    pub access_key: Option<String>,

    /// AWS region [default: AWS_DEFAULT_REGION from .env.<stage>]
    #[arg(long, value_name = "REGION")]
    pub region: Option<String>,

    /// Decrypt SecureString parameters when reading
    #[arg(long)]
    pub decrypt: bool,
}

impl RemoteArgs {
    fn overrides(&self) -> Overrides {
        Overrides {
            app_name: self.app_name.clone(),
            access_key: self.access_key.clone(),
            secret_key: self.secret_key.clone(),
            region: self.region.clone(),
            decrypt: self.decrypt,
        }
    }
}

/// Execute a command.
pub fn execute(command: Command, dir: &Path) -> Result<()> {
    use Command::*;

    match command {
        List { remote, key, json } => list::execute(dir, &remote, key.as_deref(), json),
        Pull { remote } => pull::execute(dir, &remote),
        Push { remote } => push::execute(dir, &remote),
        Completions { shell } => completions::execute(shell),
    }
}

/// Resolve settings and open a retrying Parameter Store connection.
fn connect(dir: &Path, args: &RemoteArgs) -> Result<(Settings, Remote<Ssm>)> {
    let settings = Settings::resolve(&args.stage, dir, args.overrides(), &prompt::Terminal)?;
    let store = Ssm::connect(&settings)?;
    Ok((settings, Remote::new(store, RetryPolicy::default())))
}
