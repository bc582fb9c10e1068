//! Constants used throughout ssm-env.
//!
//! Centralizes file names, well-known variables and Parameter Store quotas.

use std::time::Duration;

/// Local env files are named `.env.<stage>`.
pub const ENV_FILE_PREFIX: &str = ".env.";

/// Suffix appended to an env file when backing it up before a pull.
pub const BACKUP_SUFFIX: &str = ".backup";

/// Maximum characters stored in a single parameter (standard tier, 4 KB).
pub const CHUNK_LIMIT: usize = 4096;

/// Maximum names accepted by a single `DeleteParameters` call.
pub const DELETE_BATCH_LIMIT: usize = 10;

/// Delays between retries of a failed remote call.
pub const RETRY_DELAYS: [Duration; 3] = [
    Duration::from_secs(3),
    Duration::from_secs(6),
    Duration::from_secs(9),
];

/// Env file variable holding the application name.
pub const APP_NAME_VAR: &str = "APP_NAME";

/// Env file variable holding the AWS access key id.
pub const ACCESS_KEY_VAR: &str = "AWS_ACCESS_KEY_ID";

/// Env file variable holding the AWS secret access key.
pub const SECRET_KEY_VAR: &str = "AWS_SECRET_ACCESS_KEY";

/// Env file variable holding the AWS region.
pub const REGION_VAR: &str = "AWS_DEFAULT_REGION";
