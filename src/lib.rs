//! ssm-env - keep `.env.<stage>` files in AWS SSM Parameter Store.
//!
//! # Architecture
//!
//! ```text
//! src/
//! ├── cli/              # Command-line interface
//! │   ├── list          # env:list
//! │   ├── pull          # env:pull
//! │   ├── push          # env:push
//! │   ├── completions   # Shell completions
//! │   ├── output        # Terminal output helpers
//! │   ├── progress      # Progress bar for push
//! │   └── prompt        # dialoguer-backed prompts
//! └── core/             # Core library components
//!     ├── chunk         # Split/reunify oversized values
//!     ├── key           # /<app>/<stage>/<name> qualification
//!     ├── env           # .env.<stage> parsing, rendering, backups
//!     ├── settings      # Per-command settings resolution
//!     ├── store/        # Parameter store backends
//!     │   ├── ssm       # AWS SDK implementation
//!     │   └── memory    # In-process implementation
//!     ├── retry         # Bounded retry schedule
//!     ├── remote        # Pagination, retries, batched deletes
//!     └── sync          # list / pull / push
//! ```
//!
//! Values longer than a parameter allows are stored as `<KEY>.part0`,
//! `<KEY>.part1`, ... and reassembled on read.

pub mod cli;
pub mod core;
pub mod error;
