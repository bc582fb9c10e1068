//! Core library components.
//!
//! Everything needed to sync env files with Parameter Store, independent of
//! the command-line front end.

pub mod chunk;
pub mod constants;
pub mod env;
pub mod key;
pub mod prompt;
pub mod remote;
pub mod retry;
pub mod settings;
pub mod store;
pub mod sync;
pub mod validation;
