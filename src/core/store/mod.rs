//! Parameter store backends.
//!
//! The sync engine talks to Parameter Store through the [`ParameterStore`]
//! trait. [`Ssm`] calls AWS. `Memory` keeps parameters in process for the
//! test suite and is only built for tests or with the `test-support`
//! feature.
//!
//! ## Adding a New Backend
//!
//! 1. Implement the `ParameterStore` trait
//! 2. Add the implementation in a new file
//! 3. Re-export from this module

use crate::error::RemoteError;

#[cfg(any(test, feature = "test-support"))]
mod memory;
mod ssm;

#[cfg(any(test, feature = "test-support"))]
pub use memory::{Call, Memory};
pub use ssm::Ssm;

/// A single stored parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parameter {
    /// Fully qualified name.
    pub name: String,
    pub value: String,
}

/// One page of a by-path listing.
#[derive(Debug, Clone, Default)]
pub struct Page {
    pub parameters: Vec<Parameter>,
    /// Cursor for the next page, `None` when this is the last one.
    pub next_token: Option<String>,
}

/// Raw parameter store operations.
///
/// Each method is a single request; retries and pagination are layered on
/// top by [`crate::core::remote::Remote`].
pub trait ParameterStore {
    /// Fetch one page of parameters directly under `path`.
    ///
    /// # Errors
    ///
    /// Returns `RemoteError::Request` if the request fails.
    fn get_parameters_by_path(
        &self,
        path: &str,
        next_token: Option<&str>,
        with_decryption: bool,
    ) -> Result<Page, RemoteError>;

    /// Create or update a `String` parameter.
    ///
    /// # Errors
    ///
    /// Returns `RemoteError::Request` if the request fails.
    fn put_parameter(&self, name: &str, value: &str, overwrite: bool) -> Result<(), RemoteError>;

    /// Delete a batch of parameters. Names that do not exist are ignored.
    ///
    /// # Errors
    ///
    /// Returns `RemoteError::Request` if the request fails.
    fn delete_parameters(&self, names: &[String]) -> Result<(), RemoteError>;
}

impl<T: ParameterStore + ?Sized> ParameterStore for &T {
    fn get_parameters_by_path(
        &self,
        path: &str,
        next_token: Option<&str>,
        with_decryption: bool,
    ) -> Result<Page, RemoteError> {
        (**self).get_parameters_by_path(path, next_token, with_decryption)
    }

    fn put_parameter(&self, name: &str, value: &str, overwrite: bool) -> Result<(), RemoteError> {
        (**self).put_parameter(name, value, overwrite)
    }

    fn delete_parameters(&self, names: &[String]) -> Result<(), RemoteError> {
        (**self).delete_parameters(names)
    }
}
