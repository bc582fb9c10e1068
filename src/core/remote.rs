//! Remote store facade.
//!
//! Wraps a [`ParameterStore`] with the retry policy, follows pagination
//! cursors and splits deletes into batches the service accepts.

use std::collections::BTreeMap;

use tracing::debug;

use crate::core::constants::DELETE_BATCH_LIMIT;
use crate::core::key;
use crate::core::retry::RetryPolicy;
use crate::core::store::{Parameter, ParameterStore};
use crate::error::Result;

/// Retrying, paginating access to a parameter store.
#[derive(Debug)]
pub struct Remote<S> {
    store: S,
    retry: RetryPolicy,
}

impl<S: ParameterStore> Remote<S> {
    pub fn new(store: S, retry: RetryPolicy) -> Self {
        Self { store, retry }
    }

    /// Underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Lazily walk every page under `path`.
    pub fn pages<'a>(&'a self, path: &'a str, with_decryption: bool) -> Pages<'a, S> {
        Pages {
            remote: self,
            path,
            with_decryption,
            next_token: None,
            done: false,
        }
    }

    /// Fetch every parameter under `path`, keyed by unqualified name.
    ///
    /// # Errors
    ///
    /// Returns `RemoteError::Exhausted` if a page request keeps failing.
    pub fn fetch_all(&self, path: &str, with_decryption: bool) -> Result<BTreeMap<String, String>> {
        let mut vars = BTreeMap::new();
        for page in self.pages(path, with_decryption) {
            for parameter in page? {
                vars.insert(key::unqualify(&parameter.name).to_string(), parameter.value);
            }
        }
        debug!(path, count = vars.len(), "fetched remote parameters");
        Ok(vars)
    }

    /// Upsert a `String` parameter, overwriting any existing value.
    ///
    /// # Errors
    ///
    /// Returns `RemoteError::Exhausted` if the request keeps failing.
    pub fn put(&self, name: &str, value: &str) -> Result<()> {
        self.retry
            .run("PutParameter", || self.store.put_parameter(name, value, true))?;
        Ok(())
    }

    /// Delete parameters, batching to the service's per-call limit.
    ///
    /// # Errors
    ///
    /// Returns `RemoteError::Exhausted` if a batch keeps failing. Earlier
    /// batches stay deleted.
    pub fn delete(&self, names: &[String]) -> Result<()> {
        for batch in names.chunks(DELETE_BATCH_LIMIT) {
            debug!(count = batch.len(), "deleting parameter batch");
            self.retry
                .run("DeleteParameters", || self.store.delete_parameters(batch))?;
        }
        Ok(())
    }
}

/// Iterator over the pages of a by-path listing.
///
/// Stops after the first page without a continuation cursor, or after the
/// first error.
pub struct Pages<'a, S> {
    remote: &'a Remote<S>,
    path: &'a str,
    with_decryption: bool,
    next_token: Option<String>,
    done: bool,
}

impl<S: ParameterStore> Iterator for Pages<'_, S> {
    type Item = Result<Vec<Parameter>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let token = self.next_token.take();
        let result = self.remote.retry.run("GetParametersByPath", || {
            self.remote.store.get_parameters_by_path(
                self.path,
                token.as_deref(),
                self.with_decryption,
            )
        });

        match result {
            Ok(page) => {
                self.next_token = page.next_token;
                self.done = self.next_token.is_none();
                Some(Ok(page.parameters))
            }
            Err(err) => {
                self.done = true;
                Some(Err(err.into()))
            }
        }
    }
}
