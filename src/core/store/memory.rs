//! In-process parameter store.
//!
//! Mirrors the Parameter Store behaviours the sync engine relies on:
//! non-recursive by-path listing with pagination, the per-value size
//! limits and the per-call delete limit. Every request is recorded so callers can
//! assert on call order, and failures can be injected to exercise retries.

use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;

use tracing::trace;

use super::{Page, Parameter, ParameterStore};
use crate::core::constants::{CHUNK_LIMIT, DELETE_BATCH_LIMIT};
use crate::error::RemoteError;

const DEFAULT_PAGE_SIZE: usize = 10;

/// A request received by a [`Memory`] store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    GetByPath {
        path: String,
        next_token: Option<String>,
        with_decryption: bool,
    },
    Put {
        name: String,
    },
    Delete {
        names: Vec<String>,
    },
}

/// Parameter store held in memory.
#[derive(Debug)]
pub struct Memory {
    parameters: RefCell<BTreeMap<String, String>>,
    calls: RefCell<Vec<Call>>,
    page_size: usize,
    failures: Cell<usize>,
}

impl Default for Memory {
    fn default() -> Self {
        Self::new()
    }
}

impl Memory {
    pub fn new() -> Self {
        Self {
            parameters: RefCell::new(BTreeMap::new()),
            calls: RefCell::new(Vec::new()),
            page_size: DEFAULT_PAGE_SIZE,
            failures: Cell::new(0),
        }
    }

    /// Return at most `page_size` parameters per listing page.
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    /// Seed a parameter by its qualified name.
    pub fn insert(&self, name: impl Into<String>, value: impl Into<String>) {
        self.parameters.borrow_mut().insert(name.into(), value.into());
    }

    /// Make the next `count` requests fail.
    pub fn fail_next(&self, count: usize) {
        self.failures.set(count);
    }

    /// Every stored parameter keyed by qualified name.
    pub fn snapshot(&self) -> BTreeMap<String, String> {
        self.parameters.borrow().clone()
    }

    /// Requests received so far, in order.
    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    pub fn clear_calls(&self) {
        self.calls.borrow_mut().clear();
    }

    fn record(&self, operation: &'static str, call: Call) -> Result<(), RemoteError> {
        trace!(?call, "memory store request");
        self.calls.borrow_mut().push(call);

        let pending = self.failures.get();
        if pending > 0 {
            self.failures.set(pending - 1);
            return Err(RemoteError::request(operation, "injected failure"));
        }
        Ok(())
    }
}

impl ParameterStore for Memory {
    fn get_parameters_by_path(
        &self,
        path: &str,
        next_token: Option<&str>,
        with_decryption: bool,
    ) -> Result<Page, RemoteError> {
        const OPERATION: &str = "GetParametersByPath";
        self.record(
            OPERATION,
            Call::GetByPath {
                path: path.to_string(),
                next_token: next_token.map(str::to_string),
                with_decryption,
            },
        )?;

        let offset = match next_token {
            Some(token) => token
                .parse::<usize>()
                .map_err(|_| RemoteError::request(OPERATION, format!("invalid token '{token}'")))?,
            None => 0,
        };

        let prefix = format!("{}/", path.trim_end_matches('/'));
        let parameters = self.parameters.borrow();
        let matching: Vec<Parameter> = parameters
            .iter()
            .filter(|(name, _)| {
                name.strip_prefix(&prefix)
                    .is_some_and(|rest| !rest.is_empty() && !rest.contains('/'))
            })
            .map(|(name, value)| Parameter {
                name: name.clone(),
                value: value.clone(),
            })
            .collect();

        let end = (offset + self.page_size).min(matching.len());
        let page = matching.get(offset..end).unwrap_or_default().to_vec();
        let next_token = (end < matching.len()).then(|| end.to_string());

        Ok(Page {
            parameters: page,
            next_token,
        })
    }

    fn put_parameter(&self, name: &str, value: &str, overwrite: bool) -> Result<(), RemoteError> {
        const OPERATION: &str = "PutParameter";
        self.record(
            OPERATION,
            Call::Put {
                name: name.to_string(),
            },
        )?;

        if value.is_empty() {
            return Err(RemoteError::request(
                OPERATION,
                format!("value for '{name}' must not be empty"),
            ));
        }

        if value.chars().count() > CHUNK_LIMIT {
            return Err(RemoteError::request(
                OPERATION,
                format!("value for '{name}' exceeds {CHUNK_LIMIT} characters"),
            ));
        }

        let mut parameters = self.parameters.borrow_mut();
        if !overwrite && parameters.contains_key(name) {
            return Err(RemoteError::request(
                OPERATION,
                format!("parameter '{name}' already exists"),
            ));
        }
        parameters.insert(name.to_string(), value.to_string());
        Ok(())
    }

    fn delete_parameters(&self, names: &[String]) -> Result<(), RemoteError> {
        const OPERATION: &str = "DeleteParameters";
        self.record(
            OPERATION,
            Call::Delete {
                names: names.to_vec(),
            },
        )?;

        if names.is_empty() || names.len() > DELETE_BATCH_LIMIT {
            return Err(RemoteError::request(
                OPERATION,
                format!("expected 1 to {DELETE_BATCH_LIMIT} names, got {}", names.len()),
            ));
        }

        let mut parameters = self.parameters.borrow_mut();
        for name in names {
            parameters.remove(name);
        }
        Ok(())
    }
}
