//! Bounded retry for remote calls.

use std::cell::Cell;
use std::slice;
use std::time::Duration;

use backoff::backoff::Backoff;
use tracing::warn;

use crate::core::constants::RETRY_DELAYS;
use crate::error::RemoteError;

/// Fixed retry schedule: one attempt, then one retry per delay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    delays: Vec<Duration>,
}

impl Default for RetryPolicy {
    /// Three retries after 3s, 6s and 9s.
    fn default() -> Self {
        Self::new(RETRY_DELAYS.to_vec())
    }
}

impl RetryPolicy {
    pub fn new(delays: Vec<Duration>) -> Self {
        Self { delays }
    }

    /// `retries` retries with no delay between them.
    pub fn immediate(retries: usize) -> Self {
        Self::new(vec![Duration::ZERO; retries])
    }

    /// Total attempts this policy allows.
    pub fn max_attempts(&self) -> usize {
        self.delays.len() + 1
    }

    /// Run `call` until it succeeds or the schedule runs out.
    ///
    /// # Errors
    ///
    /// Returns `RemoteError::Exhausted` wrapping the last failure.
    pub fn run<T, F>(&self, operation: &'static str, mut call: F) -> Result<T, RemoteError>
    where
        F: FnMut() -> Result<T, RemoteError>,
    {
        let attempts = Cell::new(0);

        let result = backoff::retry_notify(
            Schedule {
                delays: self.delays.iter(),
            },
            || {
                attempts.set(attempts.get() + 1);
                call().map_err(backoff::Error::transient)
            },
            |err: RemoteError, retry_in: Duration| {
                warn!(
                    operation,
                    attempt = attempts.get(),
                    ?retry_in,
                    error = %err,
                    "remote call failed, retrying"
                );
            },
        );

        result.map_err(|err| {
            let last = match err {
                backoff::Error::Permanent(err) => err,
                backoff::Error::Transient { err, .. } => err,
            };
            RemoteError::Exhausted {
                operation,
                attempts: attempts.get(),
                source: Box::new(last),
            }
        })
    }
}

/// Walks a fixed list of delays, then stops.
struct Schedule<'a> {
    delays: slice::Iter<'a, Duration>,
}

impl Backoff for Schedule<'_> {
    fn next_backoff(&mut self) -> Option<Duration> {
        self.delays.next().copied()
    }
}
