//! Bounded retry for API calls
//!
//! Every external fetch is attempted up to a fixed number of times with no
//! delay in between. "Not found" is a successful answer and never retried.

use crate::api::ApiResult;
use crate::{CrawlerError, Result, UnitKind};
use std::future::Future;

/// Default number of attempts per fetch
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

/// Retries a fetch immediately until it succeeds or the attempts run out
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    max_attempts: u32,
}

impl RetryPolicy {
    /// Creates a policy making at most `max_attempts` attempts (at least one)
    pub fn new(max_attempts: u32) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
        }
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Runs `fetch` until it succeeds
    ///
    /// # Arguments
    ///
    /// * `unit` - Kind of unit being fetched, for log and error context
    /// * `id` - Identifier of the unit, for log and error context
    /// * `fetch` - Produces one attempt per call
    ///
    /// # Returns
    ///
    /// * `Ok(T)` - The first successful answer
    /// * `Err(CrawlerError::RetryExhausted)` - Every attempt failed; carries the last error
    pub async fn run<T, F, Fut>(&self, unit: UnitKind, id: &str, mut fetch: F) -> Result<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = ApiResult<T>>,
    {
        let mut attempt = 1;
        loop {
            match fetch().await {
                Ok(value) => return Ok(value),
                Err(e) => {
                    tracing::error!(
                        "{} '{}' try {}/{} failed: {}",
                        unit,
                        id,
                        attempt,
                        self.max_attempts,
                        e
                    );
                    if attempt >= self.max_attempts {
                        return Err(CrawlerError::RetryExhausted {
                            unit,
                            id: id.to_string(),
                            attempts: attempt,
                            source: e,
                        });
                    }
                    attempt += 1;
                }
            }
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_ATTEMPTS)
    }
}
