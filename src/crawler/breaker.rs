//! Consecutive failure breaker
//!
//! Counts failed units in a row. Any success resets the count; reaching the
//! limit turns into the fatal `ConsecutiveFailureLimit` error so the crawler
//! stops instead of hammering a failing dependency.

use crate::{CrawlerError, Result};

/// Default number of failed units in a row that stops a run
pub const DEFAULT_FAILURE_LIMIT: u32 = 5;

#[derive(Debug, Clone)]
pub struct FailureBreaker {
    limit: u32,
    consecutive: u32,
}

impl FailureBreaker {
    pub fn new(limit: u32) -> Self {
        Self {
            limit: limit.max(1),
            consecutive: 0,
        }
    }

    /// Number of failures since the last success
    pub fn consecutive(&self) -> u32 {
        self.consecutive
    }

    pub fn record_success(&mut self) {
        self.consecutive = 0;
    }

    /// Records a failed unit, erroring once the limit is reached
    pub fn record_failure(&mut self) -> Result<()> {
        self.consecutive += 1;
        if self.consecutive >= self.limit {
            return Err(CrawlerError::ConsecutiveFailureLimit {
                failures: self.consecutive,
            });
        }
        Ok(())
    }
}

impl Default for FailureBreaker {
    fn default() -> Self {
        Self::new(DEFAULT_FAILURE_LIMIT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trips_on_fifth_failure_in_a_row() {
        let mut breaker = FailureBreaker::default();
        for _ in 0..4 {
            assert!(breaker.record_failure().is_ok());
        }
        assert!(matches!(
            breaker.record_failure(),
            Err(CrawlerError::ConsecutiveFailureLimit { failures: 5 })
        ));
    }

    #[test]
    fn test_success_resets_the_count() {
        let mut breaker = FailureBreaker::default();
        for _ in 0..4 {
            breaker.record_failure().unwrap();
        }
        breaker.record_success();
        assert_eq!(breaker.consecutive(), 0);

        for _ in 0..4 {
            assert!(breaker.record_failure().is_ok());
        }
        assert!(breaker.record_failure().is_err());
    }
}
