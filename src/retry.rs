//! Graduated-backoff retry policy
//!
//! Transient failures against external dependencies (the search index
//! today, storage backends behind the object store seam tomorrow) are
//! retried a bounded number of times with increasing delays: short,
//! then longer, then longer still.

use std::thread;
use std::time::Duration;

/// A bounded retry schedule.
///
/// The number of attempts is `delays.len() + 1`: one initial try plus
/// one retry after each delay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    delays: Vec<Duration>,
}

impl RetryPolicy {
    /// Build a policy from explicit delays.
    pub fn new(delays: Vec<Duration>) -> Self {
        Self { delays }
    }

    /// The default graduated schedule: 50ms, 200ms, 800ms.
    pub fn graduated() -> Self {
        Self::new(vec![
            Duration::from_millis(50),
            Duration::from_millis(200),
            Duration::from_millis(800),
        ])
    }

    /// A policy with no retries (single attempt).
    pub fn none() -> Self {
        Self::new(Vec::new())
    }

    /// Total attempts this policy will make.
    pub fn attempts(&self) -> usize {
        self.delays.len() + 1
    }

    /// Run `op` until it succeeds or the schedule is exhausted.
    ///
    /// `on_retry` is invoked with the 1-based attempt number and the
    /// error before each backoff sleep, so callers can log.
    pub fn run<T, E>(
        &self,
        mut op: impl FnMut() -> Result<T, E>,
        mut on_retry: impl FnMut(usize, &E),
    ) -> Result<T, E> {
        for (attempt, delay) in self.delays.iter().enumerate() {
            match op() {
                Ok(value) => return Ok(value),
                Err(e) => {
                    on_retry(attempt + 1, &e);
                    thread::sleep(*delay);
                }
            }
        }
        op()
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::graduated()
    }
}
