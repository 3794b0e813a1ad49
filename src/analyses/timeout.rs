//! Pending-request timeout policy.
//!
//! # Responsibilities
//! - Decide whether a request with no deposited result has waited too long
//! - Keep the deadline injectable so deployments (and tests) can tune it
//!
//! # Design Decisions
//! - Pure predicate over an elapsed duration; the caller owns the clock
//! - Elapsed time is measured monotonically by the storage layer

use std::time::Duration;

/// Decides when a request without a primary result counts as timed out.
#[derive(Debug, Clone, Copy)]
pub struct TimeoutPolicy {
    deadline: Duration,
}

impl TimeoutPolicy {
    /// Default pending deadline, mirrored by the configuration default.
    pub const DEFAULT_DEADLINE: Duration = Duration::from_secs(600);

    pub fn new(deadline: Duration) -> Self {
        Self { deadline }
    }

    /// True iff the request has been pending for at least the deadline.
    pub fn is_timed_out(&self, elapsed: Duration) -> bool {
        elapsed >= self.deadline
    }

    pub fn deadline(&self) -> Duration {
        self.deadline
    }
}

impl Default for TimeoutPolicy {
    fn default() -> Self {
        Self::new(Self::DEFAULT_DEADLINE)
    }
}
