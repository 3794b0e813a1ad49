//! Response resolution for polled stack analyses.
//!
//! # Responsibilities
//! - Classify every poll into exactly one outcome
//! - Assemble the normalized report when the primary result is complete
//!
//! # Decision precedence (first match wins)
//! 1. Primary absent, deadline not reached → in progress
//! 2. Primary absent, deadline reached → timed out
//! 3. Primary present without its task result → malformed result
//! 4. Either fragment stored as a non-record value → malformed result
//! 5. Primary complete → report; recommendation merged in or defaulted
//!
//! # Design Decisions
//! - Pure function of its inputs; fetching the fragments and measuring
//!   the request's age belong to the caller
//! - Expected outcomes travel as typed `ResolveError` variants so the
//!   HTTP boundary owns the status mapping

use std::time::Duration;

use thiserror::Error;

use crate::analyses::fragment::Fragment;
use crate::analyses::report::AnalysisReport;
use crate::analyses::timeout::TimeoutPolicy;
use crate::analyses::worker::{Recommendation, RecommendationResult, StackResult};
use crate::analyses::RequestId;

/// Non-success outcomes of a poll.
///
/// `InProgress` and `Timeout` are expected states of an asynchronous
/// pipeline; `MalformedResult` signals an upstream data-integrity defect
/// and is the only variant callers should not retry on.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ResolveError {
    #[error("analysis for request ID '{0}' is in progress")]
    InProgress(RequestId),

    #[error("stack analysis request {id} has timed out after {}s, please retry with a new analysis", .elapsed.as_secs())]
    Timeout { id: RequestId, elapsed: Duration },

    #[error("worker result for request ID '{0}' is malformed")]
    MalformedResult(RequestId),
}

impl ResolveError {
    /// Stable label for metrics and logs.
    pub fn outcome(&self) -> &'static str {
        match self {
            ResolveError::InProgress(_) => "in_progress",
            ResolveError::Timeout { .. } => "timeout",
            ResolveError::MalformedResult(_) => "malformed",
        }
    }
}

/// Classifies one poll from the stored fragments and the request's age.
#[derive(Debug, Clone, Copy, Default)]
pub struct ResponseResolver {
    timeout: TimeoutPolicy,
}

impl ResponseResolver {
    pub fn new(timeout: TimeoutPolicy) -> Self {
        Self { timeout }
    }

    /// Resolve a poll into a report or a classified failure.
    ///
    /// Total over all input combinations; the timeout policy is consulted
    /// only when the primary fragment is absent.
    pub fn resolve(
        &self,
        request_id: &RequestId,
        elapsed: Duration,
        primary: Fragment<StackResult>,
        secondary: Fragment<RecommendationResult>,
    ) -> Result<AnalysisReport, ResolveError> {
        let stack = match primary {
            Fragment::Absent if !self.timeout.is_timed_out(elapsed) => {
                return Err(ResolveError::InProgress(request_id.clone()));
            }
            Fragment::Absent => {
                return Err(ResolveError::Timeout {
                    id: request_id.clone(),
                    elapsed,
                });
            }
            Fragment::Malformed => {
                return Err(ResolveError::MalformedResult(request_id.clone()));
            }
            Fragment::Present(stack) => stack,
        };

        // A stored envelope without its payload is an upstream defect,
        // not a still-running analysis.
        let task = stack
            .task_result
            .ok_or_else(|| ResolveError::MalformedResult(request_id.clone()))?;

        let recommendation = match secondary {
            Fragment::Malformed => {
                return Err(ResolveError::MalformedResult(request_id.clone()));
            }
            Fragment::Present(result) => result.into_recommendation(),
            Fragment::Absent => Recommendation::default(),
        };

        Ok(AnalysisReport::assemble(request_id, task, recommendation))
    }
}
