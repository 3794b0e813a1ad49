//! Persistence seam between the API and the backbone pipeline.
//!
//! # Data Flow
//! ```text
//! POST handler
//!     → save_request (id, manifest, dependency snapshot)
//!
//! Backbone workers (external)
//!     → put_worker_result per worker name
//!
//! GET handler
//!     → request_age + worker_result per fragment
//!     → resolver
//! ```
//!
//! # Design Decisions
//! - Worker results are stored as raw JSON; classification into
//!   Absent/Malformed/Present happens at read time in the domain layer
//! - A request row is written before workers finish, so "known id with
//!   no results" and "unknown id" stay distinguishable

pub mod memory;

pub use memory::MemoryStore;

use std::time::Duration;

use serde_json::Value;
use thiserror::Error;

use crate::analyses::RequestId;
use crate::manifest::ManifestInfo;

/// Worker names under which the pipeline deposits results.
pub const STACK_AGGREGATOR_WORKER: &str = "stack_aggregator_v2";
pub const RECOMMENDER_WORKER: &str = "recommendation_v2";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("error while saving request {0}")]
    Save(RequestId),
}

/// Storage interface for stack analysis requests and worker results.
pub trait AnalysisStore: Send + Sync + 'static {
    /// Persist a submission. Re-submitting an existing id updates the
    /// dependency snapshot but keeps the original submit time.
    fn save_request(
        &self,
        id: &RequestId,
        manifest: ManifestInfo,
        dep_snapshot: Value,
    ) -> Result<(), StoreError>;

    /// Age of a known request, measured monotonically from submission.
    /// `None` for ids that were never submitted.
    fn request_age(&self, id: &RequestId) -> Option<Duration>;

    /// Raw result deposited by the named worker, if any.
    fn worker_result(&self, id: &RequestId, worker: &str) -> Option<Value>;

    /// Deposit a worker result, replacing any previous one.
    fn put_worker_result(&self, id: &RequestId, worker: &str, value: Value);
}
