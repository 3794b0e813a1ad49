//! Stack analyses domain logic.
//!
//! # Data Flow
//! ```text
//! Poll for a request id:
//!     storage fetches raw worker rows
//!     → fragment.rs (classify Absent / Malformed / Present)
//!     → resolver.rs (precedence over both fragments + request age)
//!     → report.rs (merge primary task result with recommendation)
//!
//! Timeout decision (timeout.rs) is consulted only when the primary
//! fragment is absent.
//! ```
//!
//! # Design Decisions
//! - The resolver is a pure function of its inputs; storage and HTTP
//!   concerns stay outside this module
//! - Expected outcomes (pending, timed out) travel the error channel as
//!   typed variants, not as panics or sentinel payloads

pub mod fragment;
pub mod report;
pub mod resolver;
pub mod timeout;
pub mod worker;

pub use fragment::Fragment;
pub use report::AnalysisReport;
pub use resolver::{ResolveError, ResponseResolver};
pub use timeout::TimeoutPolicy;

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Opaque identifier for one analysis job.
///
/// Used only for correlation and logging; never parsed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RequestId(String);

impl RequestId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Mint a fresh id for a new submission (UUID v4, hex form).
    pub fn generate() -> Self {
        Self(Uuid::new_v4().simple().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for RequestId {
    fn from(id: String) -> Self {
        Self(id)
    }
}
