//! Backbone pipeline integration.
//!
//! # Data Flow
//! ```text
//! POST handler
//!     → client.rs (stack_aggregator + recommender submissions)
//!     → backbone workers run asynchronously
//!     → workers deposit results into storage, keyed by request id
//! ```
//!
//! # Design Decisions
//! - Both worker submissions carry the same body; the workers diverge
//!   server-side
//! - Submission failures surface to the caller as internal errors; the
//!   request is not persisted if the backbone never accepted it

pub mod client;

pub use client::{BackboneClient, BackboneError, BackboneRequest};
