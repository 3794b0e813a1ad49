//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Handlers and the backbone client produce:
//!     → tracing events (structured logs, request IDs attached by
//!       middleware)
//!     → metrics.rs (counters by outcome)
//!
//! Consumers:
//!     → Log aggregation (stdout)
//!     → Metrics endpoint (Prometheus scrape)
//! ```
//!
//! # Design Decisions
//! - Metrics are cheap (atomic increments), recorded at the boundary
//! - The resolver itself stays silent; logging is layered on by callers

pub mod metrics;
