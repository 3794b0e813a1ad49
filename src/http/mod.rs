//! HTTP boundary of the service.
//!
//! # Data Flow
//! ```text
//! Request
//!     → server.rs (Axum setup, middleware, routes)
//!     → auth middleware (API routes only)
//!     → handlers.rs (validate, fetch fragments, run resolver)
//!     → error.rs (outcome → status code + JSON error body)
//! ```

pub mod error;
pub mod handlers;
pub mod server;

pub use error::ApiError;
pub use server::{AppState, HttpServer};
