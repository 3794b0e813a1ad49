//! Stack Analyses API service library.
//!
//! # Architecture Overview
//! ```text
//!                  ┌────────────────────────────────────────────────┐
//!                  │              STACK ANALYSES API                │
//!                  │                                                │
//!   POST manifest  │  ┌──────┐   ┌──────────┐   ┌───────────────┐  │
//!   ───────────────┼─▶│ http │──▶│ manifest │──▶│   backbone    │──┼──▶ worker
//!                  │  │      │   │ validate │   │   client      │  │    pipeline
//!                  │  └──────┘   └──────────┘   └───────────────┘  │
//!                  │      │                                        │
//!   GET /{id}      │      ▼                                        │
//!   ───────────────┼─▶┌─────────┐  ┌──────────┐  ┌─────────────┐  │
//!                  │  │ storage │─▶│ fragment │─▶│  resolver   │──┼──▶ 200/202/
//!                  │  │         │  │ classify │  │ + timeout   │  │    404/408/500
//!                  │  └─────────┘  └──────────┘  └─────────────┘  │
//!                  │                                                │
//!                  │  Cross-cutting: config, auth, observability    │
//!                  └────────────────────────────────────────────────┘
//! ```

pub mod analyses;
pub mod auth;
pub mod backbone;
pub mod config;
pub mod http;
pub mod manifest;
pub mod observability;
pub mod storage;

pub use config::schema::AppConfig;
pub use http::HttpServer;
