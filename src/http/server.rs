//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum router with all handlers
//! - Wire up middleware (tracing, timeout, body limits, request ID)
//! - Bind the server to a listener and serve until shutdown

use std::sync::Arc;
use std::time::Duration;

use axum::http::HeaderName;
use axum::routing::{get, post};
use axum::{middleware, Router};
use tokio::net::TcpListener;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::analyses::{ResponseResolver, TimeoutPolicy};
use crate::auth::require_bearer_token;
use crate::backbone::BackboneClient;
use crate::config::schema::{AppConfig, AuthConfig};
use crate::http::handlers;
use crate::storage::{AnalysisStore, MemoryStore};

const X_REQUEST_ID: HeaderName = HeaderName::from_static("x-request-id");

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn AnalysisStore>,
    pub resolver: ResponseResolver,
    pub backbone: Arc<BackboneClient>,
    pub auth: AuthConfig,
}

/// HTTP server for the stack analyses API.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    /// Create a server with a fresh in-memory store.
    pub fn new(config: AppConfig) -> Self {
        Self::with_store(config, Arc::new(MemoryStore::new()))
    }

    /// Create a server over an existing store (shared with the pipeline
    /// or with tests).
    pub fn with_store(config: AppConfig, store: Arc<dyn AnalysisStore>) -> Self {
        let resolver = ResponseResolver::new(TimeoutPolicy::new(Duration::from_secs(
            config.timeouts.pending_deadline_secs,
        )));
        let backbone = Arc::new(BackboneClient::new(&config.backbone));

        let state = AppState {
            store,
            resolver,
            backbone,
            auth: config.auth.clone(),
        };

        let router = Self::build_router(&config, state);
        Self { router }
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(config: &AppConfig, state: AppState) -> Router {
        Router::new()
            .route("/api/v2/stack-analyses", post(handlers::post_stack_analysis))
            .route(
                "/api/v2/stack-analyses/{request_id}",
                get(handlers::get_stack_analysis),
            )
            // Auth wraps only the routes registered above; probes and
            // version stay open for orchestration.
            .route_layer(middleware::from_fn_with_state(
                state.clone(),
                require_bearer_token,
            ))
            .route("/api/v2/readiness", get(handlers::readiness))
            .route("/api/v2/liveness", get(handlers::liveness))
            .route("/api/v2/system/version", get(handlers::system_version))
            .with_state(state)
            .layer(TimeoutLayer::new(Duration::from_secs(
                config.timeouts.request_secs,
            )))
            .layer(RequestBodyLimitLayer::new(config.listener.max_upload_bytes))
            .layer(SetRequestIdLayer::new(X_REQUEST_ID, MakeRequestUuid))
            .layer(PropagateRequestIdLayer::new(X_REQUEST_ID))
            .layer(TraceLayer::new_for_http())
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(self, listener: TcpListener) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        let app = self.router.into_make_service();
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// The assembled router, for in-process testing.
    pub fn router(&self) -> Router {
        self.router.clone()
    }
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "Failed to install Ctrl+C handler");
        return;
    }
    tracing::info!("Shutdown signal received");
}
