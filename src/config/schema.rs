//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the
//! service. All types derive Serde traits for deserialization from
//! config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the stack analyses API.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct AppConfig {
    /// Listener configuration (bind address, connection limits).
    pub listener: ListenerConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Backbone pipeline endpoints.
    pub backbone: BackboneConfig,

    /// API authentication settings.
    pub auth: AuthConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:5000").
    pub bind_address: String,

    /// Maximum request body size for manifest uploads, in bytes.
    pub max_upload_bytes: usize,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:5000".to_string(),
            max_upload_bytes: 2 * 1024 * 1024,
        }
    }
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Per-request handler timeout in seconds.
    pub request_secs: u64,

    /// How long a submitted analysis may stay pending without a primary
    /// result before polls report a timeout.
    pub pending_deadline_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            request_secs: 30,
            pending_deadline_secs: 600,
        }
    }
}

/// Backbone pipeline configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct BackboneConfig {
    /// Base URL of the backbone API (e.g., "http://backbone:5600").
    pub base_url: String,

    /// Timeout for each worker submission, in seconds.
    pub request_timeout_secs: u64,
}

impl Default for BackboneConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5600".to_string(),
            request_timeout_secs: 10,
        }
    }
}

/// API authentication configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AuthConfig {
    /// When false, API routes accept unauthenticated calls (local
    /// development). Probes are always unauthenticated.
    pub enabled: bool,

    /// Bearer token expected in the Authorization header.
    pub token: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            token: String::new(),
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Enable the Prometheus metrics exporter.
    pub metrics_enabled: bool,

    /// Address the metrics endpoint binds to.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.listener.bind_address, "0.0.0.0:5000");
        assert_eq!(config.timeouts.pending_deadline_secs, 600);
        assert_eq!(config.backbone.request_timeout_secs, 10);
        assert!(!config.auth.enabled);
        assert!(!config.observability.metrics_enabled);
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config: AppConfig = toml::from_str(
            r#"
            [timeouts]
            pending_deadline_secs = 120

            [backbone]
            base_url = "http://backbone.internal:5600"
            "#,
        )
        .unwrap();
        assert_eq!(config.timeouts.pending_deadline_secs, 120);
        assert_eq!(config.timeouts.request_secs, 30);
        assert_eq!(config.backbone.base_url, "http://backbone.internal:5600");
        assert_eq!(config.listener.bind_address, "0.0.0.0:5000");
    }
}
