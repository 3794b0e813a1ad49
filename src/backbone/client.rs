//! HTTP client for the backbone worker pipeline.

use std::time::Duration;

use serde::Serialize;
use thiserror::Error;

use crate::analyses::RequestId;
use crate::config::schema::BackboneConfig;
use crate::manifest::{ManifestInfo, Package};

const AGGREGATOR_ENDPOINT: &str = "/api/v2/stack_aggregator";
const RECOMMENDER_ENDPOINT: &str = "/api/v2/recommender";

/// Workers persist their results themselves; licenses are checked in a
/// separate flow.
const QUERY_PARAMS: &[(&str, &str)] = &[("persist", "true"), ("check_license", "false")];

#[derive(Debug, Error)]
pub enum BackboneError {
    #[error("backbone request to {endpoint} failed: {source}")]
    Request {
        endpoint: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("backbone endpoint {endpoint} returned status {status}")]
    Status { endpoint: &'static str, status: u16 },
}

impl BackboneError {
    pub fn endpoint(&self) -> &'static str {
        match self {
            BackboneError::Request { endpoint, .. } | BackboneError::Status { endpoint, .. } => {
                endpoint
            }
        }
    }
}

/// Submission body shared by both worker endpoints.
#[derive(Debug, Clone, Serialize)]
pub struct BackboneRequest {
    pub registration_status: &'static str,
    pub external_request_id: String,
    pub ecosystem: String,
    pub packages: Vec<Package>,
    pub manifest_file: String,
    pub manifest_file_path: String,
    pub show_transitive: bool,
}

impl BackboneRequest {
    pub fn new(
        request_id: &RequestId,
        ecosystem: &str,
        packages: Vec<Package>,
        manifest: &ManifestInfo,
        show_transitive: bool,
    ) -> Self {
        Self {
            registration_status: "freetier",
            external_request_id: request_id.to_string(),
            ecosystem: ecosystem.to_string(),
            packages,
            manifest_file: manifest.filename.clone(),
            manifest_file_path: manifest.filepath.clone(),
            show_transitive,
        }
    }
}

/// Client for the backbone's v2 worker endpoints.
#[derive(Debug, Clone)]
pub struct BackboneClient {
    base_url: String,
    timeout: Duration,
    client: reqwest::Client,
}

impl BackboneClient {
    pub fn new(config: &BackboneConfig) -> Self {
        Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            timeout: Duration::from_secs(config.request_timeout_secs),
            client: reqwest::Client::new(),
        }
    }

    /// Submit the request to the stack aggregator worker.
    pub async fn post_aggregate_request(&self, body: &BackboneRequest) -> Result<(), BackboneError> {
        self.post(AGGREGATOR_ENDPOINT, body).await
    }

    /// Submit the request to the recommender worker.
    pub async fn post_recommendations_request(
        &self,
        body: &BackboneRequest,
    ) -> Result<(), BackboneError> {
        self.post(RECOMMENDER_ENDPOINT, body).await
    }

    async fn post(&self, endpoint: &'static str, body: &BackboneRequest) -> Result<(), BackboneError> {
        tracing::debug!(
            endpoint,
            request_id = %body.external_request_id,
            "Submitting backbone request"
        );

        let response = self
            .client
            .post(format!("{}{}", self.base_url, endpoint))
            .query(QUERY_PARAMS)
            .json(body)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|source| BackboneError::Request { endpoint, source })?;

        let status = response.status();
        if !status.is_success() {
            return Err(BackboneError::Status {
                endpoint,
                status: status.as_u16(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_body_serializes_expected_fields() {
        let manifest = ManifestInfo {
            filename: "npmlist.json".into(),
            filepath: "/tmp/bin".into(),
            content: "{}".into(),
        };
        let body = BackboneRequest::new(
            &RequestId::new("req-1"),
            "npm",
            Vec::new(),
            &manifest,
            true,
        );
        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(value["registration_status"], "freetier");
        assert_eq!(value["external_request_id"], "req-1");
        assert_eq!(value["manifest_file"], "npmlist.json");
        assert_eq!(value["show_transitive"], true);
    }

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let client = BackboneClient::new(&BackboneConfig {
            base_url: "http://backbone:5600/".into(),
            request_timeout_secs: 10,
        });
        assert_eq!(client.base_url, "http://backbone:5600");
    }
}
