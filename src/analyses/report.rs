//! Normalized response payload for a completed analysis.

use serde::Serialize;
use serde_json::Value;

use crate::analyses::worker::{Recommendation, StackTaskResult};
use crate::analyses::RequestId;

/// Schema version marker carried by every successful report.
pub const REPORT_VERSION: &str = "v2";

/// Merged view over the primary task result and the recommendation
/// fragment, served as the GET response body.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisReport {
    /// Always [`REPORT_VERSION`].
    pub version: &'static str,
    pub started_at: Option<String>,
    pub ended_at: Option<String>,
    pub external_request_id: String,
    pub registration_status: String,
    pub manifest_file_path: String,
    pub manifest_name: String,
    pub ecosystem: String,
    pub unknown_dependencies: Vec<Value>,
    pub license_analysis: Value,
    pub recommendation: Recommendation,
    pub registration_link: String,
    pub analyzed_dependencies: Vec<Value>,
}

impl AnalysisReport {
    /// Flatten the primary task result and attach the recommendation,
    /// defaulted by the caller when the recommender has not produced one.
    pub fn assemble(
        request_id: &RequestId,
        task: StackTaskResult,
        recommendation: Recommendation,
    ) -> Self {
        Self {
            version: REPORT_VERSION,
            started_at: task.audit.started_at,
            ended_at: task.audit.ended_at,
            external_request_id: request_id.to_string(),
            registration_status: task.registration_status,
            manifest_file_path: task.manifest_file_path,
            manifest_name: task.manifest_name,
            ecosystem: task.ecosystem,
            unknown_dependencies: task.unknown_dependencies,
            license_analysis: task.license_analysis,
            recommendation,
            registration_link: task.registration_link,
            analyzed_dependencies: task.analyzed_dependencies,
        }
    }
}
