//! Wire shapes of the backbone worker results.
//!
//! The pipeline runs two independent workers per request: the stack
//! aggregator (primary) and the recommender (secondary). Both persist an
//! envelope whose `task_result` carries the actual payload. Fields the
//! workers may omit default rather than fail the whole parse; an absent
//! `task_result` is significant and is handled by the resolver.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Primary fragment: envelope written by the stack aggregator worker.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct StackResult {
    #[serde(default)]
    pub task_result: Option<StackTaskResult>,
}

/// The aggregated analysis payload.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct StackTaskResult {
    /// Worker bookkeeping (timestamps, worker version).
    #[serde(rename = "_audit", default)]
    pub audit: Audit,
    #[serde(default)]
    pub registration_status: String,
    #[serde(default)]
    pub manifest_file_path: String,
    #[serde(default)]
    pub manifest_name: String,
    #[serde(default)]
    pub ecosystem: String,
    #[serde(default)]
    pub unknown_dependencies: Vec<Value>,
    #[serde(default)]
    pub license_analysis: Value,
    #[serde(default)]
    pub registration_link: String,
    #[serde(default)]
    pub analyzed_dependencies: Vec<Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Audit {
    #[serde(default)]
    pub started_at: Option<String>,
    #[serde(default)]
    pub ended_at: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
}

/// Secondary fragment: envelope written by the recommender worker.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RecommendationResult {
    #[serde(default)]
    pub task_result: Option<RecommendationTaskResult>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RecommendationTaskResult {
    /// The recommender emits a list; only the first entry is served.
    #[serde(default)]
    pub recommendations: Vec<Recommendation>,
}

/// Enrichment block merged into a successful report.
///
/// Defaults to empty collections when the recommender has not finished,
/// so a report is well-formed without it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    #[serde(default)]
    pub companion: Vec<Value>,
    #[serde(default)]
    pub manifest_file_path: String,
    #[serde(default)]
    pub usage_outliers: Vec<Value>,
}

impl RecommendationResult {
    /// First recommendation of the envelope, or the neutral default when
    /// the worker wrote no task result or an empty list.
    pub fn into_recommendation(self) -> Recommendation {
        self.task_result
            .unwrap_or_default()
            .recommendations
            .into_iter()
            .next()
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_stack_result_parses_full_envelope() {
        let result: StackResult = serde_json::from_value(json!({
            "task_result": {
                "_audit": { "started_at": "t0", "ended_at": "t1", "version": "v2" },
                "ecosystem": "npm",
                "registration_status": "freetier",
                "analyzed_dependencies": [{ "name": "lodash" }]
            }
        }))
        .unwrap();
        let task = result.task_result.unwrap();
        assert_eq!(task.audit.started_at.as_deref(), Some("t0"));
        assert_eq!(task.ecosystem, "npm");
        assert_eq!(task.analyzed_dependencies.len(), 1);
        assert_eq!(task.manifest_name, "");
    }

    #[test]
    fn test_recommendation_defaults_when_task_result_missing() {
        let result: RecommendationResult = serde_json::from_value(json!({})).unwrap();
        assert_eq!(result.into_recommendation(), Recommendation::default());
    }

    #[test]
    fn test_recommendation_takes_first_entry() {
        let result: RecommendationResult = serde_json::from_value(json!({
            "task_result": {
                "recommendations": [
                    { "manifest_file_path": "/tmp/a", "companion": [{ "name": "axios" }] },
                    { "manifest_file_path": "/tmp/b" }
                ]
            }
        }))
        .unwrap();
        let recommendation = result.into_recommendation();
        assert_eq!(recommendation.manifest_file_path, "/tmp/a");
        assert_eq!(recommendation.companion.len(), 1);
    }
}
