//! Request handlers for the stack analyses API.

use std::time::{SystemTime, UNIX_EPOCH};

use axum::extract::{Multipart, Path, State};
use axum::Json;
use serde::Serialize;
use serde_json::{json, Value};

use crate::analyses::fragment::Fragment;
use crate::analyses::report::AnalysisReport;
use crate::analyses::resolver::ResolveError;
use crate::analyses::RequestId;
use crate::backbone::BackboneRequest;
use crate::http::error::ApiError;
use crate::http::server::AppState;
use crate::manifest::{
    extract_packages, is_accepted_ecosystem, map_ecosystem, resolved_manifest_exists, ManifestInfo,
};
use crate::observability::metrics;
use crate::storage::{RECOMMENDER_WORKER, STACK_AGGREGATOR_WORKER};

/// Body returned for an accepted submission.
#[derive(Debug, Serialize)]
pub struct SubmissionResponse {
    pub status: &'static str,
    pub submitted_at: u64,
    pub id: RequestId,
}

/// `GET /api/v2/stack-analyses/{request_id}`
///
/// Fetches the request's age and both worker fragments, then lets the
/// resolver classify the poll. Unknown ids never reach the resolver.
pub async fn get_stack_analysis(
    State(state): State<AppState>,
    Path(request_id): Path<String>,
) -> Result<Json<AnalysisReport>, ApiError> {
    let request_id = RequestId::new(request_id);
    tracing::debug!(request_id = %request_id, "GET stack analysis");

    let elapsed = state
        .store
        .request_age(&request_id)
        .ok_or_else(|| ApiError::UnknownRequest(request_id.clone()))?;

    let primary = Fragment::from_stored(
        state
            .store
            .worker_result(&request_id, STACK_AGGREGATOR_WORKER),
    );
    let secondary =
        Fragment::from_stored(state.store.worker_result(&request_id, RECOMMENDER_WORKER));

    match state
        .resolver
        .resolve(&request_id, elapsed, primary, secondary)
    {
        Ok(report) => {
            metrics::record_resolution("success");
            Ok(Json(report))
        }
        Err(err) => {
            metrics::record_resolution(err.outcome());
            match &err {
                ResolveError::MalformedResult(_) => {
                    tracing::error!(request_id = %request_id, error = %err, "Worker result malformed")
                }
                _ => {
                    tracing::info!(request_id = %request_id, outcome = err.outcome(), "Analysis not ready")
                }
            }
            Err(ApiError::from(err))
        }
    }
}

/// `POST /api/v2/stack-analyses`
///
/// Multipart form: `manifest` file, `file_path`, `ecosystem`, optional
/// `show_transitive`. Submits both backbone workers and persists the
/// request row on acceptance.
pub async fn post_stack_analysis(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<SubmissionResponse>, ApiError> {
    let mut manifest_file: Option<(String, String)> = None;
    let mut file_path: Option<String> = None;
    let mut ecosystem: Option<String> = None;
    let mut show_transitive = true;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|err| ApiError::InvalidParams(err.to_string()))?
    {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("manifest") => {
                let filename = field.file_name().unwrap_or_default().to_string();
                let content = field
                    .text()
                    .await
                    .map_err(|err| ApiError::InvalidParams(err.to_string()))?;
                manifest_file = Some((filename, content));
            }
            Some("file_path") => {
                file_path = Some(
                    field
                        .text()
                        .await
                        .map_err(|err| ApiError::InvalidParams(err.to_string()))?,
                );
            }
            Some("ecosystem") => {
                ecosystem = Some(
                    field
                        .text()
                        .await
                        .map_err(|err| ApiError::InvalidParams(err.to_string()))?,
                );
            }
            Some("show_transitive") => {
                let raw = field
                    .text()
                    .await
                    .map_err(|err| ApiError::InvalidParams(err.to_string()))?;
                show_transitive = raw != "false";
            }
            _ => {}
        }
    }

    let (filename, content) = manifest_file.ok_or_else(|| {
        ApiError::InvalidParams("manifest is missing / not supported".to_string())
    })?;
    if !resolved_manifest_exists(&filename) {
        return Err(ApiError::InvalidParams(format!(
            "manifest file '{}' is invalid / not supported",
            filename
        )));
    }
    let file_path = file_path
        .ok_or_else(|| ApiError::InvalidParams("file path is missing".to_string()))?;
    let ecosystem = ecosystem
        .ok_or_else(|| ApiError::InvalidParams("ecosystem is missing".to_string()))?;

    let ecosystem = map_ecosystem(&ecosystem).to_string();
    if !is_accepted_ecosystem(&ecosystem) {
        return Err(ApiError::InvalidParams(format!(
            "'{}' ecosystem is not supported",
            ecosystem
        )));
    }

    let manifest = ManifestInfo {
        filename,
        filepath: file_path,
        content,
    };
    let packages =
        extract_packages(&manifest).map_err(|err| ApiError::InvalidParams(err.to_string()))?;

    let request_id = RequestId::generate();
    tracing::info!(
        request_id = %request_id,
        ecosystem = %ecosystem,
        manifest = %manifest.filename,
        packages = packages.len(),
        show_transitive,
        "Submitting stack analysis"
    );

    let body = BackboneRequest::new(&request_id, &ecosystem, packages, &manifest, show_transitive);

    for result in [
        state.backbone.post_aggregate_request(&body).await,
        state.backbone.post_recommendations_request(&body).await,
    ] {
        if let Err(err) = result {
            metrics::record_backbone_failure(err.endpoint());
            tracing::error!(request_id = %request_id, error = %err, "Backbone submission failed");
            return Err(ApiError::Backbone {
                id: request_id,
                source: err,
            });
        }
    }

    let dep_snapshot = json!({ "packages": body.packages });
    state.store.save_request(&request_id, manifest, dep_snapshot)?;
    metrics::record_submission();

    Ok(Json(SubmissionResponse {
        status: "success",
        submitted_at: unix_now_secs(),
        id: request_id,
    }))
}

/// `GET /api/v2/readiness`
pub async fn readiness() -> Json<Value> {
    Json(json!({}))
}

/// `GET /api/v2/liveness`
pub async fn liveness() -> Json<Value> {
    Json(json!({}))
}

/// `GET /api/v2/system/version`
pub async fn system_version() -> Json<Value> {
    Json(json!({ "service_version": env!("CARGO_PKG_VERSION") }))
}

fn unix_now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default()
}
