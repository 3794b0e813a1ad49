//! In-memory analysis store backed by `DashMap`.
//!
//! Suitable for single-instance deployments and tests; a database-backed
//! store plugs in behind the same trait.

use std::time::{Duration, Instant};

use dashmap::DashMap;
use serde_json::Value;

use crate::analyses::RequestId;
use crate::manifest::ManifestInfo;
use crate::storage::{AnalysisStore, StoreError};

#[derive(Debug)]
struct RequestRow {
    submitted_at: Instant,
    #[allow(dead_code)]
    manifest: ManifestInfo,
    dep_snapshot: Value,
}

/// Thread-safe in-memory store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    requests: DashMap<RequestId, RequestRow>,
    results: DashMap<(RequestId, String), Value>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl AnalysisStore for MemoryStore {
    fn save_request(
        &self,
        id: &RequestId,
        manifest: ManifestInfo,
        dep_snapshot: Value,
    ) -> Result<(), StoreError> {
        match self.requests.get_mut(id) {
            Some(mut row) => {
                // Upsert semantics: keep the original submit time.
                row.dep_snapshot = dep_snapshot;
            }
            None => {
                self.requests.insert(
                    id.clone(),
                    RequestRow {
                        submitted_at: Instant::now(),
                        manifest,
                        dep_snapshot,
                    },
                );
            }
        }
        Ok(())
    }

    fn request_age(&self, id: &RequestId) -> Option<Duration> {
        self.requests.get(id).map(|row| row.submitted_at.elapsed())
    }

    fn worker_result(&self, id: &RequestId, worker: &str) -> Option<Value> {
        self.results
            .get(&(id.clone(), worker.to_string()))
            .map(|entry| entry.value().clone())
    }

    fn put_worker_result(&self, id: &RequestId, worker: &str, value: Value) {
        self.results.insert((id.clone(), worker.to_string()), value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::STACK_AGGREGATOR_WORKER;
    use serde_json::json;

    fn manifest() -> ManifestInfo {
        ManifestInfo {
            filename: "npmlist.json".into(),
            filepath: "/tmp/bin".into(),
            content: "{}".into(),
        }
    }

    #[test]
    fn test_unknown_request_has_no_age() {
        let store = MemoryStore::new();
        assert!(store.request_age(&RequestId::new("missing")).is_none());
    }

    #[test]
    fn test_saved_request_ages() {
        let store = MemoryStore::new();
        let id = RequestId::new("req-1");
        store.save_request(&id, manifest(), json!({})).unwrap();
        let age = store.request_age(&id).expect("saved request has an age");
        assert!(age < Duration::from_secs(1));
    }

    #[test]
    fn test_worker_results_are_per_worker() {
        let store = MemoryStore::new();
        let id = RequestId::new("req-2");
        store.put_worker_result(&id, STACK_AGGREGATOR_WORKER, json!({ "task_result": null }));

        assert!(store.worker_result(&id, STACK_AGGREGATOR_WORKER).is_some());
        assert!(store.worker_result(&id, "recommendation_v2").is_none());
        assert!(store
            .worker_result(&RequestId::new("other"), STACK_AGGREGATOR_WORKER)
            .is_none());
    }

    #[test]
    fn test_resubmission_keeps_submit_time() {
        let store = MemoryStore::new();
        let id = RequestId::new("req-3");
        store.save_request(&id, manifest(), json!({ "packages": [] })).unwrap();
        let first_age = store.request_age(&id).unwrap();
        store.save_request(&id, manifest(), json!({ "packages": [1] })).unwrap();
        let second_age = store.request_age(&id).unwrap();
        assert!(second_age >= first_age);
    }
}
