//! Tagged classification of stored worker results.
//!
//! The pipeline deposits each result fragment as a raw JSON value, and
//! some workers write a bare `-1` when they fail internally. Reads
//! therefore distinguish three states up front so the resolver can
//! pattern match instead of probing field by field.

use serde::de::DeserializeOwned;
use serde_json::Value;

/// State of one worker result fragment as read from storage.
#[derive(Debug, Clone, PartialEq)]
pub enum Fragment<T> {
    /// No row deposited for this request yet.
    Absent,
    /// A row exists but its value is not the expected record shape.
    Malformed,
    /// A well-shaped result.
    Present(T),
}

impl<T: DeserializeOwned> Fragment<T> {
    /// Classify a raw stored value.
    ///
    /// `None` means the worker has not written anything; a value that
    /// fails to deserialize into `T` (the `-1` sentinel, a string, an
    /// array) is malformed rather than absent.
    pub fn from_stored(value: Option<Value>) -> Self {
        match value {
            None => Fragment::Absent,
            Some(raw) => match serde_json::from_value(raw) {
                Ok(parsed) => Fragment::Present(parsed),
                Err(_) => Fragment::Malformed,
            },
        }
    }
}

impl<T> Fragment<T> {
    pub fn is_absent(&self) -> bool {
        matches!(self, Fragment::Absent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyses::worker::StackResult;
    use serde_json::json;

    #[test]
    fn test_missing_row_is_absent() {
        let fragment: Fragment<StackResult> = Fragment::from_stored(None);
        assert!(fragment.is_absent());
    }

    #[test]
    fn test_sentinel_is_malformed() {
        let fragment: Fragment<StackResult> = Fragment::from_stored(Some(json!(-1)));
        assert_eq!(fragment, Fragment::Malformed);
    }

    #[test]
    fn test_non_record_is_malformed() {
        let fragment: Fragment<StackResult> = Fragment::from_stored(Some(json!("done")));
        assert_eq!(fragment, Fragment::Malformed);
    }

    #[test]
    fn test_record_is_present() {
        let raw = json!({ "task_result": { "ecosystem": "npm" } });
        match Fragment::<StackResult>::from_stored(Some(raw)) {
            Fragment::Present(result) => {
                let task = result.task_result.expect("task result should parse");
                assert_eq!(task.ecosystem, "npm");
            }
            other => panic!("expected Present, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_record_is_present_without_task_result() {
        match Fragment::<StackResult>::from_stored(Some(json!({}))) {
            Fragment::Present(result) => assert!(result.task_result.is_none()),
            other => panic!("expected Present, got {:?}", other),
        }
    }
}
