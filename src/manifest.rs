//! Manifest validation and package extraction for submissions.
//!
//! # Responsibilities
//! - Map caller-friendly ecosystem aliases to canonical names
//! - Reject unsupported ecosystems and unrecognized manifest files
//! - Pull a best-effort package listing out of the manifest content
//!
//! # Design Decisions
//! - Only `npm list --json` style manifests are mined for packages here;
//!   other ecosystems are resolved by the backbone workers downstream
//! - A JSON manifest that fails to parse is a client error, not empty

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Ecosystems the analysis pipeline accepts.
pub const ACCEPTED_ECOSYSTEMS: &[&str] = &["npm", "pypi", "maven", "golang"];

/// Manifest filenames the pipeline knows how to resolve.
const RESOLVED_MANIFESTS: &[&str] = &[
    "npmlist.json",
    "pylist.json",
    "dependencies.txt",
    "golist.json",
];

#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("error while parsing dependencies information: {0}")]
    InvalidDependencies(#[from] serde_json::Error),
}

/// Map ecosystem aliases onto canonical names; unknown values pass
/// through and fail the acceptance check instead.
pub fn map_ecosystem(ecosystem: &str) -> &str {
    match ecosystem {
        "node" => "npm",
        "python" => "pypi",
        "java" => "maven",
        other => other,
    }
}

pub fn is_accepted_ecosystem(ecosystem: &str) -> bool {
    ACCEPTED_ECOSYSTEMS.contains(&ecosystem)
}

pub fn resolved_manifest_exists(filename: &str) -> bool {
    RESOLVED_MANIFESTS.contains(&filename)
}

/// Uploaded manifest file plus the path it came from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManifestInfo {
    pub filename: String,
    pub filepath: String,
    pub content: String,
}

/// One direct dependency found in the manifest.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Package {
    pub name: String,
    pub version: String,
    pub dependencies: Vec<Dependency>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dependency {
    pub name: String,
    pub version: String,
}

/// Extract direct packages (and one level of their dependencies) from an
/// `npm list --json` style manifest. Non-JSON manifests yield an empty
/// listing; malformed JSON in a `.json` manifest is an error.
pub fn extract_packages(manifest: &ManifestInfo) -> Result<Vec<Package>, ManifestError> {
    if !manifest.filename.ends_with(".json") {
        return Ok(Vec::new());
    }

    let root: Value = serde_json::from_str(&manifest.content)?;
    let mut packages = Vec::new();
    for (name, entry) in dependency_entries(&root) {
        packages.push(Package {
            name: name.clone(),
            version: version_of(entry),
            dependencies: dependency_entries(entry)
                .map(|(dep_name, dep)| Dependency {
                    name: dep_name.clone(),
                    version: version_of(dep),
                })
                .collect(),
        });
    }
    Ok(packages)
}

fn dependency_entries(value: &Value) -> impl Iterator<Item = (&String, &Value)> {
    value
        .get("dependencies")
        .and_then(Value::as_object)
        .into_iter()
        .flatten()
}

fn version_of(entry: &Value) -> String {
    entry
        .get("version")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manifest(filename: &str, content: &str) -> ManifestInfo {
        ManifestInfo {
            filename: filename.into(),
            filepath: "/tmp/bin".into(),
            content: content.into(),
        }
    }

    #[test]
    fn test_ecosystem_aliases_map() {
        assert_eq!(map_ecosystem("node"), "npm");
        assert_eq!(map_ecosystem("python"), "pypi");
        assert_eq!(map_ecosystem("java"), "maven");
        assert_eq!(map_ecosystem("golang"), "golang");
    }

    #[test]
    fn test_accepted_ecosystems() {
        assert!(is_accepted_ecosystem("npm"));
        assert!(!is_accepted_ecosystem("node"));
        assert!(!is_accepted_ecosystem("cargo"));
    }

    #[test]
    fn test_recognized_manifest_names() {
        assert!(resolved_manifest_exists("npmlist.json"));
        assert!(resolved_manifest_exists("dependencies.txt"));
        assert!(!resolved_manifest_exists("package.json"));
    }

    #[test]
    fn test_extract_packages_from_npm_list() {
        let content = r#"{
            "name": "app",
            "version": "1.0.0",
            "dependencies": {
                "lodash": { "version": "4.17.21" },
                "express": {
                    "version": "4.17.1",
                    "dependencies": { "accepts": { "version": "1.3.7" } }
                }
            }
        }"#;
        let mut packages = extract_packages(&manifest("npmlist.json", content)).unwrap();
        packages.sort_by(|a, b| a.name.cmp(&b.name));
        assert_eq!(packages.len(), 2);
        assert_eq!(packages[0].name, "express");
        assert_eq!(packages[0].dependencies.len(), 1);
        assert_eq!(packages[0].dependencies[0].name, "accepts");
        assert_eq!(packages[1].name, "lodash");
        assert_eq!(packages[1].version, "4.17.21");
    }

    #[test]
    fn test_malformed_json_manifest_is_an_error() {
        let result = extract_packages(&manifest("npmlist.json", "not json"));
        assert!(matches!(result, Err(ManifestError::InvalidDependencies(_))));
    }

    #[test]
    fn test_text_manifest_yields_empty_listing() {
        let packages = extract_packages(&manifest("dependencies.txt", "junit:junit:4.12")).unwrap();
        assert!(packages.is_empty());
    }
}
