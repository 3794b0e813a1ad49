//! Configuration loading from disk.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::AppConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", format_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn format_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<AppConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let config: AppConfig = toml::from_str(&content)?;

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_config_round_trip() {
        let mut file = tempfile_path("sa-config-ok.toml");
        write!(
            file.1,
            r#"
            [timeouts]
            pending_deadline_secs = 300
            "#
        )
        .unwrap();
        let config = load_config(&file.0).unwrap();
        assert_eq!(config.timeouts.pending_deadline_secs, 300);
        let _ = fs::remove_file(&file.0);
    }

    #[test]
    fn test_invalid_values_fail_validation() {
        let mut file = tempfile_path("sa-config-bad.toml");
        write!(
            file.1,
            r#"
            [timeouts]
            pending_deadline_secs = 0
            "#
        )
        .unwrap();
        let err = load_config(&file.0).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
        let _ = fs::remove_file(&file.0);
    }

    fn tempfile_path(name: &str) -> (std::path::PathBuf, fs::File) {
        let path = std::env::temp_dir().join(name);
        let file = fs::File::create(&path).unwrap();
        (path, file)
    }
}
