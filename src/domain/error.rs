use crate::app::ConfigError;
use std::path::PathBuf;
use thiserror::Error;

/// Top-level error type for an analyzer run.
///
/// Only these abort a run. Per-line problems are `ParseError`s, which the
/// reconstructor counts and skips.
#[derive(Error, Debug)]
pub enum AnalyzerError {
    #[error("Cannot read log file {path:?}: {source}")]
    FileAccess {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Failed to write report: {0}")]
    Output(#[source] std::io::Error),

    #[error("Failed to render JSON report: {0}")]
    Render(#[from] serde_json::Error),
}

impl AnalyzerError {
    pub fn file_access(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        AnalyzerError::FileAccess {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_access_error_names_path_and_cause() {
        let err = AnalyzerError::file_access(
            "/var/log/odoo/missing.log",
            std::io::Error::new(std::io::ErrorKind::NotFound, "No such file or directory"),
        );

        let text = err.to_string();
        assert!(text.contains("/var/log/odoo/missing.log"));
        assert!(text.contains("No such file or directory"));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_config_error_is_transparent() {
        let err: AnalyzerError =
            ConfigError::InvalidConfig("Top list length must be greater than 0".to_string()).into();
        assert_eq!(
            err.to_string(),
            "Invalid configuration: Top list length must be greater than 0"
        );
    }
}
