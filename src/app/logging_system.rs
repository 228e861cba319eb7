use super::config::LogOutput;
use std::error::Error;
use std::sync::OnceLock;
use thiserror::Error;
use tracing::Level;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Error, Debug)]
pub enum LoggingError {
    #[error("Logging system initialization failed: {details}")]
    InitFailed {
        details: String,
        #[source]
        source: Box<dyn Error + Send + Sync>,
    },
    #[error("Logging system initialization failed: {0}")]
    PreviouslyFailed(String),
}

/// Diagnostics on stderr; stdout stays reserved for the report.
pub struct LoggingSystem {
    level: Level,
    output: LogOutput,
}

impl LoggingSystem {
    pub fn new(level: Level, output: LogOutput) -> Self {
        Self { level, output }
    }

    /// `RUST_LOG` wins over the level picked by `--quiet`/`--verbose`.
    pub fn build_filter_string(&self) -> String {
        std::env::var(EnvFilter::DEFAULT_ENV)
            .ok()
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| self.level.as_str().to_ascii_lowercase())
    }

    pub fn initialize_tracing(&self) -> Result<(), LoggingError> {
        let filter_string = self.build_filter_string();

        let env_filter =
            EnvFilter::try_new(&filter_string).map_err(|e| LoggingError::InitFailed {
                details: format!("Failed to create EnvFilter with '{filter_string}'"),
                source: Box::new(e),
            })?;

        let json = self.output == LogOutput::Json;
        let subscriber = tracing_subscriber::registry()
            .with(env_filter)
            .with(json.then(|| {
                fmt::layer()
                    .json()
                    .with_target(true)
                    .with_writer(std::io::stderr)
            }))
            .with((!json).then(|| {
                fmt::layer()
                    .compact()
                    .with_target(false)
                    .with_level(true)
                    .with_writer(std::io::stderr)
            }));

        tracing::subscriber::set_global_default(subscriber).map_err(|e| {
            LoggingError::InitFailed {
                details: "Failed to set global tracing subscriber".to_string(),
                source: Box::new(e),
            }
        })
    }
}

/// Installs the global subscriber once; later calls report the first outcome.
pub fn setup_logging_safe(level: Level, output: LogOutput) -> Result<(), LoggingError> {
    static INIT: OnceLock<Result<(), String>> = OnceLock::new();

    INIT.get_or_init(|| {
        LoggingSystem::new(level, output)
            .initialize_tracing()
            .map_err(|e| e.to_string())
    })
    .clone()
    .map_err(LoggingError::PreviouslyFailed)
}
