pub mod config;
pub mod logging_system;
pub mod progress;

pub use config::{Config, ConfigError, LogOutput, OutputFormat};
pub use logging_system::{LoggingError, LoggingSystem, setup_logging_safe};
pub use progress::StderrProgress;

use crate::domain::AnalyzerError;
use crate::report::{AggregateReport, RequestAggregator, write_json, write_summary, write_tables};
use crate::stream::{Analysis, NoProgress, ProgressObserver, analyze_file};
use std::io::Write;
use tracing::{error, info, warn};

pub struct App {
    config: Config,
}

impl App {
    pub fn from_args<I, T>(args: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Ok(Self::from_config(Config::from_args(args)?))
    }

    pub fn from_config(config: Config) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Reads the log and aggregates the captured requests.
    pub fn analyze(&self) -> Result<(Analysis, AggregateReport), AnalyzerError> {
        let format = self.config.parsing_format();
        let filter = self.config.filter_config(&format.levels);

        let mut progress: Box<dyn ProgressObserver> = if self.config.verbose {
            Box::new(StderrProgress::default())
        } else {
            Box::new(NoProgress)
        };

        let analysis = analyze_file(&self.config.logfile, &format, &filter, &mut *progress)?;
        let report = RequestAggregator::new(self.config.top).aggregate(&analysis.bucket);

        Ok((analysis, report))
    }

    pub fn run<W: Write>(&self, out: &mut W) -> Result<(), AnalyzerError> {
        let (analysis, report) = self.analyze()?;

        match self.config.output {
            OutputFormat::Table => {
                write_summary(out, &report).map_err(AnalyzerError::Output)?;
                if !self.config.no_requests {
                    write_tables(out, &report, self.config.top).map_err(AnalyzerError::Output)?;
                }
            }
            OutputFormat::Json => write_json(out, &report, &analysis.stats)?,
        }
        out.flush().map_err(AnalyzerError::Output)?;

        let recoverable = analysis.stats.recoverable_errors();
        if recoverable > 0 {
            warn!(
                malformed_headers = analysis.stats.malformed_headers,
                encoding_errors = analysis.stats.encoding_errors,
                "{recoverable} lines could not be parsed and were ignored"
            );
        }

        Ok(())
    }
}

/// Binary entry point.
pub fn main() {
    let app = match App::from_args(std::env::args_os()) {
        Ok(app) => app,
        Err(ConfigError::Cli(e)) => e.exit(),
        Err(e) => {
            eprintln!("Configuration error: {e}");
            std::process::exit(2);
        }
    };

    if let Err(e) = setup_logging_safe(app.config().diagnostic_level(), app.config().log_format) {
        eprintln!("Warning: {e}");
    }

    info!("Starting odoo-log-analyzer v{}", crate::VERSION);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    if let Err(e) = app.run(&mut out) {
        error!("{e}");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::NamedTempFile;

    const LOG: &str = "\
2024-01-01 10:00:00,000 1 INFO db werkzeug: 10.0.0.1 - - [01/Jan/2024 10:00:00] \"GET /fr_FR/shop HTTP/1.1\" 200 - 12 0.500 1.000
2024-01-01 10:00:01,000 1 ERROR db odoo.sql_db: bad query
Traceback (most recent call last):
2024-01-01 10:00:02,000 1 INFO ? werkzeug: 10.0.0.1 - - [01/Jan/2024 10:00:02] \"GET /web HTTP/1.1\" 200 - 1 9.000 9.000
";

    fn app_for(file: &NamedTempFile, threshold: f64) -> App {
        App::from_config(Config {
            logfile: file.path().to_path_buf(),
            threshold,
            ..Config::default()
        })
    }

    fn log_file() -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(LOG.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_run_table_output() {
        let file = log_file();
        let app = app_for(&file, 1.0);

        let mut out = Vec::new();
        app.run(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.contains("REQUEST: 1"));
        assert!(text.contains("ERROR: 1"));
        assert!(text.contains("Top 10 Slow requests"));
        assert!(text.contains("/shop"));
        assert!(!text.contains("/web"));
    }

    #[test]
    fn test_run_json_output() {
        let file = log_file();
        let mut app = app_for(&file, 1.0);
        app.config.output = OutputFormat::Json;

        let mut out = Vec::new();
        app.run(&mut out).unwrap();
        let json: serde_json::Value = serde_json::from_slice(&out).unwrap();

        assert_eq!(json["slow_requests"].as_array().unwrap().len(), 1);
        assert_eq!(json["stats"]["lines_read"], 4);
    }

    #[test]
    fn test_no_requests_skips_tables() {
        let file = log_file();
        let mut app = app_for(&file, 1.0);
        app.config.no_requests = true;

        let mut out = Vec::new();
        app.run(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.contains("ERROR: 1"));
        assert!(!text.contains("REQUEST"));
        assert!(!text.contains("Top "));
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let app = App::from_config(Config {
            logfile: PathBuf::from("/definitely/not/here.log"),
            ..Config::default()
        });

        let result = app.run(&mut Vec::new());
        assert!(matches!(result, Err(AnalyzerError::FileAccess { .. })));
    }
}
