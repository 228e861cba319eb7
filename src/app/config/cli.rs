use super::{ConfigError, LogOutput, OutputFormat};
use crate::domain::{LevelTable, LogFormat, STANDARD_LEVELS, SeverityFilter};
use crate::parser::FilterConfig;
use crate::report::DEFAULT_TOP_N;
use clap::Parser;
use clap::builder::PossibleValuesParser;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[command(
    author,
    version,
    about = "Report slow requests and leveled messages of an Odoo server log",
    long_about = None
)]
#[serde(default)]
pub struct Config {
    /// Log file to analyze
    pub logfile: PathBuf,

    /// Minimum total request time to capture, in seconds
    #[arg(short = 't', long, env = "ODOO_LOG_THRESHOLD", default_value = "50")]
    pub threshold: f64,

    /// Minimum severity of captured messages
    #[arg(
        short = 's',
        long,
        env = "ODOO_LOG_SEVERITY",
        default_value = "INFO",
        value_parser = PossibleValuesParser::new(STANDARD_LEVELS.iter().map(|(name, _)| *name))
    )]
    pub severity: String,

    /// Keep lines logged without a database
    #[arg(short = 'i', long)]
    pub include_no_db: bool,

    /// Do not capture or report requests
    #[arg(short = 'R', long)]
    pub no_requests: bool,

    /// Capture requests only, no messages
    #[arg(short = 'r', long)]
    pub just_requests: bool,

    /// Only warnings and errors on stderr
    #[arg(short = 'q', long)]
    pub quiet: bool,

    /// Debug diagnostics and progress on stderr
    #[arg(short = 'v', long)]
    pub verbose: bool,

    /// Length of each ranked list
    #[arg(long, env = "ODOO_LOG_TOP", default_value = "10")]
    pub top: usize,

    /// Report format
    #[arg(long, env = "ODOO_LOG_OUTPUT", default_value = "table")]
    pub output: OutputFormat,

    /// Diagnostics format
    #[arg(long, env = "ODOO_LOG_FORMAT", default_value = "text")]
    pub log_format: LogOutput,

    /// First characters of every header line
    #[arg(long, env = "ODOO_LOG_YEAR_PREFIX", default_value = "202")]
    pub year_prefix: String,

    /// Configuration file path (optional)
    #[arg(long, env = "ODOO_LOG_CONFIG")]
    #[serde(skip)]
    pub config_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            logfile: PathBuf::new(),
            threshold: 50.0,
            severity: "INFO".to_string(),
            include_no_db: false,
            no_requests: false,
            just_requests: false,
            quiet: false,
            verbose: false,
            top: DEFAULT_TOP_N,
            output: OutputFormat::Table,
            log_format: LogOutput::Text,
            year_prefix: "202".to_string(),
            config_file: None,
        }
    }
}

impl Config {
    /// Parses CLI arguments (and env fallbacks), then layers the config file
    /// under anything left at its default.
    pub fn from_args<I, T>(args: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        let mut config = Config::try_parse_from(args)?;

        if let Some(config_file) = config.config_file.clone() {
            let file_config = Self::read_file(&config_file)?;
            config = config.merge_file(file_config);
        }

        config.validate()?;
        Ok(config)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let config = Self::read_file(path.as_ref())?;
        config.validate()?;
        Ok(config)
    }

    fn read_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Takes values from `file` wherever `self` still holds the default.
    pub fn merge_file(mut self, file: Config) -> Self {
        let defaults = Config::default();

        if self.logfile == defaults.logfile {
            self.logfile = file.logfile;
        }
        if self.threshold == defaults.threshold {
            self.threshold = file.threshold;
        }
        if self.severity == defaults.severity {
            self.severity = file.severity;
        }
        if self.top == defaults.top {
            self.top = file.top;
        }
        if self.output == defaults.output {
            self.output = file.output;
        }
        if self.log_format == defaults.log_format {
            self.log_format = file.log_format;
        }
        if self.year_prefix == defaults.year_prefix {
            self.year_prefix = file.year_prefix;
        }
        self.include_no_db |= file.include_no_db;
        self.no_requests |= file.no_requests;
        self.just_requests |= file.just_requests;
        self.quiet |= file.quiet;
        self.verbose |= file.verbose;

        self
    }

    /// Log layout the parser is built with.
    pub fn parsing_format(&self) -> LogFormat {
        LogFormat::default().with_year_prefix(self.year_prefix.clone())
    }

    /// Filters handed to the entry builder.
    pub fn filter_config(&self, levels: &LevelTable) -> FilterConfig {
        FilterConfig {
            min_total_time: if self.no_requests { 0.0 } else { self.threshold },
            min_severity: if self.just_requests {
                SeverityFilter::Nothing
            } else {
                SeverityFilter::AtLeast(levels.rank(&self.severity))
            },
            ignore_no_db: !self.include_no_db,
        }
    }

    pub fn diagnostic_level(&self) -> tracing::Level {
        if self.quiet {
            tracing::Level::WARN
        } else if self.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_from_args() {
        let config = Config::from_args(["odoo-log-analyzer", "odoo.log"]).unwrap();

        assert_eq!(config.logfile, PathBuf::from("odoo.log"));
        assert_eq!(config.threshold, 50.0);
        assert_eq!(config.severity, "INFO");
        assert_eq!(config.top, 10);
        assert_eq!(config.output, OutputFormat::Table);
    }

    #[test]
    fn test_filter_config_derivation() {
        let levels = LevelTable::standard();
        let config = Config::from_args(["odoo-log-analyzer", "-t", "2.5", "-s", "ERROR", "x.log"])
            .unwrap();
        let filter = config.filter_config(&levels);
        assert_eq!(filter.min_total_time, 2.5);
        assert_eq!(filter.min_severity, SeverityFilter::AtLeast(40));
        assert!(filter.ignore_no_db);

        let config = Config::from_args(["odoo-log-analyzer", "-R", "-r", "-i", "x.log"]).unwrap();
        let filter = config.filter_config(&levels);
        assert_eq!(filter.min_total_time, 0.0);
        assert_eq!(filter.min_severity, SeverityFilter::Nothing);
        assert!(!filter.ignore_no_db);
    }

    #[test]
    fn test_unknown_severity_rejected_by_cli() {
        let result = Config::from_args(["odoo-log-analyzer", "-s", "LOUD", "x.log"]);
        assert!(matches!(result, Err(ConfigError::Cli(_))));
    }

    #[test]
    fn test_diagnostic_level() {
        let quiet = Config::from_args(["odoo-log-analyzer", "-q", "x.log"]).unwrap();
        assert_eq!(quiet.diagnostic_level(), tracing::Level::WARN);

        let verbose = Config::from_args(["odoo-log-analyzer", "-v", "x.log"]).unwrap();
        assert_eq!(verbose.diagnostic_level(), tracing::Level::DEBUG);
    }

    #[test]
    fn test_merge_file_keeps_explicit_cli_values() {
        let cli = Config {
            logfile: PathBuf::from("cli.log"),
            threshold: 3.0,
            ..Config::default()
        };
        let file = Config {
            logfile: PathBuf::from("file.log"),
            threshold: 9.0,
            top: 25,
            just_requests: true,
            ..Config::default()
        };

        let merged = cli.merge_file(file);
        assert_eq!(merged.logfile, PathBuf::from("cli.log"));
        assert_eq!(merged.threshold, 3.0);
        assert_eq!(merged.top, 25);
        assert!(merged.just_requests);
    }
}
