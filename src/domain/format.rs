use super::log_level::LevelTable;

/// Fixed layout of the server log.
///
/// Passed explicitly to the classifier and the entry builder.
#[derive(Debug, Clone, PartialEq)]
pub struct LogFormat {
    /// Header lines start with this (the first three digits of the year).
    pub year_prefix: String,
    /// Number of leading characters searched for a level marker.
    pub header_window: usize,
    pub levels: LevelTable,
    /// Logger name of HTTP access lines.
    pub request_logger: String,
    /// Level name of HTTP access lines.
    pub request_level: String,
    /// Database token written when a line has no database.
    pub no_db_marker: String,
    /// Trailing character of access lines without timing data.
    pub no_perf_marker: char,
}

impl Default for LogFormat {
    fn default() -> Self {
        Self {
            year_prefix: "202".to_string(),
            header_window: 40,
            levels: LevelTable::standard(),
            request_logger: "werkzeug".to_string(),
            request_level: "INFO".to_string(),
            no_db_marker: "?".to_string(),
            no_perf_marker: '-',
        }
    }
}

impl LogFormat {
    pub fn with_year_prefix(mut self, year_prefix: impl Into<String>) -> Self {
        self.year_prefix = year_prefix.into();
        self
    }

    pub fn is_request(&self, logger: &str, level: &str) -> bool {
        logger == self.request_logger && level == self.request_level
    }
}
