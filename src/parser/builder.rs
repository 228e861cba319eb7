use super::error::ParseError;
use super::generated::{VALIDATED_PATTERNS, pattern_index};
use super::header::HeaderTokens;
use crate::domain::{
    EntryHeader, LogEntry, LogFormat, MessageEntry, REQUEST_KEY, RequestEntry, SeverityFilter,
};
use serde::{Deserialize, Serialize};

/// Filters applied while building entries.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FilterConfig {
    /// Minimum total request time in seconds; 0 disables request capture.
    pub min_total_time: f64,
    pub min_severity: SeverityFilter,
    /// Drop lines whose database is the "no database" marker.
    pub ignore_no_db: bool,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            min_total_time: 50.0,
            min_severity: SeverityFilter::AtLeast(20),
            ignore_no_db: true,
        }
    }
}

impl FilterConfig {
    pub fn captures_requests(&self) -> bool {
        self.min_total_time > 0.0
    }

    pub fn captures_messages(&self) -> bool {
        self.min_severity != SeverityFilter::Nothing
    }

    pub fn captures_anything(&self) -> bool {
        self.captures_requests() || self.captures_messages()
    }
}

/// Why a header line produced no entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    NoDatabase,
    RequestCaptureDisabled,
    NoPerfData,
    BelowThreshold,
    BelowSeverity,
}

#[derive(Debug, Clone, PartialEq)]
pub enum BuildOutcome {
    Entry(LogEntry),
    Skipped(SkipReason),
}

/// Timing tail of an access line: `... QUERY_COUNT SQL_TIME OTHER_TIME`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RequestTimings {
    pub query_count: u64,
    pub sql_time: f64,
    pub other_time: f64,
}

impl RequestTimings {
    pub fn from_tail(tokens: &[&str]) -> Result<Self, String> {
        let [.., count, sql, other] = tokens else {
            return Err("access line has no timing fields".to_string());
        };

        Ok(Self {
            query_count: count
                .parse()
                .map_err(|e| format!("query count '{count}' is not an integer: {e}"))?,
            sql_time: parse_seconds(sql, "sql time")?,
            other_time: parse_seconds(other, "other time")?,
        })
    }

    pub fn total_time(&self) -> f64 {
        self.other_time + self.sql_time
    }
}

fn parse_seconds(token: &str, what: &str) -> Result<f64, String> {
    let value: f64 = token
        .parse()
        .map_err(|e| format!("{what} '{token}' is not a number: {e}"))?;
    if !value.is_finite() || value < 0.0 {
        return Err(format!("{what} '{token}' is not a non-negative duration"));
    }
    Ok(value)
}

/// Client and request line of an access message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessLine {
    /// `-` when the access line carries no client address.
    pub ip: String,
    pub method: String,
    pub endpoint: String,
    pub status: String,
}

impl AccessLine {
    pub fn parse(message: &str) -> Result<Self, String> {
        for index in [
            pattern_index::WERKZEUG_ACCESS_FULL,
            pattern_index::WERKZEUG_ACCESS_BARE,
        ] {
            let regex = VALIDATED_PATTERNS.get(index).map_err(|e| e.to_string())?;
            if let Some(captures) = regex.captures(message) {
                return Ok(Self {
                    ip: captures
                        .name("ip")
                        .map_or("-", |m| m.as_str())
                        .to_string(),
                    method: captures["method"].to_string(),
                    endpoint: captures["endpoint"].to_string(),
                    status: captures["status"].to_string(),
                });
            }
        }

        Err(format!("access line '{message}' does not match the werkzeug format"))
    }
}

/// Turns a header line into an entry, or a reason to skip it.
pub struct EntryBuilder<'a> {
    format: &'a LogFormat,
    filter: &'a FilterConfig,
}

impl<'a> EntryBuilder<'a> {
    pub fn new(format: &'a LogFormat, filter: &'a FilterConfig) -> Self {
        Self { format, filter }
    }

    /// `line` must not include its line terminator.
    pub fn build(&self, line: &str, line_number: u64) -> Result<BuildOutcome, ParseError> {
        let tokens =
            HeaderTokens::parse(line).map_err(|reason| ParseError::malformed(line_number, reason))?;

        if self.filter.ignore_no_db && tokens.db == self.format.no_db_marker {
            return Ok(BuildOutcome::Skipped(SkipReason::NoDatabase));
        }

        let result = if self.format.is_request(tokens.logger, tokens.level) {
            self.build_request(line, &tokens)
        } else {
            self.build_message(&tokens)
        };

        result.map_err(|reason| ParseError::malformed(line_number, reason))
    }

    fn build_request(&self, line: &str, tokens: &HeaderTokens<'_>) -> Result<BuildOutcome, String> {
        if !self.filter.captures_requests() {
            return Ok(BuildOutcome::Skipped(SkipReason::RequestCaptureDisabled));
        }
        if line.trim_end().ends_with(self.format.no_perf_marker) {
            return Ok(BuildOutcome::Skipped(SkipReason::NoPerfData));
        }

        let timings = RequestTimings::from_tail(&tokens.message)?;
        if timings.total_time() < self.filter.min_total_time {
            return Ok(BuildOutcome::Skipped(SkipReason::BelowThreshold));
        }

        let access = AccessLine::parse(&tokens.message_text())?;
        let header = self.header(tokens, REQUEST_KEY)?;

        Ok(BuildOutcome::Entry(LogEntry::Request(RequestEntry {
            header,
            ip: access.ip,
            method: access.method,
            endpoint: access.endpoint,
            status: access.status,
            sql_time: timings.sql_time,
            other_time: timings.other_time,
            query_count: timings.query_count,
        })))
    }

    fn build_message(&self, tokens: &HeaderTokens<'_>) -> Result<BuildOutcome, String> {
        let rank = self.format.levels.rank(tokens.level);
        if !self.filter.min_severity.admits(rank) {
            return Ok(BuildOutcome::Skipped(SkipReason::BelowSeverity));
        }

        Ok(BuildOutcome::Entry(LogEntry::Message(MessageEntry {
            header: self.header(tokens, tokens.level)?,
            message: tokens.message_text(),
            context: Vec::new(),
        })))
    }

    fn header(&self, tokens: &HeaderTokens<'_>, level: &str) -> Result<EntryHeader, String> {
        Ok(EntryHeader {
            timestamp: tokens.timestamp()?,
            pid: tokens.pid()?,
            level: level.to_string(),
            db: tokens.db.to_string(),
            logger: tokens.logger.to_string(),
        })
    }
}
