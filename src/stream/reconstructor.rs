use super::stats::ParseStats;
use crate::domain::{LogEntry, LogFormat};
use crate::parser::{BuildOutcome, EntryBuilder, FilterConfig, LineClassifier, LineKind, ParseError};
use crate::report::ReportBucket;
use tracing::{trace, warn};

/// Rebuilds logical entries from physical lines.
///
/// Holds at most one open entry. It is finalized into the bucket when the
/// next header line arrives, or by `finish` at end of input.
pub struct EntryStreamReconstructor<'a> {
    classifier: LineClassifier<'a>,
    builder: EntryBuilder<'a>,
    current: Option<LogEntry>,
    bucket: ReportBucket,
    stats: ParseStats,
}

impl<'a> EntryStreamReconstructor<'a> {
    pub fn new(format: &'a LogFormat, filter: &'a FilterConfig) -> Self {
        Self {
            classifier: LineClassifier::new(format),
            builder: EntryBuilder::new(format, filter),
            current: None,
            bucket: ReportBucket::default(),
            stats: ParseStats::default(),
        }
    }

    /// Feeds one raw line, terminator included or not.
    pub fn push_bytes(&mut self, raw: &[u8]) {
        self.stats.bytes_read += raw.len() as u64;
        match std::str::from_utf8(raw) {
            Ok(line) => self.push_decoded(line),
            Err(_) => {
                self.stats.lines_read += 1;
                self.stats.encoding_errors += 1;
                let error = ParseError::Encoding {
                    line: self.stats.lines_read,
                };
                warn!(line = error.line(), error = %error, "Skipping undecodable line");

                // An undecodable header still ends the open entry
                let lossy = String::from_utf8_lossy(raw);
                if self.classifier.is_header(lossy.trim_end_matches(['\n', '\r'])) {
                    self.stats.header_lines += 1;
                    self.stats.skipped_headers += 1;
                    self.finalize_current();
                }
            }
        }
    }

    /// Feeds one line, terminator included or not.
    pub fn push_line(&mut self, line: &str) {
        self.stats.bytes_read += line.len() as u64;
        self.push_decoded(line);
    }

    fn push_decoded(&mut self, line: &str) {
        self.stats.lines_read += 1;
        let line = line.trim_end_matches(['\n', '\r']);

        match self.classifier.classify(line) {
            LineKind::Header => self.start_entry(line),
            LineKind::Continuation => self.append_context(line),
        }
    }

    fn start_entry(&mut self, line: &str) {
        self.stats.header_lines += 1;
        self.finalize_current();

        let line_number = self.stats.lines_read;
        match self.builder.build(line, line_number) {
            Ok(BuildOutcome::Entry(entry)) => self.current = Some(entry),
            Ok(BuildOutcome::Skipped(reason)) => {
                self.stats.skipped_headers += 1;
                trace!(line = line_number, ?reason, "Header skipped");
            }
            Err(error) => {
                self.stats.malformed_headers += 1;
                warn!(line = error.line(), error = %error, "Skipping malformed header");
            }
        }
    }

    fn append_context(&mut self, line: &str) {
        let kept = self
            .current
            .as_mut()
            .is_some_and(|entry| entry.push_context(line));

        if kept {
            self.stats.continuation_lines_kept += 1;
        } else {
            self.stats.continuation_lines_dropped += 1;
        }
    }

    fn finalize_current(&mut self) {
        if let Some(entry) = self.current.take() {
            self.bucket.push(entry);
            self.stats.entries_finalized += 1;
        }
    }

    /// Entry currently open, if any.
    pub fn current(&self) -> Option<&LogEntry> {
        self.current.as_ref()
    }

    /// Flushes the open entry and returns the finalized entries.
    pub fn finish(mut self) -> (ReportBucket, ParseStats) {
        self.finalize_current();
        (self.bucket, self.stats)
    }
}
