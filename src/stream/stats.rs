use serde::Serialize;

/// Counters of one reconstruction pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ParseStats {
    pub lines_read: u64,
    pub bytes_read: u64,
    pub header_lines: u64,
    pub continuation_lines_kept: u64,
    pub continuation_lines_dropped: u64,
    /// Headers dropped by a filter (no database, threshold, severity...).
    pub skipped_headers: u64,
    pub malformed_headers: u64,
    pub encoding_errors: u64,
    pub entries_finalized: u64,
}

impl ParseStats {
    pub fn recoverable_errors(&self) -> u64 {
        self.malformed_headers + self.encoding_errors
    }
}
