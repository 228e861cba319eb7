//! Single pass over a log file: physical lines in, finalized entries out.

pub mod progress;
pub mod reconstructor;
pub mod stats;

pub use progress::{NoProgress, ProgressObserver, ProgressTracker};
pub use reconstructor::EntryStreamReconstructor;
pub use stats::ParseStats;

use crate::domain::{AnalyzerError, LogFormat};
use crate::parser::FilterConfig;
use crate::report::ReportBucket;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::{debug, info};

/// Result of reading one log file.
#[derive(Debug, Clone, Default)]
pub struct Analysis {
    pub bucket: ReportBucket,
    pub stats: ParseStats,
}

/// Reads `path` to completion and buckets every entry that passes `filter`.
///
/// When `filter` can capture nothing the file is not opened at all.
pub fn analyze_file(
    path: &Path,
    format: &LogFormat,
    filter: &FilterConfig,
    progress: &mut dyn ProgressObserver,
) -> Result<Analysis, AnalyzerError> {
    if !filter.captures_anything() {
        debug!("Neither requests nor messages can be captured, skipping {}", path.display());
        return Ok(Analysis::default());
    }

    let file = File::open(path).map_err(|e| AnalyzerError::file_access(path, e))?;
    let total = file
        .metadata()
        .map_err(|e| AnalyzerError::file_access(path, e))?
        .len();

    info!(path = %path.display(), bytes = total, "Reading log file");
    let analysis = read_log(BufReader::new(file), total, format, filter, progress)
        .map_err(|e| AnalyzerError::file_access(path, e))?;

    info!(
        lines = analysis.stats.lines_read,
        entries = analysis.stats.entries_finalized,
        malformed = analysis.stats.malformed_headers,
        encoding_errors = analysis.stats.encoding_errors,
        "Finished reading log file"
    );
    Ok(analysis)
}

/// Drives the reconstructor over any buffered reader.
///
/// `total` is the expected input size in bytes, used only for progress.
pub fn read_log<R: BufRead>(
    mut reader: R,
    total: u64,
    format: &LogFormat,
    filter: &FilterConfig,
    progress: &mut dyn ProgressObserver,
) -> std::io::Result<Analysis> {
    let mut reconstructor = EntryStreamReconstructor::new(format, filter);
    let mut tracker = ProgressTracker::new(total);
    let mut buf = Vec::with_capacity(1024);

    loop {
        buf.clear();
        let read = reader.read_until(b'\n', &mut buf)?;
        if read == 0 {
            break;
        }
        reconstructor.push_bytes(&buf);
        tracker.advance(read as u64, progress);
    }
    progress.on_finish();

    let (bucket, stats) = reconstructor.finish();
    Ok(Analysis { bucket, stats })
}
