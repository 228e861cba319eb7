//! Domain layer for odoo-log-analyzer.
//!
//! Contains the canonical types shared across all modules:
//! - `LogEntry`: a finalized message or request entry
//! - `LevelTable` / `LogFormat`: the immutable description of the log format
//! - `AnalyzerError`: top-level error type

pub mod error;
pub mod format;
pub mod log_entry;
pub mod log_level;

pub use error::AnalyzerError;
pub use format::LogFormat;
pub use log_entry::{Category, EntryHeader, LogEntry, MessageEntry, REQUEST_KEY, RequestEntry};
pub use log_level::{LevelTable, STANDARD_LEVELS, SeverityFilter};
