//! Line classification and entry building.
//!
//! - `LineClassifier`: header line or continuation line
//! - `HeaderTokens`: validated positional fields of a header line
//! - `EntryBuilder`: header line + filters -> `LogEntry` or a skip

pub mod builder;
pub mod classifier;
pub mod error;
pub mod generated;
pub mod header;
pub mod regex_error;
pub mod regex_patterns;

pub use builder::{AccessLine, BuildOutcome, EntryBuilder, FilterConfig, RequestTimings, SkipReason};
pub use classifier::{LineClassifier, LineKind};
pub use error::ParseError;
pub use header::HeaderTokens;
pub use regex_error::RegexError;
