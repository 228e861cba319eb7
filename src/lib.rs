// Specific pedantic lints enforced (not blanket allow):
#![deny(
    clippy::explicit_iter_loop,
    clippy::manual_let_else,
    clippy::semicolon_if_nothing_returned,
    clippy::inconsistent_struct_constructor
)]
// Noisy pedantic lints suppressed with justification:
#![allow(
    clippy::cast_possible_truncation, // Percentages are clamped to 0..=100
    clippy::cast_precision_loss,      // Byte counts and hit counts as f64 for display/averages
    clippy::missing_errors_doc,       // Internal API
    clippy::module_name_repetitions,  // e.g. ParseError in parser module
    clippy::must_use_candidate,       // Annotated selectively on critical APIs
    clippy::doc_markdown              // Internal API
)]

pub mod app;
pub mod domain;
pub mod parser;
pub mod report;
pub mod stream;

pub use app::{App, Config};
pub use domain::{AnalyzerError, Category, LogEntry, LogFormat};
pub use parser::FilterConfig;
pub use report::{AggregateReport, ReportBucket};
pub use stream::{Analysis, analyze_file};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
