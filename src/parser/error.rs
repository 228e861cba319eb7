use thiserror::Error;

/// Per-line parse failures. None of them stops a run.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("Malformed header at line {line}: {reason}")]
    MalformedHeader { line: u64, reason: String },

    #[error("Line {line} is not valid UTF-8")]
    Encoding { line: u64 },
}

impl ParseError {
    pub fn malformed(line: u64, reason: impl Into<String>) -> Self {
        ParseError::MalformedHeader {
            line,
            reason: reason.into(),
        }
    }

    /// Line number (1-based) the error was raised for.
    pub fn line(&self) -> u64 {
        match self {
            ParseError::MalformedHeader { line, .. } | ParseError::Encoding { line } => *line,
        }
    }
}
