use crate::domain::LogFormat;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    /// Starts a new entry.
    Header,
    /// Belongs to the entry currently open, if any.
    Continuation,
}

/// Decides whether a physical line starts a new entry.
///
/// A header begins with the year prefix and carries a space-delimited level
/// name within its leading window. Everything else is a continuation.
pub struct LineClassifier<'a> {
    format: &'a LogFormat,
}

impl<'a> LineClassifier<'a> {
    pub fn new(format: &'a LogFormat) -> Self {
        Self { format }
    }

    pub fn classify(&self, line: &str) -> LineKind {
        if self.is_header(line) {
            LineKind::Header
        } else {
            LineKind::Continuation
        }
    }

    pub fn is_header(&self, line: &str) -> bool {
        if !line.starts_with(self.format.year_prefix.as_str()) {
            return false;
        }

        let window = leading_window(line, self.format.header_window);
        self.format
            .levels
            .markers()
            .iter()
            .any(|marker| window.contains(marker.as_str()))
    }
}

/// First `chars` characters of `line`, cut on a char boundary.
fn leading_window(line: &str, chars: usize) -> &str {
    match line.char_indices().nth(chars) {
        Some((end, _)) => &line[..end],
        None => line,
    }
}
