// Lazily compiled static regex set
use super::regex_error::RegexError;
use regex::Regex;
use std::sync::OnceLock;

/// Static regex pattern set, validated by `build.rs` and compiled on first use
pub struct StaticRegexSet {
    patterns: &'static [(&'static str, &'static str)], // (pattern, name)
    compiled: OnceLock<Result<Vec<Regex>, RegexError>>,
}

impl StaticRegexSet {
    pub const fn new(patterns: &'static [(&'static str, &'static str)]) -> Self {
        Self {
            patterns,
            compiled: OnceLock::new(),
        }
    }

    pub fn get(&self, index: usize) -> Result<&Regex, RegexError> {
        let compiled = self.compiled.get_or_init(|| {
            self.patterns
                .iter()
                .map(|(pattern, name)| {
                    Regex::new(pattern).map_err(|source| RegexError::CompilationFailed {
                        pattern: (*pattern).to_string(),
                        name: (*name).to_string(),
                        source,
                    })
                })
                .collect()
        });

        match compiled {
            Ok(regexes) => regexes.get(index).ok_or(RegexError::IndexOutOfBounds {
                index,
                max: regexes.len(),
            }),
            Err(e) => Err(e.clone()),
        }
    }

    pub fn get_by_name(&self, name: &str) -> Result<&Regex, RegexError> {
        let index = self
            .patterns
            .iter()
            .position(|(_, pattern_name)| *pattern_name == name)
            .ok_or_else(|| RegexError::PatternNotFound {
                name: name.to_string(),
            })?;

        self.get(index)
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    pub fn pattern_names(&self) -> Vec<&'static str> {
        self.patterns.iter().map(|(_, name)| *name).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    static BROKEN: StaticRegexSet = StaticRegexSet::new(&[(r"^(unclosed", "broken")]);
    static SMALL: StaticRegexSet = StaticRegexSet::new(&[(r"^\d+$", "digits")]);

    #[test]
    fn test_invalid_pattern_reports_compilation_failure() {
        assert!(matches!(
            BROKEN.get(0),
            Err(RegexError::CompilationFailed { .. })
        ));
    }

    #[test]
    fn test_out_of_range_index() {
        assert!(matches!(
            SMALL.get(1),
            Err(RegexError::IndexOutOfBounds { index: 1, max: 1 })
        ));
        assert!(SMALL.get(0).unwrap().is_match("12345"));
    }
}
