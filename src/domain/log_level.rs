use serde::{Deserialize, Serialize};

/// The standard severity scale with its numeric ranks.
pub const STANDARD_LEVELS: &[(&str, u32)] = &[
    ("CRITICAL", 50),
    ("FATAL", 50),
    ("ERROR", 40),
    ("WARN", 30),
    ("WARNING", 30),
    ("INFO", 20),
    ("DEBUG", 10),
    ("NOTSET", 0),
];

/// Severity names recognised in header lines.
///
/// Built once at startup and shared by reference; the classifier scans for
/// the precomputed ` NAME ` markers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelTable {
    levels: Vec<(String, u32)>,
    markers: Vec<String>,
}

impl Default for LevelTable {
    fn default() -> Self {
        Self::standard()
    }
}

impl LevelTable {
    pub fn standard() -> Self {
        Self::new(STANDARD_LEVELS.iter().map(|(name, rank)| (*name, *rank)))
    }

    pub fn new<I, S>(levels: I) -> Self
    where
        I: IntoIterator<Item = (S, u32)>,
        S: Into<String>,
    {
        let levels: Vec<(String, u32)> = levels
            .into_iter()
            .map(|(name, rank)| (name.into(), rank))
            .collect();
        let markers = levels.iter().map(|(name, _)| format!(" {name} ")).collect();
        Self { levels, markers }
    }

    /// Rank of a level name. Unknown names rank 0.
    pub fn rank(&self, name: &str) -> u32 {
        self.levels
            .iter()
            .find(|(level, _)| level == name)
            .map_or(0, |(_, rank)| *rank)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.levels.iter().any(|(level, _)| level == name)
    }

    /// ` NAME ` strings searched for in a header window.
    pub fn markers(&self) -> &[String] {
        &self.markers
    }
}

/// Minimum severity a message entry needs to be kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeverityFilter {
    AtLeast(u32),
    /// Capture no message entries at all.
    Nothing,
}

impl SeverityFilter {
    pub fn admits(&self, rank: u32) -> bool {
        match self {
            SeverityFilter::AtLeast(min) => rank >= *min,
            SeverityFilter::Nothing => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_ranks() {
        let table = LevelTable::standard();
        assert_eq!(table.rank("CRITICAL"), 50);
        assert_eq!(table.rank("WARNING"), 30);
        assert_eq!(table.rank("WARN"), 30);
        assert_eq!(table.rank("INFO"), 20);
        assert_eq!(table.rank("NOTSET"), 0);
    }

    #[test]
    fn test_unknown_level_ranks_zero() {
        let table = LevelTable::standard();
        assert_eq!(table.rank("TRACE"), 0);
        assert!(!table.contains("TRACE"));
    }

    #[test]
    fn test_markers_are_space_delimited() {
        let table = LevelTable::new([("INFO", 20)]);
        assert_eq!(table.markers(), &[" INFO ".to_string()]);
    }

    #[test]
    fn test_severity_filter() {
        assert!(SeverityFilter::AtLeast(20).admits(20));
        assert!(SeverityFilter::AtLeast(20).admits(40));
        assert!(!SeverityFilter::AtLeast(20).admits(10));
        assert!(SeverityFilter::AtLeast(0).admits(0));
        assert!(!SeverityFilter::Nothing.admits(50));
    }
}
