use chrono::NaiveDateTime;
use serde::{Serialize, Serializer};
use std::fmt;

/// Bucket key of request entries.
pub const REQUEST_KEY: &str = "REQUEST";

/// Key of a report bucket: a raw level name, or the request category.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Category {
    Request,
    Level(String),
}

impl Category {
    pub fn level(name: impl Into<String>) -> Self {
        Category::Level(name.into())
    }

    pub fn as_str(&self) -> &str {
        match self {
            Category::Request => REQUEST_KEY,
            Category::Level(name) => name,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Category {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Fields every header line carries.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EntryHeader {
    /// Date and time, truncated to whole seconds.
    pub timestamp: NaiveDateTime,
    pub pid: u32,
    /// Raw level token, or `REQUEST` for access lines.
    pub level: String,
    /// Database name, `?` when the line has none.
    pub db: String,
    pub logger: String,
}

/// A leveled message with the continuation lines that followed it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MessageEntry {
    #[serde(flatten)]
    pub header: EntryHeader,
    pub message: String,
    /// Continuation lines in file order, line terminators removed.
    pub context: Vec<String>,
}

/// One HTTP request with its timing breakdown.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RequestEntry {
    #[serde(flatten)]
    pub header: EntryHeader,
    pub ip: String,
    pub method: String,
    pub endpoint: String,
    pub status: String,
    pub sql_time: f64,
    pub other_time: f64,
    pub query_count: u64,
}

impl RequestEntry {
    /// Always `sql_time + other_time`; never stored separately.
    pub fn total_time(&self) -> f64 {
        self.other_time + self.sql_time
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LogEntry {
    Message(MessageEntry),
    Request(RequestEntry),
}

impl LogEntry {
    pub fn category(&self) -> Category {
        match self {
            LogEntry::Message(entry) => Category::level(entry.header.level.clone()),
            LogEntry::Request(_) => Category::Request,
        }
    }

    pub fn as_request(&self) -> Option<&RequestEntry> {
        match self {
            LogEntry::Request(entry) => Some(entry),
            LogEntry::Message(_) => None,
        }
    }

    pub fn as_message(&self) -> Option<&MessageEntry> {
        match self {
            LogEntry::Message(entry) => Some(entry),
            LogEntry::Request(_) => None,
        }
    }

    /// Appends a continuation line. Request entries never take context.
    pub fn push_context(&mut self, line: &str) -> bool {
        match self {
            LogEntry::Message(entry) => {
                entry.context.push(line.to_string());
                true
            }
            LogEntry::Request(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header(level: &str) -> EntryHeader {
        EntryHeader {
            timestamp: NaiveDateTime::parse_from_str("2024-01-01 10:00:00", "%Y-%m-%d %H:%M:%S")
                .unwrap(),
            pid: 123,
            level: level.to_string(),
            db: "mydb".to_string(),
            logger: "odoo.modules".to_string(),
        }
    }

    fn request() -> LogEntry {
        LogEntry::Request(RequestEntry {
            header: header(REQUEST_KEY),
            ip: "127.0.0.1".to_string(),
            method: "GET".to_string(),
            endpoint: "/web".to_string(),
            status: "200".to_string(),
            sql_time: 0.25,
            other_time: 0.5,
            query_count: 3,
        })
    }

    #[test]
    fn test_total_time_is_sum_of_components() {
        let entry = request();
        assert_eq!(entry.as_request().unwrap().total_time(), 0.75);
    }

    #[test]
    fn test_category_of_entries() {
        assert_eq!(request().category(), Category::Request);

        let message = LogEntry::Message(MessageEntry {
            header: header("WARNING"),
            message: "something odd".to_string(),
            context: Vec::new(),
        });
        assert_eq!(message.category(), Category::level("WARNING"));
        assert_eq!(message.category().to_string(), "WARNING");
    }

    #[test]
    fn test_request_entry_rejects_context() {
        let mut entry = request();
        assert!(!entry.push_context("Traceback (most recent call last):"));
    }

    #[test]
    fn test_message_entry_serializes_with_kind_tag() {
        let message = LogEntry::Message(MessageEntry {
            header: header("ERROR"),
            message: "boom".to_string(),
            context: vec!["line 1".to_string()],
        });

        let json = serde_json::to_value(&message).unwrap();
        assert_eq!(json["kind"], "message");
        assert_eq!(json["level"], "ERROR");
        assert_eq!(json["context"][0], "line 1");
    }
}
