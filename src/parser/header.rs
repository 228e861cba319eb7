use chrono::NaiveDateTime;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Positional fields of a header line.
///
/// `date time pid level db logger: message...`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderTokens<'a> {
    pub date: &'a str,
    pub time: &'a str,
    pub pid: &'a str,
    pub level: &'a str,
    pub db: &'a str,
    /// Logger name with its trailing `:` removed.
    pub logger: &'a str,
    pub message: Vec<&'a str>,
}

impl<'a> HeaderTokens<'a> {
    /// Splits a header on whitespace. Only the token count is checked here;
    /// `pid` and the timestamp are validated by their accessors.
    pub fn parse(line: &'a str) -> Result<Self, String> {
        let mut tokens = line.split_whitespace();
        let mut next = |field: &str| {
            tokens
                .next()
                .ok_or_else(|| format!("header has no {field} field"))
        };

        let date = next("date")?;
        let time = next("time")?;
        let pid = next("pid")?;
        let level = next("level")?;
        let db = next("database")?;
        let logger = next("logger")?;
        let logger = logger.strip_suffix(':').unwrap_or(logger);

        Ok(Self {
            date,
            time,
            pid,
            level,
            db,
            logger,
            message: tokens.collect(),
        })
    }

    /// Date and time with fractional seconds dropped.
    pub fn timestamp(&self) -> Result<NaiveDateTime, String> {
        let whole_seconds = self
            .time
            .split(['.', ','])
            .next()
            .unwrap_or(self.time);
        let text = format!("{} {}", self.date, whole_seconds);
        NaiveDateTime::parse_from_str(&text, TIMESTAMP_FORMAT)
            .map_err(|e| format!("invalid timestamp '{text}': {e}"))
    }

    pub fn pid(&self) -> Result<u32, String> {
        self.pid
            .parse()
            .map_err(|e| format!("pid '{}' is not a number: {e}", self.pid))
    }

    /// Message tokens joined by single spaces.
    pub fn message_text(&self) -> String {
        self.message.join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    #[test]
    fn test_parse_positions() {
        let tokens = HeaderTokens::parse(
            "2024-01-01 10:00:00,123 4321 ERROR prod odoo.sql_db: bad query: SELECT 1",
        )
        .unwrap();

        assert_eq!(tokens.date, "2024-01-01");
        assert_eq!(tokens.pid, "4321");
        assert_eq!(tokens.level, "ERROR");
        assert_eq!(tokens.db, "prod");
        assert_eq!(tokens.logger, "odoo.sql_db");
        assert_eq!(tokens.message_text(), "bad query: SELECT 1");
    }

    #[test]
    fn test_timestamp_drops_fraction() {
        let tokens =
            HeaderTokens::parse("2024-01-01 10:00:59,999 1 INFO db odoo: x").unwrap();
        let timestamp = tokens.timestamp().unwrap();
        assert_eq!(timestamp.second(), 59);
        assert_eq!(timestamp.nanosecond(), 0);

        let dotted = HeaderTokens::parse("2024-01-01 10:00:59.5 1 INFO db odoo: x").unwrap();
        assert_eq!(dotted.timestamp().unwrap(), timestamp);
    }

    #[test]
    fn test_too_few_tokens() {
        let err = HeaderTokens::parse("2024-01-01 10:00:00,000 123 INFO").unwrap_err();
        assert!(err.contains("database"));
    }

    #[test]
    fn test_empty_message_is_allowed() {
        let tokens = HeaderTokens::parse("2024-01-01 10:00:00,000 123 INFO db odoo:").unwrap();
        assert!(tokens.message.is_empty());
        assert_eq!(tokens.message_text(), "");
    }

    #[test]
    fn test_invalid_pid_and_timestamp() {
        let tokens = HeaderTokens::parse("2024-13-01 10:00:00,000 abc INFO db odoo: x").unwrap();
        assert!(tokens.pid().unwrap_err().contains("abc"));
        assert!(tokens.timestamp().is_err());
    }
}
