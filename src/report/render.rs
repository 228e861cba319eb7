use super::aggregator::AggregateReport;
use crate::stream::ParseStats;
use serde::Serialize;
use std::io::{self, Write};

/// `CATEGORY: count` per bucket, in first-seen order.
pub fn write_summary<W: Write>(out: &mut W, report: &AggregateReport) -> io::Result<()> {
    for count in &report.summary {
        writeln!(out, "{}: {}", count.category, count.count)?;
    }
    Ok(())
}

/// Boxed two-column table:
///
/// ```text
/// ==============
/// |   title    |
/// --------------
/// | /web | 1.5 |
/// --------------
/// ```
pub fn write_table<W: Write>(out: &mut W, title: &str, rows: &[(String, String)]) -> io::Result<()> {
    let field_width = rows.iter().map(|(field, _)| field.chars().count()).max().unwrap_or(0);
    let value_width = rows.iter().map(|(_, value)| value.chars().count()).max().unwrap_or(0);
    let width = (field_width + value_width + 7).max(title.chars().count() + 2);
    // Rows are padded so their right border lines up with a wide title
    let value_width = width - field_width - 7;

    writeln!(out, "{}", "=".repeat(width))?;
    writeln!(out, "|{:^inner$}|", title, inner = width - 2)?;
    writeln!(out, "{}", "-".repeat(width))?;
    for (field, value) in rows {
        writeln!(out, "| {field:<field_width$} | {value:<value_width$} |")?;
    }
    writeln!(out, "{}", "-".repeat(width))?;
    writeln!(out)
}

/// The three ranked tables.
pub fn write_tables<W: Write>(out: &mut W, report: &AggregateReport, top_n: usize) -> io::Result<()> {
    let slow_requests: Vec<(String, String)> = report
        .slow_requests
        .iter()
        .map(|row| (row.endpoint.clone(), row.total_time.to_string()))
        .collect();
    write_table(out, &format!("Top {top_n} Slow requests"), &slow_requests)?;

    let slow_endpoints: Vec<(String, String)> = report
        .slow_endpoints
        .iter()
        .map(|row| (row.endpoint.clone(), format!("{:.1}", row.average_time)))
        .collect();
    write_table(out, &format!("Top {top_n} slow endpoints"), &slow_endpoints)?;

    let most_hit: Vec<(String, String)> = report
        .most_hit_endpoints
        .iter()
        .map(|row| (row.endpoint.clone(), row.hits.to_string()))
        .collect();
    write_table(out, &format!("Top {top_n} most hit endpoints:"), &most_hit)
}

/// Machine-readable form of a run.
#[derive(Debug, Serialize)]
pub struct JsonReport<'a> {
    #[serde(flatten)]
    pub report: &'a AggregateReport,
    pub stats: &'a ParseStats,
}

pub fn write_json<W: Write>(
    out: &mut W,
    report: &AggregateReport,
    stats: &ParseStats,
) -> serde_json::Result<()> {
    serde_json::to_writer_pretty(&mut *out, &JsonReport { report, stats })?;
    writeln!(out).map_err(serde_json::Error::io)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Category;
    use crate::report::{CategoryCount, EndpointRow};

    fn render_table(title: &str, rows: &[(String, String)]) -> String {
        let mut out = Vec::new();
        write_table(&mut out, title, rows).unwrap();
        String::from_utf8(out).unwrap()
    }

    fn report() -> AggregateReport {
        AggregateReport {
            summary: vec![
                CategoryCount {
                    category: Category::level("ERROR"),
                    count: 2,
                },
                CategoryCount {
                    category: Category::Request,
                    count: 1,
                },
            ],
            slow_requests: Vec::new(),
            slow_endpoints: vec![EndpointRow {
                endpoint: "/shop".to_string(),
                hits: 2,
                average_time: 2.04,
            }],
            most_hit_endpoints: Vec::new(),
        }
    }

    #[test]
    fn test_table_layout() {
        let rows = vec![
            ("/web".to_string(), "1.5".to_string()),
            ("/shop/cart".to_string(), "12.25".to_string()),
        ];
        let text = render_table("T", &rows);
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "=".repeat(22));
        assert_eq!(lines[1], format!("|{:^20}|", "T"));
        assert_eq!(lines[3], "| /web       | 1.5   |");
        assert_eq!(lines[4], "| /shop/cart | 12.25 |");
        assert_eq!(lines[5], "-".repeat(22));
        assert_eq!(lines[6], "");
    }

    #[test]
    fn test_empty_table_keeps_frame() {
        let text = render_table("Top 10 slow endpoints", &[]);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 5);
        assert_eq!(lines[1], "|Top 10 slow endpoints|");
    }

    #[test]
    fn test_wide_title_keeps_borders_aligned() {
        let rows = vec![("/".to_string(), "1".to_string())];
        let text = render_table("A rather long title", &rows);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[1].chars().count(), lines[3].chars().count());
    }

    #[test]
    fn test_summary_and_tables() {
        let mut out = Vec::new();
        write_summary(&mut out, &report()).unwrap();
        write_tables(&mut out, &report(), 10).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.starts_with("ERROR: 2\nREQUEST: 1\n"));
        assert!(text.contains("Top 10 Slow requests"));
        assert!(text.contains("| /shop | 2.0 "));
        assert!(text.contains("|Top 10 most hit endpoints:|"));
    }

    #[test]
    fn test_json_report() {
        let mut out = Vec::new();
        let stats = ParseStats {
            lines_read: 7,
            ..ParseStats::default()
        };
        write_json(&mut out, &report(), &stats).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["summary"][0]["category"], "ERROR");
        assert_eq!(value["slow_endpoints"][0]["endpoint"], "/shop");
        assert_eq!(value["stats"]["lines_read"], 7);
    }
}
