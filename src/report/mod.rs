//! Bucketing and ranking of finalized entries, plus their text/JSON rendering.

pub mod aggregator;
pub mod bucket;
pub mod render;

pub use aggregator::{
    AggregateReport, DEFAULT_TOP_N, EndpointRow, EndpointStat, EndpointStats, RequestAggregator,
    SlowRequestRow, normalize_endpoint, top_slow_requests,
};
pub use bucket::{CategoryCount, ReportBucket};
pub use render::{JsonReport, write_json, write_summary, write_table, write_tables};
