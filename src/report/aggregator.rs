use super::bucket::{CategoryCount, ReportBucket};
use crate::domain::RequestEntry;
use crate::parser::generated::{VALIDATED_PATTERNS, pattern_index};
use chrono::NaiveDateTime;
use serde::Serialize;
use std::borrow::Cow;
use std::collections::HashMap;
use tracing::debug;

pub const DEFAULT_TOP_N: usize = 10;

/// Drops a leading `/xx_YY/` locale segment so localized and plain URLs
/// of the same page share one key.
pub fn normalize_endpoint(endpoint: &str) -> Cow<'_, str> {
    match VALIDATED_PATTERNS.get(pattern_index::LOCALE_PREFIX) {
        Ok(regex) => regex.replace(endpoint, "/"),
        Err(e) => {
            debug!("Locale pattern unavailable: {}, keeping endpoint as is", e);
            Cow::Borrowed(endpoint)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SlowRequestRow {
    pub endpoint: String,
    pub method: String,
    pub status: String,
    pub ip: String,
    pub timestamp: NaiveDateTime,
    pub total_time: f64,
    pub sql_time: f64,
    pub other_time: f64,
    pub query_count: u64,
}

impl From<&RequestEntry> for SlowRequestRow {
    fn from(entry: &RequestEntry) -> Self {
        Self {
            endpoint: entry.endpoint.clone(),
            method: entry.method.clone(),
            status: entry.status.clone(),
            ip: entry.ip.clone(),
            timestamp: entry.header.timestamp,
            total_time: entry.total_time(),
            sql_time: entry.sql_time,
            other_time: entry.other_time,
            query_count: entry.query_count,
        }
    }
}

/// The `n` slowest requests, slowest first. Ties keep file order.
pub fn top_slow_requests<'a, I>(requests: I, n: usize) -> Vec<SlowRequestRow>
where
    I: IntoIterator<Item = &'a RequestEntry>,
{
    let mut sorted: Vec<&RequestEntry> = requests.into_iter().collect();
    sorted.sort_by(|a, b| b.total_time().total_cmp(&a.total_time()));
    sorted.into_iter().take(n).map(SlowRequestRow::from).collect()
}

/// Hit count and running mean of total time for one endpoint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct EndpointStat {
    pub hits: u64,
    pub average_time: f64,
}

impl EndpointStat {
    /// Online mean update; no samples are kept.
    pub fn record(&mut self, total_time: f64) {
        let hits = self.hits as f64;
        self.average_time = (self.average_time * hits + total_time) / (hits + 1.0);
        self.hits += 1;
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EndpointRow {
    pub endpoint: String,
    pub hits: u64,
    pub average_time: f64,
}

/// Per-endpoint statistics in first-seen order.
#[derive(Debug, Clone, Default)]
pub struct EndpointStats {
    index: HashMap<String, usize>,
    entries: Vec<(String, EndpointStat)>,
}

impl EndpointStats {
    pub fn from_requests<'a, I>(requests: I) -> Self
    where
        I: IntoIterator<Item = &'a RequestEntry>,
    {
        let mut stats = Self::default();
        for request in requests {
            stats.record_request(request);
        }
        stats
    }

    pub fn record_request(&mut self, request: &RequestEntry) {
        let endpoint = normalize_endpoint(&request.endpoint);
        self.record(&endpoint, request.total_time());
    }

    /// Records one sample under an already normalized endpoint.
    pub fn record(&mut self, endpoint: &str, total_time: f64) {
        let slot = match self.index.get(endpoint) {
            Some(slot) => *slot,
            None => {
                self.entries.push((endpoint.to_string(), EndpointStat::default()));
                self.index.insert(endpoint.to_string(), self.entries.len() - 1);
                self.entries.len() - 1
            }
        };
        self.entries[slot].1.record(total_time);
    }

    pub fn get(&self, endpoint: &str) -> Option<&EndpointStat> {
        self.index.get(endpoint).map(|slot| &self.entries[*slot].1)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &EndpointStat)> {
        self.entries
            .iter()
            .map(|(endpoint, stat)| (endpoint.as_str(), stat))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Endpoints with the highest average time first.
    pub fn slowest(&self, n: usize) -> Vec<EndpointRow> {
        self.ranked(n, |a, b| b.average_time.total_cmp(&a.average_time))
    }

    /// Endpoints with the most hits first.
    pub fn most_hit(&self, n: usize) -> Vec<EndpointRow> {
        self.ranked(n, |a, b| b.hits.cmp(&a.hits))
    }

    fn ranked<F>(&self, n: usize, compare: F) -> Vec<EndpointRow>
    where
        F: Fn(&EndpointStat, &EndpointStat) -> std::cmp::Ordering,
    {
        let mut sorted: Vec<&(String, EndpointStat)> = self.entries.iter().collect();
        sorted.sort_by(|(_, a), (_, b)| compare(a, b));
        sorted
            .into_iter()
            .take(n)
            .map(|(endpoint, stat)| EndpointRow {
                endpoint: endpoint.clone(),
                hits: stat.hits,
                average_time: stat.average_time,
            })
            .collect()
    }
}

/// Everything the presentation layer needs from one run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregateReport {
    pub summary: Vec<CategoryCount>,
    pub slow_requests: Vec<SlowRequestRow>,
    pub slow_endpoints: Vec<EndpointRow>,
    pub most_hit_endpoints: Vec<EndpointRow>,
}

/// Ranks the request bucket. Holds no state between runs.
#[derive(Debug, Clone, Copy)]
pub struct RequestAggregator {
    top_n: usize,
}

impl Default for RequestAggregator {
    fn default() -> Self {
        Self::new(DEFAULT_TOP_N)
    }
}

impl RequestAggregator {
    pub fn new(top_n: usize) -> Self {
        Self { top_n }
    }

    pub fn aggregate(&self, bucket: &ReportBucket) -> AggregateReport {
        let endpoints = EndpointStats::from_requests(bucket.requests());
        debug!(
            requests = bucket.requests().count(),
            endpoints = endpoints.len(),
            "Aggregated request bucket"
        );

        AggregateReport {
            summary: bucket.counts(),
            slow_requests: top_slow_requests(bucket.requests(), self.top_n),
            slow_endpoints: endpoints.slowest(self.top_n),
            most_hit_endpoints: endpoints.most_hit(self.top_n),
        }
    }
}
