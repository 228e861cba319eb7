use crate::domain::{Category, LogEntry, RequestEntry};
use serde::Serialize;

/// Finalized entries per category, categories in first-seen order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReportBucket {
    categories: Vec<(Category, Vec<LogEntry>)>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryCount {
    pub category: Category,
    pub count: usize,
}

impl ReportBucket {
    pub fn push(&mut self, entry: LogEntry) {
        let category = entry.category();
        match self.categories.iter_mut().find(|(key, _)| *key == category) {
            Some((_, entries)) => entries.push(entry),
            None => self.categories.push((category, vec![entry])),
        }
    }

    /// Entries of one category in file order; empty when the category never appeared.
    pub fn get(&self, category: &Category) -> &[LogEntry] {
        self.categories
            .iter()
            .find(|(key, _)| key == category)
            .map(|(_, entries)| entries.as_slice())
            .unwrap_or_default()
    }

    pub fn requests(&self) -> impl Iterator<Item = &RequestEntry> {
        self.get(&Category::Request)
            .iter()
            .filter_map(LogEntry::as_request)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Category, &[LogEntry])> {
        self.categories
            .iter()
            .map(|(category, entries)| (category, entries.as_slice()))
    }

    pub fn counts(&self) -> Vec<CategoryCount> {
        self.iter()
            .map(|(category, entries)| CategoryCount {
                category: category.clone(),
                count: entries.len(),
            })
            .collect()
    }

    pub fn total_entries(&self) -> usize {
        self.categories.iter().map(|(_, entries)| entries.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}
