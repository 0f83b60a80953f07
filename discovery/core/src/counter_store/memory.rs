//! In-Memory Counter Store
//!
//! Same upsert and top-N semantics as the hosted store, kept for the life of
//! the process. Used when no Appwrite project is configured.

use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use dashmap::DashMap;

use super::traits::{normalize_term, CounterStore, CounterStoreError};
use crate::movie::{Movie, TrendingEntry};

/// Default number of trending entries returned
pub const DEFAULT_TRENDING_LIMIT: usize = 5;

#[derive(Clone, Debug)]
struct Counter {
    entry: TrendingEntry,
    /// Creation order, breaks ties between equal counts
    order: u64,
}

/// Process-lifetime counter store
#[derive(Debug)]
pub struct MemoryStore {
    counters: DashMap<String, Counter>,
    next_order: AtomicU64,
    limit: usize,
}

impl MemoryStore {
    /// Create an empty store returning at most `limit` trending entries
    #[must_use]
    pub fn new(limit: usize) -> Self {
        Self {
            counters: DashMap::new(),
            next_order: AtomicU64::new(0),
            limit,
        }
    }

    /// Number of distinct searches recorded
    #[must_use]
    pub fn len(&self) -> usize {
        self.counters.len()
    }

    /// Whether nothing has been recorded yet
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.counters.is_empty()
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new(DEFAULT_TRENDING_LIMIT)
    }
}

#[async_trait]
impl CounterStore for MemoryStore {
    fn name(&self) -> &'static str {
        "Memory"
    }

    async fn record_search(
        &self,
        query: &str,
        top_result: &Movie,
    ) -> Result<(), CounterStoreError> {
        let term = normalize_term(query);
        self.counters
            .entry(term.to_string())
            .and_modify(|counter| counter.entry.count += 1)
            .or_insert_with(|| Counter {
                entry: TrendingEntry {
                    search_term: term.to_string(),
                    count: 1,
                    movie_id: top_result.id,
                    title: top_result.title.clone(),
                    poster_url: top_result.poster_url(),
                },
                order: self.next_order.fetch_add(1, Ordering::Relaxed),
            });
        Ok(())
    }

    async fn list_trending(&self) -> Result<Vec<TrendingEntry>, CounterStoreError> {
        let mut counters: Vec<Counter> = self
            .counters
            .iter()
            .map(|item| item.value().clone())
            .collect();
        counters.sort_by(|a, b| {
            b.entry
                .count
                .cmp(&a.entry.count)
                .then(a.order.cmp(&b.order))
        });
        Ok(counters
            .into_iter()
            .take(self.limit)
            .map(|counter| counter.entry)
            .collect())
    }
}
