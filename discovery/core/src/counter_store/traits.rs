//! Counter Store Traits

use async_trait::async_trait;
use thiserror::Error;

use crate::movie::{Movie, TrendingEntry};

/// Failures talking to the counter store
///
/// These never reach the user; callers log them and move on.
#[derive(Debug, Error)]
pub enum CounterStoreError {
    /// Network or body read failure
    #[error("transport failure: {0}")]
    Transport(#[from] reqwest::Error),

    /// Non-2xx status from the store
    #[error("counter store returned {status}: {body}")]
    Http {
        /// HTTP status code
        status: u16,
        /// Response body
        body: String,
    },

    /// Response body did not match the expected shape
    #[error("malformed counter store response: {0}")]
    Parse(String),
}

/// Counter store trait
#[async_trait]
pub trait CounterStore: Send + Sync {
    /// Store name for logs (e.g., "Appwrite")
    fn name(&self) -> &str;

    /// Count one more occurrence of `query`, remembering `top_result`
    ///
    /// Creates the entry with a count of 1 if the query was never recorded.
    async fn record_search(&self, query: &str, top_result: &Movie)
        -> Result<(), CounterStoreError>;

    /// Most frequently recorded searches, highest count first
    async fn list_trending(&self) -> Result<Vec<TrendingEntry>, CounterStoreError>;
}

/// Key under which a search is counted
///
/// Surrounding whitespace is ignored so "batman" and "batman " share a count.
#[must_use]
pub fn normalize_term(query: &str) -> &str {
    query.trim()
}
