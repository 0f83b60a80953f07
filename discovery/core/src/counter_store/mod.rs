//! Counter Store Integration
//!
//! The counter store tracks how often each search produced results and which
//! movie topped it. The discovery core treats it as a black box with two
//! operations: record a search, list the trending searches.
//!
//! # Available Stores
//!
//! - **Appwrite**: hosted backend-as-a-service (documents in one collection)
//! - **Memory**: process-lifetime store for offline runs and tests

mod appwrite;
mod memory;
mod traits;

pub use appwrite::AppwriteStore;
pub use memory::{MemoryStore, DEFAULT_TRENDING_LIMIT};
pub use traits::{normalize_term, CounterStore, CounterStoreError};

use std::sync::Arc;
use std::time::Duration;

use crate::config::CounterStoreConfig;

/// Build the configured counter store
///
/// Appwrite when a project is configured, otherwise the in-memory store.
///
/// # Errors
///
/// Returns an error if the Appwrite HTTP client cannot be built.
pub fn from_config(
    config: &CounterStoreConfig,
    timeout: Duration,
) -> Result<Arc<dyn CounterStore>, CounterStoreError> {
    match AppwriteStore::from_config(config, timeout)? {
        Some(store) => Ok(Arc::new(store)),
        None => {
            tracing::info!("No counter store project configured, using in-memory store");
            Ok(Arc::new(config.memory_store()))
        }
    }
}
