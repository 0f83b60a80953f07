//! Movie Catalog Traits
//!
//! Trait definitions for the movie metadata backend. The discovery core only
//! needs one operation, so implementations stay small: TMDB over HTTP in
//! production, scripted mocks in tests.

use async_trait::async_trait;
use thiserror::Error;

use super::query::MovieQuery;
use crate::movie::Movie;

/// Failures talking to the catalog
///
/// Every variant collapses to the same user-visible error state; the detail
/// only reaches the operator log.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Network unreachable, DNS, timeout, or body read failure
    #[error("transport failure: {0}")]
    Transport(#[from] reqwest::Error),

    /// Non-2xx status from the API
    #[error("catalog returned {status}: {body}")]
    Http {
        /// HTTP status code
        status: u16,
        /// Response body (possibly truncated)
        body: String,
    },

    /// Response body did not match the expected shape
    #[error("malformed catalog response: {0}")]
    Parse(String),

    /// Configured base URL cannot be used
    #[error("invalid catalog URL {0}")]
    InvalidUrl(String),
}

/// Movie catalog trait
///
/// Implement this to plug a different metadata provider into the discovery
/// core.
#[async_trait]
pub trait MovieCatalog: Send + Sync {
    /// Backend name for logs (e.g., "TMDB")
    fn name(&self) -> &str;

    /// Run a query and return the result page
    ///
    /// An empty list is a successful response, not an error.
    async fn fetch(&self, query: &MovieQuery) -> Result<Vec<Movie>, CatalogError>;
}
