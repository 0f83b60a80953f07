//! TMDB Catalog Implementation
//!
//! Movie catalog backed by The Movie Database v3 REST API.
//!
//! # TMDB API
//!
//! - `GET /discover/movie?sort_by=popularity.desc` - popular listing
//! - `GET /search/movie?query=...` - title search
//!
//! Both are authenticated with a v4 read access token sent as a bearer
//! credential, and both answer `{ "results": [...] }`.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{ACCEPT, AUTHORIZATION};

use super::query::MovieQuery;
use super::traits::{CatalogError, MovieCatalog};
use crate::config::CatalogConfig;
use crate::movie::{Movie, MovieListResponse};

/// Longest error body kept for the operator log
const MAX_ERROR_BODY: usize = 512;

/// TMDB catalog client
#[derive(Clone)]
pub struct TmdbCatalog {
    /// API root, e.g. `https://api.themoviedb.org/3/`
    base_url: String,
    /// Bearer token (may be empty; the API then answers 401)
    api_token: String,
    /// HTTP client
    http_client: reqwest::Client,
}

impl std::fmt::Debug for TmdbCatalog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TmdbCatalog")
            .field("base_url", &self.base_url)
            .field("api_token", &"<redacted>")
            .finish_non_exhaustive()
    }
}

impl TmdbCatalog {
    /// Create a new TMDB client
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built (TLS backend
    /// initialization failure).
    pub fn new(
        base_url: impl Into<String>,
        api_token: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, CatalogError> {
        Ok(Self {
            base_url: base_url.into(),
            api_token: api_token.into(),
            http_client: reqwest::Client::builder().timeout(timeout).build()?,
        })
    }

    /// Create from the `[catalog]` configuration section
    ///
    /// # Errors
    ///
    /// See [`TmdbCatalog::new`].
    pub fn from_config(config: &CatalogConfig) -> Result<Self, CatalogError> {
        Self::new(
            config.base_url.clone(),
            config.api_token.clone().unwrap_or_default(),
            config.request_timeout,
        )
    }

    /// Whether a credential was supplied at all
    #[must_use]
    pub fn has_token(&self) -> bool {
        !self.api_token.is_empty()
    }
}

#[async_trait]
impl MovieCatalog for TmdbCatalog {
    fn name(&self) -> &'static str {
        "TMDB"
    }

    async fn fetch(&self, query: &MovieQuery) -> Result<Vec<Movie>, CatalogError> {
        let url = query.url(&self.base_url)?;
        tracing::debug!(url = %url, "Requesting movies");

        let response = self
            .http_client
            .get(url)
            .header(ACCEPT, "application/json")
            .header(AUTHORIZATION, format!("Bearer {}", self.api_token))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let mut body = response.text().await.unwrap_or_default();
            truncate_body(&mut body);
            return Err(CatalogError::Http {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = response.bytes().await?;
        let data: MovieListResponse =
            serde_json::from_slice(&bytes).map_err(|e| CatalogError::Parse(e.to_string()))?;

        Ok(data.results)
    }
}

/// Cut an error body down to [`MAX_ERROR_BODY`] bytes on a char boundary
fn truncate_body(body: &mut String) {
    if body.len() > MAX_ERROR_BODY {
        let mut end = MAX_ERROR_BODY;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        body.truncate(end);
    }
}
