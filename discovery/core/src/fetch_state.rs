//! Fetch State
//!
//! The result panel is always in exactly one of four states. Each completed
//! request replaces the state wholesale, so "loading and errored" or "errored
//! with stale results" cannot be represented.
//!
//! ```text
//!            fetch issued
//!   any ─────────────────────▶ Loading
//!                                 │
//!         ┌───────────────────────┼──────────────────────┐
//!   ok, ≥1 result           ok, 0 results            failure
//!         ▼                       ▼                      ▼
//!   Success(list)               Empty          Error("Error Fetching Movies")
//! ```

use serde::{Deserialize, Serialize};

use crate::catalog::CatalogError;
use crate::movie::Movie;

/// User-facing text for any catalog failure
pub const FETCH_ERROR_MESSAGE: &str = "Error Fetching Movies";

/// User-facing text for a successful search with no results
pub const NO_RESULTS_MESSAGE: &str = "No Movies Found";

/// State of the results panel
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub enum FetchState {
    /// A request is in flight
    #[default]
    Loading,
    /// The request returned at least one movie
    Success(Vec<Movie>),
    /// The request succeeded with zero results
    Empty,
    /// The request failed; carries the fixed user-facing message
    Error(String),
}

impl FetchState {
    /// Classify a completed catalog call
    ///
    /// The error detail is dropped here; callers log it before converting.
    #[must_use]
    pub fn from_result(result: &Result<Vec<Movie>, CatalogError>) -> Self {
        match result {
            Ok(movies) if movies.is_empty() => Self::Empty,
            Ok(movies) => Self::Success(movies.clone()),
            Err(_) => Self::Error(FETCH_ERROR_MESSAGE.to_string()),
        }
    }

    /// Whether a request is in flight
    #[must_use]
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    /// Movies to display (empty unless `Success`)
    #[must_use]
    pub fn movies(&self) -> &[Movie] {
        match self {
            Self::Success(movies) => movies,
            _ => &[],
        }
    }

    /// Message to show in place of the grid, if any
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Empty => Some(NO_RESULTS_MESSAGE),
            Self::Error(message) => Some(message),
            Self::Loading | Self::Success(_) => None,
        }
    }

    /// Short state name for logs and status bars
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Loading => "loading",
            Self::Success(_) => "success",
            Self::Empty => "empty",
            Self::Error(_) => "error",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classification() {
        let ok = Ok(vec![Movie::new(1, "Heat"), Movie::new(2, "Ronin")]);
        let state = FetchState::from_result(&ok);
        assert_eq!(state.movies().len(), 2);
        assert_eq!(state.message(), None);

        assert_eq!(FetchState::from_result(&Ok(vec![])), FetchState::Empty);

        let err = Err(CatalogError::Http {
            status: 500,
            body: "upstream exploded".to_string(),
        });
        let state = FetchState::from_result(&err);
        assert_eq!(state, FetchState::Error("Error Fetching Movies".to_string()));
        // Detail never leaks into the user-visible message
        assert!(!state.message().unwrap().contains("upstream"));
    }

    #[test]
    fn test_loading_is_exclusive() {
        assert!(FetchState::default().is_loading());
        for state in [
            FetchState::Success(vec![Movie::new(1, "Heat")]),
            FetchState::Empty,
            FetchState::Error(FETCH_ERROR_MESSAGE.to_string()),
        ] {
            assert!(!state.is_loading(), "{} should not be loading", state.label());
        }
        assert_eq!(FetchState::Loading.message(), None);
    }

    #[test]
    fn test_empty_message() {
        assert_eq!(FetchState::Empty.message(), Some("No Movies Found"));
        assert!(FetchState::Empty.movies().is_empty());
    }
}
