//! Movie Types
//!
//! Read-only shapes received from the movie metadata API and the counter
//! store. Nothing here is owned locally beyond the id used as a list key.

use serde::{Deserialize, Deserializer, Serialize};

/// Base URL for poster images (w500 rendition)
pub const POSTER_BASE_URL: &str = "https://image.tmdb.org/t/p/w500";

/// Placeholder for missing year / rating values
const NOT_AVAILABLE: &str = "N/A";

/// A movie as returned by the metadata API
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    /// Provider identifier (list key)
    pub id: u64,
    /// Display title
    pub title: String,
    /// Poster path relative to the image CDN (e.g. `/abc.jpg`)
    #[serde(default)]
    pub poster_path: Option<String>,
    /// ISO 639-1 language code, empty when the API has none
    #[serde(default, deserialize_with = "null_as_default")]
    pub original_language: String,
    /// Release date as `YYYY-MM-DD`, possibly empty
    #[serde(default)]
    pub release_date: Option<String>,
    /// Average vote, 0-10
    #[serde(default)]
    pub vote_average: Option<f64>,
}

impl Movie {
    /// Create a movie with only an id and title set
    pub fn new(id: u64, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            poster_path: None,
            original_language: String::new(),
            release_date: None,
            vote_average: None,
        }
    }

    /// Full poster URL, if the movie has a poster
    #[must_use]
    pub fn poster_url(&self) -> Option<String> {
        self.poster_path
            .as_deref()
            .filter(|p| !p.is_empty())
            .map(|p| format!("{POSTER_BASE_URL}{p}"))
    }

    /// Original language, upper-cased for display
    #[must_use]
    pub fn language_label(&self) -> String {
        self.original_language.to_uppercase()
    }

    /// Release year, or "N/A"
    #[must_use]
    pub fn release_year(&self) -> &str {
        match self.release_date.as_deref() {
            Some(date) if !date.is_empty() => date.split('-').next().unwrap_or(NOT_AVAILABLE),
            _ => NOT_AVAILABLE,
        }
    }

    /// Average vote with one decimal, or "N/A" when absent or zero
    #[must_use]
    pub fn rating_label(&self) -> String {
        match self.vote_average {
            Some(vote) if vote != 0.0 => format!("{vote:.1}"),
            _ => NOT_AVAILABLE.to_string(),
        }
    }
}

/// Treat an explicit `null` like a missing field
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// Envelope for discover and search responses
#[derive(Clone, Debug, Deserialize)]
pub struct MovieListResponse {
    /// Result page
    pub results: Vec<Movie>,
}

/// A ranked entry from the counter store
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TrendingEntry {
    /// Normalized search text this entry counts
    pub search_term: String,
    /// How many times the search produced results
    pub count: u64,
    /// Top result recorded for the search
    pub movie_id: u64,
    /// Title of the top result
    pub title: String,
    /// Poster URL of the top result
    pub poster_url: Option<String>,
}
