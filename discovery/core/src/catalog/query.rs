//! Request Construction
//!
//! The catalog only knows two requests: the popular listing used when the
//! search box is empty, and a free-text search.

use reqwest::Url;

use super::traits::CatalogError;

/// Default TMDB API root (trailing slash required for joining)
pub const DEFAULT_BASE_URL: &str = "https://api.themoviedb.org/3/";

/// A request against the movie catalog
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MovieQuery {
    /// Movies ranked by descending popularity
    DiscoverPopular,
    /// Free-text title search
    Search(String),
}

impl MovieQuery {
    /// Pick the request for a stable query string
    ///
    /// An empty string means "no search text" and maps to the popular
    /// listing. Any other text, including whitespace, is searched verbatim.
    pub fn from_text(text: impl Into<String>) -> Self {
        let text = text.into();
        if text.is_empty() {
            Self::DiscoverPopular
        } else {
            Self::Search(text)
        }
    }

    /// The search text, or `""` for the popular listing
    #[must_use]
    pub fn text(&self) -> &str {
        match self {
            Self::DiscoverPopular => "",
            Self::Search(text) => text,
        }
    }

    /// Build the request URL against `base`
    ///
    /// The search text is form-encoded exactly once by the URL serializer.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::InvalidUrl`] if `base` is not a valid absolute URL.
    pub fn url(&self, base: &str) -> Result<Url, CatalogError> {
        let path = match self {
            Self::DiscoverPopular => "discover/movie",
            Self::Search(_) => "search/movie",
        };
        let mut url = Url::parse(&normalize_base(base))
            .and_then(|base| base.join(path))
            .map_err(|e| CatalogError::InvalidUrl(format!("{base}: {e}")))?;
        match self {
            Self::DiscoverPopular => {
                url.query_pairs_mut().append_pair("sort_by", "popularity.desc");
            }
            Self::Search(text) => {
                url.query_pairs_mut().append_pair("query", text);
            }
        }
        Ok(url)
    }
}

/// Ensure the base ends with `/` so relative joins keep the version segment
fn normalize_base(base: &str) -> String {
    if base.ends_with('/') {
        base.to_string()
    } else {
        format!("{base}/")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_text_is_discover() {
        assert_eq!(MovieQuery::from_text(""), MovieQuery::DiscoverPopular);
        assert_eq!(
            MovieQuery::from_text("Heat"),
            MovieQuery::Search("Heat".to_string())
        );
        assert_eq!(MovieQuery::DiscoverPopular.text(), "");
    }

    #[test]
    fn test_discover_url() {
        let url = MovieQuery::DiscoverPopular.url(DEFAULT_BASE_URL).unwrap();
        assert_eq!(
            url.as_str(),
            "https://api.themoviedb.org/3/discover/movie?sort_by=popularity.desc"
        );
    }

    #[test]
    fn test_search_url_encodes_once() {
        let url = MovieQuery::from_text("Batman & Robin? 100%")
            .url(DEFAULT_BASE_URL)
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://api.themoviedb.org/3/search/movie?query=Batman+%26+Robin%3F+100%25"
        );

        // Decoding yields the original text, not a partially-decoded string
        let decoded: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert_eq!(
            decoded,
            vec![("query".to_string(), "Batman & Robin? 100%".to_string())]
        );
    }

    #[test]
    fn test_already_encoded_text_is_not_decoded() {
        let url = MovieQuery::from_text("a%20b").url(DEFAULT_BASE_URL).unwrap();
        assert!(url.as_str().ends_with("query=a%2520b"));
    }

    #[test]
    fn test_base_without_trailing_slash() {
        let url = MovieQuery::DiscoverPopular
            .url("http://localhost:8080/3")
            .unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:8080/3/discover/movie?sort_by=popularity.desc"
        );
    }

    #[test]
    fn test_invalid_base() {
        assert!(MovieQuery::DiscoverPopular.url("not a url").is_err());
    }
}
