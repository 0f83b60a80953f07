//! Appwrite Counter Store
//!
//! Counters live as documents in one Appwrite collection:
//!
//! ```text
//! { "$id", "searchTerm", "count", "movie_id", "title", "poster_url" }
//! ```
//!
//! # Appwrite API
//!
//! - `GET    /databases/{db}/collections/{coll}/documents?queries[]=...`
//! - `POST   /databases/{db}/collections/{coll}/documents`
//! - `PATCH  /databases/{db}/collections/{coll}/documents/{id}`
//!
//! Queries are sent in the JSON form (`{"method":"equal",...}`). The
//! read-modify-write increment is not atomic; concurrent writers can lose a
//! count, which is acceptable for a popularity hint.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;

use super::traits::{normalize_term, CounterStore, CounterStoreError};
use crate::config::CounterStoreConfig;
use crate::movie::{Movie, TrendingEntry};

/// A counter document as stored in the collection
#[derive(Debug, Deserialize)]
struct CounterDocument {
    #[serde(rename = "$id")]
    id: String,
    #[serde(rename = "searchTerm")]
    search_term: String,
    #[serde(default)]
    count: u64,
    #[serde(default)]
    movie_id: u64,
    #[serde(default)]
    title: String,
    #[serde(default)]
    poster_url: Option<String>,
}

impl From<CounterDocument> for TrendingEntry {
    fn from(doc: CounterDocument) -> Self {
        Self {
            search_term: doc.search_term,
            count: doc.count,
            movie_id: doc.movie_id,
            title: doc.title,
            poster_url: doc.poster_url,
        }
    }
}

#[derive(Debug, Deserialize)]
struct DocumentList {
    documents: Vec<CounterDocument>,
}

/// Appwrite-backed counter store
#[derive(Clone)]
pub struct AppwriteStore {
    endpoint: String,
    project_id: String,
    api_key: Option<String>,
    database_id: String,
    collection_id: String,
    trending_limit: usize,
    http_client: reqwest::Client,
}

impl std::fmt::Debug for AppwriteStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppwriteStore")
            .field("endpoint", &self.endpoint)
            .field("project_id", &self.project_id)
            .field("database_id", &self.database_id)
            .field("collection_id", &self.collection_id)
            .finish_non_exhaustive()
    }
}

impl AppwriteStore {
    /// Create from the `[counter_store]` configuration section
    ///
    /// Returns `Ok(None)` when no project is configured.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn from_config(
        config: &CounterStoreConfig,
        timeout: Duration,
    ) -> Result<Option<Self>, CounterStoreError> {
        let Some(project_id) = config.project_id.clone() else {
            return Ok(None);
        };

        Ok(Some(Self {
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            project_id,
            api_key: config.api_key.clone(),
            database_id: config.database_id.clone(),
            collection_id: config.collection_id.clone(),
            trending_limit: config.trending_limit,
            http_client: reqwest::Client::builder().timeout(timeout).build()?,
        }))
    }

    /// Collection documents URL
    fn documents_url(&self) -> String {
        format!(
            "{}/databases/{}/collections/{}/documents",
            self.endpoint, self.database_id, self.collection_id
        )
    }

    /// Single document URL
    fn document_url(&self, id: &str) -> String {
        format!("{}/{id}", self.documents_url())
    }

    fn request(&self, method: reqwest::Method, url: &str) -> reqwest::RequestBuilder {
        let builder = self
            .http_client
            .request(method, url)
            .header("X-Appwrite-Project", &self.project_id);
        match &self.api_key {
            Some(key) => builder.header("X-Appwrite-Key", key),
            None => builder,
        }
    }

    async fn list_documents(
        &self,
        queries: &[serde_json::Value],
    ) -> Result<Vec<CounterDocument>, CounterStoreError> {
        let params: Vec<(&str, String)> = queries
            .iter()
            .map(|q| ("queries[]", q.to_string()))
            .collect();

        let response = self
            .request(reqwest::Method::GET, &self.documents_url())
            .query(&params)
            .send()
            .await?;
        let response = check_status(response).await?;

        let bytes = response.bytes().await?;
        let list: DocumentList =
            serde_json::from_slice(&bytes).map_err(|e| CounterStoreError::Parse(e.to_string()))?;
        Ok(list.documents)
    }
}

#[async_trait]
impl CounterStore for AppwriteStore {
    fn name(&self) -> &'static str {
        "Appwrite"
    }

    async fn record_search(
        &self,
        query: &str,
        top_result: &Movie,
    ) -> Result<(), CounterStoreError> {
        let term = normalize_term(query);
        let existing = self.list_documents(&[equal_query(term)]).await?;

        let response = if let Some(doc) = existing.into_iter().next() {
            tracing::debug!(term, count = doc.count + 1, "Incrementing search count");
            self.request(reqwest::Method::PATCH, &self.document_url(&doc.id))
                .json(&json!({ "data": { "count": doc.count + 1 } }))
                .send()
                .await?
        } else {
            tracing::debug!(term, movie_id = top_result.id, "Creating search count");
            self.request(reqwest::Method::POST, &self.documents_url())
                .json(&json!({
                    "documentId": "unique()",
                    "data": {
                        "searchTerm": term,
                        "count": 1,
                        "movie_id": top_result.id,
                        "title": top_result.title,
                        "poster_url": top_result.poster_url(),
                    }
                }))
                .send()
                .await?
        };
        check_status(response).await?;
        Ok(())
    }

    async fn list_trending(&self) -> Result<Vec<TrendingEntry>, CounterStoreError> {
        let docs = self
            .list_documents(&trending_queries(self.trending_limit))
            .await?;
        Ok(docs.into_iter().map(TrendingEntry::from).collect())
    }
}

/// `equal("searchTerm", [term])`
fn equal_query(term: &str) -> serde_json::Value {
    json!({ "method": "equal", "attribute": "searchTerm", "values": [term] })
}

/// `limit(n)` + `orderDesc("count")`
fn trending_queries(limit: usize) -> [serde_json::Value; 2] {
    [
        json!({ "method": "limit", "values": [limit] }),
        json!({ "method": "orderDesc", "attribute": "count" }),
    ]
}

async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, CounterStoreError> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        let body = response.text().await.unwrap_or_default();
        Err(CounterStoreError::Http {
            status: status.as_u16(),
            body,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> CounterStoreConfig {
        CounterStoreConfig {
            endpoint: "https://cloud.appwrite.io/v1/".to_string(),
            project_id: Some("proj".to_string()),
            api_key: Some("key".to_string()),
            database_id: "db".to_string(),
            collection_id: "metrics".to_string(),
            trending_limit: 5,
        }
    }

    #[test]
    fn test_no_project_means_no_store() {
        let mut cfg = config();
        cfg.project_id = None;
        let store = AppwriteStore::from_config(&cfg, Duration::from_secs(1)).unwrap();
        assert!(store.is_none());
    }

    #[test]
    fn test_urls() {
        let store = AppwriteStore::from_config(&config(), Duration::from_secs(1))
            .unwrap()
            .unwrap();
        assert_eq!(
            store.documents_url(),
            "https://cloud.appwrite.io/v1/databases/db/collections/metrics/documents"
        );
        assert_eq!(
            store.document_url("abc"),
            "https://cloud.appwrite.io/v1/databases/db/collections/metrics/documents/abc"
        );
    }

    #[test]
    fn test_debug_hides_api_key() {
        let store = AppwriteStore::from_config(&config(), Duration::from_secs(1))
            .unwrap()
            .unwrap();
        assert!(!format!("{store:?}").contains("api_key"));
    }

    #[test]
    fn test_query_encoding() {
        assert_eq!(
            equal_query("batman").to_string(),
            r#"{"attribute":"searchTerm","method":"equal","values":["batman"]}"#
        );
        let [limit, order] = trending_queries(5);
        assert_eq!(limit["values"][0], 5);
        assert_eq!(order["method"], "orderDesc");
    }

    #[test]
    fn test_document_maps_to_entry() {
        let json = r#"{
            "documents": [{
                "$id": "65f", "$collectionId": "metrics",
                "searchTerm": "batman", "count": 4, "movie_id": 268,
                "title": "Batman", "poster_url": "https://image.tmdb.org/t/p/w500/b.jpg"
            }],
            "total": 1
        }"#;
        let list: DocumentList = serde_json::from_str(json).unwrap();
        let entry: TrendingEntry = list.documents.into_iter().next().unwrap().into();
        assert_eq!(entry.search_term, "batman");
        assert_eq!(entry.count, 4);
        assert_eq!(entry.movie_id, 268);
    }
}
