//! Catalog API client
//!
//! One unauthenticated GET endpoint, parameterized by `action`:
//! category listings, free-text search, and per-item detail.

use serde::de::DeserializeOwned;
use std::time::Duration;
use thiserror::Error;

use crate::models::{CatalogItem, CatalogResponse, ContentDetail, DetailResponse};

/// Default catalog endpoint
pub const BASE_URL: &str = "https://zeldvorik.ru/apiv2/api.php";

/// Poster shown when an item has none
pub const IMAGE_FALLBACK: &str = "https://via.placeholder.com/300x450?text=No+Image";

/// Catalog API error types
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Unexpected status: {0}")]
    Status(u16),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Catalog reported failure")]
    Unsuccessful,

    #[error("Response has no item")]
    MissingItem,
}

/// A single request against the catalog endpoint
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogQuery {
    /// Listing for a named category, e.g. `trending`
    Category { action: String, page: u32 },
    /// Free-text search
    Search { query: String },
    /// Extended record for one item
    Detail { detail_path: String },
}

impl CatalogQuery {
    pub fn category(action: impl Into<String>, page: u32) -> Self {
        CatalogQuery::Category {
            action: action.into(),
            page,
        }
    }

    pub fn search(query: impl Into<String>) -> Self {
        CatalogQuery::Search {
            query: query.into(),
        }
    }

    pub fn detail(detail_path: impl Into<String>) -> Self {
        CatalogQuery::Detail {
            detail_path: detail_path.into(),
        }
    }

    /// Encoded query string, without the leading `?`
    pub fn query_string(&self) -> String {
        match self {
            CatalogQuery::Category { action, page } => {
                format!("action={}&page={}", urlencoding::encode(action), page)
            }
            CatalogQuery::Search { query } => {
                format!("action=search&q={}", urlencoding::encode(query))
            }
            CatalogQuery::Detail { detail_path } => {
                format!(
                    "action=detail&detailPath={}",
                    urlencoding::encode(detail_path)
                )
            }
        }
    }
}

/// Catalog API client
#[derive(Debug, Clone)]
pub struct CatalogClient {
    base_url: String,
    client: reqwest::Client,
}

impl Default for CatalogClient {
    fn default() -> Self {
        Self::new()
    }
}

impl CatalogClient {
    /// Client against the default endpoint
    pub fn new() -> Self {
        Self::with_base_url(BASE_URL)
    }

    /// Client with a custom base URL (config override, tests)
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            client: reqwest::Client::new(),
        }
    }

    /// Client with a custom base URL and a request timeout
    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> Self {
        let client = match reqwest::Client::builder().timeout(timeout).build() {
            Ok(client) => client,
            Err(e) => {
                tracing::warn!(error = %e, ?timeout, "timeout ignored, using default client");
                reqwest::Client::new()
            }
        };
        Self {
            base_url: base_url.into(),
            client,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Full request URL for a query
    pub fn url(&self, query: &CatalogQuery) -> String {
        format!("{}?{}", self.base_url, query.query_string())
    }

    async fn get<T: DeserializeOwned>(&self, query: &CatalogQuery) -> Result<T, CatalogError> {
        let url = self.url(query);
        tracing::debug!(%url, "catalog request");

        let response = self
            .client
            .get(&url)
            .header("Accept", "application/json")
            .send()
            .await?;

        match response.status() {
            status if status.is_success() => {
                let body = response.text().await?;
                serde_json::from_str(&body)
                    .map_err(|e| CatalogError::InvalidResponse(format!("JSON parse error: {}", e)))
            }
            status => Err(CatalogError::Status(status.as_u16())),
        }
    }

    /// Fetch a listing, surfacing every failure
    pub async fn try_fetch_items(
        &self,
        query: &CatalogQuery,
    ) -> Result<Vec<CatalogItem>, CatalogError> {
        let response: CatalogResponse = self.get(query).await?;
        if response.success {
            Ok(response.items)
        } else {
            Err(CatalogError::Unsuccessful)
        }
    }

    /// Fetch a listing; any failure is logged and yields an empty list
    pub async fn fetch_data(&self, query: &CatalogQuery) -> Vec<CatalogItem> {
        match self.try_fetch_items(query).await {
            Ok(items) => {
                tracing::debug!(count = items.len(), "catalog listing loaded");
                items
            }
            Err(e) => {
                tracing::warn!(error = %e, query = %query.query_string(), "fetch error");
                Vec::new()
            }
        }
    }

    /// Items for a category page
    pub async fn category(&self, action: &str, page: u32) -> Vec<CatalogItem> {
        self.fetch_data(&CatalogQuery::category(action, page)).await
    }

    /// Items matching a search query
    pub async fn search(&self, query: &str) -> Vec<CatalogItem> {
        self.fetch_data(&CatalogQuery::search(query)).await
    }

    /// Extended record for one item
    pub async fn detail(&self, detail_path: &str) -> Result<ContentDetail, CatalogError> {
        let response: DetailResponse = self.get(&CatalogQuery::detail(detail_path)).await?;
        response.item.ok_or(CatalogError::MissingItem)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_query_string() {
        let q = CatalogQuery::category("trending", 1);
        assert_eq!(q.query_string(), "action=trending&page=1");
    }

    #[test]
    fn test_search_query_is_encoded() {
        let q = CatalogQuery::search("the batman & robin");
        assert_eq!(
            q.query_string(),
            "action=search&q=the%20batman%20%26%20robin"
        );
    }

    #[test]
    fn test_detail_query_string() {
        let q = CatalogQuery::detail("movie/abc-123");
        assert_eq!(q.query_string(), "action=detail&detailPath=movie%2Fabc-123");
    }

    #[test]
    fn test_url_joins_base() {
        let client = CatalogClient::with_base_url("http://localhost/api.php");
        assert_eq!(
            client.url(&CatalogQuery::category("anime", 1)),
            "http://localhost/api.php?action=anime&page=1"
        );
    }

    #[test]
    fn test_default_base_url() {
        assert_eq!(CatalogClient::new().base_url(), BASE_URL);
    }
}
