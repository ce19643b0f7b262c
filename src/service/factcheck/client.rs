//! Google Fact Check Tools API client
//!
//! Searches published claim reviews for a free-text query.

use std::env;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use super::error::FactCheckError;
use crate::model::{ClaimReview, ClaimSearchResponse};

const FACTCHECK_API_BASE_URL: &str = "https://factchecktools.googleapis.com/v1alpha1";
const ENV_FACTCHECK_BASE_URL: &str = "FACTCHECK_BASE_URL";

/// Source of claim reviews for a query
#[async_trait]
pub trait ClaimSearch: Send + Sync {
    /// All reviews the source returns for `query`, unranked
    async fn search_claims(
        &self,
        query: &str,
        language_code: &str,
    ) -> Result<Vec<ClaimReview>, FactCheckError>;
}

/// Client for the `claims:search` endpoint
pub struct FactCheckClient {
    client: Client,
    base_url: String,
    api_key: String,
    page_size: Option<u32>,
}

impl FactCheckClient {
    /// Create a new fact-check client
    ///
    /// The base URL is resolved in this order:
    /// 1. `FACTCHECK_BASE_URL` environment variable if set
    /// 2. Default Fact Check Tools API URL
    pub fn new(
        api_key: String,
        page_size: Option<u32>,
        timeout: Duration,
    ) -> Result<Self, FactCheckError> {
        let base_url = env::var(ENV_FACTCHECK_BASE_URL)
            .unwrap_or_else(|_| FACTCHECK_API_BASE_URL.to_string());
        Self::with_base_url(base_url, api_key, page_size, timeout)
    }

    pub fn with_base_url(
        base_url: String,
        api_key: String,
        page_size: Option<u32>,
        timeout: Duration,
    ) -> Result<Self, FactCheckError> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            page_size,
        })
    }

    fn query_params(&self, query: &str, language_code: &str) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("key", self.api_key.clone()),
            ("query", query.to_string()),
            ("languageCode", language_code.to_string()),
        ];
        if let Some(page_size) = self.page_size {
            params.push(("pageSize", page_size.to_string()));
        }
        params
    }
}

#[async_trait]
impl ClaimSearch for FactCheckClient {
    async fn search_claims(
        &self,
        query: &str,
        language_code: &str,
    ) -> Result<Vec<ClaimReview>, FactCheckError> {
        let url = format!("{}/claims:search", self.base_url);

        tracing::debug!(query = %query, language = %language_code, "Searching fact-check claims");

        let response = self
            .client
            .get(&url)
            .query(&self.query_params(query, language_code))
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(status = status, "Fact-check search returned an error status");
            return Err(FactCheckError::UnexpectedStatus { status, body });
        }

        let search: ClaimSearchResponse = response.json().await.map_err(|e| {
            FactCheckError::ParseError(format!(
                "Failed to deserialize claim search: {}",
                e.without_url()
            ))
        })?;

        let reviews = search.into_claim_reviews();

        tracing::debug!(
            query = %query,
            reviews = reviews.len(),
            "Fetched claim reviews"
        );

        Ok(reviews)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{StubServer, closed_port_url};
    use serde_json::json;

    fn client(base_url: &str, page_size: Option<u32>) -> FactCheckClient {
        FactCheckClient::with_base_url(
            base_url.to_string(),
            "test-key".to_string(),
            page_size,
            Duration::from_secs(5),
        )
        .unwrap()
    }

    #[test]
    fn test_query_params() {
        let client = client("http://localhost/", Some(25));
        let params = client.query_params("vaccines", "es");

        assert_eq!(client.base_url, "http://localhost");
        assert_eq!(
            params,
            vec![
                ("key", "test-key".to_string()),
                ("query", "vaccines".to_string()),
                ("languageCode", "es".to_string()),
                ("pageSize", "25".to_string()),
            ]
        );
    }

    #[test]
    fn test_page_size_omitted_when_unset() {
        let client = client("http://localhost", None);
        assert!(
            client
                .query_params("q", "en")
                .iter()
                .all(|(name, _)| *name != "pageSize")
        );
    }

    #[actix_web::test]
    async fn test_search_parses_reviews() {
        let server = StubServer::start(
            200,
            json!({
                "claims": [{
                    "text": "Claim",
                    "claimant": "Politician",
                    "claimReview": [{
                        "publisher": {"name": "Checker"},
                        "url": "https://checker.example/1",
                        "reviewDate": "2024-06-01T00:00:00Z",
                        "textualRating": "Mostly false"
                    }]
                }]
            }),
        );

        let reviews = client(server.base_url(), None)
            .search_claims("claim", "en")
            .await
            .unwrap();
        server.stop().await;

        assert_eq!(reviews.len(), 1);
        assert_eq!(reviews[0].textual_rating, "Mostly false");
        assert_eq!(reviews[0].claimant, "Politician");
    }

    #[actix_web::test]
    async fn test_search_with_no_matches_is_empty() {
        let server = StubServer::start(200, json!({}));
        let reviews = client(server.base_url(), None)
            .search_claims("nothing", "en")
            .await
            .unwrap();
        server.stop().await;

        assert!(reviews.is_empty());
    }

    #[actix_web::test]
    async fn test_error_status_is_upstream_failure() {
        let server = StubServer::start(403, json!({"error": {"message": "API key not valid"}}));
        let result = client(server.base_url(), None)
            .search_claims("claim", "en")
            .await;
        server.stop().await;

        let err = result.unwrap_err();
        assert!(err.is_upstream());
        assert!(matches!(err, FactCheckError::UnexpectedStatus { status: 403, .. }));
    }

    #[actix_web::test]
    async fn test_unreachable_upstream_is_error_not_empty() {
        let result = client(&closed_port_url(), None)
            .search_claims("claim", "en")
            .await;

        let err = result.unwrap_err();
        assert!(err.is_upstream());
        assert!(matches!(err, FactCheckError::HttpError(_)));
    }

    fn client_with_key(base_url: &str, api_key: &str) -> FactCheckClient {
        FactCheckClient::with_base_url(
            base_url.to_string(),
            api_key.to_string(),
            None,
            Duration::from_secs(5),
        )
        .unwrap()
    }

    #[actix_web::test]
    async fn test_transport_error_does_not_leak_api_key() {
        let err = client_with_key(&closed_port_url(), "k3y-do-not-print")
            .search_claims("claim", "en")
            .await
            .unwrap_err();

        let message = crate::api::ApiError::from(err).to_string();
        assert!(!message.contains("k3y-do-not-print"), "{message}");
        assert!(!message.contains("key="), "{message}");
    }

    #[actix_web::test]
    async fn test_decode_error_does_not_leak_api_key() {
        let server = StubServer::start(200, json!(["not", "an", "object"]));
        let err = client_with_key(server.base_url(), "k3y-do-not-print")
            .search_claims("claim", "en")
            .await
            .unwrap_err();
        server.stop().await;

        assert!(matches!(err, FactCheckError::ParseError(_)));
        let message = crate::api::ApiError::from(err).to_string();
        assert!(!message.contains("k3y-do-not-print"), "{message}");
    }

    #[tokio::test]
    #[ignore] // Requires network access and FACTCHECK_API_KEY
    async fn test_live_search() {
        let api_key = std::env::var("FACTCHECK_API_KEY").unwrap();
        let client = FactCheckClient::new(api_key, None, Duration::from_secs(10)).unwrap();
        let result = client.search_claims("climate change", "en").await;
        assert!(result.is_ok());
    }
}
