//! Fact-check lookup service
//!
//! Validates the query, searches the claim-review source and ranks what comes back.

pub mod client;
pub mod error;
pub mod ranker;

use std::num::NonZeroUsize;
use std::sync::Arc;

use crate::model::ClaimReview;

pub use client::{ClaimSearch, FactCheckClient};
pub use error::FactCheckError;

/// Display names for the languages the lookup is usually run in
const LANGUAGE_NAMES: &[(&str, &str)] = &[("en", "English"), ("es", "Spanish")];

/// Human-readable name for a language code, or the code itself
pub fn language_name(code: &str) -> String {
    LANGUAGE_NAMES
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, name)| name.to_string())
        .unwrap_or_else(|| code.to_string())
}

/// Result of a lookup that reached the fact-check source
#[derive(Debug, Clone, PartialEq)]
pub enum FactCheckOutcome {
    /// Ranked reviews, newest first
    Found(Vec<ClaimReview>),
    /// The source answered but nothing rankable matched
    NoResults { query: String, language: String },
}

impl FactCheckOutcome {
    pub fn no_results_message(query: &str, language: &str) -> String {
        format!(
            "No claims matching '{}' were found in {}.",
            query,
            language_name(language)
        )
    }
}

pub struct FactCheckService {
    source: Arc<dyn ClaimSearch>,
    top_n: NonZeroUsize,
    default_language: String,
}

impl FactCheckService {
    pub fn new(source: Arc<dyn ClaimSearch>, top_n: NonZeroUsize, default_language: String) -> Self {
        Self {
            source,
            top_n,
            default_language,
        }
    }

    /// Search reviews for `query` and return the top-ranked ones
    ///
    /// `language` defaults to the configured language and must be a two-letter code.
    pub async fn search(
        &self,
        query: &str,
        language: Option<&str>,
    ) -> Result<FactCheckOutcome, FactCheckError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(FactCheckError::InvalidArgument(
                "Query is required.".to_string(),
            ));
        }

        let language = normalize_language(language.unwrap_or(&self.default_language))?;

        let reviews = self
            .source
            .search_claims(query, &language)
            .await
            .inspect_err(|e| {
                if e.is_upstream() {
                    tracing::error!(language = %language, error = %e, "Fact-check source failed");
                }
            })?;
        let ranked = ranker::rank(reviews, self.top_n);

        if ranked.is_empty() {
            tracing::info!(
                query_len = query.len(),
                language = %language,
                "No rankable claim reviews"
            );
            return Ok(FactCheckOutcome::NoResults {
                query: query.to_string(),
                language,
            });
        }

        Ok(FactCheckOutcome::Found(ranked))
    }
}

fn normalize_language(code: &str) -> Result<String, FactCheckError> {
    let code = code.trim();
    if code.len() == 2 && code.chars().all(|c| c.is_ascii_alphabetic()) {
        Ok(code.to_ascii_lowercase())
    } else {
        Err(FactCheckError::InvalidArgument(format!(
            "language must be a two-letter code, got '{}'",
            code
        )))
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Claim source returning canned reviews and recording the language it was asked for
    pub(crate) struct CannedSearch {
        pub reviews: Result<Vec<ClaimReview>, u16>,
        pub languages: Mutex<Vec<String>>,
    }

    impl CannedSearch {
        pub(crate) fn ok(reviews: Vec<ClaimReview>) -> Arc<Self> {
            Arc::new(Self {
                reviews: Ok(reviews),
                languages: Mutex::new(vec![]),
            })
        }

        pub(crate) fn failing(status: u16) -> Arc<Self> {
            Arc::new(Self {
                reviews: Err(status),
                languages: Mutex::new(vec![]),
            })
        }
    }

    #[async_trait]
    impl ClaimSearch for CannedSearch {
        async fn search_claims(
            &self,
            _query: &str,
            language_code: &str,
        ) -> Result<Vec<ClaimReview>, FactCheckError> {
            self.languages
                .lock()
                .unwrap()
                .push(language_code.to_string());
            match &self.reviews {
                Ok(reviews) => Ok(reviews.clone()),
                Err(status) => Err(FactCheckError::UnexpectedStatus {
                    status: *status,
                    body: String::new(),
                }),
            }
        }
    }

    pub(crate) fn review(url: &str, date: Option<&str>) -> ClaimReview {
        ClaimReview {
            claim_text: "A claim".to_string(),
            claimant: "Someone".to_string(),
            publisher: "Checker".to_string(),
            textual_rating: "False".to_string(),
            review_date: date.map(str::to_string),
            source_url: Some(url.to_string()),
        }
    }

    pub(crate) fn service(source: Arc<dyn ClaimSearch>) -> FactCheckService {
        FactCheckService::new(source, NonZeroUsize::new(2).unwrap(), "en".to_string())
    }

    #[tokio::test]
    async fn test_search_ranks_results() {
        let source = CannedSearch::ok(vec![
            review("https://a", Some("2023-01-01")),
            review("https://b", Some("2024-06-01")),
            review("https://c", None),
        ]);

        let outcome = service(source).search("claim", None).await.unwrap();

        match outcome {
            FactCheckOutcome::Found(reviews) => {
                let urls: Vec<&str> = reviews
                    .iter()
                    .filter_map(|r| r.source_url.as_deref())
                    .collect();
                assert_eq!(urls, vec!["https://b", "https://a"]);
            }
            other => panic!("expected results, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_empty_source_is_no_results() {
        let outcome = service(CannedSearch::ok(vec![]))
            .search("claim", Some("es"))
            .await
            .unwrap();

        assert_eq!(
            outcome,
            FactCheckOutcome::NoResults {
                query: "claim".to_string(),
                language: "es".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_only_undated_reviews_is_no_results() {
        let outcome = service(CannedSearch::ok(vec![review("https://a", None)]))
            .search("claim", None)
            .await
            .unwrap();
        assert!(matches!(outcome, FactCheckOutcome::NoResults { .. }));
    }

    #[tokio::test]
    async fn test_upstream_failure_is_not_no_results() {
        let result = service(CannedSearch::failing(500)).search("claim", None).await;
        assert!(matches!(result, Err(ref e) if e.is_upstream()));
    }

    #[tokio::test]
    async fn test_blank_query_is_invalid() {
        let source = CannedSearch::ok(vec![]);
        let result = service(source.clone()).search("  ", None).await;

        assert!(matches!(result, Err(FactCheckError::InvalidArgument(_))));
        assert!(source.languages.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_language_is_validated_and_lowercased() {
        let source = CannedSearch::ok(vec![]);
        let svc = service(source.clone());

        svc.search("claim", Some("ES")).await.unwrap();
        svc.search("claim", None).await.unwrap();
        assert!(matches!(
            svc.search("claim", Some("eng")).await,
            Err(FactCheckError::InvalidArgument(_))
        ));
        assert!(matches!(
            svc.search("claim", Some("e1")).await,
            Err(FactCheckError::InvalidArgument(_))
        ));

        assert_eq!(*source.languages.lock().unwrap(), vec!["es", "en"]);
    }

    #[test]
    fn test_no_results_message() {
        assert_eq!(
            FactCheckOutcome::no_results_message("moon cheese", "en"),
            "No claims matching 'moon cheese' were found in English."
        );
        assert_eq!(
            FactCheckOutcome::no_results_message("q", "fr"),
            "No claims matching 'q' were found in fr."
        );
    }
}
