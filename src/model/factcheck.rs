//! Google Fact Check Tools API response models
//!
//! Based on the `claims:search` response: https://developers.google.com/fact-check/tools/api/reference/rest/v1alpha1/claims/search

use serde::{Deserialize, Serialize, Serializer};
use utoipa::ToSchema;

const UNKNOWN_CLAIMANT: &str = "Unknown";
const UNKNOWN_PUBLISHER: &str = "Unknown publisher";
const NO_RATING: &str = "No rating";
const NO_TEXT: &str = "No text available";
const NO_URL: &str = "No URL";

/// Response body of `claims:search`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClaimSearchResponse {
    #[serde(default)]
    pub claims: Vec<SearchedClaim>,
}

/// A claim as returned by the search endpoint
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchedClaim {
    /// The claim text
    #[serde(default)]
    pub text: Option<String>,

    /// Person or organization stating the claim
    #[serde(default)]
    pub claimant: Option<String>,

    /// Reviews published by fact-checkers for this claim
    #[serde(default)]
    pub claim_review: Vec<UpstreamClaimReview>,
}

/// A fact-checker's review of one claim
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpstreamClaimReview {
    #[serde(default)]
    pub publisher: Option<Publisher>,

    #[serde(default)]
    pub url: Option<String>,

    /// RFC 3339 timestamp
    #[serde(default)]
    pub review_date: Option<String>,

    #[serde(default)]
    pub textual_rating: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Publisher {
    #[serde(default)]
    pub name: Option<String>,
}

/// A third-party fact-check of a claim, flattened for ranking and display
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct ClaimReview {
    #[serde(rename = "Claim")]
    pub claim_text: String,
    #[serde(rename = "Claimant")]
    pub claimant: String,
    #[serde(rename = "Publisher")]
    pub publisher: String,
    #[serde(rename = "Rating")]
    pub textual_rating: String,
    #[serde(rename = "Date")]
    pub review_date: Option<String>,
    /// `None` when the fact-checker published no link; shown as a placeholder
    #[serde(rename = "URL", serialize_with = "url_or_placeholder")]
    #[schema(value_type = String)]
    pub source_url: Option<String>,
}

fn url_or_placeholder<S: Serializer>(
    url: &Option<String>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(url.as_deref().unwrap_or(NO_URL))
}

impl ClaimSearchResponse {
    /// One `ClaimReview` per review of every returned claim, in response order
    pub fn into_claim_reviews(self) -> Vec<ClaimReview> {
        self.claims
            .into_iter()
            .flat_map(|claim| {
                let claim_text = claim.text.unwrap_or_else(|| NO_TEXT.to_string());
                let claimant = claim
                    .claimant
                    .unwrap_or_else(|| UNKNOWN_CLAIMANT.to_string());

                claim
                    .claim_review
                    .into_iter()
                    .map(move |review| ClaimReview {
                        claim_text: claim_text.clone(),
                        claimant: claimant.clone(),
                        publisher: review
                            .publisher
                            .and_then(|p| p.name)
                            .unwrap_or_else(|| UNKNOWN_PUBLISHER.to_string()),
                        textual_rating: review
                            .textual_rating
                            .unwrap_or_else(|| NO_RATING.to_string()),
                        review_date: review.review_date,
                        source_url: review.url.filter(|url| !url.trim().is_empty()),
                    })
            })
            .collect()
    }
}
