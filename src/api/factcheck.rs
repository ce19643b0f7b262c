//! REST API endpoint for fact-check lookups

use actix_web::{HttpResponse, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::auth::Authenticated;
use super::error::{ApiError, ErrorResponse};
use crate::model::ClaimReview;
use crate::service::FactCheckService;
use crate::service::factcheck::FactCheckOutcome;

/// Request body for a fact-check lookup
#[derive(Debug, Deserialize, ToSchema)]
pub struct FactCheckRequest {
    /// Claim or headline to look up
    pub query: Option<String>,
    /// Two-letter language code (default: configured language)
    #[serde(default)]
    pub language: Option<String>,
}

/// Lookup result; `data` is set when reviews were found, `message` otherwise
#[derive(Debug, Serialize, ToSchema)]
pub struct FactCheckResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Vec<ClaimReview>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl From<FactCheckOutcome> for FactCheckResponse {
    fn from(outcome: FactCheckOutcome) -> Self {
        match outcome {
            FactCheckOutcome::Found(reviews) => Self {
                success: true,
                data: Some(reviews),
                message: None,
            },
            FactCheckOutcome::NoResults { query, language } => Self {
                success: false,
                data: None,
                message: Some(FactCheckOutcome::no_results_message(&query, &language)),
            },
        }
    }
}

/// Look up published fact-checks for a claim, newest first
#[utoipa::path(
    post,
    path = "/v1/factcheck",
    request_body = FactCheckRequest,
    responses(
        (status = 200, description = "Ranked reviews, or success=false when none matched", body = FactCheckResponse),
        (status = 400, description = "Missing query or malformed language code", body = ErrorResponse),
        (status = 401, description = "Missing or invalid bearer token", body = ErrorResponse),
        (status = 502, description = "Fact-check source unavailable", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "factcheck"
)]
#[post("/v1/factcheck")]
pub async fn factcheck(
    auth: Authenticated,
    service: web::Data<FactCheckService>,
    body: web::Json<FactCheckRequest>,
) -> Result<HttpResponse, ApiError> {
    let request = body.into_inner();
    let query = request
        .query
        .ok_or_else(|| ApiError::InvalidArgument("Query is required.".to_string()))?;

    tracing::info!(
        user_id = auth.0.id,
        query_len = query.len(),
        language = ?request.language,
        "Fact-check requested"
    );

    let outcome = service.search(&query, request.language.as_deref()).await?;

    Ok(HttpResponse::Ok().json(FactCheckResponse::from(outcome)))
}

/// Configure fact-check routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(factcheck);
}
