//! REST API endpoint for ensemble fake-news detection

use actix_web::{HttpResponse, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::auth::Authenticated;
use super::error::{ApiError, ErrorResponse};
use crate::model::{AggregateResult, VerdictLabel, VoteTally};
use crate::service::EnsembleService;

/// Request body for a detection
#[derive(Debug, Deserialize, ToSchema)]
pub struct DetectRequest {
    /// News text to classify
    pub text: Option<String>,
    /// Minimum top probability (0-100) for a model's vote to count as decided
    #[serde(default, alias = "confidence")]
    pub confidence_threshold: Option<f64>,
}

/// One model's vote
#[derive(Debug, Serialize, ToSchema)]
pub struct DetectionEntry {
    #[serde(rename = "Model")]
    pub model: String,
    #[serde(rename = "True Probability")]
    pub true_probability: f64,
    #[serde(rename = "Fake Probability")]
    pub fake_probability: f64,
    #[serde(rename = "Prediction")]
    pub prediction: VerdictLabel,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DetectResponse {
    pub success: bool,
    pub detections: Vec<DetectionEntry>,
    pub final_prediction: VerdictLabel,
    pub weighted_votes: VoteTally,
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

impl From<AggregateResult> for DetectResponse {
    fn from(result: AggregateResult) -> Self {
        let detections = result
            .per_model
            .into_iter()
            .map(|verdict| DetectionEntry {
                model: verdict.prediction.model_name().to_string(),
                true_probability: round2(verdict.prediction.true_probability()),
                fake_probability: round2(verdict.prediction.fake_probability()),
                prediction: verdict.label,
            })
            .collect();

        Self {
            success: true,
            detections,
            final_prediction: result.final_verdict,
            weighted_votes: result.tally,
        }
    }
}

/// Classify a news text with every registered model and return the weighted verdict
#[utoipa::path(
    post,
    path = "/v1/detect",
    request_body = DetectRequest,
    responses(
        (status = 200, description = "Verdict computed", body = DetectResponse),
        (status = 400, description = "Missing text or threshold outside [0, 100]", body = ErrorResponse),
        (status = 401, description = "Missing or invalid bearer token", body = ErrorResponse),
        (status = 500, description = "No model produced a prediction", body = ErrorResponse),
        (status = 502, description = "A model adapter failed", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "detection"
)]
#[post("/v1/detect")]
pub async fn detect(
    auth: Authenticated,
    service: web::Data<EnsembleService>,
    body: web::Json<DetectRequest>,
) -> Result<HttpResponse, ApiError> {
    let request = body.into_inner();
    let text = request
        .text
        .ok_or_else(|| ApiError::InvalidArgument("Please provide text for detection.".to_string()))?;

    tracing::info!(
        user_id = auth.0.id,
        text_len = text.len(),
        threshold = ?request.confidence_threshold,
        "Detection requested"
    );

    let result = service.detect(&text, request.confidence_threshold).await?;

    Ok(HttpResponse::Ok().json(DetectResponse::from(result)))
}

/// Configure detection routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(detect);
}
