//! Unified API error handling
//!
//! This module provides a consistent error response format across all API endpoints.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::service::auth::AuthError;
use crate::service::factcheck::FactCheckError;
use crate::service::verdict::{AggregationError, EnsembleError};

/// Standard error response format
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Error type/code
    pub error: String,
    /// Human-readable error message
    pub message: String,
    /// Unique request ID for tracing
    pub request_id: String,
}

/// Unified API error type
///
/// All API endpoints should return `Result<T, ApiError>` for consistent error handling.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ApiError {
    /// Malformed or missing input (400)
    #[error("Invalid request: {0}")]
    InvalidArgument(String),

    /// Missing, expired or invalid credential (401)
    #[error("Authentication rejected: {0}")]
    AuthRejected(String),

    /// Aggregation ran without any model output (500)
    #[error("No model predictions available: {0}")]
    NoPredictions(String),

    /// A model adapter failed (502)
    #[error("Model unavailable: {0}")]
    ModelUnavailable(String),

    /// The fact-check source failed (502)
    #[error("Fact-check source unavailable: {0}")]
    UpstreamUnavailable(String),

    /// Internal server error (500)
    #[error("Internal server error: {0}")]
    Internal(String),
}

impl ApiError {
    fn error_type(&self) -> &'static str {
        match self {
            ApiError::InvalidArgument(_) => "invalid_argument",
            ApiError::AuthRejected(_) => "auth_rejected",
            ApiError::NoPredictions(_) => "no_predictions",
            ApiError::ModelUnavailable(_) => "model_unavailable",
            ApiError::UpstreamUnavailable(_) => "upstream_unavailable",
            ApiError::Internal(_) => "internal_error",
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::InvalidArgument(_) => StatusCode::BAD_REQUEST,
            ApiError::AuthRejected(_) => StatusCode::UNAUTHORIZED,
            ApiError::ModelUnavailable(_) | ApiError::UpstreamUnavailable(_) => {
                StatusCode::BAD_GATEWAY
            }
            ApiError::NoPredictions(_) | ApiError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        let error_type = self.error_type();

        tracing::error!(
            error_type = error_type,
            status = status.as_u16(),
            message = %self,
            "API error"
        );

        HttpResponse::build(status).json(ErrorResponse {
            error: error_type.to_string(),
            message: self.to_string(),
            request_id: Uuid::new_v4().to_string(),
        })
    }
}

// ============================================================================
// From conversions for service errors
// ============================================================================

impl From<AggregationError> for ApiError {
    fn from(err: AggregationError) -> Self {
        match err {
            AggregationError::InvalidArgument(msg) => ApiError::InvalidArgument(msg),
            AggregationError::NoPredictions => ApiError::NoPredictions(
                "no model adapters produced output for this request".to_string(),
            ),
        }
    }
}

impl From<EnsembleError> for ApiError {
    fn from(err: EnsembleError) -> Self {
        match err {
            EnsembleError::InvalidArgument(msg) => ApiError::InvalidArgument(msg),
            EnsembleError::Aggregation(e) => e.into(),
            e @ EnsembleError::ModelUnavailable { .. } => ApiError::ModelUnavailable(e.to_string()),
        }
    }
}

impl From<FactCheckError> for ApiError {
    fn from(err: FactCheckError) -> Self {
        match err {
            FactCheckError::InvalidArgument(msg) => ApiError::InvalidArgument(msg),
            e @ (FactCheckError::HttpError(_)
            | FactCheckError::UnexpectedStatus { .. }
            | FactCheckError::ParseError(_)) => ApiError::UpstreamUnavailable(e.to_string()),
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        ApiError::AuthRejected(err.to_string())
    }
}
