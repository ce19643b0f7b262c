//! REST API endpoint listing the models taking part in the vote

use actix_web::{HttpResponse, get, web};
use serde::Serialize;
use utoipa::ToSchema;

use super::auth::Authenticated;
use super::error::{ApiError, ErrorResponse};
use crate::service::EnsembleService;
use crate::service::verdict::RegisteredModel;

#[derive(Debug, Serialize, ToSchema)]
pub struct ModelListResponse {
    pub models: Vec<RegisteredModel>,
    /// Threshold applied when a detection request does not set one
    pub default_confidence_threshold: f64,
}

/// List registered models with the weight applied to each vote
#[utoipa::path(
    get,
    path = "/v1/models",
    responses(
        (status = 200, description = "Registered models", body = ModelListResponse),
        (status = 401, description = "Missing or invalid bearer token", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "detection"
)]
#[get("/v1/models")]
pub async fn list_models(
    _auth: Authenticated,
    service: web::Data<EnsembleService>,
) -> Result<HttpResponse, ApiError> {
    Ok(HttpResponse::Ok().json(ModelListResponse {
        models: service.models(),
        default_confidence_threshold: service.default_threshold(),
    }))
}

/// Configure model listing routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(list_models);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::JwtVerifier;
    use crate::service::auth::tests::{TEST_SECRET, valid_token};
    use crate::service::verdict::tests::{FixedAdapter, sample_adapters, shipped_service};
    use actix_web::{App, http::StatusCode, test};
    use serde_json::Value;

    #[actix_web::test]
    async fn test_list_models() {
        let mut adapters = sample_adapters();
        adapters.push(FixedAdapter::new("LSTM", 50.0, 50.0));

        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(shipped_service(adapters)))
                .app_data(web::Data::new(JwtVerifier::new(TEST_SECRET)))
                .configure(configure),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/v1/models")
            .insert_header(("Authorization", format!("Bearer {}", valid_token())))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["default_confidence_threshold"], 50.0);
        let models = body["models"].as_array().unwrap();
        assert_eq!(models.len(), 4);
        assert_eq!(models[1]["name"], "RF");
        assert_eq!(models[1]["weight"], 0.97);
        assert_eq!(models[1]["kind"], "tree_ensemble");
        assert_eq!(models[3]["name"], "LSTM");
        assert_eq!(models[3]["weight"], 1.0);
        assert_eq!(models[3]["weight_registered"], false);
    }

    #[actix_web::test]
    async fn test_list_models_requires_token() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(shipped_service(sample_adapters())))
                .app_data(web::Data::new(JwtVerifier::new(TEST_SECRET)))
                .configure(configure),
        )
        .await;

        let req = test::TestRequest::get().uri("/v1/models").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }
}
