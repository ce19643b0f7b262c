//! OpenAPI specification endpoints

use actix_web::{HttpResponse, Responder, get};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use super::error::ApiError;
use super::{detect, error, factcheck, health, models};
use crate::model::{AdapterKind, ClaimReview, VerdictLabel, VoteTally};
use crate::service::verdict::RegisteredModel;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "FactGuard API",
        description = "Weighted ensemble fake-news detection and fact-check lookup"
    ),
    paths(
        detect::detect,
        factcheck::factcheck,
        models::list_models,
        health::liveness,
        health::readiness,
    ),
    components(schemas(
        detect::DetectRequest,
        detect::DetectResponse,
        detect::DetectionEntry,
        factcheck::FactCheckRequest,
        factcheck::FactCheckResponse,
        models::ModelListResponse,
        health::HealthStatus,
        health::ReadinessStatus,
        error::ErrorResponse,
        ClaimReview,
        RegisteredModel,
        AdapterKind,
        VerdictLabel,
        VoteTally,
    )),
    modifiers(&SecurityAddon),
    tags(
        (name = "detection", description = "Ensemble verdicts"),
        (name = "factcheck", description = "Published fact-check lookup"),
        (name = "health", description = "Liveness and readiness probes")
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// Serve OpenAPI JSON specification
#[get("/openapi.json")]
pub async fn openapi_json() -> impl Responder {
    HttpResponse::Ok().json(ApiDoc::openapi())
}

/// Serve OpenAPI YAML specification
#[get("/openapi.yaml")]
pub async fn openapi_yaml() -> Result<HttpResponse, ApiError> {
    let yaml = ApiDoc::openapi()
        .to_yaml()
        .map_err(|e| ApiError::Internal(format!("failed to render OpenAPI YAML: {}", e)))?;

    Ok(HttpResponse::Ok().content_type("text/yaml").body(yaml))
}

/// Configure OpenAPI routes
pub fn configure(cfg: &mut actix_web::web::ServiceConfig) {
    cfg.service(openapi_json).service(openapi_yaml);
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{App, test};
    use serde_json::Value;

    #[actix_web::test]
    async fn test_document_lists_endpoints() {
        let doc = ApiDoc::openapi();
        for path in ["/v1/detect", "/v1/factcheck", "/v1/models", "/health/live", "/health/ready"] {
            assert!(doc.paths.paths.contains_key(path), "missing {path}");
        }
    }

    #[actix_web::test]
    async fn test_openapi_endpoints() {
        let app = test::init_service(App::new().configure(configure)).await;

        let req = test::TestRequest::get().uri("/openapi.json").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["info"]["title"], "FactGuard API");
        assert!(body["components"]["securitySchemes"]["bearer_auth"].is_object());

        let req = test::TestRequest::get().uri("/openapi.yaml").to_request();
        let body = test::call_and_read_body(&app, req).await;
        let text = String::from_utf8(body.to_vec()).unwrap();
        assert!(text.contains("/v1/detect"));
    }
}
