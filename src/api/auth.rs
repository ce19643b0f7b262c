//! Bearer authentication extractor

use std::future::{Ready, ready};

use actix_web::http::header::AUTHORIZATION;
use actix_web::{FromRequest, HttpRequest, dev::Payload, web};

use super::error::ApiError;
use crate::service::JwtVerifier;
use crate::service::auth::TokenClaims;

/// Caller whose bearer token was verified; add it to a handler's arguments to require auth
#[derive(Debug, Clone)]
pub struct Authenticated(pub TokenClaims);

impl FromRequest for Authenticated {
    type Error = ApiError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let Some(verifier) = req.app_data::<web::Data<JwtVerifier>>() else {
            return ready(Err(ApiError::Internal(
                "token verifier not configured".to_string(),
            )));
        };

        let header = req
            .headers()
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok());

        ready(
            verifier
                .verify_header(header)
                .map(|claims| {
                    tracing::debug!(
                        user_id = claims.id,
                        role = claims.role.as_deref().unwrap_or("none"),
                        path = %req.path(),
                        "Authenticated request"
                    );
                    Authenticated(claims)
                })
                .map_err(|e| {
                    tracing::debug!(error = %e, path = %req.path(), "Rejected request credential");
                    ApiError::from(e)
                }),
        )
    }
}
