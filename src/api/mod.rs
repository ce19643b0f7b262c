pub mod auth;
pub mod detect;
pub mod error;
pub mod factcheck;
pub mod health;
pub mod models;
pub mod openapi;

use actix_web::web;

pub use error::ApiError;

/// JSON extractor config reporting malformed bodies through the standard error envelope
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        ApiError::InvalidArgument(format!("malformed JSON body: {}", err)).into()
    })
}
