//! Error types for fact-check lookups

use thiserror::Error;

#[derive(Debug, Error)]
pub enum FactCheckError {
    #[error("{0}")]
    InvalidArgument(String),

    /// Holds the error with its URL removed; request URLs carry the API key
    #[error("HTTP request failed: {0}")]
    HttpError(reqwest::Error),

    #[error("Unexpected status {status}: {body}")]
    UnexpectedStatus { status: u16, body: String },

    #[error("Failed to parse response: {0}")]
    ParseError(String),
}

impl From<reqwest::Error> for FactCheckError {
    fn from(err: reqwest::Error) -> Self {
        FactCheckError::HttpError(err.without_url())
    }
}

impl FactCheckError {
    /// True when the fact-check source itself failed, as opposed to a bad request
    pub fn is_upstream(&self) -> bool {
        !matches!(self, FactCheckError::InvalidArgument(_))
    }
}
