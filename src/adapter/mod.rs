//! Model adapters producing {Fake, True} probability pairs for input text

mod remote;

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use crate::model::{AdapterKind, ModelEndpointConfig, ModelPrediction, PredictionError};

pub use remote::RemoteModelAdapter;

#[derive(Debug, thiserror::Error)]
pub enum AdapterError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Unexpected status {status}: {body}")]
    UnexpectedStatus { status: u16, body: String },

    #[error("Failed to parse response: {0}")]
    ParseError(String),

    #[error("Invalid prediction: {0}")]
    InvalidPrediction(#[from] PredictionError),

    #[error("Model '{0}' is registered more than once")]
    DuplicateModel(String),
}

/// Trait for a single classifier in the ensemble
#[async_trait]
pub trait ModelAdapter: Send + Sync {
    /// Name the model votes under; also the weight table key
    fn name(&self) -> &str;

    fn kind(&self) -> AdapterKind;

    /// Probability estimate for `text`
    async fn predict(&self, text: &str) -> Result<ModelPrediction, AdapterError>;
}

/// Build one remote adapter per configured model, sharing a single HTTP client
pub fn build_adapters(
    models: &[ModelEndpointConfig],
    timeout: Duration,
) -> Result<Vec<Arc<dyn ModelAdapter>>, AdapterError> {
    let mut names = HashSet::new();
    if let Some(duplicate) = models.iter().find(|m| !names.insert(m.name.as_str())) {
        return Err(AdapterError::DuplicateModel(duplicate.name.clone()));
    }

    let client = Client::builder().timeout(timeout).build()?;

    let adapters = models
        .iter()
        .map(|model| {
            tracing::info!(
                model = %model.name,
                kind = ?model.kind,
                endpoint = %model.endpoint,
                "Registered model adapter"
            );
            Arc::new(RemoteModelAdapter::new(
                client.clone(),
                model.name.clone(),
                model.kind,
                model.endpoint.clone(),
            )) as Arc<dyn ModelAdapter>
        })
        .collect();

    Ok(adapters)
}
