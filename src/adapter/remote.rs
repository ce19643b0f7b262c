//! Adapter for a model served behind an HTTP inference endpoint

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use url::Url;

use super::{AdapterError, ModelAdapter};
use crate::model::{AdapterKind, ModelPrediction};

#[derive(Debug, Serialize)]
struct InferenceRequest<'a> {
    text: &'a str,
}

/// `predict_proba` output for one sample: `[p_fake, p_true]`
#[derive(Debug, Deserialize)]
struct InferenceResponse {
    probabilities: Vec<f64>,
}

/// Calls `POST {endpoint}` with `{"text": ...}`
pub struct RemoteModelAdapter {
    client: Client,
    name: String,
    kind: AdapterKind,
    endpoint: Url,
}

impl RemoteModelAdapter {
    pub fn new(client: Client, name: String, kind: AdapterKind, endpoint: Url) -> Self {
        Self {
            client,
            name,
            kind,
            endpoint,
        }
    }

    fn to_prediction(&self, response: InferenceResponse) -> Result<ModelPrediction, AdapterError> {
        match response.probabilities.as_slice() {
            [fake, truth] => Ok(ModelPrediction::from_fractions(&self.name, *fake, *truth)?),
            other => Err(AdapterError::ParseError(format!(
                "expected 2 probabilities, got {}",
                other.len()
            ))),
        }
    }
}

#[async_trait]
impl ModelAdapter for RemoteModelAdapter {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> AdapterKind {
        self.kind
    }

    async fn predict(&self, text: &str) -> Result<ModelPrediction, AdapterError> {
        tracing::debug!(model = %self.name, endpoint = %self.endpoint, "Requesting model inference");

        let response = self
            .client
            .post(self.endpoint.as_str())
            .json(&InferenceRequest { text })
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(AdapterError::UnexpectedStatus { status, body });
        }

        let body: InferenceResponse = response
            .json()
            .await
            .map_err(|e| AdapterError::ParseError(format!("Failed to deserialize inference: {}", e)))?;

        let prediction = self.to_prediction(body)?;

        tracing::debug!(
            model = %self.name,
            fake = prediction.fake_probability(),
            truth = prediction.true_probability(),
            "Model inference complete"
        );

        Ok(prediction)
    }
}
