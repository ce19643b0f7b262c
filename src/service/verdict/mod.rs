//! Ensemble verdict service
//!
//! Runs every registered model adapter on the input text, waits for all of them,
//! and hands the complete prediction set to the [`Aggregator`].

pub mod aggregator;
pub mod error;
pub mod weights;

use std::sync::Arc;

use futures::future::join_all;
use serde::Serialize;
use utoipa::ToSchema;

use crate::adapter::ModelAdapter;
use crate::model::{AdapterKind, AggregateResult};

pub use aggregator::Aggregator;
pub use error::{AggregationError, EnsembleError};
pub use weights::ModelWeights;

/// A model taking part in the vote, as reported to clients
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct RegisteredModel {
    pub name: String,
    pub kind: AdapterKind,
    pub weight: f64,
    /// False when `weight` is the fallback for a model missing from the weight table
    pub weight_registered: bool,
}

/// Service producing ensemble verdicts for free text
pub struct EnsembleService {
    adapters: Vec<Arc<dyn ModelAdapter>>,
    aggregator: Aggregator,
    default_threshold: f64,
}

impl EnsembleService {
    pub fn new(
        adapters: Vec<Arc<dyn ModelAdapter>>,
        aggregator: Aggregator,
        default_threshold: f64,
    ) -> Self {
        for adapter in &adapters {
            let (_, registered) = aggregator.weight_for(adapter.name());
            if !registered {
                tracing::warn!(
                    model = %adapter.name(),
                    "Model has no entry in the weight table; its vote will use the default weight"
                );
            }
        }

        Self {
            adapters,
            aggregator,
            default_threshold,
        }
    }

    pub fn default_threshold(&self) -> f64 {
        self.default_threshold
    }

    pub fn model_count(&self) -> usize {
        self.adapters.len()
    }

    /// Registered models in voting order
    pub fn models(&self) -> Vec<RegisteredModel> {
        self.adapters
            .iter()
            .map(|adapter| {
                let (weight, weight_registered) = self.aggregator.weight_for(adapter.name());
                RegisteredModel {
                    name: adapter.name().to_string(),
                    kind: adapter.kind(),
                    weight,
                    weight_registered,
                }
            })
            .collect()
    }

    /// Classify `text` with every model and aggregate the votes
    ///
    /// Uses the configured default when `confidence_threshold` is `None`. A failure
    /// of any single adapter fails the whole request.
    pub async fn detect(
        &self,
        text: &str,
        confidence_threshold: Option<f64>,
    ) -> Result<AggregateResult, EnsembleError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(EnsembleError::InvalidArgument(
                "text must not be empty".to_string(),
            ));
        }

        let threshold = confidence_threshold.unwrap_or(self.default_threshold);
        Aggregator::validate_threshold(threshold)?;

        tracing::debug!(
            models = self.adapters.len(),
            threshold = threshold,
            text_len = text.len(),
            "Running ensemble"
        );

        let outputs = join_all(self.adapters.iter().map(|adapter| adapter.predict(text))).await;

        let mut predictions = Vec::with_capacity(outputs.len());
        for (adapter, output) in self.adapters.iter().zip(outputs) {
            match output {
                Ok(prediction) => predictions.push(prediction),
                Err(e) => {
                    tracing::error!(model = %adapter.name(), error = %e, "Model adapter failed");
                    return Err(EnsembleError::ModelUnavailable {
                        model: adapter.name().to_string(),
                        source: e,
                    });
                }
            }
        }

        let result = self.aggregator.aggregate(predictions, threshold)?;

        tracing::info!(
            models = result.per_model.len(),
            final_verdict = %result.final_verdict,
            "Ensemble verdict computed"
        );

        Ok(result)
    }
}
