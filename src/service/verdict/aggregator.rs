//! Weighted-vote aggregation of per-model predictions
//!
//! Each model votes for one label:
//! - its own top label (`True` on a 50/50 split),
//! - or `Uncertain` when its top probability is below the confidence threshold.
//!
//! A vote is worth the model's registered weight, [`DEFAULT_VOTE_WEIGHT`] when the
//! model is not in the weight table. The label with the strictly largest sum wins;
//! equal sums are settled by [`VerdictLabel::PRIORITY`] (`True > Fake > Uncertain`).

use std::collections::HashSet;
use std::sync::Arc;

use super::error::AggregationError;
use super::weights::{DEFAULT_VOTE_WEIGHT, VoteWeights};
use crate::model::{AggregateResult, ModelPrediction, ModelVerdict, VerdictLabel, VoteTally};

const MIN_THRESHOLD: f64 = 0.0;
const MAX_THRESHOLD: f64 = 100.0;

/// Combines one prediction per model into a single verdict
#[derive(Clone)]
pub struct Aggregator {
    weights: Arc<dyn VoteWeights>,
}

impl Aggregator {
    pub fn new(weights: Arc<dyn VoteWeights>) -> Self {
        Self { weights }
    }

    /// Check that a confidence threshold is a percentage
    pub fn validate_threshold(confidence_threshold: f64) -> Result<(), AggregationError> {
        if confidence_threshold.is_finite()
            && (MIN_THRESHOLD..=MAX_THRESHOLD).contains(&confidence_threshold)
        {
            Ok(())
        } else {
            Err(AggregationError::InvalidArgument(format!(
                "confidence_threshold must be within [0, 100], got {}",
                confidence_threshold
            )))
        }
    }

    /// Weight for `model_name` and whether it came from the weight table
    pub fn weight_for(&self, model_name: &str) -> (f64, bool) {
        match self.weights.weight_for(model_name) {
            Some(weight) => (weight, true),
            None => (DEFAULT_VOTE_WEIGHT, false),
        }
    }

    /// Aggregate the predictions of one request
    ///
    /// `per_model` in the result follows the order of `predictions`.
    pub fn aggregate(
        &self,
        predictions: Vec<ModelPrediction>,
        confidence_threshold: f64,
    ) -> Result<AggregateResult, AggregationError> {
        Self::validate_threshold(confidence_threshold)?;

        if predictions.is_empty() {
            return Err(AggregationError::NoPredictions);
        }

        if let Some(duplicate) = find_duplicate(&predictions) {
            return Err(AggregationError::InvalidArgument(format!(
                "duplicate prediction for model '{}'",
                duplicate
            )));
        }

        let mut tally = VoteTally::default();
        let mut per_model = Vec::with_capacity(predictions.len());

        for prediction in predictions {
            let label = assign_label(&prediction, confidence_threshold);
            let (weight, registered) = self.weight_for(prediction.model_name());

            if !registered {
                tracing::warn!(
                    model = %prediction.model_name(),
                    weight = weight,
                    "No vote weight registered for model, using default"
                );
            }

            tally.add(label, weight);
            per_model.push(ModelVerdict {
                prediction,
                label,
                weight,
            });
        }

        let final_verdict = tally.winner();

        tracing::debug!(
            models = per_model.len(),
            threshold = confidence_threshold,
            true_weight = tally.true_weight,
            fake_weight = tally.fake_weight,
            uncertain_weight = tally.uncertain_weight,
            final_verdict = %final_verdict,
            "Aggregated ensemble vote"
        );

        Ok(AggregateResult {
            per_model,
            tally,
            final_verdict,
        })
    }
}

fn find_duplicate(predictions: &[ModelPrediction]) -> Option<String> {
    let mut seen = HashSet::with_capacity(predictions.len());
    predictions
        .iter()
        .map(ModelPrediction::model_name)
        .find(|name| !seen.insert(*name))
        .map(str::to_string)
}

/// Label for one model, judged only on its own probabilities
fn assign_label(prediction: &ModelPrediction, confidence_threshold: f64) -> VerdictLabel {
    if prediction.top_probability() < confidence_threshold {
        VerdictLabel::Uncertain
    } else {
        prediction.top_label()
    }
}
