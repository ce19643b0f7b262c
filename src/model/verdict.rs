use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Probabilities are percentages; a pair must add up to 100 within this tolerance.
pub const PROBABILITY_SUM_TOLERANCE: f64 = 1e-3;

/// Label assigned to a single model's output and to the ensemble as a whole
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum VerdictLabel {
    True,
    Fake,
    Uncertain,
}

impl VerdictLabel {
    /// Tie-break order for the final vote, highest priority first
    pub const PRIORITY: [VerdictLabel; 3] =
        [VerdictLabel::True, VerdictLabel::Fake, VerdictLabel::Uncertain];

    pub fn as_str(&self) -> &'static str {
        match self {
            VerdictLabel::True => "True",
            VerdictLabel::Fake => "Fake",
            VerdictLabel::Uncertain => "Uncertain",
        }
    }
}

impl fmt::Display for VerdictLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum PredictionError {
    #[error("{field} for model '{model}' must be within [0, 100], got {value}")]
    OutOfRange {
        model: String,
        field: &'static str,
        value: f64,
    },

    #[error("probabilities for model '{model}' must sum to 100, got {sum}")]
    BadSum { model: String, sum: f64 },

    #[error("model name must not be empty")]
    EmptyName,
}

/// One adapter's probability estimate over {Fake, True}, in percent
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelPrediction {
    model_name: String,
    fake_probability: f64,
    true_probability: f64,
}

impl ModelPrediction {
    /// Build a prediction, checking that both values are percentages and sum to 100
    pub fn new(
        model_name: impl Into<String>,
        fake_probability: f64,
        true_probability: f64,
    ) -> Result<Self, PredictionError> {
        let model_name = model_name.into();
        if model_name.trim().is_empty() {
            return Err(PredictionError::EmptyName);
        }

        for (field, value) in [
            ("fake_probability", fake_probability),
            ("true_probability", true_probability),
        ] {
            if !value.is_finite() || !(0.0..=100.0).contains(&value) {
                return Err(PredictionError::OutOfRange {
                    model: model_name,
                    field,
                    value,
                });
            }
        }

        let sum = fake_probability + true_probability;
        if (sum - 100.0).abs() > PROBABILITY_SUM_TOLERANCE {
            return Err(PredictionError::BadSum {
                model: model_name,
                sum,
            });
        }

        Ok(Self {
            model_name,
            fake_probability,
            true_probability,
        })
    }

    /// Build a prediction from `predict_proba`-style fractions in [0, 1]
    pub fn from_fractions(
        model_name: impl Into<String>,
        fake_fraction: f64,
        true_fraction: f64,
    ) -> Result<Self, PredictionError> {
        Self::new(model_name, fake_fraction * 100.0, true_fraction * 100.0)
    }

    pub fn model_name(&self) -> &str {
        &self.model_name
    }

    pub fn fake_probability(&self) -> f64 {
        self.fake_probability
    }

    pub fn true_probability(&self) -> f64 {
        self.true_probability
    }

    /// The larger of the two probabilities
    pub fn top_probability(&self) -> f64 {
        self.true_probability.max(self.fake_probability)
    }

    /// The model's own choice, ignoring any threshold (`True` wins a 50/50 split)
    pub fn top_label(&self) -> VerdictLabel {
        if self.true_probability >= self.fake_probability {
            VerdictLabel::True
        } else {
            VerdictLabel::Fake
        }
    }
}

/// Per-model entry of an aggregate result
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelVerdict {
    pub prediction: ModelPrediction,
    pub label: VerdictLabel,
    /// Weight actually added to `label`'s sum
    pub weight: f64,
}

/// Weighted sums per label
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, ToSchema)]
pub struct VoteTally {
    #[serde(rename = "True")]
    pub true_weight: f64,
    #[serde(rename = "Fake")]
    pub fake_weight: f64,
    #[serde(rename = "Uncertain")]
    pub uncertain_weight: f64,
}

impl VoteTally {
    pub fn add(&mut self, label: VerdictLabel, weight: f64) {
        match label {
            VerdictLabel::True => self.true_weight += weight,
            VerdictLabel::Fake => self.fake_weight += weight,
            VerdictLabel::Uncertain => self.uncertain_weight += weight,
        }
    }

    pub fn get(&self, label: VerdictLabel) -> f64 {
        match label {
            VerdictLabel::True => self.true_weight,
            VerdictLabel::Fake => self.fake_weight,
            VerdictLabel::Uncertain => self.uncertain_weight,
        }
    }

    /// Label with the strictly largest sum; equal sums go to the earlier label in
    /// [`VerdictLabel::PRIORITY`]
    pub fn winner(&self) -> VerdictLabel {
        let mut best = VerdictLabel::PRIORITY[0];
        for label in &VerdictLabel::PRIORITY[1..] {
            if self.get(*label) > self.get(best) {
                best = *label;
            }
        }
        best
    }
}

/// Outcome of one aggregation run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregateResult {
    /// Same order as the predictions passed in
    pub per_model: Vec<ModelVerdict>,
    pub tally: VoteTally,
    pub final_verdict: VerdictLabel,
}
