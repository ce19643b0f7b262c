//! Vote weights for ensemble members

use std::collections::BTreeMap;

/// Weight applied to a model that has no entry in the weight table
pub const DEFAULT_VOTE_WEIGHT: f64 = 1.0;

/// Source of per-model vote weights
pub trait VoteWeights: Send + Sync {
    /// Registered weight for `model_name`, if any
    fn weight_for(&self, model_name: &str) -> Option<f64>;
}

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum WeightError {
    #[error("weight for model '{model}' must be a positive finite number, got {weight}")]
    NotPositive { model: String, weight: f64 },
}

/// Static model name -> historical F1 score table, fixed after startup
#[derive(Debug, Clone, Default)]
pub struct ModelWeights {
    weights: BTreeMap<String, f64>,
}

impl ModelWeights {
    pub fn new(weights: BTreeMap<String, f64>) -> Result<Self, WeightError> {
        if let Some((model, weight)) = weights
            .iter()
            .find(|(_, w)| !w.is_finite() || **w <= 0.0)
        {
            return Err(WeightError::NotPositive {
                model: model.clone(),
                weight: *weight,
            });
        }

        Ok(Self { weights })
    }

    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }
}

impl VoteWeights for ModelWeights {
    fn weight_for(&self, model_name: &str) -> Option<f64> {
        self.weights.get(model_name).copied()
    }
}

impl<const N: usize> TryFrom<[(&str, f64); N]> for ModelWeights {
    type Error = WeightError;

    fn try_from(entries: [(&str, f64); N]) -> Result<Self, Self::Error> {
        Self::new(
            entries
                .into_iter()
                .map(|(name, weight)| (name.to_string(), weight))
                .collect(),
        )
    }
}
