//! Error types for verdict computation

use thiserror::Error;

use crate::adapter::AdapterError;

/// Error type for ensemble aggregation
#[derive(Debug, Error, PartialEq)]
pub enum AggregationError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// No model outputs reached the aggregator; an integration fault, never a verdict
    #[error("No model predictions to aggregate")]
    NoPredictions,
}

/// Error type for a full detect run (adapters + aggregation)
#[derive(Debug, Error)]
pub enum EnsembleError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Model '{model}' unavailable: {source}")]
    ModelUnavailable {
        model: String,
        #[source]
        source: AdapterError,
    },

    #[error(transparent)]
    Aggregation(#[from] AggregationError),
}
