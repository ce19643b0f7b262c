//! Application state and service initialization
//!
//! This module centralizes all service initialization and dependency injection,
//! making it easier to manage the application lifecycle and test services.

use std::num::NonZeroUsize;
use std::sync::Arc;
use std::time::Duration;

use crate::adapter::{AdapterError, build_adapters};
use crate::model::Config;
use crate::service::factcheck::FactCheckError;
use crate::service::verdict::weights::WeightError;
use crate::service::verdict::{Aggregator, ModelWeights};
use crate::service::{EnsembleService, FactCheckClient, FactCheckService, JwtVerifier};

const ENV_JWT_SECRET: &str = "FACTGUARD_JWT_SECRET";
const ENV_FACTCHECK_API_KEY: &str = "FACTCHECK_API_KEY";

/// Application state containing all services and shared resources
pub struct AppState {
    /// Weighted-vote ensemble over the registered model adapters
    pub ensemble_service: Arc<EnsembleService>,
    /// Fact-check lookup and ranking
    pub factcheck_service: Arc<FactCheckService>,
    /// Bearer token verification for protected routes
    pub jwt_verifier: Arc<JwtVerifier>,
}

/// Secrets read from the environment at startup
#[derive(Debug, Clone)]
pub struct Secrets {
    pub jwt_secret: String,
    pub factcheck_api_key: String,
}

impl Secrets {
    pub fn from_env() -> Result<Self, AppError> {
        Ok(Self {
            jwt_secret: required_env(ENV_JWT_SECRET)?,
            factcheck_api_key: required_env(ENV_FACTCHECK_API_KEY)?,
        })
    }
}

fn required_env(name: &'static str) -> Result<String, AppError> {
    std::env::var(name)
        .ok()
        .filter(|value| !value.trim().is_empty())
        .ok_or(AppError::MissingConfig(name))
}

impl AppState {
    /// Initialize all services and build application state
    ///
    /// This performs:
    /// 1. Secret loading (`FACTGUARD_JWT_SECRET`, `FACTCHECK_API_KEY`)
    /// 2. Weight table and threshold validation
    /// 3. Model adapter and fact-check client construction
    pub fn new(config: Config) -> Result<Self, AppError> {
        let secrets = Secrets::from_env()?;
        let timeout = Duration::from_secs(config.factcheck.request_timeout_secs);
        let factcheck_client = match &config.factcheck.base_url {
            Some(base_url) => FactCheckClient::with_base_url(
                base_url.to_string(),
                secrets.factcheck_api_key.clone(),
                config.factcheck.page_size,
                timeout,
            )?,
            None => FactCheckClient::new(
                secrets.factcheck_api_key.clone(),
                config.factcheck.page_size,
                timeout,
            )?,
        };

        Self::build(config, &secrets, Arc::new(factcheck_client))
    }

    /// Build the service graph from validated configuration
    fn build(
        config: Config,
        secrets: &Secrets,
        claim_source: Arc<dyn crate::service::factcheck::ClaimSearch>,
    ) -> Result<Self, AppError> {
        let ensemble_service = Arc::new(Self::build_ensemble_service(&config)?);

        let top_n = NonZeroUsize::new(config.factcheck.top_n)
            .ok_or_else(|| AppError::InvalidConfig("factcheck.top_n must be at least 1".into()))?;

        let factcheck_service = Arc::new(FactCheckService::new(
            claim_source,
            top_n,
            config.factcheck.default_language,
        ));

        Ok(Self {
            ensemble_service,
            factcheck_service,
            jwt_verifier: Arc::new(JwtVerifier::new(&secrets.jwt_secret)),
        })
    }

    /// Build ensemble service with all dependencies
    fn build_ensemble_service(config: &Config) -> Result<EnsembleService, AppError> {
        let ensemble = &config.ensemble;

        Aggregator::validate_threshold(ensemble.default_confidence_threshold).map_err(|e| {
            AppError::InvalidConfig(format!("ensemble.default_confidence_threshold: {}", e))
        })?;

        let weights = ModelWeights::new(ensemble.weights.clone())?;
        if weights.is_empty() {
            tracing::warn!("Weight table is empty; every vote will use the default weight");
        } else {
            tracing::info!(weights = weights.len(), "Loaded vote weight table");
        }

        let adapters = build_adapters(
            &ensemble.models,
            Duration::from_secs(ensemble.request_timeout_secs),
        )?;

        if adapters.is_empty() {
            tracing::warn!("No model adapters configured; detection requests will fail");
        }

        Ok(EnsembleService::new(
            adapters,
            Aggregator::new(Arc::new(weights)),
            ensemble.default_confidence_threshold,
        ))
    }
}

/// Application-level errors
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum AppError {
    /// Missing required configuration
    #[error("Missing required configuration: {0}")]
    MissingConfig(&'static str),

    /// Invalid configuration value
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid weight table: {0}")]
    Weights(#[from] WeightError),

    #[error("Failed to build model adapters: {0}")]
    Adapters(#[from] AdapterError),

    #[error("Failed to build fact-check client: {0}")]
    FactCheckClient(#[from] FactCheckError),
}
