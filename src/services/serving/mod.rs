use crate::algorithms::{estimate_anonymous_score, AnonymousEstimator, FactorModel};
use crate::config::Config;
use crate::error::{EstimateError, Result};
use crate::models::HealthStatus;
use crate::services::model_store::ModelStore;
use dashmap::DashMap;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, error, warn};

/// Answers anonymous-user estimates against whichever model snapshot is current.
pub struct ServingService {
    model_store: Arc<ModelStore>,
    estimator: AnonymousEstimator,
    serving_stats: Arc<DashMap<String, u64>>,
}

impl ServingService {
    pub fn new(model_store: Arc<ModelStore>, config: &Config) -> Self {
        Self {
            model_store,
            estimator: AnonymousEstimator::default()
                .with_prior_confidence(config.estimation.prior_confidence),
            serving_stats: Arc::new(DashMap::new()),
        }
    }

    pub fn with_estimator(model_store: Arc<ModelStore>, estimator: AnonymousEstimator) -> Self {
        Self {
            model_store,
            estimator,
            serving_stats: Arc::new(DashMap::new()),
        }
    }

    /// Estimates the score of `to_item_id` for a user known only by `item_tokens`.
    pub fn estimate_for_anonymous<S: AsRef<str>>(
        &self,
        to_item_id: &str,
        item_tokens: &[S],
    ) -> Result<f64> {
        self.increment_stat("total_requests", 1);

        let result = self.estimate_inner(to_item_id, item_tokens);
        match &result {
            Ok(_) => self.increment_stat("successful_requests", 1),
            Err(EstimateError::NotFound(id)) => {
                warn!("Unknown target item: {}", id);
                self.increment_stat("unknown_target", 1);
            }
            Err(EstimateError::MalformedObservation { token }) => {
                debug!("Rejected malformed observation: {}", token);
                self.increment_stat("malformed_requests", 1);
            }
            Err(EstimateError::ModelNotLoaded) => {
                self.increment_stat("model_not_loaded", 1);
            }
            Err(e) => {
                error!("Anonymous estimate for {} failed: {}", to_item_id, e);
                self.increment_stat("failed_requests", 1);
            }
        }
        result
    }

    fn estimate_inner<S: AsRef<str>>(&self, to_item_id: &str, item_tokens: &[S]) -> Result<f64> {
        let model = self.model_store.current()?;

        let estimate = estimate_anonymous_score(&self.estimator, &*model, to_item_id, item_tokens)?;
        if estimate.skipped > 0 {
            self.increment_stat("skipped_observations", estimate.skipped as u64);
        }
        Ok(estimate.score)
    }

    pub fn health(&self) -> HealthStatus {
        let model = self.model_store.current().ok();
        HealthStatus {
            status: if model.is_some() { "healthy" } else { "loading" }.to_string(),
            model_loaded: model.is_some(),
            features: model.map(|m| m.features()),
        }
    }

    pub fn serving_stats(&self) -> HashMap<String, u64> {
        self.serving_stats
            .iter()
            .map(|entry| (entry.key().clone(), *entry.value()))
            .collect()
    }

    fn increment_stat(&self, key: &str, by: u64) {
        let mut counter = self.serving_stats.entry(key.to_string()).or_insert(0);
        *counter += by;
    }
}
