use super::target::{compute_target_value, TargetValueFn, NEUTRAL_PRIOR_CONFIDENCE};
use super::FactorModel;
use crate::error::{EstimateError, Result};
use crate::models::Observation;
use crate::utils;
use tracing::debug;

/// Feature vector for a fictitious user, plus how much of the request fed it.
#[derive(Debug, Clone, PartialEq)]
pub struct AnonymousUserFeatures {
    pub vector: Vec<f64>,
    pub used: usize,
    pub skipped: usize,
}

/// Derives a user feature vector from a handful of (item, value) observations,
/// using only the item vectors and `YᵀY` solver of a trained model.
///
/// Each value is read as a fictitious `Qui = Xu · Yiᵀ`. The estimator builds
/// `Qu · Y = Σ target(Qui) · Yi` and solves `Xu · (YᵀY) = Qu · Y` for `Xu`,
/// which is the closed-form ALS row update for a user the model never saw.
#[derive(Debug, Clone, Copy)]
pub struct AnonymousEstimator {
    target_value: TargetValueFn,
    prior_confidence: f64,
}

impl Default for AnonymousEstimator {
    fn default() -> Self {
        Self::new(compute_target_value, NEUTRAL_PRIOR_CONFIDENCE)
    }
}

impl AnonymousEstimator {
    pub fn new(target_value: TargetValueFn, prior_confidence: f64) -> Self {
        Self {
            target_value,
            prior_confidence,
        }
    }

    pub fn with_prior_confidence(mut self, prior_confidence: f64) -> Self {
        self.prior_confidence = prior_confidence;
        self
    }

    pub fn prior_confidence(&self) -> f64 {
        self.prior_confidence
    }

    pub fn estimate<M>(&self, observations: &[Observation], model: &M) -> Result<Vec<f64>>
    where
        M: FactorModel + ?Sized,
    {
        Ok(self.build_features(observations, model)?.vector)
    }

    pub fn build_features<M>(
        &self,
        observations: &[Observation],
        model: &M,
    ) -> Result<AnonymousUserFeatures>
    where
        M: FactorModel + ?Sized,
    {
        let features = model.features();
        let implicit = model.is_implicit();

        let mut qu_y = vec![0.0f64; features];
        let mut used = 0;
        let mut skipped = 0;

        for observation in observations {
            let Some(item_vector) = model.item_vector(&observation.item_id) else {
                skipped += 1;
                continue;
            };

            if item_vector.len() != features {
                tracing::error!(
                    "Item {} has {} features, model declares {}",
                    observation.item_id,
                    item_vector.len(),
                    features
                );
                return Err(EstimateError::DimensionMismatch {
                    expected: features,
                    actual: item_vector.len(),
                });
            }

            let target_qui = (self.target_value)(implicit, observation.value, self.prior_confidence);
            // NaN means "no change"
            if target_qui.is_nan() {
                skipped += 1;
                continue;
            }

            utils::add_scaled(&mut qu_y, target_qui, item_vector);
            used += 1;
        }

        let vector = model.solve(&qu_y)?;
        if vector.len() != features {
            tracing::error!(
                "Solver returned {} features, model declares {}",
                vector.len(),
                features
            );
            return Err(EstimateError::DimensionMismatch {
                expected: features,
                actual: vector.len(),
            });
        }

        debug!(
            "Built anonymous user features: {} observations used, {} skipped, {} features, norm {:.4}",
            used,
            skipped,
            features,
            utils::norm(&vector)
        );

        Ok(AnonymousUserFeatures {
            vector,
            used,
            skipped,
        })
    }
}
