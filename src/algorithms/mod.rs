pub mod estimator;
pub mod observation;
pub mod solver;
pub mod target;

pub use estimator::{AnonymousEstimator, AnonymousUserFeatures};
pub use observation::{parse_observation, parse_observations};
pub use solver::GramSolver;
pub use target::{compute_target_value, TargetValueFn, NEUTRAL_PRIOR_CONFIDENCE};

use crate::error::{EstimateError, Result};

/// Read-only view of a trained factor model.
///
/// Implementations must be safe to read from many requests at once; the
/// estimator never mutates anything behind this trait.
pub trait FactorModel: Send + Sync {
    fn item_vector(&self, item_id: &str) -> Option<&[f32]>;
    fn features(&self) -> usize;
    fn is_implicit(&self) -> bool;
    /// Solves `(YᵀY) x = b` for `x`.
    fn solve(&self, b: &[f64]) -> Result<Vec<f64>>;
}

/// Score for an anonymous user against one target item, with how many of the
/// supplied observations contributed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnonymousEstimate {
    pub score: f64,
    pub used: usize,
    pub skipped: usize,
}

/// Estimates how a user described only by `raw_tokens` (`itemID[=value]`)
/// would score `target_item_id`.
///
/// An unknown target fails with `NotFound` before any token is parsed; unknown
/// observed items are skipped.
pub fn estimate_anonymous_score<M, I, S>(
    estimator: &AnonymousEstimator,
    model: &M,
    target_item_id: &str,
    raw_tokens: I,
) -> Result<AnonymousEstimate>
where
    M: FactorModel + ?Sized,
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let target_vector = model
        .item_vector(target_item_id)
        .ok_or_else(|| EstimateError::NotFound(target_item_id.to_string()))?;

    let observations = parse_observations(raw_tokens)?;
    let user = estimator.build_features(&observations, model)?;
    let score = crate::utils::dot(&user.vector, target_vector)?;

    Ok(AnonymousEstimate {
        score,
        used: user.used,
        skipped: user.skipped,
    })
}
