use crate::algorithms::{FactorModel, GramSolver};
use crate::error::{EstimateError, Result};
use crate::models::{ModelFile, ModelInfo};
use crate::utils::validation::{validate_features, validate_item_vector};
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use tracing::info;

/// Immutable snapshot of an ALS model as seen by the serving layer.
#[derive(Debug, Clone)]
pub struct ServingModel {
    features: usize,
    implicit: bool,
    item_vectors: HashMap<String, Vec<f32>>,
    solver: GramSolver,
    loaded_at: DateTime<Utc>,
}

impl ServingModel {
    pub fn new(
        features: usize,
        implicit: bool,
        item_vectors: HashMap<String, Vec<f32>>,
    ) -> Result<Self> {
        validate_features(features)?;
        for (item_id, vector) in &item_vectors {
            validate_item_vector(item_id, vector, features)?;
        }

        let solver =
            GramSolver::from_item_vectors(features, item_vectors.values().map(|v| v.as_slice()))?;

        Ok(Self {
            features,
            implicit,
            item_vectors,
            solver,
            loaded_at: Utc::now(),
        })
    }

    /// `default_implicit` applies when the file does not say which mode it was trained in.
    pub fn from_model_file(file: ModelFile, default_implicit: bool) -> Result<Self> {
        Self::new(
            file.features,
            file.implicit.unwrap_or(default_implicit),
            file.items,
        )
    }

    pub fn from_json_file<P: AsRef<Path>>(path: P, default_implicit: bool) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        let file: ModelFile = serde_json::from_str(&contents)?;
        let model = Self::from_model_file(file, default_implicit)?;

        info!(
            "Loaded model from {}: {} items, {} features, implicit={}",
            path.display(),
            model.num_items(),
            model.features,
            model.implicit
        );
        Ok(model)
    }

    pub fn num_items(&self) -> usize {
        self.item_vectors.len()
    }

    pub fn info(&self) -> ModelInfo {
        ModelInfo {
            features: self.features,
            implicit: self.implicit,
            num_items: self.num_items(),
            loaded_at: self.loaded_at,
        }
    }
}

impl FactorModel for ServingModel {
    fn item_vector(&self, item_id: &str) -> Option<&[f32]> {
        self.item_vectors.get(item_id).map(|v| v.as_slice())
    }

    fn features(&self) -> usize {
        self.features
    }

    fn is_implicit(&self) -> bool {
        self.implicit
    }

    fn solve(&self, b: &[f64]) -> Result<Vec<f64>> {
        self.solver.solve(b)
    }
}

/// Holds the current model snapshot. Reloads swap the whole `Arc`, so requests
/// already holding a snapshot keep reading the old one.
#[derive(Debug, Default)]
pub struct ModelStore {
    current: RwLock<Option<Arc<ServingModel>>>,
}

impl ModelStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_model(model: ServingModel) -> Self {
        let store = Self::new();
        store.load(model);
        store
    }

    pub fn load(&self, model: ServingModel) {
        let model = Arc::new(model);
        info!(
            "Swapping in model: {} items, {} features",
            model.num_items(),
            model.features
        );
        *self.current.write() = Some(model);
    }

    pub fn current(&self) -> Result<Arc<ServingModel>> {
        self.current
            .read()
            .as_ref()
            .cloned()
            .ok_or(EstimateError::ModelNotLoaded)
    }

    pub fn is_loaded(&self) -> bool {
        self.current.read().is_some()
    }
}
