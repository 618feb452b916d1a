pub mod algorithms;
pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod utils;

pub use algorithms::{
    estimate_anonymous_score, AnonymousEstimate, AnonymousEstimator, FactorModel, GramSolver,
};
pub use config::Config;
pub use error::{EstimateError, Result};
pub use models::*;

use services::model_store::{ModelStore, ServingModel};
use services::serving::ServingService;
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub model_store: Arc<ModelStore>,
    pub serving_service: Arc<ServingService>,
}

impl AppState {
    /// Builds the serving state, loading the configured model file if there is one.
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let config = Arc::new(config);
        let model_store = Arc::new(ModelStore::new());

        match config.model.path.as_deref() {
            Some(path) => {
                let model = ServingModel::from_json_file(path, config.model.implicit)?;
                model_store.load(model);
            }
            None => info!("No model path configured; serving will return 503 until a model is loaded"),
        }

        Ok(Self::with_model_store(config, model_store))
    }

    pub fn with_model_store(config: Arc<Config>, model_store: Arc<ModelStore>) -> Self {
        let serving_service = Arc::new(ServingService::new(model_store.clone(), &config));

        Self {
            config,
            model_store,
            serving_service,
        }
    }
}

pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();
}
