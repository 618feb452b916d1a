use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One (item, weight) interaction supplied for an anonymous user.
#[derive(Debug, Clone, PartialEq)]
pub struct Observation {
    pub item_id: String,
    pub value: f64,
}

impl Observation {
    pub fn new(item_id: impl Into<String>, value: f64) -> Self {
        Self {
            item_id: item_id.into(),
            value,
        }
    }
}

/// On-disk layout of a serving model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelFile {
    pub features: usize,
    #[serde(default)]
    pub implicit: Option<bool>,
    pub items: HashMap<String, Vec<f32>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    pub model_loaded: bool,
    pub features: Option<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelInfo {
    pub features: usize,
    pub implicit: bool,
    pub num_items: usize,
    pub loaded_at: chrono::DateTime<chrono::Utc>,
}
