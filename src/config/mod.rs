use crate::algorithms::NEUTRAL_PRIOR_CONFIDENCE;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub model: ModelConfig,
    pub estimation: EstimationConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub workers: usize,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> anyhow::Result<SocketAddr> {
        Ok(format!("{}:{}", self.host, self.port).parse()?)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    /// JSON model file loaded at startup. The server answers 503 until one is loaded.
    pub path: Option<String>,
    /// Mode assumed when the model file does not carry an `implicit` flag.
    pub implicit: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EstimationConfig {
    pub prior_confidence: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 8080,
                workers: num_cpus::get(),
            },
            model: ModelConfig {
                path: None,
                implicit: true,
            },
            estimation: EstimationConfig {
                prior_confidence: NEUTRAL_PRIOR_CONFIDENCE,
            },
        }
    }
}

impl Config {
    pub fn from_file(path: &str) -> anyhow::Result<Self> {
        let defaults = config::Config::try_from(&Config::default())?;
        let settings = config::Config::builder()
            .add_source(defaults)
            .add_source(config::File::with_name(path))
            .add_source(
                config::Environment::with_prefix("ANONREC")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?;

        Ok(settings.try_deserialize()?)
    }
}
