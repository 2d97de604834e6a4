//! CLI configuration

use ohmage_sdk::{EngineConfig, MissingBindingPolicy};
use serde::{Deserialize, Serialize};

/// CLI configuration, read from `config/ohmage.*` and `OHMAGE_*` variables
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// Default tracing filter when `RUST_LOG` is unset
    pub log_level: String,

    pub max_depth: usize,

    pub missing_binding_policy: MissingBindingPolicy,

    pub require_prior_reference: bool,
}

impl Default for CliConfig {
    fn default() -> Self {
        let engine = EngineConfig::default();
        Self {
            log_level: "info".to_string(),
            max_depth: engine.max_depth,
            missing_binding_policy: engine.missing_binding_policy,
            require_prior_reference: engine.require_prior_reference,
        }
    }
}

impl CliConfig {
    /// Load configuration from environment variables and config file
    pub fn load() -> anyhow::Result<Self> {
        // Load .env file if exists
        dotenvy::dotenv().ok();

        let config_result = config::Config::builder()
            .add_source(config::File::with_name("config/ohmage").required(false))
            .add_source(config::Environment::with_prefix("OHMAGE").try_parsing(true))
            .build();

        match config_result {
            Ok(cfg) => cfg
                .try_deserialize()
                .map_err(|e| anyhow::anyhow!("Failed to deserialize config: {}", e)),
            Err(e) => {
                tracing::info!("No usable configuration ({}), using defaults", e);
                Ok(Self::default())
            }
        }
    }

    /// Engine configuration for one-shot CLI use
    pub fn engine_config(&self) -> EngineConfig {
        EngineConfig::new()
            .with_max_depth(self.max_depth)
            .with_missing_binding_policy(self.missing_binding_policy)
            .require_prior_reference(self.require_prior_reference)
            .cache_conditions(false)
    }
}
