//! CLI configuration: optional `stay.toml` plus `STAY_*` environment variables.

use std::path::Path;

use ::config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct StayConfig {
    /// `tracing` filter directive used when neither `RUST_LOG` nor `-v` is set.
    pub log_level: String,
    pub suggest: SuggestConfig,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct SuggestConfig {
    pub limit: usize,
    pub max_requests: u32,
    pub window_secs: u64,
}

impl Default for StayConfig {
    fn default() -> Self {
        Self {
            log_level: "warn".to_string(),
            suggest: SuggestConfig::default(),
        }
    }
}

impl Default for SuggestConfig {
    fn default() -> Self {
        Self {
            limit: 5,
            max_requests: 10,
            window_secs: 60,
        }
    }
}

impl StayConfig {
    /// Load from `path` if given (must exist), otherwise from an optional
    /// `stay.toml` in the working directory. `STAY_LOG_LEVEL` and
    /// `STAY_SUGGEST__LIMIT`-style variables override file values.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let file = match path {
            Some(path) => File::from(path).required(true),
            None => File::with_name("stay").required(false),
        };

        Config::builder()
            .add_source(file)
            .add_source(
                Environment::with_prefix("STAY")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize::<StayConfig>()
    }
}
