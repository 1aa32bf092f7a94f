//! Configuration for the catalogue store
//!
//! Defaults reproduce the stock behaviour: three attempts per mutation, no
//! pause between attempts, and no retroactive category refresh. Every
//! field can be overridden from the environment.

use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;
use tracing::{info, warn};

use crate::application::retry::RetryPolicy;
use crate::error::{LearningError, LearningResult};

/// Upper bound on `mutation_retries`
pub const MAX_MUTATION_RETRIES: u32 = 10;

/// Store configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Additional attempts after a failed mutation
    #[serde(default = "default_mutation_retries")]
    pub mutation_retries: u32,

    /// Pause between attempts in milliseconds
    #[serde(default)]
    pub retry_delay_ms: u64,

    /// Re-resolve cached courses when their category is edited or deleted
    #[serde(default)]
    pub refresh_relations_on_category_change: bool,

    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_mutation_retries() -> u32 {
    2
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            mutation_retries: default_mutation_retries(),
            retry_delay_ms: 0,
            refresh_relations_on_category_change: false,
            log_level: default_log_level(),
        }
    }
}

impl StoreConfig {
    /// Load configuration from environment variables
    pub fn load() -> LearningResult<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Parse a JSON document; missing fields take their defaults
    pub fn from_json(json: &str) -> LearningResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Build a configuration from defaults plus whatever `lookup` returns
    pub fn from_lookup<F>(lookup: F) -> LearningResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(retries) = lookup("LEARNING_MUTATION_RETRIES") {
            match retries.parse::<u32>() {
                Ok(retries) => config.mutation_retries = retries,
                Err(_) => warn!("Invalid LEARNING_MUTATION_RETRIES value: {}", retries),
            }
        }

        if let Some(delay) = lookup("LEARNING_RETRY_DELAY_MS") {
            match delay.parse::<u64>() {
                Ok(delay) => config.retry_delay_ms = delay,
                Err(_) => warn!("Invalid LEARNING_RETRY_DELAY_MS value: {}", delay),
            }
        }

        if let Some(refresh) = lookup("LEARNING_REFRESH_RELATIONS") {
            config.refresh_relations_on_category_change =
                refresh.eq_ignore_ascii_case("true") || refresh == "1";
        }

        if let Some(log_level) = lookup("LEARNING_LOG_LEVEL") {
            config.log_level = log_level;
        }

        config.validate()?;

        info!(
            "Store configuration: {} retries, {}ms delay, relation refresh {}",
            config.mutation_retries,
            config.retry_delay_ms,
            if config.refresh_relations_on_category_change { "on" } else { "off" }
        );

        Ok(config)
    }

    /// Reject values the store cannot work with
    pub fn validate(&self) -> LearningResult<()> {
        if self.mutation_retries > MAX_MUTATION_RETRIES {
            return Err(LearningError::ConfigurationError(format!(
                "mutation_retries must be at most {}, got {}",
                MAX_MUTATION_RETRIES, self.mutation_retries
            )));
        }
        Ok(())
    }

    /// Retry policy derived from this configuration
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_retries: self.mutation_retries,
            delay: Duration::from_millis(self.retry_delay_ms),
        }
    }
}
