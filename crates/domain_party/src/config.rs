//! Business search configuration

use std::time::Duration;

use serde::Deserialize;

use core_kernel::{CircuitBreakerConfig, CoreError};
use crate::search::MAX_SEARCH_RESULTS;

/// Settings for the registry business search service
///
/// Read from `SEARCH_*` environment variables; nested circuit breaker values
/// use a double underscore, e.g. `SEARCH_CIRCUIT_BREAKER__FAILURE_THRESHOLD`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct BusinessSearchConfig {
    /// Base URL of the registry search API
    pub base_url: String,
    pub api_key: Option<String>,
    /// Premium account id sent as `Account-Id`
    pub account_id: Option<String>,
    pub timeout_secs: u64,
    /// Retries after the first attempt for transient failures
    pub retry_attempts: u32,
    pub max_results: usize,
    /// Queries shorter than this clear suggestions without a call
    pub min_query_chars: usize,
    pub circuit_breaker: CircuitBreakerConfig,
}

impl Default for BusinessSearchConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080/api/v1".to_string(),
            api_key: None,
            account_id: None,
            timeout_secs: 10,
            retry_attempts: 2,
            max_results: MAX_SEARCH_RESULTS,
            min_query_chars: 3,
            circuit_breaker: CircuitBreakerConfig::default(),
        }
    }
}

impl BusinessSearchConfig {
    /// Loads configuration from environment
    pub fn from_env() -> Result<Self, CoreError> {
        Self::from_source(config::Environment::with_prefix("SEARCH"))
    }

    /// Loads configuration from an environment source
    pub fn from_source(source: config::Environment) -> Result<Self, CoreError> {
        let config: Self = config::Config::builder()
            .add_source(
                source
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .and_then(config::Config::try_deserialize)
            .map_err(|e| CoreError::configuration(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects settings the adapter cannot work with
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.base_url.trim().is_empty() {
            return Err(CoreError::configuration("search base_url is empty"));
        }
        if self.timeout_secs == 0 {
            return Err(CoreError::configuration("search timeout_secs must be positive"));
        }
        if self.max_results == 0 || self.max_results > MAX_SEARCH_RESULTS {
            return Err(CoreError::configuration(format!(
                "search max_results must be between 1 and {}",
                MAX_SEARCH_RESULTS
            )));
        }
        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
