//! Registry Search Adapter
//!
//! HTTP adapter for the registry's business search API. It implements
//! [`BusinessSearchPort`] so the search session can run against the real
//! service or the in-memory mock interchangeably.
//!
//! # Request
//!
//! ```text
//! GET {base_url}/businesses/search/facets?start=0&rows={limit}&query=value:{query}
//! x-apikey: {api_key}
//! Account-Id: {account_id}
//! ```
//!
//! # Error Handling
//!
//! API errors are mapped to `PortError` variants:
//! - 400 -> `PortError::Validation`
//! - 404 -> `PortError::NotFound`
//! - 401/403 -> `PortError::Unauthorized`
//! - 429 -> `PortError::RateLimited`
//! - 5xx -> `PortError::ServiceUnavailable`
//! - Timeouts -> `PortError::Timeout`
//! - Undecodable bodies -> `PortError::Transformation`
//! - Other -> `PortError::Internal`
//!
//! Transient failures are retried with exponential backoff, and repeated
//! failures open a circuit breaker that short-circuits calls until the reset
//! timeout elapses.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;
use tokio::sync::RwLock;
use tracing::{debug, instrument, warn};

use core_kernel::{
    AdapterHealth, CircuitBreakerConfig, CoreError, DomainPort, HealthCheckResult,
    HealthCheckable, OperationMetadata, PortError,
};

use crate::config::BusinessSearchConfig;
use crate::ports::{BusinessMatch, BusinessSearchPort};

const SERVICE_NAME: &str = "registry-search";
const BASE_BACKOFF_MS: u64 = 100;

/// Circuit breaker state for fault tolerance
#[derive(Debug)]
struct CircuitBreaker {
    config: CircuitBreakerConfig,
    failure_count: AtomicU64,
    success_count: AtomicU64,
    is_open: AtomicBool,
    opened_at: RwLock<Option<Instant>>,
}

impl CircuitBreaker {
    fn new(config: CircuitBreakerConfig) -> Self {
        Self {
            config,
            failure_count: AtomicU64::new(0),
            success_count: AtomicU64::new(0),
            is_open: AtomicBool::new(false),
            opened_at: RwLock::new(None),
        }
    }

    async fn is_available(&self) -> bool {
        if !self.is_open.load(Ordering::Relaxed) {
            return true;
        }

        // Half-open once the reset timeout has elapsed
        match *self.opened_at.read().await {
            Some(time) => time.elapsed() >= Duration::from_secs(self.config.reset_timeout_secs),
            None => false,
        }
    }

    fn record_success(&self) {
        self.failure_count.store(0, Ordering::Relaxed);
        let success = self.success_count.fetch_add(1, Ordering::Relaxed) + 1;
        if success >= u64::from(self.config.success_threshold) {
            self.is_open.store(false, Ordering::Relaxed);
            self.success_count.store(0, Ordering::Relaxed);
        }
    }

    async fn record_failure(&self) {
        self.success_count.store(0, Ordering::Relaxed);
        let failures = self.failure_count.fetch_add(1, Ordering::Relaxed) + 1;
        if failures >= u64::from(self.config.failure_threshold) {
            if !self.is_open.swap(true, Ordering::Relaxed) {
                warn!(failures, "Registry search circuit breaker opened");
            }
            *self.opened_at.write().await = Some(Instant::now());
        }
    }
}

/// Registry business search over HTTP
#[derive(Debug)]
pub struct RegistrySearchAdapter {
    config: BusinessSearchConfig,
    client: reqwest::Client,
    circuit_breaker: CircuitBreaker,
}

impl RegistrySearchAdapter {
    /// Creates an adapter with a pooled client
    ///
    /// # Errors
    ///
    /// `CoreError::Configuration` if the configuration is invalid or the
    /// HTTP client cannot be built.
    pub fn new(config: BusinessSearchConfig) -> Result<Self, CoreError> {
        config.validate()?;
        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| CoreError::configuration(format!("search HTTP client: {}", e)))?;
        let circuit_breaker = CircuitBreaker::new(config.circuit_breaker.clone());
        Ok(Self {
            config,
            client,
            circuit_breaker,
        })
    }

    pub fn base_url(&self) -> &str {
        self.config.base_url.trim_end_matches('/')
    }

    /// Checks if the circuit breaker is open (blocking requests)
    pub async fn is_circuit_open(&self) -> bool {
        !self.circuit_breaker.is_available().await
    }

    async fn search_once(
        &self,
        query: &str,
        limit: usize,
        metadata: Option<&OperationMetadata>,
    ) -> Result<Vec<BusinessMatch>, PortError> {
        let url = format!("{}/businesses/search/facets", self.base_url());
        let mut request = self.client.get(&url).query(&[
            ("start", "0".to_string()),
            ("rows", limit.to_string()),
            ("query", format!("value:{}", query)),
        ]);

        if let Some(api_key) = &self.config.api_key {
            request = request.header("x-apikey", api_key);
        }
        let account_id = metadata
            .and_then(|m| m.account_id.as_deref())
            .or(self.config.account_id.as_deref());
        if let Some(account_id) = account_id {
            request = request.header("Account-Id", account_id);
        }
        if let Some(correlation_id) = metadata.and_then(|m| m.correlation_id.as_deref()) {
            request = request.header("X-Correlation-Id", correlation_id);
        }

        let response = request.send().await.map_err(|e| self.map_transport_error(e))?;
        let status = response.status();
        if !status.is_success() {
            let retry_after = response
                .headers()
                .get(reqwest::header::RETRY_AFTER)
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse().ok());
            return Err(map_status(status, query, retry_after));
        }

        let body: SearchResponse = response
            .json()
            .await
            .map_err(|e| PortError::transformation(format!("search response: {}", e)))?;
        Ok(body.into_matches(limit))
    }

    fn map_transport_error(&self, error: reqwest::Error) -> PortError {
        if error.is_timeout() {
            PortError::Timeout {
                operation: "search_businesses".to_string(),
                duration_ms: self.config.timeout_secs * 1000,
            }
        } else if error.is_decode() {
            PortError::transformation(error.to_string())
        } else {
            PortError::Connection {
                message: format!("{} unreachable", SERVICE_NAME),
                source: Some(Box::new(error)),
            }
        }
    }
}

/// Maps a non-success HTTP status onto a port error
fn map_status(status: StatusCode, query: &str, retry_after_secs: Option<u64>) -> PortError {
    match status {
        StatusCode::BAD_REQUEST => PortError::validation_field(
            format!("search rejected query {:?}", query),
            "query",
        ),
        StatusCode::NOT_FOUND => PortError::not_found("Business search", query),
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => PortError::Unauthorized {
            message: format!("{} returned {}", SERVICE_NAME, status.as_u16()),
        },
        StatusCode::TOO_MANY_REQUESTS => PortError::RateLimited {
            retry_after_secs: retry_after_secs.unwrap_or(1),
        },
        s if s.is_server_error() => PortError::ServiceUnavailable {
            service: SERVICE_NAME.to_string(),
        },
        s => PortError::internal(format!("{} returned unexpected status {}", SERVICE_NAME, s)),
    }
}

fn backoff(attempt: u32) -> Duration {
    Duration::from_millis(BASE_BACKOFF_MS.saturating_mul(1 << attempt.min(6)))
}

impl DomainPort for RegistrySearchAdapter {}

#[async_trait]
impl HealthCheckable for RegistrySearchAdapter {
    async fn health_check(&self) -> HealthCheckResult {
        let start = Instant::now();

        if self.is_circuit_open().await {
            return HealthCheckResult::now(
                SERVICE_NAME,
                AdapterHealth::Degraded,
                0,
                Some("Circuit breaker is open".to_string()),
            );
        }

        let url = format!("{}/ops/healthz", self.base_url());
        let (status, message) = match self.client.get(&url).send().await {
            Ok(response) if response.status().is_success() => (AdapterHealth::Healthy, None),
            Ok(response) => (
                AdapterHealth::Degraded,
                Some(format!("health endpoint returned {}", response.status())),
            ),
            Err(error) => (AdapterHealth::Unhealthy, Some(error.to_string())),
        };

        HealthCheckResult::now(SERVICE_NAME, status, start.elapsed().as_millis() as u64, message)
    }
}

#[async_trait]
impl BusinessSearchPort for RegistrySearchAdapter {
    #[instrument(skip(self, metadata))]
    async fn search_businesses(
        &self,
        query: &str,
        limit: usize,
        metadata: Option<OperationMetadata>,
    ) -> Result<Vec<BusinessMatch>, PortError> {
        let query = query.trim();
        if query.is_empty() || limit == 0 {
            return Ok(Vec::new());
        }

        if !self.circuit_breaker.is_available().await {
            return Err(PortError::ServiceUnavailable {
                service: format!("{} (circuit open)", SERVICE_NAME),
            });
        }

        let mut attempt = 0;
        loop {
            match self.search_once(query, limit, metadata.as_ref()).await {
                Ok(matches) => {
                    self.circuit_breaker.record_success();
                    debug!(count = matches.len(), attempt, "Registry search succeeded");
                    return Ok(matches);
                }
                Err(error) if error.is_transient() && attempt < self.config.retry_attempts => {
                    let delay = backoff(attempt);
                    debug!(error = %error, attempt, delay_ms = delay.as_millis() as u64, "Retrying registry search");
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(error) => {
                    if error.is_transient() {
                        self.circuit_breaker.record_failure().await;
                    }
                    return Err(error);
                }
            }
        }
    }
}

// =============================================================================
// Registry API Data Transfer Objects
// =============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchResponse {
    search_results: SearchResults,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct SearchResults {
    results: Vec<SearchResult>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchResult {
    name: String,
    identifier: String,
    #[serde(default)]
    legal_type: Option<String>,
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    bn: Option<String>,
}

impl SearchResponse {
    fn into_matches(self, limit: usize) -> Vec<BusinessMatch> {
        self.search_results
            .results
            .into_iter()
            .take(limit)
            .map(|r| BusinessMatch {
                name: r.name,
                identifier: r.identifier,
                legal_type: r.legal_type,
                status: r.status,
                business_number: r.bn.filter(|bn| !bn.trim().is_empty()),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn adapter(failure_threshold: u32) -> RegistrySearchAdapter {
        RegistrySearchAdapter::new(BusinessSearchConfig {
            base_url: "http://127.0.0.1:9/api/v1/".to_string(),
            circuit_breaker: CircuitBreakerConfig {
                failure_threshold,
                reset_timeout_secs: 60,
                success_threshold: 1,
            },
            ..Default::default()
        })
        .unwrap()
    }

    #[test]
    fn test_status_mapping() {
        assert!(map_status(StatusCode::NOT_FOUND, "acme", None).is_not_found());
        assert!(matches!(
            map_status(StatusCode::FORBIDDEN, "acme", None),
            PortError::Unauthorized { .. }
        ));
        assert!(matches!(
            map_status(StatusCode::TOO_MANY_REQUESTS, "acme", Some(7)),
            PortError::RateLimited { retry_after_secs: 7 }
        ));
        assert!(map_status(StatusCode::BAD_GATEWAY, "acme", None).is_transient());
        assert!(!map_status(StatusCode::BAD_REQUEST, "acme", None).is_transient());
    }

    #[test]
    fn test_parses_search_response() {
        let body = r#"{
            "searchResults": {
                "results": [
                    {"name": "ACME LTD", "identifier": "BC0871227", "legalType": "BC",
                     "status": "ACTIVE", "bn": "123456789BC0001"},
                    {"name": "ACME HOLDINGS", "identifier": "FM1001001", "bn": ""}
                ],
                "totalResults": 2
            }
        }"#;
        let response: SearchResponse = serde_json::from_str(body).unwrap();
        let matches = response.into_matches(50);
        assert_eq!(matches.len(), 2);
        assert_eq!(matches[0].legal_type.as_deref(), Some("BC"));
        assert_eq!(matches[0].business_number.as_deref(), Some("123456789BC0001"));
        assert_eq!(matches[1].business_number, None);
    }

    #[test]
    fn test_rejects_invalid_config() {
        let result = RegistrySearchAdapter::new(BusinessSearchConfig {
            base_url: " ".to_string(),
            ..Default::default()
        });
        assert!(matches!(result, Err(CoreError::Configuration(_))));
    }

    #[test]
    fn test_backoff_doubles() {
        assert_eq!(backoff(0), Duration::from_millis(100));
        assert_eq!(backoff(2), Duration::from_millis(400));
    }

    #[tokio::test]
    async fn test_circuit_breaker_initially_closed() {
        assert!(!adapter(5).is_circuit_open().await);
    }

    #[tokio::test]
    async fn test_open_circuit_short_circuits() {
        let adapter = adapter(1);
        adapter.circuit_breaker.record_failure().await;
        assert!(adapter.is_circuit_open().await);

        let error = adapter.search_businesses("acme", 10, None).await.unwrap_err();
        assert!(matches!(error, PortError::ServiceUnavailable { .. }));

        let health = adapter.health_check().await;
        assert_eq!(health.status, AdapterHealth::Degraded);
    }

    #[tokio::test]
    async fn test_unreachable_service_retries_then_opens_circuit() {
        let adapter = RegistrySearchAdapter::new(BusinessSearchConfig {
            base_url: "http://127.0.0.1:9".to_string(),
            retry_attempts: 1,
            circuit_breaker: CircuitBreakerConfig {
                failure_threshold: 1,
                reset_timeout_secs: 60,
                success_threshold: 1,
            },
            ..Default::default()
        })
        .unwrap();

        let started = Instant::now();
        let error = adapter.search_businesses("acme", 10, None).await.unwrap_err();
        assert!(matches!(error, PortError::Connection { .. }), "got {:?}", error);
        assert!(started.elapsed() >= backoff(0), "expected one backoff before giving up");
        assert!(adapter.is_circuit_open().await);

        let error = adapter.search_businesses("acme", 10, None).await.unwrap_err();
        assert!(matches!(error, PortError::ServiceUnavailable { .. }), "got {:?}", error);
    }

    #[tokio::test]
    async fn test_blank_query_returns_nothing() {
        let results = adapter(5).search_businesses("   ", 10, None).await.unwrap();
        assert!(results.is_empty());
    }
}
