//! Party Domain Ports
//!
//! The party domain depends on one external collaborator: a registry search
//! service that returns known business entities for a name prefix. This
//! module defines the port it is reached through.
//!
//! # Adapters
//!
//! - **Registry adapter**: HTTP client for the registry search API
//!   ([`crate::adapters::RegistrySearchAdapter`])
//! - **Mock adapter**: in-memory list for tests ([`mock::MockBusinessSearchPort`])
//!
//! # Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use domain_party::ports::BusinessSearchPort;
//!
//! let port: Arc<dyn BusinessSearchPort> = Arc::new(RegistrySearchAdapter::new(config)?);
//! let search = BusinessNameSearch::new(port, 3, 50);
//! ```

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use core_kernel::{DomainPort, HealthCheckable, OperationMetadata, PortError};

/// A business entity known to the registry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BusinessMatch {
    /// Legal name
    pub name: String,
    /// Registry identifier, e.g. `BC0871227`
    pub identifier: String,
    /// Legal type code, e.g. `BC` or `SP`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub legal_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// Federal business number
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub business_number: Option<String>,
}

impl BusinessMatch {
    pub fn new(name: impl Into<String>, identifier: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            identifier: identifier.into(),
            legal_type: None,
            status: None,
            business_number: None,
        }
    }
}

/// Port for looking up business entities by name
#[async_trait]
pub trait BusinessSearchPort: DomainPort + HealthCheckable {
    /// Searches businesses whose name starts with `query`
    ///
    /// # Arguments
    ///
    /// * `query` - Name prefix as typed
    /// * `limit` - Maximum number of results to return
    /// * `metadata` - Optional operation metadata (account, correlation id)
    async fn search_businesses(
        &self,
        query: &str,
        limit: usize,
        metadata: Option<OperationMetadata>,
    ) -> Result<Vec<BusinessMatch>, PortError>;
}

#[cfg(any(test, feature = "mock"))]
pub mod mock {
    use super::*;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::Duration;
    use tokio::sync::RwLock;

    use core_kernel::{AdapterHealth, HealthCheckResult};

    /// In-memory mock implementation of BusinessSearchPort
    #[derive(Debug, Default)]
    pub struct MockBusinessSearchPort {
        businesses: Arc<RwLock<Vec<BusinessMatch>>>,
        delays: Arc<RwLock<HashMap<String, Duration>>>,
        failing: AtomicBool,
        calls: AtomicUsize,
    }

    impl MockBusinessSearchPort {
        /// Creates a new mock port
        pub fn new() -> Self {
            Self::default()
        }

        /// Pre-populates with businesses for testing
        pub fn with_businesses(businesses: Vec<BusinessMatch>) -> Self {
            Self {
                businesses: Arc::new(RwLock::new(businesses)),
                ..Self::default()
            }
        }

        /// Delays responses to `query` by `delay`
        pub async fn delay_query(&self, query: impl Into<String>, delay: Duration) {
            self.delays.write().await.insert(query.into(), delay);
        }

        /// Makes every following call fail with `ServiceUnavailable`
        pub fn set_failing(&self, failing: bool) {
            self.failing.store(failing, Ordering::SeqCst);
        }

        /// Number of searches received
        pub fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl DomainPort for MockBusinessSearchPort {}

    #[async_trait]
    impl HealthCheckable for MockBusinessSearchPort {
        async fn health_check(&self) -> HealthCheckResult {
            let status = if self.failing.load(Ordering::SeqCst) {
                AdapterHealth::Unhealthy
            } else {
                AdapterHealth::Healthy
            };
            HealthCheckResult::now("mock-business-search", status, 0, None)
        }
    }

    #[async_trait]
    impl BusinessSearchPort for MockBusinessSearchPort {
        async fn search_businesses(
            &self,
            query: &str,
            limit: usize,
            _metadata: Option<OperationMetadata>,
        ) -> Result<Vec<BusinessMatch>, PortError> {
            self.calls.fetch_add(1, Ordering::SeqCst);

            let delay = self.delays.read().await.get(query).copied();
            if let Some(delay) = delay {
                tokio::time::sleep(delay).await;
            }

            if self.failing.load(Ordering::SeqCst) {
                return Err(PortError::ServiceUnavailable {
                    service: "mock-business-search".to_string(),
                });
            }

            let prefix = query.trim().to_lowercase();
            Ok(self
                .businesses
                .read()
                .await
                .iter()
                .filter(|b| b.name.to_lowercase().starts_with(&prefix))
                .take(limit)
                .cloned()
                .collect())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::mock::MockBusinessSearchPort;
    use super::*;

    fn port() -> MockBusinessSearchPort {
        MockBusinessSearchPort::with_businesses(vec![
            BusinessMatch::new("Acme Ltd", "BC0000001"),
            BusinessMatch::new("Acme Holdings Inc", "BC0000002"),
            BusinessMatch::new("Zenith Corp", "BC0000003"),
        ])
    }

    #[tokio::test]
    async fn test_mock_port_prefix_match() {
        let port = port();
        let results = port.search_businesses("acme", 50, None).await.unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(port.calls(), 1);
    }

    #[tokio::test]
    async fn test_mock_port_respects_limit() {
        let results = port().search_businesses("a", 1, None).await.unwrap();
        assert_eq!(results.len(), 1);
    }

    #[tokio::test]
    async fn test_mock_port_failure() {
        let port = port();
        port.set_failing(true);
        let error = port.search_businesses("acme", 50, None).await.unwrap_err();
        assert!(error.is_transient());
    }

    #[tokio::test]
    async fn test_mock_port_health_check() {
        let port = port();
        assert_eq!(
            port.health_check().await.status,
            core_kernel::AdapterHealth::Healthy
        );
    }

    #[test]
    fn test_business_match_json() {
        let json = r#"{"name":"Acme Ltd","identifier":"BC0000001","legalType":"BC"}"#;
        let parsed: BusinessMatch = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.legal_type.as_deref(), Some("BC"));
        assert_eq!(parsed.status, None);
    }
}
