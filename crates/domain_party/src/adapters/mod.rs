//! External Adapters for Party Domain
//!
//! Adapter implementations of the party domain's ports.
//!
//! # Available Adapters
//!
//! - **RegistrySearchAdapter**: Business name search over the registry REST API
//! - **MockBusinessSearchPort**: In-memory mock for testing (in the ports module)
//!
//! # Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use domain_party::adapters::RegistrySearchAdapter;
//! use domain_party::{BusinessSearchConfig, BusinessSearchPort};
//!
//! let config = BusinessSearchConfig::from_env()?;
//! let port: Arc<dyn BusinessSearchPort> = Arc::new(RegistrySearchAdapter::new(config)?);
//! ```

pub mod registry_search;

pub use registry_search::RegistrySearchAdapter;
