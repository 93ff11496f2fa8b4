//! Core Kernel - Foundational types for the registry filing system
//!
//! This crate provides the building blocks shared by the filing domains:
//! - Strongly-typed identifiers for parties and filings
//! - The core error type
//! - Port infrastructure (errors, health checks, operation metadata) used by
//!   adapters to external collaborators such as the business search service

pub mod identifiers;
pub mod error;
pub mod ports;

pub use identifiers::{PartyId, FilingId};
pub use error::CoreError;
pub use ports::{
    PortError, DomainPort, HealthCheckable, HealthCheckResult, AdapterHealth,
    CircuitBreakerConfig, OperationMetadata,
};
