//! Test Utilities Crate
//!
//! Provides shared test infrastructure, fixtures, and helpers for the
//! registry filing test suite.
//!
//! # Modules
//!
//! - `fixtures`: Pre-built addresses, parties, and search results
//! - `builders`: Builder patterns for test data construction
//! - `assertions`: Custom assertion helpers for domain types
//! - `generators`: Property-based test data generators
//! - `logging`: One-time tracing subscriber for tests

pub mod fixtures;
pub mod builders;
pub mod assertions;
pub mod generators;
pub mod logging;

pub use fixtures::*;
pub use builders::*;
pub use assertions::*;
pub use generators::*;
pub use logging::init_test_tracing;
