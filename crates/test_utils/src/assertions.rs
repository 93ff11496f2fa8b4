//! Custom Test Assertions
//!
//! Provides specialized assertion helpers for domain types that give
//! more meaningful error messages than standard assertions.

use std::fmt::{Debug, Display};

use domain_party::{Address, PartyError, PostalCodeRule, Schema, AddressField, ValidationResult};

/// Asserts that `field` failed with exactly `message`
///
/// # Panics
///
/// Panics if the field passed or failed with a different message
pub fn assert_field_error<F>(result: &ValidationResult<F>, field: F, message: &str)
where
    F: Ord + Copy + Display + Debug,
{
    assert!(!result.is_valid, "Expected validation to fail on {}", field);
    assert_eq!(
        result.error_for(field),
        Some(message),
        "Unexpected message for {}; all errors: {:?}",
        field,
        result.errors
    );
}

/// Asserts that a validation result has no errors
pub fn assert_valid<F>(result: &ValidationResult<F>)
where
    F: Ord + Copy + Display + Debug,
{
    assert!(
        result.is_valid && result.errors.is_empty(),
        "Expected valid, got errors: {:?}",
        result.messages()
    );
}

/// Asserts that a country change cleared the location fields
///
/// # Arguments
///
/// * `address` - The address after the change
/// * `country` - The country it should have kept
pub fn assert_location_cleared(address: &Address, country: &str) {
    assert_eq!(address.country, country, "Country should be retained");
    for field in [
        AddressField::Street,
        AddressField::StreetAdditional,
        AddressField::City,
        AddressField::Region,
        AddressField::PostalCode,
    ] {
        assert!(
            address.field(field).is_empty(),
            "Expected {} to be cleared, found {:?}",
            field,
            address.field(field)
        );
    }
}

/// Asserts which postal-code rule a schema enforces
pub fn assert_postal_rule(schema: &Schema<AddressField>, expected: PostalCodeRule) {
    assert_eq!(
        schema.postal_code_rule(),
        expected,
        "Unexpected postal code rule"
    );
}

/// Asserts that a result is a duplicate-party rejection
pub fn assert_duplicate<T: Debug>(result: Result<T, PartyError>) {
    match result {
        Err(PartyError::DuplicateParty(_)) => {}
        other => panic!("Expected DuplicateParty, got {:?}", other),
    }
}

/// Asserts that a result is a validation failure mentioning `needle`
pub fn assert_validation_failed<T: Debug>(result: Result<T, PartyError>, needle: &str) {
    match result {
        Err(PartyError::ValidationFailed(message)) => assert!(
            message.contains(needle),
            "Expected {:?} in validation message {:?}",
            needle,
            message
        ),
        other => panic!("Expected ValidationFailed, got {:?}", other),
    }
}
