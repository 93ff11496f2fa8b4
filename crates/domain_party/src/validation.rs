//! Party and address validation
//!
//! Validation is schema driven: a [`Schema`] lists the rules for each field,
//! and [`validate`] runs them against any record that exposes its fields
//! through [`FieldSource`]. The first failing rule of a field supplies that
//! field's message.
//!
//! # Quiet and loud validation
//!
//! [`AddressValidator`] re-validates on every edit so a form can enable or
//! disable its submit button, but keeps messages hidden until
//! [`AddressValidator::trigger_errors`] is called (normally on submit).
//!
//! # Party rules
//!
//! ## Persons
//! - First and last name required, 50 characters max; middle name optional
//!
//! ## Businesses
//! - Business name required, 150 characters max
//!
//! ## Contact details (both kinds)
//! - Email optional, must be a valid address
//! - Phone optional, 10 to 15 digits
//! - Phone extension optional, up to 5 digits

use std::collections::BTreeMap;
use std::fmt;

use tracing::debug;

use crate::address::{Address, AddressField};
use crate::country::CountryTable;
use crate::error::PartyError;
use crate::party::{Party, PartyField};
use crate::schema::{address_schema, Pattern, Rule, RuleKind, Schema};

/// Read access to a record's fields by key
pub trait FieldSource<F> {
    fn value(&self, field: F) -> &str;
}

impl FieldSource<AddressField> for Address {
    fn value(&self, field: AddressField) -> &str {
        self.field(field)
    }
}

impl FieldSource<PartyField> for Party {
    fn value(&self, field: PartyField) -> &str {
        self.field(field)
    }
}

/// Result of validating a record against a schema
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationResult<F: Ord> {
    /// Whether every rule passed
    pub is_valid: bool,
    /// First failing message per field
    pub errors: BTreeMap<F, String>,
}

impl<F: Ord> Default for ValidationResult<F> {
    fn default() -> Self {
        Self {
            is_valid: true,
            errors: BTreeMap::new(),
        }
    }
}

impl<F: Ord + Copy + fmt::Display> ValidationResult<F> {
    /// Creates a successful validation result
    pub fn ok() -> Self {
        Self::default()
    }

    /// Records a field error; an earlier error on the same field is kept
    pub fn add_error(&mut self, field: F, message: impl Into<String>) {
        self.errors.entry(field).or_insert_with(|| message.into());
        self.is_valid = false;
    }

    pub fn error_for(&self, field: F) -> Option<&str> {
        self.errors.get(&field).map(String::as_str)
    }

    /// Errors as `field: message` lines
    pub fn messages(&self) -> Vec<String> {
        self.errors
            .iter()
            .map(|(field, message)| format!("{}: {}", field, message))
            .collect()
    }
}

/// Evaluates every rule for every field in `schema`
pub fn validate<F, R>(record: &R, schema: &Schema<F>) -> ValidationResult<F>
where
    F: Ord + Copy + fmt::Display,
    R: FieldSource<F> + ?Sized,
{
    validate_fields(record, schema, schema.fields())
}

/// Evaluates the rules of the given fields only
pub fn validate_fields<F, R>(
    record: &R,
    schema: &Schema<F>,
    fields: impl IntoIterator<Item = F>,
) -> ValidationResult<F>
where
    F: Ord + Copy + fmt::Display,
    R: FieldSource<F> + ?Sized,
{
    let mut result = ValidationResult::ok();
    for field in fields {
        if let Some(message) = schema.check_field(field, record.value(field)) {
            result.add_error(field, message);
        }
    }
    result
}

/// Live validator for an address being edited
///
/// Owns the working copy of the address and the schema for its current
/// country.
#[derive(Debug, Clone)]
pub struct AddressValidator {
    address: Address,
    schema: Schema<AddressField>,
    table: CountryTable,
    trigger_errors: bool,
    result: ValidationResult<AddressField>,
}

impl AddressValidator {
    pub fn new(address: Address, table: CountryTable) -> Self {
        let schema = address_schema(&table, &address.country);
        let result = validate(&address, &schema);
        Self {
            address,
            schema,
            table,
            trigger_errors: false,
            result,
        }
    }

    /// Validator over the built-in country table
    pub fn with_standard_table(address: Address) -> Self {
        Self::new(address, CountryTable::standard())
    }

    pub fn address(&self) -> &Address {
        &self.address
    }

    pub fn schema(&self) -> &Schema<AddressField> {
        &self.schema
    }

    pub fn into_address(self) -> Address {
        self.address
    }

    /// Changes the country and swaps the schema to match
    ///
    /// A selected region that does not belong to the new country clears the
    /// street, city, region, and postal code. Setting the current country
    /// again does nothing.
    pub fn set_country(&mut self, country: &str) {
        let country = country.trim();
        if self.address.country.trim().eq_ignore_ascii_case(country) {
            return;
        }

        let region = self.address.region.trim();
        if !region.is_empty() && !self.table.contains_region(country, region) {
            debug!(
                from = %self.address.country,
                to = %country,
                region = %region,
                "Region not valid for new country, clearing address"
            );
            self.address.clear_location();
        }

        self.address.country = country.to_string();
        self.schema = address_schema(&self.table, country);
        debug!(
            country = %country,
            postal_rule = ?self.schema.postal_code_rule(),
            "Swapped address schema"
        );
        self.revalidate();
    }

    /// Writes a field and re-validates
    pub fn set_field(&mut self, field: AddressField, value: impl Into<String>) {
        let value = value.into();
        if field == AddressField::Country {
            self.set_country(&value);
        } else {
            self.address.set_field(field, value);
            self.revalidate();
        }
    }

    /// Replaces the whole address, e.g. when a form loads an existing record
    pub fn replace(&mut self, address: Address) {
        self.schema = address_schema(&self.table, &address.country);
        self.address = address;
        self.revalidate();
    }

    pub fn is_valid(&self) -> bool {
        self.result.is_valid
    }

    pub fn result(&self) -> &ValidationResult<AddressField> {
        &self.result
    }

    /// Makes error messages visible from now on
    pub fn trigger_errors(&mut self) {
        self.trigger_errors = true;
    }

    pub fn errors_triggered(&self) -> bool {
        self.trigger_errors
    }

    /// Messages to display; empty until errors are triggered
    pub fn visible_errors(&self) -> BTreeMap<AddressField, &str> {
        if !self.trigger_errors {
            return BTreeMap::new();
        }
        self.result
            .errors
            .iter()
            .map(|(field, message)| (*field, message.as_str()))
            .collect()
    }

    /// Message to display for one field, if errors are triggered
    pub fn error_for(&self, field: AddressField) -> Option<&str> {
        if self.trigger_errors {
            self.result.error_for(field)
        } else {
            None
        }
    }

    /// Triggers errors and returns the normalized address if it is valid
    pub fn finalize(&mut self) -> Result<Address, PartyError> {
        self.trigger_errors();
        let normalized = self.address.normalized();
        let result = validate(&normalized, &self.schema);
        if !result.is_valid {
            self.result = result;
            return Err(PartyError::validation_failed(self.result.messages()));
        }
        Ok(normalized)
    }

    fn revalidate(&mut self) {
        self.result = validate(&self.address, &self.schema);
    }
}

/// Schema for party names and contact details
pub fn party_schema() -> Schema<PartyField> {
    Schema::new()
        .with(
            PartyField::First,
            vec![Rule::required("First name is required"), Rule::max_length(50)],
        )
        .with(PartyField::Middle, vec![Rule::max_length(50)])
        .with(
            PartyField::Last,
            vec![Rule::required("Last name is required"), Rule::max_length(50)],
        )
        .with(
            PartyField::BusinessName,
            vec![Rule::required("Business name is required"), Rule::max_length(150)],
        )
        .with(
            PartyField::Email,
            vec![Rule::new(RuleKind::Email, "Must be a valid email address")],
        )
        .with(
            PartyField::Phone,
            vec![Rule::new(
                RuleKind::Phone { min_digits: 10, max_digits: 15 },
                "Must be a valid phone number",
            )],
        )
        .with(
            PartyField::PhoneExtension,
            vec![
                Rule::pattern(Pattern::Digits, "Extension must contain digits only"),
                Rule::max_length(5),
            ],
        )
}

/// Validator for party names and contact details
pub struct PartyValidator;

impl PartyValidator {
    /// Validates the fields that apply to the party's kind
    ///
    /// The address is validated separately by [`AddressValidator`].
    pub fn validate(party: &Party) -> ValidationResult<PartyField> {
        let schema = party_schema();
        validate_fields(party, &schema, PartyField::for_kind(party.kind()).iter().copied())
    }
}
