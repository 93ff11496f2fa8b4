//! Filing Party Domain
//!
//! This crate holds the parties named on a registry filing (secured parties,
//! debtors, home owners, the registering and submitting parties) and the
//! rules that keep them clean:
//!
//! - **Address validation** with country-dependent schemas
//! - **Party validation** for names and contact details
//! - **Duplicate detection** against the parties already on the filing
//! - **Home owner groups** with tenancy rules and common-denominator
//!   interests
//! - **Business name search** against the registry, with stale responses
//!   discarded
//! - **Party edit form** tying the above together
//!
//! # Examples
//!
//! ```rust
//! use core_kernel::FilingId;
//! use domain_party::{Address, FilingParties, PartyForm, PartyKind, PartyRole};
//!
//! let mut filing = FilingParties::new(FilingId::new_v7());
//!
//! let mut form = PartyForm::new(PartyRole::SecuredParty);
//! form.select_kind(PartyKind::Business).unwrap();
//! form.set_business_name("Acme Ltd").unwrap();
//! form.set_address(Address::new("100 Main St", "Victoria", "BC", "V8W1A1", "CA")).unwrap();
//!
//! let index = form.submit(&mut filing).unwrap();
//! assert_eq!(filing.get(index).unwrap().address.postal_code, "V8W 1A1");
//!
//! // The same business at the same address is rejected
//! let mut again = PartyForm::new(PartyRole::SecuredParty);
//! again.select_kind(PartyKind::Business).unwrap();
//! again.set_business_name("ACME LTD").unwrap();
//! again.set_address(Address::new("100 Main St", "Victoria", "BC", "V8W 1A1", "CA")).unwrap();
//! assert!(again.submit(&mut filing).is_err());
//! ```

pub mod address;
pub mod country;
pub mod schema;
pub mod validation;
pub mod party;
pub mod owner_group;
pub mod filing;
pub mod dedup;
pub mod error;
pub mod ports;
pub mod search;
pub mod config;
pub mod form;
pub mod adapters;

pub use address::{Address, AddressField};
pub use country::{Country, CountryTable, Subdivision};
pub use schema::{address_schema, rules_for, Pattern, PostalCodeRule, Rule, RuleKind, Schema};
pub use validation::{
    party_schema, validate, AddressValidator, FieldSource, PartyValidator, ValidationResult,
};
pub use party::{Party, PartyField, PartyKind, PartyName, PartyRole, PartyType, PersonName};
pub use owner_group::{normalize_common_interest, OwnerGroup, TenancyType};
pub use filing::FilingParties;
pub use dedup::{ensure_unique, find_matching_party, has_matching_party, is_equivalent};
pub use error::PartyError;
pub use ports::{BusinessMatch, BusinessSearchPort};
#[cfg(any(test, feature = "mock"))]
pub use ports::mock::MockBusinessSearchPort;
pub use search::{should_offer_selection, BusinessNameSearch, SearchOutcome, SearchState};
pub use config::BusinessSearchConfig;
pub use form::{FormState, PartyForm};
pub use adapters::RegistrySearchAdapter;
