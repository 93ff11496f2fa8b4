//! Test Data Builders
//!
//! Provides builder patterns for constructing test data with sensible defaults.
//! These builders allow tests to specify only the relevant fields while using
//! defaults for everything else.

use core_kernel::PartyId;
use domain_party::{Address, Party, PartyName, PartyRole, PartyType, PersonName};

use crate::fixtures::AddressFixtures;

/// Builder for constructing test addresses
///
/// Defaults to the Victoria fixture.
pub struct AddressBuilder {
    address: Address,
}

impl Default for AddressBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl AddressBuilder {
    pub fn new() -> Self {
        Self {
            address: AddressFixtures::victoria(),
        }
    }

    pub fn street(mut self, street: impl Into<String>) -> Self {
        self.address.street = street.into();
        self
    }

    pub fn street_additional(mut self, extra: impl Into<String>) -> Self {
        self.address.street_additional = Some(extra.into());
        self
    }

    pub fn city(mut self, city: impl Into<String>) -> Self {
        self.address.city = city.into();
        self
    }

    pub fn region(mut self, region: impl Into<String>) -> Self {
        self.address.region = region.into();
        self
    }

    pub fn postal_code(mut self, postal_code: impl Into<String>) -> Self {
        self.address.postal_code = postal_code.into();
        self
    }

    pub fn country(mut self, country: impl Into<String>) -> Self {
        self.address.country = country.into();
        self
    }

    pub fn build(self) -> Address {
        self.address
    }
}

/// Builder for constructing test parties
///
/// Defaults to a business secured party named "Acme Ltd" at the Victoria
/// address.
pub struct PartyBuilder {
    id: PartyId,
    role: PartyRole,
    party_type: Option<PartyType>,
    name: PartyName,
    email: Option<String>,
    phone: Option<String>,
    address: Address,
}

impl Default for PartyBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl PartyBuilder {
    /// Creates a new builder with default values
    pub fn new() -> Self {
        Self {
            id: PartyId::new_v7(),
            role: PartyRole::SecuredParty,
            party_type: None,
            name: PartyName::BusinessName("Acme Ltd".to_string()),
            email: None,
            phone: None,
            address: AddressFixtures::victoria(),
        }
    }

    pub fn with_id(mut self, id: PartyId) -> Self {
        self.id = id;
        self
    }

    pub fn role(mut self, role: PartyRole) -> Self {
        self.role = role;
        self
    }

    /// Declares the registry party type, as an owner-group member
    pub fn party_type(mut self, party_type: PartyType) -> Self {
        self.party_type = Some(party_type);
        self
    }

    /// Makes the party a business with the given name
    pub fn business(mut self, name: impl Into<String>) -> Self {
        self.name = PartyName::BusinessName(name.into());
        self
    }

    /// Makes the party a person with the given name
    pub fn person(mut self, first: &str, middle: Option<&str>, last: &str) -> Self {
        self.name = PartyName::PersonName(PersonName::new(first, middle.map(str::to_string), last));
        self
    }

    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    pub fn address(mut self, address: Address) -> Self {
        self.address = address;
        self
    }

    /// Builds the party
    pub fn build(self) -> Party {
        Party {
            id: self.id,
            role: self.role,
            party_type: self.party_type,
            name: self.name,
            email: self.email,
            phone: self.phone,
            phone_extension: None,
            address: self.address,
        }
    }
}
