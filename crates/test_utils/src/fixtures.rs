//! Pre-built Test Fixtures
//!
//! Provides ready-to-use test data for addresses, parties, and registry
//! search results. These fixtures are consistent and predictable so tests
//! can compare against literal values.

use core_kernel::{FilingId, PartyId};
use domain_party::{
    Address, BusinessMatch, FilingParties, OwnerGroup, Party, PartyRole, TenancyType,
};
use uuid::Uuid;

/// Fixture for address test data
pub struct AddressFixtures;

impl AddressFixtures {
    /// Downtown Victoria, BC
    pub fn victoria() -> Address {
        Address::new("100 Main St", "Victoria", "BC", "V8W 1A1", "CA")
    }

    /// Same as `victoria` with the postal code typed without a space
    pub fn victoria_compact_postal() -> Address {
        Address::new("100 Main St", "Victoria", "BC", "V8W1A1", "CA")
    }

    /// Seattle, WA with a ZIP+4 code
    pub fn seattle() -> Address {
        Address::new("400 Pine St", "Seattle", "WA", "98101-1234", "US")
    }

    /// London, a country without a subdivision list
    pub fn london() -> Address {
        Address::new("10 Downing St", "London", "", "SW1A 2AA", "GB")
    }

    /// A Canadian address whose postal code fails the format rule
    pub fn bad_canadian_postal() -> Address {
        Address::new("100 Main St", "Victoria", "BC", "ABC123", "CA")
    }
}

/// Fixture for party test data
pub struct PartyFixtures;

impl PartyFixtures {
    /// Business secured party at the Victoria address
    pub fn acme_secured_party() -> Party {
        Party::business(PartyRole::SecuredParty, "Acme Ltd")
            .with_address(AddressFixtures::victoria_compact_postal())
    }

    /// Person debtor in Seattle
    pub fn jane_doe_debtor() -> Party {
        Party::person(PartyRole::Debtor, "Jane", Some("Q".to_string()), "Doe")
            .with_address(AddressFixtures::seattle())
            .with_email("jane.doe@example.com")
            .with_phone("(206) 555-0100")
    }

    /// Business owner in London
    pub fn globex_owner() -> Party {
        Party::business(PartyRole::Owner, "Globex Corporation")
            .with_address(AddressFixtures::london())
    }

    /// A filing with the three parties above, in that order
    pub fn filing() -> FilingParties {
        FilingParties::from_parties(
            IdFixtures::filing_id(),
            vec![
                Self::acme_secured_party(),
                Self::jane_doe_debtor(),
                Self::globex_owner(),
            ],
        )
    }
}

/// Fixture for home owner groups
pub struct OwnerGroupFixtures;

impl OwnerGroupFixtures {
    /// A Kelowna home owner
    pub fn owner(first: &str, last: &str) -> Party {
        Party::person(PartyRole::Owner, first, None, last)
            .with_address(Address::new("1580 Lakeshore Rd", "Kelowna", "BC", "V1W 3G1", "CA"))
    }

    /// Executor of an estate, without a declared party type
    pub fn executor() -> Party {
        Party::person(PartyRole::Executor, "John", None, "Smith")
            .with_address(Address::new("200 Bernard Ave", "Kelowna", "BC", "V1Y 6N2", "CA"))
    }

    pub fn sole() -> OwnerGroup {
        OwnerGroup::new(TenancyType::Sole, vec![Self::owner("Jane", "Doe")])
    }

    pub fn joint() -> OwnerGroup {
        OwnerGroup::new(
            TenancyType::Joint,
            vec![Self::owner("Jane", "Doe"), Self::owner("John", "Doe")],
        )
    }

    /// A tenants-in-common group holding `numerator/denominator`
    pub fn common(first: &str, numerator: u32, denominator: u32) -> OwnerGroup {
        OwnerGroup::new(TenancyType::Common, vec![Self::owner(first, "Doe")])
            .with_interest(numerator, denominator)
    }
}

/// Fixture for registry search results
pub struct BusinessFixtures;

impl BusinessFixtures {
    pub fn acme() -> BusinessMatch {
        BusinessMatch {
            name: "ACME LTD".to_string(),
            identifier: "BC0871227".to_string(),
            legal_type: Some("BC".to_string()),
            status: Some("ACTIVE".to_string()),
            business_number: Some("123456789BC0001".to_string()),
        }
    }

    /// A registry with a handful of businesses sharing prefixes
    pub fn registry() -> Vec<BusinessMatch> {
        vec![
            Self::acme(),
            BusinessMatch::new("ACME HOLDINGS INC", "BC0999001"),
            BusinessMatch::new("ACME PLUMBING", "FM0001234"),
            BusinessMatch::new("GLOBEX CORPORATION", "A0012345"),
        ]
    }

    /// `count` businesses all starting with "Bulk"
    pub fn bulk(count: usize) -> Vec<BusinessMatch> {
        (0..count)
            .map(|i| BusinessMatch::new(format!("Bulk Business {:03}", i), format!("BC{:07}", i)))
            .collect()
    }
}

/// Fixture for fixed identifiers
pub struct IdFixtures;

impl IdFixtures {
    pub fn filing_id() -> FilingId {
        FilingId::from_uuid(Uuid::from_u128(0x0190_0000_0000_7000_8000_0000_0000_0001))
    }

    pub fn party_id() -> PartyId {
        PartyId::from_uuid(Uuid::from_u128(0x0190_0000_0000_7000_8000_0000_0000_0002))
    }
}
