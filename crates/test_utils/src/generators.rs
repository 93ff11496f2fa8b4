//! Property-Based Test Generators
//!
//! Provides proptest strategies for generating random addresses and parties
//! that respect the domain's shape (ISO country codes, subdivision codes,
//! person/business names).

use domain_party::{Address, CountryTable, Party, PartyName, PartyRole, PersonName};
use proptest::prelude::*;

/// Countries with a subdivision list
pub fn listed_country_strategy() -> impl Strategy<Value = &'static str> {
    prop_oneof![Just("CA"), Just("US")]
}

/// Countries without a subdivision list, including an unknown code
pub fn unlisted_country_strategy() -> impl Strategy<Value = &'static str> {
    prop_oneof![
        Just("GB"),
        Just("AU"),
        Just("FR"),
        Just("JP"),
        Just("MX"),
        Just("XX"),
    ]
}

/// Any country code, listed or not
pub fn country_strategy() -> impl Strategy<Value = &'static str> {
    prop_oneof![listed_country_strategy(), unlisted_country_strategy()]
}

/// A subdivision code of `country`, or blank if it has none
pub fn region_for_strategy(country: &'static str) -> BoxedStrategy<String> {
    let codes: Vec<String> = CountryTable::standard()
        .subdivisions(country)
        .iter()
        .map(|sub| sub.code.to_string())
        .collect();
    if codes.is_empty() {
        Just(String::new()).boxed()
    } else {
        proptest::sample::select(codes).boxed()
    }
}

/// Street lines like "1234 Oak Ave"
pub fn street_strategy() -> impl Strategy<Value = String> {
    (1u32..10000, "[A-Z][a-z]{2,10}", prop_oneof![Just("St"), Just("Ave"), Just("Rd"), Just("Blvd")])
        .prop_map(|(number, name, suffix)| format!("{} {} {}", number, name, suffix))
}

pub fn city_strategy() -> impl Strategy<Value = String> {
    "[A-Z][a-z]{2,15}"
}

/// A postal code matching the format of `country`
pub fn postal_code_for(country: &str) -> BoxedStrategy<String> {
    match country {
        "CA" => "[ABCEGHJ-NPRSTVXY][0-9][ABCEGHJ-NPRSTV-Z] [0-9][ABCEGHJ-NPRSTV-Z][0-9]".boxed(),
        "US" => "[0-9]{5}(-[0-9]{4})?".boxed(),
        _ => "[A-Z0-9]{2,4} ?[A-Z0-9]{0,4}".boxed(),
    }
}

/// A complete, valid address in `country`
pub fn address_in_strategy(country: &'static str) -> impl Strategy<Value = Address> {
    (
        street_strategy(),
        city_strategy(),
        region_for_strategy(country),
        postal_code_for(country),
    )
        .prop_map(move |(street, city, region, postal)| {
            Address::new(street, city, region, postal, country)
        })
}

/// A complete, valid address in any country
pub fn address_strategy() -> impl Strategy<Value = Address> {
    country_strategy().prop_flat_map(address_in_strategy)
}

pub fn person_name_strategy() -> impl Strategy<Value = PartyName> {
    ("[A-Z][a-z]{1,12}", proptest::option::of("[A-Z][a-z]{0,8}"), "[A-Z][a-z]{1,15}")
        .prop_map(|(first, middle, last)| PartyName::PersonName(PersonName::new(first, middle, last)))
}

pub fn business_name_strategy() -> impl Strategy<Value = PartyName> {
    ("[A-Z][a-z]{2,12}", prop_oneof![Just("Ltd"), Just("Inc"), Just("Corp"), Just("LLC")])
        .prop_map(|(word, suffix)| PartyName::BusinessName(format!("{} {}", word, suffix)))
}

/// A valid person or business party with an address
pub fn party_strategy() -> impl Strategy<Value = Party> {
    (
        prop_oneof![person_name_strategy(), business_name_strategy()],
        address_strategy(),
    )
        .prop_map(|(name, address)| {
            let mut party = Party::new(PartyRole::SecuredParty, name.kind());
            party.name = name;
            party.address = address;
            party
        })
}

/// Rewrites `value` with random letter case and extra surrounding spaces
pub fn case_and_spacing_variant(value: String) -> impl Strategy<Value = String> {
    (proptest::collection::vec(any::<bool>(), value.chars().count()), 0usize..3, 0usize..3)
        .prop_map(move |(upper, lead, trail)| {
            let body: String = value
                .chars()
                .zip(upper)
                .map(|(c, up)| {
                    if up {
                        c.to_ascii_uppercase()
                    } else {
                        c.to_ascii_lowercase()
                    }
                })
                .collect();
            format!("{}{}{}", " ".repeat(lead), body, " ".repeat(trail))
        })
}
