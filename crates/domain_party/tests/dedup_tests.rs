//! Tests for duplicate party detection

use domain_party::{
    ensure_unique, find_matching_party, has_matching_party, is_equivalent, Address,
    FilingParties, Party, PartyForm, PartyKind, PartyName, PartyRole, PersonName,
};
use proptest::prelude::*;
use test_utils::{
    assert_duplicate, case_and_spacing_variant, party_strategy, AddressBuilder, IdFixtures,
    PartyBuilder, PartyFixtures,
};

fn acme_at(street: &str) -> Party {
    PartyBuilder::new()
        .business("Acme Ltd")
        .address(
            AddressBuilder::new()
                .street(street)
                .postal_code("V8W1A1")
                .build(),
        )
        .build()
}

// ============================================================================
// Example Tests
// ============================================================================

mod example_tests {
    use super::*;

    #[test]
    fn test_identical_entry_at_other_index_matches() {
        let parties = vec![PartyFixtures::jane_doe_debtor(), acme_at("100 Main St")];
        assert!(has_matching_party(&acme_at("100 Main St"), &parties, Some(0)));
    }

    #[test]
    fn test_street_variant_does_not_match() {
        let parties = vec![acme_at("100 Main St")];
        assert!(!has_matching_party(&acme_at("100 Main Street"), &parties, None));
    }

    #[test]
    fn test_editing_in_place_is_not_a_duplicate() {
        let filing = PartyFixtures::filing();
        let candidate = filing.get(1).cloned().unwrap();
        assert!(!has_matching_party(&candidate, filing.as_slice(), Some(1)));
        assert!(has_matching_party(&candidate, filing.as_slice(), None));
    }

    #[test]
    fn test_role_does_not_affect_equivalence() {
        let secured = acme_at("100 Main St");
        let mut debtor = secured.clone();
        debtor.role = PartyRole::Debtor;
        assert!(is_equivalent(&debtor, &secured));
    }

    #[test]
    fn test_contact_details_do_not_affect_equivalence() {
        let existing = PartyFixtures::jane_doe_debtor();
        let mut candidate = existing.clone();
        candidate.email = Some("other@example.com".to_string());
        candidate.phone = None;
        candidate.address.street_additional = Some("Suite 200".to_string());
        assert!(is_equivalent(&candidate, &existing));
    }

    #[test]
    fn test_middle_name_difference_is_not_duplicate() {
        let existing = PartyFixtures::jane_doe_debtor();
        let mut candidate = existing.clone();
        candidate.name = PartyName::PersonName(PersonName::new("Jane", None, "Doe"));
        assert!(!is_equivalent(&candidate, &existing));
    }

    #[test]
    fn test_find_returns_first_match() {
        let parties = vec![
            acme_at("100 Main St"),
            PartyFixtures::globex_owner(),
            acme_at("100 Main St"),
        ];
        let candidate = acme_at("100 MAIN ST");
        assert_eq!(find_matching_party(&candidate, &parties, None), Some(0));
        assert_eq!(find_matching_party(&candidate, &parties, Some(0)), Some(2));
    }

    #[test]
    fn test_ensure_unique() {
        let filing = PartyFixtures::filing();
        assert_duplicate(ensure_unique(&acme_at("100 Main St"), filing.as_slice(), None));
        assert!(ensure_unique(&acme_at("200 Main St"), filing.as_slice(), None).is_ok());
    }

    #[test]
    fn test_empty_collection_never_matches() {
        assert!(!has_matching_party(&acme_at("100 Main St"), &[], None));
    }
}

// ============================================================================
// Stored Filing Tests
// ============================================================================

mod stored_filing_tests {
    use super::*;

    /// A filing whose party was loaded as stored, without normalization
    fn stored_filing(postal_code: &str, street: &str) -> FilingParties {
        let stored = PartyBuilder::new()
            .business("Acme Ltd")
            .address(
                AddressBuilder::new()
                    .street(street)
                    .postal_code(postal_code)
                    .build(),
            )
            .build();
        FilingParties::from_parties(IdFixtures::filing_id(), vec![stored])
    }

    fn submit_acme(filing: &mut FilingParties, postal_code: &str, street: &str) {
        let mut form = PartyForm::new(PartyRole::SecuredParty);
        form.select_kind(PartyKind::Business).unwrap();
        form.set_business_name("Acme Ltd").unwrap();
        form.set_address(
            AddressBuilder::new()
                .street(street)
                .postal_code(postal_code)
                .build(),
        )
        .unwrap();
        assert_duplicate(form.submit(filing));
    }

    #[test]
    fn test_identical_hyphenated_postal_is_duplicate() {
        let mut filing = stored_filing("V8W-1A1", "100 Main St");
        submit_acme(&mut filing, "V8W-1A1", "100 Main St");
        assert_eq!(filing.len(), 1);
    }

    #[test]
    fn test_postal_separator_variants_are_duplicates() {
        for submitted in ["V8W 1A1", "v8w1a1", "V8W-1A1"] {
            let mut filing = stored_filing("V8W-1A1", "100 Main St");
            submit_acme(&mut filing, submitted, "100 Main St");
            assert_eq!(filing.len(), 1, "{} was committed", submitted);
        }
    }

    #[test]
    fn test_stored_inner_spacing_is_duplicate() {
        let mut filing = stored_filing("V8W 1A1", "100   Main  St");
        submit_acme(&mut filing, "V8W 1A1", "100 Main St");
        assert_eq!(filing.len(), 1);
    }
}

// ============================================================================
// Property Tests
// ============================================================================

fn respell(address: &Address, street: String, city: String) -> Address {
    Address {
        street,
        city,
        region: address.region.to_lowercase(),
        postal_code: address.postal_code.replace(' ', ""),
        country: address.country.to_lowercase(),
        ..address.clone()
    }
}

proptest! {
    #[test]
    fn prop_match_is_symmetric(a in party_strategy(), b in party_strategy()) {
        prop_assert_eq!(is_equivalent(&a, &b), is_equivalent(&b, &a));
        prop_assert_eq!(
            has_matching_party(&a, std::slice::from_ref(&b), None),
            has_matching_party(&b, std::slice::from_ref(&a), None)
        );
    }

    #[test]
    fn prop_party_matches_itself_except_when_excluded(party in party_strategy()) {
        let parties = vec![party.clone()];
        prop_assert!(has_matching_party(&party, &parties, None));
        prop_assert!(!has_matching_party(&party, &parties, Some(0)));
    }

    #[test]
    fn prop_excluded_index_never_reported(
        parties in proptest::collection::vec(party_strategy(), 1..6),
        pick in any::<prop::sample::Index>(),
    ) {
        let index = pick.index(parties.len());
        let candidate = parties[index].clone();
        if let Some(found) = find_matching_party(&candidate, &parties, Some(index)) {
            prop_assert_ne!(found, index);
            prop_assert!(is_equivalent(&candidate, &parties[found]));
        }
    }

    #[test]
    fn prop_case_and_spacing_do_not_matter(
        (party, street, city) in party_strategy().prop_flat_map(|party| {
            let street = case_and_spacing_variant(party.address.street.clone());
            let city = case_and_spacing_variant(party.address.city.clone());
            (Just(party), street, city)
        }),
    ) {
        let mut variant = party.clone();
        variant.address = respell(&party.address, street, city);
        prop_assert!(is_equivalent(&variant, &party));
    }
}
