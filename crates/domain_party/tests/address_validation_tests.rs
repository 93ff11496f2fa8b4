//! Tests for country-dependent address validation

use domain_party::{
    rules_for, Address, AddressField, AddressValidator, PostalCodeRule,
};
use proptest::prelude::*;
use test_utils::{
    address_in_strategy, assert_field_error, assert_location_cleared, assert_postal_rule,
    assert_valid, init_test_tracing, listed_country_strategy, unlisted_country_strategy,
    AddressBuilder, AddressFixtures,
};

// ============================================================================
// Example Tests
// ============================================================================

mod example_tests {
    use super::*;

    #[test]
    fn test_bad_canadian_postal_code_surfaces_after_trigger() {
        init_test_tracing();
        let mut validator = AddressValidator::with_standard_table(AddressFixtures::bad_canadian_postal());

        assert!(!validator.is_valid());
        assert_field_error(
            validator.result(),
            AddressField::PostalCode,
            "Must be a valid postal code (e.g. V8W 1A1)",
        );
        assert!(validator.visible_errors().is_empty());

        validator.trigger_errors();
        assert_eq!(
            validator.visible_errors().get(&AddressField::PostalCode).copied(),
            Some("Must be a valid postal code (e.g. V8W 1A1)")
        );
    }

    #[test]
    fn test_unlisted_country_accepts_empty_region() {
        let address = AddressBuilder::new()
            .country("XX")
            .region("")
            .city("")
            .postal_code("")
            .build();
        let validator = AddressValidator::with_standard_table(address);
        assert_valid(validator.result());
        assert_postal_rule(validator.schema(), PostalCodeRule::Permissive);
    }

    #[test]
    fn test_switch_to_unlisted_country_relaxes_rules() {
        let mut validator = AddressValidator::with_standard_table(AddressFixtures::victoria());
        validator.set_country("XX");

        assert_location_cleared(validator.address(), "XX");
        // Street is still required, everything else may stay blank
        assert_field_error(validator.result(), AddressField::Street, "Street address is required");
        assert_eq!(validator.result().errors.len(), 1);
    }

    #[test]
    fn test_us_zip_formats() {
        assert_valid(AddressValidator::with_standard_table(AddressFixtures::seattle()).result());

        let address = AddressBuilder::new()
            .country("US")
            .region("WA")
            .postal_code("9810")
            .build();
        let validator = AddressValidator::with_standard_table(address);
        assert_field_error(
            validator.result(),
            AddressField::PostalCode,
            "Must be a valid zip code (e.g. 12345 or 12345-6789)",
        );
    }

    #[test]
    fn test_region_must_belong_to_country() {
        let address = AddressBuilder::new().region("ZZ").build();
        let validator = AddressValidator::with_standard_table(address);
        assert_field_error(
            validator.result(),
            AddressField::Region,
            "Please select a valid province/state",
        );
    }

    #[test]
    fn test_length_rule_precedes_format_rule() {
        let address = AddressBuilder::new().region("BCX").build();
        let validator = AddressValidator::with_standard_table(address);
        assert_field_error(validator.result(), AddressField::Region, "Maximum 2 characters");
    }

    #[test]
    fn test_space_only_street_is_required_error() {
        let address = AddressBuilder::new().street("    ").build();
        let validator = AddressValidator::with_standard_table(address);
        assert_field_error(validator.result(), AddressField::Street, "Street address is required");
    }

    #[test]
    fn test_delivery_instructions_capped() {
        let mut validator = AddressValidator::with_standard_table(AddressFixtures::victoria());
        validator.set_field(AddressField::DeliveryInstructions, "x".repeat(81));
        assert_field_error(
            validator.result(),
            AddressField::DeliveryInstructions,
            "Maximum 80 characters",
        );
    }

    #[test]
    fn test_london_address_is_valid_without_region() {
        assert_valid(AddressValidator::with_standard_table(AddressFixtures::london()).result());
    }

    #[test]
    fn test_finalize_uppercases_codes() {
        let address = Address::new("1 Oak Ave", "Seattle", "wa", " 98101 ", " us ");
        let mut validator = AddressValidator::with_standard_table(address);
        let finalized = validator.finalize().unwrap();
        assert_eq!(finalized.country, "US");
        assert_eq!(finalized.region, "WA");
        assert_eq!(finalized.postal_code, "98101");
    }
}

// ============================================================================
// Property Tests
// ============================================================================

fn expected_rule(country: &str) -> PostalCodeRule {
    match country {
        "CA" => PostalCodeRule::Canadian,
        "US" => PostalCodeRule::UsZip,
        _ => PostalCodeRule::Permissive,
    }
}

proptest! {
    #[test]
    fn prop_country_round_trip_restores_postal_rule(
        listed in listed_country_strategy(),
        unlisted in unlisted_country_strategy(),
        repeats in 1usize..4,
    ) {
        let mut validator = AddressValidator::with_standard_table(Address::empty_in(unlisted));
        prop_assert_eq!(validator.schema().postal_code_rule(), PostalCodeRule::Permissive);

        for _ in 0..repeats {
            validator.set_country(listed);
        }
        prop_assert_eq!(validator.schema().postal_code_rule(), expected_rule(listed));
        prop_assert_eq!(validator.schema(), &rules_for(listed));

        for _ in 0..repeats {
            validator.set_country(unlisted);
        }
        prop_assert_eq!(validator.schema().postal_code_rule(), PostalCodeRule::Permissive);
    }

    #[test]
    fn prop_foreign_region_clears_location(
        address in listed_country_strategy().prop_flat_map(address_in_strategy),
        target in prop_oneof![Just("CA"), Just("US"), Just("GB"), Just("XX")],
    ) {
        let region_fits = domain_party::CountryTable::standard()
            .contains_region(target, &address.region);
        let same_country = address.country == target;
        let original = address.clone();

        let mut validator = AddressValidator::with_standard_table(address);
        validator.set_country(target);

        if same_country {
            prop_assert_eq!(validator.address(), &original);
        } else if region_fits {
            prop_assert_eq!(&validator.address().street, &original.street);
            prop_assert_eq!(&validator.address().country, target);
        } else {
            prop_assert_eq!(&validator.address().country, target);
            prop_assert!(validator.address().street.is_empty());
            prop_assert!(validator.address().city.is_empty());
            prop_assert!(validator.address().region.is_empty());
            prop_assert!(validator.address().postal_code.is_empty());
        }
    }

    #[test]
    fn prop_generated_addresses_are_valid(
        address in prop_oneof![
            listed_country_strategy().prop_flat_map(address_in_strategy),
            unlisted_country_strategy().prop_flat_map(address_in_strategy),
        ],
    ) {
        let validator = AddressValidator::with_standard_table(address);
        prop_assert!(validator.is_valid(), "errors: {:?}", validator.result().errors);
    }

    #[test]
    fn prop_finalize_is_idempotent(
        address in listed_country_strategy().prop_flat_map(address_in_strategy),
    ) {
        let mut validator = AddressValidator::with_standard_table(address);
        let once = validator.finalize().unwrap();
        prop_assert_eq!(once.normalized(), once.clone());
        prop_assert_eq!(once.country.to_uppercase(), once.country.clone());
    }
}
