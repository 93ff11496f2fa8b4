//! Tests for home owner groups on a filing

use domain_party::{
    FilingParties, OwnerGroup, PartyError, PartyRole, PartyType, TenancyType,
};
use test_utils::{init_test_tracing, IdFixtures, OwnerGroupFixtures, PartyBuilder};

fn filing() -> FilingParties {
    FilingParties::new(IdFixtures::filing_id())
}

// ============================================================================
// Party Type Reconciliation
// ============================================================================

mod party_type_tests {
    use super::*;

    #[test]
    fn test_missing_types_inferred_from_names() {
        init_test_tracing();
        let mut filing = filing();
        let business = PartyBuilder::new()
            .role(PartyRole::Owner)
            .business("Lakeshore Holdings Ltd")
            .build();
        filing
            .add_owner_group(OwnerGroup::new(
                TenancyType::Joint,
                vec![OwnerGroupFixtures::owner("Jane", "Doe"), business],
            ))
            .unwrap();

        let owners = &filing.owner_groups()[0].owners;
        assert_eq!(owners[0].party_type, Some(PartyType::OwnerInd));
        assert_eq!(owners[1].party_type, Some(PartyType::OwnerBus));
    }

    #[test]
    fn test_contradicting_types_corrected() {
        let mut filing = filing();
        let person_as_business = PartyBuilder::new()
            .role(PartyRole::Owner)
            .person("Jane", None, "Doe")
            .party_type(PartyType::OwnerBus)
            .build();
        let business_as_person = PartyBuilder::new()
            .role(PartyRole::Owner)
            .business("Lakeshore Holdings Ltd")
            .party_type(PartyType::OwnerInd)
            .build();
        filing
            .add_owner_group(OwnerGroup::new(
                TenancyType::Joint,
                vec![person_as_business, business_as_person],
            ))
            .unwrap();

        let owners = &filing.owner_groups()[0].owners;
        assert_eq!(owners[0].party_type, Some(PartyType::OwnerInd));
        assert_eq!(owners[1].party_type, Some(PartyType::OwnerBus));
    }

    #[test]
    fn test_executor_keeps_role_in_na_group() {
        let mut filing = filing();
        filing
            .add_owner_group(OwnerGroup::new(
                TenancyType::Na,
                vec![OwnerGroupFixtures::executor()],
            ))
            .unwrap();

        let executor = &filing.owner_groups()[0].owners[0];
        assert_eq!(executor.party_type, Some(PartyType::Executor));
        assert_eq!(executor.role, PartyRole::Executor);
    }

    #[test]
    fn test_declared_administrator_takes_role() {
        let mut filing = filing();
        let administrator = PartyBuilder::new()
            .role(PartyRole::Owner)
            .person("Ann", None, "Lee")
            .party_type(PartyType::Administrator)
            .build();
        filing
            .add_owner_group(OwnerGroup::new(TenancyType::Na, vec![administrator]))
            .unwrap();

        assert_eq!(
            filing.owner_groups()[0].owners[0].role,
            PartyRole::Administrator
        );
    }

    #[test]
    fn test_owner_cannot_hold_na_group() {
        let mut filing = filing();
        let result = filing.add_owner_group(OwnerGroup::new(
            TenancyType::Na,
            vec![OwnerGroupFixtures::owner("Jane", "Doe")],
        ));
        assert!(matches!(result, Err(PartyError::InvalidOwnerGroup(_))));
    }
}

// ============================================================================
// Tenancy and Interest
// ============================================================================

mod tenancy_tests {
    use super::*;

    #[test]
    fn test_group_ids_increase() {
        let mut filing = filing();
        assert_eq!(filing.add_owner_group(OwnerGroupFixtures::sole()).unwrap(), 1);
        assert_eq!(filing.add_owner_group(OwnerGroupFixtures::joint()).unwrap(), 2);

        filing.remove_owner_group(1).unwrap();
        assert_eq!(filing.add_owner_group(OwnerGroupFixtures::sole()).unwrap(), 3);
    }

    #[test]
    fn test_common_interests_share_denominator() {
        let mut filing = filing();
        filing
            .add_owner_group(OwnerGroupFixtures::common("Jane", 1, 2))
            .unwrap();
        filing
            .add_owner_group(OwnerGroupFixtures::common("John", 5, 10))
            .unwrap();
        filing
            .add_owner_group(OwnerGroupFixtures::common("Judy", 1, 5))
            .unwrap();

        let interests: Vec<_> = filing
            .owner_groups()
            .iter()
            .filter_map(OwnerGroup::interest)
            .collect();
        assert_eq!(interests, vec![(5, 10), (5, 10), (2, 10)]);
    }

    #[test]
    fn test_sole_group_rejects_second_owner() {
        let mut filing = filing();
        let mut group = OwnerGroupFixtures::sole();
        group.owners.push(OwnerGroupFixtures::owner("John", "Doe"));
        let error = filing.add_owner_group(group).unwrap_err();
        assert!(error.to_string().contains("exactly one owner"));
    }

    #[test]
    fn test_common_group_requires_interest() {
        let mut filing = filing();
        let group = OwnerGroup::new(
            TenancyType::Common,
            vec![OwnerGroupFixtures::owner("Jane", "Doe")],
        );
        assert!(matches!(
            filing.add_owner_group(group),
            Err(PartyError::InvalidOwnerGroup(_))
        ));
    }

    #[test]
    fn test_groups_read_from_json() {
        let json = r#"{
            "tenancyType": "COMMON",
            "interestNumerator": 1,
            "interestDenominator": 2,
            "owners": [{
                "role": "owner",
                "partyType": "OWNER_BUS",
                "individualName": { "first": "Jane", "last": "Doe" },
                "address": { "street": "1580 Lakeshore Rd", "city": "Kelowna",
                             "region": "BC", "postalCode": "V1W 3G1", "country": "CA" }
            }]
        }"#;
        let group: OwnerGroup = serde_json::from_str(json).unwrap();
        let mut filing = filing();
        filing.add_owner_group(group).unwrap();

        let stored = &filing.owner_groups()[0];
        assert_eq!(stored.tenancy_type, TenancyType::Common);
        assert_eq!(stored.owners[0].party_type, Some(PartyType::OwnerInd));
    }
}
