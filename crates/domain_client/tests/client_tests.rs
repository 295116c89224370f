//! Entity and validation tests for domain_client

use chrono::NaiveDate;
use proptest::prelude::*;

use core_kernel::{AddressId, ClientId};

use domain_client::validation::{age_in_years, check_birth_date, meets_minimum_age};
use domain_client::{Address, AddressData, Client, ClientData, FieldRule, MINIMUM_AGE, REGION_CODES};

// ============================================================================
// Entity Tests
// ============================================================================

mod entity_tests {
    use super::*;

    fn create_test_client() -> Client {
        Client::from_data(
            ClientId::new(1),
            ClientData {
                name: "João Silva".to_string(),
                email: "joao.silva@example.com".to_string(),
                national_id: "123.456.789-00".to_string(),
                birth_date: NaiveDate::from_ymd_opt(1990, 1, 1).unwrap(),
                phone: Some("(11) 91234-5678".to_string()),
            },
        )
    }

    fn create_test_address(id: i64) -> Address {
        Address::from_data(
            AddressId::new(id),
            ClientId::new(1),
            AddressData {
                street: "Avenida Paulista".to_string(),
                number: "1000".to_string(),
                neighborhood: "Bela Vista".to_string(),
                city: "São Paulo".to_string(),
                state: "SP".to_string(),
                postal_code: "01310-100".to_string(),
            },
        )
    }

    #[test]
    fn test_address_apply_keeps_owner() {
        let mut address = create_test_address(5);
        let mut data = address.data();
        data.street = "Rua Augusta".to_string();

        address.apply(data);

        assert_eq!(address.street, "Rua Augusta");
        assert_eq!(address.client_id, ClientId::new(1));
        assert_eq!(address.id, AddressId::new(5));
    }

    #[test]
    fn test_client_serialization() {
        let mut client = create_test_client();
        client.addresses.push(create_test_address(2));

        let json = serde_json::to_value(&client).unwrap();
        assert_eq!(json["id"], 1);
        assert_eq!(json["national_id"], "123.456.789-00");
        assert_eq!(json["birth_date"], "1990-01-01");
        assert_eq!(json["addresses"][0]["client_id"], 1);

        let back: Client = serde_json::from_value(json).unwrap();
        assert_eq!(back, client);
    }
}

// ============================================================================
// Validation Tests
// ============================================================================

mod validation_tests {
    use super::*;

    #[test]
    fn test_every_region_code_accepted() {
        for code in REGION_CODES {
            assert!(FieldRule::RegionCode.matches(code), "{code} should be accepted");
        }
        assert_eq!(REGION_CODES.len(), 27);
    }

    #[test]
    fn test_rule_fields() {
        assert_eq!(FieldRule::Email.field(), "email");
        assert_eq!(FieldRule::NationalId.field(), "national_id");
        assert_eq!(FieldRule::RegionCode.field(), "state");
    }

    #[test]
    fn test_birthday_boundary() {
        let birth = NaiveDate::from_ymd_opt(2000, 7, 20).unwrap();
        let eve = NaiveDate::from_ymd_opt(2018, 7, 19).unwrap();
        let day = NaiveDate::from_ymd_opt(2018, 7, 20).unwrap();

        assert!(!meets_minimum_age(Some(birth), eve, MINIMUM_AGE));
        assert!(meets_minimum_age(Some(birth), day, MINIMUM_AGE));
    }

    #[test]
    fn test_birth_date_today_is_not_past() {
        let today = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let err = check_birth_date(Some(today), today, 0).unwrap_err();
        assert_eq!(err.message, "birth date must be in the past");
    }

    #[test]
    fn test_missing_birth_date_required() {
        let today = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let err = check_birth_date(None, today, MINIMUM_AGE).unwrap_err();
        assert_eq!(err.message, "birth date is required");
    }
}

// ============================================================================
// Property Tests
// ============================================================================

proptest! {
    #[test]
    fn prop_formatted_national_id_matches(a in 0u32..1000, b in 0u32..1000, c in 0u32..1000, d in 0u32..100) {
        let value = format!("{a:03}.{b:03}.{c:03}-{d:02}");
        prop_assert!(FieldRule::NationalId.matches(&value));
    }

    #[test]
    fn prop_bare_digits_never_national_id(digits in "[0-9]{11}") {
        prop_assert!(!FieldRule::NationalId.matches(&digits));
    }

    #[test]
    fn prop_phone_accepts_eight_or_nine_digits(area in "[0-9]{2}", head in "[0-9]{4,5}", tail in "[0-9]{4}") {
        let value = format!("({area}) {head}-{tail}");
        prop_assert!(FieldRule::Phone.matches(&value));
    }

    #[test]
    fn prop_postal_code(head in "[0-9]{5}", tail in "[0-9]{3}") {
        let with_dash = format!("{head}-{tail}");
        let without_dash = format!("{head}{tail}");
        prop_assert!(FieldRule::PostalCode.matches(&with_dash));
        prop_assert!(!FieldRule::PostalCode.matches(&without_dash));
    }

    #[test]
    fn prop_age_never_exceeds_year_difference(
        birth_offset in 0i64..40_000,
        extra in 0i64..40_000,
    ) {
        let epoch = NaiveDate::from_ymd_opt(1900, 1, 1).unwrap();
        let birth = epoch + chrono::Duration::days(birth_offset);
        let today = birth + chrono::Duration::days(extra);
        let age = age_in_years(birth, today).unwrap();
        prop_assert!(age as i64 <= extra / 365);
        prop_assert!(age as i64 >= extra / 366 - 1);
    }
}
