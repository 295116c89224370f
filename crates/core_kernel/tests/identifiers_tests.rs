//! Unit tests for the identifiers module
//!
//! Tests cover creation, parsing, conversion and display formatting of the
//! store-assigned identifiers.

use core_kernel::{AddressId, ClientId};
use proptest::prelude::*;

mod client_id_tests {
    use super::*;

    #[test]
    fn test_value_roundtrip() {
        let id = ClientId::new(15);
        assert_eq!(id.value(), 15);
        assert_eq!(i64::from(id), 15);
        assert_eq!(ClientId::from(15), id);
    }

    #[test]
    fn test_kind() {
        assert_eq!(ClientId::kind(), "client");
        assert_eq!(AddressId::kind(), "address");
    }

    #[test]
    fn test_from_str_trims_whitespace() {
        let id: ClientId = " 9 ".parse().unwrap();
        assert_eq!(id, ClientId::new(9));
    }

    #[test]
    fn test_from_str_rejects_decimal() {
        assert!("1.5".parse::<ClientId>().is_err());
    }

    #[test]
    fn test_ordering_follows_value() {
        assert!(ClientId::new(1) < ClientId::new(2));
    }
}

proptest! {
    #[test]
    fn prop_display_then_parse_is_identity(raw in any::<i64>()) {
        let id = AddressId::new(raw);
        let parsed: AddressId = id.to_string().parse().unwrap();
        prop_assert_eq!(parsed, id);
    }
}
