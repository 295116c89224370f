//! Pre-built Test Fixtures
//!
//! Fixed, valid client and address data. Every value here passes the request
//! validation rules as of [`TemporalFixtures::today`].

use chrono::NaiveDate;

use domain_client::{AddressData, ClientData};

/// Fixture for date test data
pub struct TemporalFixtures;

impl TemporalFixtures {
    /// Reference "today" used by date-sensitive tests (June 15, 2024)
    pub fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
    }

    /// Birth date of an adult client
    pub fn adult_birth_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(1990, 5, 20).unwrap()
    }

    /// Birth date of a client who is 17 on [`Self::today`]
    pub fn minor_birth_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2007, 1, 10).unwrap()
    }
}

/// Fixture for string-valued test data
pub struct StringFixtures;

impl StringFixtures {
    pub fn national_id() -> &'static str {
        "123.456.789-00"
    }

    pub fn email() -> &'static str {
        "maria.souza@example.com"
    }

    pub fn phone() -> &'static str {
        "(11) 98765-4321"
    }

    pub fn postal_code() -> &'static str {
        "01310-100"
    }
}

/// Fixture for domain values
pub struct ClientFixtures;

impl ClientFixtures {
    /// A valid adult client
    pub fn maria() -> ClientData {
        ClientData {
            name: "Maria Souza".to_string(),
            email: StringFixtures::email().to_string(),
            national_id: StringFixtures::national_id().to_string(),
            birth_date: TemporalFixtures::adult_birth_date(),
            phone: Some(StringFixtures::phone().to_string()),
        }
    }

    /// A second valid client, distinct from [`Self::maria`] in every unique field
    pub fn pedro() -> ClientData {
        ClientData {
            name: "Pedro Lima".to_string(),
            email: "pedro.lima@example.com".to_string(),
            national_id: "987.654.321-00".to_string(),
            birth_date: NaiveDate::from_ymd_opt(1975, 9, 3).unwrap(),
            phone: None,
        }
    }

    /// A valid address in São Paulo
    pub fn paulista() -> AddressData {
        AddressData {
            street: "Avenida Paulista".to_string(),
            number: "1578".to_string(),
            neighborhood: "Bela Vista".to_string(),
            city: "São Paulo".to_string(),
            state: "SP".to_string(),
            postal_code: StringFixtures::postal_code().to_string(),
        }
    }

    /// A valid address in Rio de Janeiro
    pub fn copacabana() -> AddressData {
        AddressData {
            street: "Avenida Atlântica".to_string(),
            number: "1702".to_string(),
            neighborhood: "Copacabana".to_string(),
            city: "Rio de Janeiro".to_string(),
            state: "RJ".to_string(),
            postal_code: "22021-001".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain_client::validation::meets_minimum_age;
    use domain_client::{FieldRule, MINIMUM_AGE};

    #[test]
    fn test_fixtures_are_valid() {
        let maria = ClientFixtures::maria();
        assert!(FieldRule::Email.matches(&maria.email));
        assert!(FieldRule::NationalId.matches(&maria.national_id));
        assert!(FieldRule::Phone.matches(maria.phone.as_deref().unwrap()));
        assert!(FieldRule::PostalCode.matches(&ClientFixtures::paulista().postal_code));
        assert!(FieldRule::RegionCode.matches(&ClientFixtures::copacabana().state));
    }

    #[test]
    fn test_minor_fixture_is_underage() {
        let today = TemporalFixtures::today();
        assert!(!meets_minimum_age(Some(TemporalFixtures::minor_birth_date()), today, MINIMUM_AGE));
        assert!(meets_minimum_age(Some(TemporalFixtures::adult_birth_date()), today, MINIMUM_AGE));
    }
}
