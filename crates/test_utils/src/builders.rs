//! Test Data Builders
//!
//! Provides builder patterns for constructing test data with sensible defaults.
//! Unique fields (email, national id) are generated per builder so that
//! several clients can be stored without colliding.

use std::sync::atomic::{AtomicU64, Ordering};

use chrono::NaiveDate;
use fake::faker::address::en::{CityName, StreetName};
use fake::faker::name::en::Name;
use fake::Fake;

use domain_client::{AddressData, ClientData};

use crate::fixtures::TemporalFixtures;

static SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_sequence() -> u64 {
    SEQUENCE.fetch_add(1, Ordering::Relaxed)
}

/// Formats a number as a national id, e.g. `7` -> `000.000.000-07`
pub fn national_id_from(n: u64) -> String {
    let digits = format!("{:011}", n % 100_000_000_000);
    format!(
        "{}.{}.{}-{}",
        &digits[0..3],
        &digits[3..6],
        &digits[6..9],
        &digits[9..11]
    )
}

/// Builder for [`ClientData`]
#[derive(Debug, Clone)]
pub struct ClientDataBuilder {
    name: String,
    email: String,
    national_id: String,
    birth_date: NaiveDate,
    phone: Option<String>,
}

impl Default for ClientDataBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ClientDataBuilder {
    /// Creates a builder with a random name and unique email and national id
    pub fn new() -> Self {
        let n = next_sequence();
        Self {
            name: Name().fake(),
            email: format!("client{}@example.com", n),
            national_id: national_id_from(n),
            birth_date: TemporalFixtures::adult_birth_date(),
            phone: Some("(11) 91234-5678".to_string()),
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = email.into();
        self
    }

    pub fn national_id(mut self, national_id: impl Into<String>) -> Self {
        self.national_id = national_id.into();
        self
    }

    pub fn birth_date(mut self, birth_date: NaiveDate) -> Self {
        self.birth_date = birth_date;
        self
    }

    pub fn phone(mut self, phone: Option<&str>) -> Self {
        self.phone = phone.map(str::to_string);
        self
    }

    pub fn build(self) -> ClientData {
        ClientData {
            name: self.name,
            email: self.email,
            national_id: self.national_id,
            birth_date: self.birth_date,
            phone: self.phone,
        }
    }
}

/// Builder for [`AddressData`]
#[derive(Debug, Clone)]
pub struct AddressDataBuilder {
    street: String,
    number: String,
    neighborhood: String,
    city: String,
    state: String,
    postal_code: String,
}

impl Default for AddressDataBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl AddressDataBuilder {
    /// Creates a builder with a random street and city in SP
    pub fn new() -> Self {
        Self {
            street: StreetName().fake(),
            number: (1..9999u32).fake::<u32>().to_string(),
            neighborhood: "Centro".to_string(),
            city: CityName().fake(),
            state: "SP".to_string(),
            postal_code: "01001-000".to_string(),
        }
    }

    pub fn street(mut self, street: impl Into<String>) -> Self {
        self.street = street.into();
        self
    }

    pub fn number(mut self, number: impl Into<String>) -> Self {
        self.number = number.into();
        self
    }

    pub fn neighborhood(mut self, neighborhood: impl Into<String>) -> Self {
        self.neighborhood = neighborhood.into();
        self
    }

    pub fn city(mut self, city: impl Into<String>) -> Self {
        self.city = city.into();
        self
    }

    pub fn state(mut self, state: impl Into<String>) -> Self {
        self.state = state.into();
        self
    }

    pub fn postal_code(mut self, postal_code: impl Into<String>) -> Self {
        self.postal_code = postal_code.into();
        self
    }

    pub fn build(self) -> AddressData {
        AddressData {
            street: self.street,
            number: self.number,
            neighborhood: self.neighborhood,
            city: self.city,
            state: self.state,
            postal_code: self.postal_code,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain_client::FieldRule;

    #[test]
    fn test_national_id_from() {
        assert_eq!(national_id_from(7), "000.000.000-07");
        assert_eq!(national_id_from(12345678901), "123.456.789-01");
    }

    #[test]
    fn test_builders_produce_unique_valid_clients() {
        let a = ClientDataBuilder::new().build();
        let b = ClientDataBuilder::new().build();

        assert_ne!(a.email, b.email);
        assert_ne!(a.national_id, b.national_id);
        assert!(FieldRule::NationalId.matches(&a.national_id));
        assert!(FieldRule::Email.matches(&a.email));
        assert!(a.name.chars().count() >= 3);
    }

    #[test]
    fn test_address_builder_overrides() {
        let address = AddressDataBuilder::new().state("RJ").street("Rua do Ouvidor").build();
        assert_eq!(address.state, "RJ");
        assert_eq!(address.street, "Rua do Ouvidor");
        assert!(address.number.len() <= 10);
    }
}
