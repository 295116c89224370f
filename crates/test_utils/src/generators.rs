//! Property-Based Test Generators
//!
//! Provides proptest strategies for generating field values and whole
//! records that satisfy the request validation rules.

use chrono::{Duration, NaiveDate};
use proptest::prelude::*;

use domain_client::{AddressData, ClientData, REGION_CODES};

/// Strategy for national ids in `NNN.NNN.NNN-NN` form
pub fn national_id_strategy() -> impl Strategy<Value = String> {
    "[0-9]{3}\\.[0-9]{3}\\.[0-9]{3}-[0-9]{2}"
}

/// Strategy for phones in either accepted form
pub fn phone_strategy() -> impl Strategy<Value = String> {
    "\\([0-9]{2}\\) [0-9]{4,5}-[0-9]{4}"
}

/// Strategy for postal codes in `NNNNN-NNN` form
pub fn postal_code_strategy() -> impl Strategy<Value = String> {
    "[0-9]{5}-[0-9]{3}"
}

/// Strategy for accepted federative-unit codes
pub fn region_code_strategy() -> impl Strategy<Value = String> {
    proptest::sample::select(REGION_CODES.to_vec()).prop_map(str::to_string)
}

/// Strategy for simple valid emails
pub fn email_strategy() -> impl Strategy<Value = String> {
    ("[a-z][a-z0-9]{0,15}", "[a-z]{2,10}", "(com|org|net|br)")
        .prop_map(|(local, domain, tld)| format!("{}@{}.{}", local, domain, tld))
}

/// Strategy for names between 3 and 100 characters
pub fn name_strategy() -> impl Strategy<Value = String> {
    "[A-Z][a-z]{2,40}( [A-Z][a-z]{1,40})?"
}

/// Strategy for birth dates at least `min_age` years before `today`
pub fn adult_birth_date_strategy(today: NaiveDate, min_age: u32) -> impl Strategy<Value = NaiveDate> {
    let latest = today
        .checked_sub_months(chrono::Months::new(min_age * 12))
        .unwrap_or(today);
    (0i64..365 * 80).prop_map(move |days| latest - Duration::days(days))
}

/// Strategy for valid client data relative to `today`
pub fn client_data_strategy(today: NaiveDate) -> impl Strategy<Value = ClientData> {
    (
        name_strategy(),
        email_strategy(),
        national_id_strategy(),
        adult_birth_date_strategy(today, domain_client::MINIMUM_AGE),
        proptest::option::of(phone_strategy()),
    )
        .prop_map(|(name, email, national_id, birth_date, phone)| ClientData {
            name,
            email,
            national_id,
            birth_date,
            phone,
        })
}

/// Strategy for valid address data
pub fn address_data_strategy() -> impl Strategy<Value = AddressData> {
    (
        "[A-Z][a-z]{2,30}",
        "[0-9]{1,5}",
        "[A-Z][a-z]{2,30}",
        "[A-Z][a-z]{1,30}",
        region_code_strategy(),
        postal_code_strategy(),
    )
        .prop_map(|(street, number, neighborhood, city, state, postal_code)| AddressData {
            street,
            number,
            neighborhood,
            city,
            state,
            postal_code,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain_client::validation::meets_minimum_age;
    use domain_client::FieldRule;

    proptest! {
        #[test]
        fn generated_clients_are_valid(data in client_data_strategy(NaiveDate::from_ymd_opt(2024, 6, 15).unwrap())) {
            let today = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
            prop_assert!(FieldRule::Email.matches(&data.email));
            prop_assert!(FieldRule::NationalId.matches(&data.national_id));
            prop_assert!(data.phone.as_deref().map_or(true, |p| FieldRule::Phone.matches(p)));
            prop_assert!(meets_minimum_age(Some(data.birth_date), today, domain_client::MINIMUM_AGE));
            prop_assert!((3..=100).contains(&data.name.chars().count()));
        }

        #[test]
        fn generated_addresses_are_valid(data in address_data_strategy()) {
            prop_assert!(FieldRule::PostalCode.matches(&data.postal_code));
            prop_assert!(FieldRule::RegionCode.matches(&data.state));
            prop_assert!(data.number.len() <= 10);
        }
    }
}
