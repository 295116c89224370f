//! Client and address validation rules
//!
//! Pure predicates over field values. Nothing here touches a store; the
//! request layer runs these before any service is invoked.
//!
//! # Validation Rules
//!
//! ## Field patterns
//! - Email: `local@domain`, domain labels of letters, digits and hyphens
//! - National id: `NNN.NNN.NNN-NN`
//! - Phone: `(NN) NNNN-NNNN` or `(NN) NNNNN-NNNN`
//! - Postal code: `NNNNN-NNN`
//! - Region code: one of the 27 federative-unit codes
//!
//! ## Birth date
//! - Must be strictly before today
//! - Whole years elapsed up to today must be at least the minimum age

use std::fmt;

use chrono::{Datelike, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;

/// Default minimum client age in whole years
pub const MINIMUM_AGE: u32 = 18;

/// Accepted federative-unit codes for an address state
pub const REGION_CODES: [&str; 27] = [
    "AC", "AL", "AP", "AM", "BA", "CE", "DF", "ES", "GO", "MA", "MT", "MS", "MG", "PA", "PB",
    "PR", "PE", "PI", "RJ", "RN", "RS", "RO", "RR", "SC", "SP", "SE", "TO",
];

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$",
    )
    .expect("email pattern is valid")
});

static NATIONAL_ID_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{3}\.\d{3}\.\d{3}-\d{2}$").expect("national id pattern is valid"));

static PHONE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\(\d{2}\) \d{4,5}-\d{4}$").expect("phone pattern is valid"));

static POSTAL_CODE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{5}-\d{3}$").expect("postal code pattern is valid"));

/// A named shape check on a single string field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldRule {
    Email,
    NationalId,
    Phone,
    PostalCode,
    RegionCode,
}

impl FieldRule {
    /// Field name reported alongside a violation
    pub fn field(self) -> &'static str {
        match self {
            FieldRule::Email => "email",
            FieldRule::NationalId => "national_id",
            FieldRule::Phone => "phone",
            FieldRule::PostalCode => "postal_code",
            FieldRule::RegionCode => "state",
        }
    }

    /// Fixed message reported when the rule fails
    pub fn message(self) -> &'static str {
        match self {
            FieldRule::Email => "email must be a valid address",
            FieldRule::NationalId => "national id must follow the pattern XXX.XXX.XXX-XX",
            FieldRule::Phone => "phone must follow the pattern (XX) XXXX-XXXX or (XX) XXXXX-XXXX",
            FieldRule::PostalCode => "postal code must follow the pattern XXXXX-XXX",
            FieldRule::RegionCode => "state must be a valid federative unit code",
        }
    }

    /// Returns whether the value satisfies the rule
    pub fn matches(self, value: &str) -> bool {
        match self {
            FieldRule::Email => value.len() <= 254 && EMAIL_RE.is_match(value),
            FieldRule::NationalId => NATIONAL_ID_RE.is_match(value),
            FieldRule::Phone => PHONE_RE.is_match(value),
            FieldRule::PostalCode => POSTAL_CODE_RE.is_match(value),
            FieldRule::RegionCode => REGION_CODES.contains(&value),
        }
    }

    /// Checks the value, producing a violation with the rule's message
    pub fn check(self, value: &str) -> Result<(), RuleViolation> {
        if self.matches(value) {
            Ok(())
        } else {
            Err(RuleViolation::new(self.field(), self.message()))
        }
    }
}

/// A failed rule: which field, and the human-readable reason
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleViolation {
    pub field: &'static str,
    pub message: String,
}

impl RuleViolation {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl fmt::Display for RuleViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for RuleViolation {}

/// Whole years elapsed from `birth_date` to `today`
///
/// Returns `None` when the birth date lies after `today`.
pub fn age_in_years(birth_date: NaiveDate, today: NaiveDate) -> Option<u32> {
    if birth_date > today {
        return None;
    }
    let mut years = today.year() - birth_date.year();
    if (today.month(), today.day()) < (birth_date.month(), birth_date.day()) {
        years -= 1;
    }
    u32::try_from(years).ok()
}

/// Returns whether the date lies strictly before `today`
pub fn is_past(date: NaiveDate, today: NaiveDate) -> bool {
    date < today
}

/// Returns whether a client born on `birth_date` is at least `threshold`
/// years old on `today`. A missing birth date never qualifies.
pub fn meets_minimum_age(birth_date: Option<NaiveDate>, today: NaiveDate, threshold: u32) -> bool {
    birth_date
        .and_then(|birth| age_in_years(birth, today))
        .is_some_and(|age| age >= threshold)
}

/// Message reported when the minimum age check fails
pub fn minimum_age_message(threshold: u32) -> String {
    format!("client must be at least {} years old", threshold)
}

/// Checks a birth date: present, in the past, and old enough
pub fn check_birth_date(
    birth_date: Option<NaiveDate>,
    today: NaiveDate,
    threshold: u32,
) -> Result<(), RuleViolation> {
    let Some(birth) = birth_date else {
        return Err(RuleViolation::new("birth_date", "birth date is required"));
    };
    if !is_past(birth, today) {
        return Err(RuleViolation::new("birth_date", "birth date must be in the past"));
    }
    if !meets_minimum_age(Some(birth), today, threshold) {
        return Err(RuleViolation::new("birth_date", minimum_age_message(threshold)));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Days, Months};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
    }

    #[test]
    fn test_exactly_eighteen_passes() {
        let birth = today().checked_sub_months(Months::new(18 * 12)).unwrap();
        assert!(meets_minimum_age(Some(birth), today(), MINIMUM_AGE));
    }

    #[test]
    fn test_one_day_short_of_eighteen_fails() {
        let eighteen = today().checked_sub_months(Months::new(18 * 12)).unwrap();
        let birth = eighteen.checked_add_days(Days::new(1)).unwrap();
        assert!(!meets_minimum_age(Some(birth), today(), MINIMUM_AGE));
    }

    #[test]
    fn test_missing_birth_date_fails() {
        assert!(!meets_minimum_age(None, today(), MINIMUM_AGE));
    }

    #[test]
    fn test_leap_day_birthday() {
        let birth = NaiveDate::from_ymd_opt(2004, 2, 29).unwrap();
        let before = NaiveDate::from_ymd_opt(2022, 2, 28).unwrap();
        let after = NaiveDate::from_ymd_opt(2022, 3, 1).unwrap();
        assert_eq!(age_in_years(birth, before), Some(17));
        assert_eq!(age_in_years(birth, after), Some(18));
    }

    #[test]
    fn test_future_birth_date_has_no_age() {
        let birth = today().checked_add_days(Days::new(1)).unwrap();
        assert_eq!(age_in_years(birth, today()), None);
        let err = check_birth_date(Some(birth), today(), MINIMUM_AGE).unwrap_err();
        assert_eq!(err.message, "birth date must be in the past");
    }

    #[test]
    fn test_check_birth_date_reports_threshold() {
        let birth = NaiveDate::from_ymd_opt(2010, 1, 1).unwrap();
        let err = check_birth_date(Some(birth), today(), 21).unwrap_err();
        assert_eq!(err.field, "birth_date");
        assert_eq!(err.message, "client must be at least 21 years old");
    }

    #[test]
    fn test_national_id_pattern() {
        assert!(FieldRule::NationalId.matches("123.456.789-00"));
        assert!(!FieldRule::NationalId.matches("12345678900"));
        assert!(!FieldRule::NationalId.matches("123.456.789-000"));
    }

    #[test]
    fn test_phone_pattern() {
        assert!(FieldRule::Phone.matches("(11) 91234-5678"));
        assert!(FieldRule::Phone.matches("(11) 1234-5678"));
        assert!(!FieldRule::Phone.matches("11 91234-5678"));
    }

    #[test]
    fn test_postal_code_pattern() {
        assert!(FieldRule::PostalCode.matches("12345-678"));
        assert!(!FieldRule::PostalCode.matches("12345678"));
    }

    #[test]
    fn test_region_code() {
        assert!(FieldRule::RegionCode.matches("SP"));
        assert!(!FieldRule::RegionCode.matches("sp"));
        assert!(!FieldRule::RegionCode.matches("XX"));
    }

    #[test]
    fn test_email() {
        assert!(FieldRule::Email.matches("a@x.com"));
        assert!(FieldRule::Email.matches("first.last+tag@sub.example.org"));
        assert!(!FieldRule::Email.matches("not-an-email"));
        assert!(!FieldRule::Email.matches("a@@x.com"));
        assert!(!FieldRule::Email.matches(""));
    }

    #[test]
    fn test_check_carries_message() {
        let violation = FieldRule::PostalCode.check("1").unwrap_err();
        assert_eq!(violation.field, "postal_code");
        assert_eq!(violation.to_string(), "postal_code: postal code must follow the pattern XXXXX-XXX");
    }
}
