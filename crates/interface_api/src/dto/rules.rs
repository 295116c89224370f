//! `validator` adapters over the domain field rules
//!
//! Each function is referenced from a `#[validate(custom(...))]` attribute.

use std::borrow::Cow;

use validator::ValidationError;

use domain_client::FieldRule;

fn check(rule: FieldRule, value: &str) -> Result<(), ValidationError> {
    rule.check(value).map_err(|violation| {
        ValidationError::new(rule.field()).with_message(Cow::Owned(violation.message))
    })
}

pub fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(ValidationError::new("blank").with_message(Cow::Borrowed("must not be blank")))
    } else {
        Ok(())
    }
}

pub fn email(value: &str) -> Result<(), ValidationError> {
    check(FieldRule::Email, value)
}

pub fn national_id(value: &str) -> Result<(), ValidationError> {
    check(FieldRule::NationalId, value)
}

pub fn phone(value: &str) -> Result<(), ValidationError> {
    check(FieldRule::Phone, value)
}

pub fn postal_code(value: &str) -> Result<(), ValidationError> {
    check(FieldRule::PostalCode, value)
}

pub fn region_code(value: &str) -> Result<(), ValidationError> {
    check(FieldRule::RegionCode, value)
}
