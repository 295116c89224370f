//! Client DTOs

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

use domain_client::validation::check_birth_date;
use domain_client::{Client, ClientData, RuleViolation};

use super::address::AddressResponse;
use super::rules;
use crate::extract::{RequestRules, RuleContext};

/// Body of `POST /clients` and `PUT /clients/{id}`
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ClientRequest {
    #[serde(default)]
    #[validate(
        custom(function = "rules::not_blank"),
        length(min = 3, max = 100, message = "must be between 3 and 100 characters")
    )]
    pub name: String,

    #[serde(default)]
    #[validate(custom(function = "rules::email"))]
    pub email: String,

    #[serde(default)]
    #[validate(custom(function = "rules::national_id"))]
    pub national_id: String,

    /// Checked in [`RequestRules::check_rules`] against the configured age
    #[serde(default)]
    pub birth_date: Option<NaiveDate>,

    #[serde(default)]
    #[validate(custom(function = "rules::phone"))]
    pub phone: Option<String>,
}

impl RequestRules for ClientRequest {
    fn check_rules(&self, context: &RuleContext) -> Vec<RuleViolation> {
        check_birth_date(self.birth_date, context.today, context.minimum_age)
            .err()
            .into_iter()
            .collect()
    }
}

impl ClientRequest {
    /// Converts a validated request into domain data
    ///
    /// Returns `None` only if called on a request that skipped validation.
    pub fn into_data(self) -> Option<ClientData> {
        Some(ClientData {
            name: self.name,
            email: self.email,
            national_id: self.national_id,
            birth_date: self.birth_date?,
            phone: self.phone,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientResponse {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub national_id: String,
    pub birth_date: NaiveDate,
    pub phone: Option<String>,
    pub addresses: Vec<AddressResponse>,
}

impl From<Client> for ClientResponse {
    fn from(client: Client) -> Self {
        Self {
            id: client.id.value(),
            name: client.name,
            email: client.email,
            national_id: client.national_id,
            birth_date: client.birth_date,
            phone: client.phone,
            addresses: client.addresses.into_iter().map(AddressResponse::from).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;
    use crate::extract::field_violations;

    fn context() -> RuleContext {
        RuleContext {
            today: NaiveDate::from_ymd_opt(2024, 6, 15).unwrap(),
            minimum_age: 18,
        }
    }

    fn valid() -> ClientRequest {
        ClientRequest {
            name: "Lucia Ferreira".to_string(),
            email: "lucia@example.com".to_string(),
            national_id: "321.654.987-00".to_string(),
            birth_date: NaiveDate::from_ymd_opt(1995, 2, 1),
            phone: None,
        }
    }

    #[test]
    fn test_valid_request_passes() {
        let request = valid();
        assert!(request.validate().is_ok());
        assert!(request.check_rules(&context()).is_empty());
        assert_eq!(request.into_data().unwrap().birth_date.year(), 1995);
    }

    #[test]
    fn test_field_violations_are_reported_per_field() {
        let request = ClientRequest {
            name: "  ".to_string(),
            email: "nope".to_string(),
            phone: Some("123".to_string()),
            ..valid()
        };

        let lines = field_violations(&request.validate().unwrap_err());
        assert!(lines.contains(&"email: email must be a valid address".to_string()));
        assert!(lines.contains(&"name: must not be blank".to_string()));
        assert!(lines.iter().any(|l| l.starts_with("phone: ")));
        assert!(!lines.iter().any(|l| l.starts_with("national_id")));
    }

    #[test]
    fn test_underage_is_a_rule_violation() {
        let request = ClientRequest {
            birth_date: NaiveDate::from_ymd_opt(2010, 1, 1),
            ..valid()
        };
        let violations = request.check_rules(&context());
        assert_eq!(violations.len(), 1);
        assert_eq!(
            violations[0].to_string(),
            "birth_date: client must be at least 18 years old"
        );
    }

    #[test]
    fn test_missing_birth_date() {
        let request = ClientRequest {
            birth_date: None,
            ..valid()
        };
        assert_eq!(request.check_rules(&context())[0].message, "birth date is required");
        assert!(request.into_data().is_none());
    }
}
