//! Address DTOs

use serde::{Deserialize, Serialize};
use validator::Validate;

use domain_client::{Address, AddressData};

use super::rules;
use crate::extract::RequestRules;

/// Body of `POST /clients/{id}/addresses` and `PUT .../addresses/{id}`
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct AddressRequest {
    #[serde(default)]
    #[validate(
        custom(function = "rules::not_blank"),
        length(min = 3, max = 255, message = "must be between 3 and 255 characters")
    )]
    pub street: String,

    #[serde(default)]
    #[validate(
        custom(function = "rules::not_blank"),
        length(min = 1, max = 10, message = "must be at most 10 characters")
    )]
    pub number: String,

    #[serde(default)]
    #[validate(
        custom(function = "rules::not_blank"),
        length(min = 3, max = 100, message = "must be between 3 and 100 characters")
    )]
    pub neighborhood: String,

    #[serde(default)]
    #[validate(
        custom(function = "rules::not_blank"),
        length(min = 2, max = 100, message = "must be between 2 and 100 characters")
    )]
    pub city: String,

    #[serde(default)]
    #[validate(custom(function = "rules::region_code"))]
    pub state: String,

    #[serde(default)]
    #[validate(custom(function = "rules::postal_code"))]
    pub postal_code: String,
}

impl RequestRules for AddressRequest {}

impl From<AddressRequest> for AddressData {
    fn from(request: AddressRequest) -> Self {
        AddressData {
            street: request.street,
            number: request.number,
            neighborhood: request.neighborhood,
            city: request.city,
            state: request.state,
            postal_code: request.postal_code,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddressResponse {
    pub id: i64,
    pub street: String,
    pub number: String,
    pub neighborhood: String,
    pub city: String,
    pub state: String,
    pub postal_code: String,
    pub client_id: i64,
}

impl From<Address> for AddressResponse {
    fn from(address: Address) -> Self {
        Self {
            id: address.id.value(),
            street: address.street,
            number: address.number,
            neighborhood: address.neighborhood,
            city: address.city,
            state: address.state,
            postal_code: address.postal_code,
            client_id: address.client_id.value(),
        }
    }
}
