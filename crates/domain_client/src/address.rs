//! Address types

use serde::{Deserialize, Serialize};

use core_kernel::{AddressId, ClientId};

/// The mutable fields of an address
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressData {
    pub street: String,
    pub number: String,
    pub neighborhood: String,
    pub city: String,
    /// Federative-unit code, e.g. `SP`
    pub state: String,
    /// `NNNNN-NNN`
    pub postal_code: String,
}

/// A postal address owned by exactly one client
///
/// `client_id` is fixed when the address is first saved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    pub id: AddressId,
    pub client_id: ClientId,
    pub street: String,
    pub number: String,
    pub neighborhood: String,
    pub city: String,
    pub state: String,
    pub postal_code: String,
}

impl Address {
    /// Builds an address from its store-assigned id, owner and field values
    pub fn from_data(id: AddressId, client_id: ClientId, data: AddressData) -> Self {
        Self {
            id,
            client_id,
            street: data.street,
            number: data.number,
            neighborhood: data.neighborhood,
            city: data.city,
            state: data.state,
            postal_code: data.postal_code,
        }
    }

    /// Returns a copy of the mutable fields
    pub fn data(&self) -> AddressData {
        AddressData {
            street: self.street.clone(),
            number: self.number.clone(),
            neighborhood: self.neighborhood.clone(),
            city: self.city.clone(),
            state: self.state.clone(),
            postal_code: self.postal_code.clone(),
        }
    }

    /// Overwrites the mutable fields; id and owner are untouched
    pub fn apply(&mut self, data: AddressData) {
        self.street = data.street;
        self.number = data.number;
        self.neighborhood = data.neighborhood;
        self.city = data.city;
        self.state = data.state;
        self.postal_code = data.postal_code;
    }
}
