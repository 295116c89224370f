//! Client entity
//!
//! A client is the primary customer record. Its identity is assigned by the
//! store on first save; every other field is replaced wholesale on update.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use core_kernel::ClientId;
use crate::address::Address;

/// The mutable fields of a client
///
/// This is what callers supply on add and update. Identity and owned
/// addresses are never part of it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientData {
    pub name: String,
    pub email: String,
    pub national_id: String,
    pub birth_date: NaiveDate,
    pub phone: Option<String>,
}

/// A persisted client together with the addresses it owns
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Client {
    pub id: ClientId,
    pub name: String,
    pub email: String,
    pub national_id: String,
    pub birth_date: NaiveDate,
    pub phone: Option<String>,
    /// Owned addresses, ordered by id
    #[serde(default)]
    pub addresses: Vec<Address>,
}

impl Client {
    /// Builds a client from its store-assigned id and field values
    pub fn from_data(id: ClientId, data: ClientData) -> Self {
        Self {
            id,
            name: data.name,
            email: data.email,
            national_id: data.national_id,
            birth_date: data.birth_date,
            phone: data.phone,
            addresses: Vec::new(),
        }
    }

    /// Returns a copy of the mutable fields
    pub fn data(&self) -> ClientData {
        ClientData {
            name: self.name.clone(),
            email: self.email.clone(),
            national_id: self.national_id.clone(),
            birth_date: self.birth_date,
            phone: self.phone.clone(),
        }
    }

    /// Overwrites the mutable fields, leaving id and addresses untouched
    pub fn apply(&mut self, data: ClientData) {
        self.name = data.name;
        self.email = data.email;
        self.national_id = data.national_id;
        self.birth_date = data.birth_date;
        self.phone = data.phone;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_data() -> ClientData {
        ClientData {
            name: "João Silva".to_string(),
            email: "joao.silva@example.com".to_string(),
            national_id: "123.456.789-00".to_string(),
            birth_date: NaiveDate::from_ymd_opt(1990, 1, 1).unwrap(),
            phone: Some("(11) 91234-5678".to_string()),
        }
    }

    #[test]
    fn test_apply_keeps_identity() {
        let mut client = Client::from_data(ClientId::new(1), sample_data());
        let mut data = sample_data();
        data.name = "João Pedro Silva".to_string();
        data.phone = None;

        client.apply(data);

        assert_eq!(client.id, ClientId::new(1));
        assert_eq!(client.name, "João Pedro Silva");
        assert!(client.phone.is_none());
    }
}
