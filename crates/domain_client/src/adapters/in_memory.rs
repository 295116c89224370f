//! In-memory store
//!
//! Keeps clients and addresses behind one lock so that every write checks
//! uniqueness and ownership against a consistent view, the same guarantees
//! the relational schema gives the PostgreSQL adapters.

use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use core_kernel::{
    AdapterHealth, AddressId, ClientId, DomainPort, HealthCheckResult, HealthCheckable, PortError,
};

use crate::address::{Address, AddressData};
use crate::client::{Client, ClientData};
use crate::ports::{AddressStore, ClientStore};

#[derive(Debug, Default)]
struct State {
    clients: BTreeMap<ClientId, ClientData>,
    addresses: BTreeMap<AddressId, Address>,
    by_email: HashMap<String, ClientId>,
    by_national_id: HashMap<String, ClientId>,
    last_client_id: i64,
    last_address_id: i64,
}

impl State {
    fn load_client(&self, id: ClientId) -> Option<Client> {
        let data = self.clients.get(&id)?;
        let mut client = Client::from_data(id, data.clone());
        client.addresses = self.addresses_of(id);
        Some(client)
    }

    fn addresses_of(&self, client_id: ClientId) -> Vec<Address> {
        self.addresses
            .values()
            .filter(|a| a.client_id == client_id)
            .cloned()
            .collect()
    }

    /// Uniqueness check for a write by `writer` (None for an insert)
    fn check_unique(&self, writer: Option<ClientId>, data: &ClientData) -> Result<(), PortError> {
        if let Some(owner) = self.by_email.get(&data.email) {
            if Some(*owner) != writer {
                return Err(PortError::conflict(format!(
                    "email already registered: {}",
                    data.email
                )));
            }
        }
        if let Some(owner) = self.by_national_id.get(&data.national_id) {
            if Some(*owner) != writer {
                return Err(PortError::conflict(format!(
                    "national id already registered: {}",
                    data.national_id
                )));
            }
        }
        Ok(())
    }

    fn index(&mut self, id: ClientId, data: &ClientData) {
        self.by_email.insert(data.email.clone(), id);
        self.by_national_id.insert(data.national_id.clone(), id);
    }

    fn unindex(&mut self, data: &ClientData) {
        self.by_email.remove(&data.email);
        self.by_national_id.remove(&data.national_id);
    }
}

/// Process-local implementation of both storage ports
#[derive(Debug, Default)]
pub struct InMemoryStore {
    state: RwLock<State>,
}

impl InMemoryStore {
    /// Creates an empty store; ids start at 1
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored clients
    pub async fn client_count(&self) -> usize {
        self.state.read().await.clients.len()
    }

    /// Number of stored addresses across all clients
    pub async fn address_count(&self) -> usize {
        self.state.read().await.addresses.len()
    }
}

impl DomainPort for InMemoryStore {}

#[async_trait]
impl HealthCheckable for InMemoryStore {
    async fn health_check(&self) -> HealthCheckResult {
        HealthCheckResult {
            adapter_id: "in-memory-store".to_string(),
            status: AdapterHealth::Healthy,
            latency_ms: 0,
            message: None,
            checked_at: Utc::now(),
        }
    }
}

#[async_trait]
impl ClientStore for InMemoryStore {
    async fn find_by_id(&self, id: ClientId) -> Result<Option<Client>, PortError> {
        Ok(self.state.read().await.load_client(id))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Client>, PortError> {
        let state = self.state.read().await;
        Ok(state
            .by_email
            .get(email)
            .and_then(|id| state.load_client(*id)))
    }

    async fn find_by_national_id(&self, national_id: &str) -> Result<Option<Client>, PortError> {
        let state = self.state.read().await;
        Ok(state
            .by_national_id
            .get(national_id)
            .and_then(|id| state.load_client(*id)))
    }

    async fn exists_by_id(&self, id: ClientId) -> Result<bool, PortError> {
        Ok(self.state.read().await.clients.contains_key(&id))
    }

    async fn exists_by_email(&self, email: &str) -> Result<bool, PortError> {
        Ok(self.state.read().await.by_email.contains_key(email))
    }

    async fn exists_by_national_id(&self, national_id: &str) -> Result<bool, PortError> {
        Ok(self.state.read().await.by_national_id.contains_key(national_id))
    }

    async fn list_all(&self) -> Result<Vec<Client>, PortError> {
        let state = self.state.read().await;
        Ok(state
            .clients
            .keys()
            .filter_map(|id| state.load_client(*id))
            .collect())
    }

    async fn save(&self, id: Option<ClientId>, data: &ClientData) -> Result<Client, PortError> {
        let mut state = self.state.write().await;
        state.check_unique(id, data)?;

        let id = match id {
            Some(id) => {
                let previous = state
                    .clients
                    .remove(&id)
                    .ok_or_else(|| PortError::not_found("Client", id))?;
                state.unindex(&previous);
                id
            }
            None => {
                state.last_client_id += 1;
                ClientId::new(state.last_client_id)
            }
        };

        state.index(id, data);
        state.clients.insert(id, data.clone());

        state
            .load_client(id)
            .ok_or_else(|| PortError::internal("client vanished during save"))
    }

    async fn delete_by_id(&self, id: ClientId) -> Result<(), PortError> {
        let mut state = self.state.write().await;
        let removed = state
            .clients
            .remove(&id)
            .ok_or_else(|| PortError::not_found("Client", id))?;
        state.unindex(&removed);
        state.addresses.retain(|_, a| a.client_id != id);
        Ok(())
    }
}

#[async_trait]
impl AddressStore for InMemoryStore {
    async fn find_by_id(&self, id: AddressId) -> Result<Option<Address>, PortError> {
        Ok(self.state.read().await.addresses.get(&id).cloned())
    }

    async fn list_by_client(&self, client_id: ClientId) -> Result<Vec<Address>, PortError> {
        Ok(self.state.read().await.addresses_of(client_id))
    }

    async fn exists_by_id_and_client_id(
        &self,
        id: AddressId,
        client_id: ClientId,
    ) -> Result<bool, PortError> {
        Ok(self
            .state
            .read()
            .await
            .addresses
            .get(&id)
            .is_some_and(|a| a.client_id == client_id))
    }

    async fn save(
        &self,
        id: Option<AddressId>,
        client_id: ClientId,
        data: &AddressData,
    ) -> Result<Address, PortError> {
        let mut state = self.state.write().await;

        match id {
            Some(id) => {
                let address = state
                    .addresses
                    .get_mut(&id)
                    .filter(|a| a.client_id == client_id)
                    .ok_or_else(|| PortError::not_found("Address", id))?;
                address.apply(data.clone());
                Ok(address.clone())
            }
            None => {
                if !state.clients.contains_key(&client_id) {
                    return Err(PortError::not_found("Client", client_id));
                }
                state.last_address_id += 1;
                let id = AddressId::new(state.last_address_id);
                let address = Address::from_data(id, client_id, data.clone());
                state.addresses.insert(id, address.clone());
                Ok(address)
            }
        }
    }

    async fn delete_by_id(&self, id: AddressId) -> Result<(), PortError> {
        self.state
            .write()
            .await
            .addresses
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| PortError::not_found("Address", id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn client_data(email: &str, national_id: &str) -> ClientData {
        ClientData {
            name: "Ana Souza".to_string(),
            email: email.to_string(),
            national_id: national_id.to_string(),
            birth_date: NaiveDate::from_ymd_opt(1985, 3, 10).unwrap(),
            phone: None,
        }
    }

    fn address_data(street: &str) -> AddressData {
        AddressData {
            street: street.to_string(),
            number: "100".to_string(),
            neighborhood: "Centro".to_string(),
            city: "São Paulo".to_string(),
            state: "SP".to_string(),
            postal_code: "01000-000".to_string(),
        }
    }

    #[tokio::test]
    async fn test_ids_are_assigned_sequentially() {
        let store = InMemoryStore::new();
        let a = ClientStore::save(&store, None, &client_data("a@x.com", "111.111.111-11"))
            .await
            .unwrap();
        let b = ClientStore::save(&store, None, &client_data("b@x.com", "222.222.222-22"))
            .await
            .unwrap();
        assert_eq!(a.id, ClientId::new(1));
        assert_eq!(b.id, ClientId::new(2));
    }

    #[tokio::test]
    async fn test_duplicate_email_is_conflict() {
        let store = InMemoryStore::new();
        ClientStore::save(&store, None, &client_data("a@x.com", "111.111.111-11"))
            .await
            .unwrap();
        let err = ClientStore::save(&store, None, &client_data("a@x.com", "222.222.222-22"))
            .await
            .unwrap_err();
        assert!(err.is_conflict());
        assert_eq!(store.client_count().await, 1);
    }

    #[tokio::test]
    async fn test_resave_keeps_own_unique_values() {
        let store = InMemoryStore::new();
        let saved = ClientStore::save(&store, None, &client_data("a@x.com", "111.111.111-11"))
            .await
            .unwrap();

        let mut data = saved.data();
        data.name = "Ana Maria Souza".to_string();
        let updated = ClientStore::save(&store, Some(saved.id), &data).await.unwrap();

        assert_eq!(updated.name, "Ana Maria Souza");
        assert!(store.exists_by_email("a@x.com").await.unwrap());
    }

    #[tokio::test]
    async fn test_changed_email_releases_old_one() {
        let store = InMemoryStore::new();
        let saved = ClientStore::save(&store, None, &client_data("a@x.com", "111.111.111-11"))
            .await
            .unwrap();

        let mut data = saved.data();
        data.email = "new@x.com".to_string();
        ClientStore::save(&store, Some(saved.id), &data).await.unwrap();

        assert!(!store.exists_by_email("a@x.com").await.unwrap());
        assert!(store.find_by_email("new@x.com").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_address_requires_existing_client() {
        let store = InMemoryStore::new();
        let err = AddressStore::save(&store, None, ClientId::new(9), &address_data("Rua A"))
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_address_update_checks_owner() {
        let store = InMemoryStore::new();
        let a = ClientStore::save(&store, None, &client_data("a@x.com", "111.111.111-11"))
            .await
            .unwrap();
        let b = ClientStore::save(&store, None, &client_data("b@x.com", "222.222.222-22"))
            .await
            .unwrap();
        let address = AddressStore::save(&store, None, a.id, &address_data("Rua A"))
            .await
            .unwrap();

        let err = AddressStore::save(&store, Some(address.id), b.id, &address_data("Rua B"))
            .await
            .unwrap_err();
        assert!(err.is_not_found());

        let stored = AddressStore::find_by_id(&store, address.id).await.unwrap().unwrap();
        assert_eq!(stored.street, "Rua A");
        assert_eq!(stored.client_id, a.id);
    }

    #[tokio::test]
    async fn test_client_carries_addresses_and_delete_cascades() {
        let store = InMemoryStore::new();
        let client = ClientStore::save(&store, None, &client_data("a@x.com", "111.111.111-11"))
            .await
            .unwrap();
        AddressStore::save(&store, None, client.id, &address_data("Rua A"))
            .await
            .unwrap();
        AddressStore::save(&store, None, client.id, &address_data("Rua B"))
            .await
            .unwrap();

        let loaded = ClientStore::find_by_id(&store, client.id).await.unwrap().unwrap();
        assert_eq!(loaded.addresses.len(), 2);
        assert_eq!(loaded.addresses[0].street, "Rua A");

        ClientStore::delete_by_id(&store, client.id).await.unwrap();
        assert_eq!(store.address_count().await, 0);
        assert!(!store.exists_by_email("a@x.com").await.unwrap());
    }

    #[tokio::test]
    async fn test_delete_missing_is_not_found() {
        let store = InMemoryStore::new();
        assert!(ClientStore::delete_by_id(&store, ClientId::new(1))
            .await
            .unwrap_err()
            .is_not_found());
        assert!(AddressStore::delete_by_id(&store, AddressId::new(1))
            .await
            .unwrap_err()
            .is_not_found());
    }
}
