//! Client Domain Ports
//!
//! This module defines the storage interfaces the client domain needs. The
//! services depend only on these traits; adapters supply the backend.
//!
//! # Architecture
//!
//! - **PostgreSQL adapters**: `infra_db::adapters`
//! - **In-memory adapter**: [`crate::adapters::InMemoryStore`], used for tests
//!   and for running the API without a database
//!
//! # Usage
//!
//! ```rust,ignore
//! use domain_client::{ClientService, ClientStore, AddressStore};
//! use std::sync::Arc;
//!
//! let clients: Arc<dyn ClientStore> = Arc::new(PostgresClientAdapter::new(pool.clone()));
//! let addresses: Arc<dyn AddressStore> = Arc::new(PostgresAddressAdapter::new(pool));
//! let service = ClientService::new(clients, addresses);
//! ```
//!
//! # Contract
//!
//! Both stores must enforce the same invariants as the relational schema:
//! email and national id unique across clients, and every address pointing
//! at an existing client. Violations surface as [`PortError::Conflict`] and
//! [`PortError::NotFound`] respectively.

use async_trait::async_trait;

use core_kernel::{AddressId, ClientId, DomainPort, HealthCheckable, PortError};

use crate::address::{Address, AddressData};
use crate::client::{Client, ClientData};

/// Storage interface for client records
///
/// Clients returned by this trait carry their owned addresses.
#[async_trait]
pub trait ClientStore: DomainPort + HealthCheckable {
    /// Retrieves a client with its addresses
    async fn find_by_id(&self, id: ClientId) -> Result<Option<Client>, PortError>;

    /// Retrieves the client registered with the given email
    async fn find_by_email(&self, email: &str) -> Result<Option<Client>, PortError>;

    /// Retrieves the client registered with the given national id
    async fn find_by_national_id(&self, national_id: &str) -> Result<Option<Client>, PortError>;

    /// Checks if a client exists
    async fn exists_by_id(&self, id: ClientId) -> Result<bool, PortError>;

    /// Checks if any client uses the given email
    async fn exists_by_email(&self, email: &str) -> Result<bool, PortError>;

    /// Checks if any client uses the given national id
    async fn exists_by_national_id(&self, national_id: &str) -> Result<bool, PortError>;

    /// Lists every client, ordered by id
    async fn list_all(&self) -> Result<Vec<Client>, PortError>;

    /// Persists a client
    ///
    /// With `id` absent a new record is inserted and its id assigned. With
    /// `id` present the record's mutable fields are overwritten; a missing
    /// record yields `PortError::NotFound`. A duplicate email or national id
    /// yields `PortError::Conflict`.
    async fn save(&self, id: Option<ClientId>, data: &ClientData) -> Result<Client, PortError>;

    /// Removes a client record
    ///
    /// Returns `PortError::NotFound` if nothing was removed.
    async fn delete_by_id(&self, id: ClientId) -> Result<(), PortError>;
}

/// Storage interface for address records
#[async_trait]
pub trait AddressStore: DomainPort + HealthCheckable {
    /// Retrieves an address
    async fn find_by_id(&self, id: AddressId) -> Result<Option<Address>, PortError>;

    /// Lists the addresses owned by a client, ordered by id
    async fn list_by_client(&self, client_id: ClientId) -> Result<Vec<Address>, PortError>;

    /// Membership predicate: does the address exist and belong to the client
    async fn exists_by_id_and_client_id(
        &self,
        id: AddressId,
        client_id: ClientId,
    ) -> Result<bool, PortError>;

    /// Persists an address
    ///
    /// With `id` absent a new address owned by `client_id` is inserted;
    /// `PortError::NotFound` if the client does not exist. With `id` present
    /// the mutable fields of the address are overwritten only if it is owned
    /// by `client_id`, otherwise `PortError::NotFound`. The owner is never
    /// changed.
    async fn save(
        &self,
        id: Option<AddressId>,
        client_id: ClientId,
        data: &AddressData,
    ) -> Result<Address, PortError>;

    /// Removes an address record
    ///
    /// Returns `PortError::NotFound` if nothing was removed.
    async fn delete_by_id(&self, id: AddressId) -> Result<(), PortError>;
}
