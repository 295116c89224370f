//! Client domain services
//!
//! This module contains the services that enforce the cross-record rules the
//! stores cannot express on their own: uniqueness pre-checks with stable
//! error messages, the cascade from a client to its addresses, and the
//! ownership gate in front of address updates and deletes.

use std::sync::Arc;

use tracing::{debug, info, warn};

use core_kernel::{AddressId, ClientId, PortError};

use crate::address::{Address, AddressData};
use crate::client::{Client, ClientData};
use crate::error::ClientError;
use crate::ports::{AddressStore, ClientStore};

/// Orchestrates client records
///
/// Cloning is cheap; the stores are shared.
#[derive(Clone)]
pub struct ClientService {
    clients: Arc<dyn ClientStore>,
    addresses: Arc<dyn AddressStore>,
}

impl ClientService {
    /// Creates a client service over the given stores
    ///
    /// The address store is needed for the delete cascade.
    pub fn new(clients: Arc<dyn ClientStore>, addresses: Arc<dyn AddressStore>) -> Self {
        Self { clients, addresses }
    }

    /// Lists all clients with their addresses
    pub async fn list_all(&self) -> Result<Vec<Client>, ClientError> {
        info!("Listing all clients");
        Ok(self.clients.list_all().await?)
    }

    /// Retrieves a client by id
    ///
    /// # Errors
    ///
    /// `ClientError::ClientNotFound` if no client has this id
    pub async fn get_by_id(&self, id: ClientId) -> Result<Client, ClientError> {
        debug!(client_id = %id, "Fetching client");
        self.clients.find_by_id(id).await?.ok_or_else(|| {
            warn!(client_id = %id, "Client not found");
            ClientError::ClientNotFound(id)
        })
    }

    /// Registers a new client
    ///
    /// Email is checked before national id, so a request colliding on both
    /// reports the email.
    ///
    /// # Errors
    ///
    /// - `ClientError::DuplicateEmail` if the email is taken
    /// - `ClientError::DuplicateNationalId` if the national id is taken
    /// - `ClientError::Conflict` if the store rejects the insert on a
    ///   uniqueness constraint (concurrent registration)
    pub async fn add(&self, data: ClientData) -> Result<Client, ClientError> {
        debug!(email = %data.email, "Adding client");

        if self.clients.exists_by_email(&data.email).await? {
            warn!(email = %data.email, "Duplicate email");
            return Err(ClientError::DuplicateEmail(data.email));
        }
        if self.clients.exists_by_national_id(&data.national_id).await? {
            warn!(national_id = %data.national_id, "Duplicate national id");
            return Err(ClientError::DuplicateNationalId(data.national_id));
        }

        let saved = self.clients.save(None, &data).await?;
        info!(client_id = %saved.id, "Client added");
        Ok(saved)
    }

    /// Replaces the mutable fields of a client
    ///
    /// Uniqueness is re-checked only for fields whose value changed, so a
    /// client resubmitting its own email or national id never conflicts.
    ///
    /// # Errors
    ///
    /// - `ClientError::ClientNotFound` if no client has this id
    /// - `ClientError::DuplicateEmail` / `DuplicateNationalId` if a changed
    ///   value belongs to another client
    pub async fn update(&self, id: ClientId, data: ClientData) -> Result<Client, ClientError> {
        let mut stored = self.get_by_id(id).await?;

        if stored.email != data.email && self.clients.exists_by_email(&data.email).await? {
            warn!(client_id = %id, email = %data.email, "Duplicate email on update");
            return Err(ClientError::DuplicateEmail(data.email));
        }
        if stored.national_id != data.national_id
            && self.clients.exists_by_national_id(&data.national_id).await?
        {
            warn!(client_id = %id, national_id = %data.national_id, "Duplicate national id on update");
            return Err(ClientError::DuplicateNationalId(data.national_id));
        }

        let saved = self.clients.save(Some(id), &data).await.map_err(|e| match e {
            PortError::NotFound { .. } => ClientError::ClientNotFound(id),
            other => other.into(),
        })?;

        stored.apply(saved.data());
        info!(client_id = %id, "Client updated");
        Ok(stored)
    }

    /// Deletes a client and every address it owns
    ///
    /// # Errors
    ///
    /// `ClientError::ClientNotFound` if no client has this id
    pub async fn delete(&self, id: ClientId) -> Result<(), ClientError> {
        if !self.clients.exists_by_id(id).await? {
            warn!(client_id = %id, "Client not found for deletion");
            return Err(ClientError::ClientNotFound(id));
        }

        // Addresses go first so a failure at any step never leaves an
        // orphan. A failed client delete leaves the client without addresses
        // and is reported to the caller; the stores expose no wider unit of work.
        let owned = self.addresses.list_by_client(id).await?;
        for address in &owned {
            match self.addresses.delete_by_id(address.id).await {
                Ok(()) | Err(PortError::NotFound { .. }) => {}
                Err(e) => return Err(e.into()),
            }
        }

        self.clients.delete_by_id(id).await.map_err(|e| match e {
            PortError::NotFound { .. } => ClientError::ClientNotFound(id),
            other => other.into(),
        })?;

        info!(client_id = %id, addresses_removed = owned.len(), "Client deleted");
        Ok(())
    }
}

/// Orchestrates address records under their owning client
#[derive(Clone)]
pub struct AddressService {
    addresses: Arc<dyn AddressStore>,
    clients: ClientService,
}

impl AddressService {
    /// Creates an address service
    pub fn new(addresses: Arc<dyn AddressStore>, clients: ClientService) -> Self {
        Self { addresses, clients }
    }

    /// Retrieves an address by id
    ///
    /// # Errors
    ///
    /// `ClientError::AddressNotFound` if no address has this id
    pub async fn get_by_id(&self, address_id: AddressId) -> Result<Address, ClientError> {
        debug!(address_id = %address_id, "Fetching address");
        self.addresses
            .find_by_id(address_id)
            .await?
            .ok_or(ClientError::AddressNotFound(address_id))
    }

    /// Retrieves an address through its owner
    ///
    /// # Errors
    ///
    /// `ClientError::AddressNotOwned` unless the address belongs to the client
    pub async fn get_for_client(
        &self,
        client_id: ClientId,
        address_id: AddressId,
    ) -> Result<Address, ClientError> {
        self.ensure_owned(client_id, address_id).await?;
        self.get_by_id(address_id).await
    }

    /// Lists the addresses of a client as loaded with the client
    ///
    /// # Errors
    ///
    /// `ClientError::ClientNotFound` if no client has this id
    pub async fn list_by_client(&self, client_id: ClientId) -> Result<Vec<Address>, ClientError> {
        let client = self.clients.get_by_id(client_id).await?;
        Ok(client.addresses)
    }

    /// Adds an address owned by the given client
    ///
    /// # Errors
    ///
    /// `ClientError::ClientNotFound` if no client has this id
    pub async fn add(&self, client_id: ClientId, data: AddressData) -> Result<Address, ClientError> {
        let client = self.clients.get_by_id(client_id).await?;

        let saved = self
            .addresses
            .save(None, client.id, &data)
            .await
            .map_err(|e| match e {
                PortError::NotFound { .. } => ClientError::ClientNotFound(client_id),
                other => other.into(),
            })?;

        info!(client_id = %client_id, address_id = %saved.id, "Address added");
        Ok(saved)
    }

    /// Replaces the mutable fields of an address owned by the given client
    ///
    /// # Errors
    ///
    /// `ClientError::AddressNotOwned` unless the address belongs to the client
    pub async fn update(
        &self,
        client_id: ClientId,
        address_id: AddressId,
        data: AddressData,
    ) -> Result<Address, ClientError> {
        self.ensure_owned(client_id, address_id).await?;

        let saved = self
            .addresses
            .save(Some(address_id), client_id, &data)
            .await
            .map_err(|e| match e {
                PortError::NotFound { .. } => ClientError::AddressNotOwned { address_id, client_id },
                other => other.into(),
            })?;

        info!(client_id = %client_id, address_id = %address_id, "Address updated");
        Ok(saved)
    }

    /// Deletes an address owned by the given client
    ///
    /// # Errors
    ///
    /// `ClientError::AddressNotOwned` unless the address belongs to the client
    pub async fn delete(&self, client_id: ClientId, address_id: AddressId) -> Result<(), ClientError> {
        self.ensure_owned(client_id, address_id).await?;

        self.addresses.delete_by_id(address_id).await.map_err(|e| match e {
            PortError::NotFound { .. } => ClientError::AddressNotOwned { address_id, client_id },
            other => other.into(),
        })?;

        info!(client_id = %client_id, address_id = %address_id, "Address deleted");
        Ok(())
    }

    /// Ownership gate: asks the store, never the cached client
    async fn ensure_owned(&self, client_id: ClientId, address_id: AddressId) -> Result<(), ClientError> {
        if self
            .addresses
            .exists_by_id_and_client_id(address_id, client_id)
            .await?
        {
            Ok(())
        } else {
            warn!(client_id = %client_id, address_id = %address_id, "Address does not belong to client");
            Err(ClientError::AddressNotOwned { address_id, client_id })
        }
    }
}
