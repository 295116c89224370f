//! PostgreSQL Address Adapter

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::{debug, instrument};

use core_kernel::{AddressId, ClientId, DomainPort, HealthCheckResult, HealthCheckable, PortError};
use domain_client::{Address, AddressData, AddressStore};

use crate::error::DatabaseError;
use crate::repositories::AddressRepository;

use super::client::row_to_address;

/// PostgreSQL-backed implementation of [`AddressStore`]
///
/// A foreign key violation on insert means the owning client is gone and is
/// reported as `PortError::NotFound`.
#[derive(Debug, Clone)]
pub struct PostgresAddressAdapter {
    repository: AddressRepository,
    pool: PgPool,
}

impl PostgresAddressAdapter {
    /// Creates a new PostgreSQL address adapter
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: AddressRepository::new(pool.clone()),
            pool,
        }
    }

    /// Returns a reference to the underlying repository
    pub fn repository(&self) -> &AddressRepository {
        &self.repository
    }
}

impl DomainPort for PostgresAddressAdapter {}

#[async_trait]
impl HealthCheckable for PostgresAddressAdapter {
    async fn health_check(&self) -> HealthCheckResult {
        super::ping(&self.pool, "postgres-address-adapter").await
    }
}

#[async_trait]
impl AddressStore for PostgresAddressAdapter {
    #[instrument(skip(self), fields(address_id = %id))]
    async fn find_by_id(&self, id: AddressId) -> Result<Option<Address>, PortError> {
        debug!("Fetching address by id");
        let row = self.repository.get_by_id(id.value()).await?;
        Ok(row.map(row_to_address))
    }

    #[instrument(skip(self), fields(client_id = %client_id))]
    async fn list_by_client(&self, client_id: ClientId) -> Result<Vec<Address>, PortError> {
        let rows = self.repository.list_by_client(client_id.value()).await?;
        Ok(rows.into_iter().map(row_to_address).collect())
    }

    async fn exists_by_id_and_client_id(
        &self,
        id: AddressId,
        client_id: ClientId,
    ) -> Result<bool, PortError> {
        Ok(self
            .repository
            .exists_by_id_and_client_id(id.value(), client_id.value())
            .await?)
    }

    #[instrument(skip(self, data), fields(address_id = ?id, client_id = %client_id))]
    async fn save(
        &self,
        id: Option<AddressId>,
        client_id: ClientId,
        data: &AddressData,
    ) -> Result<Address, PortError> {
        let row = match id {
            None => self
                .repository
                .insert(client_id.value(), data)
                .await
                .map_err(|e| match e {
                    DatabaseError::ForeignKeyViolation(_) => PortError::not_found("Client", client_id),
                    other => other.into(),
                })?,
            Some(id) => self
                .repository
                .update(id.value(), client_id.value(), data)
                .await?
                .ok_or_else(|| PortError::not_found("Address", id))?,
        };

        Ok(row_to_address(row))
    }

    #[instrument(skip(self), fields(address_id = %id))]
    async fn delete_by_id(&self, id: AddressId) -> Result<(), PortError> {
        match self.repository.delete(id.value()).await? {
            0 => Err(PortError::not_found("Address", id)),
            _ => Ok(()),
        }
    }
}
