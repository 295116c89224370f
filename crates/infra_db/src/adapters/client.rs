//! PostgreSQL Client Adapter
//!
//! Implements [`ClientStore`] over the `clients` and `addresses` tables.
//! Clients are always returned with their addresses attached.

use std::collections::BTreeMap;

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::{debug, instrument};

use core_kernel::{
    AddressId, ClientId, DomainPort, HealthCheckResult, HealthCheckable, PortError,
};
use domain_client::{Address, AddressData, Client, ClientData, ClientStore};

use crate::error::DatabaseError;
use crate::repositories::{AddressRepository, AddressRow, ClientRepository, ClientRow};

const EMAIL_CONSTRAINT: &str = "clients_email_key";
const NATIONAL_ID_CONSTRAINT: &str = "clients_national_id_key";

/// PostgreSQL-backed implementation of [`ClientStore`]
///
/// # Error Handling
///
/// - unique violations on email or national id -> `PortError::Conflict`
///   carrying the same message the services use
/// - a missing row on update or delete -> `PortError::NotFound`
/// - anything else -> `PortError::Internal` or `PortError::Connection`
#[derive(Debug, Clone)]
pub struct PostgresClientAdapter {
    clients: ClientRepository,
    addresses: AddressRepository,
    pool: PgPool,
}

impl PostgresClientAdapter {
    /// Creates a new PostgreSQL client adapter
    pub fn new(pool: PgPool) -> Self {
        Self {
            clients: ClientRepository::new(pool.clone()),
            addresses: AddressRepository::new(pool.clone()),
            pool,
        }
    }

    /// Returns a reference to the underlying repository
    pub fn repository(&self) -> &ClientRepository {
        &self.clients
    }

    async fn attach_addresses(&self, row: Option<ClientRow>) -> Result<Option<Client>, PortError> {
        let Some(row) = row else {
            return Ok(None);
        };
        let addresses = self
            .addresses
            .list_by_client(row.id)
            .await
            .map_err(PortError::from)?;
        let mut client = row_to_client(&row);
        client.addresses = addresses.into_iter().map(row_to_address).collect();
        Ok(Some(client))
    }
}

impl DomainPort for PostgresClientAdapter {}

#[async_trait]
impl HealthCheckable for PostgresClientAdapter {
    async fn health_check(&self) -> HealthCheckResult {
        super::ping(&self.pool, "postgres-client-adapter").await
    }
}

#[async_trait]
impl ClientStore for PostgresClientAdapter {
    #[instrument(skip(self), fields(client_id = %id))]
    async fn find_by_id(&self, id: ClientId) -> Result<Option<Client>, PortError> {
        debug!("Fetching client by id");
        let row = self.clients.get_by_id(id.value()).await?;
        self.attach_addresses(row).await
    }

    #[instrument(skip(self))]
    async fn find_by_email(&self, email: &str) -> Result<Option<Client>, PortError> {
        let row = self.clients.find_by_email(email).await?;
        self.attach_addresses(row).await
    }

    #[instrument(skip(self))]
    async fn find_by_national_id(&self, national_id: &str) -> Result<Option<Client>, PortError> {
        let row = self.clients.find_by_national_id(national_id).await?;
        self.attach_addresses(row).await
    }

    async fn exists_by_id(&self, id: ClientId) -> Result<bool, PortError> {
        Ok(self.clients.exists_by_id(id.value()).await?)
    }

    async fn exists_by_email(&self, email: &str) -> Result<bool, PortError> {
        Ok(self.clients.exists_by_email(email).await?)
    }

    async fn exists_by_national_id(&self, national_id: &str) -> Result<bool, PortError> {
        Ok(self.clients.exists_by_national_id(national_id).await?)
    }

    #[instrument(skip(self))]
    async fn list_all(&self) -> Result<Vec<Client>, PortError> {
        let rows = self.clients.list_all().await?;
        let ids: Vec<i64> = rows.iter().map(|r| r.id).collect();

        let mut owned: BTreeMap<i64, Vec<Address>> = BTreeMap::new();
        for address in self.addresses.list_by_clients(&ids).await? {
            owned
                .entry(address.client_id)
                .or_default()
                .push(row_to_address(address));
        }

        debug!(count = rows.len(), "Listed clients");
        Ok(rows
            .iter()
            .map(|row| {
                let mut client = row_to_client(row);
                client.addresses = owned.remove(&row.id).unwrap_or_default();
                client
            })
            .collect())
    }

    #[instrument(skip(self, data), fields(client_id = ?id))]
    async fn save(&self, id: Option<ClientId>, data: &ClientData) -> Result<Client, PortError> {
        let row = match id {
            None => self.clients.insert(data).await,
            Some(id) => match self.clients.update(id.value(), data).await {
                Ok(Some(row)) => Ok(row),
                Ok(None) => Err(DatabaseError::not_found("Client", id)),
                Err(e) => Err(e),
            },
        }
        .map_err(|e| unique_violation_to_port_error(e, data))?;

        self.attach_addresses(Some(row))
            .await?
            .ok_or_else(|| PortError::internal("client vanished during save"))
    }

    #[instrument(skip(self), fields(client_id = %id))]
    async fn delete_by_id(&self, id: ClientId) -> Result<(), PortError> {
        match self.clients.delete(id.value()).await? {
            0 => Err(PortError::not_found("Client", id)),
            _ => Ok(()),
        }
    }
}

/// Renders unique violations with the messages the services report
fn unique_violation_to_port_error(error: DatabaseError, data: &ClientData) -> PortError {
    if error.is_unique_violation_of(EMAIL_CONSTRAINT) {
        PortError::conflict(format!("email already registered: {}", data.email))
    } else if error.is_unique_violation_of(NATIONAL_ID_CONSTRAINT) {
        PortError::conflict(format!(
            "national id already registered: {}",
            data.national_id
        ))
    } else {
        error.into()
    }
}

pub(crate) fn row_to_client(row: &ClientRow) -> Client {
    Client::from_data(ClientId::new(row.id), row.data())
}

pub(crate) fn row_to_address(row: AddressRow) -> Address {
    Address::from_data(
        AddressId::new(row.id),
        ClientId::new(row.client_id),
        AddressData {
            street: row.street,
            number: row.number,
            neighborhood: row.neighborhood,
            city: row.city,
            state: row.state,
            postal_code: row.postal_code,
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn data() -> ClientData {
        ClientData {
            name: "Ana".to_string(),
            email: "ana@x.com".to_string(),
            national_id: "123.456.789-00".to_string(),
            birth_date: NaiveDate::from_ymd_opt(1990, 1, 1).unwrap(),
            phone: None,
        }
    }

    #[test]
    fn test_email_violation_message() {
        let error = DatabaseError::DuplicateEntry {
            constraint: Some(EMAIL_CONSTRAINT.to_string()),
            message: "duplicate key value violates unique constraint".to_string(),
        };
        let port = unique_violation_to_port_error(error, &data());
        assert_eq!(port.to_string(), "Conflict: email already registered: ana@x.com");
    }

    #[test]
    fn test_national_id_violation_message() {
        let error = DatabaseError::DuplicateEntry {
            constraint: Some(NATIONAL_ID_CONSTRAINT.to_string()),
            message: "duplicate".to_string(),
        };
        let port = unique_violation_to_port_error(error, &data());
        assert!(port.to_string().ends_with("national id already registered: 123.456.789-00"));
    }

    #[test]
    fn test_missing_row_stays_not_found() {
        let port = unique_violation_to_port_error(DatabaseError::not_found("Client", 4), &data());
        assert!(port.is_not_found());
    }

    #[test]
    fn test_row_to_address() {
        let address = row_to_address(AddressRow {
            id: 3,
            client_id: 1,
            street: "Rua A".to_string(),
            number: "1".to_string(),
            neighborhood: "Centro".to_string(),
            city: "Recife".to_string(),
            state: "PE".to_string(),
            postal_code: "50000-000".to_string(),
        });
        assert_eq!(address.id, AddressId::new(3));
        assert_eq!(address.client_id, ClientId::new(1));
    }
}
