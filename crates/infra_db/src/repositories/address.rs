//! Address repository implementation
//!
//! Every write that targets an existing address filters on both the address
//! id and the owning client id, so a mismatched owner behaves exactly like a
//! missing row.

use sqlx::PgPool;

use domain_client::AddressData;

use crate::error::DatabaseError;

const ADDRESS_COLUMNS: &str =
    "id, client_id, street, number, neighborhood, city, state, postal_code";

/// Repository for the `addresses` table
#[derive(Debug, Clone)]
pub struct AddressRepository {
    pool: PgPool,
}

impl AddressRepository {
    /// Creates a new AddressRepository with the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Retrieves an address row by id
    pub async fn get_by_id(&self, id: i64) -> Result<Option<AddressRow>, DatabaseError> {
        let row = sqlx::query_as::<_, AddressRow>(&format!(
            "SELECT {ADDRESS_COLUMNS} FROM addresses WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    /// Lists the addresses owned by one client, ordered by id
    pub async fn list_by_client(&self, client_id: i64) -> Result<Vec<AddressRow>, DatabaseError> {
        let rows = sqlx::query_as::<_, AddressRow>(&format!(
            "SELECT {ADDRESS_COLUMNS} FROM addresses WHERE client_id = $1 ORDER BY id"
        ))
        .bind(client_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Lists the addresses owned by any of the given clients, ordered by id
    pub async fn list_by_clients(
        &self,
        client_ids: &[i64],
    ) -> Result<Vec<AddressRow>, DatabaseError> {
        let rows = sqlx::query_as::<_, AddressRow>(&format!(
            "SELECT {ADDRESS_COLUMNS} FROM addresses WHERE client_id = ANY($1) ORDER BY id"
        ))
        .bind(client_ids)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    pub async fn exists_by_id_and_client_id(
        &self,
        id: i64,
        client_id: i64,
    ) -> Result<bool, DatabaseError> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM addresses WHERE id = $1 AND client_id = $2)",
        )
        .bind(id)
        .bind(client_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(exists)
    }

    /// Inserts an address for a client
    ///
    /// # Errors
    ///
    /// `DatabaseError::ForeignKeyViolation` if the client does not exist
    pub async fn insert(
        &self,
        client_id: i64,
        data: &AddressData,
    ) -> Result<AddressRow, DatabaseError> {
        let row = sqlx::query_as::<_, AddressRow>(&format!(
            r#"
            INSERT INTO addresses (client_id, street, number, neighborhood, city, state, postal_code)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {ADDRESS_COLUMNS}
            "#
        ))
        .bind(client_id)
        .bind(&data.street)
        .bind(&data.number)
        .bind(&data.neighborhood)
        .bind(&data.city)
        .bind(&data.state)
        .bind(&data.postal_code)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    /// Overwrites the mutable fields of an address owned by `client_id`
    ///
    /// Returns `None` when no address with this id belongs to the client.
    pub async fn update(
        &self,
        id: i64,
        client_id: i64,
        data: &AddressData,
    ) -> Result<Option<AddressRow>, DatabaseError> {
        let row = sqlx::query_as::<_, AddressRow>(&format!(
            r#"
            UPDATE addresses
            SET street = $3, number = $4, neighborhood = $5, city = $6, state = $7,
                postal_code = $8, updated_at = NOW()
            WHERE id = $1 AND client_id = $2
            RETURNING {ADDRESS_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(client_id)
        .bind(&data.street)
        .bind(&data.number)
        .bind(&data.neighborhood)
        .bind(&data.city)
        .bind(&data.state)
        .bind(&data.postal_code)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    /// Deletes an address; returns the number of rows removed
    pub async fn delete(&self, id: i64) -> Result<u64, DatabaseError> {
        let result = sqlx::query("DELETE FROM addresses WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }
}

/// Database row for an address
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct AddressRow {
    pub id: i64,
    pub client_id: i64,
    pub street: String,
    pub number: String,
    pub neighborhood: String,
    pub city: String,
    pub state: String,
    pub postal_code: String,
}
