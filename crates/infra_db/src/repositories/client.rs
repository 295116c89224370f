//! Client repository implementation

use chrono::NaiveDate;
use sqlx::PgPool;

use domain_client::ClientData;

use crate::error::DatabaseError;

const CLIENT_COLUMNS: &str = "id, name, email, national_id, birth_date, phone";

/// Repository for the `clients` table
#[derive(Debug, Clone)]
pub struct ClientRepository {
    pool: PgPool,
}

impl ClientRepository {
    /// Creates a new ClientRepository with the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Retrieves a client row by id
    pub async fn get_by_id(&self, id: i64) -> Result<Option<ClientRow>, DatabaseError> {
        let row = sqlx::query_as::<_, ClientRow>(&format!(
            "SELECT {CLIENT_COLUMNS} FROM clients WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    /// Retrieves the client row with the given email
    pub async fn find_by_email(&self, email: &str) -> Result<Option<ClientRow>, DatabaseError> {
        let row = sqlx::query_as::<_, ClientRow>(&format!(
            "SELECT {CLIENT_COLUMNS} FROM clients WHERE email = $1"
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    /// Retrieves the client row with the given national id
    pub async fn find_by_national_id(
        &self,
        national_id: &str,
    ) -> Result<Option<ClientRow>, DatabaseError> {
        let row = sqlx::query_as::<_, ClientRow>(&format!(
            "SELECT {CLIENT_COLUMNS} FROM clients WHERE national_id = $1"
        ))
        .bind(national_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    pub async fn exists_by_id(&self, id: i64) -> Result<bool, DatabaseError> {
        let exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS (SELECT 1 FROM clients WHERE id = $1)")
                .bind(id)
                .fetch_one(&self.pool)
                .await?;
        Ok(exists)
    }

    pub async fn exists_by_email(&self, email: &str) -> Result<bool, DatabaseError> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM clients WHERE email = $1)",
        )
        .bind(email)
        .fetch_one(&self.pool)
        .await?;
        Ok(exists)
    }

    pub async fn exists_by_national_id(&self, national_id: &str) -> Result<bool, DatabaseError> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM clients WHERE national_id = $1)",
        )
        .bind(national_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(exists)
    }

    /// Lists every client row ordered by id
    pub async fn list_all(&self) -> Result<Vec<ClientRow>, DatabaseError> {
        let rows = sqlx::query_as::<_, ClientRow>(&format!(
            "SELECT {CLIENT_COLUMNS} FROM clients ORDER BY id"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Inserts a client and returns the stored row with its assigned id
    ///
    /// # Errors
    ///
    /// `DatabaseError::DuplicateEntry` naming `clients_email_key` or
    /// `clients_national_id_key` when a unique value is already taken
    pub async fn insert(&self, data: &ClientData) -> Result<ClientRow, DatabaseError> {
        let row = sqlx::query_as::<_, ClientRow>(&format!(
            r#"
            INSERT INTO clients (name, email, national_id, birth_date, phone)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {CLIENT_COLUMNS}
            "#
        ))
        .bind(&data.name)
        .bind(&data.email)
        .bind(&data.national_id)
        .bind(data.birth_date)
        .bind(&data.phone)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    /// Overwrites the mutable fields of a client
    ///
    /// Returns `None` when no row has this id.
    pub async fn update(
        &self,
        id: i64,
        data: &ClientData,
    ) -> Result<Option<ClientRow>, DatabaseError> {
        let row = sqlx::query_as::<_, ClientRow>(&format!(
            r#"
            UPDATE clients
            SET name = $2, email = $3, national_id = $4, birth_date = $5, phone = $6,
                updated_at = NOW()
            WHERE id = $1
            RETURNING {CLIENT_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(&data.name)
        .bind(&data.email)
        .bind(&data.national_id)
        .bind(data.birth_date)
        .bind(&data.phone)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    /// Deletes a client; owned addresses go with it (ON DELETE CASCADE)
    ///
    /// Returns the number of rows removed.
    pub async fn delete(&self, id: i64) -> Result<u64, DatabaseError> {
        let result = sqlx::query("DELETE FROM clients WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }
}

/// Database row for a client
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ClientRow {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub national_id: String,
    pub birth_date: NaiveDate,
    pub phone: Option<String>,
}

impl ClientRow {
    /// The mutable fields of the row in domain form
    pub fn data(&self) -> ClientData {
        ClientData {
            name: self.name.clone(),
            email: self.email.clone(),
            national_id: self.national_id.clone(),
            birth_date: self.birth_date,
            phone: self.phone.clone(),
        }
    }
}
