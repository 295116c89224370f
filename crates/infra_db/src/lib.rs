//! Infrastructure Database Layer
//!
//! This crate provides the PostgreSQL storage for the client management
//! service using SQLx.
//!
//! # Architecture
//!
//! The crate follows the repository pattern: repositories own the SQL and
//! return row types, adapters implement the domain ports on top of them.
//!
//! # Schema
//!
//! - `clients`: unique `email` and `national_id`
//! - `addresses`: `client_id` references `clients` with `ON DELETE CASCADE`
//!
//! The schema lives in the workspace `migrations/` directory and is applied
//! by [`run_migrations`].
//!
//! # Example
//!
//! ```rust,ignore
//! use infra_db::{create_pool, run_migrations, DatabaseConfig};
//! use infra_db::adapters::PostgresClientAdapter;
//!
//! let pool = create_pool(DatabaseConfig::new("postgres://localhost/clients")).await?;
//! run_migrations(&pool).await?;
//! let clients = PostgresClientAdapter::new(pool);
//! ```

pub mod pool;
pub mod error;
pub mod repositories;
pub mod adapters;

pub use pool::{create_pool, run_migrations, DatabaseConfig, DatabasePool};
pub use error::DatabaseError;
pub use adapters::{PostgresAddressAdapter, PostgresClientAdapter};
