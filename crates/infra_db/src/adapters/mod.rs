//! Domain Adapters
//!
//! This module provides the PostgreSQL implementations of the client domain
//! ports. Each adapter:
//! - Implements the domain's store trait
//! - Translates between domain models and database row types
//! - Uses the repository layer for database operations
//!
//! # Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use infra_db::adapters::{PostgresAddressAdapter, PostgresClientAdapter};
//! use domain_client::ClientService;
//!
//! let clients = Arc::new(PostgresClientAdapter::new(pool.clone()));
//! let addresses = Arc::new(PostgresAddressAdapter::new(pool));
//! let service = ClientService::new(clients, addresses);
//! ```

pub mod client;
pub mod address;

pub use client::PostgresClientAdapter;
pub use address::PostgresAddressAdapter;

use std::time::Instant;

use chrono::Utc;
use sqlx::PgPool;

use core_kernel::{AdapterHealth, HealthCheckResult};

/// Runs `SELECT 1` against the pool and reports the outcome
pub(crate) async fn ping(pool: &PgPool, adapter_id: &str) -> HealthCheckResult {
    let start = Instant::now();

    let result = sqlx::query_scalar::<_, i32>("SELECT 1").fetch_one(pool).await;

    let latency_ms = start.elapsed().as_millis() as u64;

    let (status, message) = match result {
        Ok(_) => (AdapterHealth::Healthy, None),
        Err(e) => (AdapterHealth::Unhealthy, Some(format!("Database error: {}", e))),
    };

    HealthCheckResult {
        adapter_id: adapter_id.to_string(),
        status,
        latency_ms,
        message,
        checked_at: Utc::now(),
    }
}
