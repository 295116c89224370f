//! Store Adapters for the Client Domain
//!
//! # Available Adapters
//!
//! - **InMemoryStore**: a single process-local store implementing both
//!   [`ClientStore`](crate::ClientStore) and [`AddressStore`](crate::AddressStore).
//!   Used by the test suites and by the server when no database is configured.
//!
//! The PostgreSQL adapters live in `infra_db` so that this crate stays free
//! of any database driver.
//!
//! # Usage
//!
//! ```rust
//! use std::sync::Arc;
//! use domain_client::{AddressService, ClientService, InMemoryStore};
//!
//! let store = Arc::new(InMemoryStore::new());
//! let clients = ClientService::new(store.clone(), store.clone());
//! let addresses = AddressService::new(store, clients.clone());
//! # let _ = addresses;
//! ```

pub mod in_memory;

pub use in_memory::InMemoryStore;
