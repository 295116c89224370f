//! Client Management Domain
//!
//! This crate manages client records and the postal addresses they own.
//!
//! # Ownership Model
//!
//! A [`Client`] exclusively owns its [`Address`]es:
//!
//! - An address is created only through an existing client and keeps that
//!   owner for its whole life.
//! - An address may be updated or deleted only by naming its owner.
//! - Deleting a client deletes every address it owns.
//!
//! # Uniqueness
//!
//! Email and national id are unique across all clients. The services check
//! both before persisting; the store enforces the same constraint as a
//! backstop for concurrent requests.
//!
//! # Examples
//!
//! ```rust
//! use std::sync::Arc;
//! use chrono::NaiveDate;
//! use domain_client::{ClientData, ClientService, InMemoryStore};
//!
//! # tokio_test_block(async {
//! let store = Arc::new(InMemoryStore::new());
//! let clients = ClientService::new(store.clone(), store.clone());
//!
//! let client = clients
//!     .add(ClientData {
//!         name: "Maria Oliveira".to_string(),
//!         email: "maria@example.com".to_string(),
//!         national_id: "987.654.321-00".to_string(),
//!         birth_date: NaiveDate::from_ymd_opt(1992, 5, 15).unwrap(),
//!         phone: Some("(21) 99876-5432".to_string()),
//!     })
//!     .await
//!     .unwrap();
//!
//! assert_eq!(client.email, "maria@example.com");
//! # });
//! # fn tokio_test_block<F: std::future::Future>(f: F) -> F::Output {
//! #     tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(f)
//! # }
//! ```

pub mod client;
pub mod address;
pub mod error;
pub mod validation;
pub mod ports;
pub mod services;
pub mod adapters;

pub use client::{Client, ClientData};
pub use address::{Address, AddressData};
pub use error::ClientError;
pub use validation::{FieldRule, RuleViolation, MINIMUM_AGE, REGION_CODES};
pub use ports::{AddressStore, ClientStore};
pub use services::{AddressService, ClientService};
pub use adapters::InMemoryStore;
