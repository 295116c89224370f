//! Repository implementations for domain entities
//!
//! Repositories encapsulate SQL queries and map between database rows and
//! the values the domain hands them. They speak `DatabaseError`; the
//! adapters translate that into `PortError`.

pub mod client;
pub mod address;

pub use client::{ClientRepository, ClientRow};
pub use address::{AddressRepository, AddressRow};
