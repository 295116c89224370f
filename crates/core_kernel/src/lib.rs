//! Core Kernel - Foundational types for the client registry
//!
//! This crate provides the building blocks shared by every other crate:
//! - Strongly-typed, store-assigned identifiers
//! - Port infrastructure (error type, marker and health-check traits) used by
//!   the storage interfaces and their adapters

pub mod identifiers;
pub mod ports;

pub use identifiers::{AddressId, ClientId, ParseIdError};
pub use ports::{
    AdapterHealth, DomainPort, HealthCheckResult, HealthCheckable, PortError,
};
