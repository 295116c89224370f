//! Client domain errors
//!
//! This module defines the typed failures raised by the client and address
//! services. The request layer is the only place these become status codes.

use thiserror::Error;

use core_kernel::{AddressId, ClientId, PortError};

/// Errors that can occur in the client domain
#[derive(Debug, Error)]
pub enum ClientError {
    /// Client with the given id does not exist
    #[error("client not found with id: {0}")]
    ClientNotFound(ClientId),

    /// Address with the given id does not exist
    #[error("address not found with id: {0}")]
    AddressNotFound(AddressId),

    /// Address exists but is owned by a different client (or does not exist)
    #[error("address with id {address_id} does not belong to client with id {client_id}")]
    AddressNotOwned {
        address_id: AddressId,
        client_id: ClientId,
    },

    /// Another client already uses this email
    #[error("email already registered: {0}")]
    DuplicateEmail(String),

    /// Another client already uses this national id
    #[error("national id already registered: {0}")]
    DuplicateNationalId(String),

    /// The store rejected a write on a uniqueness constraint
    #[error("{0}")]
    Conflict(String),

    /// Any other store failure
    #[error("storage failure: {0}")]
    Port(#[source] PortError),
}

impl ClientError {
    /// Returns true for absent entities and ownership mismatches
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            ClientError::ClientNotFound(_)
                | ClientError::AddressNotFound(_)
                | ClientError::AddressNotOwned { .. }
        )
    }

    /// Returns true for uniqueness violations
    pub fn is_conflict(&self) -> bool {
        matches!(
            self,
            ClientError::DuplicateEmail(_)
                | ClientError::DuplicateNationalId(_)
                | ClientError::Conflict(_)
        )
    }
}

impl From<PortError> for ClientError {
    fn from(error: PortError) -> Self {
        match error {
            PortError::Conflict { message } => ClientError::Conflict(message),
            other => ClientError::Port(other),
        }
    }
}
