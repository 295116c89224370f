//! Address handlers
//!
//! Every route is scoped by the owning client; an address reached through
//! the wrong client is reported as not found.

use axum::{
    extract::{OriginalUri, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};

use core_kernel::{AddressId, ClientId};

use crate::dto::address::{AddressRequest, AddressResponse};
use crate::error::ApiError;
use crate::extract::{ApiPath, ValidatedJson};
use crate::AppState;

use super::location;

/// Lists the addresses of a client
pub async fn list_addresses(
    State(state): State<AppState>,
    ApiPath(client_id): ApiPath<ClientId>,
) -> Result<Json<Vec<AddressResponse>>, ApiError> {
    let addresses = state.addresses.list_by_client(client_id).await?;
    Ok(Json(addresses.into_iter().map(AddressResponse::from).collect()))
}

/// Gets one address of a client
pub async fn get_address(
    State(state): State<AppState>,
    ApiPath((client_id, address_id)): ApiPath<(ClientId, AddressId)>,
) -> Result<Json<AddressResponse>, ApiError> {
    let address = state.addresses.get_for_client(client_id, address_id).await?;
    Ok(Json(address.into()))
}

/// Adds an address to a client
pub async fn create_address(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    ApiPath(client_id): ApiPath<ClientId>,
    ValidatedJson(request): ValidatedJson<AddressRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let address = state.addresses.add(client_id, request.into()).await?;

    let location = location(&uri, address.id);
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(AddressResponse::from(address)),
    ))
}

/// Replaces an address's fields
pub async fn update_address(
    State(state): State<AppState>,
    ApiPath((client_id, address_id)): ApiPath<(ClientId, AddressId)>,
    ValidatedJson(request): ValidatedJson<AddressRequest>,
) -> Result<Json<AddressResponse>, ApiError> {
    let address = state
        .addresses
        .update(client_id, address_id, request.into())
        .await?;
    Ok(Json(address.into()))
}

/// Deletes an address of a client
pub async fn delete_address(
    State(state): State<AppState>,
    ApiPath((client_id, address_id)): ApiPath<(ClientId, AddressId)>,
) -> Result<StatusCode, ApiError> {
    state.addresses.delete(client_id, address_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
