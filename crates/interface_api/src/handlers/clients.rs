//! Client handlers

use axum::{
    extract::{OriginalUri, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};

use core_kernel::ClientId;

use crate::dto::client::{ClientRequest, ClientResponse};
use crate::error::ApiError;
use crate::extract::{ApiPath, ValidatedJson};
use crate::AppState;

use super::location;

/// Lists all clients
pub async fn list_clients(
    State(state): State<AppState>,
) -> Result<Json<Vec<ClientResponse>>, ApiError> {
    let clients = state.clients.list_all().await?;
    Ok(Json(clients.into_iter().map(ClientResponse::from).collect()))
}

/// Gets a client by ID
pub async fn get_client(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<ClientId>,
) -> Result<Json<ClientResponse>, ApiError> {
    let client = state.clients.get_by_id(id).await?;
    Ok(Json(client.into()))
}

/// Registers a new client
pub async fn create_client(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    ValidatedJson(request): ValidatedJson<ClientRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let data = request.into_data().ok_or_else(missing_birth_date)?;
    let client = state.clients.add(data).await?;

    let location = location(&uri, client.id);
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(ClientResponse::from(client)),
    ))
}

/// Replaces a client's fields
pub async fn update_client(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<ClientId>,
    ValidatedJson(request): ValidatedJson<ClientRequest>,
) -> Result<Json<ClientResponse>, ApiError> {
    let data = request.into_data().ok_or_else(missing_birth_date)?;
    let client = state.clients.update(id, data).await?;
    Ok(Json(client.into()))
}

/// Deletes a client and its addresses
pub async fn delete_client(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<ClientId>,
) -> Result<StatusCode, ApiError> {
    state.clients.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

fn missing_birth_date() -> ApiError {
    ApiError::Validation(vec!["birth_date: birth date is required".to_string()])
}
