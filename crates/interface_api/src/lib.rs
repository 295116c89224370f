//! HTTP API Layer
//!
//! This crate provides the REST API for client and address records using Axum.
//!
//! # Architecture
//!
//! - **Handlers**: Request handlers for clients, addresses and health
//! - **Extractors**: Path and JSON extraction that reject with [`ApiError`](error::ApiError)
//! - **Middleware**: Access logging and error body completion
//! - **DTOs**: Request/Response data transfer objects
//!
//! # Example
//!
//! ```rust,ignore
//! use interface_api::{create_router, AppState};
//!
//! let state = AppState::in_memory(ApiConfig::in_memory());
//! axum::serve(listener, create_router(state)).await?;
//! ```

pub mod config;
pub mod dto;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod middleware;

use std::sync::Arc;

use axum::{middleware as axum_middleware, routing::get, Router};
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

use core_kernel::HealthCheckable;
use domain_client::{AddressService, AddressStore, ClientService, ClientStore, InMemoryStore};

use crate::config::ApiConfig;
use crate::error::ApiError;
use crate::handlers::{addresses, clients, health};
use crate::middleware::{access_log, fill_error_path};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub clients: ClientService,
    pub addresses: AddressService,
    pub health: Arc<dyn HealthCheckable>,
    pub config: ApiConfig,
}

impl AppState {
    /// Wires the services over the given stores
    ///
    /// `health` is the store probed by the readiness endpoint.
    pub fn new(
        clients: Arc<dyn ClientStore>,
        addresses: Arc<dyn AddressStore>,
        health: Arc<dyn HealthCheckable>,
        config: ApiConfig,
    ) -> Self {
        let client_service = ClientService::new(clients, addresses.clone());
        let address_service = AddressService::new(addresses, client_service.clone());
        Self {
            clients: client_service,
            addresses: address_service,
            health,
            config,
        }
    }

    /// State backed by a fresh [`InMemoryStore`]
    pub fn in_memory(config: ApiConfig) -> Self {
        let store = Arc::new(InMemoryStore::new());
        Self::new(store.clone(), store.clone(), store, config)
    }
}

/// Creates the main API router
///
/// # Arguments
///
/// * `state` - Services and configuration shared by the handlers
///
/// # Returns
///
/// Configured Axum router with all routes and middleware
pub fn create_router(state: AppState) -> Router {
    let health_routes = Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check));

    let client_routes = Router::new()
        .route(
            "/clients",
            get(clients::list_clients).post(clients::create_client),
        )
        .route(
            "/clients/:client_id",
            get(clients::get_client)
                .put(clients::update_client)
                .delete(clients::delete_client),
        )
        .route(
            "/clients/:client_id/addresses",
            get(addresses::list_addresses).post(addresses::create_address),
        )
        .route(
            "/clients/:client_id/addresses/:address_id",
            get(addresses::get_address)
                .put(addresses::update_address)
                .delete(addresses::delete_address),
        );

    Router::new()
        .merge(health_routes)
        .merge(client_routes)
        .fallback(unknown_route)
        .layer(axum_middleware::from_fn(fill_error_path))
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                .layer(TraceLayer::new_for_http())
                .layer(axum_middleware::from_fn(access_log))
                .layer(PropagateRequestIdLayer::x_request_id()),
        )
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}

async fn unknown_route() -> ApiError {
    ApiError::NotFound("no route matches the requested path".to_string())
}
