//! Request handlers

pub mod clients;
pub mod addresses;
pub mod health;

use axum::http::Uri;

/// `Location` value for a resource created under the request path
pub(crate) fn location(uri: &Uri, id: impl std::fmt::Display) -> String {
    format!("{}/{}", uri.path().trim_end_matches('/'), id)
}
