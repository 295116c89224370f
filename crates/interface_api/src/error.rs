//! API error handling
//!
//! [`ApiError`] is the only place a failure becomes a status code. Its
//! response carries an [`ErrorBody`] with an empty `path`; the
//! [`fill_error_path`](crate::middleware::fill_error_path) middleware writes
//! the request path in before the response leaves the router.

use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::Local;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::error;

use domain_client::ClientError;

/// Pattern of the `timestamp` field in error bodies
pub const TIMESTAMP_FORMAT: &str = "%d-%m-%Y %H:%M:%S";

/// Message returned for every unexpected failure
pub const INTERNAL_ERROR_MESSAGE: &str = "an unexpected error occurred";

/// API error types
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Validation error: {}", .0.join("; "))]
    Validation(Vec<String>),

    /// Detail is logged, never returned
    #[error("Internal server error: {0}")]
    Internal(String),
}

/// Error response body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub status: u16,
    pub error: String,
    pub message: String,
    pub path: String,
    pub timestamp: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<String>>,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::BadRequest(_) | ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn label(&self) -> &'static str {
        match self {
            ApiError::NotFound(_) => "Resource Not Found",
            ApiError::Conflict(_) => "Duplicate Resource",
            ApiError::BadRequest(_) | ApiError::Validation(_) => "Bad Request",
            ApiError::Internal(_) => "Internal Server Error",
        }
    }

    /// Builds the response body; `path` is left for the middleware to fill
    pub fn body(&self) -> ErrorBody {
        let (message, details) = match self {
            ApiError::NotFound(msg) | ApiError::Conflict(msg) | ApiError::BadRequest(msg) => {
                (msg.clone(), None)
            }
            ApiError::Validation(details) => {
                ("request validation failed".to_string(), Some(details.clone()))
            }
            ApiError::Internal(_) => (INTERNAL_ERROR_MESSAGE.to_string(), None),
        };

        ErrorBody {
            status: self.status().as_u16(),
            error: self.label().to_string(),
            message,
            path: String::new(),
            timestamp: Local::now().format(TIMESTAMP_FORMAT).to_string(),
            details,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let ApiError::Internal(detail) = &self {
            error!(error = %detail, "Unexpected failure");
        }

        let body = self.body();
        let mut response = (self.status(), Json(body.clone())).into_response();
        response.extensions_mut().insert(body);
        response
    }
}

impl From<ClientError> for ApiError {
    fn from(err: ClientError) -> Self {
        if err.is_not_found() {
            ApiError::NotFound(err.to_string())
        } else if err.is_conflict() {
            ApiError::Conflict(err.to_string())
        } else {
            ApiError::Internal(err.to_string())
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_kernel::{AddressId, ClientId, PortError};

    #[test]
    fn test_client_errors_map_to_statuses() {
        let not_found: ApiError = ClientError::ClientNotFound(ClientId::new(1)).into();
        assert_eq!(not_found.status(), StatusCode::NOT_FOUND);

        let not_owned: ApiError = ClientError::AddressNotOwned {
            address_id: AddressId::new(2),
            client_id: ClientId::new(1),
        }
        .into();
        assert_eq!(not_owned.status(), StatusCode::NOT_FOUND);

        let duplicate: ApiError = ClientError::DuplicateEmail("a@x.com".to_string()).into();
        assert_eq!(duplicate.status(), StatusCode::CONFLICT);

        let port: ApiError = ClientError::Port(PortError::internal("disk on fire")).into();
        assert_eq!(port.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_internal_detail_not_leaked() {
        let body = ApiError::Internal("connection refused at 10.0.0.3".to_string()).body();
        assert_eq!(body.status, 500);
        assert_eq!(body.error, "Internal Server Error");
        assert_eq!(body.message, INTERNAL_ERROR_MESSAGE);
        assert!(body.details.is_none());
    }

    #[test]
    fn test_validation_body_carries_details() {
        let body = ApiError::Validation(vec!["email: email must be a valid address".to_string()]).body();
        assert_eq!(body.status, 400);
        assert_eq!(body.error, "Bad Request");
        assert_eq!(body.details.as_ref().map(Vec::len), Some(1));
    }

    #[test]
    fn test_timestamp_pattern() {
        let body = ApiError::NotFound("x".to_string()).body();
        assert!(chrono::NaiveDateTime::parse_from_str(&body.timestamp, TIMESTAMP_FORMAT).is_ok());
    }

    #[test]
    fn test_details_omitted_when_absent() {
        let json = serde_json::to_value(ApiError::Conflict("dup".to_string()).body()).unwrap();
        assert!(json.get("details").is_none());
        assert_eq!(json["error"], "Duplicate Resource");
    }
}
