//! Request extractors
//!
//! Both extractors reject with [`ApiError`] so malformed ids, malformed JSON
//! and field violations all produce the standard error body.

use axum::{
    async_trait,
    extract::{FromRequest, FromRequestParts, Request},
    Json,
};
use chrono::{Local, NaiveDate};
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationErrors};

use domain_client::RuleViolation;

use crate::error::ApiError;
use crate::AppState;

/// Path parameters with [`ApiError`] as rejection
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(ApiError))]
pub struct ApiPath<T>(pub T);

/// Inputs to checks that depend on more than the field value
#[derive(Debug, Clone, Copy)]
pub struct RuleContext {
    pub today: NaiveDate,
    pub minimum_age: u32,
}

/// Request bodies: derive-level field checks plus any cross-cutting rules
pub trait RequestRules: Validate {
    fn check_rules(&self, _context: &RuleContext) -> Vec<RuleViolation> {
        Vec::new()
    }
}

/// JSON body that has passed every field rule
///
/// All violations are collected into a single 400 response rather than
/// stopping at the first one.
#[derive(Debug)]
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<T> FromRequest<AppState> for ValidatedJson<T>
where
    T: DeserializeOwned + RequestRules + Send,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &AppState) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;

        let context = RuleContext {
            today: Local::now().date_naive(),
            minimum_age: state.config.minimum_age,
        };

        let mut details = match value.validate() {
            Ok(()) => Vec::new(),
            Err(errors) => field_violations(&errors),
        };
        details.extend(value.check_rules(&context).iter().map(ToString::to_string));

        if details.is_empty() {
            Ok(Self(value))
        } else {
            Err(ApiError::Validation(details))
        }
    }
}

/// Flattens validator errors into `field: message` lines, sorted by field
pub fn field_violations(errors: &ValidationErrors) -> Vec<String> {
    let mut lines: Vec<String> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| {
                let message = e
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| e.code.to_string());
                format!("{}: {}", field, message)
            })
        })
        .collect();
    lines.sort();
    lines
}
