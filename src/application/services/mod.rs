//! Domain callers - thin services over the Auth Gateway.
//!
//! Each service builds a path and payload, delegates to [`AuthGateway`], and
//! decodes the response. Input problems are reported as
//! [`ClientError::Validation`] before anything is sent.

mod auth;
mod bookings;
mod events;
mod locations;
mod sports;
mod users;

pub use auth::AuthService;
pub use bookings::BookingService;
pub use events::EventService;
pub use locations::LocationService;
pub use sports::SportService;
pub use users::UserService;

use serde::de::DeserializeOwned;

use crate::application::error::ClientError;
use crate::application::gateway::AuthGateway;
use crate::domain::foundation::{UserHash, ValidationError};
use crate::ports::ApiResponse;

/// Upper bound accepted for `limit` query parameters.
const MAX_LIST_LIMIT: u32 = 100;

/// Identity reference of the current session.
async fn current_identity(gateway: &AuthGateway) -> Result<UserHash, ClientError> {
    gateway
        .session_store()
        .get()
        .await?
        .map(|session| session.identity().clone())
        .ok_or(ClientError::Validation(ValidationError::MissingIdentity))
}

/// Decodes a successful response body; error statuses become `Rejected`.
fn decode<T: DeserializeOwned>(response: ApiResponse) -> Result<T, ClientError> {
    Ok(response.error_for_status()?.json()?)
}

/// Accepts any 2xx response and ignores its body.
fn expect_success(response: ApiResponse) -> Result<(), ClientError> {
    response.error_for_status().map(|_| ())
}

fn check_limit(limit: u32) -> Result<u32, ValidationError> {
    if (1..=MAX_LIST_LIMIT).contains(&limit) {
        Ok(limit)
    } else {
        Err(ValidationError::out_of_range(
            "limit",
            1,
            i64::from(MAX_LIST_LIMIT),
            i64::from(limit),
        ))
    }
}

/// Free text used as one path segment.
fn path_segment<'a>(field: &str, value: &'a str) -> Result<&'a str, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::empty_field(field));
    }
    if trimmed.contains(['/', '?', '#', '%']) {
        return Err(ValidationError::invalid_format(
            field,
            "must not contain '/', '?', '#' or '%'",
        ));
    }
    Ok(trimmed)
}

fn non_empty<'a>(field: &str, value: &'a str) -> Result<&'a str, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(ValidationError::empty_field(field))
    } else {
        Ok(trimmed)
    }
}
