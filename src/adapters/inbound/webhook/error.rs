//! Error types for the webhook endpoint.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

/// Errors that end a webhook request early.
///
/// Client faults map to 400, failures of downstream systems to 500. The
/// response body carries the short diagnostic message.
#[derive(Debug, Error)]
pub enum WebhookError {
    /// The X-GitHub-Event header is missing or not valid text.
    #[error("could not parse request headers: missing X-GitHub-Event header")]
    MissingEventType,

    /// The event type is neither `ping` nor `pull_request`.
    #[error("did not receive a supported github event: {0}")]
    UnsupportedEventType(String),

    /// The request body could not be decoded into a pull-request event.
    #[error("invalid payload: {0}")]
    InvalidPayload(String),

    /// A policy-engine query parameter is missing or malformed.
    #[error("invalid query parameter: {0}")]
    InvalidParameter(String),

    /// The policy-engine client could not be constructed.
    #[error("could not create policy client: {0}")]
    PolicyClient(String),

    /// Handling the pull request failed downstream.
    #[error("{0}")]
    Processing(String),
}

impl WebhookError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::MissingEventType
            | Self::UnsupportedEventType(_)
            | Self::InvalidPayload(_)
            | Self::InvalidParameter(_) => StatusCode::BAD_REQUEST,
            Self::PolicyClient(_) | Self::Processing(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for WebhookError {
    fn into_response(self) -> Response {
        (self.status_code(), self.to_string()).into_response()
    }
}
