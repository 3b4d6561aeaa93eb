use super::error::WebhookError;
use crate::adapters::outbound::network::PolicyCredentials;
use axum::extract::Query;
use axum::http::Uri;
use serde::Deserialize;

/// Query parameters configured on the GitHub webhook URL
///
/// All fields are optional at the transport level so that a missing value
/// produces a descriptive error instead of a generic rejection.
#[derive(Default, Deserialize)]
pub struct WebhookParams {
    /// Source-control access token
    #[serde(default)]
    pub token: Option<String>,
    /// Base URL of the policy engine
    #[serde(default)]
    pub iq_server: Option<String>,
    /// `user:password` for the policy engine
    #[serde(default)]
    pub iq_auth: Option<String>,
    /// Public id of the policy application
    #[serde(default)]
    pub iq_app: Option<String>,
}

/// Validated policy-engine settings taken from the query string
#[derive(Debug, Clone)]
pub struct PolicyParams {
    pub server: String,
    pub credentials: PolicyCredentials,
    pub application: String,
}

impl WebhookParams {
    /// Reads the parameters from the request URI's query string
    ///
    /// # Errors
    /// Returns [`WebhookError::InvalidParameter`] if the query string cannot
    /// be deserialized (e.g. a repeated key).
    pub fn from_uri(uri: &Uri) -> Result<Self, WebhookError> {
        Query::<Self>::try_from_uri(uri)
            .map(|Query(params)| params)
            .map_err(|e| WebhookError::InvalidParameter(e.body_text()))
    }

    /// Source-control token, empty when none was configured
    pub fn token(&self) -> &str {
        self.token.as_deref().unwrap_or_default()
    }

    /// Validates the policy-engine parameters
    ///
    /// # Errors
    /// Returns [`WebhookError::InvalidParameter`] if `iq_server`, `iq_auth`
    /// or `iq_app` is missing or malformed.
    pub fn policy(&self) -> Result<PolicyParams, WebhookError> {
        let server = required("iq_server", self.iq_server.as_deref())?;
        let url = reqwest::Url::parse(server)
            .map_err(|e| WebhookError::InvalidParameter(format!("iq_server: {}", e)))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(WebhookError::InvalidParameter(
                "iq_server: must be an http or https URL".to_string(),
            ));
        }

        let auth = required("iq_auth", self.iq_auth.as_deref())?;
        let credentials = PolicyCredentials::parse(auth)
            .map_err(|e| WebhookError::InvalidParameter(format!("iq_auth: {}", e)))?;

        let application = required("iq_app", self.iq_app.as_deref())?;

        Ok(PolicyParams {
            server: server.to_string(),
            credentials,
            application: application.to_string(),
        })
    }
}

fn required<'a>(name: &str, value: Option<&'a str>) -> Result<&'a str, WebhookError> {
    match value.map(str::trim) {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(WebhookError::InvalidParameter(format!("{} is required", name))),
    }
}
