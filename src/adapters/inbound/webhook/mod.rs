//! HTTP endpoint receiving GitHub pull-request webhooks.
//!
//! `POST /webhook` drives [`HandlePullRequestUseCase`]; `GET /healthz`
//! answers liveness probes. Every request runs inside a tracing span
//! carrying the GitHub delivery id.

mod error;
mod payload;
mod params;

pub use error::WebhookError;
pub use params::{PolicyParams, WebhookParams};
pub use payload::decode_pull_request_event;

use crate::adapters::outbound::network::{CachingPolicyEvaluator, IqPolicyClient};
use crate::application::dto::PullRequestRemediationRequest;
use crate::application::use_cases::HandlePullRequestUseCase;
use crate::ports::outbound::{PolicyEvaluator, PullRequestCommenter, PullRequestFileSource};
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{header, HeaderMap, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info, info_span, warn, Instrument};
use uuid::Uuid;

pub const WEBHOOK_PATH: &str = "/webhook";
pub const HEALTH_PATH: &str = "/healthz";

const EVENT_HEADER: &str = "x-github-event";
const DELIVERY_HEADER: &str = "x-github-delivery";

/// Per-request policy-engine settings fixed at startup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WebhookSettings {
    pub policy_timeout: Duration,
    /// Wrap each request's policy client in a [`CachingPolicyEvaluator`]
    pub memoize_evaluations: bool,
}

impl Default for WebhookSettings {
    fn default() -> Self {
        Self {
            policy_timeout: Duration::from_secs(IqPolicyClient::DEFAULT_TIMEOUT_SECONDS),
            memoize_evaluations: false,
        }
    }
}

/// Shared state of the webhook endpoint
pub struct WebhookState<S, C> {
    use_case: HandlePullRequestUseCase<S, C>,
    settings: WebhookSettings,
}

impl<S, C> WebhookState<S, C>
where
    S: PullRequestFileSource,
    C: PullRequestCommenter,
{
    pub fn new(use_case: HandlePullRequestUseCase<S, C>, settings: WebhookSettings) -> Self {
        Self { use_case, settings }
    }

    /// Builds the policy evaluator for one request
    ///
    /// The policy engine and its credentials arrive with every request, so
    /// the client (and its cache) never outlives the request.
    fn policy_evaluator(
        &self,
        policy: &PolicyParams,
    ) -> Result<Box<dyn PolicyEvaluator>, WebhookError> {
        let client = IqPolicyClient::new(
            &policy.server,
            policy.credentials.clone(),
            self.settings.policy_timeout,
        )
        .map_err(|e| WebhookError::PolicyClient(format!("{:#}", e)))?;

        if self.settings.memoize_evaluations {
            Ok(Box::new(CachingPolicyEvaluator::new(client)))
        } else {
            Ok(Box::new(client))
        }
    }
}

/// Builds the axum router serving the webhook and health endpoints
pub fn router<S, C>(state: WebhookState<S, C>) -> Router
where
    S: PullRequestFileSource + 'static,
    C: PullRequestCommenter + 'static,
{
    Router::new()
        .route(WEBHOOK_PATH, post(handle_webhook::<S, C>))
        .route(HEALTH_PATH, get(health))
        .with_state(Arc::new(state))
}

async fn health() -> &'static str {
    "ok"
}

async fn handle_webhook<S, C>(
    State(state): State<Arc<WebhookState<S, C>>>,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response
where
    S: PullRequestFileSource + 'static,
    C: PullRequestCommenter + 'static,
{
    let delivery = header_value(&headers, DELIVERY_HEADER)
        .map(str::to_string)
        .unwrap_or_else(|| Uuid::new_v4().to_string());
    let span = info_span!("webhook", delivery = %delivery);

    async move {
        match process(&state, &uri, &headers, &body).await {
            Ok(response) => response,
            Err(e) => {
                if e.status_code().is_server_error() {
                    error!(error = %e, "Webhook request failed");
                } else {
                    warn!(error = %e, "Rejected webhook request");
                }
                e.into_response()
            }
        }
    }
    .instrument(span)
    .await
}

async fn process<S, C>(
    state: &WebhookState<S, C>,
    uri: &Uri,
    headers: &HeaderMap,
    body: &[u8],
) -> Result<Response, WebhookError>
where
    S: PullRequestFileSource,
    C: PullRequestCommenter,
{
    let event_type = header_value(headers, EVENT_HEADER).ok_or(WebhookError::MissingEventType)?;

    match event_type {
        "ping" => {
            info!("Received ping");
            return Ok(StatusCode::OK.into_response());
        }
        "pull_request" => {}
        other => return Err(WebhookError::UnsupportedEventType(other.to_string())),
    }

    // Read only for pull_request events; a ping never depends on them
    let params = WebhookParams::from_uri(uri)?;

    let content_type = header_value(headers, header::CONTENT_TYPE.as_str());
    let event = decode_pull_request_event(content_type, body)?;

    info!(
        repository = %event.repository_url,
        action = %event.action,
        pull_request = event.number,
        "Received pull request"
    );

    let policy = params.policy()?;
    let evaluator = state.policy_evaluator(&policy)?;

    let request = PullRequestRemediationRequest::new(event, params.token(), policy.application);
    let summary = state
        .use_case
        .execute(request, evaluator)
        .await
        .map_err(|e| WebhookError::Processing(format!("{:#}", e)))?;

    Ok(Json(summary).into_response())
}

fn header_value<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|value| value.to_str().ok())
}
