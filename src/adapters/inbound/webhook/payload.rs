use super::error::WebhookError;
use crate::remediation::domain::PullRequestEvent;
use serde::Deserialize;

/// Prefix of form-encoded GitHub deliveries
const FORM_PAYLOAD_PREFIX: &str = "payload=";

// GitHub pull_request event structures (only the fields used)

#[derive(Debug, Deserialize)]
struct PullRequestPayload {
    action: String,
    number: u64,
    pull_request: PullRequestObject,
    repository: RepositoryObject,
}

#[derive(Debug, Deserialize)]
struct PullRequestObject {
    url: String,
    comments_url: String,
}

#[derive(Debug, Deserialize)]
struct RepositoryObject {
    full_name: String,
    html_url: String,
}

impl TryFrom<PullRequestPayload> for PullRequestEvent {
    type Error = WebhookError;

    fn try_from(payload: PullRequestPayload) -> Result<Self, Self::Error> {
        if payload.pull_request.url.is_empty() {
            return Err(WebhookError::InvalidPayload(
                "pull_request.url is empty".to_string(),
            ));
        }
        if payload.pull_request.comments_url.is_empty() {
            return Err(WebhookError::InvalidPayload(
                "pull_request.comments_url is empty".to_string(),
            ));
        }

        Ok(PullRequestEvent {
            action: payload.action,
            number: payload.number,
            repository: payload.repository.full_name,
            repository_url: payload.repository.html_url,
            api_url: payload.pull_request.url,
            comments_url: payload.pull_request.comments_url,
        })
    }
}

/// Decodes a webhook body into a pull-request event
///
/// `application/json` bodies are parsed as-is. Anything else is treated as a
/// form-encoded delivery: `+` becomes a space, the body is percent-decoded
/// and a leading `payload=` is removed.
pub fn decode_pull_request_event(
    content_type: Option<&str>,
    body: &[u8],
) -> Result<PullRequestEvent, WebhookError> {
    let text = std::str::from_utf8(body)
        .map_err(|e| WebhookError::InvalidPayload(format!("body is not UTF-8: {}", e)))?;

    if text.trim().is_empty() {
        return Err(WebhookError::InvalidPayload("body is empty".to_string()));
    }

    let parsed: Result<PullRequestPayload, serde_json::Error> = if is_json(content_type) {
        serde_json::from_str(text)
    } else {
        let plus_decoded = text.replace('+', " ");
        let decoded = urlencoding::decode(&plus_decoded).map_err(|e| {
            WebhookError::InvalidPayload(format!("error during url unescape of payload: {}", e))
        })?;
        let json = decoded
            .strip_prefix(FORM_PAYLOAD_PREFIX)
            .unwrap_or(&*decoded);
        serde_json::from_str(json)
    };

    let payload = parsed.map_err(|e| {
        WebhookError::InvalidPayload(format!("could not unmarshal payload as json: {}", e))
    })?;

    PullRequestEvent::try_from(payload)
}

fn is_json(content_type: Option<&str>) -> bool {
    content_type
        .and_then(|value| value.split(';').next())
        .map(|mime| mime.trim().eq_ignore_ascii_case("application/json"))
        .unwrap_or(false)
}
