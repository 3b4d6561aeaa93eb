use crate::remediation::domain::PullRequestEvent;

/// PullRequestRemediationRequest - Input of the pull-request handling use case
#[derive(Debug, Clone)]
pub struct PullRequestRemediationRequest {
    pub event: PullRequestEvent,
    /// Source-control access token used for file listing and commenting
    pub token: String,
    /// Public identifier of the policy application
    pub application: String,
}

impl PullRequestRemediationRequest {
    pub fn new(
        event: PullRequestEvent,
        token: impl Into<String>,
        application: impl Into<String>,
    ) -> Self {
        Self {
            event,
            token: token.into(),
            application: application.into(),
        }
    }
}
