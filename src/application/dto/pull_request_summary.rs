use serde::Serialize;

/// PullRequestSummary - Outcome of handling one pull-request event
///
/// Serialized as the body of a successful webhook response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PullRequestSummary {
    /// Changed files that were recognized and parsed as manifests
    pub manifests: usize,
    /// Components evaluated against the policy engine
    pub components: usize,
    pub remediated: usize,
    pub skipped: usize,
    /// Whether a comment was posted to the pull request
    pub commented: bool,
}
