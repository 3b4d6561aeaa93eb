use crate::remediation::domain::{ManifestReference, PullRequestEvent};
use crate::shared::Result;
use async_trait::async_trait;

/// PullRequestFileSource port for listing the files changed by a pull request
#[async_trait]
pub trait PullRequestFileSource: Send + Sync {
    /// Fetches the changed files of a pull request with their diff patches
    ///
    /// # Arguments
    /// * `event` - The pull-request event being processed
    /// * `token` - Source-control access token (may be empty for public repositories)
    ///
    /// # Errors
    /// Returns an error if the source-control API cannot be reached or
    /// rejects the request.
    async fn changed_files(
        &self,
        event: &PullRequestEvent,
        token: &str,
    ) -> Result<Vec<ManifestReference>>;
}
