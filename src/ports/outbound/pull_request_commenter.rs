use crate::remediation::domain::PullRequestEvent;
use crate::shared::Result;
use async_trait::async_trait;

/// PullRequestCommenter port for posting feedback onto a pull request
#[async_trait]
pub trait PullRequestCommenter: Send + Sync {
    /// Posts a comment to the pull request
    ///
    /// # Errors
    /// Returns an error if the comment is rejected or the API is unreachable.
    async fn post_comment(&self, event: &PullRequestEvent, token: &str, body: &str) -> Result<()>;
}
