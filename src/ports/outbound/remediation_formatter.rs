use crate::application::dto::RemediationResponse;
use crate::shared::Result;

/// RemediationFormatter port for rendering remediation results as text
///
/// The rendered text is posted to the pull request as a comment.
pub trait RemediationFormatter: Send + Sync {
    /// Renders the outcome of a remediation run
    ///
    /// # Errors
    /// Returns an error if rendering fails
    fn format(&self, response: &RemediationResponse) -> Result<String>;
}
