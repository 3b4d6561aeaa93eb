/// Validated pull-request event received from the source-control webhook
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullRequestEvent {
    pub action: String,
    pub number: u64,
    /// `owner/name` of the repository
    pub repository: String,
    /// Browser URL of the repository
    pub repository_url: String,
    /// REST URL of the pull request (`.../pulls/{number}`)
    pub api_url: String,
    /// REST URL accepting issue comments for the pull request
    pub comments_url: String,
}

impl PullRequestEvent {
    /// REST URL listing the files changed by the pull request
    pub fn files_url(&self) -> String {
        format!("{}/files", self.api_url.trim_end_matches('/'))
    }
}
