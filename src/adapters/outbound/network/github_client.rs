use crate::ports::outbound::{PullRequestCommenter, PullRequestFileSource};
use crate::remediation::domain::{ManifestReference, PullRequestEvent};
use crate::shared::Result;
use anyhow::Context;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// GitHub REST client for pull-request files and comments
///
/// Implements both the PullRequestFileSource and PullRequestCommenter ports.
/// URLs come from the webhook event itself, so the client needs no base URL.
///
/// # Security
/// - The token is only sent as an `Authorization` header, never logged
/// - Implements timeout (configurable, 30 seconds by default)
#[derive(Clone)]
pub struct GitHubClient {
    client: reqwest::Client,
}

impl GitHubClient {
    pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;
    const PER_PAGE: usize = 100;
    // GitHub stops listing pull-request files after 3000 entries
    const MAX_PAGES: usize = 30;

    pub fn new(timeout: Duration) -> Result<Self> {
        let version = env!("CARGO_PKG_VERSION");
        let user_agent = format!("pr-remediator/{}", version);
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()
            .context("Failed to build GitHub HTTP client")?;

        Ok(Self { client })
    }

    fn request(&self, method: reqwest::Method, url: &str, token: &str) -> reqwest::RequestBuilder {
        let builder = self
            .client
            .request(method, url)
            .header(reqwest::header::ACCEPT, "application/vnd.github+json");

        if token.is_empty() {
            builder
        } else {
            builder.header(reqwest::header::AUTHORIZATION, format!("token {}", token))
        }
    }

    async fn fetch_page(&self, files_url: &str, token: &str, page: usize) -> Result<Vec<GitHubFile>> {
        let url = format!("{}?per_page={}&page={}", files_url, Self::PER_PAGE, page);

        let response = self
            .request(reqwest::Method::GET, &url, token)
            .send()
            .await
            .with_context(|| format!("GitHub request failed: {}", url))?;

        if !response.status().is_success() {
            anyhow::bail!(
                "GitHub returned status code {} while listing files of {}",
                response.status(),
                files_url
            );
        }

        response
            .json()
            .await
            .context("Malformed pull-request file listing from GitHub")
    }
}

#[async_trait]
impl PullRequestFileSource for GitHubClient {
    async fn changed_files(
        &self,
        event: &PullRequestEvent,
        token: &str,
    ) -> Result<Vec<ManifestReference>> {
        let files_url = event.files_url();
        let mut files = Vec::new();

        for page in 1..=Self::MAX_PAGES {
            let batch = self.fetch_page(&files_url, token, page).await?;
            let last_page = batch.len() < Self::PER_PAGE;
            files.extend(batch.into_iter().map(ManifestReference::from));
            if last_page {
                break;
            }
        }

        tracing::debug!(
            repository = %event.repository,
            number = event.number,
            files = files.len(),
            "listed pull-request files"
        );

        Ok(files)
    }
}

#[async_trait]
impl PullRequestCommenter for GitHubClient {
    async fn post_comment(&self, event: &PullRequestEvent, token: &str, body: &str) -> Result<()> {
        let payload = GitHubComment { body };

        let response = self
            .request(reqwest::Method::POST, &event.comments_url, token)
            .json(&payload)
            .send()
            .await
            .with_context(|| format!("GitHub request failed: {}", event.comments_url))?;

        if !response.status().is_success() {
            anyhow::bail!(
                "GitHub returned status code {} while commenting on {}#{}",
                response.status(),
                event.repository,
                event.number
            );
        }

        Ok(())
    }
}

// GitHub API structures

#[derive(Debug, Deserialize)]
struct GitHubFile {
    filename: String,
    /// Absent for binary files and very large diffs
    #[serde(default)]
    patch: Option<String>,
}

impl From<GitHubFile> for ManifestReference {
    fn from(file: GitHubFile) -> Self {
        ManifestReference::new(file.filename, file.patch.unwrap_or_default())
    }
}

#[derive(Debug, Serialize)]
struct GitHubComment<'a> {
    body: &'a str,
}
