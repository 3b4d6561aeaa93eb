use crate::application::dto::{
    PullRequestRemediationRequest, PullRequestSummary, RemediationRequest, RemediationResponse,
};
use crate::application::use_cases::ResolveRemediationsUseCase;
use crate::ports::outbound::{
    ManifestParser, PolicyEvaluator, PullRequestCommenter, PullRequestFileSource,
    RemediationFormatter,
};
use crate::remediation::domain::{ManifestReference, ManifestSet};
use crate::shared::Result;
use anyhow::Context;
use tracing::{debug, info, warn};

/// Behaviour switches for pull-request handling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PullRequestOptions {
    /// Upper bound on concurrent policy evaluations
    pub max_concurrent_evaluations: usize,
    /// Post a comment even when no remediation was found
    pub comment_when_clean: bool,
}

impl Default for PullRequestOptions {
    fn default() -> Self {
        Self {
            max_concurrent_evaluations: 1,
            comment_when_clean: false,
        }
    }
}

/// HandlePullRequestUseCase - End-to-end handling of a pull-request event
///
/// Orchestrates the full flow using generic dependency injection:
/// 1. List the files changed by the pull request
/// 2. Parse the recognized manifests into component records
/// 3. Resolve remediations through [`ResolveRemediationsUseCase`]
/// 4. Render the outcome and post it as a pull-request comment
///
/// # Type Parameters
/// * `S` - PullRequestFileSource implementation
/// * `C` - PullRequestCommenter implementation
pub struct HandlePullRequestUseCase<S, C> {
    file_source: S,
    commenter: C,
    parsers: Vec<Box<dyn ManifestParser>>,
    formatter: Box<dyn RemediationFormatter>,
    options: PullRequestOptions,
}

impl<S, C> HandlePullRequestUseCase<S, C>
where
    S: PullRequestFileSource,
    C: PullRequestCommenter,
{
    /// Creates a new HandlePullRequestUseCase with injected dependencies
    pub fn new(
        file_source: S,
        commenter: C,
        parsers: Vec<Box<dyn ManifestParser>>,
        formatter: Box<dyn RemediationFormatter>,
        options: PullRequestOptions,
    ) -> Self {
        Self {
            file_source,
            commenter,
            parsers,
            formatter,
            options,
        }
    }

    /// Executes the use case for one pull-request event
    ///
    /// The policy evaluator is passed per call because its endpoint and
    /// credentials arrive with each webhook request.
    ///
    /// # Errors
    /// Returns an error if the changed files cannot be fetched, the pipeline
    /// rejects its input, or the comment cannot be posted. Failures of
    /// individual manifests or components are not errors.
    pub async fn execute<E: PolicyEvaluator>(
        &self,
        request: PullRequestRemediationRequest,
        evaluator: E,
    ) -> Result<PullRequestSummary> {
        // Step 1: List changed files
        let files = self
            .file_source
            .changed_files(&request.event, &request.token)
            .await
            .context("could not get files from pull request")?;

        info!(
            repository = %request.event.repository,
            pull_request = request.event.number,
            files = files.len(),
            "Fetched changed files"
        );

        // Step 2: Extract components from manifests
        let manifests = self.find_components(files);
        if manifests.is_empty() {
            info!("No changed manifests declare components; nothing to evaluate");
            return Ok(PullRequestSummary {
                manifests: 0,
                components: 0,
                remediated: 0,
                skipped: 0,
                commented: false,
            });
        }

        // Step 3: Resolve remediations
        let manifest_count = manifests.len();
        let response = ResolveRemediationsUseCase::new(evaluator)
            .with_max_concurrent(self.options.max_concurrent_evaluations)
            .execute(RemediationRequest::new(request.application.clone(), manifests))
            .await
            .context("could not evaluate components")?;

        // Step 4: Report back on the pull request
        let commented = self.comment_if_needed(&request, &response).await?;

        Ok(PullRequestSummary {
            manifests: manifest_count,
            components: response.component_count(),
            remediated: response.remediated_count(),
            skipped: response.skipped_count(),
            commented,
        })
    }

    /// Parses every changed file that a registered parser supports
    ///
    /// Files that fail to parse or declare no components are skipped.
    fn find_components(&self, files: Vec<ManifestReference>) -> ManifestSet {
        let mut manifests = ManifestSet::new();

        for file in files {
            let Some(parser) = self.parsers.iter().find(|p| p.supports(&file)) else {
                debug!(file = %file.filename, "Not a supported manifest");
                continue;
            };

            match parser.parse(&file) {
                Ok(components) if components.is_empty() => {
                    debug!(file = %file.filename, "Manifest change declares no components");
                }
                Ok(components) => {
                    debug!(
                        file = %file.filename,
                        components = components.len(),
                        "Parsed manifest"
                    );
                    manifests.insert(file, components);
                }
                Err(e) => {
                    warn!(file = %file.filename, error = %e, "Could not parse manifest; skipping");
                }
            }
        }

        manifests
    }

    /// Posts the rendered result, returning whether a comment was posted
    async fn comment_if_needed(
        &self,
        request: &PullRequestRemediationRequest,
        response: &RemediationResponse,
    ) -> Result<bool> {
        if response.remediated_count() == 0 && !self.options.comment_when_clean {
            info!("No remediations found; not commenting");
            return Ok(false);
        }

        let body = self
            .formatter
            .format(response)
            .context("could not render remediation comment")?;

        self.commenter
            .post_comment(&request.event, &request.token, &body)
            .await
            .context("could not post comment to pull request")?;

        info!(
            pull_request = request.event.number,
            "Posted remediation comment"
        );
        Ok(true)
    }
}
