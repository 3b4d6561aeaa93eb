use crate::application::dto::{RemediationRequest, RemediationResponse};
use crate::ports::outbound::PolicyEvaluator;
use crate::remediation::domain::{
    Component, ComponentOutcome, ComponentReport, ManifestReport, Position, SkipReason, Stage,
};
use crate::remediation::services::{ExtractionError, RemediationExtractor};
use crate::shared::Result;
use chrono::Utc;
use futures::stream::{self, StreamExt};
use tracing::{debug, error, info, warn};

/// Stage at which every pipeline evaluation is requested (build-time policy)
pub const EVALUATION_STAGE: Stage = Stage::Build;

/// Evaluations run one at a time unless configured otherwise
pub const DEFAULT_MAX_CONCURRENT_EVALUATIONS: usize = 1;

/// ResolveRemediationsUseCase - The remediation pipeline
///
/// For every `(manifest, position, component)` it asks the policy engine for a
/// decision, extracts the violation-free remediation and records the outcome.
/// A failing component is skipped; it never aborts its manifest or the batch.
///
/// Evaluations are issued through an ordered stream bounded by
/// `max_concurrent`; results are collected in input order, so the output is
/// identical for any bound. The default bound of 1 is strictly sequential.
///
/// # Type Parameters
/// * `E` - PolicyEvaluator implementation
pub struct ResolveRemediationsUseCase<E> {
    evaluator: E,
    max_concurrent: usize,
}

impl<E: PolicyEvaluator> ResolveRemediationsUseCase<E> {
    /// Creates a sequential pipeline around the given evaluator
    pub fn new(evaluator: E) -> Self {
        Self {
            evaluator,
            max_concurrent: DEFAULT_MAX_CONCURRENT_EVALUATIONS,
        }
    }

    /// Allows up to `max_concurrent` evaluations in flight (minimum 1)
    pub fn with_max_concurrent(mut self, max_concurrent: usize) -> Self {
        self.max_concurrent = max_concurrent.max(1);
        self
    }

    /// Executes the pipeline
    ///
    /// # Errors
    /// Only structural problems fail the run (currently an empty application
    /// identifier). Component-level failures are reported as
    /// [`ComponentOutcome::Skipped`].
    pub async fn execute(&self, request: RemediationRequest) -> Result<RemediationResponse> {
        if request.application.trim().is_empty() {
            anyhow::bail!("Policy application identifier must not be empty");
        }

        let application = request.application.as_str();

        // Jobs own their data so the stream's futures stay free of borrowed arguments
        let jobs: Vec<(usize, String, Position, Component)> = request
            .manifests
            .iter()
            .enumerate()
            .flat_map(|(idx, (manifest, components))| {
                components.iter().map(move |(position, component)| {
                    (idx, manifest.filename.clone(), *position, component.clone())
                })
            })
            .collect();

        info!(
            manifests = request.manifests.len(),
            components = jobs.len(),
            application,
            max_concurrent = self.max_concurrent,
            "Resolving remediations"
        );

        let outcomes: Vec<(usize, ComponentReport)> = stream::iter(jobs)
            .map(|(idx, manifest, position, component)| async move {
                let outcome = self
                    .resolve_component(&manifest, position, &component, application)
                    .await;
                (
                    idx,
                    ComponentReport {
                        position,
                        component,
                        outcome,
                    },
                )
            })
            .buffered(self.max_concurrent)
            .collect()
            .await;

        let mut reports: Vec<ManifestReport> = request
            .manifests
            .keys()
            .map(|manifest| ManifestReport::new(manifest.clone(), Vec::new()))
            .collect();

        for (idx, entry) in outcomes {
            reports[idx].entries.push(entry);
        }

        let response = RemediationResponse::new(reports, Utc::now());

        info!(
            remediated = response.remediated_count(),
            skipped = response.skipped_count(),
            "Remediation resolution complete"
        );

        Ok(response)
    }

    /// Evaluates and extracts a single component
    async fn resolve_component(
        &self,
        manifest: &str,
        position: Position,
        component: &Component,
        application: &str,
    ) -> ComponentOutcome {
        debug!(
            manifest,
            %position,
            %component,
            "Evaluating component"
        );

        let decision = match self
            .evaluator
            .evaluate(component, EVALUATION_STAGE, application)
            .await
        {
            Ok(decision) => decision,
            Err(e) => {
                let details = format!("{:#}", e);
                error!(
                    manifest,
                    %component,
                    error = %details,
                    "Could not evaluate component"
                );
                return ComponentOutcome::Skipped(SkipReason::EvaluationFailed(details));
            }
        };

        match RemediationExtractor::select_no_violation_remediation(&decision) {
            Ok(remediated) => {
                debug!(
                    manifest,
                    %component,
                    remediation = %remediated,
                    "Found remediation"
                );
                ComponentOutcome::Remediated(remediated)
            }
            Err(ExtractionError::NotFound(_)) => {
                warn!(
                    manifest,
                    %component,
                    variants = decision.variants().len(),
                    "Did not find a remediating component"
                );
                ComponentOutcome::Skipped(SkipReason::NoRemediation)
            }
            Err(e) => {
                warn!(
                    manifest,
                    %component,
                    error = %e,
                    "Could not read remediating component"
                );
                ComponentOutcome::Skipped(SkipReason::ExtractionFailed(e.to_string()))
            }
        }
    }
}
