use crate::remediation::domain::{ManifestReport, RemediationResult};
use chrono::{DateTime, Utc};

/// RemediationResponse - Structured output of the remediation pipeline
///
/// Holds one report per input manifest so callers decide how to surface
/// skipped components (log, comment, response body).
#[derive(Debug, Clone)]
pub struct RemediationResponse {
    /// Per-manifest outcomes, in manifest order
    pub manifests: Vec<ManifestReport>,
    /// When the pipeline finished evaluating
    pub evaluated_at: DateTime<Utc>,
}

impl RemediationResponse {
    pub fn new(manifests: Vec<ManifestReport>, evaluated_at: DateTime<Utc>) -> Self {
        Self {
            manifests,
            evaluated_at,
        }
    }

    /// Remediations keyed by manifest and position
    ///
    /// Manifests without any successful remediation are omitted.
    pub fn remediations(&self) -> RemediationResult {
        let mut result = RemediationResult::new();
        for report in &self.manifests {
            let remediated = report
                .remediated()
                .map(|(entry, component)| (entry.position, component.clone()))
                .collect();
            result.insert(report.manifest.clone(), remediated);
        }
        result
    }

    /// Total number of evaluated components
    pub fn component_count(&self) -> usize {
        self.manifests.iter().map(|m| m.entries.len()).sum()
    }

    pub fn remediated_count(&self) -> usize {
        self.manifests.iter().map(|m| m.remediated().count()).sum()
    }

    pub fn skipped_count(&self) -> usize {
        self.manifests.iter().map(|m| m.skipped().count()).sum()
    }
}
