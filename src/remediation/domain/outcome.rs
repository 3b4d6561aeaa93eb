use super::{Component, ManifestReference, Position};

/// Why a component produced no remediation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// The policy engine could not evaluate the component
    EvaluationFailed(String),
    /// The decision offered no violation-free remediation
    NoRemediation,
    /// A remediation was offered but could not be turned into a component
    ExtractionFailed(String),
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SkipReason::EvaluationFailed(details) => write!(f, "evaluation failed: {}", details),
            SkipReason::NoRemediation => write!(f, "no violation-free remediation available"),
            SkipReason::ExtractionFailed(details) => {
                write!(f, "remediation could not be read: {}", details)
            }
        }
    }
}

/// Result of resolving one declared component
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ComponentOutcome {
    Remediated(Component),
    Skipped(SkipReason),
}

impl ComponentOutcome {
    pub fn remediation(&self) -> Option<&Component> {
        match self {
            ComponentOutcome::Remediated(component) => Some(component),
            ComponentOutcome::Skipped(_) => None,
        }
    }

    pub fn is_remediated(&self) -> bool {
        matches!(self, ComponentOutcome::Remediated(_))
    }
}

/// Outcome for one position of a manifest
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentReport {
    pub position: Position,
    /// Component as declared in the manifest
    pub component: Component,
    pub outcome: ComponentOutcome,
}

/// Outcomes for every component declared by one manifest, in position order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestReport {
    pub manifest: ManifestReference,
    pub entries: Vec<ComponentReport>,
}

impl ManifestReport {
    pub fn new(manifest: ManifestReference, entries: Vec<ComponentReport>) -> Self {
        Self { manifest, entries }
    }

    pub fn remediated(&self) -> impl Iterator<Item = (&ComponentReport, &Component)> {
        self.entries
            .iter()
            .filter_map(|entry| entry.outcome.remediation().map(|c| (entry, c)))
    }

    pub fn skipped(&self) -> impl Iterator<Item = (&ComponentReport, &SkipReason)> {
        self.entries.iter().filter_map(|entry| match &entry.outcome {
            ComponentOutcome::Skipped(reason) => Some((entry, reason)),
            ComponentOutcome::Remediated(_) => None,
        })
    }
}
