use super::{Component, ManifestReference, PolicyIdentity, Position};
use std::collections::BTreeMap;

/// Kind of remediation offered by the policy engine
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RemediationType {
    /// Smallest version change that clears every policy violation
    NextNoViolations,
    /// Smallest version change that no longer fails the evaluated stage
    NextNonFailing,
    NextNoViolationsWithDependencies,
    NextNonFailingWithDependencies,
    /// Any tag this service does not interpret
    Other(String),
}

impl RemediationType {
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "next-no-violations" => RemediationType::NextNoViolations,
            "next-non-failing" => RemediationType::NextNonFailing,
            "next-no-violations-with-dependencies" => {
                RemediationType::NextNoViolationsWithDependencies
            }
            "next-non-failing-with-dependencies" => RemediationType::NextNonFailingWithDependencies,
            other => RemediationType::Other(other.to_string()),
        }
    }

    pub fn as_tag(&self) -> &str {
        match self {
            RemediationType::NextNoViolations => "next-no-violations",
            RemediationType::NextNonFailing => "next-non-failing",
            RemediationType::NextNoViolationsWithDependencies => {
                "next-no-violations-with-dependencies"
            }
            RemediationType::NextNonFailingWithDependencies => "next-non-failing-with-dependencies",
            RemediationType::Other(tag) => tag,
        }
    }
}

impl std::fmt::Display for RemediationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_tag())
    }
}

/// Component as described in a policy engine response
///
/// Either identity may be absent; the structured identity is preferred.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PolicyComponent {
    pub package_url: Option<String>,
    pub identity: Option<PolicyIdentity>,
}

/// One remediation option for an evaluated component
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemediationVariant {
    pub remediation_type: RemediationType,
    pub component: PolicyComponent,
}

impl RemediationVariant {
    pub fn new(remediation_type: RemediationType, component: PolicyComponent) -> Self {
        Self {
            remediation_type,
            component,
        }
    }
}

/// The policy engine's decision for one component
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RemediationDecision {
    variants: Vec<RemediationVariant>,
}

impl RemediationDecision {
    pub fn new(variants: Vec<RemediationVariant>) -> Self {
        Self { variants }
    }

    pub fn variants(&self) -> &[RemediationVariant] {
        &self.variants
    }

    /// First variant tagged with the given remediation type
    pub fn variant(&self, remediation_type: &RemediationType) -> Option<&RemediationVariant> {
        self.variants
            .iter()
            .find(|v| &v.remediation_type == remediation_type)
    }
}

/// Remediated components per manifest and position
///
/// A manifest is only present when it has at least one remediation; inserting
/// an empty set is a no-op.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RemediationResult {
    manifests: BTreeMap<ManifestReference, BTreeMap<Position, Component>>,
}

impl RemediationResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attaches a manifest's remediations; empty sets are dropped
    pub fn insert(
        &mut self,
        manifest: ManifestReference,
        remediated: BTreeMap<Position, Component>,
    ) {
        if !remediated.is_empty() {
            self.manifests.insert(manifest, remediated);
        }
    }

    pub fn get(&self, manifest: &ManifestReference) -> Option<&BTreeMap<Position, Component>> {
        self.manifests.get(manifest)
    }

    pub fn contains(&self, manifest: &ManifestReference) -> bool {
        self.manifests.contains_key(manifest)
    }

    pub fn iter(
        &self,
    ) -> impl Iterator<Item = (&ManifestReference, &BTreeMap<Position, Component>)> {
        self.manifests.iter()
    }

    /// Number of manifests with at least one remediation
    pub fn len(&self) -> usize {
        self.manifests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.manifests.is_empty()
    }

    /// Total number of remediated positions across all manifests
    pub fn remediation_count(&self) -> usize {
        self.manifests.values().map(BTreeMap::len).sum()
    }
}
