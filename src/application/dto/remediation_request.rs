use crate::remediation::domain::ManifestSet;

/// RemediationRequest - Input of the remediation pipeline
///
/// Carries the changed manifests with their declared components and the
/// policy application to evaluate them against.
#[derive(Debug, Clone)]
pub struct RemediationRequest {
    /// Public identifier of the policy application
    pub application: String,
    /// Changed manifests with the components they declare
    pub manifests: ManifestSet,
}

impl RemediationRequest {
    pub fn new(application: impl Into<String>, manifests: ManifestSet) -> Self {
        Self {
            application: application.into(),
            manifests,
        }
    }
}
