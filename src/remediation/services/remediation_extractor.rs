use crate::remediation::domain::{
    Component, RemediationDecision, RemediationType, RemediationVariant,
};
use thiserror::Error;

/// Reasons a remediation could not be taken from a policy decision
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractionError {
    /// The decision offers no variant of the requested type.
    /// Expected for components without a safe version.
    #[error("no remediation of type '{0}' offered")]
    NotFound(RemediationType),

    #[error("remediation of type '{0}' carries no component identity")]
    MissingIdentity(RemediationType),

    #[error("remediation identity is invalid: {0}")]
    InvalidIdentity(String),
}

/// RemediationExtractor service selecting remediations from policy decisions
///
/// Pure domain logic; performs no I/O.
pub struct RemediationExtractor;

impl RemediationExtractor {
    /// Selects the remediation that clears all policy violations
    ///
    /// # Errors
    /// Returns [`ExtractionError::NotFound`] when the decision has no
    /// `next-no-violations` variant, and an identity error when the variant
    /// cannot be converted into a [`Component`].
    pub fn select_no_violation_remediation(
        decision: &RemediationDecision,
    ) -> Result<Component, ExtractionError> {
        Self::select(decision, &RemediationType::NextNoViolations)
    }

    /// Selects the first remediation of the given type
    pub fn select(
        decision: &RemediationDecision,
        remediation_type: &RemediationType,
    ) -> Result<Component, ExtractionError> {
        let variant = decision
            .variant(remediation_type)
            .ok_or_else(|| ExtractionError::NotFound(remediation_type.clone()))?;

        Self::to_component(variant)
    }

    /// Converts a variant back into the local component model
    ///
    /// The structured identity wins; the package-URL is only consulted when
    /// no structured identity was returned.
    fn to_component(variant: &RemediationVariant) -> Result<Component, ExtractionError> {
        if let Some(identity) = &variant.component.identity {
            return Component::from_policy_identity(identity)
                .map_err(|e| ExtractionError::InvalidIdentity(e.to_string()));
        }

        match variant.component.package_url.as_deref() {
            Some(purl) if !purl.is_empty() => Component::from_package_url(purl)
                .map_err(|e| ExtractionError::InvalidIdentity(e.to_string())),
            _ => Err(ExtractionError::MissingIdentity(
                variant.remediation_type.clone(),
            )),
        }
    }
}
