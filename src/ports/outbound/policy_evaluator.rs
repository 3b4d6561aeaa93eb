use crate::remediation::domain::{Component, RemediationDecision, Stage};
use crate::shared::Result;
use async_trait::async_trait;

/// PolicyEvaluator port for the software-composition-analysis policy engine
///
/// This port abstracts the remote capability "evaluate a component, get its
/// remediation options". Implementations perform no retry and no caching
/// unless they are explicitly decorators for that purpose.
///
/// # Async Support
/// Implementations must be `Send + Sync` so evaluations can run on a bounded
/// pool of concurrent futures.
#[async_trait]
pub trait PolicyEvaluator: Send + Sync {
    /// Evaluates a component against the policy of an application
    ///
    /// # Arguments
    /// * `component` - Component to evaluate, identified by its package-URL
    /// * `stage` - Lifecycle stage whose policy applies
    /// * `application` - Public identifier of the policy application
    ///
    /// # Errors
    /// Returns an error if:
    /// - The network request fails or is rejected (including authentication)
    /// - The application is unknown to the policy engine
    /// - The response cannot be parsed
    async fn evaluate(
        &self,
        component: &Component,
        stage: Stage,
        application: &str,
    ) -> Result<RemediationDecision>;
}

#[async_trait]
impl<T: PolicyEvaluator + ?Sized> PolicyEvaluator for Box<T> {
    async fn evaluate(
        &self,
        component: &Component,
        stage: Stage,
        application: &str,
    ) -> Result<RemediationDecision> {
        (**self).evaluate(component, stage, application).await
    }
}
