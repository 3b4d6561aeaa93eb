use async_trait::async_trait;
use pr_remediator::prelude::*;
use pr_remediator::remediation::domain::{PolicyComponent, RemediationVariant};
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Mock PolicyEvaluator answering from a table keyed by package-URL
///
/// Components without an entry receive a decision with no variants.
pub struct MockPolicyEvaluator {
    pub decisions: HashMap<String, RemediationDecision>,
    pub failing: HashSet<String>,
    pub calls: Arc<AtomicUsize>,
}

impl MockPolicyEvaluator {
    pub fn new() -> Self {
        Self {
            decisions: HashMap::new(),
            failing: HashSet::new(),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Offers `to` as the violation-free remediation of `from`
    pub fn with_remediation(mut self, from: &Component, to: &Component) -> Self {
        self.decisions.insert(
            from.to_package_url(),
            RemediationDecision::new(vec![RemediationVariant::new(
                RemediationType::NextNoViolations,
                PolicyComponent {
                    package_url: Some(to.to_package_url()),
                    identity: None,
                },
            )]),
        );
        self
    }

    /// Offers only a remediation that still has violations
    pub fn with_non_failing_only(mut self, from: &Component, to: &Component) -> Self {
        self.decisions.insert(
            from.to_package_url(),
            RemediationDecision::new(vec![RemediationVariant::new(
                RemediationType::NextNonFailing,
                PolicyComponent {
                    package_url: Some(to.to_package_url()),
                    identity: None,
                },
            )]),
        );
        self
    }

    pub fn with_failure(mut self, component: &Component) -> Self {
        self.failing.insert(component.to_package_url());
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Default for MockPolicyEvaluator {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PolicyEvaluator for MockPolicyEvaluator {
    async fn evaluate(
        &self,
        component: &Component,
        _stage: Stage,
        _application: &str,
    ) -> Result<RemediationDecision> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        let purl = component.to_package_url();
        if self.failing.contains(&purl) {
            anyhow::bail!("Mock policy engine failure for {}", purl);
        }

        Ok(self.decisions.get(&purl).cloned().unwrap_or_default())
    }
}
