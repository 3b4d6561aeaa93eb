use crate::ports::outbound::PolicyEvaluator;
use crate::remediation::domain::{Component, RemediationDecision, Stage};
use crate::shared::Result;
use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::Arc;

/// Cache key for policy decisions
#[derive(Debug, Clone, Hash, Eq, PartialEq)]
struct CacheKey {
    package_url: String,
    stage: Stage,
    application: String,
}

impl CacheKey {
    fn new(component: &Component, stage: Stage, application: &str) -> Self {
        Self {
            package_url: component.to_package_url(),
            stage,
            application: application.to_string(),
        }
    }
}

/// CachingPolicyEvaluator wraps a PolicyEvaluator and memoizes its decisions.
///
/// Only successful evaluations are cached; a failed evaluation is retried the
/// next time the same component is requested. The cache lives as long as the
/// decorator, so one instance per webhook request keeps decisions from
/// leaking across policy configurations.
pub struct CachingPolicyEvaluator<E: PolicyEvaluator> {
    inner: E,
    cache: Arc<DashMap<CacheKey, RemediationDecision>>,
}

impl<E: PolicyEvaluator> CachingPolicyEvaluator<E> {
    pub fn new(inner: E) -> Self {
        Self {
            inner,
            cache: Arc::new(DashMap::new()),
        }
    }

    #[cfg(test)]
    pub fn cache_size(&self) -> usize {
        self.cache.len()
    }
}

#[async_trait]
impl<E: PolicyEvaluator> PolicyEvaluator for CachingPolicyEvaluator<E> {
    async fn evaluate(
        &self,
        component: &Component,
        stage: Stage,
        application: &str,
    ) -> Result<RemediationDecision> {
        let key = CacheKey::new(component, stage, application);

        if let Some(cached) = self.cache.get(&key) {
            tracing::debug!(component = %component, "policy decision served from cache");
            return Ok(cached.value().clone());
        }

        let decision = self.inner.evaluate(component, stage, application).await?;
        self.cache.insert(key, decision.clone());

        Ok(decision)
    }
}
