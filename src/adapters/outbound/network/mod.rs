mod caching_policy_evaluator;
mod github_client;
mod iq_client;

pub use caching_policy_evaluator::CachingPolicyEvaluator;
pub use github_client::GitHubClient;
pub use iq_client::{IqPolicyClient, PolicyCredentials};
