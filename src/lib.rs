//! pr-remediator - Policy-compliant dependency remediations for pull requests
//!
//! This library receives pull-request webhook events, finds the components
//! declared by changed dependency manifests, asks a policy engine for a
//! violation-free version of each, and reports the remediations back on the
//! pull request. It follows hexagonal architecture and Domain-Driven Design
//! principles.
//!
//! # Architecture
//!
//! - **Domain Layer** (`remediation`): Component identities, policy decisions
//!   and the pure logic that interprets them
//! - **Application Layer** (`application`): Use cases and DTOs
//! - **Ports** (`ports`): Interface definitions for infrastructure
//! - **Adapters** (`adapters`): Webhook endpoint, policy-engine and GitHub
//!   clients, manifest parsers and comment formatters
//! - **Shared** (`shared`): Error types, result alias and logging setup
//!
//! # Example
//!
//! ```no_run
//! use pr_remediator::prelude::*;
//! use std::time::Duration;
//!
//! # async fn run() -> Result<()> {
//! let component = Component::new("npm", "", "left-pad", "1.0.0")?;
//! let mut components = ManifestComponents::new();
//! components.insert(Position::new(0), component);
//!
//! let mut manifests = ManifestSet::new();
//! manifests.insert(ManifestReference::new("package.json", ""), components);
//!
//! let evaluator = IqPolicyClient::new(
//!     "https://iq.example.com",
//!     PolicyCredentials::new("admin", "admin123"),
//!     Duration::from_secs(30),
//! )?;
//!
//! let response = ResolveRemediationsUseCase::new(evaluator)
//!     .execute(RemediationRequest::new("my-app", manifests))
//!     .await?;
//!
//! for (manifest, remediations) in response.remediations().iter() {
//!     println!("{}: {} remediation(s)", manifest.filename, remediations.len());
//! }
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod application;
pub mod cli;
pub mod config;
pub mod ports;
pub mod remediation;
pub mod shared;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::adapters::inbound::webhook::{router, WebhookSettings, WebhookState};
    pub use crate::adapters::outbound::formatters::MarkdownFormatter;
    pub use crate::adapters::outbound::manifest::NpmManifestParser;
    pub use crate::adapters::outbound::network::{
        CachingPolicyEvaluator, GitHubClient, IqPolicyClient, PolicyCredentials,
    };
    pub use crate::application::dto::{
        PullRequestRemediationRequest, PullRequestSummary, RemediationRequest,
        RemediationResponse,
    };
    pub use crate::application::use_cases::{
        HandlePullRequestUseCase, PullRequestOptions, ResolveRemediationsUseCase,
    };
    pub use crate::ports::outbound::{
        ManifestParser, PolicyEvaluator, PullRequestCommenter, PullRequestFileSource,
        RemediationFormatter,
    };
    pub use crate::remediation::domain::{
        Component, ComponentOutcome, ComponentReport, ManifestComponents, ManifestReference,
        ManifestReport, ManifestSet, Position, PullRequestEvent, RemediationDecision,
        RemediationResult, RemediationType, SkipReason, Stage,
    };
    pub use crate::remediation::services::RemediationExtractor;
    pub use crate::shared::Result;
}
