pub mod component;
pub mod manifest;
pub mod outcome;
pub mod pull_request;
pub mod remediation;
pub mod stage;

pub use component::{Component, PolicyCoordinates, PolicyIdentity};
pub use manifest::{ManifestComponents, ManifestReference, ManifestSet, Position};
pub use outcome::{ComponentOutcome, ComponentReport, ManifestReport, SkipReason};
pub use pull_request::PullRequestEvent;
pub use remediation::{
    PolicyComponent, RemediationDecision, RemediationResult, RemediationType, RemediationVariant,
};
pub use stage::Stage;
