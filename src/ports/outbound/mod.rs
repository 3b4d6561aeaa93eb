/// Outbound ports (Driven ports) - Infrastructure interfaces
///
/// These ports define the interfaces that the application core uses
/// to interact with external systems (policy engine, source control, etc.).
pub mod manifest_parser;
pub mod policy_evaluator;
pub mod pull_request_commenter;
pub mod pull_request_source;
pub mod remediation_formatter;

pub use manifest_parser::ManifestParser;
pub use policy_evaluator::PolicyEvaluator;
pub use pull_request_commenter::PullRequestCommenter;
pub use pull_request_source::PullRequestFileSource;
pub use remediation_formatter::RemediationFormatter;
