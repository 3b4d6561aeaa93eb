/// Data Transfer Objects for application layer
///
/// DTOs are used to transfer data between the application layer
/// and adapters, keeping the domain layer isolated.
mod pull_request_request;
mod pull_request_summary;
mod remediation_request;
mod remediation_response;

pub use pull_request_request::PullRequestRemediationRequest;
pub use pull_request_summary::PullRequestSummary;
pub use remediation_request::RemediationRequest;
pub use remediation_response::RemediationResponse;
