/// Use cases module containing application business logic orchestration
mod handle_pull_request;
mod resolve_remediations;

pub use handle_pull_request::{HandlePullRequestUseCase, PullRequestOptions};
pub use resolve_remediations::{
    ResolveRemediationsUseCase, DEFAULT_MAX_CONCURRENT_EVALUATIONS, EVALUATION_STAGE,
};
