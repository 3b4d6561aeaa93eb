/// Mock implementations for testing
mod mock_commenter;
mod mock_file_source;
mod mock_policy_evaluator;

pub use mock_commenter::MockCommenter;
pub use mock_file_source::MockFileSource;
pub use mock_policy_evaluator::MockPolicyEvaluator;
