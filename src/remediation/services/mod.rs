mod remediation_extractor;

pub use remediation_extractor::{ExtractionError, RemediationExtractor};
