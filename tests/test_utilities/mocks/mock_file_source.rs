use async_trait::async_trait;
use pr_remediator::prelude::*;

/// Mock PullRequestFileSource returning a fixed list of changed files
pub struct MockFileSource {
    pub files: Vec<ManifestReference>,
    pub should_fail: bool,
}

impl MockFileSource {
    pub fn new(files: Vec<ManifestReference>) -> Self {
        Self {
            files,
            should_fail: false,
        }
    }

    pub fn with_failure() -> Self {
        Self {
            files: Vec::new(),
            should_fail: true,
        }
    }
}

#[async_trait]
impl PullRequestFileSource for MockFileSource {
    async fn changed_files(
        &self,
        _event: &PullRequestEvent,
        _token: &str,
    ) -> Result<Vec<ManifestReference>> {
        if self.should_fail {
            anyhow::bail!("Mock source-control failure");
        }
        Ok(self.files.clone())
    }
}
