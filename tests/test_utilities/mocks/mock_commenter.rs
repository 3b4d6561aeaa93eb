use async_trait::async_trait;
use pr_remediator::prelude::*;
use std::sync::{Arc, Mutex};

/// Mock PullRequestCommenter recording posted comment bodies
#[derive(Clone, Default)]
pub struct MockCommenter {
    pub comments: Arc<Mutex<Vec<String>>>,
}

impl MockCommenter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn posted(&self) -> Vec<String> {
        self.comments.lock().unwrap().clone()
    }
}

#[async_trait]
impl PullRequestCommenter for MockCommenter {
    async fn post_comment(&self, _event: &PullRequestEvent, _token: &str, body: &str) -> Result<()> {
        self.comments.lock().unwrap().push(body.to_string());
        Ok(())
    }
}
