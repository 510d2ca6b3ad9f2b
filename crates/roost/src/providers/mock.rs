use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::config::ModelConfig;
use crate::errors::AgentResult;
use crate::models::message::Message;
use crate::models::tool::ToolSpec;
use crate::providers::base::{Completion, Provider};

/// A provider that returns pre-configured completions for testing
pub struct MockProvider {
    replies: Arc<Mutex<Vec<Completion>>>,
}

impl MockProvider {
    /// Create a new mock provider with a sequence of replies
    pub fn new(replies: Vec<Completion>) -> Self {
        Self {
            replies: Arc::new(Mutex::new(replies)),
        }
    }
}

#[async_trait]
impl Provider for MockProvider {
    async fn generate(
        &self,
        _history: &[Message],
        _tools: &[ToolSpec],
        _config: &ModelConfig,
    ) -> AgentResult<Completion> {
        let mut replies = self.replies.lock().unwrap();
        if replies.is_empty() {
            // Keep returning an empty reply once the script runs out
            Ok(Completion::text_only(""))
        } else {
            Ok(replies.remove(0))
        }
    }
}
