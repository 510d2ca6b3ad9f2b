use async_trait::async_trait;
use tracing::debug;

use crate::config::ModelConfig;
use crate::errors::AgentResult;
use crate::models::message::Message;
use crate::models::tool::ToolSpec;
use crate::providers::base::{Completion, Provider};

/// Offline stand-in for a real model client. Deterministic: every call
/// returns the same templated reply regardless of the history, so sessions
/// can be exercised end to end before any API integration exists.
pub struct PlaceholderProvider {
    agent_name: String,
}

impl PlaceholderProvider {
    pub fn new<S: Into<String>>(agent_name: S) -> Self {
        Self {
            agent_name: agent_name.into(),
        }
    }
}

#[async_trait]
impl Provider for PlaceholderProvider {
    async fn generate(
        &self,
        history: &[Message],
        _tools: &[ToolSpec],
        config: &ModelConfig,
    ) -> AgentResult<Completion> {
        debug!(
            model = %config.name,
            history_len = history.len(),
            "generating placeholder reply"
        );

        Ok(Completion::text_only(format!(
            "This is a placeholder response from {}. Connect a real model client to replace it.",
            self.agent_name
        )))
    }
}
