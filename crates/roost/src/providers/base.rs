use async_trait::async_trait;

use crate::config::ModelConfig;
use crate::errors::AgentResult;
use crate::models::message::Message;
use crate::models::tool::{ToolCall, ToolSpec};

/// One generation from a provider: the assistant text plus any tool
/// invocations the model requested.
#[derive(Debug, Clone, PartialEq)]
pub struct Completion {
    pub text: String,
    pub tool_calls: Option<Vec<ToolCall>>,
}

impl Completion {
    /// A completion that carries only assistant text
    pub fn text_only<S: Into<String>>(text: S) -> Self {
        Self {
            text: text.into(),
            tool_calls: None,
        }
    }
}

/// The model-client capability the session is built against. Implementations
/// receive the full conversation log, the specs of every registered tool, and
/// the model parameters, and produce the next assistant turn.
#[async_trait]
pub trait Provider: Send + Sync {
    async fn generate(
        &self,
        history: &[Message],
        tools: &[ToolSpec],
        config: &ModelConfig,
    ) -> AgentResult<Completion>;
}
