use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::tool::ToolCall;

/// One reply from the agent. Transient; the durable record of the exchange is
/// the conversation log itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentResponse {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_calls: Option<Vec<ToolCall>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<HashMap<String, Value>>,
}

impl AgentResponse {
    pub fn new<S: Into<String>>(message: S) -> Self {
        Self {
            message: message.into(),
            tool_calls: None,
            metadata: None,
        }
    }

    pub fn with_tool_calls(mut self, tool_calls: Vec<ToolCall>) -> Self {
        self.tool_calls = Some(tool_calls);
        self
    }

    pub fn with_metadata(mut self, metadata: HashMap<String, Value>) -> Self {
        self.metadata = Some(metadata);
        self
    }

    /// The turn counter from the metadata, if the provider path recorded one.
    pub fn turn(&self) -> Option<u64> {
        self.metadata
            .as_ref()
            .and_then(|metadata| metadata.get("turn"))
            .and_then(Value::as_u64)
    }
}
