use std::collections::HashMap;

use serde_json::{json, Value};
use tracing::{debug, info, warn};

use crate::config::AppConfig;
use crate::errors::{AgentError, AgentResult};
use crate::models::message::Message;
use crate::models::response::AgentResponse;
use crate::models::tool::{ToolCall, ToolSpec};
use crate::providers::base::{Completion, Provider};
use crate::providers::placeholder::PlaceholderProvider;
use crate::tools::Tool;

/// A conversational session. Owns its conversation log and tool registry
/// outright and drives the injected provider for each turn; nothing is shared
/// between sessions.
pub struct Agent {
    config: AppConfig,
    provider: Box<dyn Provider>,
    history: Vec<Message>,
    tools: HashMap<String, Box<dyn Tool>>,
}

impl Agent {
    /// Create an agent backed by the offline placeholder provider.
    pub fn new(config: AppConfig) -> Self {
        let provider = Box::new(PlaceholderProvider::new(config.agent.name.clone()));
        Self::with_provider(config, provider)
    }

    /// Create an agent with a specific provider implementation.
    pub fn with_provider(config: AppConfig, provider: Box<dyn Provider>) -> Self {
        info!(agent = %config.agent.name, model = %config.model.name, "initializing agent");
        Self {
            config,
            provider,
            history: Vec::new(),
            tools: HashMap::new(),
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Register a tool under its own reported name. Registering another tool
    /// with the same name replaces the first; the replacement is logged.
    pub fn register_tool(&mut self, tool: Box<dyn Tool>) {
        let name = tool.name().to_string();
        if self.tools.insert(name.clone(), tool).is_some() {
            warn!(tool = %name, "replacing previously registered tool");
        } else {
            info!(tool = %name, "registered tool");
        }
    }

    /// Names of the registered tools, sorted for stable output.
    pub fn tool_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.tools.keys().cloned().collect();
        names.sort();
        names
    }

    /// Specs for every registered tool, as handed to the provider.
    pub fn tool_specs(&self) -> Vec<ToolSpec> {
        self.tools.values().map(|tool| tool.spec()).collect()
    }

    /// Dispatch a single tool call to the registered tool that owns the name.
    pub fn call_tool(&self, call: &ToolCall) -> AgentResult<Value> {
        let tool = self
            .tools
            .get(&call.name)
            .ok_or_else(|| AgentError::ToolNotFound(call.name.clone()))?;
        Ok(tool.call(call.arguments.clone())?)
    }

    /// Run one turn: record the user message, ask the provider for the next
    /// assistant turn, record that too, and report the reply.
    ///
    /// If the provider fails, the just-appended user message is rolled back
    /// so the log only ever holds whole user/assistant pairs.
    pub async fn process(&mut self, input: &str) -> AgentResult<AgentResponse> {
        self.history.push(Message::user(input));
        debug!(input_len = input.len(), "processing input");

        let specs = self.tool_specs();
        let completion = match self
            .provider
            .generate(&self.history, &specs, &self.config.model)
            .await
        {
            Ok(completion) => completion,
            Err(err) => {
                self.history.pop();
                return Err(err);
            }
        };

        let Completion { text, tool_calls } = completion;
        self.history.push(Message::assistant(text.clone()));

        let mut metadata = HashMap::new();
        metadata.insert("model".to_string(), json!(self.config.model.name));
        metadata.insert("turn".to_string(), json!(self.history.len() / 2));

        let mut response = AgentResponse::new(text).with_metadata(metadata);
        if let Some(tool_calls) = tool_calls {
            response = response.with_tool_calls(tool_calls);
        }
        Ok(response)
    }

    /// Clear the conversation log. Idempotent.
    pub fn reset(&mut self) {
        self.history.clear();
        info!("conversation history cleared");
    }

    /// Snapshot of the conversation log. The caller owns the copy; mutating
    /// it cannot affect the session.
    pub fn history(&self) -> Vec<Message> {
        self.history.clone()
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;

    use super::*;
    use crate::config::{AgentConfig, ModelConfig};
    use crate::errors::ToolError;
    use crate::models::message::Role;
    use crate::providers::mock::MockProvider;

    fn test_config() -> AppConfig {
        AppConfig {
            api_key: "test_api_key".to_string(),
            model: ModelConfig::default(),
            agent: AgentConfig {
                name: "Test Agent".to_string(),
                debug: true,
                ..AgentConfig::default()
            },
        }
    }

    struct FailingProvider;

    #[async_trait]
    impl Provider for FailingProvider {
        async fn generate(
            &self,
            _history: &[Message],
            _tools: &[ToolSpec],
            _config: &ModelConfig,
        ) -> AgentResult<Completion> {
            Err(AgentError::Provider("upstream unavailable".to_string()))
        }
    }

    struct StaticTool {
        name: &'static str,
        description: &'static str,
    }

    impl Tool for StaticTool {
        fn name(&self) -> &str {
            self.name
        }

        fn description(&self) -> &str {
            self.description
        }

        fn parameters(&self) -> Value {
            json!({"type": "object", "properties": {}})
        }

        fn call(&self, _arguments: Value) -> Result<Value, ToolError> {
            Ok(json!({"description": self.description}))
        }
    }

    #[tokio::test]
    async fn process_appends_a_user_assistant_pair() {
        let mut agent = Agent::new(test_config());

        let response = agent.process("Hello, agent!").await.unwrap();
        assert!(response.message.contains("Test Agent"));

        let history = agent.history();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].role, Role::User);
        assert_eq!(history[0].content, "Hello, agent!");
        assert_eq!(history[1].role, Role::Assistant);
        assert_eq!(history[1].content, response.message);
    }

    #[tokio::test]
    async fn turn_counter_tracks_completed_pairs() {
        let mut agent = Agent::new(test_config());

        let first = agent.process("first").await.unwrap();
        let second = agent.process("second").await.unwrap();

        assert_eq!(first.turn(), Some(1));
        assert_eq!(second.turn(), Some(2));
        assert_eq!(agent.history().len(), 4);
    }

    #[tokio::test]
    async fn blank_input_is_accepted_and_recorded() {
        let mut agent = Agent::new(test_config());
        agent.process("").await.unwrap();
        assert_eq!(agent.history()[0].content, "");
    }

    #[tokio::test]
    async fn reset_clears_history_and_is_idempotent() {
        let mut agent = Agent::new(test_config());
        agent.process("hello").await.unwrap();
        assert_eq!(agent.history().len(), 2);

        agent.reset();
        assert!(agent.history().is_empty());
        agent.reset();
        assert!(agent.history().is_empty());
    }

    #[tokio::test]
    async fn history_returns_a_defensive_copy() {
        let mut agent = Agent::new(test_config());
        agent.process("hello").await.unwrap();

        let mut snapshot = agent.history();
        snapshot.clear();

        assert_eq!(agent.history().len(), 2);
    }

    #[tokio::test]
    async fn scripted_provider_replies_are_surfaced_in_order() {
        let provider = MockProvider::new(vec![
            Completion::text_only("first reply"),
            Completion {
                text: "second reply".to_string(),
                tool_calls: Some(vec![ToolCall::new("calculator", json!({}))]),
            },
        ]);
        let mut agent = Agent::with_provider(test_config(), Box::new(provider));

        let first = agent.process("one").await.unwrap();
        assert_eq!(first.message, "first reply");
        assert!(first.tool_calls.is_none());

        let second = agent.process("two").await.unwrap();
        assert_eq!(second.message, "second reply");
        assert_eq!(second.tool_calls.unwrap()[0].name, "calculator");
    }

    #[tokio::test]
    async fn provider_failure_rolls_back_the_user_message() {
        let mut agent = Agent::with_provider(test_config(), Box::new(FailingProvider));

        let err = agent.process("hello").await.unwrap_err();
        assert!(matches!(err, AgentError::Provider(_)));
        assert!(agent.history().is_empty());
    }

    #[test]
    fn duplicate_registration_keeps_the_newest_tool() {
        let mut agent = Agent::new(test_config());
        agent.register_tool(Box::new(StaticTool {
            name: "echo",
            description: "old",
        }));
        agent.register_tool(Box::new(StaticTool {
            name: "echo",
            description: "new",
        }));

        assert_eq!(agent.tool_names(), vec!["echo".to_string()]);
        assert_eq!(agent.tool_specs()[0].description, "new");
    }

    #[test]
    fn call_tool_dispatches_by_name() {
        let mut agent = Agent::new(test_config());
        agent.register_tool(Box::new(StaticTool {
            name: "echo",
            description: "static",
        }));

        let value = agent
            .call_tool(&ToolCall::new("echo", json!({})))
            .unwrap();
        assert_eq!(value, json!({"description": "static"}));

        let err = agent
            .call_tool(&ToolCall::new("missing", json!({})))
            .unwrap_err();
        assert!(matches!(err, AgentError::ToolNotFound(name) if name == "missing"));
    }
}
