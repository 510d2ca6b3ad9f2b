//! Tool capabilities the agent can expose to a model.
use serde_json::Value;

use crate::errors::ToolError;
use crate::models::tool::ToolSpec;

pub mod calculator;
pub mod search;

/// A capability the agent can register: named, described, and callable with a
/// JSON argument record.
///
/// `call` must reject a malformed or out-of-range argument record before
/// doing any work, so an invalid invocation has no observable effect beyond
/// the returned error.
pub trait Tool: Send + Sync {
    /// Registry and dispatch name
    fn name(&self) -> &str;

    /// What the tool does, as shown to a model
    fn description(&self) -> &str;

    /// JSON schema for the argument record `call` accepts
    fn parameters(&self) -> Value;

    /// Validate the argument record and execute the tool
    fn call(&self, arguments: Value) -> Result<Value, ToolError>;

    /// The metadata presented to providers for this tool
    fn spec(&self) -> ToolSpec {
        ToolSpec::new(self.name(), self.description(), self.parameters())
    }
}
