use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::debug;

use crate::errors::ToolError;
use crate::tools::Tool;

const MIN_RESULTS: u32 = 1;
const MAX_RESULTS: u32 = 10;

fn default_max_results() -> u32 {
    5
}

/// Input record for the web search tool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WebSearchInput {
    /// The search query
    pub query: String,
    /// Maximum number of results, within 1..=10
    #[serde(default = "default_max_results")]
    pub max_results: u32,
}

impl WebSearchInput {
    /// Build a validated input record; an out-of-range `max_results` is
    /// rejected before any search runs.
    pub fn new<S: Into<String>>(query: S, max_results: u32) -> Result<Self, ToolError> {
        let input = Self {
            query: query.into(),
            max_results,
        };
        input.validate()?;
        Ok(input)
    }

    fn validate(&self) -> Result<(), ToolError> {
        if !(MIN_RESULTS..=MAX_RESULTS).contains(&self.max_results) {
            return Err(ToolError::OutOfRange {
                field: "max_results",
                value: i64::from(self.max_results),
                bound: "1..=10",
            });
        }
        Ok(())
    }
}

/// One search hit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    pub title: String,
    pub url: String,
    pub snippet: String,
}

/// Results for a query, truncated to the requested count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WebSearchOutput {
    pub results: Vec<SearchResult>,
    pub query: String,
}

/// Placeholder search backend: a deterministic, fixed-shape result list
/// derived from the query text. A real backend substituted here must keep
/// the input/output shapes and the `max_results` truncation.
#[derive(Debug, Default)]
pub struct WebSearchTool;

impl WebSearchTool {
    pub fn new() -> Self {
        Self
    }

    pub fn execute(&self, input: &WebSearchInput) -> Result<WebSearchOutput, ToolError> {
        input.validate()?;
        debug!(query = %input.query, max_results = input.max_results, "executing web search stub");

        let candidates = vec![
            SearchResult {
                title: format!("Result 1 for '{}'", input.query),
                url: "https://example.com/1".to_string(),
                snippet: "This is a placeholder search result.".to_string(),
            },
            SearchResult {
                title: format!("Result 2 for '{}'", input.query),
                url: "https://example.com/2".to_string(),
                snippet: "Another placeholder result.".to_string(),
            },
        ];

        Ok(WebSearchOutput {
            results: candidates
                .into_iter()
                .take(input.max_results as usize)
                .collect(),
            query: input.query.clone(),
        })
    }
}

impl Tool for WebSearchTool {
    fn name(&self) -> &str {
        "web_search"
    }

    fn description(&self) -> &str {
        "Searches the web for information"
    }

    fn parameters(&self) -> Value {
        json!({
            "type": "object",
            "required": ["query"],
            "properties": {
                "query": {
                    "type": "string",
                    "description": "The search query."
                },
                "max_results": {
                    "type": "integer",
                    "minimum": 1,
                    "maximum": 10,
                    "default": 5,
                    "description": "Maximum number of results."
                }
            }
        })
    }

    fn call(&self, arguments: Value) -> Result<Value, ToolError> {
        let input: WebSearchInput = serde_json::from_value(arguments)
            .map_err(|err| ToolError::InvalidArguments(err.to_string()))?;
        let output = self.execute(&input)?;
        Ok(json!({ "results": output.results, "query": output.query }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn results_have_the_fixed_shape() {
        let output = WebSearchTool::new()
            .execute(&WebSearchInput::new("test query", 5).unwrap())
            .unwrap();

        assert_eq!(output.query, "test query");
        assert!(!output.results.is_empty());
        assert!(output.results.len() <= 5);
        assert!(output.results[0].title.contains("test query"));
        assert!(output.results[0].url.starts_with("https://"));
        assert!(!output.results[0].snippet.is_empty());
    }

    #[test]
    fn truncates_to_max_results() {
        let output = WebSearchTool::new()
            .execute(&WebSearchInput::new("test", 1).unwrap())
            .unwrap();
        assert_eq!(output.results.len(), 1);
    }

    #[test]
    fn max_results_bounds_are_enforced_at_construction() {
        assert_eq!(
            WebSearchInput::new("test", 0).unwrap_err(),
            ToolError::OutOfRange {
                field: "max_results",
                value: 0,
                bound: "1..=10",
            }
        );
        assert!(WebSearchInput::new("test", 11).is_err());
        assert!(WebSearchInput::new("test", 10).is_ok());
    }

    #[test]
    fn call_applies_the_default_and_the_bounds() {
        let tool = WebSearchTool::new();

        let value = tool.call(json!({"query": "test"})).unwrap();
        assert_eq!(value["query"], "test");
        assert!(value["results"].as_array().unwrap().len() <= 5);

        let err = tool
            .call(json!({"query": "test", "max_results": 99}))
            .unwrap_err();
        assert!(matches!(err, ToolError::OutOfRange { field: "max_results", .. }));
    }
}
