use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter, EnumString};
use tracing::debug;

use crate::errors::ToolError;
use crate::tools::Tool;

/// Operations the calculator understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum Operation {
    Add,
    Subtract,
    Multiply,
    Divide,
}

fn allowed_operations() -> String {
    Operation::iter()
        .map(|operation| operation.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Input record for the calculator tool. The operation is kept as the raw
/// string so an unknown name surfaces as a domain error naming the allowed
/// set, not as a deserialization failure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculatorInput {
    /// The operation to perform: add, subtract, multiply, divide
    pub operation: String,
    /// First operand
    pub a: f64,
    /// Second operand
    pub b: f64,
}

/// Result of a calculator invocation, echoing the operation performed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculatorOutput {
    pub result: f64,
    pub operation: String,
}

/// Basic arithmetic over two operands. Pure and deterministic; the only
/// failure modes are an unknown operation and division by zero.
#[derive(Debug, Default)]
pub struct CalculatorTool;

impl CalculatorTool {
    pub fn new() -> Self {
        Self
    }

    pub fn execute(&self, input: &CalculatorInput) -> Result<CalculatorOutput, ToolError> {
        debug!(
            operation = %input.operation,
            a = input.a,
            b = input.b,
            "executing calculator"
        );

        let operation =
            Operation::from_str(&input.operation).map_err(|_| ToolError::UnknownOperation {
                found: input.operation.clone(),
                allowed: allowed_operations(),
            })?;

        let result = match operation {
            Operation::Add => input.a + input.b,
            Operation::Subtract => input.a - input.b,
            Operation::Multiply => input.a * input.b,
            Operation::Divide => {
                if input.b == 0.0 {
                    return Err(ToolError::DivisionByZero);
                }
                input.a / input.b
            }
        };

        Ok(CalculatorOutput {
            result,
            operation: input.operation.clone(),
        })
    }
}

impl Tool for CalculatorTool {
    fn name(&self) -> &str {
        "calculator"
    }

    fn description(&self) -> &str {
        "Performs basic arithmetic operations (add, subtract, multiply, divide)"
    }

    fn parameters(&self) -> Value {
        json!({
            "type": "object",
            "required": ["operation", "a", "b"],
            "properties": {
                "operation": {
                    "enum": ["add", "subtract", "multiply", "divide"],
                    "description": "The operation to perform."
                },
                "a": {
                    "type": "number",
                    "description": "First operand."
                },
                "b": {
                    "type": "number",
                    "description": "Second operand."
                }
            }
        })
    }

    fn call(&self, arguments: Value) -> Result<Value, ToolError> {
        let input: CalculatorInput = serde_json::from_value(arguments)
            .map_err(|err| ToolError::InvalidArguments(err.to_string()))?;
        let output = self.execute(&input)?;
        Ok(json!({ "result": output.result, "operation": output.operation }))
    }
}
