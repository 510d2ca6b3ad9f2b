use thiserror::Error;

/// Errors raised while loading or validating configuration.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("{var} environment variable is required. Set it in your environment or .env file.")]
    MissingEnvVar { var: &'static str },

    #[error("invalid value for {var}: {value:?}")]
    InvalidValue { var: &'static str, value: String },

    #[error("{field} out of range: {value} (expected {bound})")]
    OutOfRange {
        field: &'static str,
        value: String,
        bound: &'static str,
    },
}

/// Errors raised by a tool, either while validating its input record or while
/// executing it.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ToolError {
    #[error("invalid arguments: {0}")]
    InvalidArguments(String),

    #[error("{field} out of range: {value} (expected {bound})")]
    OutOfRange {
        field: &'static str,
        value: i64,
        bound: &'static str,
    },

    #[error("invalid operation: {found}. Must be one of: {allowed}")]
    UnknownOperation { found: String, allowed: String },

    #[error("division by zero is not allowed")]
    DivisionByZero,
}

#[non_exhaustive]
#[derive(Error, Debug)]
pub enum AgentError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Tool(#[from] ToolError),

    #[error("tool not found: {0}")]
    ToolNotFound(String),

    #[error("provider error: {0}")]
    Provider(String),
}

pub type AgentResult<T> = Result<T, AgentError>;
