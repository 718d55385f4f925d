//! Runtime-level error types
//!
//! [`ToolError`](crate::tools::ToolError) covers a single builtin call;
//! [`RuntimeError`] adds the failures around it (resolution, configuration).

use crate::tools::{lookup, ToolError};
use thiserror::Error;
use tokio_util::sync::CancellationToken;

/// Main error type for the builtin runner
#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    #[error("Configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),

    #[error(transparent)]
    Tool(#[from] ToolError),
}

impl RuntimeError {
    /// Create invalid input error
    pub fn invalid_input<S: Into<String>>(message: S) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    /// True when the failure came from `sys.abort`
    pub fn is_abort(&self) -> bool {
        matches!(self, RuntimeError::Tool(e) if e.is_abort())
    }
}

/// Result type for runtime operations
pub type RuntimeResult<T> = Result<T, RuntimeError>;

/// Resolve `name` and call it in one step.
pub async fn invoke(
    name: &str,
    ctx: &CancellationToken,
    env: &[String],
    input: &str,
) -> RuntimeResult<String> {
    let tool = lookup(name).ok_or_else(|| RuntimeError::UnknownTool(name.to_string()))?;
    Ok(tool.call(ctx, env, input).await?)
}
