//! Builtin tool system
//!
//! A builtin tool is a native handler registered under a fixed name. The
//! embedding engine resolves a tool through the [`registry`], then calls its
//! handler with a cancellation token, an environment list and a JSON
//! argument string.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{json, Map, Value};
use std::fmt;
use std::sync::Arc;
use thiserror::Error;
use tokio_util::sync::CancellationToken;

pub mod builtin;
pub mod registry;

pub use registry::{list_tools, lookup, tool_names, BUILTIN_MARKER};

/// Native implementation behind a builtin tool.
#[async_trait]
pub trait BuiltinFunc: Send + Sync {
    /// Decode `input` and perform the tool's single I/O operation.
    ///
    /// `env` is an ordered list of `KEY=VALUE` entries supplied by the caller.
    /// The current builtins ignore it.
    async fn call(
        &self,
        ctx: &CancellationToken,
        env: &[String],
        input: &str,
    ) -> Result<String, ToolError>;
}

/// Tool descriptor returned by [`lookup`] and [`list_tools`]
#[derive(Clone, Serialize)]
pub struct Tool {
    pub name: String,
    pub id: String,
    pub instructions: String,
    pub description: String,
    pub arguments: Value,
    #[serde(skip)]
    pub handler: Arc<dyn BuiltinFunc>,
}

impl Tool {
    /// Invoke the handler inside a `tool_execution` span.
    pub async fn call(
        &self,
        ctx: &CancellationToken,
        env: &[String],
        input: &str,
    ) -> Result<String, ToolError> {
        use tracing::Instrument;

        let span = crate::tool_span!(tool = %self.name);
        self.handler.call(ctx, env, input).instrument(span).await
    }

    /// Check a JSON argument string against the declared schema.
    ///
    /// Handlers never call this; missing fields decode as empty strings.
    pub fn validate_arguments(&self, input: &str) -> Result<(), ToolError> {
        let instance: Value = serde_json::from_str(input)?;
        let validator = jsonschema::validator_for(&self.arguments)
            .map_err(|e| ToolError::Schema(format!("Schema compilation error: {e}")))?;

        validator.validate(&instance).map_err(|errors| {
            let error_messages: Vec<String> = errors
                .map(|e| format!("At '{}': {}", e.instance_path, e))
                .collect();
            ToolError::Validation(error_messages.join("; "))
        })
    }
}

impl fmt::Debug for Tool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tool")
            .field("name", &self.name)
            .field("id", &self.id)
            .field("instructions", &self.instructions)
            .field("description", &self.description)
            .field("arguments", &self.arguments)
            .finish_non_exhaustive()
    }
}

/// Decode a builtin's argument string into its parameter struct.
///
/// The input must be a JSON object; arrays, scalars and `null` are decode
/// errors even when the target struct could be filled from them.
pub fn decode_params<T: DeserializeOwned>(input: &str) -> Result<T, ToolError> {
    let fields: Map<String, Value> = serde_json::from_str(input)?;
    Ok(serde_json::from_value(Value::Object(fields))?)
}

/// Build an object schema whose properties are all strings.
pub fn object_schema(properties: &[(&str, &str)], required: &[&str]) -> Value {
    let props: Map<String, Value> = properties
        .iter()
        .map(|(name, description)| {
            (
                name.to_string(),
                json!({
                    "type": "string",
                    "description": description
                }),
            )
        })
        .collect();

    json!({
        "type": "object",
        "properties": props,
        "required": required
    })
}

/// Builtin tool errors
#[derive(Debug, Error)]
pub enum ToolError {
    #[error("failed to decode arguments: {0}")]
    Decode(#[from] serde_json::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    #[error("failed to {action} {url}: {status}")]
    HttpStatus {
        action: &'static str,
        url: String,
        status: String,
    },
    #[error("ABORT: {0}")]
    Abort(String),
    #[error("request to {url} cancelled")]
    Cancelled { url: String },
    #[error("Parameter validation failed: {0}")]
    Validation(String),
    #[error("Schema error: {0}")]
    Schema(String),
}

impl ToolError {
    /// True when the error was raised by `sys.abort`.
    pub fn is_abort(&self) -> bool {
        matches!(self, ToolError::Abort(_))
    }
}
