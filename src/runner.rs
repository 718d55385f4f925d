//! The `run` path of the CLI: resolve, read arguments, optionally validate, call.

use crate::config::RuntimeConfig;
use crate::error::{RuntimeError, RuntimeResult};
use crate::tools::lookup;
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio_util::sync::CancellationToken;

/// Process exit status for a command result: 0 on success, 1 on any error.
pub fn exit_code<T>(result: &RuntimeResult<T>) -> i32 {
    match result {
        Ok(_) => 0,
        Err(_) => 1,
    }
}

/// Use `input` when given, otherwise read all of `reader`.
pub async fn read_input<R>(input: Option<String>, mut reader: R) -> RuntimeResult<String>
where
    R: AsyncRead + Unpin,
{
    if let Some(input) = input {
        return Ok(input);
    }

    let mut buffer = String::new();
    reader
        .read_to_string(&mut buffer)
        .await
        .map_err(|e| RuntimeError::invalid_input(format!("failed to read stdin: {e}")))?;
    Ok(buffer)
}

/// Invoke `name` with the environment built from `config` and `extra_env`.
///
/// With `strict`, arguments are checked against the tool's schema before the
/// handler runs.
pub async fn run_tool(
    config: &RuntimeConfig,
    name: &str,
    input: &str,
    extra_env: &[String],
    strict: bool,
    ctx: &CancellationToken,
) -> RuntimeResult<String> {
    let tool = lookup(name).ok_or_else(|| RuntimeError::UnknownTool(name.to_string()))?;

    if strict {
        tool.validate_arguments(input)?;
    }

    let env = config.handler_env(extra_env);
    Ok(tool.call(ctx, &env, input).await?)
}
