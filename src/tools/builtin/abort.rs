//! Abort builtin

use crate::tools::{decode_params, BuiltinFunc, ToolError};
use async_trait::async_trait;
use serde::Deserialize;
use tokio_util::sync::CancellationToken;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct AbortParams {
    message: String,
}

/// `sys.abort`: fails with the caller's message, performs no I/O.
pub struct SysAbort;

#[async_trait]
impl BuiltinFunc for SysAbort {
    async fn call(
        &self,
        _ctx: &CancellationToken,
        _env: &[String],
        input: &str,
    ) -> Result<String, ToolError> {
        let params: AbortParams = decode_params(input)?;
        Err(ToolError::Abort(params.message))
    }
}
