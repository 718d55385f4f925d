//! File read and write builtins
//!
//! Paths are used verbatim. Confinement, size limits and permission policy
//! belong to the embedding engine.

use crate::tools::{decode_params, BuiltinFunc, ToolError};
use async_trait::async_trait;
use serde::Deserialize;
use tokio::io::AsyncWriteExt;
use tokio_util::sync::CancellationToken;

/// Mode for files created by `sys.write`, before umask.
pub const WRITE_MODE: u32 = 0o644;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ReadParams {
    filename: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct WriteParams {
    filename: String,
    content: String,
}

/// `sys.read`
pub struct SysRead;

#[async_trait]
impl BuiltinFunc for SysRead {
    async fn call(
        &self,
        _ctx: &CancellationToken,
        _env: &[String],
        input: &str,
    ) -> Result<String, ToolError> {
        let params: ReadParams = decode_params(input)?;

        tracing::debug!("Reading file {}", params.filename);
        let data = tokio::fs::read(&params.filename).await?;

        Ok(String::from_utf8_lossy(&data).into_owned())
    }
}

/// `sys.write`
pub struct SysWrite;

impl SysWrite {
    /// Trace line for a completed write (pure function)
    fn format_write_message(filename: &str, bytes: usize) -> String {
        format!("Wrote {bytes} bytes to file {filename}")
    }
}

#[async_trait]
impl BuiltinFunc for SysWrite {
    async fn call(
        &self,
        _ctx: &CancellationToken,
        _env: &[String],
        input: &str,
    ) -> Result<String, ToolError> {
        let params: WriteParams = decode_params(input)?;
        let data = params.content.as_bytes();

        tracing::debug!("{}", Self::format_write_message(&params.filename, data.len()));

        let mut options = tokio::fs::OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        options.mode(WRITE_MODE);

        let mut file = options.open(&params.filename).await?;
        file.write_all(data).await?;
        file.flush().await?;

        Ok(String::new())
    }
}
