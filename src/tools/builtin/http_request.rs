//! HTTP GET and POST builtins
//!
//! Both builtins go through one default `reqwest::Client`: default redirect
//! policy, no timeout, no custom headers. Either request is abandoned when the
//! caller's cancellation token fires.

use crate::tools::{decode_params, BuiltinFunc, ToolError};
use async_trait::async_trait;
use once_cell::sync::Lazy;
use reqwest::header::CONTENT_TYPE;
use reqwest::StatusCode;
use serde::Deserialize;
use std::future::Future;
use tokio_util::sync::CancellationToken;

static HTTP_CLIENT: Lazy<reqwest::Client> = Lazy::new(reqwest::Client::new);

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct GetParams {
    url: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct PostParams {
    url: String,
    content: String,
    #[serde(rename = "contentType")]
    content_type: String,
}

/// Race `request` against cancellation of `ctx`.
async fn cancellable<F>(
    ctx: &CancellationToken,
    url: &str,
    request: F,
) -> Result<String, ToolError>
where
    F: Future<Output = Result<String, ToolError>>,
{
    tokio::select! {
        _ = ctx.cancelled() => Err(ToolError::Cancelled { url: url.to_string() }),
        result = request => result,
    }
}

/// `sys.http.get`
pub struct SysHttpGet;

impl SysHttpGet {
    async fn download(url: &str) -> Result<String, ToolError> {
        let response = HTTP_CLIENT.get(url).send().await?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(ToolError::HttpStatus {
                action: "download",
                url: url.to_string(),
                status: status.to_string(),
            });
        }

        let body = response.bytes().await?;
        Ok(String::from_utf8_lossy(&body).into_owned())
    }
}

#[async_trait]
impl BuiltinFunc for SysHttpGet {
    async fn call(
        &self,
        ctx: &CancellationToken,
        _env: &[String],
        input: &str,
    ) -> Result<String, ToolError> {
        let params: GetParams = decode_params(input)?;

        tracing::debug!("http get {}", params.url);
        cancellable(ctx, &params.url, Self::download(&params.url)).await
    }
}

/// `sys.http.post`
pub struct SysHttpPost;

impl SysHttpPost {
    /// Success message for a completed post (pure function)
    fn format_post_message(bytes: usize, url: &str) -> String {
        format!("Wrote {bytes} to {url}")
    }

    async fn post(params: &PostParams) -> Result<String, ToolError> {
        let mut request = HTTP_CLIENT.post(&params.url).body(params.content.clone());
        if !params.content_type.is_empty() {
            request = request.header(CONTENT_TYPE, params.content_type.as_str());
        }

        let response = request.send().await?;
        let status = response.status();

        // Body is read and discarded.
        let _ = response.bytes().await;

        if status.as_u16() > 399 {
            return Err(ToolError::HttpStatus {
                action: "post",
                url: params.url.clone(),
                status: status.to_string(),
            });
        }

        Ok(Self::format_post_message(params.content.len(), &params.url))
    }
}

#[async_trait]
impl BuiltinFunc for SysHttpPost {
    async fn call(
        &self,
        ctx: &CancellationToken,
        _env: &[String],
        input: &str,
    ) -> Result<String, ToolError> {
        let params: PostParams = decode_params(input)?;

        tracing::debug!("http post {}", params.url);
        cancellable(ctx, &params.url, Self::post(&params)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_post_message() {
        assert_eq!(
            SysHttpPost::format_post_message(11, "http://localhost/x"),
            "Wrote 11 to http://localhost/x"
        );
    }

    #[test]
    fn test_post_params_use_camel_case_content_type() {
        let params: PostParams = serde_json::from_str(
            r#"{"url":"http://a","content":"c","contentType":"text/plain"}"#,
        )
        .unwrap();
        assert_eq!(params.content_type, "text/plain");

        let params: PostParams = serde_json::from_str(r#"{"url":"http://a"}"#).unwrap();
        assert_eq!(params.content, "");
        assert_eq!(params.content_type, "");
    }

    #[tokio::test]
    async fn test_get_rejects_malformed_json() {
        let result = SysHttpGet
            .call(&CancellationToken::new(), &[], "[1,")
            .await;
        assert!(matches!(result, Err(ToolError::Decode(_))));
    }

    #[tokio::test]
    async fn test_get_rejects_non_string_url() {
        let result = SysHttpGet
            .call(&CancellationToken::new(), &[], r#"{"url": 42}"#)
            .await;
        assert!(matches!(result, Err(ToolError::Decode(_))));
    }

    #[tokio::test]
    async fn test_get_with_invalid_url_is_http_error() {
        let result = SysHttpGet
            .call(&CancellationToken::new(), &[], r#"{"url": "not a url"}"#)
            .await;
        assert!(matches!(result, Err(ToolError::Http(_))));
    }

    #[tokio::test]
    async fn test_cancelled_token_short_circuits() {
        let ctx = CancellationToken::new();
        ctx.cancel();

        let result = cancellable(&ctx, "http://example.invalid", std::future::pending()).await;
        match result {
            Err(ToolError::Cancelled { url }) => assert_eq!(url, "http://example.invalid"),
            other => panic!("expected cancellation, got {other:?}"),
        }
    }
}
