//! HTTP builtin integration tests
//!
//! Tests behavioral contracts against a local mock server:
//! - GET succeeds only on 200 and returns the body verbatim
//! - POST succeeds below 400 and reports the posted byte count
//! - Content-Type is sent only when given
//! - cancellation abandons an in-flight request

use std::time::{Duration, Instant};
use sysbuiltins::{invoke, RuntimeError, ToolError};
use tokio_util::sync::CancellationToken;
use wiremock::matchers::{body_string, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn get_args(url: &str) -> String {
    serde_json::json!({ "url": url }).to_string()
}

#[tokio::test]
async fn test_get_returns_body_on_200() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/doc.txt"))
        .respond_with(ResponseTemplate::new(200).set_body_string("document body"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let url = format!("{}/doc.txt", mock_server.uri());
    let result = invoke("sys.http.get", &CancellationToken::new(), &[], &get_args(&url))
        .await
        .unwrap();

    assert_eq!(result, "document body");
}

#[tokio::test]
async fn test_get_404_reports_url_and_status() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_string("nope"))
        .mount(&mock_server)
        .await;

    let url = format!("{}/missing", mock_server.uri());
    let err = invoke("sys.http.get", &CancellationToken::new(), &[], &get_args(&url))
        .await
        .unwrap_err();

    let message = err.to_string();
    assert!(message.contains(&url), "{message}");
    assert!(message.contains("404 Not Found"), "{message}");
    assert!(message.starts_with("failed to download"), "{message}");
}

#[tokio::test]
async fn test_get_non_200_success_status_is_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&mock_server)
        .await;

    let err = invoke(
        "sys.http.get",
        &CancellationToken::new(),
        &[],
        &get_args(&mock_server.uri()),
    )
    .await
    .unwrap_err();

    assert!(matches!(
        err,
        RuntimeError::Tool(ToolError::HttpStatus { .. })
    ));
}

#[tokio::test]
async fn test_get_follows_redirects() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/old"))
        .respond_with(
            ResponseTemplate::new(302)
                .insert_header("Location", format!("{}/new", mock_server.uri()).as_str()),
        )
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/new"))
        .respond_with(ResponseTemplate::new(200).set_body_string("moved here"))
        .mount(&mock_server)
        .await;

    let url = format!("{}/old", mock_server.uri());
    let result = invoke("sys.http.get", &CancellationToken::new(), &[], &get_args(&url))
        .await
        .unwrap();

    assert_eq!(result, "moved here");
}

#[tokio::test]
async fn test_get_connection_refused_is_network_error() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let url = format!("http://{}/", listener.local_addr().unwrap());
    drop(listener);

    let err = invoke("sys.http.get", &CancellationToken::new(), &[], &get_args(&url))
        .await
        .unwrap_err();

    assert!(matches!(err, RuntimeError::Tool(ToolError::Http(_))));
}

#[tokio::test]
async fn test_post_reports_byte_count_and_url() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/submit"))
        .and(header("content-type", "application/json"))
        .and(body_string(r#"{"k":"v"}"#))
        .respond_with(ResponseTemplate::new(200).set_body_string("ignored response"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let url = format!("{}/submit", mock_server.uri());
    let input = serde_json::json!({
        "url": url,
        "content": r#"{"k":"v"}"#,
        "contentType": "application/json"
    })
    .to_string();

    let result = invoke("sys.http.post", &CancellationToken::new(), &[], &input)
        .await
        .unwrap();

    assert_eq!(result, format!("Wrote 9 to {url}"));
    assert!(!result.contains("ignored response"));
}

#[tokio::test]
async fn test_post_counts_bytes_not_chars() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(201))
        .mount(&mock_server)
        .await;

    let input = serde_json::json!({ "url": mock_server.uri(), "content": "héllo" }).to_string();
    let result = invoke("sys.http.post", &CancellationToken::new(), &[], &input)
        .await
        .unwrap();

    assert!(result.starts_with("Wrote 6 to "), "{result}");
}

#[tokio::test]
async fn test_post_without_content_type_sends_no_header() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&mock_server)
        .await;

    let input = serde_json::json!({ "url": mock_server.uri(), "content": "plain" }).to_string();
    invoke("sys.http.post", &CancellationToken::new(), &[], &input)
        .await
        .unwrap();

    let requests = mock_server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert!(requests[0].headers.get("content-type").is_none());
    assert_eq!(requests[0].body, b"plain");
}

#[tokio::test]
async fn test_post_400_is_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(400))
        .mount(&mock_server)
        .await;

    let url = mock_server.uri();
    let input = serde_json::json!({ "url": url, "content": "x" }).to_string();
    let err = invoke("sys.http.post", &CancellationToken::new(), &[], &input)
        .await
        .unwrap_err();

    let message = err.to_string();
    assert!(message.starts_with("failed to post"), "{message}");
    assert!(message.contains(&url), "{message}");
    assert!(message.contains("400 Bad Request"), "{message}");
}

#[tokio::test]
async fn test_post_500_is_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let input = serde_json::json!({ "url": mock_server.uri(), "content": "x" }).to_string();
    let err = invoke("sys.http.post", &CancellationToken::new(), &[], &input)
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        RuntimeError::Tool(ToolError::HttpStatus { action: "post", .. })
    ));
}

#[tokio::test]
async fn test_post_invalid_content_type_is_request_error() {
    let input = serde_json::json!({
        "url": "http://127.0.0.1:9/",
        "content": "x",
        "contentType": "bad\nvalue"
    })
    .to_string();

    let err = invoke("sys.http.post", &CancellationToken::new(), &[], &input)
        .await
        .unwrap_err();

    assert!(matches!(err, RuntimeError::Tool(ToolError::Http(_))));
}

#[tokio::test]
async fn test_cancellation_abandons_slow_get() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("late")
                .set_delay(Duration::from_secs(30)),
        )
        .mount(&mock_server)
        .await;

    let ctx = CancellationToken::new();
    let cancel = ctx.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(100)).await;
        cancel.cancel();
    });

    let started = Instant::now();
    let err = invoke("sys.http.get", &ctx, &[], &get_args(&mock_server.uri()))
        .await
        .unwrap_err();

    assert!(matches!(err, RuntimeError::Tool(ToolError::Cancelled { .. })));
    assert!(started.elapsed() < Duration::from_secs(10));
}

#[tokio::test]
async fn test_cancellation_abandons_slow_post() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(30)))
        .mount(&mock_server)
        .await;

    let ctx = CancellationToken::new();
    ctx.cancel();

    let input = serde_json::json!({ "url": mock_server.uri(), "content": "x" }).to_string();
    let err = invoke("sys.http.post", &ctx, &[], &input)
        .await
        .unwrap_err();

    assert!(matches!(err, RuntimeError::Tool(ToolError::Cancelled { .. })));
}
