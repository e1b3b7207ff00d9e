//! Request execution against a local mock server.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use apiprobe_application::{
    AuthContext, ExecuteRequest, HttpClientError, ProbeSettings, RequestFailure,
};
use apiprobe_domain::{HttpMethod, RequestOptions};
use apiprobe_infrastructure::{ReqwestHttpClient, load_settings_from};
use httpmock::MockServer;
use pretty_assertions::assert_eq;
use serde_json::json;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

fn executor(settings: ProbeSettings, auth: AuthContext) -> ExecuteRequest<ReqwestHttpClient> {
    let client = ReqwestHttpClient::from_settings(&settings).unwrap();
    ExecuteRequest::new(Arc::new(client), settings, auth)
}

fn settings_for(server: &MockServer) -> ProbeSettings {
    ProbeSettings::default().with_base_url(server.base_url())
}

/// Serves one response whose head and body are each held back.
async fn staggered_server(head_delay: Duration, body_delay: Duration) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut request = [0u8; 4096];
        let _ = socket.read(&mut request).await.unwrap();

        let body = br#"{"id":1}"#;
        let head = format!(
            "HTTP/1.1 200 OK\r\ncontent-type: application/json\r\ncontent-length: {}\r\n\r\n",
            body.len()
        );
        tokio::time::sleep(head_delay).await;
        socket.write_all(head.as_bytes()).await.unwrap();
        socket.flush().await.unwrap();

        tokio::time::sleep(body_delay).await;
        socket.write_all(body).await.unwrap();
        socket.flush().await.unwrap();
    });
    format!("http://{addr}")
}

#[tokio::test]
async fn sends_default_json_headers() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method("GET")
                .path("/products/1")
                .header("content-type", "application/json")
                .header("accept", "application/json")
                .header_missing("authorization");
            then.status(200)
                .header("content-type", "application/json")
                .body(r#"{"id":1,"title":"Essence Mascara Lash Princess"}"#);
        })
        .await;

    let exec = executor(settings_for(&server), AuthContext::new());
    let response = exec.get("/products/1").await.unwrap();

    mock.assert_async().await;
    assert_eq!(response.status(), 200);
    assert_eq!(response.field("id"), Some(&json!(1)));
    assert!(response.content_type().unwrap().starts_with("application/json"));
}

#[tokio::test]
async fn attaches_context_token_and_api_key() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method("GET")
                .path("/auth/me")
                .header("authorization", "Bearer ctx-token")
                .header("x-api-key", "reqres-free-v1");
            then.status(200).json_body(json!({"id": 1}));
        })
        .await;

    let settings = settings_for(&server).with_api_key("reqres-free-v1");
    let exec = executor(settings, AuthContext::seeded(Some("ctx-token".to_string())));
    exec.get("/auth/me").await.unwrap();

    mock.assert_async().await;
}

#[tokio::test]
async fn per_request_token_beats_context_token() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method("GET")
                .path("/auth/me")
                .header("authorization", "Bearer override");
            then.status(200).json_body(json!({}));
        })
        .await;

    let exec = executor(settings_for(&server), AuthContext::seeded(Some("ctx".to_string())));
    exec.execute(
        HttpMethod::Get,
        "/auth/me",
        RequestOptions::new().auth_token("override"),
    )
    .await
    .unwrap();

    mock.assert_async().await;
}

#[tokio::test]
async fn caller_headers_win() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method("POST")
                .path("/upload")
                .header("content-type", "text/plain")
                .header("x-api-key", "caller-key");
            then.status(201).json_body(json!({"ok": true}));
        })
        .await;

    let settings = settings_for(&server).with_api_key("settings-key");
    let exec = executor(settings, AuthContext::new());
    let options = RequestOptions::new()
        .body(json!("raw"))
        .header("Content-Type", "text/plain")
        .header("X-API-Key", "caller-key");
    let response = exec.execute(HttpMethod::Post, "/upload", options).await.unwrap();

    mock.assert_async().await;
    assert_eq!(response.status(), 201);
}

#[tokio::test]
async fn serializes_query_and_json_body() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method("POST")
                .path("/carts/add")
                .query_param("limit", "5")
                .query_param("q", "phone case")
                .json_body(json!({"userId": 1, "products": [{"id": 144, "quantity": 4}]}));
            then.status(201).json_body(json!({"id": 51, "userId": 1}));
        })
        .await;

    let exec = executor(settings_for(&server), AuthContext::new());
    let options = RequestOptions::new()
        .body(json!({"userId": 1, "products": [{"id": 144, "quantity": 4}]}))
        .query("limit", 5)
        .query("q", "phone case");
    let response = exec
        .execute(HttpMethod::Post, "/carts/add", options)
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(response.field("id"), Some(&json!(51)));
}

#[tokio::test]
async fn null_body_is_sent_literally() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method("PUT").path("/posts/1").body("null");
            then.status(200).json_body(json!({"id": 1}));
        })
        .await;

    let exec = executor(settings_for(&server), AuthContext::new());
    exec.execute(
        HttpMethod::Put,
        "/posts/1",
        RequestOptions::new().body(serde_json::Value::Null),
    )
    .await
    .unwrap();

    mock.assert_async().await;
}

#[tokio::test]
async fn strict_mode_reports_status_with_response() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method("GET").path("/products/99999");
            then.status(404)
                .json_body(json!({"message": "Product with id '99999' not found"}));
        })
        .await;

    let exec = executor(settings_for(&server), AuthContext::new());
    let err = exec.get("/products/99999").await.unwrap_err();

    assert_eq!(err.status(), Some(404));
    assert!(err.to_string().contains("404"));
    let body = err.response().unwrap().field("message").unwrap().clone();
    assert_eq!(body, json!("Product with id '99999' not found"));
}

#[tokio::test]
async fn lenient_mode_returns_error_responses() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method("POST").path("/login");
            then.status(400).json_body(json!({"error": "Missing password"}));
        })
        .await;

    let exec = executor(settings_for(&server), AuthContext::new());
    let response = exec
        .execute(
            HttpMethod::Post,
            "/login",
            RequestOptions::new()
                .body(json!({"email": "peter@klaven"}))
                .allow_error_status(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), 400);
    assert_eq!(response.field("error"), Some(&json!("Missing password")));
}

#[tokio::test]
async fn slow_server_times_out() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method("GET").path("/slow");
            then.status(200)
                .json_body(json!({}))
                .delay(Duration::from_millis(1500));
        })
        .await;

    let settings = settings_for(&server).with_timeout(Duration::from_millis(200));
    let exec = executor(settings, AuthContext::new());
    let err = exec.get("/slow").await.unwrap_err();

    assert!(err.is_timeout(), "expected timeout, got {err}");
    assert!(matches!(
        err,
        RequestFailure::Transport(HttpClientError::Timeout { timeout_ms: 200 })
    ));
}

#[tokio::test]
async fn each_phase_gets_its_own_ceiling() {
    let delay = Duration::from_millis(350);
    let base_url = staggered_server(delay, delay).await;
    let settings = ProbeSettings::default()
        .with_base_url(base_url)
        .with_timeout(Duration::from_millis(500));
    let exec = executor(settings, AuthContext::new());

    let response = exec.get("/products/1").await.unwrap();

    assert_eq!(response.status(), 200);
    assert_eq!(response.field("id"), Some(&json!(1)));
    assert!(response.duration() >= Duration::from_millis(700));
}

#[tokio::test]
async fn stalled_body_times_out() {
    let base_url = staggered_server(Duration::ZERO, Duration::from_millis(1500)).await;
    let settings = ProbeSettings::default()
        .with_base_url(base_url)
        .with_timeout(Duration::from_millis(300));
    let exec = executor(settings, AuthContext::new());

    let err = exec.get("/products/1").await.unwrap_err();

    assert!(err.is_timeout(), "expected timeout, got {err}");
}

#[tokio::test]
async fn configured_secrets_reach_the_wire_unchanged() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method("GET")
                .path("/auth/me")
                .header("x-api-key", "007")
                .header("authorization", "Bearer 1e3");
            then.status(200).json_body(json!({"id": 1}));
        })
        .await;

    let settings = load_settings_from(HashMap::from([
        ("API_BASE_URL".to_string(), server.base_url()),
        ("API_KEY".to_string(), "007".to_string()),
        ("AUTH_TOKEN".to_string(), "1e3".to_string()),
    ]))
    .unwrap();
    let auth = AuthContext::seeded(settings.auth_token().map(str::to_string));
    let exec = executor(settings, auth);

    exec.get("/auth/me").await.unwrap();

    mock.assert_async().await;
}

#[tokio::test]
async fn absolute_url_bypasses_base() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method("GET").path("/todos/1");
            then.status(200).json_body(json!({"id": 1, "completed": false}));
        })
        .await;

    let settings = ProbeSettings::default().with_base_url("http://127.0.0.1:1/unused");
    let exec = executor(settings, AuthContext::new());
    exec.get(server.url("/todos/1")).await.unwrap();

    mock.assert_async().await;
}

#[tokio::test]
async fn unreachable_host_is_a_transport_error() {
    let settings = ProbeSettings::default()
        .with_base_url("http://127.0.0.1:1")
        .with_timeout(Duration::from_secs(2));
    let exec = executor(settings, AuthContext::new());

    let err = exec.get("/anything").await.unwrap_err();
    match err {
        RequestFailure::Transport(
            HttpClientError::ConnectionRefused { .. }
            | HttpClientError::ConnectionFailed(_)
            | HttpClientError::Other(_),
        ) => {}
        other => panic!("unexpected error: {other:?}"),
    }
}
