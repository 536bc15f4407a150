use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use httpmock::prelude::*;
use pod_directory::server::oauth::GoogleAuth;
use pod_directory::{build_router, AppState, ServerConfig};
use std::path::Path;
use tempfile::TempDir;
use tower::ServiceExt;

fn test_config(pods_dir: &Path) -> ServerConfig {
    ServerConfig {
        port: 0,
        pods_dir: pods_dir.to_str().unwrap().to_string(),
        default_version: "v1".to_string(),
        google_client_id: "client-id".to_string(),
        google_client_secret: "client-secret".to_string(),
        allowed_domain: "ovo.com".to_string(),
        callback_url: Some("http://localhost:3000/auth/google/callback".to_string()),
        session_secret: "test-secret".to_string(),
        verbose: false,
    }
}

fn mocked_state(server: &MockServer, pods_dir: &Path) -> AppState {
    let config = test_config(pods_dir);
    let oauth = GoogleAuth::with_endpoints(
        &config,
        server.url("/o/oauth2/auth"),
        server.url("/token"),
        server.url("/userinfo"),
    );
    AppState::with_oauth(config, oauth)
}

/// Walk the login redirect and pull the state parameter out of the
/// authorization URL, the way a browser would carry it to Google.
async fn begin_login(state: &AppState) -> String {
    let response = build_router(state.clone())
        .oneshot(
            Request::builder()
                .uri("/auth/google")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert!(response.status().is_redirection());

    let location = response
        .headers()
        .get(header::LOCATION)
        .unwrap()
        .to_str()
        .unwrap();
    let url = url::Url::parse(location).unwrap();
    url.query_pairs()
        .find(|(key, _)| key == "state")
        .map(|(_, value)| value.into_owned())
        .unwrap()
}

#[tokio::test]
async fn test_full_login_flow_sets_session_cookie() {
    let root = TempDir::new().unwrap();
    let server = MockServer::start();

    server.mock(|when, then| {
        when.method(POST).path("/token");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!({
                "access_token": "tok-123",
                "token_type": "Bearer"
            }));
    });
    server.mock(|when, then| {
        when.method(GET)
            .path("/userinfo")
            .header("authorization", "Bearer tok-123");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!({
                "sub": "google-1",
                "email": "ada@ovo.com",
                "name": "Ada Lovelace",
                "picture": "https://example.com/ada.png"
            }));
    });

    let state = mocked_state(&server, root.path());
    let csrf = begin_login(&state).await;

    let response = build_router(state.clone())
        .oneshot(
            Request::builder()
                .uri(format!("/auth/google/callback?code=abc&state={}", csrf))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert!(response.status().is_redirection());
    assert_eq!(response.headers().get(header::LOCATION).unwrap(), "/");
    let cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    assert!(cookie.starts_with("pod_session="));
    assert!(cookie.contains("HttpOnly"));

    let session_pair = cookie.split(';').next().unwrap().to_string();
    let response = build_router(state)
        .oneshot(
            Request::builder()
                .uri("/auth/status")
                .header(header::COOKIE, session_pair)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(body.contains("\"authenticated\":true"));
    assert!(body.contains("Ada Lovelace"));
}

#[tokio::test]
async fn test_wrong_domain_is_rejected_without_session() {
    let root = TempDir::new().unwrap();
    let server = MockServer::start();

    server.mock(|when, then| {
        when.method(POST).path("/token");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!({"access_token": "tok-123"}));
    });
    server.mock(|when, then| {
        when.method(GET).path("/userinfo");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!({
                "sub": "google-2",
                "email": "mallory@other.com",
                "name": "Mallory"
            }));
    });

    let state = mocked_state(&server, root.path());
    let csrf = begin_login(&state).await;

    let response = build_router(state)
        .oneshot(
            Request::builder()
                .uri(format!("/auth/google/callback?code=abc&state={}", csrf))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert!(response.status().is_redirection());
    assert_eq!(
        response.headers().get(header::LOCATION).unwrap(),
        "/?error=auth_failed"
    );
    assert!(response.headers().get(header::SET_COOKIE).is_none());
}

#[tokio::test]
async fn test_callback_with_unknown_state_is_rejected() {
    let root = TempDir::new().unwrap();
    let server = MockServer::start();

    let state = mocked_state(&server, root.path());

    let response = build_router(state)
        .oneshot(
            Request::builder()
                .uri("/auth/google/callback?code=abc&state=never-issued")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(
        response.headers().get(header::LOCATION).unwrap(),
        "/?error=auth_failed"
    );
}

#[tokio::test]
async fn test_provider_error_redirects_to_failure() {
    let root = TempDir::new().unwrap();
    let server = MockServer::start();
    let state = mocked_state(&server, root.path());

    let response = build_router(state)
        .oneshot(
            Request::builder()
                .uri("/auth/google/callback?error=access_denied")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(
        response.headers().get(header::LOCATION).unwrap(),
        "/?error=auth_failed"
    );
}

#[tokio::test]
async fn test_login_unavailable_without_credentials() {
    let root = TempDir::new().unwrap();
    let mut config = test_config(root.path());
    config.google_client_id = String::new();
    config.google_client_secret = String::new();
    let state = AppState::new(config);

    let response = build_router(state)
        .oneshot(
            Request::builder()
                .uri("/auth/google")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
}
