#![allow(clippy::unwrap_used, clippy::expect_used)]

//! Integration tests for the HTTP client against a mock JupyterHub.

use jupyterhub_provider::{EffectiveConfig, HttpJupyterHubClient};
use jupyterhub_sdk::{JupyterHubClient, JupyterHubError};
use secrecy::SecretString;
use serde_json::json;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn config(server: &MockServer, prefix: &str) -> EffectiveConfig {
    EffectiveConfig {
        protocol: "http".to_owned(),
        host: server.address().to_string(),
        prefix: prefix.to_owned(),
        token: Some(SecretString::from("test-token-123".to_owned())),
        username: None,
        password: None,
    }
}

fn alice() -> serde_json::Value {
    json!({
        "kind": "user",
        "name": "alice",
        "admin": true,
        "roles": ["user", "admin"],
        "groups": ["staff", "gpu"],
        "server": null,
        "pending": null,
        "last_activity": "2024-05-01T12:00:00.000000Z"
    })
}

#[tokio::test]
async fn get_user_sends_token_header() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/hub/api/users/alice"))
        .and(header("Authorization", "token test-token-123"))
        .and(header("Accept", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(alice()))
        .expect(1)
        .mount(&server)
        .await;

    let client = HttpJupyterHubClient::new(&config(&server, "/")).unwrap();
    let user = client.get_user("alice").await.unwrap();

    assert_eq!(user.name, "alice");
    assert!(user.admin);
    assert_eq!(user.roles, vec!["user", "admin"]);
    assert_eq!(user.groups, vec!["staff", "gpu"]);
}

#[tokio::test]
async fn get_user_uses_basic_auth_without_token() {
    let server = MockServer::start().await;

    // Basic auth header for admin:secret is "YWRtaW46c2VjcmV0"
    Mock::given(method("GET"))
        .and(path("/hub/api/users/alice"))
        .and(header("Authorization", "Basic YWRtaW46c2VjcmV0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(alice()))
        .expect(1)
        .mount(&server)
        .await;

    let cfg = EffectiveConfig {
        token: None,
        username: Some("admin".to_owned()),
        password: Some(SecretString::from("secret".to_owned())),
        ..config(&server, "/")
    };
    let client = HttpJupyterHubClient::new(&cfg).unwrap();

    assert!(client.get_user("alice").await.is_ok());
}

#[tokio::test]
async fn get_user_honours_prefix() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/jupyter/hub/api/users/alice"))
        .respond_with(ResponseTemplate::new(200).set_body_json(alice()))
        .expect(1)
        .mount(&server)
        .await;

    let client = HttpJupyterHubClient::new(&config(&server, "jupyter")).unwrap();

    assert!(client.get_user("alice").await.is_ok());
}

#[tokio::test]
async fn unknown_user_is_a_status_error_with_body() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/hub/api/users/ghost"))
        .respond_with(
            ResponseTemplate::new(404).set_body_string(r#"{"status": 404, "message": "Not Found"}"#),
        )
        .mount(&server)
        .await;

    let client = HttpJupyterHubClient::new(&config(&server, "/")).unwrap();
    let err = client.get_user("ghost").await.unwrap_err();

    assert!(matches!(err, JupyterHubError::Status { status: 404, .. }));
    assert_eq!(
        err.to_string(),
        r#"unexpected status 404: {"status": 404, "message": "Not Found"}"#
    );
}

#[tokio::test]
async fn forbidden_is_reported_as_status() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/hub/api/users/alice"))
        .respond_with(ResponseTemplate::new(403).set_body_string("Forbidden"))
        .mount(&server)
        .await;

    let client = HttpJupyterHubClient::new(&config(&server, "/")).unwrap();
    let err = client.get_user("alice").await.unwrap_err();

    assert!(matches!(err, JupyterHubError::Status { status: 403, ref body } if body == "Forbidden"));
}

#[tokio::test]
async fn malformed_body_is_a_decode_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/hub/api/users/alice"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "admin": "yes" })))
        .mount(&server)
        .await;

    let client = HttpJupyterHubClient::new(&config(&server, "/")).unwrap();
    let err = client.get_user("alice").await.unwrap_err();

    assert!(matches!(err, JupyterHubError::Decode(_)));
}

#[tokio::test]
async fn connection_refused_is_a_transport_error() {
    let server = MockServer::start().await;
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let closed = listener.local_addr().unwrap();
    drop(listener);

    let cfg = EffectiveConfig {
        host: closed.to_string(),
        ..config(&server, "/")
    };
    let client = HttpJupyterHubClient::new(&cfg).unwrap();
    let err = client.get_user("alice").await.unwrap_err();

    assert!(matches!(err, JupyterHubError::Transport(_)));
}

#[tokio::test]
async fn truncated_error_body_is_reported_not_dropped() {
    use tokio::io::{AsyncReadExt, AsyncWriteExt};

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut buf = [0u8; 4096];
        let _ = socket.read(&mut buf).await.unwrap();
        socket
            .write_all(b"HTTP/1.1 500 Internal Server Error\r\nContent-Length: 100\r\n\r\npartial")
            .await
            .unwrap();
    });

    let cfg = EffectiveConfig {
        protocol: "http".to_owned(),
        host: addr.to_string(),
        prefix: "/".to_owned(),
        token: Some(SecretString::from("test-token-123".to_owned())),
        username: None,
        password: None,
    };
    let client = HttpJupyterHubClient::new(&cfg).unwrap();
    let err = client.get_user("alice").await.unwrap_err();

    assert!(
        matches!(err, JupyterHubError::Status { status: 500, ref body } if body.starts_with("<unreadable body:")),
        "{err}"
    );
}
