//! Integration tests for the admin API client using wiremock
//!
//! These tests verify request shape (paths, token header, JSON bodies) and
//! response handling (typed decoding, 404 mapping, error surfacing) against
//! mocked endpoints.

use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use warpgate_provider::client::targets::{SshAuth, TargetDataRequest, TargetOptions};
use warpgate_provider::client::tickets::TicketCreateRequest;
use warpgate_provider::client::users::UserCreateRequest;
use warpgate_provider::{Client, Error, ProviderConfig};

const API: &str = "/@warpgate/admin/api";

fn init_logging() {
    use tracing_subscriber::EnvFilter;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("warpgate_provider=error")),
        )
        .try_init();
}

fn client_for(server: &MockServer) -> Client {
    init_logging();
    ProviderConfig {
        host: Some(server.uri()),
        token: Some("test-token".to_string()),
        ..Default::default()
    }
    .client()
    .expect("client should build")
}

#[tokio::test]
async fn create_role_sends_token_and_body() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(format!("{API}/roles")))
        .and(header("X-Warpgate-Token", "test-token"))
        .and(body_json(json!({
            "name": "developers",
            "description": "Engineering team"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": "r-1",
            "name": "developers",
            "description": "Engineering team"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let role = client
        .create_role(&warpgate_provider::client::roles::RoleDataRequest {
            name: "developers".to_string(),
            description: "Engineering team".to_string(),
        })
        .await
        .expect("create should succeed");

    assert_eq!(role.id, "r-1");
    assert_eq!(role.name, "developers");
}

#[tokio::test]
async fn get_user_maps_404_to_none() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!("{API}/users/missing")))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let user = client.get_user("missing").await.expect("404 is not an error");
    assert!(user.is_none());
}

#[tokio::test]
async fn api_error_surfaces_status_and_body() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!("{API}/role/r-1")))
        .respond_with(ResponseTemplate::new(401).set_body_string("invalid token"))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client.get_role("r-1").await.unwrap_err();

    match &err {
        Error::Api { status, body } => {
            assert_eq!(*status, 401);
            assert_eq!(body, "invalid token");
        }
        other => panic!("expected Error::Api, got {other:?}"),
    }

    let message = err.to_string();
    assert!(message.contains("401"), "missing status in: {message}");
    assert!(message.contains("invalid token"), "missing body in: {message}");
}

#[tokio::test]
async fn api_error_with_multibyte_body_surfaces_intact() {
    let server = MockServer::start().await;

    // 'é' straddles the log-truncation limit; the error must still carry
    // the verbatim body
    let body = format!("{}état: épuisé", "x".repeat(199));

    Mock::given(method("GET"))
        .and(path(format!("{API}/role/r-1")))
        .respond_with(ResponseTemplate::new(500).set_body_string(body.clone()))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client.get_role("r-1").await.unwrap_err();

    match err {
        Error::Api { status, body: got } => {
            assert_eq!(status, 500);
            assert_eq!(got, body);
        }
        other => panic!("expected Error::Api, got {other:?}"),
    }
}

#[tokio::test]
async fn list_users_passes_search_filter() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!("{API}/users")))
        .and(query_param("search", "alice"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": "u-1", "username": "alice" }
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let users = client.list_users(Some("alice")).await.unwrap();
    assert_eq!(users.len(), 1);
    assert_eq!(users[0].username, "alice");
}

#[tokio::test]
async fn delete_role_accepts_no_content() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path(format!("{API}/role/r-1")))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    client.delete_role("r-1").await.expect("delete should succeed");
}

#[tokio::test]
async fn create_target_sends_tagged_options() {
    let server = MockServer::start().await;

    let options_json = json!({
        "kind": "Ssh",
        "host": "bastion.internal",
        "port": 22,
        "username": "admin",
        "allow_insecure_algos": false,
        "auth": { "kind": "Password", "password": "hunter2" }
    });

    Mock::given(method("POST"))
        .and(path(format!("{API}/targets")))
        .and(body_json(json!({
            "name": "bastion",
            "options": options_json
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": "t-1",
            "name": "bastion",
            "allow_roles": ["admins"],
            "options": options_json
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let target = client
        .create_target(&TargetDataRequest {
            name: "bastion".to_string(),
            description: String::new(),
            options: TargetOptions::Ssh(warpgate_provider::client::targets::SshOptions {
                host: "bastion.internal".to_string(),
                port: 22,
                username: "admin".to_string(),
                allow_insecure_algos: false,
                auth: SshAuth::Password {
                    password: "hunter2".to_string(),
                },
            }),
        })
        .await
        .expect("create should succeed");

    assert_eq!(target.id, "t-1");
    assert_eq!(target.allow_roles, vec!["admins".to_string()]);
    match target.options {
        TargetOptions::Ssh(ssh) => assert_eq!(ssh.host, "bastion.internal"),
        other => panic!("expected SSH options, got {other:?}"),
    }
}

#[tokio::test]
async fn decode_failure_is_an_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!("{API}/targets/t-1")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "t-1",
            "name": "mystery",
            "options": { "kind": "Redis", "host": "cache.internal" }
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client.get_target("t-1").await.unwrap_err();
    assert!(matches!(err, Error::Decode(_)), "got {err:?}");
}

#[tokio::test]
async fn create_user_and_ticket() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(format!("{API}/users")))
        .and(body_json(json!({ "username": "alice" })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": "u-1",
            "username": "alice"
        })))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path(format!("{API}/tickets")))
        .and(body_json(json!({
            "username": "alice",
            "target_name": "bastion",
            "number_of_uses": 3
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "ticket": {
                "id": "tk-1",
                "username": "alice",
                "target": "bastion",
                "uses_left": 3,
                "created": "2026-08-01T12:00:00Z"
            },
            "secret": "one-time-secret"
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);

    let user = client
        .create_user(&UserCreateRequest {
            username: "alice".to_string(),
            description: String::new(),
        })
        .await
        .unwrap();
    assert_eq!(user.id, "u-1");

    let issued = client
        .create_ticket(&TicketCreateRequest {
            username: "alice".to_string(),
            target_name: "bastion".to_string(),
            expiry: None,
            number_of_uses: Some(3),
            description: String::new(),
        })
        .await
        .unwrap();

    assert_eq!(issued.ticket.id, "tk-1");
    assert_eq!(issued.secret, "one-time-secret");
    assert_eq!(issued.ticket.uses_left, Some(3));
}

#[tokio::test]
async fn requests_without_token_omit_the_header() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!("{API}/roles")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let client = ProviderConfig {
        host: Some(server.uri()),
        ..Default::default()
    }
    .client()
    .unwrap();

    let roles = client.list_roles(None).await.unwrap();
    assert!(roles.is_empty());

    let requests = server.received_requests().await.unwrap();
    assert!(requests
        .iter()
        .all(|r| !r.headers.contains_key("X-Warpgate-Token")));
}
