//! HTTP transport tests against a local mock server.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use gatekey_application::AuthTransport;
use gatekey_domain::{AccessCredential, AuthError, ResourceRequest};
use gatekey_infrastructure::HttpAuthTransport;
use mockito::Matcher;
use pretty_assertions::assert_eq;
use serde_json::json;

fn transport(server: &mockito::ServerGuard) -> HttpAuthTransport {
    HttpAuthTransport::new(&server.url()).expect("transport")
}

#[tokio::test]
async fn login_posts_form_encoded_credentials() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/auth/token")
        .match_header("content-type", "application/x-www-form-urlencoded")
        .match_body(Matcher::AllOf(vec![
            Matcher::UrlEncoded("username".into(), "alice".into()),
            Matcher::UrlEncoded("password".into(), "secret".into()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"access_token": "abc", "token_type": "bearer"}"#)
        .create_async()
        .await;

    let grant = transport(&server)
        .login("alice", "secret")
        .await
        .expect("login");

    mock.assert_async().await;
    assert_eq!(grant.access_token, "abc");
    assert_eq!(grant.credential().authorization_header(), "Bearer abc");
}

#[tokio::test]
async fn rejected_login_maps_to_invalid_credentials() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/auth/token")
        .with_status(401)
        .with_body(r#"{"error": "invalid_grant", "error_description": "Bad password"}"#)
        .create_async()
        .await;

    let error = transport(&server).login("alice", "wrong").await.unwrap_err();

    assert_eq!(
        error,
        AuthError::InvalidCredentials {
            message: "Bad password".to_string(),
        }
    );
}

#[tokio::test]
async fn cookie_flow_refresh_sends_cookie_from_login() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/auth/token")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_header("set-cookie", "refresh=r1; Path=/; HttpOnly")
        .with_body(r#"{"access_token": "abc", "token_type": "bearer"}"#)
        .create_async()
        .await;
    let refresh_mock = server
        .mock("POST", "/auth/refresh")
        .match_header("cookie", Matcher::Regex("refresh=r1".to_string()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"access_token": "def", "token_type": "bearer"}"#)
        .create_async()
        .await;

    let transport = transport(&server);
    transport.login("alice", "secret").await.expect("login");
    let grant = transport.refresh(None).await.expect("refresh");

    refresh_mock.assert_async().await;
    assert_eq!(grant.access_token, "def");
}

#[tokio::test]
async fn stored_token_flow_refresh_posts_json_body() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/auth/refresh")
        .match_body(Matcher::Json(json!({"refresh_token": "r1"})))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"access_token": "def", "refresh_token": "r2"}"#)
        .create_async()
        .await;

    let grant = transport(&server).refresh(Some("r1")).await.expect("refresh");

    mock.assert_async().await;
    assert_eq!(grant.access_token, "def");
    assert_eq!(grant.refresh_token.as_deref(), Some("r2"));
}

#[tokio::test]
async fn refresh_rejection_maps_to_refresh_failed() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/auth/refresh")
        .with_status(401)
        .with_body("session revoked")
        .create_async()
        .await;

    let error = transport(&server).refresh(None).await.unwrap_err();

    assert_eq!(
        error,
        AuthError::RefreshFailed {
            message: "session revoked".to_string(),
        }
    );
}

#[tokio::test]
async fn exchange_posts_code_and_redirect_uri() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/auth/callback")
        .match_header("content-type", "application/json")
        .match_body(Matcher::Json(json!({
            "code": "xyz",
            "redirect_uri": "http://localhost:8000/auth",
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{
                "access_token": "abc",
                "id_token": "jwt",
                "user": {"sub": "u-1", "name": "Alice", "email": "alice@example.com"}
            }"#,
        )
        .create_async()
        .await;

    let grant = transport(&server)
        .exchange_code("xyz", "http://localhost:8000/auth")
        .await
        .expect("exchange");

    mock.assert_async().await;
    assert_eq!(grant.access_token, "abc");
    assert_eq!(grant.user.sub, "u-1");
}

#[tokio::test]
async fn exchange_rejection_surfaces_error_description() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/auth/callback")
        .with_status(400)
        .with_body(r#"{"error": "invalid_grant", "error_description": "Code already redeemed"}"#)
        .create_async()
        .await;

    let error = transport(&server)
        .exchange_code("xyz", "http://localhost:8000/auth")
        .await
        .unwrap_err();

    assert_eq!(
        error,
        AuthError::ExchangeFailed {
            message: "Code already redeemed".to_string(),
        }
    );
}

#[tokio::test]
async fn execute_attaches_bearer_header() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/blogs")
        .match_header("authorization", "Bearer abc")
        .with_status(200)
        .with_body(r#"[{"id": 1}]"#)
        .create_async()
        .await;

    let credential = AccessCredential::new("abc");
    let response = transport(&server)
        .execute(&ResourceRequest::get("/blogs"), Some(&credential))
        .await
        .expect("execute");

    mock.assert_async().await;
    assert_eq!(response.status, 200);
    assert_eq!(response.body, r#"[{"id": 1}]"#);
}

#[tokio::test]
async fn execute_returns_unauthorized_as_response_not_error() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/blogs")
        .with_status(401)
        .create_async()
        .await;

    let credential = AccessCredential::new("expired");
    let response = transport(&server)
        .execute(&ResourceRequest::get("/blogs"), Some(&credential))
        .await
        .expect("execute");

    assert!(response.is_unauthorized());
}

#[tokio::test]
async fn execute_posts_json_body() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/blogs")
        .match_header("content-type", "application/json")
        .match_body(Matcher::Json(json!({"title": "t"})))
        .with_status(201)
        .create_async()
        .await;

    let credential = AccessCredential::new("abc");
    let response = transport(&server)
        .execute(
            &ResourceRequest::post_json("/blogs", r#"{"title": "t"}"#),
            Some(&credential),
        )
        .await
        .expect("execute");

    mock.assert_async().await;
    assert_eq!(response.status, 201);
}

#[tokio::test]
async fn logout_failure_maps_to_transport_error() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/auth/logout")
        .with_status(500)
        .create_async()
        .await;

    let error = transport(&server).logout().await.unwrap_err();

    assert!(matches!(error, AuthError::Transport { .. }));
}

#[tokio::test]
async fn logout_success() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/auth/logout")
        .with_status(200)
        .create_async()
        .await;

    transport(&server).logout().await.expect("logout");

    mock.assert_async().await;
}
