#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{Method, Request, Response, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use helpdesk_api::auth::jwt::{generate_access_token, JwtConfig};
use helpdesk_api::config::ServerConfig;
use helpdesk_api::router::build_app;
use helpdesk_api::state::AppState;
use helpdesk_core::roles::{ROLE_ADMIN, ROLE_USER};
use helpdesk_db::models::user::{CreateUser, UserSummary};
use helpdesk_db::repositories::UserRepo;

/// A `ServerConfig` for tests: loopback, dev CORS origin, fixed JWT secret.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 30,
        db_max_connections: 5,
        jwt: JwtConfig {
            secret: "helpdesk-test-secret".to_string(),
            access_token_expiry_mins: 15,
            leeway_secs: 0,
        },
    }
}

/// The production router over a per-test database.
pub fn build_test_app(pool: PgPool) -> Router {
    build_app(AppState {
        pool,
        config: Arc::new(test_config()),
    })
}

// ---------------------------------------------------------------------------
// Accounts and tokens
// ---------------------------------------------------------------------------

/// Sign an access token the test app will accept.
pub fn token_for(role: &str, id: i64) -> String {
    generate_access_token(id, role, &test_config().jwt).expect("token generation should succeed")
}

pub fn admin_token(id: i64) -> String {
    token_for(ROLE_ADMIN, id)
}

pub fn user_token(id: i64) -> String {
    token_for(ROLE_USER, id)
}

/// Insert an account row directly and return its summary.
pub async fn seed_user(pool: &PgPool, username: &str, role: &str) -> UserSummary {
    let mut conn = pool.acquire().await.unwrap();
    UserRepo::create(
        &mut conn,
        &CreateUser {
            username: username.to_string(),
            full_name: format!("{username} (test)"),
            role: role.to_string(),
        },
    )
    .await
    .expect("user creation should succeed")
}

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

async fn send(app: Router, request: Request<Body>) -> Response<Body> {
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .header(AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn post_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json")
        .header(AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

pub async fn put_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response<Body> {
    let request = Request::builder()
        .method(Method::PUT)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json")
        .header(AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::DELETE)
        .uri(uri)
        .header(AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Create a ticket as `token` and return its id.
pub async fn create_ticket(app: Router, token: &str, category_id: i64, subject: &str) -> i64 {
    let body = serde_json::json!({
        "category_id": category_id,
        "subject": subject,
        "body": "Steps to reproduce attached",
    });
    let response = post_json_auth(app, "/api/v1/tickets", body, token).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["data"]["id"].as_i64().unwrap()
}

/// Append a log as `token` and return its id.
pub async fn create_log(app: Router, token: &str, ticket_id: i64, body: serde_json::Value) -> i64 {
    let uri = format!("/api/v1/tickets/{ticket_id}/logs");
    let response = post_json_auth(app, &uri, body, token).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["data"]["id"].as_i64().unwrap()
}
