//! HTTP-level integration tests for the ticket log endpoints.
//!
//! Covers status movement through the journal, author redaction for end
//! users and the protection of system-generated entries.

mod common;

use axum::http::StatusCode;
use common::{
    admin_token, body_json, create_log, create_ticket, delete_auth, get_auth, post_json_auth,
    put_json_auth, seed_user, user_token,
};
use helpdesk_core::roles::{ROLE_ADMIN, ROLE_USER};
use serde_json::json;
use sqlx::PgPool;

async fn ticket_status(app: axum::Router, ticket_id: i64) -> String {
    let response = get_auth(app, &format!("/api/v1/tickets/{ticket_id}"), &admin_token(1)).await;
    assert_eq!(response.status(), StatusCode::OK);
    body_json(response).await["data"]["status"]
        .as_str()
        .unwrap()
        .to_string()
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn end_to_end_status_flow(pool: PgPool) {
    let app = common::build_test_app(pool);
    let owner = user_token(7);
    let admin = admin_token(1);

    let ticket = create_ticket(app.clone(), &owner, 0, "VPN drops every hour").await;
    assert_eq!(ticket_status(app.clone(), ticket).await, "none");

    let staff_log = create_log(
        app.clone(),
        &admin,
        ticket,
        json!({ "status": "in_progress", "comment": "Investigating" }),
    )
    .await;
    assert_eq!(ticket_status(app.clone(), ticket).await, "in_progress");

    create_log(
        app.clone(),
        &owner,
        ticket,
        json!({ "comment": "Happened again at 10:00" }),
    )
    .await;

    // Removing the entry that set the status does not roll the status back.
    let response =
        delete_auth(app.clone(), &format!("/api/v1/ticket-logs/{staff_log}"), &owner).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert_eq!(ticket_status(app.clone(), ticket).await, "in_progress");

    let response = get_auth(
        app,
        &format!("/api/v1/tickets/{ticket}/logs/count"),
        &admin,
    )
    .await;
    assert_eq!(body_json(response).await["data"]["count"], 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn omitted_status_keeps_current_status(pool: PgPool) {
    let app = common::build_test_app(pool);
    let admin = admin_token(1);

    let ticket = create_ticket(app.clone(), &user_token(7), 0, "Question").await;
    create_log(app.clone(), &admin, ticket, json!({ "status": "resolved" })).await;
    create_log(app.clone(), &admin, ticket, json!({ "status": "", "comment": "FYI" })).await;

    assert_eq!(ticket_status(app.clone(), ticket).await, "resolved");

    let response = get_auth(app, &format!("/api/v1/tickets/{ticket}/logs"), &admin).await;
    let json = body_json(response).await;
    let logs = json["data"].as_array().unwrap();
    assert_eq!(logs.len(), 2);
    assert_eq!(logs[0]["comment"], "FYI");
    assert_eq!(logs[0]["status"], "resolved");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn closed_ticket_can_be_reopened(pool: PgPool) {
    let app = common::build_test_app(pool);
    let admin = admin_token(1);

    let ticket = create_ticket(app.clone(), &user_token(7), 0, "Flaky").await;
    create_log(app.clone(), &admin, ticket, json!({ "status": "closed" })).await;
    create_log(app.clone(), &admin, ticket, json!({ "status": "open" })).await;

    assert_eq!(ticket_status(app, ticket).await, "open");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn unknown_status_is_rejected(pool: PgPool) {
    let app = common::build_test_app(pool);

    let ticket = create_ticket(app.clone(), &user_token(7), 0, "Question").await;

    let response = post_json_auth(
        app.clone(),
        &format!("/api/v1/tickets/{ticket}/logs"),
        json!({ "status": "escalated" }),
        &admin_token(1),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(ticket_status(app, ticket).await, "none");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn non_positive_ticket_id_is_rejected(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = post_json_auth(
        app,
        "/api/v1/tickets/0/logs",
        json!({ "comment": "nowhere" }),
        &admin_token(1),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn end_user_cannot_log_on_foreign_ticket(pool: PgPool) {
    let app = common::build_test_app(pool);

    let ticket = create_ticket(app.clone(), &user_token(7), 0, "Mine").await;

    let response = post_json_auth(
        app.clone(),
        &format!("/api/v1/tickets/{ticket}/logs"),
        json!({ "status": "closed" }),
        &user_token(8),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = get_auth(
        app,
        &format!("/api/v1/tickets/{ticket}/logs"),
        &user_token(8),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn log_listing_redacts_authors_for_end_users(pool: PgPool) {
    let agent = seed_user(&pool, "agent", ROLE_ADMIN).await;
    let owner = seed_user(&pool, "bob", ROLE_USER).await;
    let app = common::build_test_app(pool);

    let ticket = create_ticket(app.clone(), &user_token(owner.id), 0, "Invoice").await;
    create_log(
        app.clone(),
        &admin_token(agent.id),
        ticket,
        json!({ "status": "open", "comment": "Checking with billing" }),
    )
    .await;
    create_log(
        app.clone(),
        &user_token(owner.id),
        ticket,
        json!({ "comment": "Thanks" }),
    )
    .await;

    let uri = format!("/api/v1/tickets/{ticket}/logs");

    let response = get_auth(app.clone(), &uri, &admin_token(agent.id)).await;
    let json = body_json(response).await;
    let logs = json["data"].as_array().unwrap();
    assert_eq!(logs[0]["user"]["username"], "bob");
    assert_eq!(logs[0]["user_id"], owner.id);
    assert!(logs[0]["admin"].is_null());
    assert_eq!(logs[1]["admin"]["username"], "agent");
    assert_eq!(logs[1]["admin_id"], agent.id);

    let response = get_auth(app, &uri, &user_token(owner.id)).await;
    let json = body_json(response).await;
    for log in json["data"].as_array().unwrap() {
        let log = log.as_object().unwrap();
        for key in ["admin_id", "user_id", "admin", "user"] {
            assert!(!log.contains_key(key), "{key} must be redacted");
        }
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn system_log_cannot_be_deleted(pool: PgPool) {
    let app = common::build_test_app(pool);
    let owner = user_token(7);
    let admin = admin_token(1);

    let ticket = create_ticket(app.clone(), &owner, 0, "Typo").await;
    let response = put_json_auth(
        app.clone(),
        &format!("/api/v1/tickets/{ticket}"),
        json!({ "subject": "Typo fixed" }),
        &owner,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = get_auth(app.clone(), &format!("/api/v1/tickets/{ticket}/logs"), &admin).await;
    let json = body_json(response).await;
    let system_log = json["data"][0]["id"].as_i64().unwrap();
    assert_eq!(json["data"][0]["is_readonly"], true);

    let response = delete_auth(
        app.clone(),
        &format!("/api/v1/ticket-logs/{system_log}"),
        &admin,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(body_json(response).await["code"], "CONFLICT");

    let response = get_auth(
        app,
        &format!("/api/v1/tickets/{ticket}/logs/count"),
        &admin,
    )
    .await;
    assert_eq!(body_json(response).await["data"]["count"], 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn ticket_owner_can_delete_staff_log(pool: PgPool) {
    let app = common::build_test_app(pool);
    let owner = user_token(7);
    let admin = admin_token(1);

    let ticket = create_ticket(app.clone(), &owner, 0, "Help").await;
    let staff_log = create_log(
        app.clone(),
        &admin,
        ticket,
        json!({ "status": "open", "comment": "Hello" }),
    )
    .await;

    let response = delete_auth(
        app.clone(),
        &format!("/api/v1/ticket-logs/{staff_log}"),
        &user_token(8),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response =
        delete_auth(app.clone(), &format!("/api/v1/ticket-logs/{staff_log}"), &owner).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = delete_auth(app, &format!("/api/v1/ticket-logs/{staff_log}"), &owner).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn ticket_owner_cannot_delete_system_log(pool: PgPool) {
    let app = common::build_test_app(pool);
    let owner = user_token(7);

    let ticket = create_ticket(app.clone(), &owner, 0, "Typo").await;
    let response = put_json_auth(
        app.clone(),
        &format!("/api/v1/tickets/{ticket}"),
        json!({ "subject": "Typo fixed" }),
        &owner,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = get_auth(app.clone(), &format!("/api/v1/tickets/{ticket}/logs"), &owner).await;
    let system_log = body_json(response).await["data"][0]["id"].as_i64().unwrap();

    let response = delete_auth(app, &format!("/api/v1/ticket-logs/{system_log}"), &owner).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}
