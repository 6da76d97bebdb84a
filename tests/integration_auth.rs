mod common;

use axum::http::{StatusCode, header};
use chrono::{Duration, Utc};
use serde_json::json;

use bursar::bursar_auth::{issue_token, issue_token_at};
use bursar::bursar_config::JwtConfig;
use common::{
    authed_get, body_json, create_test_account, generate_unique_email, json_request, send,
    setup_test_app,
};

#[tokio::test]
async fn test_health() {
    let app = setup_test_app();
    let request = axum::http::Request::builder()
        .uri("/")
        .body(axum::body::Body::empty())
        .unwrap();

    let response = send(&app.router, request).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().contains_key("x-request-id"));
    assert_eq!(body_json(response).await, json!({ "health": "ok" }));
}

#[tokio::test]
async fn test_register_success() {
    let app = setup_test_app();

    let response = send(
        &app.router,
        json_request(
            "POST",
            "/api/v1/auth/register",
            &json!({
                "full_name": "Ada Lovelace",
                "email": "Ada@Example.com",
                "password": "analytical-engine"
            }),
        ),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);

    let body = body_json(response).await;
    let account = &body["data"];
    assert_eq!(account["email"], "ada@example.com");
    assert_eq!(account["full_name"], "Ada Lovelace");
    assert!(account["id"].as_i64().is_some());
    assert!(account.get("created_at").is_some());
    assert!(account.get("password_digest").is_none());
    assert!(!body.to_string().contains("$2"));
}

#[tokio::test]
async fn test_register_duplicate_email_ignores_case() {
    let app = setup_test_app();
    create_test_account(&app.store, "a@x.com", "whatever1").await;

    let response = send(
        &app.router,
        json_request(
            "POST",
            "/api/v1/auth/register",
            &json!({
                "full_name": "Second",
                "email": "A@x.com",
                "password": "password123"
            }),
        ),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
    let body = body_json(response).await;
    assert_eq!(body["error"]["code"], "USER_ALREADY_EXISTS");
}

#[tokio::test]
async fn test_register_missing_field() {
    let app = setup_test_app();

    let response = send(
        &app.router,
        json_request(
            "POST",
            "/api/v1/auth/register",
            &json!({ "full_name": "No Email", "password": "password123" }),
        ),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"]["code"], "BAD_REQUEST");
    assert_eq!(body["error"]["detail"], "email is required");
}

#[tokio::test]
async fn test_register_validation_error() {
    let app = setup_test_app();

    let response = send(
        &app.router,
        json_request(
            "POST",
            "/api/v1/auth/register",
            &json!({
                "full_name": "Short",
                "email": "not-an-email",
                "password": "short"
            }),
        ),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = body_json(response).await;
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_token_success_and_me() {
    let app = setup_test_app();
    let email = generate_unique_email();
    let account = create_test_account(&app.store, &email, "testpass123").await;

    let response = send(
        &app.router,
        json_request(
            "POST",
            "/api/v1/auth/token",
            &json!({ "email": email.to_uppercase(), "password": "testpass123" }),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    let token = body["data"]["access_token"].as_str().unwrap().to_string();
    assert_eq!(body["data"]["user"]["id"], account.id);
    assert!(body["data"]["user"].get("password_digest").is_none());

    let response = send(&app.router, authed_get("/api/v1/auth/me", &token)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["data"]["email"], email);
    assert_eq!(body["data"]["id"], account.id);
}

#[tokio::test]
async fn test_invalid_credentials_are_indistinguishable() {
    let app = setup_test_app();
    create_test_account(&app.store, "known@test.com", "rightpassword").await;

    let unknown = send(
        &app.router,
        json_request(
            "POST",
            "/api/v1/auth/token",
            &json!({ "email": "unknown@test.com", "password": "rightpassword" }),
        ),
    )
    .await;
    let wrong = send(
        &app.router,
        json_request(
            "POST",
            "/api/v1/auth/token",
            &json!({ "email": "known@test.com", "password": "wrongpassword" }),
        ),
    )
    .await;

    assert_eq!(unknown.status(), StatusCode::BAD_REQUEST);
    assert_eq!(wrong.status(), StatusCode::BAD_REQUEST);

    let unknown = body_json(unknown).await;
    let wrong = body_json(wrong).await;
    assert_eq!(unknown, wrong);
    assert_eq!(unknown["error"]["code"], "INVALID_USER_CREDS");
    assert_eq!(unknown["error"]["detail"], "Invalid username or password");
}

#[tokio::test]
async fn test_me_requires_token() {
    let app = setup_test_app();
    let request = axum::http::Request::builder()
        .uri("/api/v1/auth/me")
        .body(axum::body::Body::empty())
        .unwrap();

    let response = send(&app.router, request).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(response.headers()[header::WWW_AUTHENTICATE], "Bearer");
}

#[tokio::test]
async fn test_me_rejects_expired_token() {
    let app = setup_test_app();
    let account = create_test_account(&app.store, &generate_unique_email(), "pw12345678").await;

    let token = issue_token_at(account.id, Utc::now() - Duration::hours(2), &app.jwt_config).unwrap();

    let response = send(&app.router, authed_get("/api/v1/auth/me", &token)).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(response.headers()[header::WWW_AUTHENTICATE], "Bearer");
    let body = body_json(response).await;
    assert_eq!(body["error"]["code"], "UNAUTHENTICATED");
}

#[tokio::test]
async fn test_me_rejects_tampered_token() {
    let app = setup_test_app();
    let account = create_test_account(&app.store, &generate_unique_email(), "pw12345678").await;

    let forged = issue_token(account.id, &JwtConfig::new("some-other-secret", 30)).unwrap();
    let response = send(&app.router, authed_get("/api/v1/auth/me", &forged)).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = send(&app.router, authed_get("/api/v1/auth/me", "not.a.jwt")).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_me_rejects_token_for_missing_account() {
    let app = setup_test_app();
    let token = issue_token(999, &app.jwt_config).unwrap();

    let response = send(&app.router, authed_get("/api/v1/auth/me", &token)).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_concurrent_registrations_yield_one_account() {
    let app = setup_test_app();
    let body = json!({
        "full_name": "Racer",
        "email": "racer@test.com",
        "password": "password123"
    });

    let (first, second) = tokio::join!(
        send(&app.router, json_request("POST", "/api/v1/auth/register", &body)),
        send(&app.router, json_request("POST", "/api/v1/auth/register", &body)),
    );

    let mut statuses = vec![first.status().as_u16(), second.status().as_u16()];
    statuses.sort_unstable();
    assert_eq!(statuses, vec![201, 409]);
}
