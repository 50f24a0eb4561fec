mod common;

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;

use expense_tracker::auth::hash_password;
use expense_tracker::backend::{health, login, root, LoginRequest};
use expense_tracker::error::ApiError;

fn credentials(
    email: &str,
    password: &str,
) -> Result<Json<LoginRequest>, axum::extract::rejection::JsonRejection> {
    Ok(Json(LoginRequest {
        email: email.into(),
        password: password.into(),
    }))
}

#[tokio::test]
async fn login_issues_a_token_for_valid_credentials() {
    let state = common::test_state().await;
    let hash = hash_password("test_password", Some(4)).await.unwrap();
    let id = common::user(&state.db, "user@example.com", Some("User"), Some(&hash)).await;

    let Json(response) = login(State(state.clone()), credentials("user@example.com", "test_password"))
        .await
        .unwrap();
    assert_eq!(response.user.id, id);
    assert_eq!(response.user.role, "user");

    let claims = state.tokens.validate(&response.token).unwrap();
    assert_eq!(claims.user_id, id);
    assert_eq!(claims.email, "user@example.com");

    let body = serde_json::to_value(&response).unwrap();
    assert!(body["user"].get("password").is_none());
    assert_eq!(body["user"]["display_name"], "User");
}

#[tokio::test]
async fn wrong_password_and_unknown_email_look_the_same() {
    let state = common::test_state().await;
    let hash = hash_password("test_password", Some(4)).await.unwrap();
    common::user(&state.db, "user@example.com", None, Some(&hash)).await;

    let wrong = login(State(state.clone()), credentials("user@example.com", "nope"))
        .await
        .unwrap_err();
    let unknown = login(State(state), credentials("ghost@example.com", "test_password"))
        .await
        .unwrap_err();

    assert_eq!(wrong.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(wrong.to_string(), unknown.to_string());
}

#[tokio::test]
async fn user_without_password_cannot_log_in() {
    let state = common::test_state().await;
    common::user(&state.db, "sso@example.com", None, None).await;

    let result = login(State(state), credentials("sso@example.com", "anything")).await;
    assert!(matches!(result, Err(ApiError::Unauthorized(_))));
}

#[tokio::test]
async fn blank_credentials_are_rejected() {
    let state = common::test_state().await;
    let result = login(State(state), credentials(" ", "")).await;
    assert!(matches!(result, Err(ApiError::Validation(_))));
}

#[tokio::test]
async fn health_and_banner() {
    let Json(status) = health().await;
    assert_eq!(status.status, "healthy");
    assert_eq!(status.message, "API is running");
    assert!(chrono::DateTime::parse_from_rfc3339(&status.timestamp).is_ok());

    assert_eq!(root().await, "API is running. Use /api/v1/ for versioned endpoints.");
}
