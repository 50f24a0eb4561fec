use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::auth::verify_password;
use crate::backend::AppState;
use crate::database::db::queries;
use crate::database::models::User;
use crate::error::ApiError;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct LoginResponse {
    pub user: User,
    pub token: String,
}

fn invalid_credentials() -> ApiError {
    ApiError::Unauthorized("Invalid email or password".into())
}

pub async fn login(
    State(state): State<AppState>,
    body: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<LoginResponse>, ApiError> {
    let Json(request) = body?;
    let email = request.email.trim();
    if email.is_empty() || request.password.is_empty() {
        return Err(ApiError::Validation("Email and password are required".into()));
    }

    let user = queries::get_user_by_email(&state.db, email)
        .await?
        .ok_or_else(invalid_credentials)?;
    let Some(hash) = user.password.as_deref() else {
        tracing::warn!(user_id = user.id, "login attempt for user without a password");
        return Err(invalid_credentials());
    };
    if !verify_password(&request.password, hash).await? {
        tracing::info!(user_id = user.id, "login rejected");
        return Err(invalid_credentials());
    }

    let token = state.tokens.issue(&user)?;
    tracing::info!(user_id = user.id, "login succeeded");

    Ok(Json(LoginResponse { user, token }))
}
