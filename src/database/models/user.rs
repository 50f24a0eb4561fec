use chrono::NaiveDateTime;
use serde::Serialize;
use sqlx::FromRow;

#[derive(FromRow, Debug, Clone, Serialize)]
pub struct User {
    pub id: i64,
    pub uid: Option<String>,
    pub email: String,
    pub display_name: Option<String>,
    pub created_at: NaiveDateTime,
    // bcrypt hash, never sent to clients
    #[serde(skip_serializing)]
    pub password: Option<String>,
    pub role: String,
}

#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub display_name: Option<String>,
    pub password_hash: String,
    pub role: String,
}
