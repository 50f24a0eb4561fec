#![allow(dead_code)]

use expense_tracker::backend::AppState;
use expense_tracker::config::Config;
use expense_tracker::database::db::{connection, migrate, queries};
use sqlx::{Pool, Sqlite};

pub const TEST_SECRET: &str = "test-secret";

pub fn test_config() -> Config {
    Config {
        host: "127.0.0.1".into(),
        port: 0,
        database_url: "sqlite::memory:".into(),
        max_connections: 1,
        jwt_secret: TEST_SECRET.into(),
        jwt_ttl_hours: 1,
    }
}

/// Fresh in-memory database with the schema applied.
pub async fn test_state() -> AppState {
    let config = test_config();
    let pool = connection::get_db_pool(&config.database_url, config.max_connections)
        .await
        .expect("in-memory pool");
    migrate::run_migrations(&pool).await.expect("migrations");
    AppState::new(pool, &config)
}

pub async fn category(pool: &Pool<Sqlite>, name: &str) -> i64 {
    queries::create_category(pool, name).await.unwrap()
}

pub async fn subcategory(pool: &Pool<Sqlite>, category_id: i64, name: &str) -> i64 {
    queries::create_subcategory(pool, name, category_id).await.unwrap()
}

pub async fn user(pool: &Pool<Sqlite>, email: &str, display_name: Option<&str>, password_hash: Option<&str>) -> i64 {
    sqlx::query_scalar(
        "INSERT INTO users (email, display_name, password, role) VALUES (?, ?, ?, 'user') RETURNING id",
    )
    .bind(email)
    .bind(display_name)
    .bind(password_hash)
    .fetch_one(pool)
    .await
    .unwrap()
}

/// Inserts an expense with a fixed timestamp (`YYYY-MM-DD HH:MM:SS`).
pub async fn expense(
    pool: &Pool<Sqlite>,
    amount: f64,
    subcategory_id: i64,
    user_id: Option<i64>,
    note: Option<&str>,
    created_at: &str,
) -> i64 {
    sqlx::query_scalar(
        "INSERT INTO expenses (amount, subcategory_id, user_id, note, created_at) VALUES (?, ?, ?, ?, ?) RETURNING id",
    )
    .bind(amount)
    .bind(subcategory_id)
    .bind(user_id)
    .bind(note)
    .bind(created_at)
    .fetch_one(pool)
    .await
    .unwrap()
}
