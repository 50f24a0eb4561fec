//! Creates a user that can log in.
//!
//! Usage: create_user <email> <password> [display name] [role]

use anyhow::{bail, Context};
use dotenvy::dotenv;
use expense_tracker::auth::hash_password;
use expense_tracker::config::Config;
use expense_tracker::database::db::{connection, migrate, queries};
use expense_tracker::database::models::NewUser;
use expense_tracker::logging;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    logging::init_logging();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let (email, password) = match args.as_slice() {
        [email, password, ..] => (email.clone(), password.clone()),
        _ => bail!("usage: create_user <email> <password> [display name] [role]"),
    };

    let config = Config::from_env()?;
    let pool = connection::get_db_pool(&config.database_url, 1).await?;
    migrate::run_migrations(&pool).await?;

    if queries::get_user_by_email(&pool, &email).await?.is_some() {
        bail!("a user with email {email} already exists");
    }

    let password_hash = hash_password(&password, None)
        .await
        .context("failed to hash password")?;
    let user = NewUser {
        email,
        display_name: args.get(2).cloned(),
        password_hash,
        role: args.get(3).cloned().unwrap_or_else(|| "user".to_string()),
    };

    let id = queries::create_user(&pool, &user).await?;
    tracing::info!(user_id = id, email = %user.email, "user created");

    pool.close().await;
    Ok(())
}
