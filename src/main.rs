// src/main.rs
use dotenvy::dotenv;
use expense_tracker::backend::{self, AppState};
use expense_tracker::config::Config;
use expense_tracker::database::db::{connection, migrate};
use expense_tracker::logging;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    logging::init_logging();

    let config = Config::from_env()?;
    tracing::info!("starting expense tracker API server");

    let pool = connection::get_db_pool(&config.database_url, config.max_connections).await?;
    migrate::run_migrations(&pool).await?;
    tracing::info!(database = %config.database_url, "database connection established");

    let state = AppState::new(pool, &config);
    backend::run_server(state, &config).await
}
