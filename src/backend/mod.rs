mod handlers;
mod routes;

use std::sync::Arc;

use axum::extract::Request;
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::routing::get;
use axum::Router;
use chrono::Duration;
use sqlx::{Pool, Sqlite};

use crate::auth::TokenIssuer;
use crate::config::Config;

pub use handlers::*;

#[derive(Clone)]
pub struct AppState {
    pub db: Pool<Sqlite>,
    pub tokens: Arc<TokenIssuer>,
}

impl AppState {
    pub fn new(db: Pool<Sqlite>, config: &Config) -> Self {
        AppState {
            db,
            tokens: Arc::new(TokenIssuer::new(
                &config.jwt_secret,
                Duration::hours(config.jwt_ttl_hours),
            )),
        }
    }
}

pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::root))
        .nest("/api/v1", routes::api_routes())
        .layer(middleware::from_fn(log_request))
        .with_state(state)
}

async fn log_request(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let response = next.run(request).await;
    tracing::info!(%method, %path, status = response.status().as_u16(), "request handled");
    response
}

/// Serves until Ctrl-C, then closes the pool.
pub async fn run_server(state: AppState, config: &Config) -> anyhow::Result<()> {
    let pool = state.db.clone();
    let app = app(state);

    let addr = config.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("shutting down, closing database pool");
    pool.close().await;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
    }
}
