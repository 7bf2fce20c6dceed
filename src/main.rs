mod app;
mod auth;
mod config;
mod db;
mod errors;
mod links;
mod logging;
mod models;
mod routes;
mod services;
mod state;
mod validation;

use std::sync::Arc;

use sqlx::postgres::PgPoolOptions;
use tokio::net::TcpListener;

use crate::config::AppConfig;
use crate::links::Links;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    logging::init_logging(logging::LoggingConfig::from_env())?;

    let config = AppConfig::from_env()?;

    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(&config.database_url)
        .await?;
    sqlx::migrate!("./migrations").run(&pool).await?;

    let links = Links::new(&config.base_url);
    let addr = config.bind_addr;
    let state = AppState {
        pool,
        config: Arc::new(config),
        links,
    };
    let app = app::create_app(state);

    let listener = TcpListener::bind(&addr).await?;
    tracing::info!("🚀 Ideafolio backend running at http://{}/", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
