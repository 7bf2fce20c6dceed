use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use tower_http::cors::CorsLayer;

use crate::routes::{auth, health, ideas, instruments, portfolios, users};
use crate::state::AppState;

pub fn create_app(state: AppState) -> Router {
    let api = Router::new()
        .route("/", get(api_index))
        .merge(users::router())
        .merge(portfolios::router())
        .merge(ideas::router())
        .merge(instruments::router())
        .merge(auth::router());

    Router::<AppState>::new()
        .nest("/health", health::router())
        .nest("/api", api)
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn api_index(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "users": state.links.users(),
        "portfolios": state.links.portfolios(),
    }))
}
