use std::sync::Arc;

use sqlx::PgPool;

use crate::config::AppConfig;
use crate::links::Links;

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: Arc<AppConfig>,
    pub links: Links,
}
