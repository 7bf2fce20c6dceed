use sqlx::PgPool;

use crate::db;
use crate::errors::AppError;
use crate::models::{Instrument, InstrumentPayload};

/// Ingests a provider payload; a duplicate ISIN surfaces as `Constraint`.
pub async fn ingest(pool: &PgPool, payload: InstrumentPayload) -> Result<Instrument, AppError> {
    let instrument = Instrument::from_payload(payload)?;
    db::instrument_queries::insert(pool, &instrument).await?;
    Ok(instrument)
}

pub async fn fetch_all(pool: &PgPool) -> Result<Vec<Instrument>, AppError> {
    let instruments = db::instrument_queries::fetch_all(pool).await?;
    Ok(instruments)
}

pub async fn fetch_by_isin(pool: &PgPool, isin: &str) -> Result<Instrument, AppError> {
    let instrument = db::instrument_queries::fetch_by_isin(pool, isin)
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(instrument)
}
