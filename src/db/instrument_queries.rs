use sqlx::PgPool;

use crate::db::write_error;
use crate::errors::AppError;
use crate::models::Instrument;

const COLUMNS: &str = "id, isin, short_name, name, sustainable, responsible, \
                       sector_name, currency_code, country_code, esg";

pub async fn fetch_all(pool: &PgPool) -> Result<Vec<Instrument>, sqlx::Error> {
    sqlx::query_as::<_, Instrument>(&format!("SELECT {COLUMNS} FROM instruments ORDER BY isin"))
        .fetch_all(pool)
        .await
}

pub async fn fetch_by_isin(pool: &PgPool, isin: &str) -> Result<Option<Instrument>, sqlx::Error> {
    sqlx::query_as::<_, Instrument>(&format!("SELECT {COLUMNS} FROM instruments WHERE isin = $1"))
        .bind(isin)
        .fetch_optional(pool)
        .await
}

/// A duplicate ISIN rolls back as `Constraint`.
pub async fn insert(pool: &PgPool, instrument: &Instrument) -> Result<(), AppError> {
    let mut tx = pool.begin().await?;
    sqlx::query(
        "INSERT INTO instruments
             (id, isin, short_name, name, sustainable, responsible,
              sector_name, currency_code, country_code, esg)
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)",
    )
    .bind(instrument.id)
    .bind(&instrument.isin)
    .bind(&instrument.short_name)
    .bind(&instrument.name)
    .bind(instrument.sustainable)
    .bind(instrument.responsible)
    .bind(&instrument.sector_name)
    .bind(&instrument.currency_code)
    .bind(&instrument.country_code)
    .bind(&instrument.esg)
    .execute(&mut *tx)
    .await
    .map_err(write_error)?;
    tx.commit().await.map_err(write_error)?;
    Ok(())
}
