use axum::extract::{Path, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use http::StatusCode;
use serde::Serialize;
use tracing::{error, info};

use crate::errors::AppError;
use crate::models::{Instrument, InstrumentPayload};
use crate::services::instrument_service;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/instruments", get(list_instruments))
        .route("/instrument", post(ingest_instrument))
        .route("/instrument/:isin", get(get_instrument))
}

#[derive(Debug, Serialize)]
pub struct InstrumentList {
    pub instruments: Vec<Instrument>,
}

pub async fn list_instruments(
    State(state): State<AppState>,
) -> Result<Json<InstrumentList>, AppError> {
    info!("GET /instruments - Listing instruments");
    let instruments = instrument_service::fetch_all(&state.pool).await.map_err(|e| {
        error!("Failed to fetch instruments: {}", e);
        e
    })?;
    Ok(Json(InstrumentList { instruments }))
}

pub async fn get_instrument(
    State(state): State<AppState>,
    Path(isin): Path<String>,
) -> Result<Json<Instrument>, AppError> {
    info!("GET /instrument/{} - Fetching instrument", isin);
    let instrument = instrument_service::fetch_by_isin(&state.pool, &isin)
        .await
        .map_err(|e| {
            error!("Failed to fetch instrument {}: {}", isin, e);
            e
        })?;
    Ok(Json(instrument))
}

pub async fn ingest_instrument(
    State(state): State<AppState>,
    Json(payload): Json<InstrumentPayload>,
) -> Result<(StatusCode, Json<Instrument>), AppError> {
    info!("POST /instrument - Ingesting instrument");
    let instrument = instrument_service::ingest(&state.pool, payload)
        .await
        .map_err(|e| {
            error!("Failed to ingest instrument: {}", e);
            e
        })?;
    Ok((StatusCode::CREATED, Json(instrument)))
}
