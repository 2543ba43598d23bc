use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use casotto_catalog::{Duration, Price, Umbrella};
use casotto_core::request::{NewUmbrellaRequest, SlotQuery};
use chrono::NaiveDate;
use serde::Serialize;
use uuid::Uuid;

use crate::error::AppError;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct OccupancyResponse {
    pub umbrella_id: Uuid,
    pub date: NaiveDate,
    pub duration: Duration,
    pub occupied: bool,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/v1/umbrellas", get(list_umbrellas).post(create_umbrella))
        .route("/v1/umbrellas/free", get(free_umbrellas))
        .route("/v1/umbrellas/{id}/price", get(umbrella_price))
        .route("/v1/umbrellas/{id}/occupied", get(umbrella_occupied))
        .route("/v1/umbrellas/{id}/prices/{price_id}", post(associate_price))
}

/// GET /v1/umbrellas
async fn list_umbrellas(State(state): State<AppState>) -> Result<Json<Vec<Umbrella>>, AppError> {
    Ok(Json(state.beach.all_umbrellas().await?))
}

/// POST /v1/umbrellas
async fn create_umbrella(
    State(state): State<AppState>,
    Json(req): Json<NewUmbrellaRequest>,
) -> Result<(StatusCode, Json<Umbrella>), AppError> {
    let (capacity, row) = req.require("add_umbrella")?;
    let umbrella = state.beach.add_umbrella(capacity, row).await?;
    Ok((StatusCode::CREATED, Json(umbrella)))
}

/// GET /v1/umbrellas/free?date=&duration=
async fn free_umbrellas(
    State(state): State<AppState>,
    Query(query): Query<SlotQuery>,
) -> Result<Json<Vec<Umbrella>>, AppError> {
    let (date, duration) = query.require("free_umbrellas")?;
    Ok(Json(state.beach.free_umbrellas(date, duration).await?))
}

/// GET /v1/umbrellas/{id}/price?date=&duration=
async fn umbrella_price(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(query): Query<SlotQuery>,
) -> Result<Json<Price>, AppError> {
    let (date, duration) = query.require("umbrella_price")?;
    state.beach.umbrella(id).await?;

    state
        .beach
        .umbrella_price(id, date, duration)
        .await?
        .map(Json)
        .ok_or_else(|| {
            AppError::NotFoundError(format!(
                "no price for umbrella {} on {} ({})",
                id, date, duration
            ))
        })
}

/// GET /v1/umbrellas/{id}/occupied?date=&duration=
async fn umbrella_occupied(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(query): Query<SlotQuery>,
) -> Result<Json<OccupancyResponse>, AppError> {
    let (date, duration) = query.require("is_occupied")?;
    state.beach.umbrella(id).await?;

    let occupied = state.beach.is_occupied(id, date, duration).await?;
    Ok(Json(OccupancyResponse {
        umbrella_id: id,
        date,
        duration,
        occupied,
    }))
}

/// POST /v1/umbrellas/{id}/prices/{price_id}
async fn associate_price(
    State(state): State<AppState>,
    Path((id, price_id)): Path<(Uuid, Uuid)>,
) -> Result<StatusCode, AppError> {
    state.beach.associate_price(price_id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
