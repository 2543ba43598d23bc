use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use casotto_catalog::Duration;
use casotto_core::request::{BookingRequest, SlotQuery};
use casotto_core::ReservationSummary;
use chrono::NaiveDate;
use serde::Serialize;
use uuid::Uuid;

use crate::error::AppError;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct StockResponse {
    pub date: NaiveDate,
    pub duration: Duration,
    pub loungers: i64,
    pub chairs: i64,
}

#[derive(Debug, Serialize)]
pub struct QuoteResponse {
    pub total_cost: f64,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/v1/stock", get(stock))
        .route("/v1/reservations", post(book))
        .route("/v1/reservations/quote", post(quote))
        .route("/v1/reservations/{id}", get(get_reservation).delete(cancel))
}

/// GET /v1/stock?date=&duration=
async fn stock(
    State(state): State<AppState>,
    Query(query): Query<SlotQuery>,
) -> Result<Json<StockResponse>, AppError> {
    let (date, duration) = query.require("stock")?;

    Ok(Json(StockResponse {
        date,
        duration,
        loungers: state.beach.available_loungers(date, duration).await?,
        chairs: state.beach.available_chairs(date, duration).await?,
    }))
}

/// POST /v1/reservations
async fn book(
    State(state): State<AppState>,
    Json(req): Json<BookingRequest>,
) -> Result<(StatusCode, Json<ReservationSummary>), AppError> {
    let draft = req.into_reservation("book")?;
    let summary = state.beach.book(draft).await?;
    Ok((StatusCode::CREATED, Json(summary)))
}

/// POST /v1/reservations/quote
///
/// Prices a booking without checking availability or storing it.
async fn quote(
    State(state): State<AppState>,
    Json(req): Json<BookingRequest>,
) -> Result<Json<QuoteResponse>, AppError> {
    let draft = req.into_reservation("total_cost")?;
    let total_cost = state.beach.total_cost(&draft).await?;
    Ok(Json(QuoteResponse { total_cost }))
}

/// GET /v1/reservations/{id}
async fn get_reservation(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ReservationSummary>, AppError> {
    Ok(Json(state.beach.summary(id).await?))
}

/// DELETE /v1/reservations/{id}
async fn cancel(State(state): State<AppState>, Path(id): Path<Uuid>) -> Result<StatusCode, AppError> {
    state.beach.cancel(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
