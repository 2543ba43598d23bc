use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use casotto_catalog::Price;
use casotto_core::request::NewPriceRequest;

use crate::error::AppError;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route("/v1/prices", post(create_price))
}

/// POST /v1/prices
///
/// Either `start_month`/`end_month` or `start_date`/`end_date` must be given.
async fn create_price(
    State(state): State<AppState>,
    Json(req): Json<NewPriceRequest>,
) -> Result<(StatusCode, Json<Price>), AppError> {
    let price = req.into_price("add_price")?;
    let price = state.beach.add_price(price).await?;
    Ok((StatusCode::CREATED, Json(price)))
}
