pub mod repository;
pub mod request;
pub mod memory;
pub mod beach;

use casotto_catalog::{Duration, InventoryError, PricingError};
use casotto_order::ReservationError;
use chrono::NaiveDate;
use uuid::Uuid;

pub use beach::{BeachService, ReservationSummary};

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("No price configured for umbrella {umbrella_id} on {date} ({duration})")]
    NoPriceConfigured {
        umbrella_id: Uuid,
        date: NaiveDate,
        duration: Duration,
    },
    #[error("Unavailable: {0}")]
    Unavailable(String),
    #[error(transparent)]
    Pricing(#[from] PricingError),
    #[error(transparent)]
    Inventory(#[from] InventoryError),
    #[error(transparent)]
    Reservation(#[from] ReservationError),
    #[error("Storage error: {0}")]
    Storage(String),
}

pub type CoreResult<T> = Result<T, CoreError>;
