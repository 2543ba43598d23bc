pub mod app_config;
pub mod database;
pub mod umbrella_repo;
pub mod price_repo;
pub mod reservation_repo;

use casotto_core::memory::{MemoryPriceRepository, MemoryReservationRepository, MemoryUmbrellaRepository};
use casotto_core::repository::{PriceRepository, ReservationRepository, UmbrellaRepository};
use casotto_core::CoreError;
use std::sync::Arc;

pub use database::DbClient;
pub use price_repo::StorePriceRepository;
pub use reservation_repo::StoreReservationRepository;
pub use umbrella_repo::StoreUmbrellaRepository;

/// The three repositories the beach service runs on
#[derive(Clone)]
pub struct Repositories {
    pub umbrellas: Arc<dyn UmbrellaRepository>,
    pub prices: Arc<dyn PriceRepository>,
    pub reservations: Arc<dyn ReservationRepository>,
}

impl Repositories {
    pub fn postgres(db: &DbClient) -> Self {
        Self {
            umbrellas: Arc::new(StoreUmbrellaRepository::new(db.pool.clone())),
            prices: Arc::new(StorePriceRepository::new(db.pool.clone())),
            reservations: Arc::new(StoreReservationRepository::new(db.pool.clone())),
        }
    }

    pub fn memory() -> Self {
        Self {
            umbrellas: Arc::new(MemoryUmbrellaRepository::new()),
            prices: Arc::new(MemoryPriceRepository::new()),
            reservations: Arc::new(MemoryReservationRepository::new()),
        }
    }
}

pub(crate) fn storage_error(err: sqlx::Error) -> CoreError {
    tracing::error!("Database error: {}", err);
    CoreError::Storage(err.to_string())
}
