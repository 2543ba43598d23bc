use async_trait::async_trait;
use casotto_catalog::{Price, Umbrella};
use casotto_order::Reservation;
use chrono::NaiveDate;
use uuid::Uuid;

use crate::CoreResult;

/// Repository trait for umbrella data access
#[async_trait]
pub trait UmbrellaRepository: Send + Sync {
    async fn create(&self, umbrella: &Umbrella) -> CoreResult<()>;

    async fn find_all(&self) -> CoreResult<Vec<Umbrella>>;

    async fn find_by_id(&self, id: Uuid) -> CoreResult<Option<Umbrella>>;
}

/// Repository trait for the price catalog
#[async_trait]
pub trait PriceRepository: Send + Sync {
    async fn create(&self, price: &Price) -> CoreResult<()>;

    async fn find_by_id(&self, id: Uuid) -> CoreResult<Option<Price>>;

    /// Prices linked to the umbrella, in no particular order
    async fn find_by_umbrella_id(&self, umbrella_id: Uuid) -> CoreResult<Vec<Price>>;

    /// Link a price to an umbrella. Linking twice is a no-op.
    async fn associate(&self, price_id: Uuid, umbrella_id: Uuid) -> CoreResult<()>;
}

/// Repository trait for reservation data access
#[async_trait]
pub trait ReservationRepository: Send + Sync {
    async fn create(&self, reservation: &Reservation) -> CoreResult<()>;

    async fn find_by_id(&self, id: Uuid) -> CoreResult<Option<Reservation>>;

    async fn find_by_umbrella_id(&self, umbrella_id: Uuid) -> CoreResult<Vec<Reservation>>;

    async fn find_by_umbrella_id_and_date(
        &self,
        umbrella_id: Uuid,
        date: NaiveDate,
    ) -> CoreResult<Vec<Reservation>>;

    async fn find_by_date(&self, date: NaiveDate) -> CoreResult<Vec<Reservation>>;

    /// Returns false when nothing was deleted
    async fn delete(&self, id: Uuid) -> CoreResult<bool>;
}
