use casotto_catalog::pricing::select_price;
use casotto_catalog::{Duration, Price, ProductInventory, Umbrella};
use casotto_order::availability::{self, HalfDayOverlap, Stock};
use casotto_order::Reservation;
use chrono::NaiveDate;
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::repository::{PriceRepository, ReservationRepository, UmbrellaRepository};
use crate::{CoreError, CoreResult};

/// A reservation together with what it costs
#[derive(Debug, Clone, Serialize)]
pub struct ReservationSummary {
    pub reservation: Reservation,
    pub total_cost: f64,
}

/// Pricing and availability for the beach
pub struct BeachService {
    umbrellas: Arc<dyn UmbrellaRepository>,
    prices: Arc<dyn PriceRepository>,
    reservations: Arc<dyn ReservationRepository>,
    inventory: Arc<dyn ProductInventory>,
    overlap: HalfDayOverlap,
    // Serializes availability check and insert in `book`
    booking_lock: Mutex<()>,
}

impl BeachService {
    pub fn new(
        umbrellas: Arc<dyn UmbrellaRepository>,
        prices: Arc<dyn PriceRepository>,
        reservations: Arc<dyn ReservationRepository>,
        inventory: Arc<dyn ProductInventory>,
    ) -> Self {
        Self {
            umbrellas,
            prices,
            reservations,
            inventory,
            overlap: HalfDayOverlap::default(),
            booking_lock: Mutex::new(()),
        }
    }

    pub fn with_half_day_overlap(mut self, overlap: HalfDayOverlap) -> Self {
        self.overlap = overlap;
        self
    }

    pub fn half_day_overlap(&self) -> HalfDayOverlap {
        self.overlap
    }

    // ------------------------------------------------------------------
    // Catalog
    // ------------------------------------------------------------------

    pub async fn add_umbrella(&self, capacity: i32, row: String) -> CoreResult<Umbrella> {
        if capacity <= 0 {
            return Err(CoreError::InvalidArgument(format!(
                "add_umbrella: capacity must be positive, got {}",
                capacity
            )));
        }
        if row.trim().is_empty() {
            return Err(CoreError::InvalidArgument("add_umbrella: empty row".to_string()));
        }

        let umbrella = Umbrella::new(capacity, row);
        self.umbrellas.create(&umbrella).await?;
        info!("Umbrella created: {}", umbrella);
        Ok(umbrella)
    }

    pub async fn all_umbrellas(&self) -> CoreResult<Vec<Umbrella>> {
        self.umbrellas.find_all().await
    }

    pub async fn umbrella(&self, id: Uuid) -> CoreResult<Umbrella> {
        self.umbrellas
            .find_by_id(id)
            .await?
            .ok_or_else(|| CoreError::NotFound(format!("umbrella {}", id)))
    }

    /// Persist an already validated price
    pub async fn add_price(&self, price: Price) -> CoreResult<Price> {
        self.prices.create(&price).await?;
        info!(price_id = %price.id, amount = price.amount, duration = %price.duration, "Price created");
        Ok(price)
    }

    pub async fn associate_price(&self, price_id: Uuid, umbrella_id: Uuid) -> CoreResult<()> {
        self.umbrella(umbrella_id).await?;
        if self.prices.find_by_id(price_id).await?.is_none() {
            return Err(CoreError::NotFound(format!("price {}", price_id)));
        }

        self.prices.associate(price_id, umbrella_id).await?;
        info!(%price_id, %umbrella_id, "Price linked to umbrella");
        Ok(())
    }

    /// The price that applies to `umbrella_id` on `date` for `duration`.
    ///
    /// A price whose date range covers the day beats any seasonal
    /// (month range) price.
    pub async fn umbrella_price(
        &self,
        umbrella_id: Uuid,
        date: NaiveDate,
        duration: Duration,
    ) -> CoreResult<Option<Price>> {
        let prices = self.prices.find_by_umbrella_id(umbrella_id).await?;
        let selected = select_price(&prices, date, duration).cloned();

        debug!(
            %umbrella_id, %date, %duration,
            candidates = prices.len(),
            price_id = ?selected.as_ref().map(|p| p.id),
            "Price lookup"
        );
        Ok(selected)
    }

    // ------------------------------------------------------------------
    // Availability
    // ------------------------------------------------------------------

    /// True when the umbrella is already taken in a way that clashes with
    /// `duration` on `date`.
    pub async fn is_occupied(
        &self,
        umbrella_id: Uuid,
        date: NaiveDate,
        duration: Duration,
    ) -> CoreResult<bool> {
        let existing = self
            .reservations
            .find_by_umbrella_id_and_date(umbrella_id, date)
            .await?;
        Ok(availability::is_occupied(&existing, duration, self.overlap))
    }

    pub async fn free_umbrellas(&self, date: NaiveDate, duration: Duration) -> CoreResult<Vec<Umbrella>> {
        let day = self.reservations.find_by_date(date).await?;

        let free = self
            .umbrellas
            .find_all()
            .await?
            .into_iter()
            .filter(|u| {
                let booked: Vec<Reservation> = day
                    .iter()
                    .filter(|r| r.includes_umbrella(&u.id))
                    .cloned()
                    .collect();
                !availability::is_occupied(&booked, duration, self.overlap)
            })
            .collect();
        Ok(free)
    }

    pub async fn available_loungers(&self, date: NaiveDate, duration: Duration) -> CoreResult<i64> {
        self.available(Stock::Loungers, date, duration).await
    }

    pub async fn available_chairs(&self, date: NaiveDate, duration: Duration) -> CoreResult<i64> {
        self.available(Stock::Chairs, date, duration).await
    }

    async fn available(&self, stock: Stock, date: NaiveDate, duration: Duration) -> CoreResult<i64> {
        let total = self.inventory.quantity(stock.product_name())?;
        let day = self.reservations.find_by_date(date).await?;
        Ok(availability::remaining(total, &day, stock, duration))
    }

    // ------------------------------------------------------------------
    // Cost
    // ------------------------------------------------------------------

    /// Umbrella prices for the reservation's day and slot plus the
    /// lounger and chair charges.
    ///
    /// Unknown umbrellas are `NotFound`; known ones without a matching
    /// price are `NoPriceConfigured`.
    pub async fn total_cost(&self, reservation: &Reservation) -> CoreResult<f64> {
        let mut total = 0.0;

        for umbrella_id in &reservation.umbrella_ids {
            self.umbrella(*umbrella_id).await?;
            let price = self
                .umbrella_price(*umbrella_id, reservation.date, reservation.duration)
                .await?
                .ok_or(CoreError::NoPriceConfigured {
                    umbrella_id: *umbrella_id,
                    date: reservation.date,
                    duration: reservation.duration,
                })?;
            total += price.amount;
        }

        for stock in [Stock::Loungers, Stock::Chairs] {
            let unit = self.inventory.price(stock.product_name())?;
            total += unit * f64::from(stock.count_in(reservation));
        }

        Ok(total)
    }

    // ------------------------------------------------------------------
    // Reservations
    // ------------------------------------------------------------------

    pub async fn reservation(&self, id: Uuid) -> CoreResult<Reservation> {
        self.reservations
            .find_by_id(id)
            .await?
            .ok_or_else(|| CoreError::NotFound(format!("reservation {}", id)))
    }

    pub async fn summary(&self, id: Uuid) -> CoreResult<ReservationSummary> {
        let reservation = self.reservation(id).await?;
        let total_cost = self.total_cost(&reservation).await?;
        Ok(ReservationSummary {
            reservation,
            total_cost,
        })
    }

    /// Check that `draft` can be honored and store it.
    ///
    /// Availability check and insert run under one lock, so concurrent
    /// bookings made through this service cannot both see a free umbrella.
    pub async fn book(&self, draft: Reservation) -> CoreResult<ReservationSummary> {
        if draft.umbrella_ids.is_empty() {
            return Err(CoreError::InvalidArgument(
                "book: at least one umbrella is required".to_string(),
            ));
        }

        let _guard = self.booking_lock.lock().await;
        let day = self.reservations.find_by_date(draft.date).await?;

        for umbrella_id in &draft.umbrella_ids {
            self.umbrella(*umbrella_id).await?;

            let booked: Vec<Reservation> = day
                .iter()
                .filter(|r| r.includes_umbrella(umbrella_id))
                .cloned()
                .collect();
            if availability::is_occupied(&booked, draft.duration, self.overlap) {
                warn!(%umbrella_id, date = %draft.date, duration = %draft.duration, "Umbrella already booked");
                return Err(CoreError::Unavailable(format!(
                    "umbrella {} is booked on {} ({})",
                    umbrella_id, draft.date, draft.duration
                )));
            }
        }

        for stock in [Stock::Loungers, Stock::Chairs] {
            let requested = i64::from(stock.count_in(&draft));
            if requested == 0 {
                continue;
            }
            let total = self.inventory.quantity(stock.product_name())?;
            let left = availability::bookable(total, &day, stock, draft.duration);
            if left < requested {
                return Err(CoreError::Unavailable(format!(
                    "{}: requested {}, available {}",
                    stock.product_name(),
                    requested,
                    left.max(0)
                )));
            }
        }

        let total_cost = self.total_cost(&draft).await?;
        self.reservations.create(&draft).await?;

        info!(
            reservation_id = %draft.id,
            date = %draft.date,
            duration = %draft.duration,
            umbrellas = draft.umbrella_ids.len(),
            total_cost,
            "Reservation confirmed"
        );
        Ok(ReservationSummary {
            reservation: draft,
            total_cost,
        })
    }

    pub async fn cancel(&self, id: Uuid) -> CoreResult<()> {
        if !self.reservations.delete(id).await? {
            return Err(CoreError::NotFound(format!("reservation {}", id)));
        }
        info!(reservation_id = %id, "Reservation cancelled");
        Ok(())
    }
}
