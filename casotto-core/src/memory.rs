//! Process-local repositories backed by hash maps. Used for the `memory`
//! storage backend and throughout the tests.

use async_trait::async_trait;
use casotto_catalog::{Price, Umbrella};
use casotto_order::Reservation;
use chrono::NaiveDate;
use std::collections::{BTreeSet, HashMap};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::repository::{PriceRepository, ReservationRepository, UmbrellaRepository};
use crate::{CoreError, CoreResult};

#[derive(Default)]
pub struct MemoryUmbrellaRepository {
    umbrellas: RwLock<HashMap<Uuid, Umbrella>>,
}

impl MemoryUmbrellaRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UmbrellaRepository for MemoryUmbrellaRepository {
    async fn create(&self, umbrella: &Umbrella) -> CoreResult<()> {
        self.umbrellas
            .write()
            .await
            .insert(umbrella.id, umbrella.clone());
        Ok(())
    }

    async fn find_all(&self) -> CoreResult<Vec<Umbrella>> {
        let mut all: Vec<Umbrella> = self.umbrellas.read().await.values().cloned().collect();
        all.sort_by(|a, b| a.row.cmp(&b.row).then(a.id.cmp(&b.id)));
        Ok(all)
    }

    async fn find_by_id(&self, id: Uuid) -> CoreResult<Option<Umbrella>> {
        Ok(self.umbrellas.read().await.get(&id).cloned())
    }
}

#[derive(Default)]
pub struct MemoryPriceRepository {
    prices: RwLock<HashMap<Uuid, Price>>,
    // umbrella id -> price ids
    links: RwLock<HashMap<Uuid, BTreeSet<Uuid>>>,
}

impl MemoryPriceRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PriceRepository for MemoryPriceRepository {
    async fn create(&self, price: &Price) -> CoreResult<()> {
        self.prices.write().await.insert(price.id, price.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> CoreResult<Option<Price>> {
        Ok(self.prices.read().await.get(&id).cloned())
    }

    async fn find_by_umbrella_id(&self, umbrella_id: Uuid) -> CoreResult<Vec<Price>> {
        let links = self.links.read().await;
        let prices = self.prices.read().await;

        Ok(links
            .get(&umbrella_id)
            .map(|ids| ids.iter().filter_map(|id| prices.get(id).cloned()).collect())
            .unwrap_or_default())
    }

    async fn associate(&self, price_id: Uuid, umbrella_id: Uuid) -> CoreResult<()> {
        if !self.prices.read().await.contains_key(&price_id) {
            return Err(CoreError::NotFound(format!("price {}", price_id)));
        }
        self.links
            .write()
            .await
            .entry(umbrella_id)
            .or_default()
            .insert(price_id);
        Ok(())
    }
}

#[derive(Default)]
pub struct MemoryReservationRepository {
    reservations: RwLock<HashMap<Uuid, Reservation>>,
}

impl MemoryReservationRepository {
    pub fn new() -> Self {
        Self::default()
    }

    async fn filtered(&self, keep: impl Fn(&Reservation) -> bool) -> Vec<Reservation> {
        let mut found: Vec<Reservation> = self
            .reservations
            .read()
            .await
            .values()
            .filter(|r| keep(r))
            .cloned()
            .collect();
        found.sort_by_key(|r| r.created_at);
        found
    }
}

#[async_trait]
impl ReservationRepository for MemoryReservationRepository {
    async fn create(&self, reservation: &Reservation) -> CoreResult<()> {
        self.reservations
            .write()
            .await
            .insert(reservation.id, reservation.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> CoreResult<Option<Reservation>> {
        Ok(self.reservations.read().await.get(&id).cloned())
    }

    async fn find_by_umbrella_id(&self, umbrella_id: Uuid) -> CoreResult<Vec<Reservation>> {
        Ok(self.filtered(|r| r.includes_umbrella(&umbrella_id)).await)
    }

    async fn find_by_umbrella_id_and_date(
        &self,
        umbrella_id: Uuid,
        date: NaiveDate,
    ) -> CoreResult<Vec<Reservation>> {
        Ok(self
            .filtered(|r| r.date == date && r.includes_umbrella(&umbrella_id))
            .await)
    }

    async fn find_by_date(&self, date: NaiveDate) -> CoreResult<Vec<Reservation>> {
        Ok(self.filtered(|r| r.date == date).await)
    }

    async fn delete(&self, id: Uuid) -> CoreResult<bool> {
        Ok(self.reservations.write().await.remove(&id).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use casotto_catalog::{Duration, MonthRange};

    #[tokio::test]
    async fn test_price_links() {
        let repo = MemoryPriceRepository::new();
        let umbrella_id = Uuid::new_v4();
        let price = Price::new(
            18.0,
            Some(MonthRange { start: 6, end: 9 }),
            None,
            Duration::FullDay,
        )
        .unwrap();

        repo.create(&price).await.unwrap();
        repo.associate(price.id, umbrella_id).await.unwrap();
        repo.associate(price.id, umbrella_id).await.unwrap();

        let linked = repo.find_by_umbrella_id(umbrella_id).await.unwrap();
        assert_eq!(linked.len(), 1);
        assert!(repo.find_by_umbrella_id(Uuid::new_v4()).await.unwrap().is_empty());
        assert!(repo.associate(Uuid::new_v4(), umbrella_id).await.is_err());
    }

    #[tokio::test]
    async fn test_reservation_filters() {
        let repo = MemoryReservationRepository::new();
        let umbrella = Uuid::new_v4();
        let day = NaiveDate::from_ymd_opt(2024, 8, 1).unwrap();
        let next_day = day.succ_opt().unwrap();

        let first = Reservation::new(day, Duration::Morning, vec![umbrella], 0, 0).unwrap();
        let second = Reservation::new(next_day, Duration::Morning, vec![umbrella], 0, 0).unwrap();
        let other = Reservation::new(day, Duration::FullDay, vec![Uuid::new_v4()], 2, 0).unwrap();
        for r in [&first, &second, &other] {
            repo.create(r).await.unwrap();
        }

        assert_eq!(repo.find_by_umbrella_id(umbrella).await.unwrap().len(), 2);
        assert_eq!(repo.find_by_date(day).await.unwrap().len(), 2);

        let same_day = repo.find_by_umbrella_id_and_date(umbrella, day).await.unwrap();
        assert_eq!(same_day, vec![first.clone()]);

        assert!(repo.delete(first.id).await.unwrap());
        assert!(!repo.delete(first.id).await.unwrap());
    }
}
