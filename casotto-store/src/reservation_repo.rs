use async_trait::async_trait;
use casotto_catalog::Duration;
use casotto_core::repository::ReservationRepository;
use casotto_core::{CoreError, CoreResult};
use casotto_order::Reservation;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::storage_error;

pub struct StoreReservationRepository {
    pool: PgPool,
}

impl StoreReservationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn fetch(&self, filter: &str, bind: Filter) -> CoreResult<Vec<Reservation>> {
        let sql = format!(
            r#"
            SELECT r.id, r.booking_date, r.duration, r.loungers, r.chairs, r.created_at,
                   COALESCE(array_agg(ru.umbrella_id) FILTER (WHERE ru.umbrella_id IS NOT NULL), '{{}}') AS umbrella_ids
            FROM reservations r
            LEFT JOIN reservation_umbrellas ru ON ru.reservation_id = r.id
            WHERE {}
            GROUP BY r.id
            ORDER BY r.created_at
            "#,
            filter
        );

        let query = sqlx::query_as::<_, ReservationRow>(&sql);
        let query = match bind {
            Filter::Id(id) => query.bind(id),
            Filter::Umbrella(umbrella_id) => query.bind(umbrella_id),
            Filter::UmbrellaAndDate(umbrella_id, date) => query.bind(umbrella_id).bind(date),
            Filter::Date(date) => query.bind(date),
        };

        let rows = query.fetch_all(&self.pool).await.map_err(storage_error)?;
        rows.into_iter().map(Reservation::try_from).collect()
    }
}

enum Filter {
    Id(Uuid),
    Umbrella(Uuid),
    UmbrellaAndDate(Uuid, NaiveDate),
    Date(NaiveDate),
}

const BY_UMBRELLA: &str =
    "r.id IN (SELECT reservation_id FROM reservation_umbrellas WHERE umbrella_id = $1)";

#[derive(sqlx::FromRow)]
struct ReservationRow {
    id: Uuid,
    booking_date: NaiveDate,
    duration: String,
    loungers: i32,
    chairs: i32,
    created_at: DateTime<Utc>,
    umbrella_ids: Vec<Uuid>,
}

impl TryFrom<ReservationRow> for Reservation {
    type Error = CoreError;

    fn try_from(row: ReservationRow) -> CoreResult<Self> {
        Ok(Reservation {
            id: row.id,
            date: row.booking_date,
            duration: row.duration.parse::<Duration>()?,
            umbrella_ids: row.umbrella_ids.into_iter().collect(),
            loungers: row.loungers,
            chairs: row.chairs,
            created_at: row.created_at,
        })
    }
}

#[async_trait]
impl ReservationRepository for StoreReservationRepository {
    async fn create(&self, reservation: &Reservation) -> CoreResult<()> {
        let mut tx = self.pool.begin().await.map_err(storage_error)?;

        sqlx::query(
            r#"
            INSERT INTO reservations (id, booking_date, duration, loungers, chairs, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(reservation.id)
        .bind(reservation.date)
        .bind(reservation.duration.as_str())
        .bind(reservation.loungers)
        .bind(reservation.chairs)
        .bind(reservation.created_at)
        .execute(&mut *tx)
        .await
        .map_err(storage_error)?;

        for umbrella_id in &reservation.umbrella_ids {
            sqlx::query(
                "INSERT INTO reservation_umbrellas (reservation_id, umbrella_id) VALUES ($1, $2)",
            )
            .bind(reservation.id)
            .bind(umbrella_id)
            .execute(&mut *tx)
            .await
            .map_err(storage_error)?;
        }

        tx.commit().await.map_err(storage_error)?;
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> CoreResult<Option<Reservation>> {
        let mut found = self.fetch("r.id = $1", Filter::Id(id)).await?;
        Ok(found.pop())
    }

    async fn find_by_umbrella_id(&self, umbrella_id: Uuid) -> CoreResult<Vec<Reservation>> {
        self.fetch(BY_UMBRELLA, Filter::Umbrella(umbrella_id)).await
    }

    async fn find_by_umbrella_id_and_date(
        &self,
        umbrella_id: Uuid,
        date: NaiveDate,
    ) -> CoreResult<Vec<Reservation>> {
        let filter = format!("{} AND r.booking_date = $2", BY_UMBRELLA);
        self.fetch(&filter, Filter::UmbrellaAndDate(umbrella_id, date)).await
    }

    async fn find_by_date(&self, date: NaiveDate) -> CoreResult<Vec<Reservation>> {
        self.fetch("r.booking_date = $1", Filter::Date(date)).await
    }

    async fn delete(&self, id: Uuid) -> CoreResult<bool> {
        // reservation_umbrellas rows go with it (ON DELETE CASCADE)
        let result = sqlx::query("DELETE FROM reservations WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(storage_error)?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row() -> ReservationRow {
        ReservationRow {
            id: Uuid::new_v4(),
            booking_date: NaiveDate::from_ymd_opt(2024, 7, 10).unwrap(),
            duration: "AFTERNOON".to_string(),
            loungers: 2,
            chairs: 1,
            created_at: Utc::now(),
            umbrella_ids: Vec::new(),
        }
    }

    #[test]
    fn test_row_conversion() {
        let mut r = row();
        let umbrella = Uuid::new_v4();
        r.umbrella_ids = vec![umbrella, umbrella];

        let reservation = Reservation::try_from(r).unwrap();
        assert_eq!(reservation.duration, Duration::Afternoon);
        assert_eq!(reservation.umbrella_ids.len(), 1);
        assert!(reservation.includes_umbrella(&umbrella));
        assert_eq!((reservation.loungers, reservation.chairs), (2, 1));
    }

    #[test]
    fn test_no_linked_umbrellas() {
        let reservation = Reservation::try_from(row()).unwrap();
        assert!(reservation.umbrella_ids.is_empty());
    }

    #[test]
    fn test_bad_duration_rejected() {
        let mut r = row();
        r.duration = "NIGHT".to_string();
        assert!(matches!(Reservation::try_from(r), Err(CoreError::Pricing(_))));
    }
}
