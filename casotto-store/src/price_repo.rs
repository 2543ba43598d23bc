use async_trait::async_trait;
use casotto_catalog::{DateRange, Duration, MonthRange, Price};
use casotto_core::repository::PriceRepository;
use casotto_core::{CoreError, CoreResult};
use chrono::NaiveDate;
use sqlx::PgPool;
use uuid::Uuid;

use crate::storage_error;

pub struct StorePriceRepository {
    pool: PgPool,
}

impl StorePriceRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const PRICE_COLUMNS: &str =
    "p.id, p.amount, p.start_month, p.end_month, p.start_date, p.end_date, p.duration";

#[derive(sqlx::FromRow)]
struct PriceRow {
    id: Uuid,
    amount: f64,
    start_month: Option<i32>,
    end_month: Option<i32>,
    start_date: Option<NaiveDate>,
    end_date: Option<NaiveDate>,
    duration: String,
}

fn month(value: i32) -> CoreResult<u32> {
    u32::try_from(value).map_err(|_| CoreError::Storage(format!("Invalid month in database: {}", value)))
}

impl TryFrom<PriceRow> for Price {
    type Error = CoreError;

    fn try_from(row: PriceRow) -> CoreResult<Self> {
        // A month bound of zero is treated as unset, like a NULL
        let months = match (row.start_month, row.end_month) {
            (Some(start), Some(end)) if start != 0 && end != 0 => Some(MonthRange {
                start: month(start)?,
                end: month(end)?,
            }),
            _ => None,
        };
        let dates = match (row.start_date, row.end_date) {
            (Some(start), Some(end)) => Some(DateRange { start, end }),
            _ => None,
        };

        Ok(Price {
            id: row.id,
            amount: row.amount,
            months,
            dates,
            duration: row.duration.parse::<Duration>()?,
        })
    }
}

#[async_trait]
impl PriceRepository for StorePriceRepository {
    async fn create(&self, price: &Price) -> CoreResult<()> {
        sqlx::query(
            r#"
            INSERT INTO prices (id, amount, start_month, end_month, start_date, end_date, duration)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(price.id)
        .bind(price.amount)
        .bind(price.months.map(|m| m.start as i32))
        .bind(price.months.map(|m| m.end as i32))
        .bind(price.dates.map(|d| d.start))
        .bind(price.dates.map(|d| d.end))
        .bind(price.duration.as_str())
        .execute(&self.pool)
        .await
        .map_err(storage_error)?;

        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> CoreResult<Option<Price>> {
        let sql = format!("SELECT {} FROM prices p WHERE p.id = $1", PRICE_COLUMNS);
        let row = sqlx::query_as::<_, PriceRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(storage_error)?;

        row.map(Price::try_from).transpose()
    }

    async fn find_by_umbrella_id(&self, umbrella_id: Uuid) -> CoreResult<Vec<Price>> {
        let sql = format!(
            "SELECT {} FROM prices p JOIN umbrella_prices up ON up.price_id = p.id WHERE up.umbrella_id = $1",
            PRICE_COLUMNS
        );
        let rows = sqlx::query_as::<_, PriceRow>(&sql)
            .bind(umbrella_id)
            .fetch_all(&self.pool)
            .await
            .map_err(storage_error)?;

        rows.into_iter().map(Price::try_from).collect()
    }

    async fn associate(&self, price_id: Uuid, umbrella_id: Uuid) -> CoreResult<()> {
        sqlx::query(
            "INSERT INTO umbrella_prices (umbrella_id, price_id) VALUES ($1, $2) ON CONFLICT DO NOTHING",
        )
        .bind(umbrella_id)
        .bind(price_id)
        .execute(&self.pool)
        .await
        .map_err(storage_error)?;

        Ok(())
    }
}
