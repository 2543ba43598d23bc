use async_trait::async_trait;
use casotto_catalog::Umbrella;
use casotto_core::repository::UmbrellaRepository;
use casotto_core::CoreResult;
use sqlx::PgPool;
use uuid::Uuid;

use crate::storage_error;

pub struct StoreUmbrellaRepository {
    pool: PgPool,
}

impl StoreUmbrellaRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct UmbrellaRow {
    id: Uuid,
    capacity: i32,
    row_label: String,
}

impl From<UmbrellaRow> for Umbrella {
    fn from(row: UmbrellaRow) -> Self {
        Umbrella {
            id: row.id,
            capacity: row.capacity,
            row: row.row_label,
        }
    }
}

#[async_trait]
impl UmbrellaRepository for StoreUmbrellaRepository {
    async fn create(&self, umbrella: &Umbrella) -> CoreResult<()> {
        sqlx::query("INSERT INTO umbrellas (id, capacity, row_label) VALUES ($1, $2, $3)")
            .bind(umbrella.id)
            .bind(umbrella.capacity)
            .bind(&umbrella.row)
            .execute(&self.pool)
            .await
            .map_err(storage_error)?;

        Ok(())
    }

    async fn find_all(&self) -> CoreResult<Vec<Umbrella>> {
        let rows = sqlx::query_as::<_, UmbrellaRow>(
            "SELECT id, capacity, row_label FROM umbrellas ORDER BY row_label, id",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(storage_error)?;

        Ok(rows.into_iter().map(Umbrella::from).collect())
    }

    async fn find_by_id(&self, id: Uuid) -> CoreResult<Option<Umbrella>> {
        let row = sqlx::query_as::<_, UmbrellaRow>(
            "SELECT id, capacity, row_label FROM umbrellas WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(storage_error)?;

        Ok(row.map(Umbrella::from))
    }
}
