use casotto_order::HalfDayOverlap;
use serde_json::Value;
use sqlx::postgres::PgPoolOptions;
use sqlx::{Pool, Postgres};
use std::time::Duration;
use tracing::{info, warn};

use crate::app_config::{BusinessRules, DatabaseConfig};

#[derive(Clone)]
pub struct DbClient {
    pub pool: Pool<Postgres>,
}

impl DbClient {
    pub async fn new(config: &DatabaseConfig) -> Result<Self, sqlx::Error> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(3))
            .connect(&config.url)
            .await?;

        Ok(Self { pool })
    }

    pub async fn migrate(&self) -> Result<(), sqlx::migrate::MigrateError> {
        info!("Running database migrations...");
        sqlx::migrate!("../migrations")
            .run(&self.pool)
            .await?;
        info!("Migrations completed successfully.");
        Ok(())
    }

    /// Overlay rules stored in the `business_rules` table on top of the
    /// configured ones.
    pub async fn fetch_business_rules(&self, defaults: BusinessRules) -> Result<BusinessRules, sqlx::Error> {
        let rows: Vec<(String, Value)> =
            sqlx::query_as("SELECT rule_key, rule_value FROM business_rules")
                .fetch_all(&self.pool)
                .await?;

        Ok(apply_rule_rows(defaults, rows))
    }
}

// Expected format: {"value": <string>}
fn apply_rule_rows(defaults: BusinessRules, rows: Vec<(String, Value)>) -> BusinessRules {
    let mut rules = defaults;

    for (key, value) in rows {
        let Some(v) = value.get("value") else {
            continue;
        };
        match key.as_str() {
            "half_day_overlap" => match serde_json::from_value::<HalfDayOverlap>(v.clone()) {
                Ok(overlap) => rules.half_day_overlap = overlap,
                Err(e) => warn!("Ignoring business rule {}: {}", key, e),
            },
            _ => {}
        }
    }

    rules
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_rule_rows_override_defaults() {
        let rows = vec![
            ("half_day_overlap".to_string(), json!({"value": "reject"})),
            ("unknown_rule".to_string(), json!({"value": 3})),
        ];
        let rules = apply_rule_rows(BusinessRules::default(), rows);
        assert_eq!(rules.half_day_overlap, HalfDayOverlap::Reject);
    }

    #[test]
    fn test_malformed_rule_is_ignored() {
        let rows = vec![
            ("half_day_overlap".to_string(), json!({"value": "sometimes"})),
            ("half_day_overlap".to_string(), json!("reject")),
        ];
        let rules = apply_rule_rows(BusinessRules::default(), rows);
        assert_eq!(rules.half_day_overlap, HalfDayOverlap::Allow);
    }
}
