use casotto_catalog::{InventoryManager, CHAIRS, LOUNGERS};
use casotto_order::HalfDayOverlap;
use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    pub inventory: InventoryConfig,
    #[serde(default)]
    pub business_rules: BusinessRules,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

fn default_max_connections() -> u32 { 5 }

#[derive(Debug, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    #[default]
    Postgres,
    Memory,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct StorageConfig {
    #[serde(default)]
    pub backend: StorageBackend,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ProductConfig {
    pub unit_price: f64,
    pub quantity: i64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct InventoryConfig {
    pub loungers: ProductConfig,
    pub chairs: ProductConfig,
}

impl InventoryConfig {
    pub fn to_manager(&self) -> InventoryManager {
        let mut manager = InventoryManager::new();
        manager.initialize(LOUNGERS, self.loungers.unit_price, self.loungers.quantity);
        manager.initialize(CHAIRS, self.chairs.unit_price, self.chairs.quantity);
        manager
    }
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct BusinessRules {
    #[serde(default)]
    pub half_day_overlap: HalfDayOverlap,
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = config::Config::builder()
            .add_source(config::File::with_name("config/default"))
            // Per-environment overrides, optional
            .add_source(config::File::with_name(&format!("config/{}", run_mode)).required(false))
            // Untracked local overrides
            .add_source(config::File::with_name("config/local").required(false))
            // Eg. `CASOTTO__SERVER__PORT=9000`
            .add_source(config::Environment::with_prefix("CASOTTO").separator("__"))
            .build()?;

        s.try_deserialize()
    }
}
