use std::collections::HashMap;

pub const LOUNGERS: &str = "loungers";
pub const CHAIRS: &str = "chairs";

/// Stock level and rental price of a countable product
#[derive(Debug, Clone, PartialEq)]
struct ProductStock {
    unit_price: f64,
    total_quantity: i64,
}

/// Source of unit prices and total quantities for loungers and chairs
pub trait ProductInventory: Send + Sync {
    fn price(&self, product: &str) -> Result<f64, InventoryError>;

    fn quantity(&self, product: &str) -> Result<i64, InventoryError>;
}

/// In-memory inventory manager, seeded from configuration at startup
#[derive(Debug, Clone, Default)]
pub struct InventoryManager {
    inventory: HashMap<String, ProductStock>,
}

impl InventoryManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or replace) a product
    pub fn initialize(&mut self, name: impl Into<String>, unit_price: f64, total_quantity: i64) {
        self.inventory.insert(
            name.into(),
            ProductStock {
                unit_price,
                total_quantity,
            },
        );
    }

    fn lookup(&self, name: &str) -> Result<&ProductStock, InventoryError> {
        self.inventory
            .get(name)
            .ok_or_else(|| InventoryError::NotFound(name.to_string()))
    }
}

impl ProductInventory for InventoryManager {
    fn price(&self, product: &str) -> Result<f64, InventoryError> {
        self.lookup(product).map(|item| item.unit_price)
    }

    fn quantity(&self, product: &str) -> Result<i64, InventoryError> {
        self.lookup(product).map(|item| item.total_quantity)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum InventoryError {
    #[error("Product not found: {0}")]
    NotFound(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inventory_lookup() {
        let mut manager = InventoryManager::new();
        manager.initialize(LOUNGERS, 5.0, 40);
        manager.initialize(CHAIRS, 3.5, 25);

        assert_eq!(manager.price(LOUNGERS).unwrap(), 5.0);
        assert_eq!(manager.quantity(CHAIRS).unwrap(), 25);
        assert!(matches!(manager.price("pedalos"), Err(InventoryError::NotFound(_))));
    }

    #[test]
    fn test_initialize_replaces() {
        let mut manager = InventoryManager::new();
        manager.initialize(LOUNGERS, 5.0, 40);
        manager.initialize(LOUNGERS, 6.0, 10);

        assert_eq!(manager.price(LOUNGERS).unwrap(), 6.0);
        assert_eq!(manager.quantity(LOUNGERS).unwrap(), 10);
    }
}
