pub mod product;
pub mod pricing;
pub mod inventory;

pub use product::Umbrella;
pub use pricing::{DateRange, Duration, MonthRange, Price, PricingError};
pub use inventory::{InventoryError, InventoryManager, ProductInventory, CHAIRS, LOUNGERS};
