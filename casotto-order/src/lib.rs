pub mod models;
pub mod availability;

pub use models::{Reservation, ReservationError};
pub use availability::{HalfDayOverlap, Stock};
