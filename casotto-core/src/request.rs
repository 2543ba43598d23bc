//! Inbound requests as they arrive from the outside world, with every field
//! optional. Each one is checked into a domain value before it reaches
//! `BeachService`, so a missing argument surfaces as
//! `CoreError::InvalidArgument` naming the operation.

use casotto_catalog::{DateRange, Duration, MonthRange, Price};
use casotto_order::Reservation;
use chrono::NaiveDate;
use serde::Deserialize;
use uuid::Uuid;

use crate::{CoreError, CoreResult};

pub fn required<T>(value: Option<T>, operation: &str, field: &str) -> CoreResult<T> {
    value.ok_or_else(|| CoreError::InvalidArgument(format!("{}: missing {}", operation, field)))
}

/// A day and a slot
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SlotQuery {
    pub date: Option<NaiveDate>,
    pub duration: Option<Duration>,
}

impl SlotQuery {
    pub fn require(&self, operation: &str) -> CoreResult<(NaiveDate, Duration)> {
        let date = required(self.date, operation, "date")?;
        let duration = required(self.duration, operation, "duration")?;
        Ok((date, duration))
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewUmbrellaRequest {
    pub capacity: Option<i32>,
    pub row: Option<String>,
}

impl NewUmbrellaRequest {
    pub fn require(self, operation: &str) -> CoreResult<(i32, String)> {
        let capacity = required(self.capacity, operation, "capacity")?;
        let row = required(self.row, operation, "row")?;
        Ok((capacity, row))
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewPriceRequest {
    pub amount: Option<f64>,
    pub start_month: Option<u32>,
    pub end_month: Option<u32>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub duration: Option<Duration>,
}

impl NewPriceRequest {
    pub fn into_price(self, operation: &str) -> CoreResult<Price> {
        let amount = required(self.amount, operation, "amount")?;
        let duration = required(self.duration, operation, "duration")?;

        let months = match (self.start_month, self.end_month) {
            (Some(start), Some(end)) => Some(MonthRange { start, end }),
            (None, None) => None,
            _ => {
                return Err(CoreError::InvalidArgument(format!(
                    "{}: start_month and end_month go together",
                    operation
                )))
            }
        };
        let dates = match (self.start_date, self.end_date) {
            (Some(start), Some(end)) => Some(DateRange { start, end }),
            (None, None) => None,
            _ => {
                return Err(CoreError::InvalidArgument(format!(
                    "{}: start_date and end_date go together",
                    operation
                )))
            }
        };

        Ok(Price::new(amount, months, dates, duration)?)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct BookingRequest {
    pub date: Option<NaiveDate>,
    pub duration: Option<Duration>,
    pub umbrella_ids: Option<Vec<Uuid>>,
    #[serde(default)]
    pub loungers: i32,
    #[serde(default)]
    pub chairs: i32,
}

impl BookingRequest {
    pub fn into_reservation(self, operation: &str) -> CoreResult<Reservation> {
        let date = required(self.date, operation, "date")?;
        let duration = required(self.duration, operation, "duration")?;
        let umbrella_ids = required(self.umbrella_ids, operation, "umbrella_ids")?;

        Ok(Reservation::new(
            date,
            duration,
            umbrella_ids,
            self.loungers,
            self.chairs,
        )?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slot_query_names_missing_field() {
        let query = SlotQuery {
            date: NaiveDate::from_ymd_opt(2024, 7, 1),
            duration: None,
        };
        match query.require("free_umbrellas") {
            Err(CoreError::InvalidArgument(msg)) => {
                assert_eq!(msg, "free_umbrellas: missing duration");
            }
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_price_request_needs_paired_bounds() {
        let req = NewPriceRequest {
            amount: Some(20.0),
            start_month: Some(6),
            duration: Some(Duration::FullDay),
            ..Default::default()
        };
        assert!(matches!(req.into_price("add_price"), Err(CoreError::InvalidArgument(_))));
    }

    #[test]
    fn test_price_request_without_window() {
        let req = NewPriceRequest {
            amount: Some(20.0),
            duration: Some(Duration::FullDay),
            ..Default::default()
        };
        assert!(matches!(req.into_price("add_price"), Err(CoreError::Pricing(_))));
    }

    #[test]
    fn test_booking_request_requires_umbrellas() {
        let req = BookingRequest {
            date: NaiveDate::from_ymd_opt(2024, 7, 1),
            duration: Some(Duration::Morning),
            ..Default::default()
        };
        assert!(matches!(
            req.into_reservation("book"),
            Err(CoreError::InvalidArgument(_))
        ));
    }
}
