use casotto_catalog::Duration;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use uuid::Uuid;

/// A booking of umbrellas, loungers and chairs for one slot of one day
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Reservation {
    pub id: Uuid,
    pub date: NaiveDate,
    pub duration: Duration,
    pub umbrella_ids: BTreeSet<Uuid>,
    pub loungers: i32,
    pub chairs: i32,
    pub created_at: DateTime<Utc>,
}

impl Reservation {
    pub fn new(
        date: NaiveDate,
        duration: Duration,
        umbrella_ids: impl IntoIterator<Item = Uuid>,
        loungers: i32,
        chairs: i32,
    ) -> Result<Self, ReservationError> {
        if loungers < 0 {
            return Err(ReservationError::NegativeQuantity {
                product: "loungers",
                requested: loungers,
            });
        }
        if chairs < 0 {
            return Err(ReservationError::NegativeQuantity {
                product: "chairs",
                requested: chairs,
            });
        }

        Ok(Self {
            id: Uuid::new_v4(),
            date,
            duration,
            umbrella_ids: umbrella_ids.into_iter().collect(),
            loungers,
            chairs,
            created_at: Utc::now(),
        })
    }

    pub fn includes_umbrella(&self, umbrella_id: &Uuid) -> bool {
        self.umbrella_ids.contains(umbrella_id)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ReservationError {
    #[error("Negative {product} quantity: {requested}")]
    NegativeQuantity {
        product: &'static str,
        requested: i32,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_umbrellas_collapse() {
        let umbrella = Uuid::new_v4();
        let date = NaiveDate::from_ymd_opt(2024, 7, 1).unwrap();
        let reservation =
            Reservation::new(date, Duration::Morning, vec![umbrella, umbrella], 1, 0).unwrap();

        assert_eq!(reservation.umbrella_ids.len(), 1);
        assert!(reservation.includes_umbrella(&umbrella));
    }

    #[test]
    fn test_negative_quantities_rejected() {
        let date = NaiveDate::from_ymd_opt(2024, 7, 1).unwrap();
        let result = Reservation::new(date, Duration::FullDay, vec![], 0, -1);
        assert!(matches!(
            result,
            Err(ReservationError::NegativeQuantity { product: "chairs", .. })
        ));
    }
}
