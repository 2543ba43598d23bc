use crate::models::Reservation;
use casotto_catalog::{Duration, CHAIRS, LOUNGERS};
use serde::{Deserialize, Serialize};

/// Whether two bookings of the same half-day on one umbrella clash.
///
/// `Allow` keeps the historical behavior where only full-day bookings
/// block an umbrella, so two MORNING bookings can coexist. `Reject`
/// treats a same-half overlap as a conflict.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum HalfDayOverlap {
    #[default]
    Allow,
    Reject,
}

/// Does an existing booking in slot `existing` block a new one in `requested`?
pub fn slot_conflicts(existing: Duration, requested: Duration, overlap: HalfDayOverlap) -> bool {
    if existing == Duration::FullDay {
        return true;
    }
    if requested == Duration::FullDay && existing.is_half_day() {
        return true;
    }
    overlap == HalfDayOverlap::Reject && existing == requested
}

/// `reservations` must already be narrowed to one umbrella and one date.
pub fn is_occupied(reservations: &[Reservation], requested: Duration, overlap: HalfDayOverlap) -> bool {
    reservations
        .iter()
        .any(|r| slot_conflicts(r.duration, requested, overlap))
}

/// Countable extras rented alongside umbrellas
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stock {
    Loungers,
    Chairs,
}

impl Stock {
    /// Name the inventory manager knows this product by
    pub fn product_name(&self) -> &'static str {
        match self {
            Stock::Loungers => LOUNGERS,
            Stock::Chairs => CHAIRS,
        }
    }

    pub fn count_in(&self, reservation: &Reservation) -> i32 {
        match self {
            Stock::Loungers => reservation.loungers,
            Stock::Chairs => reservation.chairs,
        }
    }
}

/// Units of `stock` held on the day by full-day bookings and by bookings in
/// exactly the `requested` slot. `reservations` must share one date.
pub fn units_taken(reservations: &[Reservation], stock: Stock, requested: Duration) -> i64 {
    reservations
        .iter()
        .filter(|r| r.duration == Duration::FullDay || r.duration == requested)
        .map(|r| i64::from(stock.count_in(r)))
        .sum()
}

/// Not clamped: an overbooked day yields a negative count.
pub fn remaining(total: i64, reservations: &[Reservation], stock: Stock, requested: Duration) -> i64 {
    total - units_taken(reservations, stock, requested)
}

/// Units that can still be handed out to a new booking in `requested`.
///
/// A full-day booking holds its units through both halves, so it can take
/// no more than the tighter of the two.
pub fn bookable(total: i64, reservations: &[Reservation], stock: Stock, requested: Duration) -> i64 {
    match requested {
        Duration::FullDay => remaining(total, reservations, stock, Duration::Morning)
            .min(remaining(total, reservations, stock, Duration::Afternoon)),
        half => remaining(total, reservations, stock, half),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use uuid::Uuid;

    fn booking(duration: Duration, loungers: i32, chairs: i32) -> Reservation {
        let date = NaiveDate::from_ymd_opt(2024, 7, 15).unwrap();
        Reservation::new(date, duration, vec![Uuid::new_v4()], loungers, chairs).unwrap()
    }

    #[test]
    fn test_full_day_blocks_everything() {
        let existing = vec![booking(Duration::FullDay, 0, 0)];
        for requested in [Duration::Morning, Duration::Afternoon, Duration::FullDay] {
            assert!(is_occupied(&existing, requested, HalfDayOverlap::Allow));
        }
    }

    #[test]
    fn test_half_day_existing() {
        let existing = vec![booking(Duration::Morning, 0, 0)];

        assert!(!is_occupied(&existing, Duration::Morning, HalfDayOverlap::Allow));
        assert!(!is_occupied(&existing, Duration::Afternoon, HalfDayOverlap::Allow));
        assert!(is_occupied(&existing, Duration::FullDay, HalfDayOverlap::Allow));
    }

    #[test]
    fn test_reject_policy_blocks_same_half() {
        let existing = vec![booking(Duration::Morning, 0, 0)];

        assert!(is_occupied(&existing, Duration::Morning, HalfDayOverlap::Reject));
        assert!(!is_occupied(&existing, Duration::Afternoon, HalfDayOverlap::Reject));
    }

    #[test]
    fn test_empty_day_is_free() {
        assert!(!is_occupied(&[], Duration::FullDay, HalfDayOverlap::Reject));
    }

    #[test]
    fn test_remaining_counts_full_day_and_same_slot() {
        let day = vec![
            booking(Duration::FullDay, 2, 1),
            booking(Duration::Morning, 3, 0),
            booking(Duration::Afternoon, 5, 4),
        ];

        assert_eq!(remaining(20, &day, Stock::Loungers, Duration::Morning), 15);
        assert_eq!(remaining(10, &day, Stock::Chairs, Duration::Afternoon), 5);
        // A full-day request only sees full-day bookings
        assert_eq!(remaining(20, &day, Stock::Loungers, Duration::FullDay), 18);
    }

    #[test]
    fn test_remaining_can_go_negative() {
        let day = vec![booking(Duration::FullDay, 8, 0)];
        assert_eq!(remaining(5, &day, Stock::Loungers, Duration::Morning), -3);
    }

    #[test]
    fn test_bookable_full_day_takes_tighter_half() {
        let day = vec![
            booking(Duration::Morning, 6, 0),
            booking(Duration::Afternoon, 2, 0),
        ];

        assert_eq!(bookable(10, &day, Stock::Loungers, Duration::FullDay), 4);
        assert_eq!(bookable(10, &day, Stock::Loungers, Duration::Afternoon), 8);
    }

    #[test]
    fn test_overlap_policy_config_format() {
        let parsed: HalfDayOverlap = serde_json::from_str("\"reject\"").unwrap();
        assert_eq!(parsed, HalfDayOverlap::Reject);
        assert_eq!(HalfDayOverlap::default(), HalfDayOverlap::Allow);
    }
}
