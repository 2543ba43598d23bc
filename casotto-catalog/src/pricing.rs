use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Bookable time slot of a day
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Duration {
    Morning,
    Afternoon,
    FullDay,
}

impl Duration {
    pub fn is_half_day(&self) -> bool {
        matches!(self, Duration::Morning | Duration::Afternoon)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Duration::Morning => "MORNING",
            Duration::Afternoon => "AFTERNOON",
            Duration::FullDay => "FULL_DAY",
        }
    }
}

impl fmt::Display for Duration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Duration {
    type Err = PricingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "MORNING" => Ok(Duration::Morning),
            "AFTERNOON" => Ok(Duration::Afternoon),
            "FULL_DAY" => Ok(Duration::FullDay),
            other => Err(PricingError::UnknownDuration(other.to_string())),
        }
    }
}

/// Seasonal validity, inclusive on both ends (1 = January)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct MonthRange {
    pub start: u32,
    pub end: u32,
}

impl MonthRange {
    pub fn contains(&self, date: NaiveDate) -> bool {
        let month = date.month();
        self.start <= month && month <= self.end
    }
}

/// Special-period validity, inclusive on both ends
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

/// Umbrella price for a season or a special period.
///
/// `months` and `dates` are meant to be used one at a time but nothing
/// stops a price from carrying both; each window is consulted by its own
/// lookup phase.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Price {
    pub id: Uuid,
    pub amount: f64,
    pub months: Option<MonthRange>,
    pub dates: Option<DateRange>,
    pub duration: Duration,
}

impl Price {
    pub fn new(
        amount: f64,
        months: Option<MonthRange>,
        dates: Option<DateRange>,
        duration: Duration,
    ) -> Result<Self, PricingError> {
        if !amount.is_finite() {
            return Err(PricingError::InvalidAmount(amount));
        }
        if months.is_none() && dates.is_none() {
            return Err(PricingError::MissingValidity);
        }
        if let Some(range) = months {
            for month in [range.start, range.end] {
                if !(1..=12).contains(&month) {
                    return Err(PricingError::InvalidMonth(month));
                }
            }
            if range.start > range.end {
                return Err(PricingError::InvertedRange(format!("months {}..{}", range.start, range.end)));
            }
        }
        if let Some(range) = dates {
            if range.start > range.end {
                return Err(PricingError::InvertedRange(format!("dates {}..{}", range.start, range.end)));
            }
        }

        Ok(Self {
            id: Uuid::new_v4(),
            amount,
            months,
            dates,
            duration,
        })
    }

    /// A full-day price applies to every slot, a half-day price only to its own.
    pub fn covers(&self, requested: Duration) -> bool {
        self.duration == Duration::FullDay || self.duration == requested
    }

    pub fn matches_date(&self, date: NaiveDate, requested: Duration) -> bool {
        self.dates.is_some_and(|range| range.contains(date)) && self.covers(requested)
    }

    pub fn matches_month(&self, date: NaiveDate, requested: Duration) -> bool {
        self.months.is_some_and(|range| range.contains(date)) && self.covers(requested)
    }
}

/// Pick the price that applies on `date` for `requested`.
///
/// Any price whose date range matches wins over every month-range match,
/// whatever the order of `prices`.
pub fn select_price(prices: &[Price], date: NaiveDate, requested: Duration) -> Option<&Price> {
    prices
        .iter()
        .find(|p| p.matches_date(date, requested))
        .or_else(|| prices.iter().find(|p| p.matches_month(date, requested)))
}

#[derive(Debug, thiserror::Error)]
pub enum PricingError {
    #[error("Unknown duration: {0}")]
    UnknownDuration(String),

    #[error("Price must have a month range or a date range")]
    MissingValidity,

    #[error("Month out of range: {0}")]
    InvalidMonth(u32),

    #[error("Invalid amount: {0}")]
    InvalidAmount(f64),

    #[error("Validity window ends before it starts: {0}")]
    InvertedRange(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn season(start: u32, end: u32, amount: f64, duration: Duration) -> Price {
        Price::new(amount, Some(MonthRange { start, end }), None, duration).unwrap()
    }

    fn period(start: NaiveDate, end: NaiveDate, amount: f64, duration: Duration) -> Price {
        Price::new(amount, None, Some(DateRange { start, end }), duration).unwrap()
    }

    #[test]
    fn test_date_range_beats_month_range() {
        let month_price = season(6, 8, 20.0, Duration::FullDay);
        let date_price = period(date(2024, 8, 10), date(2024, 8, 20), 35.0, Duration::FullDay);

        // Month price listed first on purpose
        let prices = vec![month_price, date_price.clone()];
        let selected = select_price(&prices, date(2024, 8, 15), Duration::FullDay).unwrap();
        assert_eq!(selected.id, date_price.id);
    }

    #[test]
    fn test_month_range_fallback() {
        let month_price = season(6, 8, 20.0, Duration::FullDay);
        let date_price = period(date(2024, 8, 10), date(2024, 8, 20), 35.0, Duration::FullDay);
        let prices = vec![date_price, month_price.clone()];

        let selected = select_price(&prices, date(2024, 7, 1), Duration::Morning).unwrap();
        assert_eq!(selected.id, month_price.id);
    }

    #[test]
    fn test_no_match() {
        let prices = vec![season(6, 8, 20.0, Duration::FullDay)];
        assert!(select_price(&prices, date(2024, 1, 15), Duration::FullDay).is_none());
        assert!(select_price(&[], date(2024, 7, 15), Duration::FullDay).is_none());
    }

    #[test]
    fn test_half_day_price_only_covers_its_slot() {
        let morning = season(6, 8, 12.0, Duration::Morning);
        let prices = vec![morning.clone()];

        assert!(select_price(&prices, date(2024, 7, 1), Duration::Afternoon).is_none());
        assert!(select_price(&prices, date(2024, 7, 1), Duration::FullDay).is_none());
        assert_eq!(
            select_price(&prices, date(2024, 7, 1), Duration::Morning).unwrap().id,
            morning.id
        );
    }

    #[test]
    fn test_date_range_bounds_are_inclusive() {
        let p = period(date(2024, 8, 10), date(2024, 8, 20), 35.0, Duration::FullDay);
        assert!(p.matches_date(date(2024, 8, 10), Duration::Afternoon));
        assert!(p.matches_date(date(2024, 8, 20), Duration::Morning));
        assert!(!p.matches_date(date(2024, 8, 21), Duration::FullDay));
    }

    #[test]
    fn test_date_price_with_wrong_slot_falls_back_to_month() {
        let date_price = period(date(2024, 8, 10), date(2024, 8, 20), 15.0, Duration::Morning);
        let month_price = season(8, 8, 25.0, Duration::FullDay);
        let prices = vec![date_price, month_price.clone()];

        let selected = select_price(&prices, date(2024, 8, 12), Duration::Afternoon).unwrap();
        assert_eq!(selected.id, month_price.id);
    }

    #[test]
    fn test_price_validation() {
        assert!(matches!(
            Price::new(10.0, None, None, Duration::FullDay),
            Err(PricingError::MissingValidity)
        ));
        assert!(matches!(
            Price::new(10.0, Some(MonthRange { start: 0, end: 5 }), None, Duration::FullDay),
            Err(PricingError::InvalidMonth(0))
        ));
        assert!(matches!(
            Price::new(f64::NAN, Some(MonthRange { start: 1, end: 5 }), None, Duration::FullDay),
            Err(PricingError::InvalidAmount(_))
        ));
    }

    #[test]
    fn test_inverted_windows_rejected() {
        assert!(matches!(
            Price::new(10.0, Some(MonthRange { start: 11, end: 2 }), None, Duration::FullDay),
            Err(PricingError::InvertedRange(_))
        ));
        assert!(matches!(
            Price::new(
                10.0,
                None,
                Some(DateRange { start: date(2024, 8, 20), end: date(2024, 8, 10) }),
                Duration::FullDay
            ),
            Err(PricingError::InvertedRange(_))
        ));

        // Single-month and single-day windows are fine
        assert!(Price::new(10.0, Some(MonthRange { start: 8, end: 8 }), None, Duration::FullDay).is_ok());
        let day = date(2024, 8, 15);
        assert!(Price::new(10.0, None, Some(DateRange { start: day, end: day }), Duration::FullDay).is_ok());
    }

    #[test]
    fn test_duration_wire_format() {
        assert_eq!(serde_json::to_string(&Duration::FullDay).unwrap(), "\"FULL_DAY\"");
        assert_eq!("AFTERNOON".parse::<Duration>().unwrap(), Duration::Afternoon);
        assert!("EVENING".parse::<Duration>().is_err());
    }
}
