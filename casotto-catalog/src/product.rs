use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// A rentable beach spot
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Umbrella {
    pub id: Uuid,
    /// How many people the spot seats
    pub capacity: i32,
    /// Row label, e.g. "A" for the front row
    pub row: String,
}

impl Umbrella {
    pub fn new(capacity: i32, row: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            capacity,
            row: row.into(),
        }
    }
}

impl fmt::Display for Umbrella {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "UMBRELLA[Id: {} -- Row: {} -- Capacity: {}]",
            self.id, self.row, self.capacity
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let umbrella = Umbrella::new(4, "B");
        let rendered = umbrella.to_string();

        assert!(rendered.starts_with("UMBRELLA[Id: "));
        assert!(rendered.ends_with("-- Row: B -- Capacity: 4]"));
    }

    #[test]
    fn test_new_assigns_distinct_ids() {
        let a = Umbrella::new(2, "A");
        let b = Umbrella::new(2, "A");
        assert_ne!(a.id, b.id);
    }
}
