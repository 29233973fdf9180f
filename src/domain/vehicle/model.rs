//! Vehicle domain entity

use chrono::{DateTime, Utc};

/// Fleet vehicle (read-only to the booking core).
#[derive(Debug, Clone, PartialEq)]
pub struct Vehicle {
    /// Registration plate, unique within the fleet
    pub id: String,
    /// Manufacturer and model name
    pub model: String,
    /// Payload capacity in kilograms
    pub capacity_kg: i32,
    /// Inactive vehicles are excluded from search and booking
    pub is_active: bool,
    /// When the vehicle was added to the fleet
    pub created_at: DateTime<Utc>,
}

impl Vehicle {
    pub fn new(id: impl Into<String>, model: impl Into<String>, capacity_kg: i32) -> Self {
        Self {
            id: id.into(),
            model: model.into(),
            capacity_kg,
            is_active: true,
            created_at: Utc::now(),
        }
    }

    /// Whether this vehicle satisfies an optional minimum-capacity filter.
    pub fn meets_capacity(&self, min_capacity_kg: Option<i32>) -> bool {
        min_capacity_kg.map_or(true, |min| self.capacity_kg >= min)
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_vehicle_is_active() {
        let v = Vehicle::new("01A450BA", "Isuzu NPR 75L", 4500);
        assert!(v.is_active);
        assert_eq!(v.capacity_kg, 4500);
    }

    #[test]
    fn capacity_filter() {
        let v = Vehicle::new("01A450BA", "Isuzu NPR 75L", 4500);
        assert!(v.meets_capacity(None));
        assert!(v.meets_capacity(Some(4500)));
        assert!(v.meets_capacity(Some(2000)));
        assert!(!v.meets_capacity(Some(5000)));
    }
}
