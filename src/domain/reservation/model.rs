//! Reservation domain entity

use chrono::{DateTime, Utc};

use crate::domain::routing::RouteCode;
use crate::domain::window::{OverlapKind, TimeWindow};

/// Reservation status
///
/// A closed set: `Active` is the only non-terminal state, and there is no
/// way back out of `Completed` or `Cancelled`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReservationStatus {
    /// Holds the vehicle for its window
    Active,
    /// Trip carried out
    Completed,
    /// Released before the trip started
    Cancelled,
}

impl ReservationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::Completed => "Completed",
            Self::Cancelled => "Cancelled",
        }
    }

    /// Strict parse of a stored status string. Unknown values are surfaced
    /// to the caller so a corrupt row can be skipped rather than silently
    /// reinterpreted.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Active" => Some(Self::Active),
            "Completed" => Some(Self::Completed),
            "Cancelled" => Some(Self::Cancelled),
            _ => None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Active)
    }
}

impl std::fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A time-windowed claim on one vehicle by one customer
#[derive(Debug, Clone, PartialEq)]
pub struct Reservation {
    /// Unique reservation ID (UUID)
    pub id: String,
    /// Reserved vehicle (immutable once created)
    pub vehicle_id: String,
    /// Requesting customer (immutable once created)
    pub customer_id: String,
    /// Trip origin route code
    pub origin: RouteCode,
    /// Trip destination route code
    pub dest: RouteCode,
    /// Half-open window during which the vehicle is held
    pub window: TimeWindow,
    /// Current status
    pub status: ReservationStatus,
    /// When the reservation was committed
    pub created_at: DateTime<Utc>,
    /// Set when the trip is completed
    pub completed_at: Option<DateTime<Utc>>,
}

impl Reservation {
    pub fn new(
        vehicle_id: impl Into<String>,
        customer_id: impl Into<String>,
        origin: RouteCode,
        dest: RouteCode,
        window: TimeWindow,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            vehicle_id: vehicle_id.into(),
            customer_id: customer_id.into(),
            origin,
            dest,
            window,
            status: ReservationStatus::Active,
            created_at: Utc::now(),
            completed_at: None,
        }
    }

    pub fn is_active(&self) -> bool {
        self.status == ReservationStatus::Active
    }

    /// Conflict summary for clients when this reservation blocks a
    /// candidate window. `None` when the windows are disjoint.
    pub fn conflict_with(&self, candidate: &TimeWindow) -> Option<ReservationConflict> {
        candidate.classify(&self.window).map(|kind| ReservationConflict {
            reservation_id: self.id.clone(),
            window: self.window,
            kind,
        })
    }
}

/// An existing active reservation overlapping a candidate window.
#[derive(Debug, Clone, PartialEq)]
pub struct ReservationConflict {
    pub reservation_id: String,
    pub window: TimeWindow,
    pub kind: OverlapKind,
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn window(start_hour: u32, end_hour: u32) -> TimeWindow {
        let day = Utc.with_ymd_and_hms(2026, 3, 1, 0, 0, 0).unwrap();
        TimeWindow::new(
            day + Duration::hours(start_hour as i64),
            day + Duration::hours(end_hour as i64),
        )
        .unwrap()
    }

    fn sample_reservation() -> Reservation {
        Reservation::new(
            "01A450BA",
            "customer-1",
            RouteCode::parse("110001").unwrap(),
            RouteCode::parse("400001").unwrap(),
            window(8, 16),
        )
    }

    #[test]
    fn new_reservation_is_active() {
        let r = sample_reservation();
        assert!(r.is_active());
        assert_eq!(r.status, ReservationStatus::Active);
        assert!(r.completed_at.is_none());
    }

    #[test]
    fn status_parse_roundtrip() {
        for status in [
            ReservationStatus::Active,
            ReservationStatus::Completed,
            ReservationStatus::Cancelled,
        ] {
            assert_eq!(ReservationStatus::parse(status.as_str()), Some(status));
        }
    }

    #[test]
    fn unknown_status_is_rejected() {
        assert_eq!(ReservationStatus::parse("Expired"), None);
        assert_eq!(ReservationStatus::parse(""), None);
    }

    #[test]
    fn terminal_states() {
        assert!(!ReservationStatus::Active.is_terminal());
        assert!(ReservationStatus::Completed.is_terminal());
        assert!(ReservationStatus::Cancelled.is_terminal());
    }

    #[test]
    fn conflict_with_overlapping_candidate() {
        let r = sample_reservation();
        let conflict = r.conflict_with(&window(12, 20)).unwrap();
        assert_eq!(conflict.reservation_id, r.id);
        assert_eq!(conflict.kind, OverlapKind::StartOverlap);
    }

    #[test]
    fn no_conflict_with_adjacent_candidate() {
        let r = sample_reservation();
        assert!(r.conflict_with(&window(16, 20)).is_none());
    }
}
