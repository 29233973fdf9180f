//! Half-open reservation time windows
//!
//! A window `[start, end)` holds a vehicle from `start` inclusive up to but
//! not including `end`. Two back-to-back trips may share an instant: one
//! ending at 14:00 and the next starting at 14:00 do not collide.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{DomainError, DomainResult};

/// Half-open time interval `[start, end)`.
///
/// Construction enforces `end > start`, so an existing `TimeWindow` is
/// always non-empty and well-ordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl TimeWindow {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> DomainResult<Self> {
        if end <= start {
            return Err(DomainError::InvalidWindow { start, end });
        }
        Ok(Self { start, end })
    }

    /// Window starting at `start` and lasting a whole number of hours.
    /// `hours` must be positive; trip estimation never yields less than one.
    pub fn from_start(start: DateTime<Utc>, hours: i64) -> Self {
        Self {
            start,
            end: start + Duration::hours(hours.max(1)),
        }
    }

    pub fn duration_hours(&self) -> i64 {
        (self.end - self.start).num_hours()
    }

    /// Half-open overlap test. Adjacent windows (`self.end == other.start`)
    /// do not overlap.
    pub fn overlaps(&self, other: &TimeWindow) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// Classify how `self` (the candidate window) collides with `existing`.
    ///
    /// Returns `None` when the windows are disjoint. The classification is
    /// diagnostic only; the accept/reject decision rests on [`overlaps`].
    ///
    /// [`overlaps`]: TimeWindow::overlaps
    pub fn classify(&self, existing: &TimeWindow) -> Option<OverlapKind> {
        if !self.overlaps(existing) {
            return None;
        }
        let kind = if self == existing {
            OverlapKind::ExactMatch
        } else if (self.start >= existing.start && self.end <= existing.end)
            || (existing.start >= self.start && existing.end <= self.end)
        {
            OverlapKind::Nested
        } else if self.start > existing.start {
            // Candidate begins inside the existing window and runs past its end.
            OverlapKind::StartOverlap
        } else {
            // Candidate started earlier and ends inside the existing window.
            OverlapKind::EndOverlap
        };
        Some(kind)
    }
}

impl std::fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[{}, {})",
            self.start.format("%Y-%m-%dT%H:%M:%SZ"),
            self.end.format("%Y-%m-%dT%H:%M:%SZ")
        )
    }
}

/// How a candidate window collides with an existing reservation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlapKind {
    /// Both windows are identical.
    ExactMatch,
    /// One window fully contains the other.
    Nested,
    /// The candidate begins inside the existing window and extends past its end.
    StartOverlap,
    /// The candidate ends inside the existing window, having started before it.
    EndOverlap,
}

impl OverlapKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ExactMatch => "ExactMatch",
            Self::Nested => "Nested",
            Self::StartOverlap => "StartOverlap",
            Self::EndOverlap => "EndOverlap",
        }
    }
}

impl std::fmt::Display for OverlapKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 1, hour, 0, 0).unwrap()
    }

    fn window(start_hour: u32, end_hour: u32) -> TimeWindow {
        TimeWindow::new(at(start_hour), at(end_hour)).unwrap()
    }

    #[test]
    fn rejects_empty_and_inverted_windows() {
        assert!(matches!(
            TimeWindow::new(at(5), at(5)),
            Err(DomainError::InvalidWindow { .. })
        ));
        assert!(matches!(
            TimeWindow::new(at(6), at(5)),
            Err(DomainError::InvalidWindow { .. })
        ));
    }

    #[test]
    fn window_overlaps_itself() {
        let w = window(8, 12);
        assert!(w.overlaps(&w));
    }

    #[test]
    fn adjacent_windows_do_not_overlap() {
        let first = window(8, 12);
        let second = window(12, 16);
        assert!(!first.overlaps(&second));
        assert!(!second.overlaps(&first));
    }

    #[test]
    fn disjoint_windows_do_not_overlap() {
        assert!(!window(8, 10).overlaps(&window(14, 16)));
    }

    #[test]
    fn partial_overlap_is_detected_both_directions() {
        let a = window(8, 12);
        let b = window(10, 14);
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
    }

    #[test]
    fn classify_exact_match() {
        let w = window(8, 12);
        assert_eq!(w.classify(&w), Some(OverlapKind::ExactMatch));
    }

    #[test]
    fn classify_nested_both_directions() {
        let outer = window(8, 16);
        let inner = window(10, 12);
        assert_eq!(inner.classify(&outer), Some(OverlapKind::Nested));
        assert_eq!(outer.classify(&inner), Some(OverlapKind::Nested));
    }

    #[test]
    fn classify_shared_start_is_nested_not_directional() {
        // Same start, candidate runs longer: containment wins over the
        // directional cases.
        let existing = window(8, 12);
        let candidate = window(8, 14);
        assert_eq!(candidate.classify(&existing), Some(OverlapKind::Nested));
    }

    #[test]
    fn classify_start_overlap() {
        let existing = window(8, 12);
        let candidate = window(10, 14);
        assert_eq!(candidate.classify(&existing), Some(OverlapKind::StartOverlap));
    }

    #[test]
    fn classify_end_overlap() {
        let existing = window(8, 12);
        let candidate = window(6, 10);
        assert_eq!(candidate.classify(&existing), Some(OverlapKind::EndOverlap));
    }

    #[test]
    fn classify_disjoint_is_none() {
        assert_eq!(window(8, 10).classify(&window(10, 12)), None);
    }

    #[test]
    fn from_start_duration() {
        let w = TimeWindow::from_start(at(9), 8);
        assert_eq!(w.duration_hours(), 8);
        assert_eq!(w.end, at(17));
    }
}
