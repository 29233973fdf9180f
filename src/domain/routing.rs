//! Route codes and trip duration estimation

use serde::{Deserialize, Serialize};

use crate::domain::{DomainError, DomainResult};

/// Trip duration assumed when a search request carries no route (hours).
pub const DEFAULT_TRIP_HOURS: i64 = 8;

/// Minimum reservable trip duration (hours).
pub const MIN_TRIP_HOURS: i64 = 1;

/// Six-digit postal route code identifying a trip endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteCode(String);

impl RouteCode {
    pub fn parse(raw: &str) -> DomainResult<Self> {
        if raw.len() == 6 && raw.bytes().all(|b| b.is_ascii_digit()) {
            Ok(Self(raw.to_string()))
        } else {
            Err(DomainError::Validation(format!(
                "route code '{}' must be exactly 6 digits",
                raw
            )))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn as_number(&self) -> i64 {
        // Always parses: construction guarantees 6 ASCII digits.
        self.0.parse().unwrap_or(0)
    }
}

impl std::fmt::Display for RouteCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Estimated trip duration between two route codes, in whole hours.
///
/// The absolute numeric distance between the codes, taken modulo 24 and
/// clamped to at least one billable hour (so identical codes and distances
/// that are exact multiples of 24 still reserve the vehicle).
pub fn estimate_trip_hours(origin: &RouteCode, dest: &RouteCode) -> i64 {
    let distance = (dest.as_number() - origin.as_number()).abs() % 24;
    distance.max(MIN_TRIP_HOURS)
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn code(raw: &str) -> RouteCode {
        RouteCode::parse(raw).unwrap()
    }

    #[test]
    fn parses_six_digit_codes() {
        assert_eq!(code("100001").as_str(), "100001");
        assert_eq!(code("000000").as_str(), "000000");
    }

    #[test]
    fn rejects_malformed_codes() {
        for raw in ["", "12345", "1234567", "12345a", "12 456", "-12345"] {
            assert!(
                matches!(RouteCode::parse(raw), Err(DomainError::Validation(_))),
                "'{}' should be rejected",
                raw
            );
        }
    }

    #[test]
    fn known_distance() {
        // |400001 - 110001| = 290000, 290000 mod 24 = 8
        assert_eq!(estimate_trip_hours(&code("110001"), &code("400001")), 8);
    }

    #[test]
    fn estimate_is_symmetric() {
        let pairs = [("110001", "400001"), ("123456", "654321"), ("000001", "999999")];
        for (a, b) in pairs {
            assert_eq!(
                estimate_trip_hours(&code(a), &code(b)),
                estimate_trip_hours(&code(b), &code(a)),
            );
        }
    }

    #[test]
    fn same_code_clamps_to_one_hour() {
        assert_eq!(estimate_trip_hours(&code("410504"), &code("410504")), 1);
    }

    #[test]
    fn multiple_of_24_clamps_to_one_hour() {
        // |100048 - 100000| = 48, an exact multiple of 24
        assert_eq!(estimate_trip_hours(&code("100000"), &code("100048")), 1);
    }
}
