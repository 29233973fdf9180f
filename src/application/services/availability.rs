//! Vehicle availability partitioning
//!
//! Splits the active fleet into vehicles free for a candidate window and
//! vehicles blocked by overlapping active reservations. The result is
//! advisory: real time passes between a search and the booking request, so
//! the commit path re-checks against the store's state at commit time.

use std::sync::Arc;

use futures_util::future::join_all;
use log::warn;

use crate::domain::{
    DomainError, DomainResult, ReservationConflict, ReservationRepository, TimeWindow, Vehicle,
    VehicleRepository,
};

/// One vehicle's verdict for a candidate window.
#[derive(Debug, Clone)]
pub struct VehicleAvailability {
    pub vehicle: Vehicle,
    /// Empty for available vehicles
    pub conflicts: Vec<ReservationConflict>,
}

/// Partitioned scan result, both halves in fleet order.
#[derive(Debug, Clone, Default)]
pub struct AvailabilityReport {
    pub available: Vec<VehicleAvailability>,
    pub unavailable: Vec<VehicleAvailability>,
}

/// Service partitioning the fleet for a candidate window
pub struct AvailabilityService {
    vehicles: Arc<dyn VehicleRepository>,
    reservations: Arc<dyn ReservationRepository>,
}

impl AvailabilityService {
    pub fn new(
        vehicles: Arc<dyn VehicleRepository>,
        reservations: Arc<dyn ReservationRepository>,
    ) -> Self {
        Self {
            vehicles,
            reservations,
        }
    }

    /// Partition active vehicles with `capacity >= min_capacity_kg` by
    /// whether any active reservation overlaps `window`.
    ///
    /// A store failure for a single vehicle is logged and that vehicle is
    /// excluded from both halves; one bad record never aborts the scan.
    pub async fn find_available(
        &self,
        min_capacity_kg: Option<i32>,
        window: &TimeWindow,
    ) -> DomainResult<AvailabilityReport> {
        if let Some(min) = min_capacity_kg {
            if min <= 0 {
                return Err(DomainError::Validation(format!(
                    "min_capacity must be positive, got {}",
                    min
                )));
            }
        }

        let candidates: Vec<Vehicle> = self
            .vehicles
            .list_active()
            .await?
            .into_iter()
            .filter(|v| v.meets_capacity(min_capacity_kg))
            .collect();

        // One store lookup per vehicle; join_all keeps the fleet order.
        let lookups = candidates
            .iter()
            .map(|v| self.reservations.find_active_overlapping(&v.id, window));
        let results = join_all(lookups).await;

        let mut report = AvailabilityReport::default();
        for (vehicle, result) in candidates.into_iter().zip(results) {
            match result {
                Ok(overlapping) => {
                    // The store query is a range scan; re-verify each hit
                    // with the exact half-open rule.
                    let conflicts: Vec<ReservationConflict> = overlapping
                        .iter()
                        .filter_map(|r| r.conflict_with(window))
                        .collect();

                    let entry = VehicleAvailability { vehicle, conflicts };
                    if entry.conflicts.is_empty() {
                        report.available.push(entry);
                    } else {
                        report.unavailable.push(entry);
                    }
                }
                Err(e) => {
                    warn!(
                        "Skipping vehicle {} in availability scan: {}",
                        vehicle.id, e
                    );
                }
            }
        }

        metrics::counter!("fleet_availability_scans_total").increment(1);
        Ok(report)
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::services::test_support::{
        in_memory_repos, seed_vehicle, test_window,
    };
    use crate::domain::{OverlapKind, Reservation, ReservationRepository, RouteCode};

    fn route(raw: &str) -> RouteCode {
        RouteCode::parse(raw).unwrap()
    }

    #[tokio::test]
    async fn partitions_fleet_by_overlap() {
        let (vehicles, _, reservations) = in_memory_repos();
        seed_vehicle(&vehicles, "01A450BA", 4500).await;
        seed_vehicle(&vehicles, "01B210KA", 1500).await;

        // Block the first vehicle for 8..16
        let busy = Reservation::new(
            "01A450BA",
            "customer-1",
            route("110001"),
            route("400001"),
            test_window(8, 16),
        );
        reservations.insert_if_no_overlap(busy.clone()).await.unwrap();

        let service = AvailabilityService::new(vehicles, reservations);
        let report = service
            .find_available(None, &test_window(10, 14))
            .await
            .unwrap();

        assert_eq!(report.available.len(), 1);
        assert_eq!(report.available[0].vehicle.id, "01B210KA");
        assert_eq!(report.unavailable.len(), 1);
        assert_eq!(report.unavailable[0].vehicle.id, "01A450BA");
        let conflict = &report.unavailable[0].conflicts[0];
        assert_eq!(conflict.reservation_id, busy.id);
        assert_eq!(conflict.kind, OverlapKind::Nested);
    }

    #[tokio::test]
    async fn adjacent_reservation_does_not_block() {
        let (vehicles, _, reservations) = in_memory_repos();
        seed_vehicle(&vehicles, "01A450BA", 4500).await;

        let busy = Reservation::new(
            "01A450BA",
            "customer-1",
            route("110001"),
            route("400001"),
            test_window(8, 12),
        );
        reservations.insert_if_no_overlap(busy).await.unwrap();

        let service = AvailabilityService::new(vehicles, reservations);
        let report = service
            .find_available(None, &test_window(12, 16))
            .await
            .unwrap();

        assert_eq!(report.available.len(), 1);
        assert!(report.unavailable.is_empty());
    }

    #[tokio::test]
    async fn capacity_filter_excludes_small_vehicles() {
        let (vehicles, _, reservations) = in_memory_repos();
        seed_vehicle(&vehicles, "01A450BA", 4500).await;
        seed_vehicle(&vehicles, "01B210KA", 1500).await;

        let service = AvailabilityService::new(vehicles, reservations);
        let report = service
            .find_available(Some(2000), &test_window(8, 16))
            .await
            .unwrap();

        assert_eq!(report.available.len(), 1);
        assert_eq!(report.available[0].vehicle.id, "01A450BA");
        assert!(report.unavailable.is_empty());
    }

    #[tokio::test]
    async fn non_positive_capacity_is_rejected() {
        let (vehicles, _, reservations) = in_memory_repos();
        let service = AvailabilityService::new(vehicles, reservations);

        let result = service.find_available(Some(0), &test_window(8, 16)).await;
        assert!(matches!(result, Err(DomainError::Validation(_))));
    }

    #[tokio::test]
    async fn bad_record_skips_vehicle_but_not_scan() {
        let (vehicles, _, reservations) = in_memory_repos();
        seed_vehicle(&vehicles, "01A450BA", 4500).await;
        seed_vehicle(&vehicles, "01B210KA", 1500).await;
        reservations.poison_vehicle("01A450BA");

        let service = AvailabilityService::new(vehicles, reservations);
        let report = service
            .find_available(None, &test_window(8, 16))
            .await
            .unwrap();

        // The poisoned vehicle is in neither half; the other survives.
        assert_eq!(report.available.len(), 1);
        assert_eq!(report.available[0].vehicle.id, "01B210KA");
        assert!(report.unavailable.is_empty());
    }

    #[tokio::test]
    async fn preserves_fleet_order() {
        let (vehicles, _, reservations) = in_memory_repos();
        for (plate, capacity) in [("01A450BA", 4500), ("01B210KA", 1500), ("01C900TR", 9000)] {
            seed_vehicle(&vehicles, plate, capacity).await;
        }

        let service = AvailabilityService::new(vehicles, reservations);
        let report = service
            .find_available(None, &test_window(8, 16))
            .await
            .unwrap();

        let order: Vec<&str> = report
            .available
            .iter()
            .map(|a| a.vehicle.id.as_str())
            .collect();
        assert_eq!(order, vec!["01A450BA", "01B210KA", "01C900TR"]);
    }
}
