//! Reservation booking service
//!
//! Runs the commit protocol: validate the request, resolve vehicle and
//! customer, compute the trip window, then hand the overlap re-check plus
//! insert to the store's atomic primitive. The availability search a caller
//! ran earlier may be arbitrarily stale; only the commit-time re-check
//! decides.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use log::info;

use crate::domain::{
    estimate_trip_hours, Customer, CustomerRepository, DomainError, DomainResult, Reservation,
    ReservationRepository, RouteCode, TimeWindow, Vehicle, VehicleRepository,
};

/// Service committing new reservations
pub struct BookingService {
    vehicles: Arc<dyn VehicleRepository>,
    customers: Arc<dyn CustomerRepository>,
    reservations: Arc<dyn ReservationRepository>,
}

impl BookingService {
    pub fn new(
        vehicles: Arc<dyn VehicleRepository>,
        customers: Arc<dyn CustomerRepository>,
        reservations: Arc<dyn ReservationRepository>,
    ) -> Self {
        Self {
            vehicles,
            customers,
            reservations,
        }
    }

    /// Commit a reservation for `vehicle_id` covering the estimated trip
    /// window from `start_time`.
    ///
    /// Returns the persisted reservation together with the vehicle and
    /// customer it references. The store insert is atomic with respect to
    /// concurrent commits on the same vehicle: no application-level lock is
    /// held across the call.
    pub async fn reserve(
        &self,
        vehicle_id: &str,
        customer_id: &str,
        origin: &str,
        dest: &str,
        start_time: DateTime<Utc>,
    ) -> DomainResult<(Reservation, Vehicle, Customer)> {
        let origin = RouteCode::parse(origin)?;
        let dest = RouteCode::parse(dest)?;
        if start_time <= Utc::now() {
            return Err(DomainError::Validation(format!(
                "start_time {} must lie in the future",
                start_time.format("%Y-%m-%dT%H:%M:%SZ")
            )));
        }

        let vehicle = self
            .vehicles
            .find_by_id(vehicle_id)
            .await?
            .filter(|v| v.is_active)
            .ok_or(DomainError::NotFound {
                entity: "Vehicle",
                field: "id",
                value: vehicle_id.to_string(),
            })?;

        let customer = self
            .customers
            .find_by_id(customer_id)
            .await?
            .filter(|c| c.is_active)
            .ok_or(DomainError::NotFound {
                entity: "Customer",
                field: "id",
                value: customer_id.to_string(),
            })?;

        let hours = estimate_trip_hours(&origin, &dest);
        let window = TimeWindow::from_start(start_time, hours);

        let reservation = Reservation::new(&vehicle.id, &customer.id, origin, dest, window);
        match self.reservations.insert_if_no_overlap(reservation).await {
            Ok(committed) => {
                metrics::counter!("fleet_reservations_committed_total").increment(1);
                info!(
                    "Reservation {} committed: vehicle={}, customer={}, window={}",
                    committed.id, committed.vehicle_id, committed.customer_id, committed.window
                );
                Ok((committed, vehicle, customer))
            }
            Err(e) => {
                if matches!(e, DomainError::Conflict { .. }) {
                    metrics::counter!("fleet_reservation_conflicts_total").increment(1);
                }
                Err(e)
            }
        }
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::services::test_support::{
        in_memory_repos, seed_customer, seed_vehicle,
    };
    use chrono::Duration;

    fn tomorrow() -> DateTime<Utc> {
        Utc::now() + Duration::days(1)
    }

    async fn booking_fixture() -> (
        BookingService,
        Arc<crate::application::services::test_support::InMemoryReservationRepository>,
        String,
    ) {
        let (vehicles, customers, reservations) = in_memory_repos();
        seed_vehicle(&vehicles, "01A450BA", 4500).await;
        let customer_id = seed_customer(&customers, "Davron Logistics").await;
        let service = BookingService::new(vehicles, customers, reservations.clone());
        (service, reservations, customer_id)
    }

    #[tokio::test]
    async fn commits_reservation_with_estimated_window() {
        let (service, _, customer_id) = booking_fixture().await;
        let start = tomorrow();

        let (reservation, vehicle, customer) = service
            .reserve("01A450BA", &customer_id, "110001", "400001", start)
            .await
            .unwrap();

        assert_eq!(vehicle.id, "01A450BA");
        assert_eq!(customer.id, customer_id);
        assert!(reservation.is_active());
        assert_eq!(reservation.window.start, start);
        // |400001 - 110001| mod 24 = 8
        assert_eq!(reservation.window.duration_hours(), 8);
    }

    #[tokio::test]
    async fn rejects_malformed_route_code() {
        let (service, _, customer_id) = booking_fixture().await;

        let result = service
            .reserve("01A450BA", &customer_id, "11001", "400001", tomorrow())
            .await;
        assert!(matches!(result, Err(DomainError::Validation(_))));
    }

    #[tokio::test]
    async fn rejects_past_start_time() {
        let (service, _, customer_id) = booking_fixture().await;

        let result = service
            .reserve(
                "01A450BA",
                &customer_id,
                "110001",
                "400001",
                Utc::now() - Duration::hours(1),
            )
            .await;
        assert!(matches!(result, Err(DomainError::Validation(_))));
    }

    #[tokio::test]
    async fn unknown_vehicle_is_not_found() {
        let (service, _, customer_id) = booking_fixture().await;

        let result = service
            .reserve("99Z999ZZ", &customer_id, "110001", "400001", tomorrow())
            .await;
        assert!(matches!(
            result,
            Err(DomainError::NotFound { entity: "Vehicle", .. })
        ));
    }

    #[tokio::test]
    async fn unknown_customer_is_not_found() {
        let (service, _, _) = booking_fixture().await;

        let result = service
            .reserve("01A450BA", "no-such-customer", "110001", "400001", tomorrow())
            .await;
        assert!(matches!(
            result,
            Err(DomainError::NotFound { entity: "Customer", .. })
        ));
    }

    #[tokio::test]
    async fn overlapping_commit_is_rejected_with_conflict_detail() {
        let (service, _, customer_id) = booking_fixture().await;
        let start = tomorrow();

        let (first, _, _) = service
            .reserve("01A450BA", &customer_id, "110001", "400001", start)
            .await
            .unwrap();

        // Second attempt starts midway through the first window.
        let result = service
            .reserve(
                "01A450BA",
                &customer_id,
                "110001",
                "400001",
                start + Duration::hours(4),
            )
            .await;

        match result {
            Err(DomainError::Conflict {
                vehicle_id,
                conflicts,
            }) => {
                assert_eq!(vehicle_id, "01A450BA");
                assert_eq!(conflicts.len(), 1);
                assert_eq!(conflicts[0].reservation_id, first.id);
            }
            other => panic!("expected Conflict, got {:?}", other.map(|(r, _, _)| r.id)),
        }
    }

    #[tokio::test]
    async fn back_to_back_trips_are_allowed() {
        let (service, _, customer_id) = booking_fixture().await;
        let start = tomorrow();

        let (first, _, _) = service
            .reserve("01A450BA", &customer_id, "110001", "400001", start)
            .await
            .unwrap();

        // Next trip starts exactly when the first ends: no overlap.
        let result = service
            .reserve(
                "01A450BA",
                &customer_id,
                "400001",
                "110001",
                first.window.end,
            )
            .await;
        assert!(result.is_ok());
    }

    /// Of five concurrent commits for fully overlapping windows on one
    /// vehicle, exactly one wins and the store holds exactly one active
    /// reservation afterwards.
    #[tokio::test]
    async fn concurrent_commits_admit_exactly_one() {
        let (vehicles, customers, reservations) = in_memory_repos();
        seed_vehicle(&vehicles, "01A450BA", 4500).await;
        let customer_id = seed_customer(&customers, "Davron Logistics").await;
        let service = Arc::new(BookingService::new(
            vehicles,
            customers,
            reservations.clone(),
        ));
        let start = tomorrow();

        let mut handles = Vec::new();
        for _ in 0..5 {
            let service = Arc::clone(&service);
            let customer_id = customer_id.clone();
            handles.push(tokio::spawn(async move {
                service
                    .reserve("01A450BA", &customer_id, "110001", "400001", start)
                    .await
            }));
        }

        let mut successes = 0;
        let mut conflicts = 0;
        for handle in handles {
            match handle.await.unwrap() {
                Ok(_) => successes += 1,
                Err(DomainError::Conflict { .. }) => conflicts += 1,
                Err(other) => panic!("unexpected error: {}", other),
            }
        }

        assert_eq!(successes, 1);
        assert_eq!(conflicts, 4);
        assert_eq!(reservations.active_count("01A450BA").await, 1);
    }
}
