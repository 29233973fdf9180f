//! Reservation lifecycle transitions
//!
//! `Active` is the only live state; it can move to `Completed` (trip
//! carried out) or `Cancelled` (released before start). Both transitions
//! are single-row status writes on an already-identified reservation, so
//! they need none of the cross-reservation atomicity the commit path does.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use log::info;

use crate::domain::{
    DomainError, DomainResult, Reservation, ReservationRepository, ReservationStatus,
    TransitionBlock,
};

/// Service applying lifecycle transitions to persisted reservations
pub struct LifecycleService {
    reservations: Arc<dyn ReservationRepository>,
}

impl LifecycleService {
    pub fn new(reservations: Arc<dyn ReservationRepository>) -> Self {
        Self { reservations }
    }

    /// Cancel an active reservation before its window starts.
    ///
    /// `now` is passed in rather than read inside so the guard is
    /// deterministic under test.
    pub async fn cancel(
        &self,
        reservation_id: &str,
        now: DateTime<Utc>,
    ) -> DomainResult<Reservation> {
        let reservation = self.load(reservation_id).await?;

        match reservation.status {
            ReservationStatus::Active if now < reservation.window.start => {
                let updated = self
                    .reservations
                    .update_status(reservation_id, ReservationStatus::Cancelled, None)
                    .await?;
                info!(
                    "Reservation {} cancelled: vehicle={} freed for {}",
                    updated.id, updated.vehicle_id, updated.window
                );
                Ok(updated)
            }
            ReservationStatus::Active => Err(DomainError::InvalidTransition(
                TransitionBlock::AlreadyStarted,
            )),
            status => Err(DomainError::InvalidTransition(
                TransitionBlock::AlreadyFinalized(status),
            )),
        }
    }

    /// Complete an active reservation once its window has started.
    pub async fn complete(
        &self,
        reservation_id: &str,
        now: DateTime<Utc>,
    ) -> DomainResult<Reservation> {
        let reservation = self.load(reservation_id).await?;

        match reservation.status {
            ReservationStatus::Active if now >= reservation.window.start => {
                let updated = self
                    .reservations
                    .update_status(reservation_id, ReservationStatus::Completed, Some(now))
                    .await?;
                info!("Reservation {} completed", updated.id);
                Ok(updated)
            }
            ReservationStatus::Active => Err(DomainError::InvalidTransition(
                TransitionBlock::NotStarted,
            )),
            status => Err(DomainError::InvalidTransition(
                TransitionBlock::AlreadyFinalized(status),
            )),
        }
    }

    async fn load(&self, reservation_id: &str) -> DomainResult<Reservation> {
        self.reservations
            .find_by_id(reservation_id)
            .await?
            .ok_or(DomainError::NotFound {
                entity: "Reservation",
                field: "id",
                value: reservation_id.to_string(),
            })
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::services::test_support::{
        in_memory_repos, seed_customer, seed_vehicle,
    };
    use crate::application::services::{AvailabilityService, BookingService};
    use crate::domain::RouteCode;
    use crate::domain::{Reservation, TimeWindow};
    use chrono::Duration;

    fn route(raw: &str) -> RouteCode {
        RouteCode::parse(raw).unwrap()
    }

    async fn active_reservation(
        reservations: &Arc<crate::application::services::test_support::InMemoryReservationRepository>,
        start: DateTime<Utc>,
    ) -> Reservation {
        let window = TimeWindow::new(start, start + Duration::hours(8)).unwrap();
        let reservation = Reservation::new(
            "01A450BA",
            "customer-1",
            route("110001"),
            route("400001"),
            window,
        );
        reservations
            .insert_if_no_overlap(reservation)
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn cancel_before_start_succeeds() {
        let (_, _, reservations) = in_memory_repos();
        let start = Utc::now() + Duration::days(1);
        let reservation = active_reservation(&reservations, start).await;

        let service = LifecycleService::new(reservations);
        let cancelled = service
            .cancel(&reservation.id, start - Duration::hours(2))
            .await
            .unwrap();

        assert_eq!(cancelled.status, ReservationStatus::Cancelled);
        assert!(cancelled.completed_at.is_none());
    }

    #[tokio::test]
    async fn cancel_after_start_is_blocked() {
        let (_, _, reservations) = in_memory_repos();
        let start = Utc::now() + Duration::days(1);
        let reservation = active_reservation(&reservations, start).await;

        let service = LifecycleService::new(reservations);
        let result = service
            .cancel(&reservation.id, start + Duration::minutes(1))
            .await;

        assert!(matches!(
            result,
            Err(DomainError::InvalidTransition(TransitionBlock::AlreadyStarted))
        ));
    }

    #[tokio::test]
    async fn cancel_at_exact_start_is_blocked() {
        let (_, _, reservations) = in_memory_repos();
        let start = Utc::now() + Duration::days(1);
        let reservation = active_reservation(&reservations, start).await;

        let service = LifecycleService::new(reservations);
        let result = service.cancel(&reservation.id, start).await;

        assert!(matches!(
            result,
            Err(DomainError::InvalidTransition(TransitionBlock::AlreadyStarted))
        ));
    }

    #[tokio::test]
    async fn complete_after_start_succeeds_and_stamps_time() {
        let (_, _, reservations) = in_memory_repos();
        let start = Utc::now() + Duration::days(1);
        let reservation = active_reservation(&reservations, start).await;
        let now = start + Duration::hours(8);

        let service = LifecycleService::new(reservations);
        let completed = service.complete(&reservation.id, now).await.unwrap();

        assert_eq!(completed.status, ReservationStatus::Completed);
        assert_eq!(completed.completed_at, Some(now));
    }

    #[tokio::test]
    async fn complete_at_exact_start_succeeds() {
        let (_, _, reservations) = in_memory_repos();
        let start = Utc::now() + Duration::days(1);
        let reservation = active_reservation(&reservations, start).await;

        let service = LifecycleService::new(reservations);
        assert!(service.complete(&reservation.id, start).await.is_ok());
    }

    #[tokio::test]
    async fn complete_before_start_is_blocked() {
        let (_, _, reservations) = in_memory_repos();
        let start = Utc::now() + Duration::days(1);
        let reservation = active_reservation(&reservations, start).await;

        let service = LifecycleService::new(reservations);
        let result = service
            .complete(&reservation.id, start - Duration::hours(1))
            .await;

        assert!(matches!(
            result,
            Err(DomainError::InvalidTransition(TransitionBlock::NotStarted))
        ));
    }

    #[tokio::test]
    async fn terminal_states_are_frozen() {
        let (_, _, reservations) = in_memory_repos();
        let start = Utc::now() + Duration::days(1);
        let reservation = active_reservation(&reservations, start).await;

        let service = LifecycleService::new(reservations);
        service
            .cancel(&reservation.id, start - Duration::hours(2))
            .await
            .unwrap();

        // Neither transition may leave Cancelled.
        let cancel_again = service.cancel(&reservation.id, start - Duration::hours(1)).await;
        assert!(matches!(
            cancel_again,
            Err(DomainError::InvalidTransition(TransitionBlock::AlreadyFinalized(
                ReservationStatus::Cancelled
            )))
        ));
        let complete = service.complete(&reservation.id, start + Duration::hours(1)).await;
        assert!(matches!(
            complete,
            Err(DomainError::InvalidTransition(TransitionBlock::AlreadyFinalized(
                ReservationStatus::Cancelled
            )))
        ));
    }

    #[tokio::test]
    async fn unknown_reservation_is_not_found() {
        let (_, _, reservations) = in_memory_repos();
        let service = LifecycleService::new(reservations);

        let result = service.cancel("no-such-id", Utc::now()).await;
        assert!(matches!(result, Err(DomainError::NotFound { .. })));
    }

    /// Search → book → search (now blocked) → cancel → search (free again).
    #[tokio::test]
    async fn booking_cycle_frees_vehicle_after_cancellation() {
        let (vehicles, customers, reservations) = in_memory_repos();
        seed_vehicle(&vehicles, "01A450BA", 4500).await;
        let customer_id = seed_customer(&customers, "Davron Logistics").await;

        let availability =
            AvailabilityService::new(vehicles.clone(), reservations.clone());
        let booking = BookingService::new(vehicles, customers, reservations.clone());
        let lifecycle = LifecycleService::new(reservations);

        let start = Utc::now() + Duration::days(1);
        let window = TimeWindow::from_start(start, 8);

        let before = availability
            .find_available(Some(2000), &window)
            .await
            .unwrap();
        assert_eq!(before.available.len(), 1);

        let (reservation, _, _) = booking
            .reserve("01A450BA", &customer_id, "110001", "400001", start)
            .await
            .unwrap();

        let during = availability
            .find_available(Some(2000), &window)
            .await
            .unwrap();
        assert!(during.available.is_empty());
        assert_eq!(during.unavailable.len(), 1);
        assert_eq!(
            during.unavailable[0].conflicts[0].reservation_id,
            reservation.id
        );

        lifecycle
            .cancel(&reservation.id, start - Duration::hours(1))
            .await
            .unwrap();

        let after = availability
            .find_available(Some(2000), &window)
            .await
            .unwrap();
        assert_eq!(after.available.len(), 1);
        assert!(after.unavailable.is_empty());
    }
}
