//! Reservation repository interface

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::model::{Reservation, ReservationStatus};
use crate::domain::window::TimeWindow;
use crate::domain::DomainResult;

#[async_trait]
pub trait ReservationRepository: Send + Sync {
    /// Atomic commit primitive: re-check for overlapping active
    /// reservations on the same vehicle and insert, as one indivisible
    /// step with respect to concurrent commits. Of N concurrent calls with
    /// pairwise-overlapping windows exactly one may succeed; the rest must
    /// observe [`DomainError::Conflict`] and write nothing.
    ///
    /// [`DomainError::Conflict`]: crate::domain::DomainError::Conflict
    async fn insert_if_no_overlap(&self, reservation: Reservation) -> DomainResult<Reservation>;

    /// Find a reservation by ID
    async fn find_by_id(&self, id: &str) -> DomainResult<Option<Reservation>>;

    /// All `Active` reservations on a vehicle whose window overlaps the
    /// given one, reading the store's current state
    async fn find_active_overlapping(
        &self,
        vehicle_id: &str,
        window: &TimeWindow,
    ) -> DomainResult<Vec<Reservation>>;

    /// Single-reservation status write; `completed_at` is only set for
    /// completion. Returns the updated reservation.
    async fn update_status(
        &self,
        id: &str,
        status: ReservationStatus,
        completed_at: Option<DateTime<Utc>>,
    ) -> DomainResult<Reservation>;

    /// All reservations (any status), newest first
    async fn list_all(&self) -> DomainResult<Vec<Reservation>>;
}
