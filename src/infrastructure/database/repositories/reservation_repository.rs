//! SeaORM implementation of ReservationRepository
//!
//! The commit primitive wraps its overlap re-check and the insert in a
//! serializable store transaction, so concurrent commits on the same
//! vehicle cannot both observe "no conflict". No in-process lock is held:
//! commits arriving from other processes against the same database file
//! serialize at the store, not in this service.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use log::debug;
use sea_orm::{
    AccessMode, ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DbBackend,
    EntityTrait, IsolationLevel, QueryFilter, QueryOrder, Set, TransactionTrait,
};

use super::{db_err, stored};
use crate::domain::{
    DomainError, DomainResult, Reservation, ReservationConflict, ReservationRepository,
    ReservationStatus, RouteCode, TimeWindow,
};
use crate::infrastructure::database::entities::reservation;

pub struct SeaOrmReservationRepository {
    db: DatabaseConnection,
}

impl SeaOrmReservationRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn model_to_domain(m: reservation::Model) -> DomainResult<Reservation> {
    let status = stored(&m.id, "status", ReservationStatus::parse(&m.status))?;
    let origin = stored(&m.id, "origin code", RouteCode::parse(&m.origin_code).ok())?;
    let dest = stored(&m.id, "dest code", RouteCode::parse(&m.dest_code).ok())?;
    let window = stored(
        &m.id,
        "window",
        TimeWindow::new(m.start_time, m.end_time).ok(),
    )?;

    Ok(Reservation {
        id: m.id,
        vehicle_id: m.vehicle_id,
        customer_id: m.customer_id,
        origin,
        dest,
        window,
        status,
        created_at: m.created_at,
        completed_at: m.completed_at,
    })
}

fn domain_to_active(r: &Reservation) -> reservation::ActiveModel {
    reservation::ActiveModel {
        id: Set(r.id.clone()),
        vehicle_id: Set(r.vehicle_id.clone()),
        customer_id: Set(r.customer_id.clone()),
        origin_code: Set(r.origin.as_str().to_string()),
        dest_code: Set(r.dest.as_str().to_string()),
        start_time: Set(r.window.start),
        end_time: Set(r.window.end),
        status: Set(r.status.as_str().to_string()),
        created_at: Set(r.created_at),
        completed_at: Set(r.completed_at),
    }
}

/// Range query for active reservations on a vehicle whose stored window
/// touches `[window.start, window.end)`. Exact half-open semantics are
/// re-verified in memory by the callers.
async fn query_active_overlapping<C: ConnectionTrait>(
    conn: &C,
    vehicle_id: &str,
    window: &TimeWindow,
) -> DomainResult<Vec<reservation::Model>> {
    reservation::Entity::find()
        .filter(reservation::Column::VehicleId.eq(vehicle_id))
        .filter(reservation::Column::Status.eq(ReservationStatus::Active.as_str()))
        .filter(reservation::Column::StartTime.lt(window.end))
        .filter(reservation::Column::EndTime.gt(window.start))
        .all(conn)
        .await
        .map_err(db_err)
}

// ── ReservationRepository impl ──────────────────────────────────

#[async_trait]
impl ReservationRepository for SeaOrmReservationRepository {
    async fn insert_if_no_overlap(&self, r: Reservation) -> DomainResult<Reservation> {
        debug!(
            "Committing reservation {} for vehicle {}",
            r.id, r.vehicle_id
        );

        // The re-check below and the insert are one indivisible unit
        // against concurrent commits. SQLite serializes writers on its
        // own (a racing transaction fails rather than double-inserts);
        // other backends need explicit serializable isolation.
        let txn = match self.db.get_database_backend() {
            DbBackend::Sqlite => self.db.begin().await,
            _ => {
                self.db
                    .begin_with_config(
                        Some(IsolationLevel::Serializable),
                        Some(AccessMode::ReadWrite),
                    )
                    .await
            }
        }
        .map_err(db_err)?;

        let existing = query_active_overlapping(&txn, &r.vehicle_id, &r.window).await?;

        let mut conflicts: Vec<ReservationConflict> = Vec::with_capacity(existing.len());
        for model in existing {
            // In the commit path a row we cannot interpret is an error,
            // not a skip: ignoring it here could double-book.
            let other = model_to_domain(model)?;
            if let Some(conflict) = other.conflict_with(&r.window) {
                conflicts.push(conflict);
            }
        }

        if !conflicts.is_empty() {
            txn.rollback().await.map_err(db_err)?;
            return Err(DomainError::Conflict {
                vehicle_id: r.vehicle_id,
                conflicts,
            });
        }

        domain_to_active(&r).insert(&txn).await.map_err(db_err)?;
        txn.commit().await.map_err(db_err)?;
        Ok(r)
    }

    async fn find_by_id(&self, id: &str) -> DomainResult<Option<Reservation>> {
        let model = reservation::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        model.map(model_to_domain).transpose()
    }

    async fn find_active_overlapping(
        &self,
        vehicle_id: &str,
        window: &TimeWindow,
    ) -> DomainResult<Vec<Reservation>> {
        let models = query_active_overlapping(&self.db, vehicle_id, window).await?;
        models.into_iter().map(model_to_domain).collect()
    }

    async fn update_status(
        &self,
        id: &str,
        status: ReservationStatus,
        completed_at: Option<DateTime<Utc>>,
    ) -> DomainResult<Reservation> {
        debug!("Updating reservation {} to {}", id, status);

        let existing = reservation::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;

        let Some(existing) = existing else {
            return Err(DomainError::NotFound {
                entity: "Reservation",
                field: "id",
                value: id.to_string(),
            });
        };

        let mut active: reservation::ActiveModel = existing.into();
        active.status = Set(status.as_str().to_string());
        if completed_at.is_some() {
            active.completed_at = Set(completed_at);
        }
        let updated = active.update(&self.db).await.map_err(db_err)?;
        model_to_domain(updated)
    }

    async fn list_all(&self) -> DomainResult<Vec<Reservation>> {
        let models = reservation::Entity::find()
            .order_by_desc(reservation::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        models.into_iter().map(model_to_domain).collect()
    }
}
