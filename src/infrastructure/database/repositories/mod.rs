//! SeaORM repository implementations

pub mod customer_repository;
pub mod reservation_repository;
pub mod vehicle_repository;

pub use customer_repository::SeaOrmCustomerRepository;
pub use reservation_repository::SeaOrmReservationRepository;
pub use vehicle_repository::SeaOrmVehicleRepository;

use crate::domain::{DomainError, DomainResult};

/// Map a SeaORM error to the domain storage variant.
pub(crate) fn db_err(e: sea_orm::DbErr) -> DomainError {
    DomainError::Storage(e.to_string())
}

/// Interpret a stored value, mapping corruption to a storage error that
/// names the offending row.
pub(crate) fn stored<T>(row_id: &str, what: &str, value: Option<T>) -> DomainResult<T> {
    value.ok_or_else(|| {
        DomainError::Storage(format!("reservation {} has malformed {}", row_id, what))
    })
}
