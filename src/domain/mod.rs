//! Domain layer - core business entities, types and traits

pub mod customer;
pub mod error;
pub mod reservation;
pub mod routing;
pub mod vehicle;
pub mod window;

pub use customer::{Customer, CustomerRepository};
pub use error::{DomainError, DomainResult, TransitionBlock};
pub use reservation::{Reservation, ReservationConflict, ReservationRepository, ReservationStatus};
pub use routing::{estimate_trip_hours, RouteCode, DEFAULT_TRIP_HOURS, MIN_TRIP_HOURS};
pub use vehicle::{Vehicle, VehicleRepository};
pub use window::{OverlapKind, TimeWindow};
