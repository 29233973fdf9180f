//! Reservation aggregate
//!
//! Contains the Reservation entity, conflict detail types, and the
//! repository interface with the atomic commit primitive.

pub mod model;
pub mod repository;

pub use model::{Reservation, ReservationConflict, ReservationStatus};
pub use repository::ReservationRepository;
