//! Vehicle aggregate
//!
//! Fleet vehicles are managed by an external fleet-administration system;
//! the booking core only reads them.

pub mod model;
pub mod repository;

pub use model::Vehicle;
pub use repository::VehicleRepository;
