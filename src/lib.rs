//! # Texnouz Fleet Booking Service
//!
//! Reservation service for a capacity-constrained truck fleet: dispatchers
//! search which vehicles are free for a trip window and book one, with a
//! store-level guarantee that no vehicle is ever double-booked.
//!
//! ## Architecture
//!
//! The project follows Clean Architecture principles:
//!
//! - **domain**: Core business entities, types and traits
//! - **application**: Business logic services (availability, booking, lifecycle)
//! - **infrastructure**: External concerns (database, migrations, repositories)
//! - **api**: REST API with Swagger documentation
//! - **shared**: Cross-cutting helpers (shutdown, validation)

pub mod api;
pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod shared;

pub use config::{default_config_path, AppConfig};

// Re-export database types for easy access
pub use infrastructure::database::repositories::{
    SeaOrmCustomerRepository, SeaOrmReservationRepository, SeaOrmVehicleRepository,
};
pub use infrastructure::{init_database, DatabaseConfig};

// Re-export API router
pub use api::{create_api_router, FleetApiState};
