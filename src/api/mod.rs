//! REST API module for the fleet booking service
//!
//! Provides HTTP endpoints for availability search, reservation booking
//! and lifecycle management, with Swagger documentation.

pub mod dto;
pub mod handlers;
pub mod router;
pub mod validated_json;

pub use router::{create_api_router, FleetApiState};
pub use validated_json::ValidatedJson;
