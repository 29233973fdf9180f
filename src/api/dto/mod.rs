//! API DTOs

pub mod availability;
pub mod common;
pub mod customer;
pub mod reservation;
pub mod vehicle;

pub use availability::*;
pub use common::*;
pub use customer::*;
pub use reservation::*;
pub use vehicle::*;
