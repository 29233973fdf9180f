//! SeaORM entities

pub mod customer;
pub mod reservation;
pub mod vehicle;
