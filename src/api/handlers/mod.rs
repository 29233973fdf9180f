//! API Handlers

pub mod availability;
pub mod customers;
pub mod health;
pub mod monitoring;
pub mod reservations;
pub mod vehicles;

use axum::http::StatusCode;

use crate::domain::DomainError;

/// HTTP status class for each domain failure mode.
pub(crate) fn error_status(e: &DomainError) -> StatusCode {
    match e {
        DomainError::Validation(_)
        | DomainError::InvalidWindow { .. }
        | DomainError::InvalidTransition(_) => StatusCode::BAD_REQUEST,
        DomainError::NotFound { .. } => StatusCode::NOT_FOUND,
        DomainError::Conflict { .. } => StatusCode::CONFLICT,
        DomainError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}
