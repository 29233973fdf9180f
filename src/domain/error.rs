//! Domain error taxonomy
//!
//! Every failure mode a caller can act on gets its own variant, so the API
//! layer can pattern-match conflict vs. validation vs. not-found instead of
//! unwrapping a generic error string.

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::domain::reservation::{ReservationConflict, ReservationStatus};

#[derive(Debug, Error)]
pub enum DomainError {
    /// Caller supplied malformed input (bad route code, past start time,
    /// non-positive capacity). Recoverable by correcting the request.
    #[error("Validation: {0}")]
    Validation(String),

    /// A time window whose end does not lie strictly after its start.
    #[error("Invalid window: start {start} is not before end {end}")]
    InvalidWindow {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },

    #[error("Not found: {entity} with {field}={value}")]
    NotFound {
        entity: &'static str,
        field: &'static str,
        value: String,
    },

    /// The candidate window collides with existing active reservations.
    /// Carries full conflict detail so the caller can pick a new window.
    #[error("Vehicle {vehicle_id} has {} conflicting reservation(s)", conflicts.len())]
    Conflict {
        vehicle_id: String,
        conflicts: Vec<ReservationConflict>,
    },

    /// Lifecycle rule violated (cancel after start, complete before start,
    /// any transition out of a terminal state).
    #[error("Invalid transition: {0}")]
    InvalidTransition(TransitionBlock),

    /// Store unavailable or returned something uninterpretable. Surfaced
    /// as an internal failure; retry policy belongs to the caller.
    #[error("Database error: {0}")]
    Storage(String),
}

/// Why a lifecycle transition was refused.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransitionBlock {
    /// The reservation is already in a terminal state.
    AlreadyFinalized(ReservationStatus),
    /// The trip window has already started; too late to cancel.
    AlreadyStarted,
    /// The trip window has not started yet; nothing to complete.
    NotStarted,
}

impl std::fmt::Display for TransitionBlock {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AlreadyFinalized(status) => {
                write!(f, "reservation is already {}", status)
            }
            Self::AlreadyStarted => write!(f, "trip has already started"),
            Self::NotStarted => write!(f, "trip has not started yet"),
        }
    }
}

/// Result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;
