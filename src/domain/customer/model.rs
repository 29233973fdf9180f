//! Customer domain entity

use chrono::{DateTime, Utc};

/// Booking requester
#[derive(Debug, Clone, PartialEq)]
pub struct Customer {
    /// Unique customer ID (UUID)
    pub id: String,
    /// Display name
    pub name: String,
    /// Contact email
    pub email: String,
    /// Deactivated customers cannot book
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl Customer {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name: name.into(),
            email: email.into(),
            is_active: true,
            created_at: Utc::now(),
        }
    }
}
