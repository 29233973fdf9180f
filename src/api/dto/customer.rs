//! Customer DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::Customer;

/// Заказчик (диспетчерская компания или частное лицо)
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CustomerDto {
    /// Уникальный идентификатор заказчика (UUID)
    pub id: String,
    /// Название / имя
    #[schema(example = "Davron Logistics")]
    pub name: String,
    /// Контактный email
    #[schema(example = "dispatch@davron.uz")]
    pub email: String,
    /// Активен ли заказчик
    pub is_active: bool,
    /// Дата регистрации (ISO 8601)
    pub created_at: DateTime<Utc>,
}

impl CustomerDto {
    pub fn from_domain(c: Customer) -> Self {
        Self {
            id: c.id,
            name: c.name,
            email: c.email,
            is_active: c.is_active,
            created_at: c.created_at,
        }
    }
}
