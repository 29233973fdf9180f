//! Vehicle DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::Vehicle;

/// Транспортное средство автопарка
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct VehicleDto {
    /// Регистрационный номер (госномер)
    #[schema(example = "01A450BA")]
    pub id: String,
    /// Марка и модель
    #[schema(example = "Isuzu NPR 75L")]
    pub model: String,
    /// Грузоподъёмность в килограммах
    #[schema(example = 4500)]
    pub capacity_kg: i32,
    /// Доступно ли ТС для бронирования
    pub is_active: bool,
    /// Дата добавления в автопарк (ISO 8601)
    pub created_at: DateTime<Utc>,
}

impl VehicleDto {
    pub fn from_domain(v: Vehicle) -> Self {
        Self {
            id: v.id,
            model: v.model,
            capacity_kg: v.capacity_kg,
            is_active: v.is_active,
            created_at: v.created_at,
        }
    }
}
