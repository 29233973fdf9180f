//! Reservation DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::{CustomerDto, VehicleDto};
use crate::domain::{Reservation, ReservationConflict};

/// Бронирование транспортного средства
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ReservationDto {
    /// Идентификатор бронирования (UUID)
    pub id: String,
    /// Регистрационный номер ТС
    #[schema(example = "01A450BA")]
    pub vehicle_id: String,
    /// Идентификатор заказчика
    pub customer_id: String,
    /// Почтовый индекс пункта отправления (6 цифр)
    #[schema(example = "110001")]
    pub origin: String,
    /// Почтовый индекс пункта назначения (6 цифр)
    #[schema(example = "400001")]
    pub dest: String,
    /// Начало окна бронирования, включительно (ISO 8601)
    pub start_time: DateTime<Utc>,
    /// Конец окна бронирования, не включительно (ISO 8601)
    pub end_time: DateTime<Utc>,
    /// Расчётная длительность рейса в часах
    #[schema(example = 8)]
    pub duration_hours: i64,
    /// Статус: `Active`, `Completed`, `Cancelled`
    #[schema(example = "Active")]
    pub status: String,
    /// Когда бронирование было создано (ISO 8601)
    pub created_at: DateTime<Utc>,
    /// Когда рейс был завершён. `null`, пока бронирование активно
    pub completed_at: Option<DateTime<Utc>>,
}

impl ReservationDto {
    pub fn from_domain(r: Reservation) -> Self {
        Self {
            id: r.id,
            vehicle_id: r.vehicle_id,
            customer_id: r.customer_id,
            origin: r.origin.as_str().to_string(),
            dest: r.dest.as_str().to_string(),
            start_time: r.window.start,
            end_time: r.window.end,
            duration_hours: r.window.duration_hours(),
            status: r.status.as_str().to_string(),
            created_at: r.created_at,
            completed_at: r.completed_at,
        }
    }
}

/// Созданное бронирование вместе с данными ТС и заказчика
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ReservationDetailsDto {
    pub reservation: ReservationDto,
    pub vehicle: VehicleDto,
    pub customer: CustomerDto,
}

/// Запрос на создание бронирования
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateReservationRequest {
    /// Регистрационный номер ТС
    #[schema(example = "01A450BA")]
    #[validate(length(min = 1, max = 20))]
    pub vehicle_id: String,
    /// Идентификатор заказчика
    #[validate(length(min = 1, max = 64))]
    pub customer_id: String,
    /// Почтовый индекс пункта отправления (6 цифр)
    #[schema(example = "110001")]
    #[validate(custom(function = "crate::shared::validations::validate_route_code"))]
    pub origin: String,
    /// Почтовый индекс пункта назначения (6 цифр)
    #[schema(example = "400001")]
    #[validate(custom(function = "crate::shared::validations::validate_route_code"))]
    pub dest: String,
    /// Начало рейса (ISO 8601, строго в будущем)
    #[schema(example = "2026-08-15T09:00:00Z")]
    pub start_time: DateTime<Utc>,
}

/// Конфликтующее бронирование, блокирующее запрошенное окно
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ReservationConflictDto {
    /// Идентификатор существующего бронирования
    pub reservation_id: String,
    /// Начало занятого окна (ISO 8601)
    pub start_time: DateTime<Utc>,
    /// Конец занятого окна (ISO 8601)
    pub end_time: DateTime<Utc>,
    /// Тип пересечения: `ExactMatch`, `Nested`, `StartOverlap`, `EndOverlap`
    #[schema(example = "Nested")]
    pub kind: String,
}

impl ReservationConflictDto {
    pub fn from_domain(c: ReservationConflict) -> Self {
        Self {
            reservation_id: c.reservation_id,
            start_time: c.window.start,
            end_time: c.window.end,
            kind: c.kind.as_str().to_string(),
        }
    }
}

/// Фильтры списка бронирований
#[derive(Debug, Deserialize, ToSchema, utoipa::IntoParams)]
pub struct ReservationFilter {
    /// Фильтр по статусу: `Active`, `Completed`, `Cancelled`
    pub status: Option<String>,
    /// Фильтр по регистрационному номеру ТС
    pub vehicle_id: Option<String>,
}
