//! Availability search DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{ReservationConflictDto, VehicleDto};
use crate::application::services::AvailabilityReport;
use crate::domain::TimeWindow;

/// Параметры поиска доступных ТС
#[derive(Debug, Deserialize, ToSchema, utoipa::IntoParams)]
pub struct AvailabilityQuery {
    /// Начало рейса (ISO 8601). Обязательный параметр
    #[param(example = "2026-08-15T09:00:00Z")]
    pub start_time: DateTime<Utc>,
    /// Минимальная грузоподъёмность в килограммах
    #[param(example = 2000)]
    pub min_capacity: Option<i32>,
    /// Почтовый индекс пункта отправления (6 цифр).
    /// Без маршрута длительность рейса принимается равной 8 часам
    #[param(example = "110001")]
    pub origin: Option<String>,
    /// Почтовый индекс пункта назначения (6 цифр)
    #[param(example = "400001")]
    pub dest: Option<String>,
}

/// Занятое ТС с перечнем блокирующих бронирований
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UnavailableVehicleDto {
    pub vehicle: VehicleDto,
    /// Бронирования, пересекающиеся с запрошенным окном
    pub conflicts: Vec<ReservationConflictDto>,
}

/// Результат поиска доступности
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AvailabilityResponse {
    /// Начало кандидатного окна (ISO 8601)
    pub window_start: DateTime<Utc>,
    /// Конец кандидатного окна (ISO 8601)
    pub window_end: DateTime<Utc>,
    /// Расчётная длительность рейса в часах
    #[schema(example = 8)]
    pub estimated_duration_hours: i64,
    /// Свободные ТС (в порядке автопарка)
    pub available: Vec<VehicleDto>,
    /// Занятые ТС с деталями конфликтов
    pub unavailable: Vec<UnavailableVehicleDto>,
}

impl AvailabilityResponse {
    pub fn from_report(report: AvailabilityReport, window: TimeWindow, hours: i64) -> Self {
        Self {
            window_start: window.start,
            window_end: window.end,
            estimated_duration_hours: hours,
            available: report
                .available
                .into_iter()
                .map(|a| VehicleDto::from_domain(a.vehicle))
                .collect(),
            unavailable: report
                .unavailable
                .into_iter()
                .map(|u| UnavailableVehicleDto {
                    vehicle: VehicleDto::from_domain(u.vehicle),
                    conflicts: u
                        .conflicts
                        .into_iter()
                        .map(ReservationConflictDto::from_domain)
                        .collect(),
                })
                .collect(),
        }
    }
}
