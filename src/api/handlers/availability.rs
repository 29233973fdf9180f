//! Availability search handler

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};

use crate::api::dto::{ApiResponse, AvailabilityQuery, AvailabilityResponse};
use crate::api::handlers::error_status;
use crate::application::services::AvailabilityService;
use crate::domain::{estimate_trip_hours, RouteCode, TimeWindow, DEFAULT_TRIP_HOURS};

/// Availability handler state
#[derive(Clone)]
pub struct AvailabilityAppState {
    pub availability: Arc<AvailabilityService>,
}

/// Поиск доступных ТС
///
/// Рассчитывает окно рейса от `start_time` (длительность — по маршруту,
/// либо 8 часов без маршрута) и делит автопарк на свободные и занятые ТС.
/// Результат — ориентировочный: бронирование перепроверяет занятость
/// атомарно в момент записи.
#[utoipa::path(
    get,
    path = "/api/v1/availability",
    tag = "Availability",
    params(AvailabilityQuery),
    responses(
        (status = 200, description = "Свободные и занятые ТС для окна", body = AvailabilityResponse),
        (status = 400, description = "Некорректные параметры запроса")
    )
)]
pub async fn search_availability(
    State(state): State<AvailabilityAppState>,
    Query(query): Query<AvailabilityQuery>,
) -> Result<Json<AvailabilityResponse>, (StatusCode, Json<ApiResponse<()>>)> {
    let hours = match (&query.origin, &query.dest) {
        (Some(origin), Some(dest)) => {
            let origin = RouteCode::parse(origin)
                .map_err(|e| (error_status(&e), Json(ApiResponse::error(e.to_string()))))?;
            let dest = RouteCode::parse(dest)
                .map_err(|e| (error_status(&e), Json(ApiResponse::error(e.to_string()))))?;
            estimate_trip_hours(&origin, &dest)
        }
        (None, None) => DEFAULT_TRIP_HOURS,
        _ => {
            return Err((
                StatusCode::BAD_REQUEST,
                Json(ApiResponse::error(
                    "origin and dest must be provided together",
                )),
            ));
        }
    };

    let window = TimeWindow::from_start(query.start_time, hours);

    match state
        .availability
        .find_available(query.min_capacity, &window)
        .await
    {
        Ok(report) => Ok(Json(AvailabilityResponse::from_report(report, window, hours))),
        Err(e) => Err((error_status(&e), Json(ApiResponse::error(e.to_string())))),
    }
}
