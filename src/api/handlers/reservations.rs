//! Reservation API handlers

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;

use crate::api::dto::{
    ApiResponse, CreateReservationRequest, CustomerDto, PaginatedResponse, PaginationParams,
    ReservationConflictDto, ReservationDetailsDto, ReservationDto, ReservationFilter, VehicleDto,
};
use crate::api::handlers::error_status;
use crate::api::validated_json::ValidatedJson;
use crate::application::services::{BookingService, LifecycleService};
use crate::domain::{DomainError, ReservationRepository};

/// Reservation handler state
#[derive(Clone)]
pub struct ReservationAppState {
    pub booking: Arc<BookingService>,
    pub lifecycle: Arc<LifecycleService>,
    pub reservations: Arc<dyn ReservationRepository>,
}

/// Error body for the booking path: a 409 carries the conflicting
/// reservations in `data` so the caller can pick a new window.
fn booking_error(
    e: DomainError,
) -> (StatusCode, Json<ApiResponse<Vec<ReservationConflictDto>>>) {
    let status = error_status(&e);
    let body = match e {
        DomainError::Conflict {
            ref conflicts, ..
        } => {
            let detail: Vec<ReservationConflictDto> = conflicts
                .iter()
                .cloned()
                .map(ReservationConflictDto::from_domain)
                .collect();
            ApiResponse::error_with_data(e.to_string(), detail)
        }
        other => ApiResponse::error(other.to_string()),
    };
    (status, Json(body))
}

/// Создание бронирования
///
/// Рассчитывает окно рейса по маршруту и бронирует ТС. Перепроверка
/// занятости и запись выполняются атомарно: при одновременных запросах
/// на пересекающиеся окна побеждает ровно один.
#[utoipa::path(
    post,
    path = "/api/v1/reservations",
    tag = "Reservations",
    request_body = CreateReservationRequest,
    responses(
        (status = 201, description = "Бронирование создано", body = ApiResponse<ReservationDetailsDto>),
        (status = 400, description = "Некорректные данные запроса"),
        (status = 404, description = "ТС или заказчик не найдены"),
        (status = 409, description = "Окно занято. Поле `data` содержит конфликтующие бронирования"),
        (status = 422, description = "Ошибка валидации полей")
    )
)]
pub async fn create_reservation(
    State(state): State<ReservationAppState>,
    ValidatedJson(req): ValidatedJson<CreateReservationRequest>,
) -> Result<
    (StatusCode, Json<ApiResponse<ReservationDetailsDto>>),
    (StatusCode, Json<ApiResponse<Vec<ReservationConflictDto>>>),
> {
    match state
        .booking
        .reserve(
            &req.vehicle_id,
            &req.customer_id,
            &req.origin,
            &req.dest,
            req.start_time,
        )
        .await
    {
        Ok((reservation, vehicle, customer)) => {
            let details = ReservationDetailsDto {
                reservation: ReservationDto::from_domain(reservation),
                vehicle: VehicleDto::from_domain(vehicle),
                customer: CustomerDto::from_domain(customer),
            };
            Ok((StatusCode::CREATED, Json(ApiResponse::success(details))))
        }
        Err(e) => Err(booking_error(e)),
    }
}

/// Список бронирований
///
/// Возвращает бронирования (новые первыми) с фильтрацией по статусу
/// и ТС. Поддерживает пагинацию.
#[utoipa::path(
    get,
    path = "/api/v1/reservations",
    tag = "Reservations",
    params(ReservationFilter, PaginationParams),
    responses(
        (status = 200, description = "Список бронирований с пагинацией", body = PaginatedResponse<ReservationDto>)
    )
)]
pub async fn list_reservations(
    State(state): State<ReservationAppState>,
    Query(filter): Query<ReservationFilter>,
    Query(pagination): Query<PaginationParams>,
) -> Result<Json<PaginatedResponse<ReservationDto>>, (StatusCode, Json<ApiResponse<()>>)> {
    match state.reservations.list_all().await {
        Ok(reservations) => {
            let filtered: Vec<_> = reservations
                .into_iter()
                .filter(|r| {
                    if let Some(ref status) = filter.status {
                        if !status.eq_ignore_ascii_case(r.status.as_str()) {
                            return false;
                        }
                    }
                    if let Some(ref vehicle_id) = filter.vehicle_id {
                        if vehicle_id != &r.vehicle_id {
                            return false;
                        }
                    }
                    true
                })
                .collect();

            let total = filtered.len() as u64;
            let page = pagination.page.max(1);
            let limit = pagination.limit.clamp(1, 100);
            let start = ((page - 1) * limit) as usize;
            let items: Vec<ReservationDto> = filtered
                .into_iter()
                .skip(start)
                .take(limit as usize)
                .map(ReservationDto::from_domain)
                .collect();

            Ok(Json(PaginatedResponse::new(items, total, page, limit)))
        }
        Err(e) => Err((
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::error(e.to_string())),
        )),
    }
}

/// Получение бронирования по идентификатору
#[utoipa::path(
    get,
    path = "/api/v1/reservations/{id}",
    tag = "Reservations",
    params(
        ("id" = String, Path, description = "Идентификатор бронирования (UUID)")
    ),
    responses(
        (status = 200, description = "Данные бронирования", body = ApiResponse<ReservationDto>),
        (status = 404, description = "Бронирование не найдено")
    )
)]
pub async fn get_reservation(
    State(state): State<ReservationAppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<ReservationDto>>, (StatusCode, Json<ApiResponse<ReservationDto>>)> {
    match state.reservations.find_by_id(&id).await {
        Ok(Some(reservation)) => Ok(Json(ApiResponse::success(ReservationDto::from_domain(
            reservation,
        )))),
        Ok(None) => Err((
            StatusCode::NOT_FOUND,
            Json(ApiResponse::error(format!("Reservation {} not found", id))),
        )),
        Err(e) => Err((
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::error(e.to_string())),
        )),
    }
}

/// Отмена бронирования
///
/// Допускается только для активного бронирования до начала рейса.
/// После начала рейса или для завершённых бронирований вернёт 400
/// с указанием причины.
#[utoipa::path(
    post,
    path = "/api/v1/reservations/{id}/cancel",
    tag = "Reservations",
    params(
        ("id" = String, Path, description = "Идентификатор бронирования (UUID)")
    ),
    responses(
        (status = 200, description = "Бронирование отменено", body = ApiResponse<ReservationDto>),
        (status = 400, description = "Переход недопустим (рейс уже начался или бронирование завершено)"),
        (status = 404, description = "Бронирование не найдено")
    )
)]
pub async fn cancel_reservation(
    State(state): State<ReservationAppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<ReservationDto>>, (StatusCode, Json<ApiResponse<()>>)> {
    match state.lifecycle.cancel(&id, Utc::now()).await {
        Ok(reservation) => Ok(Json(ApiResponse::success(ReservationDto::from_domain(
            reservation,
        )))),
        Err(e) => Err((error_status(&e), Json(ApiResponse::error(e.to_string())))),
    }
}

/// Завершение рейса
///
/// Допускается только для активного бронирования после начала рейса.
#[utoipa::path(
    post,
    path = "/api/v1/reservations/{id}/complete",
    tag = "Reservations",
    params(
        ("id" = String, Path, description = "Идентификатор бронирования (UUID)")
    ),
    responses(
        (status = 200, description = "Рейс завершён", body = ApiResponse<ReservationDto>),
        (status = 400, description = "Переход недопустим (рейс ещё не начался или бронирование завершено)"),
        (status = 404, description = "Бронирование не найдено")
    )
)]
pub async fn complete_reservation(
    State(state): State<ReservationAppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<ReservationDto>>, (StatusCode, Json<ApiResponse<()>>)> {
    match state.lifecycle.complete(&id, Utc::now()).await {
        Ok(reservation) => Ok(Json(ApiResponse::success(ReservationDto::from_domain(
            reservation,
        )))),
        Err(e) => Err((error_status(&e), Json(ApiResponse::error(e.to_string())))),
    }
}
