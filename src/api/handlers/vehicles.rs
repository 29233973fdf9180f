//! Vehicle API handlers
//!
//! Read-only: the fleet roster is managed by an external administration
//! system, this service only books what it is given.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::api::dto::{ApiResponse, PaginatedResponse, PaginationParams, VehicleDto};
use crate::domain::VehicleRepository;

/// Vehicle handler state
#[derive(Clone)]
pub struct VehicleAppState {
    pub vehicles: Arc<dyn VehicleRepository>,
}

/// Список ТС автопарка
///
/// Возвращает все транспортные средства с пагинацией,
/// включая выведенные из эксплуатации.
#[utoipa::path(
    get,
    path = "/api/v1/vehicles",
    tag = "Vehicles",
    params(PaginationParams),
    responses(
        (status = 200, description = "Список ТС с пагинацией", body = PaginatedResponse<VehicleDto>)
    )
)]
pub async fn list_vehicles(
    State(state): State<VehicleAppState>,
    Query(pagination): Query<PaginationParams>,
) -> Result<Json<PaginatedResponse<VehicleDto>>, (StatusCode, Json<ApiResponse<()>>)> {
    match state.vehicles.list_all().await {
        Ok(vehicles) => {
            let total = vehicles.len() as u64;
            let page = pagination.page.max(1);
            let limit = pagination.limit.clamp(1, 100);
            let start = ((page - 1) * limit) as usize;
            let items: Vec<VehicleDto> = vehicles
                .into_iter()
                .skip(start)
                .take(limit as usize)
                .map(VehicleDto::from_domain)
                .collect();
            Ok(Json(PaginatedResponse::new(items, total, page, limit)))
        }
        Err(e) => Err((
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::error(e.to_string())),
        )),
    }
}

/// Получение ТС по регистрационному номеру
#[utoipa::path(
    get,
    path = "/api/v1/vehicles/{id}",
    tag = "Vehicles",
    params(
        ("id" = String, Path, description = "Регистрационный номер ТС")
    ),
    responses(
        (status = 200, description = "Данные ТС", body = ApiResponse<VehicleDto>),
        (status = 404, description = "ТС не найдено")
    )
)]
pub async fn get_vehicle(
    State(state): State<VehicleAppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<VehicleDto>>, (StatusCode, Json<ApiResponse<VehicleDto>>)> {
    match state.vehicles.find_by_id(&id).await {
        Ok(Some(vehicle)) => Ok(Json(ApiResponse::success(VehicleDto::from_domain(vehicle)))),
        Ok(None) => Err((
            StatusCode::NOT_FOUND,
            Json(ApiResponse::error(format!("Vehicle {} not found", id))),
        )),
        Err(e) => Err((
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::error(e.to_string())),
        )),
    }
}
