//! Customer API handlers

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::api::dto::{ApiResponse, CustomerDto};
use crate::domain::CustomerRepository;

/// Customer handler state
#[derive(Clone)]
pub struct CustomerAppState {
    pub customers: Arc<dyn CustomerRepository>,
}

/// Получение заказчика по идентификатору
#[utoipa::path(
    get,
    path = "/api/v1/customers/{id}",
    tag = "Customers",
    params(
        ("id" = String, Path, description = "Идентификатор заказчика (UUID)")
    ),
    responses(
        (status = 200, description = "Данные заказчика", body = ApiResponse<CustomerDto>),
        (status = 404, description = "Заказчик не найден")
    )
)]
pub async fn get_customer(
    State(state): State<CustomerAppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<CustomerDto>>, (StatusCode, Json<ApiResponse<CustomerDto>>)> {
    match state.customers.find_by_id(&id).await {
        Ok(Some(customer)) => Ok(Json(ApiResponse::success(CustomerDto::from_domain(
            customer,
        )))),
        Ok(None) => Err((
            StatusCode::NOT_FOUND,
            Json(ApiResponse::error(format!("Customer {} not found", id))),
        )),
        Err(e) => Err((
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::error(e.to_string())),
        )),
    }
}
