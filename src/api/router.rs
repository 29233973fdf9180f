//! API Router with Swagger UI

use std::sync::Arc;

use axum::{
    extract::FromRef,
    routing::{get, post},
    Router,
};
use metrics_exporter_prometheus::PrometheusHandle;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::dto::*;
use crate::api::handlers::{
    availability, customers, health, monitoring, reservations, vehicles,
};
use crate::application::services::{AvailabilityService, BookingService, LifecycleService};
use crate::domain::{CustomerRepository, ReservationRepository, VehicleRepository};

/// Unified state for all fleet routes. Axum extracts the specific handler
/// state via `FromRef`.
#[derive(Clone)]
pub struct FleetApiState {
    pub vehicles: Arc<dyn VehicleRepository>,
    pub customers: Arc<dyn CustomerRepository>,
    pub reservations: Arc<dyn ReservationRepository>,
    pub availability: Arc<AvailabilityService>,
    pub booking: Arc<BookingService>,
    pub lifecycle: Arc<LifecycleService>,
}

// -- FromRef implementations so each handler keeps its own State<T> extractor --

impl FromRef<FleetApiState> for vehicles::VehicleAppState {
    fn from_ref(s: &FleetApiState) -> Self {
        vehicles::VehicleAppState {
            vehicles: Arc::clone(&s.vehicles),
        }
    }
}

impl FromRef<FleetApiState> for customers::CustomerAppState {
    fn from_ref(s: &FleetApiState) -> Self {
        customers::CustomerAppState {
            customers: Arc::clone(&s.customers),
        }
    }
}

impl FromRef<FleetApiState> for availability::AvailabilityAppState {
    fn from_ref(s: &FleetApiState) -> Self {
        availability::AvailabilityAppState {
            availability: Arc::clone(&s.availability),
        }
    }
}

impl FromRef<FleetApiState> for reservations::ReservationAppState {
    fn from_ref(s: &FleetApiState) -> Self {
        reservations::ReservationAppState {
            booking: Arc::clone(&s.booking),
            lifecycle: Arc::clone(&s.lifecycle),
            reservations: Arc::clone(&s.reservations),
        }
    }
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        // Health
        health::health_check,
        // Availability
        availability::search_availability,
        // Reservations
        reservations::create_reservation,
        reservations::list_reservations,
        reservations::get_reservation,
        reservations::cancel_reservation,
        reservations::complete_reservation,
        // Vehicles
        vehicles::list_vehicles,
        vehicles::get_vehicle,
        // Customers
        customers::get_customer,
    ),
    components(
        schemas(
            // Common
            ApiResponse<String>,
            PaginatedResponse<ReservationDto>,
            PaginatedResponse<VehicleDto>,
            PaginationParams,
            EmptyData,
            // Availability
            AvailabilityResponse,
            UnavailableVehicleDto,
            // Reservations
            ReservationDto,
            ReservationDetailsDto,
            CreateReservationRequest,
            ReservationConflictDto,
            // Vehicles & customers
            VehicleDto,
            CustomerDto,
        )
    ),
    tags(
        (name = "Health", description = "Проверка состояния сервера. Используйте для health-check мониторинга (uptime, ping, readiness)."),
        (name = "Availability", description = "Поиск свободных ТС для окна рейса. Окно рассчитывается от `start_time` по маршруту (6-значные почтовые индексы) либо по умолчанию 8 часов. Результат ориентировочный: занятость перепроверяется при бронировании."),
        (name = "Reservations", description = "Бронирование ТС с гарантией отсутствия двойных броней: перепроверка пересечений и запись выполняются атомарно на стороне хранилища. Статусы: `Active`, `Completed`, `Cancelled`."),
        (name = "Vehicles", description = "Автопарк (только чтение). Состав парка ведёт внешняя система управления; здесь — список и карточка ТС с грузоподъёмностью в кг."),
        (name = "Customers", description = "Заказчики (только чтение). Аутентификация и управление учётными записями выполняются внешним сервисом."),
    )
)]
pub struct ApiDoc;

/// Build the REST API router.
pub fn create_api_router(state: FleetApiState, prometheus: PrometheusHandle) -> Router {
    health::mark_started();

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let availability_routes = Router::new()
        .route("/", get(availability::search_availability))
        .with_state(state.clone());

    let reservation_routes = Router::new()
        .route(
            "/",
            get(reservations::list_reservations).post(reservations::create_reservation),
        )
        .route("/{id}", get(reservations::get_reservation))
        .route("/{id}/cancel", post(reservations::cancel_reservation))
        .route("/{id}/complete", post(reservations::complete_reservation))
        .with_state(state.clone());

    let vehicle_routes = Router::new()
        .route("/", get(vehicles::list_vehicles))
        .route("/{id}", get(vehicles::get_vehicle))
        .with_state(state.clone());

    let customer_routes = Router::new()
        .route("/{id}", get(customers::get_customer))
        .with_state(state);

    let metrics_state = monitoring::MetricsState { prometheus };

    let swagger_routes = SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi());

    Router::new()
        // Swagger UI
        .merge(swagger_routes)
        // Health & metrics
        .route("/health", get(health::health_check))
        .route(
            "/metrics",
            get(monitoring::render_metrics).with_state(metrics_state),
        )
        // Availability
        .nest("/api/v1/availability", availability_routes)
        // Reservations
        .nest("/api/v1/reservations", reservation_routes)
        // Vehicles (read-only)
        .nest("/api/v1/vehicles", vehicle_routes)
        // Customers (read-only)
        .nest("/api/v1/customers", customer_routes)
        // Middleware
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
