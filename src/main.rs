//!
//! Fleet booking REST service for a capacity-constrained truck fleet.
//! Reads configuration from TOML file (~/.config/texnouz-fleet/config.toml).

use std::sync::Arc;

use sea_orm_migration::MigratorTrait;
use tracing::{error, info, warn};

use texnouz_fleet::application::services::{
    AvailabilityService, BookingService, LifecycleService,
};
use texnouz_fleet::config::AppConfig;
use texnouz_fleet::domain::{
    Customer, CustomerRepository, ReservationRepository, Vehicle, VehicleRepository,
};
use texnouz_fleet::infrastructure::database::migrator::Migrator;
use texnouz_fleet::shared::shutdown::ShutdownCoordinator;
use texnouz_fleet::{
    create_api_router, default_config_path, init_database, DatabaseConfig, FleetApiState,
    SeaOrmCustomerRepository, SeaOrmReservationRepository, SeaOrmVehicleRepository,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // ── Load configuration ─────────────────────────────────────
    let config_path = std::env::var("FLEET_CONFIG")
        .map(std::path::PathBuf::from)
        .unwrap_or_else(|_| default_config_path());
    let app_cfg = match AppConfig::load(&config_path) {
        Ok(cfg) => {
            // Initialize logging with configured level
            tracing_subscriber::fmt()
                .with_env_filter(
                    tracing_subscriber::EnvFilter::try_from_default_env()
                        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cfg.logging.level)),
                )
                .init();
            info!("Configuration loaded from {}", config_path.display());
            cfg
        }
        Err(e) => {
            tracing_subscriber::fmt()
                .with_env_filter(tracing_subscriber::EnvFilter::new("info"))
                .init();
            error!("Failed to load config: {}. Using defaults.", e);
            AppConfig::default()
        }
    };

    info!("Starting Texnouz Fleet Booking Service...");

    // ── Prometheus metrics recorder (must be installed before any metrics calls) ──
    let prometheus_handle = metrics_exporter_prometheus::PrometheusBuilder::new()
        .install_recorder()
        .expect("Failed to install Prometheus metrics recorder");
    info!("📊 Prometheus metrics recorder installed");

    // ── Database ───────────────────────────────────────────────
    let db_config = DatabaseConfig {
        url: app_cfg.database.connection_url(),
    };
    info!("Database: {}", db_config.url);

    let db = match init_database(&db_config).await {
        Ok(db) => db,
        Err(e) => {
            error!("Failed to connect to database: {}", e);
            return Err(e.into());
        }
    };

    info!("Running database migrations...");
    if let Err(e) = Migrator::up(&db, None).await {
        error!("Failed to run migrations: {}", e);
        return Err(e.into());
    }
    info!("Migrations completed");

    // ── Repositories & services ────────────────────────────────
    let vehicles: Arc<dyn VehicleRepository> = Arc::new(SeaOrmVehicleRepository::new(db.clone()));
    let customers: Arc<dyn CustomerRepository> =
        Arc::new(SeaOrmCustomerRepository::new(db.clone()));
    let reservations: Arc<dyn ReservationRepository> =
        Arc::new(SeaOrmReservationRepository::new(db.clone()));

    if app_cfg.seed.demo_data {
        seed_demo_data(vehicles.as_ref(), customers.as_ref()).await;
    }

    let availability = Arc::new(AvailabilityService::new(
        vehicles.clone(),
        reservations.clone(),
    ));
    let booking = Arc::new(BookingService::new(
        vehicles.clone(),
        customers.clone(),
        reservations.clone(),
    ));
    let lifecycle = Arc::new(LifecycleService::new(reservations.clone()));

    let state = FleetApiState {
        vehicles,
        customers,
        reservations,
        availability,
        booking,
        lifecycle,
    };

    // ── Shutdown coordination ──────────────────────────────────
    let shutdown = ShutdownCoordinator::new();
    let shutdown_signal = shutdown.signal();
    shutdown.start_signal_listener();

    // ── REST API server ────────────────────────────────────────
    let api_router = create_api_router(state, prometheus_handle);

    let api_addr = format!("{}:{}", app_cfg.server.host, app_cfg.server.port);
    let listener = tokio::net::TcpListener::bind(&api_addr).await?;
    info!("REST API server listening on http://{}", api_addr);
    info!("Swagger UI available at http://{}/docs/", api_addr);

    info!("🚀 Server started. Press Ctrl+C to shutdown gracefully.");

    let serve_result = axum::serve(listener, api_router)
        .with_graceful_shutdown(async move {
            shutdown_signal.wait().await;
            info!("🛑 REST API server received shutdown signal");
        })
        .await;

    if let Err(e) = serve_result {
        error!("REST API server error: {}", e);
    }

    // Perform final cleanup
    info!("🧹 Performing final cleanup...");

    if let Err(e) = db.close().await {
        warn!("Error closing database connection: {}", e);
    } else {
        info!("✅ Database connection closed");
    }

    info!("👋 Texnouz Fleet Booking Service shutdown complete");
    Ok(())
}

/// Seed a small demo fleet and customer when the tables are empty, so a
/// fresh install has something to search and book against.
async fn seed_demo_data(vehicles: &dyn VehicleRepository, customers: &dyn CustomerRepository) {
    match vehicles.count().await {
        Ok(0) => {
            info!("Seeding demo fleet...");
            let demo_fleet = [
                ("01A450BA", "Isuzu NPR 75L", 4500),
                ("01B210KA", "GAZelle Next", 1500),
                ("01C900TR", "MAN TGS 28.430", 9000),
                ("01D300MV", "Hyundai Mighty EX8", 3000),
            ];
            for (plate, model, capacity_kg) in demo_fleet {
                if let Err(e) = vehicles.save(Vehicle::new(plate, model, capacity_kg)).await {
                    error!("Failed to seed vehicle {}: {}", plate, e);
                }
            }
        }
        Ok(_) => {}
        Err(e) => error!("Failed to count vehicles: {}", e),
    }

    match customers.count().await {
        Ok(0) => {
            let demo = Customer::new("Davron Logistics", "dispatch@davron.uz");
            let id = demo.id.clone();
            match customers.save(demo).await {
                Ok(()) => info!("Demo customer created: Davron Logistics ({})", id),
                Err(e) => error!("Failed to seed demo customer: {}", e),
            }
        }
        Ok(_) => {}
        Err(e) => error!("Failed to count customers: {}", e),
    }
}
