//! Vehicle repository interface

use async_trait::async_trait;

use super::model::Vehicle;
use crate::domain::DomainResult;

#[async_trait]
pub trait VehicleRepository: Send + Sync {
    /// Find a vehicle by registration plate
    async fn find_by_id(&self, id: &str) -> DomainResult<Option<Vehicle>>;

    /// All vehicles, active or not
    async fn list_all(&self) -> DomainResult<Vec<Vehicle>>;

    /// Vehicles currently in service, in stable insertion order
    async fn list_active(&self) -> DomainResult<Vec<Vehicle>>;

    /// Save a new vehicle (used by startup seeding; fleet administration
    /// itself lives outside this service)
    async fn save(&self, vehicle: Vehicle) -> DomainResult<()>;

    /// Total number of vehicles in the fleet
    async fn count(&self) -> DomainResult<u64>;
}
