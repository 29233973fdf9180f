//! In-memory repository doubles for service-level tests
//!
//! The reservation double runs its overlap re-check and insert under one
//! lock, matching the indivisibility the SQL implementation gets from its
//! store transaction.

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};

use crate::domain::{
    Customer, CustomerRepository, DomainError, DomainResult, Reservation, ReservationConflict,
    ReservationRepository, ReservationStatus, TimeWindow, Vehicle, VehicleRepository,
};

// ── Vehicles ───────────────────────────────────────────────────

#[derive(Default)]
pub struct InMemoryVehicleRepository {
    vehicles: Mutex<Vec<Vehicle>>,
}

#[async_trait]
impl VehicleRepository for InMemoryVehicleRepository {
    async fn find_by_id(&self, id: &str) -> DomainResult<Option<Vehicle>> {
        Ok(self
            .vehicles
            .lock()
            .unwrap()
            .iter()
            .find(|v| v.id == id)
            .cloned())
    }

    async fn list_all(&self) -> DomainResult<Vec<Vehicle>> {
        Ok(self.vehicles.lock().unwrap().clone())
    }

    async fn list_active(&self) -> DomainResult<Vec<Vehicle>> {
        Ok(self
            .vehicles
            .lock()
            .unwrap()
            .iter()
            .filter(|v| v.is_active)
            .cloned()
            .collect())
    }

    async fn save(&self, vehicle: Vehicle) -> DomainResult<()> {
        self.vehicles.lock().unwrap().push(vehicle);
        Ok(())
    }

    async fn count(&self) -> DomainResult<u64> {
        Ok(self.vehicles.lock().unwrap().len() as u64)
    }
}

// ── Customers ──────────────────────────────────────────────────

#[derive(Default)]
pub struct InMemoryCustomerRepository {
    customers: Mutex<Vec<Customer>>,
}

#[async_trait]
impl CustomerRepository for InMemoryCustomerRepository {
    async fn find_by_id(&self, id: &str) -> DomainResult<Option<Customer>> {
        Ok(self
            .customers
            .lock()
            .unwrap()
            .iter()
            .find(|c| c.id == id)
            .cloned())
    }

    async fn save(&self, customer: Customer) -> DomainResult<()> {
        self.customers.lock().unwrap().push(customer);
        Ok(())
    }

    async fn count(&self) -> DomainResult<u64> {
        Ok(self.customers.lock().unwrap().len() as u64)
    }
}

// ── Reservations ───────────────────────────────────────────────

#[derive(Default)]
pub struct InMemoryReservationRepository {
    reservations: Mutex<Vec<Reservation>>,
    /// Vehicles whose lookups fail, for scan-resilience tests
    poisoned: Mutex<HashSet<String>>,
}

impl InMemoryReservationRepository {
    /// Make every lookup for this vehicle fail with a storage error.
    pub fn poison_vehicle(&self, vehicle_id: &str) {
        self.poisoned
            .lock()
            .unwrap()
            .insert(vehicle_id.to_string());
    }

    pub async fn active_count(&self, vehicle_id: &str) -> usize {
        self.reservations
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.vehicle_id == vehicle_id && r.is_active())
            .count()
    }
}

#[async_trait]
impl ReservationRepository for InMemoryReservationRepository {
    async fn insert_if_no_overlap(&self, reservation: Reservation) -> DomainResult<Reservation> {
        // Check and insert under one lock: indivisible for concurrent commits.
        let mut store = self.reservations.lock().unwrap();

        let conflicts: Vec<ReservationConflict> = store
            .iter()
            .filter(|r| r.vehicle_id == reservation.vehicle_id && r.is_active())
            .filter_map(|r| r.conflict_with(&reservation.window))
            .collect();

        if !conflicts.is_empty() {
            return Err(DomainError::Conflict {
                vehicle_id: reservation.vehicle_id.clone(),
                conflicts,
            });
        }

        store.push(reservation.clone());
        Ok(reservation)
    }

    async fn find_by_id(&self, id: &str) -> DomainResult<Option<Reservation>> {
        Ok(self
            .reservations
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.id == id)
            .cloned())
    }

    async fn find_active_overlapping(
        &self,
        vehicle_id: &str,
        window: &TimeWindow,
    ) -> DomainResult<Vec<Reservation>> {
        if self.poisoned.lock().unwrap().contains(vehicle_id) {
            return Err(DomainError::Storage(format!(
                "simulated corrupt record for vehicle {}",
                vehicle_id
            )));
        }
        Ok(self
            .reservations
            .lock()
            .unwrap()
            .iter()
            .filter(|r| {
                r.vehicle_id == vehicle_id && r.is_active() && r.window.overlaps(window)
            })
            .cloned()
            .collect())
    }

    async fn update_status(
        &self,
        id: &str,
        status: ReservationStatus,
        completed_at: Option<DateTime<Utc>>,
    ) -> DomainResult<Reservation> {
        let mut store = self.reservations.lock().unwrap();
        let reservation = store
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or(DomainError::NotFound {
                entity: "Reservation",
                field: "id",
                value: id.to_string(),
            })?;
        reservation.status = status;
        if completed_at.is_some() {
            reservation.completed_at = completed_at;
        }
        Ok(reservation.clone())
    }

    async fn list_all(&self) -> DomainResult<Vec<Reservation>> {
        let mut all = self.reservations.lock().unwrap().clone();
        all.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(all)
    }
}

// ── Fixtures ───────────────────────────────────────────────────

pub fn in_memory_repos() -> (
    Arc<InMemoryVehicleRepository>,
    Arc<InMemoryCustomerRepository>,
    Arc<InMemoryReservationRepository>,
) {
    (
        Arc::new(InMemoryVehicleRepository::default()),
        Arc::new(InMemoryCustomerRepository::default()),
        Arc::new(InMemoryReservationRepository::default()),
    )
}

pub async fn seed_vehicle(
    vehicles: &Arc<InMemoryVehicleRepository>,
    plate: &str,
    capacity_kg: i32,
) {
    vehicles
        .save(Vehicle::new(plate, "Test Truck", capacity_kg))
        .await
        .unwrap();
}

pub async fn seed_customer(customers: &Arc<InMemoryCustomerRepository>, name: &str) -> String {
    let customer = Customer::new(name, "dispatch@example.uz");
    let id = customer.id.clone();
    customers.save(customer).await.unwrap();
    id
}

/// Window on a fixed far-future day, by hour of day.
pub fn test_window(start_hour: u32, end_hour: u32) -> TimeWindow {
    let start = Utc
        .with_ymd_and_hms(2030, 6, 15, start_hour, 0, 0)
        .unwrap();
    let end = Utc.with_ymd_and_hms(2030, 6, 15, end_hour, 0, 0).unwrap();
    TimeWindow::new(start, end).unwrap()
}
