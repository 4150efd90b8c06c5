use std::sync::Arc;

use tokio::sync::RwLock;

use crate::model::{NewVehicle, Vehicle};

#[derive(Default)]
struct Inner {
    vehicles: Vec<Vehicle>,
    next_id: u64,
}

/// In-memory vehicle store shared by the route handlers.
#[derive(Clone, Default)]
pub struct VehicleStore {
    inner: Arc<RwLock<Inner>>,
}

impl VehicleStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store pre-filled with the given vehicles, ids assigned in order.
    pub async fn seeded(vehicles: impl IntoIterator<Item = NewVehicle>) -> Self {
        let store = Self::new();
        for vehicle in vehicles {
            store.create(vehicle).await;
        }
        store
    }

    pub async fn list(&self) -> Vec<Vehicle> {
        self.inner.read().await.vehicles.clone()
    }

    pub async fn get(&self, id: u64) -> Option<Vehicle> {
        self.inner
            .read()
            .await
            .vehicles
            .iter()
            .find(|v| v.id == id)
            .cloned()
    }

    pub async fn create(&self, new: NewVehicle) -> Vehicle {
        let mut inner = self.inner.write().await;
        inner.next_id += 1;
        let vehicle = Vehicle {
            id: inner.next_id,
            make: new.make,
            model: new.model,
            year: new.year,
        };
        inner.vehicles.push(vehicle.clone());
        vehicle
    }

    /// Replace the vehicle with `id`; `None` when it does not exist.
    pub async fn update(&self, id: u64, new: NewVehicle) -> Option<Vehicle> {
        let mut inner = self.inner.write().await;
        let vehicle = inner.vehicles.iter_mut().find(|v| v.id == id)?;
        vehicle.make = new.make;
        vehicle.model = new.model;
        vehicle.year = new.year;
        Some(vehicle.clone())
    }

    pub async fn delete(&self, id: u64) -> bool {
        let mut inner = self.inner.write().await;
        let before = inner.vehicles.len();
        inner.vehicles.retain(|v| v.id != id);
        inner.vehicles.len() != before
    }
}
