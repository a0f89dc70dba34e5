//! Servicio del registro de coches

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use crate::models::car::Car;
use crate::repositories::{CarRepository, WaybillRepository};
use crate::utils::errors::{conflict_error, invalid_state_error, not_found_error, AppResult};
use crate::utils::validation::normalize_plate;

/// Cambios permitidos sobre los datos descriptivos del coche
#[derive(Debug, Clone, Default)]
pub struct CarDetails {
    pub plate: Option<String>,
    pub vin: Option<String>,
    pub brand: Option<String>,
    pub model: Option<String>,
}

#[derive(Clone)]
pub struct CarService {
    cars: Arc<dyn CarRepository>,
    waybills: Arc<dyn WaybillRepository>,
}

impl CarService {
    pub fn new(cars: Arc<dyn CarRepository>, waybills: Arc<dyn WaybillRepository>) -> Self {
        Self { cars, waybills }
    }

    pub async fn create(
        &self,
        plate: &str,
        vin: Option<String>,
        brand: Option<String>,
        model: Option<String>,
        mileage: i32,
    ) -> AppResult<Car> {
        let plate = normalize_plate(plate);
        if self.cars.plate_exists(&plate).await? {
            return Err(conflict_error("Car", "plate", &plate));
        }

        let car = self
            .cars
            .create(&Car::new(plate, vin.map(|v| v.to_uppercase()), brand, model, mileage))
            .await?;

        info!("🚕 Coche {} registrado", car.plate);
        Ok(car)
    }

    pub async fn get(&self, id: Uuid) -> AppResult<Car> {
        self.cars
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Car", id))
    }

    pub async fn list(&self, operational_only: bool) -> AppResult<Vec<Car>> {
        self.cars.list(operational_only).await
    }

    pub async fn update(&self, id: Uuid, details: CarDetails) -> AppResult<Car> {
        let mut car = self.get(id).await?;

        if let Some(plate) = details.plate {
            let plate = normalize_plate(&plate);
            if plate != car.plate && self.cars.plate_exists(&plate).await? {
                return Err(conflict_error("Car", "plate", &plate));
            }
            car.plate = plate;
        }
        if let Some(vin) = details.vin {
            car.vin = Some(vin.to_uppercase());
        }
        if details.brand.is_some() {
            car.brand = details.brand;
        }
        if details.model.is_some() {
            car.model = details.model;
        }

        self.cars.update(&car).await
    }

    /// Mandar el coche al taller o devolverlo al servicio
    pub async fn set_in_repair(&self, id: Uuid, in_repair: bool) -> AppResult<Car> {
        let mut car = self.get(id).await?;
        if in_repair {
            self.ensure_not_on_shift(&car).await?;
        }
        car.set_in_repair(in_repair);

        let car = self.cars.update(&car).await?;
        info!("🔧 Coche {} en taller={}", car.plate, car.in_repair);
        Ok(car)
    }

    pub async fn set_active(&self, id: Uuid, active: bool) -> AppResult<Car> {
        let mut car = self.get(id).await?;
        if !active {
            self.ensure_not_on_shift(&car).await?;
        }
        car.set_active(active);

        let car = self.cars.update(&car).await?;
        info!("🚕 Coche {} activo={}", car.plate, car.active);
        Ok(car)
    }

    async fn ensure_not_on_shift(&self, car: &Car) -> AppResult<()> {
        if let Some(waybill) = self.waybills.active_for_car(car.id).await? {
            return Err(invalid_state_error(format!(
                "car {} is on shift with active waybill {}",
                car.plate, waybill.id
            )));
        }
        Ok(())
    }
}
