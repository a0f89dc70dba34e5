//! Servicio del registro de conductores
//!
//! Mantiene la asignación 1:1 conductor ↔ coche.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use crate::models::{driver::Driver, user::UserRole};
use crate::repositories::{CarRepository, DriverRepository, UserRepository, WaybillRepository};
use crate::utils::errors::{
    conflict_error, invalid_state_error, not_found_error, AppError, AppResult,
};

#[derive(Clone)]
pub struct DriverService {
    drivers: Arc<dyn DriverRepository>,
    cars: Arc<dyn CarRepository>,
    users: Arc<dyn UserRepository>,
    waybills: Arc<dyn WaybillRepository>,
}

impl DriverService {
    pub fn new(
        drivers: Arc<dyn DriverRepository>,
        cars: Arc<dyn CarRepository>,
        users: Arc<dyn UserRepository>,
        waybills: Arc<dyn WaybillRepository>,
    ) -> Self {
        Self {
            drivers,
            cars,
            users,
            waybills,
        }
    }

    pub async fn create(
        &self,
        full_name: String,
        license_number: &str,
        phone: Option<String>,
        user_id: Option<Uuid>,
    ) -> AppResult<Driver> {
        let license_number = license_number.trim().to_uppercase();
        if self.drivers.license_exists(&license_number).await? {
            return Err(conflict_error("Driver", "license number", &license_number));
        }

        if let Some(user_id) = user_id {
            let user = self
                .users
                .find_by_id(user_id)
                .await?
                .ok_or_else(|| not_found_error("User", user_id))?;
            if user.role != UserRole::Driver {
                return Err(AppError::BadRequest(format!(
                    "user {} has role {} and cannot be linked to a driver",
                    user.login, user.role
                )));
            }
            if self.drivers.find_by_user(user_id).await?.is_some() {
                return Err(conflict_error("Driver", "user account", &user_id.to_string()));
            }
        }

        let driver = self
            .drivers
            .create(&Driver::new(full_name, license_number, phone, user_id))
            .await?;

        info!("🧑 Conductor {} registrado", driver.license_number);
        Ok(driver)
    }

    pub async fn get(&self, id: Uuid) -> AppResult<Driver> {
        self.drivers
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Driver", id))
    }

    /// Conductor vinculado a una cuenta de usuario
    pub async fn get_by_user(&self, user_id: Uuid) -> AppResult<Driver> {
        self.drivers
            .find_by_user(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("no driver is linked to user '{}'", user_id)))
    }

    pub async fn list(&self) -> AppResult<Vec<Driver>> {
        self.drivers.list().await
    }

    pub async fn update_contact(
        &self,
        id: Uuid,
        full_name: Option<String>,
        phone: Option<String>,
    ) -> AppResult<Driver> {
        let mut driver = self.get(id).await?;
        if let Some(full_name) = full_name {
            driver.full_name = full_name;
        }
        if phone.is_some() {
            driver.phone = phone;
        }
        self.drivers.update(&driver).await
    }

    pub async fn assign_car(&self, driver_id: Uuid, car_id: Uuid) -> AppResult<Driver> {
        let driver = self.get(driver_id).await?;
        let car = self
            .cars
            .find_by_id(car_id)
            .await?
            .ok_or_else(|| not_found_error("Car", car_id))?;

        if driver.current_car_id == Some(car.id) {
            return Ok(driver);
        }

        if let Some(holder) = self.drivers.find_by_car(car.id).await? {
            return Err(AppError::Conflict(format!(
                "car {} is already assigned to driver {}",
                car.plate, holder.full_name
            )));
        }
        self.ensure_no_active_waybill(&driver).await?;
        if self.waybills.active_for_car(car.id).await?.is_some() {
            return Err(invalid_state_error(format!(
                "car {} has an active waybill",
                car.plate
            )));
        }

        let driver = self.drivers.set_car(driver.id, Some(car.id)).await?;
        info!("🔑 Coche {} asignado a {}", car.plate, driver.full_name);
        Ok(driver)
    }

    pub async fn unassign_car(&self, driver_id: Uuid) -> AppResult<Driver> {
        let driver = self.get(driver_id).await?;
        if driver.current_car_id.is_none() {
            return Ok(driver);
        }
        self.ensure_no_active_waybill(&driver).await?;

        let driver = self.drivers.set_car(driver.id, None).await?;
        info!("🔑 Conductor {} sin coche asignado", driver.full_name);
        Ok(driver)
    }

    /// Borrado administrativo en cascada
    pub async fn delete(&self, driver_id: Uuid) -> AppResult<()> {
        let driver = self.get(driver_id).await?;
        self.ensure_no_active_waybill(&driver).await?;

        self.drivers.delete_cascade(driver.id).await?;
        info!("🗑️ Conductor {} eliminado", driver.license_number);
        Ok(())
    }

    async fn ensure_no_active_waybill(&self, driver: &Driver) -> AppResult<()> {
        if let Some(waybill) = self.waybills.active_for_driver(driver.id).await? {
            return Err(invalid_state_error(format!(
                "driver {} is on shift with active waybill {}",
                driver.full_name, waybill.id
            )));
        }
        Ok(())
    }
}
