//! Servicio de waybills (ciclo de vida del turno)
//!
//! Abrir exige conductor con coche asignado, examen médico aprobado,
//! inspección aprobada del coche, coche operativo y ningún otro waybill
//! activo para el conductor ni para el coche. Cerrar exige que el conductor
//! no tenga pedidos en curso.

use std::sync::Arc;

use chrono::Utc;
use rust_decimal::Decimal;
use tracing::info;
use uuid::Uuid;

use crate::models::{
    order::Order,
    waybill::{NewWaybill, Waybill},
};
use crate::repositories::{
    CarRepository, DriverRepository, OrderFilter, OrderRepository, WaybillFilter,
    WaybillRepository,
};
use crate::services::{
    medical_check_service::MedicalCheckService,
    technical_inspection_service::TechnicalInspectionService,
};
use crate::utils::errors::{invalid_state_error, not_found_error, AppError, AppResult};

#[derive(Clone)]
pub struct WaybillService {
    waybills: Arc<dyn WaybillRepository>,
    drivers: Arc<dyn DriverRepository>,
    cars: Arc<dyn CarRepository>,
    orders: Arc<dyn OrderRepository>,
    medical: MedicalCheckService,
    inspections: TechnicalInspectionService,
    commission_rate: Decimal,
}

impl WaybillService {
    pub fn new(
        waybills: Arc<dyn WaybillRepository>,
        drivers: Arc<dyn DriverRepository>,
        cars: Arc<dyn CarRepository>,
        orders: Arc<dyn OrderRepository>,
        medical: MedicalCheckService,
        inspections: TechnicalInspectionService,
        commission_rate: Decimal,
    ) -> Self {
        Self {
            waybills,
            drivers,
            cars,
            orders,
            medical,
            inspections,
            commission_rate,
        }
    }

    /// Abrir un turno para el conductor con su coche asignado
    pub async fn open(
        &self,
        driver_id: Uuid,
        issued_by: Uuid,
        initial_mileage: Option<i32>,
    ) -> AppResult<Waybill> {
        let driver = self
            .drivers
            .find_by_id(driver_id)
            .await?
            .ok_or_else(|| AppError::NotFound("driver not found".to_string()))?;

        let car_id = driver
            .current_car_id
            .ok_or_else(|| invalid_state_error("driver has no car assigned"))?;
        let car = self
            .cars
            .find_by_id(car_id)
            .await?
            .ok_or_else(|| AppError::NotFound("car not found".to_string()))?;

        let medical_check = self
            .medical
            .clearing_check(driver.id)
            .await?
            .ok_or_else(|| invalid_state_error("driver has not passed a medical check"))?;

        let inspection = self
            .inspections
            .clearing_inspection(car.id)
            .await?
            .ok_or_else(|| invalid_state_error("car has not passed a technical inspection"))?;

        if !car.is_operational() {
            return Err(invalid_state_error("car not operational"));
        }

        if let Some(active) = self.waybills.active_for_driver(driver.id).await? {
            return Err(AppError::Conflict(format!(
                "driver already has active waybill {}",
                active.id
            )));
        }
        if let Some(active) = self.waybills.active_for_car(car.id).await? {
            return Err(AppError::Conflict(format!(
                "car already has active waybill {}",
                active.id
            )));
        }

        let initial_mileage = initial_mileage.unwrap_or(car.mileage);
        if initial_mileage < car.mileage {
            return Err(invalid_state_error(format!(
                "initial mileage {} is lower than the odometer ({})",
                initial_mileage, car.mileage
            )));
        }

        let waybill = Waybill::open(
            NewWaybill {
                driver_id: driver.id,
                car_id: car.id,
                issued_by,
                medical_check_id: Some(medical_check.id),
                inspection_id: Some(inspection.id),
                initial_mileage,
            },
            Utc::now(),
        );
        let waybill = self.waybills.create(&waybill).await?;

        info!(
            "📋 Turno abierto: waybill {} conductor {} coche {}",
            waybill.id, driver.full_name, car.plate
        );
        Ok(waybill)
    }

    /// Cerrar el turno y calcular las ganancias del conductor
    pub async fn close(
        &self,
        waybill_id: Uuid,
        mechanic_id: Uuid,
        final_mileage: i32,
        earnings_override: Option<Decimal>,
    ) -> AppResult<Waybill> {
        let mut waybill = self.get(waybill_id).await?;
        if !waybill.is_active() {
            return Err(invalid_state_error(format!(
                "waybill {} is not active",
                waybill.id
            )));
        }

        let in_progress = self
            .orders
            .count_in_progress_for_driver(waybill.driver_id)
            .await?;
        if in_progress > 0 {
            return Err(invalid_state_error(format!(
                "driver still has {} order(s) in progress",
                in_progress
            )));
        }

        waybill.close(
            mechanic_id,
            final_mileage,
            earnings_override,
            self.commission_rate,
            Utc::now(),
        )?;
        let waybill = self.waybills.close(&waybill).await?;

        info!(
            "📋 Turno cerrado: waybill {} pedidos={} recaudación={} ganancias={}",
            waybill.id, waybill.order_count, waybill.revenue, waybill.earnings
        );
        Ok(waybill)
    }

    pub async fn cancel(&self, waybill_id: Uuid, reason: &str) -> AppResult<Waybill> {
        let mut waybill = self.get(waybill_id).await?;
        waybill.cancel(reason, Utc::now())?;

        let waybill = self.waybills.update(&waybill).await?;
        info!("📋 Waybill {} cancelado: {}", waybill.id, reason);
        Ok(waybill)
    }

    pub async fn get(&self, id: Uuid) -> AppResult<Waybill> {
        self.waybills
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Waybill", id))
    }

    pub async fn list(&self, filter: &WaybillFilter) -> AppResult<Vec<Waybill>> {
        self.waybills.list(filter).await
    }

    pub async fn active_for_driver(&self, driver_id: Uuid) -> AppResult<Option<Waybill>> {
        self.waybills.active_for_driver(driver_id).await
    }

    /// Pedidos atendidos dentro del turno
    pub async fn orders(&self, waybill_id: Uuid) -> AppResult<Vec<Order>> {
        let waybill = self.get(waybill_id).await?;
        self.orders
            .list(&OrderFilter {
                waybill_id: Some(waybill.id),
                ..Default::default()
            })
            .await
    }
}
