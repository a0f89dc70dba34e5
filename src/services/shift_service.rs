//! Servicio de turnos
//!
//! Fachada sobre `WaybillService` orientada al conductor: qué le impide
//! empezar, y abrir/cerrar su turno sin conocer el id del waybill.

use std::sync::Arc;

use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

use crate::models::waybill::Waybill;
use crate::repositories::CarRepository;
use crate::services::{
    driver_service::DriverService, medical_check_service::MedicalCheckService,
    technical_inspection_service::TechnicalInspectionService, waybill_service::WaybillService,
};
use crate::utils::errors::{AppError, AppResult};

/// Estado de preparación del conductor para empezar turno
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ShiftReadiness {
    pub driver_id: Uuid,
    pub car_id: Option<Uuid>,
    pub medical_cleared: bool,
    pub inspection_cleared: bool,
    pub car_operational: bool,
    pub active_waybill_id: Option<Uuid>,
    pub blockers: Vec<String>,
}

impl ShiftReadiness {
    pub fn can_start(&self) -> bool {
        self.blockers.is_empty()
    }
}

#[derive(Clone)]
pub struct ShiftService {
    drivers: DriverService,
    cars: Arc<dyn CarRepository>,
    medical: MedicalCheckService,
    inspections: TechnicalInspectionService,
    waybills: WaybillService,
}

impl ShiftService {
    pub fn new(
        drivers: DriverService,
        cars: Arc<dyn CarRepository>,
        medical: MedicalCheckService,
        inspections: TechnicalInspectionService,
        waybills: WaybillService,
    ) -> Self {
        Self {
            drivers,
            cars,
            medical,
            inspections,
            waybills,
        }
    }

    pub async fn readiness(&self, driver_id: Uuid) -> AppResult<ShiftReadiness> {
        let driver = self.drivers.get(driver_id).await?;
        let mut blockers = Vec::new();

        let medical_cleared = self.medical.is_cleared(driver.id).await?;
        if !medical_cleared {
            blockers.push("driver has not passed a medical check".to_string());
        }

        let (inspection_cleared, car_operational) = match driver.current_car_id {
            Some(car_id) => {
                let inspection_cleared = self.inspections.is_cleared(car_id).await?;
                let car_operational = self
                    .cars
                    .find_by_id(car_id)
                    .await?
                    .map(|car| car.is_operational())
                    .unwrap_or(false);
                if !inspection_cleared {
                    blockers.push("car has not passed a technical inspection".to_string());
                }
                if !car_operational {
                    blockers.push("car not operational".to_string());
                }
                (inspection_cleared, car_operational)
            }
            None => {
                blockers.push("driver has no car assigned".to_string());
                (false, false)
            }
        };

        let active_waybill_id = self
            .waybills
            .active_for_driver(driver.id)
            .await?
            .map(|w| w.id);
        if active_waybill_id.is_some() {
            blockers.push("driver already has an active waybill".to_string());
        }

        Ok(ShiftReadiness {
            driver_id: driver.id,
            car_id: driver.current_car_id,
            medical_cleared,
            inspection_cleared,
            car_operational,
            active_waybill_id,
            blockers,
        })
    }

    pub async fn start_shift(
        &self,
        driver_id: Uuid,
        issued_by: Uuid,
        initial_mileage: Option<i32>,
    ) -> AppResult<Waybill> {
        self.waybills.open(driver_id, issued_by, initial_mileage).await
    }

    pub async fn end_shift(
        &self,
        driver_id: Uuid,
        mechanic_id: Uuid,
        final_mileage: i32,
        earnings_override: Option<Decimal>,
    ) -> AppResult<Waybill> {
        let waybill = self.current_shift(driver_id).await?.ok_or_else(|| {
            AppError::NotFound(format!("driver '{}' has no active waybill", driver_id))
        })?;

        self.waybills
            .close(waybill.id, mechanic_id, final_mileage, earnings_override)
            .await
    }

    pub async fn current_shift(&self, driver_id: Uuid) -> AppResult<Option<Waybill>> {
        let driver = self.drivers.get(driver_id).await?;
        self.waybills.active_for_driver(driver.id).await
    }
}
