//! Servicio de exámenes médicos
//!
//! Filtro de acceso al turno: un conductor queda habilitado si su examen
//! más reciente está aprobado y su estado médico sigue en `passed`.

use std::sync::Arc;

use chrono::{Duration, Utc};
use tracing::info;
use uuid::Uuid;

use crate::models::{driver::MedicalStatus, medical_check::MedicalCheck};
use crate::repositories::{DriverRepository, MedicalCheckRepository};
use crate::utils::errors::{not_found_error, AppError, AppResult};

#[derive(Clone)]
pub struct MedicalCheckService {
    checks: Arc<dyn MedicalCheckRepository>,
    drivers: Arc<dyn DriverRepository>,
}

impl MedicalCheckService {
    pub fn new(checks: Arc<dyn MedicalCheckRepository>, drivers: Arc<dyn DriverRepository>) -> Self {
        Self { checks, drivers }
    }

    pub async fn record(
        &self,
        driver_id: Uuid,
        doctor_id: Uuid,
        passed: bool,
        notes: Option<String>,
        opens_shift: bool,
    ) -> AppResult<MedicalCheck> {
        let driver = self
            .drivers
            .find_by_id(driver_id)
            .await?
            .ok_or_else(|| not_found_error("Driver", driver_id))?;

        let check = MedicalCheck::new(driver.id, doctor_id, passed, notes, opens_shift);
        let check = self
            .checks
            .record(&check, MedicalStatus::from_check(passed))
            .await?;

        info!(
            "🩺 Examen médico de {}: {}",
            driver.full_name,
            if passed { "apto" } else { "no apto" }
        );
        Ok(check)
    }

    pub async fn get(&self, id: Uuid) -> AppResult<MedicalCheck> {
        self.checks
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Medical check", id))
    }

    pub async fn latest_for_driver(&self, driver_id: Uuid) -> AppResult<Option<MedicalCheck>> {
        self.checks.latest_for_driver(driver_id).await
    }

    pub async fn history(&self, driver_id: Uuid) -> AppResult<Vec<MedicalCheck>> {
        self.checks.list_for_driver(driver_id).await
    }

    /// Examen que habilita al conductor, si lo hay
    pub async fn clearing_check(&self, driver_id: Uuid) -> AppResult<Option<MedicalCheck>> {
        let driver = self
            .drivers
            .find_by_id(driver_id)
            .await?
            .ok_or_else(|| not_found_error("Driver", driver_id))?;
        if !driver.is_allowed_to_work() {
            return Ok(None);
        }

        Ok(self
            .checks
            .latest_for_driver(driver_id)
            .await?
            .filter(|check| check.passed))
    }

    pub async fn is_cleared(&self, driver_id: Uuid) -> AppResult<bool> {
        Ok(self.clearing_check(driver_id).await?.is_some())
    }

    /// Única modificación permitida tras crear el examen
    pub async fn update_notes(
        &self,
        id: Uuid,
        notes: Option<String>,
        opens_shift: bool,
    ) -> AppResult<MedicalCheck> {
        self.checks
            .update_notes(id, notes, opens_shift)
            .await?
            .ok_or_else(|| not_found_error("Medical check", id))
    }

    /// Borrar exámenes con más de `days` días
    pub async fn cleanup_older_than(&self, days: i64) -> AppResult<u64> {
        if days < 1 {
            return Err(AppError::BadRequest("days must be at least 1".to_string()));
        }
        let deleted = self
            .checks
            .delete_older_than(Utc::now() - Duration::days(days))
            .await?;

        info!("🧹 {} exámenes médicos eliminados (más de {} días)", deleted, days);
        Ok(deleted)
    }
}
