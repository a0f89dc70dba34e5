//! Servicio de inspecciones técnicas
//!
//! La inspección más reciente decide si el coche puede salir.

use std::sync::Arc;

use chrono::{Duration, Utc};
use tracing::info;
use uuid::Uuid;

use crate::models::technical_inspection::TechnicalInspection;
use crate::repositories::{CarRepository, InspectionRepository};
use crate::utils::errors::{invalid_state_error, not_found_error, AppError, AppResult};

#[derive(Clone)]
pub struct TechnicalInspectionService {
    inspections: Arc<dyn InspectionRepository>,
    cars: Arc<dyn CarRepository>,
}

impl TechnicalInspectionService {
    pub fn new(inspections: Arc<dyn InspectionRepository>, cars: Arc<dyn CarRepository>) -> Self {
        Self { inspections, cars }
    }

    pub async fn record(
        &self,
        car_id: Uuid,
        mechanic_id: Uuid,
        passed: bool,
        mileage: i32,
        notes: Option<String>,
    ) -> AppResult<TechnicalInspection> {
        let mut car = self
            .cars
            .find_by_id(car_id)
            .await?
            .ok_or_else(|| not_found_error("Car", car_id))?;

        // El resultado solo vale para el coche tal como sale del taller
        if car.in_repair {
            return Err(invalid_state_error(format!(
                "car {} is in repair, take it out of repair before inspecting it",
                car.plate
            )));
        }

        if mileage < car.mileage {
            return Err(invalid_state_error(format!(
                "inspection mileage {} is lower than the odometer of car {} ({})",
                mileage, car.plate, car.mileage
            )));
        }

        let inspection = TechnicalInspection::new(car.id, mechanic_id, passed, mileage, notes);
        car.apply_inspection(passed, mileage);
        let inspection = self.inspections.record(&inspection, &car).await?;

        info!(
            "🔍 Inspección de {}: {}",
            car.plate,
            if passed { "aprobada" } else { "rechazada" }
        );
        Ok(inspection)
    }

    pub async fn get(&self, id: Uuid) -> AppResult<TechnicalInspection> {
        self.inspections
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Technical inspection", id))
    }

    pub async fn latest_for_car(&self, car_id: Uuid) -> AppResult<Option<TechnicalInspection>> {
        self.inspections.latest_for_car(car_id).await
    }

    pub async fn history(&self, car_id: Uuid) -> AppResult<Vec<TechnicalInspection>> {
        self.inspections.list_for_car(car_id).await
    }

    /// Inspección que habilita al coche, si la más reciente está aprobada
    pub async fn clearing_inspection(&self, car_id: Uuid) -> AppResult<Option<TechnicalInspection>> {
        Ok(self
            .inspections
            .latest_for_car(car_id)
            .await?
            .filter(|inspection| inspection.passed))
    }

    pub async fn is_cleared(&self, car_id: Uuid) -> AppResult<bool> {
        Ok(self.clearing_inspection(car_id).await?.is_some())
    }

    /// Borrar inspecciones con más de `days` días
    pub async fn cleanup_older_than(&self, days: i64) -> AppResult<u64> {
        if days < 1 {
            return Err(AppError::BadRequest("days must be at least 1".to_string()));
        }
        let deleted = self
            .inspections
            .delete_older_than(Utc::now() - Duration::days(days))
            .await?;

        info!("🧹 {} inspecciones eliminadas (más de {} días)", deleted, days);
        Ok(deleted)
    }
}
