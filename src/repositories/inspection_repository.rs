use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::car::Car;
use crate::models::technical_inspection::TechnicalInspection;
use crate::repositories::InspectionRepository;
use crate::utils::errors::{not_found_error, AppResult};

pub struct PgInspectionRepository {
    pool: PgPool,
}

impl PgInspectionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl InspectionRepository for PgInspectionRepository {
    async fn record(&self, inspection: &TechnicalInspection, car: &Car) -> AppResult<TechnicalInspection> {
        let mut tx = self.pool.begin().await?;

        let saved = sqlx::query_as::<_, TechnicalInspection>(
            r#"
            INSERT INTO technical_inspections (id, car_id, mechanic_id, inspected_at, passed, mileage, notes)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(inspection.id)
        .bind(inspection.car_id)
        .bind(inspection.mechanic_id)
        .bind(inspection.inspected_at)
        .bind(inspection.passed)
        .bind(inspection.mileage)
        .bind(&inspection.notes)
        .fetch_one(&mut *tx)
        .await?;

        let updated = sqlx::query(
            "UPDATE cars SET technical_status = $2, mileage = $3, updated_at = NOW() WHERE id = $1",
        )
        .bind(car.id)
        .bind(car.technical_status)
        .bind(car.mileage)
        .execute(&mut *tx)
        .await?;

        if updated.rows_affected() == 0 {
            return Err(not_found_error("Car", car.id));
        }

        tx.commit().await?;
        Ok(saved)
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<TechnicalInspection>> {
        let inspection =
            sqlx::query_as::<_, TechnicalInspection>("SELECT * FROM technical_inspections WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(inspection)
    }

    async fn latest_for_car(&self, car_id: Uuid) -> AppResult<Option<TechnicalInspection>> {
        let inspection = sqlx::query_as::<_, TechnicalInspection>(
            "SELECT * FROM technical_inspections WHERE car_id = $1 ORDER BY inspected_at DESC LIMIT 1",
        )
        .bind(car_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(inspection)
    }

    async fn list_for_car(&self, car_id: Uuid) -> AppResult<Vec<TechnicalInspection>> {
        let inspections = sqlx::query_as::<_, TechnicalInspection>(
            "SELECT * FROM technical_inspections WHERE car_id = $1 ORDER BY inspected_at DESC",
        )
        .bind(car_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(inspections)
    }

    async fn delete_older_than(&self, cutoff: DateTime<Utc>) -> AppResult<u64> {
        let result = sqlx::query("DELETE FROM technical_inspections WHERE inspected_at < $1")
            .bind(cutoff)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}
