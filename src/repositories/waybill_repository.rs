use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::waybill::Waybill;
use crate::repositories::{WaybillFilter, WaybillRepository};
use crate::utils::errors::{invalid_state_error, map_unique_violation, AppResult};

pub struct PgWaybillRepository {
    pool: PgPool,
}

impl PgWaybillRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl WaybillRepository for PgWaybillRepository {
    async fn create(&self, waybill: &Waybill) -> AppResult<Waybill> {
        sqlx::query_as::<_, Waybill>(
            r#"
            INSERT INTO waybills (
                id, driver_id, car_id, issued_by, closed_by, medical_check_id, inspection_id,
                status, start_time, end_time, initial_mileage, final_mileage,
                total_distance, revenue, earnings, order_count, notes
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17)
            RETURNING *
            "#,
        )
        .bind(waybill.id)
        .bind(waybill.driver_id)
        .bind(waybill.car_id)
        .bind(waybill.issued_by)
        .bind(waybill.closed_by)
        .bind(waybill.medical_check_id)
        .bind(waybill.inspection_id)
        .bind(waybill.status)
        .bind(waybill.start_time)
        .bind(waybill.end_time)
        .bind(waybill.initial_mileage)
        .bind(waybill.final_mileage)
        .bind(waybill.total_distance)
        .bind(waybill.revenue)
        .bind(waybill.earnings)
        .bind(waybill.order_count)
        .bind(&waybill.notes)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, "driver or car already has an active waybill"))
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Waybill>> {
        let waybill = sqlx::query_as::<_, Waybill>("SELECT * FROM waybills WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(waybill)
    }

    async fn active_for_driver(&self, driver_id: Uuid) -> AppResult<Option<Waybill>> {
        let waybill = sqlx::query_as::<_, Waybill>(
            "SELECT * FROM waybills WHERE driver_id = $1 AND status = 'active'",
        )
        .bind(driver_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(waybill)
    }

    async fn active_for_car(&self, car_id: Uuid) -> AppResult<Option<Waybill>> {
        let waybill = sqlx::query_as::<_, Waybill>(
            "SELECT * FROM waybills WHERE car_id = $1 AND status = 'active'",
        )
        .bind(car_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(waybill)
    }

    async fn list(&self, filter: &WaybillFilter) -> AppResult<Vec<Waybill>> {
        let waybills = sqlx::query_as::<_, Waybill>(
            r#"
            SELECT * FROM waybills
            WHERE ($1::waybill_status IS NULL OR status = $1)
              AND ($2::uuid IS NULL OR driver_id = $2)
              AND ($3::uuid IS NULL OR car_id = $3)
            ORDER BY start_time DESC
            "#,
        )
        .bind(filter.status)
        .bind(filter.driver_id)
        .bind(filter.car_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(waybills)
    }

    async fn close(&self, waybill: &Waybill) -> AppResult<Waybill> {
        let final_mileage = waybill
            .final_mileage
            .ok_or_else(|| invalid_state_error("closing a waybill requires a final mileage"))?;

        let mut tx = self.pool.begin().await?;

        // Solo se cierra si sigue activo en la base de datos
        let saved = sqlx::query_as::<_, Waybill>(
            r#"
            UPDATE waybills
            SET status = $2, closed_by = $3, end_time = $4, final_mileage = $5, earnings = $6
            WHERE id = $1 AND status = 'active'
            RETURNING *
            "#,
        )
        .bind(waybill.id)
        .bind(waybill.status)
        .bind(waybill.closed_by)
        .bind(waybill.end_time)
        .bind(final_mileage)
        .bind(waybill.earnings)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| invalid_state_error(format!("waybill {} is not active", waybill.id)))?;

        sqlx::query("UPDATE cars SET mileage = GREATEST(mileage, $2), updated_at = NOW() WHERE id = $1")
            .bind(waybill.car_id)
            .bind(final_mileage)
            .execute(&mut *tx)
            .await?;

        sqlx::query("UPDATE drivers SET medical_status = 'pending', updated_at = NOW() WHERE id = $1")
            .bind(waybill.driver_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(saved)
    }

    async fn update(&self, waybill: &Waybill) -> AppResult<Waybill> {
        sqlx::query_as::<_, Waybill>(
            r#"
            UPDATE waybills
            SET status = $2, end_time = $3, notes = $4
            WHERE id = $1 AND status = 'active'
            RETURNING *
            "#,
        )
        .bind(waybill.id)
        .bind(waybill.status)
        .bind(waybill.end_time)
        .bind(&waybill.notes)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| invalid_state_error(format!("waybill {} is not active", waybill.id)))
    }
}
