use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::driver::Driver;
use crate::repositories::DriverRepository;
use crate::utils::errors::{invalid_state_error, map_unique_violation, not_found_error, AppResult};

pub struct PgDriverRepository {
    pool: PgPool,
}

impl PgDriverRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DriverRepository for PgDriverRepository {
    async fn create(&self, driver: &Driver) -> AppResult<Driver> {
        sqlx::query_as::<_, Driver>(
            r#"
            INSERT INTO drivers (id, full_name, license_number, phone, medical_status, current_car_id, user_id, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING *
            "#,
        )
        .bind(driver.id)
        .bind(&driver.full_name)
        .bind(&driver.license_number)
        .bind(&driver.phone)
        .bind(driver.medical_status)
        .bind(driver.current_car_id)
        .bind(driver.user_id)
        .bind(driver.created_at)
        .bind(driver.updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, "license number or user account is already registered"))
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Driver>> {
        let driver = sqlx::query_as::<_, Driver>("SELECT * FROM drivers WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(driver)
    }

    async fn find_by_car(&self, car_id: Uuid) -> AppResult<Option<Driver>> {
        let driver = sqlx::query_as::<_, Driver>("SELECT * FROM drivers WHERE current_car_id = $1")
            .bind(car_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(driver)
    }

    async fn find_by_user(&self, user_id: Uuid) -> AppResult<Option<Driver>> {
        let driver = sqlx::query_as::<_, Driver>("SELECT * FROM drivers WHERE user_id = $1")
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(driver)
    }

    async fn license_exists(&self, license_number: &str) -> AppResult<bool> {
        let result: (bool,) =
            sqlx::query_as("SELECT EXISTS(SELECT 1 FROM drivers WHERE license_number = $1)")
                .bind(license_number)
                .fetch_one(&self.pool)
                .await?;

        Ok(result.0)
    }

    async fn list(&self) -> AppResult<Vec<Driver>> {
        let drivers = sqlx::query_as::<_, Driver>("SELECT * FROM drivers ORDER BY full_name")
            .fetch_all(&self.pool)
            .await?;

        Ok(drivers)
    }

    async fn update(&self, driver: &Driver) -> AppResult<Driver> {
        let driver = sqlx::query_as::<_, Driver>(
            r#"
            UPDATE drivers
            SET full_name = $2, phone = $3, medical_status = $4, updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(driver.id)
        .bind(&driver.full_name)
        .bind(&driver.phone)
        .bind(driver.medical_status)
        .fetch_one(&self.pool)
        .await?;

        Ok(driver)
    }

    async fn set_car(&self, driver_id: Uuid, car_id: Option<Uuid>) -> AppResult<Driver> {
        sqlx::query_as::<_, Driver>(
            "UPDATE drivers SET current_car_id = $2, updated_at = NOW() WHERE id = $1 RETURNING *",
        )
        .bind(driver_id)
        .bind(car_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, "car is already assigned to another driver"))?
        .ok_or_else(|| not_found_error("Driver", driver_id))
    }

    async fn delete_cascade(&self, driver_id: Uuid) -> AppResult<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("SELECT id FROM drivers WHERE id = $1 FOR UPDATE")
            .bind(driver_id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| not_found_error("Driver", driver_id))?;

        let (open_orders,): (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM orders WHERE driver_id = $1 AND status IN ('assigned', 'in_progress')",
        )
        .bind(driver_id)
        .fetch_one(&mut *tx)
        .await?;
        if open_orders > 0 {
            return Err(invalid_state_error(format!(
                "driver {} still has {} open order(s)",
                driver_id, open_orders
            )));
        }

        sqlx::query("DELETE FROM medical_checks WHERE driver_id = $1")
            .bind(driver_id)
            .execute(&mut *tx)
            .await?;

        // Los pedidos conservan su historial sin referencia al conductor
        sqlx::query("UPDATE orders SET driver_id = NULL WHERE driver_id = $1")
            .bind(driver_id)
            .execute(&mut *tx)
            .await?;

        sqlx::query("DELETE FROM waybills WHERE driver_id = $1")
            .bind(driver_id)
            .execute(&mut *tx)
            .await?;

        sqlx::query("DELETE FROM drivers WHERE id = $1")
            .bind(driver_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(())
    }
}
