use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::car::Car;
use crate::repositories::CarRepository;
use crate::utils::errors::{map_unique_violation, AppResult};

pub struct PgCarRepository {
    pool: PgPool,
}

impl PgCarRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CarRepository for PgCarRepository {
    async fn create(&self, car: &Car) -> AppResult<Car> {
        sqlx::query_as::<_, Car>(
            r#"
            INSERT INTO cars (id, plate, vin, brand, model, technical_status, active, in_repair, mileage, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING *
            "#,
        )
        .bind(car.id)
        .bind(&car.plate)
        .bind(&car.vin)
        .bind(&car.brand)
        .bind(&car.model)
        .bind(car.technical_status)
        .bind(car.active)
        .bind(car.in_repair)
        .bind(car.mileage)
        .bind(car.created_at)
        .bind(car.updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, "plate is already registered"))
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Car>> {
        let car = sqlx::query_as::<_, Car>("SELECT * FROM cars WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(car)
    }

    async fn plate_exists(&self, plate: &str) -> AppResult<bool> {
        let result: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM cars WHERE plate = $1)")
            .bind(plate)
            .fetch_one(&self.pool)
            .await?;

        Ok(result.0)
    }

    async fn list(&self, operational_only: bool) -> AppResult<Vec<Car>> {
        let cars = sqlx::query_as::<_, Car>(
            r#"
            SELECT * FROM cars
            WHERE NOT $1 OR (technical_status = 'ok' AND active AND NOT in_repair)
            ORDER BY plate
            "#,
        )
        .bind(operational_only)
        .fetch_all(&self.pool)
        .await?;

        Ok(cars)
    }

    async fn update(&self, car: &Car) -> AppResult<Car> {
        sqlx::query_as::<_, Car>(
            r#"
            UPDATE cars
            SET plate = $2, vin = $3, brand = $4, model = $5, technical_status = $6,
                active = $7, in_repair = $8, mileage = $9, updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(car.id)
        .bind(&car.plate)
        .bind(&car.vin)
        .bind(&car.brand)
        .bind(&car.model)
        .bind(car.technical_status)
        .bind(car.active)
        .bind(car.in_repair)
        .bind(car.mileage)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, "plate is already registered"))
    }
}
