use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::driver::MedicalStatus;
use crate::models::medical_check::MedicalCheck;
use crate::repositories::MedicalCheckRepository;
use crate::utils::errors::{not_found_error, AppResult};

pub struct PgMedicalCheckRepository {
    pool: PgPool,
}

impl PgMedicalCheckRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MedicalCheckRepository for PgMedicalCheckRepository {
    async fn record(&self, check: &MedicalCheck, driver_status: MedicalStatus) -> AppResult<MedicalCheck> {
        let mut tx = self.pool.begin().await?;

        let saved = sqlx::query_as::<_, MedicalCheck>(
            r#"
            INSERT INTO medical_checks (id, driver_id, doctor_id, checked_at, passed, notes, opens_shift)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(check.id)
        .bind(check.driver_id)
        .bind(check.doctor_id)
        .bind(check.checked_at)
        .bind(check.passed)
        .bind(&check.notes)
        .bind(check.opens_shift)
        .fetch_one(&mut *tx)
        .await?;

        let updated = sqlx::query("UPDATE drivers SET medical_status = $2, updated_at = NOW() WHERE id = $1")
            .bind(check.driver_id)
            .bind(driver_status)
            .execute(&mut *tx)
            .await?;

        if updated.rows_affected() == 0 {
            return Err(not_found_error("Driver", check.driver_id));
        }

        tx.commit().await?;
        Ok(saved)
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<MedicalCheck>> {
        let check = sqlx::query_as::<_, MedicalCheck>("SELECT * FROM medical_checks WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(check)
    }

    async fn latest_for_driver(&self, driver_id: Uuid) -> AppResult<Option<MedicalCheck>> {
        let check = sqlx::query_as::<_, MedicalCheck>(
            "SELECT * FROM medical_checks WHERE driver_id = $1 ORDER BY checked_at DESC LIMIT 1",
        )
        .bind(driver_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(check)
    }

    async fn list_for_driver(&self, driver_id: Uuid) -> AppResult<Vec<MedicalCheck>> {
        let checks = sqlx::query_as::<_, MedicalCheck>(
            "SELECT * FROM medical_checks WHERE driver_id = $1 ORDER BY checked_at DESC",
        )
        .bind(driver_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(checks)
    }

    async fn update_notes(
        &self,
        id: Uuid,
        notes: Option<String>,
        opens_shift: bool,
    ) -> AppResult<Option<MedicalCheck>> {
        let check = sqlx::query_as::<_, MedicalCheck>(
            "UPDATE medical_checks SET notes = $2, opens_shift = $3 WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(notes)
        .bind(opens_shift)
        .fetch_optional(&self.pool)
        .await?;

        Ok(check)
    }

    async fn delete_older_than(&self, cutoff: DateTime<Utc>) -> AppResult<u64> {
        let result = sqlx::query("DELETE FROM medical_checks WHERE checked_at < $1")
            .bind(cutoff)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}
