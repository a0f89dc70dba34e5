//! Modelo de Driver

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use uuid::Uuid;

/// Estado médico del conductor - mapea al ENUM driver_medical_status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Type, PartialEq, Eq)]
#[sqlx(type_name = "driver_medical_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum MedicalStatus {
    Pending,
    Passed,
    Failed,
}

impl MedicalStatus {
    pub fn from_check(passed: bool) -> Self {
        if passed {
            MedicalStatus::Passed
        } else {
            MedicalStatus::Failed
        }
    }
}

/// Driver - mapea exactamente a la tabla drivers
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Driver {
    pub id: Uuid,
    pub full_name: String,
    pub license_number: String,
    pub phone: Option<String>,
    pub medical_status: MedicalStatus,
    pub current_car_id: Option<Uuid>,
    pub user_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Driver {
    pub fn new(
        full_name: String,
        license_number: String,
        phone: Option<String>,
        user_id: Option<Uuid>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            full_name,
            license_number,
            phone,
            medical_status: MedicalStatus::Pending,
            current_car_id: None,
            user_id,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_allowed_to_work(&self) -> bool {
        self.medical_status == MedicalStatus::Passed
    }
}
