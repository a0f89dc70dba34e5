//! Modelo de MedicalCheck
//!
//! Un examen médico es inmutable una vez creado, salvo las notas y la
//! marca `opens_shift`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct MedicalCheck {
    pub id: Uuid,
    pub driver_id: Uuid,
    pub doctor_id: Uuid,
    pub checked_at: DateTime<Utc>,
    pub passed: bool,
    pub notes: Option<String>,
    pub opens_shift: bool,
}

impl MedicalCheck {
    pub fn new(
        driver_id: Uuid,
        doctor_id: Uuid,
        passed: bool,
        notes: Option<String>,
        opens_shift: bool,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            driver_id,
            doctor_id,
            checked_at: Utc::now(),
            passed,
            notes,
            opens_shift,
        }
    }
}
