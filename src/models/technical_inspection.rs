//! Modelo de TechnicalInspection
//!
//! La inspección más reciente de un coche decide si puede trabajar.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct TechnicalInspection {
    pub id: Uuid,
    pub car_id: Uuid,
    pub mechanic_id: Uuid,
    pub inspected_at: DateTime<Utc>,
    pub passed: bool,
    pub mileage: i32,
    pub notes: Option<String>,
}

impl TechnicalInspection {
    pub fn new(
        car_id: Uuid,
        mechanic_id: Uuid,
        passed: bool,
        mileage: i32,
        notes: Option<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            car_id,
            mechanic_id,
            inspected_at: Utc::now(),
            passed,
            mileage,
            notes,
        }
    }
}
