use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::driver::{Driver, MedicalStatus};
use crate::utils::validation::{validate_license_number, validate_phone};

// Request para registrar un conductor
#[derive(Debug, Deserialize, Validate)]
pub struct CreateDriverRequest {
    #[validate(length(min = 2, max = 200))]
    pub full_name: String,
    #[validate(custom = "validate_license_number")]
    pub license_number: String,
    #[validate(custom = "validate_phone")]
    pub phone: Option<String>,
    pub user_id: Option<Uuid>,
}

// Request para actualizar datos de contacto
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateDriverRequest {
    #[validate(length(min = 2, max = 200))]
    pub full_name: Option<String>,
    #[validate(custom = "validate_phone")]
    pub phone: Option<String>,
}

// Request para asignar coche
#[derive(Debug, Deserialize)]
pub struct AssignCarRequest {
    pub car_id: Uuid,
}

// Response de conductor
#[derive(Debug, Serialize, Deserialize)]
pub struct DriverResponse {
    pub id: Uuid,
    pub full_name: String,
    pub license_number: String,
    pub phone: Option<String>,
    pub medical_status: MedicalStatus,
    pub allowed_to_work: bool,
    pub current_car_id: Option<Uuid>,
    pub user_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

impl From<Driver> for DriverResponse {
    fn from(driver: Driver) -> Self {
        Self {
            allowed_to_work: driver.is_allowed_to_work(),
            id: driver.id,
            full_name: driver.full_name,
            license_number: driver.license_number,
            phone: driver.phone,
            medical_status: driver.medical_status,
            current_car_id: driver.current_car_id,
            user_id: driver.user_id,
            created_at: driver.created_at,
        }
    }
}
