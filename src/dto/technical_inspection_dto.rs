use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

// Request para registrar una inspección técnica
#[derive(Debug, Deserialize, Validate)]
pub struct RecordInspectionRequest {
    pub car_id: Uuid,
    pub passed: bool,
    #[validate(range(min = 0))]
    pub mileage: i32,
    #[validate(length(max = 2000))]
    pub notes: Option<String>,
}
