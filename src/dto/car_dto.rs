use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::car::{Car, TechnicalStatus};
use crate::utils::validation::{validate_license_plate, validate_vin};

// Request para registrar un coche
#[derive(Debug, Deserialize, Validate)]
pub struct CreateCarRequest {
    #[validate(custom = "validate_license_plate")]
    pub plate: String,
    #[validate(custom = "validate_vin")]
    pub vin: Option<String>,
    #[validate(length(min = 1, max = 100))]
    pub brand: Option<String>,
    #[validate(length(min = 1, max = 100))]
    pub model: Option<String>,
    #[validate(range(min = 0))]
    pub mileage: Option<i32>,
}

// Request para actualizar los datos descriptivos de un coche
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateCarRequest {
    #[validate(custom = "validate_license_plate")]
    pub plate: Option<String>,
    #[validate(custom = "validate_vin")]
    pub vin: Option<String>,
    #[validate(length(min = 1, max = 100))]
    pub brand: Option<String>,
    #[validate(length(min = 1, max = 100))]
    pub model: Option<String>,
}

// Request para entrar/salir del taller
#[derive(Debug, Deserialize)]
pub struct SetRepairRequest {
    pub in_repair: bool,
}

// Request para activar/desactivar un coche
#[derive(Debug, Deserialize)]
pub struct SetCarActiveRequest {
    pub active: bool,
}

// Filtros del listado de coches
#[derive(Debug, Default, Deserialize)]
pub struct CarFilters {
    pub operational: Option<bool>,
}

// Response de coche
#[derive(Debug, Serialize, Deserialize)]
pub struct CarResponse {
    pub id: Uuid,
    pub plate: String,
    pub vin: Option<String>,
    pub brand: Option<String>,
    pub model: Option<String>,
    pub technical_status: TechnicalStatus,
    pub active: bool,
    pub in_repair: bool,
    pub operational: bool,
    pub mileage: i32,
    pub created_at: DateTime<Utc>,
}

impl From<Car> for CarResponse {
    fn from(car: Car) -> Self {
        Self {
            operational: car.is_operational(),
            id: car.id,
            plate: car.plate,
            vin: car.vin,
            brand: car.brand,
            model: car.model,
            technical_status: car.technical_status,
            active: car.active,
            in_repair: car.in_repair,
            mileage: car.mileage,
            created_at: car.created_at,
        }
    }
}
