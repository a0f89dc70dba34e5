use rust_decimal::Decimal;
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::models::waybill::WaybillStatus;
use crate::utils::validation::validate_non_negative_decimal;

// Request para abrir un waybill (o empezar turno)
#[derive(Debug, Deserialize, Validate)]
pub struct OpenWaybillRequest {
    pub driver_id: Uuid,
    #[validate(range(min = 0))]
    pub initial_mileage: Option<i32>,
}

// Request para cerrar un waybill
#[derive(Debug, Deserialize, Validate)]
pub struct CloseWaybillRequest {
    #[validate(range(min = 0))]
    pub final_mileage: i32,
    #[validate(custom = "validate_non_negative_decimal")]
    pub earnings: Option<Decimal>,
}

// Request para terminar el turno de un conductor
#[derive(Debug, Deserialize, Validate)]
pub struct EndShiftRequest {
    pub driver_id: Uuid,
    #[validate(range(min = 0))]
    pub final_mileage: i32,
    #[validate(custom = "validate_non_negative_decimal")]
    pub earnings: Option<Decimal>,
}

// Request para cancelar un waybill
#[derive(Debug, Deserialize, Validate)]
pub struct CancelWaybillRequest {
    #[validate(length(min = 1, max = 500))]
    pub reason: String,
}

// Filtros del listado de waybills
#[derive(Debug, Default, Deserialize)]
pub struct WaybillFilters {
    pub status: Option<WaybillStatus>,
    pub driver_id: Option<Uuid>,
    pub car_id: Option<Uuid>,
}
