use rust_decimal::Decimal;
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::models::order::OrderStatus;
use crate::utils::validation::{validate_non_negative_decimal, validate_not_empty, validate_phone};

// Request para crear un pedido
#[derive(Debug, Deserialize, Validate)]
pub struct CreateOrderRequest {
    #[validate(length(max = 500), custom = "validate_not_empty")]
    pub pickup_address: String,
    #[validate(length(max = 500), custom = "validate_not_empty")]
    pub destination_address: String,
    #[validate(custom = "validate_phone")]
    pub customer_phone: Option<String>,
    #[validate(custom = "validate_non_negative_decimal")]
    pub estimated_price: Option<Decimal>,
    #[validate(length(max = 2000))]
    pub notes: Option<String>,
}

// Request para asignar un pedido
#[derive(Debug, Deserialize)]
pub struct AssignOrderRequest {
    pub driver_id: Uuid,
}

// Request para completar un pedido
#[derive(Debug, Deserialize, Validate)]
pub struct CompleteOrderRequest {
    #[validate(custom = "validate_non_negative_decimal")]
    pub price: Decimal,
    #[validate(custom = "validate_non_negative_decimal")]
    pub distance: Decimal,
}

// Request para cancelar un pedido
#[derive(Debug, Deserialize, Validate)]
pub struct CancelOrderRequest {
    #[validate(length(max = 500))]
    pub reason: Option<String>,
}

// Filtros del listado de pedidos
#[derive(Debug, Default, Deserialize)]
pub struct OrderFilters {
    pub status: Option<OrderStatus>,
    pub driver_id: Option<Uuid>,
    pub waybill_id: Option<Uuid>,
}
