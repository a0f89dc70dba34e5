//! DTOs de la API
//!
//! Formas de las peticiones y respuestas HTTP. Las peticiones derivan
//! `Validate` y se validan en los controladores.

pub mod auth_dto;
pub mod car_dto;
pub mod common_dto;
pub mod driver_dto;
pub mod medical_check_dto;
pub mod order_dto;
pub mod technical_inspection_dto;
pub mod user_dto;
pub mod waybill_dto;
