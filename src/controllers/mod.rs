//! Controladores
//!
//! Validan los DTOs, comprueban el rol del usuario autenticado y delegan en
//! los servicios.

pub mod auth_controller;
pub mod car_controller;
pub mod driver_controller;
pub mod medical_check_controller;
pub mod order_controller;
pub mod shift_controller;
pub mod technical_inspection_controller;
pub mod user_controller;
pub mod waybill_controller;
