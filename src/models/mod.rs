//! Modelos del sistema
//!
//! Este módulo contiene todos los modelos de datos que mapean exactamente
//! al schema PostgreSQL, junto con las reglas de negocio que solo dependen
//! del propio registro.

pub mod car;
pub mod driver;
pub mod medical_check;
pub mod order;
pub mod technical_inspection;
pub mod user;
pub mod waybill;
