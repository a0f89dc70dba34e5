//! Configuración del proyecto
//!
//! Toda la configuración se lee de variables de entorno al arrancar.

pub mod environment;

pub use environment::*;
