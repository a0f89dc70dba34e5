//! Backend de gestión de flota de taxis
//!
//! Coches, conductores, revisiones médicas, inspecciones técnicas, hojas de
//! ruta (turnos) y pedidos, expuestos como API REST sobre Axum + PostgreSQL.

pub mod config;
pub mod controllers;
pub mod database;
pub mod dto;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod state;
pub mod utils;
