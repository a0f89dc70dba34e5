//! Rutas HTTP
//!
//! Cada recurso expone su propio `create_*_router()`; `create_app` los
//! monta bajo `/api` junto con CORS, trazas y el health check.

pub mod auth_routes;
pub mod car_routes;
pub mod driver_routes;
pub mod medical_check_routes;
pub mod order_routes;
pub mod shift_routes;
pub mod technical_inspection_routes;
pub mod user_routes;
pub mod waybill_routes;

use axum::{response::Json, routing::get, Router};
use serde_json::{json, Value};
use tower_http::trace::TraceLayer;

use crate::middleware::cors_layer;
use crate::state::AppState;

/// Router completo de la aplicación
pub fn create_app(state: AppState) -> Router {
    let cors = cors_layer(&state.config.cors_origins);

    Router::new()
        .route("/health", get(health_check))
        .nest("/api/auth", auth_routes::create_auth_router())
        .nest("/api/users", user_routes::create_user_router())
        .nest("/api/cars", car_routes::create_car_router())
        .nest("/api/drivers", driver_routes::create_driver_router())
        .nest("/api/medical-checks", medical_check_routes::create_medical_check_router())
        .nest(
            "/api/inspections",
            technical_inspection_routes::create_inspection_router(),
        )
        .nest("/api/waybills", waybill_routes::create_waybill_router())
        .nest("/api/shifts", shift_routes::create_shift_router())
        .nest("/api/orders", order_routes::create_order_router())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}
