use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use uuid::Uuid;

use crate::controllers::technical_inspection_controller::TechnicalInspectionController;
use crate::dto::common_dto::{ApiResponse, CleanupRequest, CleanupResponse};
use crate::dto::technical_inspection_dto::RecordInspectionRequest;
use crate::middleware::AuthUser;
use crate::models::technical_inspection::TechnicalInspection;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_inspection_router() -> Router<AppState> {
    Router::new()
        .route("/", post(record_inspection))
        .route("/cleanup", post(cleanup_inspections))
        .route("/car/:car_id/latest", get(latest_for_car))
        .route("/:id", get(get_inspection))
}

async fn record_inspection(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(request): Json<RecordInspectionRequest>,
) -> Result<Json<ApiResponse<TechnicalInspection>>, AppError> {
    let controller = TechnicalInspectionController::new(&state);
    Ok(Json(controller.record(&auth, request).await?))
}

async fn get_inspection(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<TechnicalInspection>>, AppError> {
    let controller = TechnicalInspectionController::new(&state);
    Ok(Json(controller.get(id).await?))
}

async fn latest_for_car(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(car_id): Path<Uuid>,
) -> Result<Json<ApiResponse<Option<TechnicalInspection>>>, AppError> {
    let controller = TechnicalInspectionController::new(&state);
    Ok(Json(controller.latest_for_car(car_id).await?))
}

async fn cleanup_inspections(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(request): Json<CleanupRequest>,
) -> Result<Json<ApiResponse<CleanupResponse>>, AppError> {
    let controller = TechnicalInspectionController::new(&state);
    Ok(Json(controller.cleanup(&auth, request).await?))
}
