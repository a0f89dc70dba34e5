use axum::{
    extract::{Path, State},
    routing::{get, post, put},
    Json, Router,
};
use uuid::Uuid;

use crate::controllers::medical_check_controller::MedicalCheckController;
use crate::dto::common_dto::{ApiResponse, CleanupRequest, CleanupResponse};
use crate::dto::medical_check_dto::{RecordMedicalCheckRequest, UpdateMedicalCheckNotesRequest};
use crate::middleware::AuthUser;
use crate::models::medical_check::MedicalCheck;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_medical_check_router() -> Router<AppState> {
    Router::new()
        .route("/", post(record_check))
        .route("/cleanup", post(cleanup_checks))
        .route("/driver/:driver_id/latest", get(latest_for_driver))
        .route("/:id", get(get_check))
        .route("/:id/notes", put(update_notes))
}

async fn record_check(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(request): Json<RecordMedicalCheckRequest>,
) -> Result<Json<ApiResponse<MedicalCheck>>, AppError> {
    let controller = MedicalCheckController::new(&state);
    Ok(Json(controller.record(&auth, request).await?))
}

async fn get_check(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<MedicalCheck>>, AppError> {
    let controller = MedicalCheckController::new(&state);
    Ok(Json(controller.get(id).await?))
}

async fn latest_for_driver(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(driver_id): Path<Uuid>,
) -> Result<Json<ApiResponse<Option<MedicalCheck>>>, AppError> {
    let controller = MedicalCheckController::new(&state);
    Ok(Json(controller.latest_for_driver(driver_id).await?))
}

async fn update_notes(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateMedicalCheckNotesRequest>,
) -> Result<Json<ApiResponse<MedicalCheck>>, AppError> {
    let controller = MedicalCheckController::new(&state);
    Ok(Json(controller.update_notes(&auth, id, request).await?))
}

async fn cleanup_checks(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(request): Json<CleanupRequest>,
) -> Result<Json<ApiResponse<CleanupResponse>>, AppError> {
    let controller = MedicalCheckController::new(&state);
    Ok(Json(controller.cleanup(&auth, request).await?))
}
