use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use uuid::Uuid;

use crate::controllers::shift_controller::ShiftController;
use crate::dto::common_dto::ApiResponse;
use crate::dto::waybill_dto::{EndShiftRequest, OpenWaybillRequest};
use crate::middleware::AuthUser;
use crate::models::waybill::Waybill;
use crate::services::shift_service::ShiftReadiness;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_shift_router() -> Router<AppState> {
    Router::new()
        .route("/start", post(start_shift))
        .route("/end", post(end_shift))
        .route("/driver/:driver_id/readiness", get(readiness))
        .route("/driver/:driver_id/current", get(current_shift))
}

async fn readiness(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(driver_id): Path<Uuid>,
) -> Result<Json<ApiResponse<ShiftReadiness>>, AppError> {
    let controller = ShiftController::new(&state);
    Ok(Json(controller.readiness(driver_id).await?))
}

async fn current_shift(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(driver_id): Path<Uuid>,
) -> Result<Json<ApiResponse<Option<Waybill>>>, AppError> {
    let controller = ShiftController::new(&state);
    Ok(Json(controller.current(driver_id).await?))
}

async fn start_shift(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(request): Json<OpenWaybillRequest>,
) -> Result<Json<ApiResponse<Waybill>>, AppError> {
    let controller = ShiftController::new(&state);
    Ok(Json(controller.start(&auth, request).await?))
}

async fn end_shift(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(request): Json<EndShiftRequest>,
) -> Result<Json<ApiResponse<Waybill>>, AppError> {
    let controller = ShiftController::new(&state);
    Ok(Json(controller.end(&auth, request).await?))
}
