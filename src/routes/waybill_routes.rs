use axum::{
    extract::{Path, Query, State},
    routing::{get, post},
    Json, Router,
};
use uuid::Uuid;

use crate::controllers::waybill_controller::WaybillController;
use crate::dto::common_dto::ApiResponse;
use crate::dto::waybill_dto::{
    CancelWaybillRequest, CloseWaybillRequest, OpenWaybillRequest, WaybillFilters,
};
use crate::middleware::AuthUser;
use crate::models::{order::Order, waybill::Waybill};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_waybill_router() -> Router<AppState> {
    Router::new()
        .route("/", post(open_waybill).get(list_waybills))
        .route("/:id", get(get_waybill))
        .route("/:id/close", post(close_waybill))
        .route("/:id/cancel", post(cancel_waybill))
        .route("/:id/orders", get(waybill_orders))
}

async fn open_waybill(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(request): Json<OpenWaybillRequest>,
) -> Result<Json<ApiResponse<Waybill>>, AppError> {
    let controller = WaybillController::new(&state);
    Ok(Json(controller.open(&auth, request).await?))
}

async fn list_waybills(
    State(state): State<AppState>,
    _auth: AuthUser,
    Query(filters): Query<WaybillFilters>,
) -> Result<Json<ApiResponse<Vec<Waybill>>>, AppError> {
    let controller = WaybillController::new(&state);
    Ok(Json(controller.list(filters).await?))
}

async fn get_waybill(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Waybill>>, AppError> {
    let controller = WaybillController::new(&state);
    Ok(Json(controller.get(id).await?))
}

async fn close_waybill(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(request): Json<CloseWaybillRequest>,
) -> Result<Json<ApiResponse<Waybill>>, AppError> {
    let controller = WaybillController::new(&state);
    Ok(Json(controller.close(&auth, id, request).await?))
}

async fn cancel_waybill(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(request): Json<CancelWaybillRequest>,
) -> Result<Json<ApiResponse<Waybill>>, AppError> {
    let controller = WaybillController::new(&state);
    Ok(Json(controller.cancel(&auth, id, request).await?))
}

async fn waybill_orders(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Vec<Order>>>, AppError> {
    let controller = WaybillController::new(&state);
    Ok(Json(controller.orders(id).await?))
}
