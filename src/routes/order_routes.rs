use axum::{
    extract::{Path, Query, State},
    routing::{get, post},
    Json, Router,
};
use uuid::Uuid;

use crate::controllers::order_controller::OrderController;
use crate::dto::common_dto::ApiResponse;
use crate::dto::order_dto::{
    AssignOrderRequest, CancelOrderRequest, CompleteOrderRequest, CreateOrderRequest,
    OrderFilters,
};
use crate::middleware::AuthUser;
use crate::models::order::Order;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_order_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_order).get(list_orders))
        .route("/:id", get(get_order))
        .route("/:id/assign", post(assign_order))
        .route("/:id/start", post(start_order))
        .route("/:id/complete", post(complete_order))
        .route("/:id/cancel", post(cancel_order))
}

async fn create_order(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(request): Json<CreateOrderRequest>,
) -> Result<Json<ApiResponse<Order>>, AppError> {
    let controller = OrderController::new(&state);
    Ok(Json(controller.create(&auth, request).await?))
}

async fn list_orders(
    State(state): State<AppState>,
    _auth: AuthUser,
    Query(filters): Query<OrderFilters>,
) -> Result<Json<ApiResponse<Vec<Order>>>, AppError> {
    let controller = OrderController::new(&state);
    Ok(Json(controller.list(filters).await?))
}

async fn get_order(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Order>>, AppError> {
    let controller = OrderController::new(&state);
    Ok(Json(controller.get(id).await?))
}

async fn assign_order(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(request): Json<AssignOrderRequest>,
) -> Result<Json<ApiResponse<Order>>, AppError> {
    let controller = OrderController::new(&state);
    Ok(Json(controller.assign(&auth, id, request).await?))
}

async fn start_order(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Order>>, AppError> {
    let controller = OrderController::new(&state);
    Ok(Json(controller.start(&auth, id).await?))
}

async fn complete_order(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(request): Json<CompleteOrderRequest>,
) -> Result<Json<ApiResponse<Order>>, AppError> {
    let controller = OrderController::new(&state);
    Ok(Json(controller.complete(&auth, id, request).await?))
}

async fn cancel_order(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(request): Json<CancelOrderRequest>,
) -> Result<Json<ApiResponse<Order>>, AppError> {
    let controller = OrderController::new(&state);
    Ok(Json(controller.cancel(&auth, id, request).await?))
}
