use axum::{
    extract::{Path, Query, State},
    routing::{get, post, put},
    Json, Router,
};
use uuid::Uuid;

use crate::controllers::car_controller::CarController;
use crate::dto::car_dto::{
    CarFilters, CarResponse, CreateCarRequest, SetCarActiveRequest, SetRepairRequest,
    UpdateCarRequest,
};
use crate::dto::common_dto::ApiResponse;
use crate::middleware::AuthUser;
use crate::models::technical_inspection::TechnicalInspection;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_car_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_car).get(list_cars))
        .route("/:id", get(get_car).put(update_car))
        .route("/:id/repair", put(set_repair))
        .route("/:id/active", put(set_active))
        .route("/:id/inspections", get(car_inspections))
}

async fn create_car(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(request): Json<CreateCarRequest>,
) -> Result<Json<ApiResponse<CarResponse>>, AppError> {
    let controller = CarController::new(&state);
    Ok(Json(controller.create(&auth, request).await?))
}

async fn list_cars(
    State(state): State<AppState>,
    _auth: AuthUser,
    Query(filters): Query<CarFilters>,
) -> Result<Json<ApiResponse<Vec<CarResponse>>>, AppError> {
    let controller = CarController::new(&state);
    Ok(Json(controller.list(filters).await?))
}

async fn get_car(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<CarResponse>>, AppError> {
    let controller = CarController::new(&state);
    Ok(Json(controller.get(id).await?))
}

async fn update_car(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateCarRequest>,
) -> Result<Json<ApiResponse<CarResponse>>, AppError> {
    let controller = CarController::new(&state);
    Ok(Json(controller.update(&auth, id, request).await?))
}

async fn set_repair(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(request): Json<SetRepairRequest>,
) -> Result<Json<ApiResponse<CarResponse>>, AppError> {
    let controller = CarController::new(&state);
    Ok(Json(controller.set_repair(&auth, id, request).await?))
}

async fn set_active(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(request): Json<SetCarActiveRequest>,
) -> Result<Json<ApiResponse<CarResponse>>, AppError> {
    let controller = CarController::new(&state);
    Ok(Json(controller.set_active(&auth, id, request).await?))
}

async fn car_inspections(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Vec<TechnicalInspection>>>, AppError> {
    let controller = CarController::new(&state);
    Ok(Json(controller.inspections(id).await?))
}
