use axum::{
    extract::{Path, State},
    routing::{get, post, put},
    Json, Router,
};
use uuid::Uuid;

use crate::controllers::driver_controller::DriverController;
use crate::dto::common_dto::ApiResponse;
use crate::dto::driver_dto::{
    AssignCarRequest, CreateDriverRequest, DriverResponse, UpdateDriverRequest,
};
use crate::middleware::AuthUser;
use crate::models::medical_check::MedicalCheck;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_driver_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_driver).get(list_drivers))
        .route(
            "/:id",
            get(get_driver).put(update_driver).delete(delete_driver),
        )
        .route("/:id/car", put(assign_car).delete(unassign_car))
        .route("/:id/medical-checks", get(driver_medical_checks))
}

async fn create_driver(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(request): Json<CreateDriverRequest>,
) -> Result<Json<ApiResponse<DriverResponse>>, AppError> {
    let controller = DriverController::new(&state);
    Ok(Json(controller.create(&auth, request).await?))
}

async fn list_drivers(
    State(state): State<AppState>,
    _auth: AuthUser,
) -> Result<Json<ApiResponse<Vec<DriverResponse>>>, AppError> {
    let controller = DriverController::new(&state);
    Ok(Json(controller.list().await?))
}

async fn get_driver(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<DriverResponse>>, AppError> {
    let controller = DriverController::new(&state);
    Ok(Json(controller.get(id).await?))
}

async fn update_driver(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateDriverRequest>,
) -> Result<Json<ApiResponse<DriverResponse>>, AppError> {
    let controller = DriverController::new(&state);
    Ok(Json(controller.update(&auth, id, request).await?))
}

async fn delete_driver(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Uuid>>, AppError> {
    let controller = DriverController::new(&state);
    Ok(Json(controller.delete(&auth, id).await?))
}

async fn assign_car(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(request): Json<AssignCarRequest>,
) -> Result<Json<ApiResponse<DriverResponse>>, AppError> {
    let controller = DriverController::new(&state);
    Ok(Json(controller.assign_car(&auth, id, request).await?))
}

async fn unassign_car(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<DriverResponse>>, AppError> {
    let controller = DriverController::new(&state);
    Ok(Json(controller.unassign_car(&auth, id).await?))
}

async fn driver_medical_checks(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Vec<MedicalCheck>>>, AppError> {
    let controller = DriverController::new(&state);
    Ok(Json(controller.medical_checks(id).await?))
}
