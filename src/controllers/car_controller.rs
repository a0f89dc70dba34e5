use uuid::Uuid;
use validator::Validate;

use crate::dto::car_dto::{
    CarFilters, CarResponse, CreateCarRequest, SetCarActiveRequest, SetRepairRequest,
    UpdateCarRequest,
};
use crate::dto::common_dto::ApiResponse;
use crate::middleware::AuthUser;
use crate::models::technical_inspection::TechnicalInspection;
use crate::models::user::UserRole;
use crate::services::{car_service::CarDetails, CarService, TechnicalInspectionService};
use crate::state::AppState;
use crate::utils::errors::AppError;

const FLEET_MANAGERS: &[UserRole] = &[UserRole::Operator, UserRole::Mechanic];

pub struct CarController {
    cars: CarService,
    inspections: TechnicalInspectionService,
}

impl CarController {
    pub fn new(state: &AppState) -> Self {
        Self {
            cars: state.services.cars.clone(),
            inspections: state.services.inspections.clone(),
        }
    }

    pub async fn create(
        &self,
        auth: &AuthUser,
        request: CreateCarRequest,
    ) -> Result<ApiResponse<CarResponse>, AppError> {
        auth.require_any(FLEET_MANAGERS, "register cars")?;
        request.validate()?;

        let car = self
            .cars
            .create(
                &request.plate,
                request.vin,
                request.brand,
                request.model,
                request.mileage.unwrap_or(0),
            )
            .await?;

        Ok(ApiResponse::success_with_message(car.into(), "Car registered"))
    }

    pub async fn get(&self, id: Uuid) -> Result<ApiResponse<CarResponse>, AppError> {
        let car = self.cars.get(id).await?;
        Ok(ApiResponse::success(car.into()))
    }

    pub async fn list(&self, filters: CarFilters) -> Result<ApiResponse<Vec<CarResponse>>, AppError> {
        let cars = self.cars.list(filters.operational.unwrap_or(false)).await?;
        Ok(ApiResponse::success(cars.into_iter().map(Into::into).collect()))
    }

    pub async fn update(
        &self,
        auth: &AuthUser,
        id: Uuid,
        request: UpdateCarRequest,
    ) -> Result<ApiResponse<CarResponse>, AppError> {
        auth.require_any(FLEET_MANAGERS, "update cars")?;
        request.validate()?;

        let car = self
            .cars
            .update(
                id,
                CarDetails {
                    plate: request.plate,
                    vin: request.vin,
                    brand: request.brand,
                    model: request.model,
                },
            )
            .await?;

        Ok(ApiResponse::success_with_message(car.into(), "Car updated"))
    }

    pub async fn set_repair(
        &self,
        auth: &AuthUser,
        id: Uuid,
        request: SetRepairRequest,
    ) -> Result<ApiResponse<CarResponse>, AppError> {
        auth.require_any(FLEET_MANAGERS, "change repair status")?;
        let car = self.cars.set_in_repair(id, request.in_repair).await?;
        Ok(ApiResponse::success(car.into()))
    }

    pub async fn set_active(
        &self,
        auth: &AuthUser,
        id: Uuid,
        request: SetCarActiveRequest,
    ) -> Result<ApiResponse<CarResponse>, AppError> {
        auth.require_any(FLEET_MANAGERS, "change car status")?;
        let car = self.cars.set_active(id, request.active).await?;
        Ok(ApiResponse::success(car.into()))
    }

    pub async fn inspections(&self, id: Uuid) -> Result<ApiResponse<Vec<TechnicalInspection>>, AppError> {
        let car = self.cars.get(id).await?;
        let history = self.inspections.history(car.id).await?;
        Ok(ApiResponse::success(history))
    }
}
