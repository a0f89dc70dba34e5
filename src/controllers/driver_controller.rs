use uuid::Uuid;
use validator::Validate;

use crate::dto::common_dto::ApiResponse;
use crate::dto::driver_dto::{
    AssignCarRequest, CreateDriverRequest, DriverResponse, UpdateDriverRequest,
};
use crate::middleware::AuthUser;
use crate::models::medical_check::MedicalCheck;
use crate::models::user::UserRole;
use crate::services::{DriverService, MedicalCheckService};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub struct DriverController {
    drivers: DriverService,
    medical_checks: MedicalCheckService,
}

impl DriverController {
    pub fn new(state: &AppState) -> Self {
        Self {
            drivers: state.services.drivers.clone(),
            medical_checks: state.services.medical_checks.clone(),
        }
    }

    pub async fn create(
        &self,
        auth: &AuthUser,
        request: CreateDriverRequest,
    ) -> Result<ApiResponse<DriverResponse>, AppError> {
        auth.require_any(&[UserRole::Operator], "register drivers")?;
        request.validate()?;

        let driver = self
            .drivers
            .create(
                request.full_name,
                &request.license_number,
                request.phone,
                request.user_id,
            )
            .await?;

        Ok(ApiResponse::success_with_message(driver.into(), "Driver registered"))
    }

    pub async fn get(&self, id: Uuid) -> Result<ApiResponse<DriverResponse>, AppError> {
        let driver = self.drivers.get(id).await?;
        Ok(ApiResponse::success(driver.into()))
    }

    pub async fn list(&self) -> Result<ApiResponse<Vec<DriverResponse>>, AppError> {
        let drivers = self.drivers.list().await?;
        Ok(ApiResponse::success(drivers.into_iter().map(Into::into).collect()))
    }

    pub async fn update(
        &self,
        auth: &AuthUser,
        id: Uuid,
        request: UpdateDriverRequest,
    ) -> Result<ApiResponse<DriverResponse>, AppError> {
        auth.require_any(&[UserRole::Operator], "update drivers")?;
        request.validate()?;

        let driver = self
            .drivers
            .update_contact(id, request.full_name, request.phone)
            .await?;
        Ok(ApiResponse::success_with_message(driver.into(), "Driver updated"))
    }

    pub async fn assign_car(
        &self,
        auth: &AuthUser,
        id: Uuid,
        request: AssignCarRequest,
    ) -> Result<ApiResponse<DriverResponse>, AppError> {
        auth.require_any(&[UserRole::Operator], "assign cars")?;
        let driver = self.drivers.assign_car(id, request.car_id).await?;
        Ok(ApiResponse::success(driver.into()))
    }

    pub async fn unassign_car(&self, auth: &AuthUser, id: Uuid) -> Result<ApiResponse<DriverResponse>, AppError> {
        auth.require_any(&[UserRole::Operator], "unassign cars")?;
        let driver = self.drivers.unassign_car(id).await?;
        Ok(ApiResponse::success(driver.into()))
    }

    pub async fn delete(&self, auth: &AuthUser, id: Uuid) -> Result<ApiResponse<Uuid>, AppError> {
        auth.require_any(&[UserRole::Operator], "delete drivers")?;
        self.drivers.delete(id).await?;
        Ok(ApiResponse::success_with_message(id, "Driver deleted"))
    }

    pub async fn medical_checks(&self, id: Uuid) -> Result<ApiResponse<Vec<MedicalCheck>>, AppError> {
        let driver = self.drivers.get(id).await?;
        let history = self.medical_checks.history(driver.id).await?;
        Ok(ApiResponse::success(history))
    }
}
