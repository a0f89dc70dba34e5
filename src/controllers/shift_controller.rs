use uuid::Uuid;
use validator::Validate;

use crate::dto::common_dto::ApiResponse;
use crate::dto::waybill_dto::{EndShiftRequest, OpenWaybillRequest};
use crate::middleware::AuthUser;
use crate::models::{user::UserRole, waybill::Waybill};
use crate::services::{shift_service::ShiftReadiness, ShiftService};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub struct ShiftController {
    shifts: ShiftService,
}

impl ShiftController {
    pub fn new(state: &AppState) -> Self {
        Self {
            shifts: state.services.shifts.clone(),
        }
    }

    pub async fn readiness(&self, driver_id: Uuid) -> Result<ApiResponse<ShiftReadiness>, AppError> {
        Ok(ApiResponse::success(self.shifts.readiness(driver_id).await?))
    }

    pub async fn current(&self, driver_id: Uuid) -> Result<ApiResponse<Option<Waybill>>, AppError> {
        Ok(ApiResponse::success(self.shifts.current_shift(driver_id).await?))
    }

    pub async fn start(
        &self,
        auth: &AuthUser,
        request: OpenWaybillRequest,
    ) -> Result<ApiResponse<Waybill>, AppError> {
        auth.require_any(&[UserRole::Doctor, UserRole::Mechanic], "start shifts")?;
        request.validate()?;

        let waybill = self
            .shifts
            .start_shift(request.driver_id, auth.user_id, request.initial_mileage)
            .await?;
        Ok(ApiResponse::success_with_message(waybill, "Shift started"))
    }

    pub async fn end(&self, auth: &AuthUser, request: EndShiftRequest) -> Result<ApiResponse<Waybill>, AppError> {
        auth.require_any(&[UserRole::Mechanic], "end shifts")?;
        request.validate()?;

        let waybill = self
            .shifts
            .end_shift(
                request.driver_id,
                auth.user_id,
                request.final_mileage,
                request.earnings,
            )
            .await?;
        Ok(ApiResponse::success_with_message(waybill, "Shift ended"))
    }
}
