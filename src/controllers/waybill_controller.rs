use uuid::Uuid;
use validator::Validate;

use crate::dto::common_dto::ApiResponse;
use crate::dto::waybill_dto::{
    CancelWaybillRequest, CloseWaybillRequest, OpenWaybillRequest, WaybillFilters,
};
use crate::middleware::AuthUser;
use crate::models::{order::Order, user::UserRole, waybill::Waybill};
use crate::repositories::WaybillFilter;
use crate::services::WaybillService;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub struct WaybillController {
    waybills: WaybillService,
}

impl WaybillController {
    pub fn new(state: &AppState) -> Self {
        Self {
            waybills: state.services.waybills.clone(),
        }
    }

    pub async fn open(
        &self,
        auth: &AuthUser,
        request: OpenWaybillRequest,
    ) -> Result<ApiResponse<Waybill>, AppError> {
        auth.require_any(&[UserRole::Doctor, UserRole::Mechanic], "open waybills")?;
        request.validate()?;

        let waybill = self
            .waybills
            .open(request.driver_id, auth.user_id, request.initial_mileage)
            .await?;
        Ok(ApiResponse::success_with_message(waybill, "Waybill opened"))
    }

    pub async fn close(
        &self,
        auth: &AuthUser,
        id: Uuid,
        request: CloseWaybillRequest,
    ) -> Result<ApiResponse<Waybill>, AppError> {
        auth.require_any(&[UserRole::Mechanic], "close waybills")?;
        request.validate()?;

        let waybill = self
            .waybills
            .close(id, auth.user_id, request.final_mileage, request.earnings)
            .await?;
        Ok(ApiResponse::success_with_message(waybill, "Waybill closed"))
    }

    pub async fn cancel(
        &self,
        auth: &AuthUser,
        id: Uuid,
        request: CancelWaybillRequest,
    ) -> Result<ApiResponse<Waybill>, AppError> {
        auth.require_any(&[UserRole::Mechanic, UserRole::Operator], "cancel waybills")?;
        request.validate()?;

        let waybill = self.waybills.cancel(id, &request.reason).await?;
        Ok(ApiResponse::success_with_message(waybill, "Waybill cancelled"))
    }

    pub async fn get(&self, id: Uuid) -> Result<ApiResponse<Waybill>, AppError> {
        Ok(ApiResponse::success(self.waybills.get(id).await?))
    }

    pub async fn list(&self, filters: WaybillFilters) -> Result<ApiResponse<Vec<Waybill>>, AppError> {
        let waybills = self
            .waybills
            .list(&WaybillFilter {
                status: filters.status,
                driver_id: filters.driver_id,
                car_id: filters.car_id,
            })
            .await?;
        Ok(ApiResponse::success(waybills))
    }

    pub async fn orders(&self, id: Uuid) -> Result<ApiResponse<Vec<Order>>, AppError> {
        Ok(ApiResponse::success(self.waybills.orders(id).await?))
    }
}
