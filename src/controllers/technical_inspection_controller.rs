use uuid::Uuid;
use validator::Validate;

use crate::dto::common_dto::{ApiResponse, CleanupRequest, CleanupResponse};
use crate::dto::technical_inspection_dto::RecordInspectionRequest;
use crate::middleware::AuthUser;
use crate::models::technical_inspection::TechnicalInspection;
use crate::models::user::UserRole;
use crate::services::TechnicalInspectionService;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub struct TechnicalInspectionController {
    inspections: TechnicalInspectionService,
}

impl TechnicalInspectionController {
    pub fn new(state: &AppState) -> Self {
        Self {
            inspections: state.services.inspections.clone(),
        }
    }

    pub async fn record(
        &self,
        auth: &AuthUser,
        request: RecordInspectionRequest,
    ) -> Result<ApiResponse<TechnicalInspection>, AppError> {
        auth.require_any(&[UserRole::Mechanic], "record inspections")?;
        request.validate()?;

        let inspection = self
            .inspections
            .record(
                request.car_id,
                auth.user_id,
                request.passed,
                request.mileage,
                request.notes,
            )
            .await?;

        Ok(ApiResponse::success_with_message(inspection, "Inspection recorded"))
    }

    pub async fn get(&self, id: Uuid) -> Result<ApiResponse<TechnicalInspection>, AppError> {
        Ok(ApiResponse::success(self.inspections.get(id).await?))
    }

    pub async fn latest_for_car(&self, car_id: Uuid) -> Result<ApiResponse<Option<TechnicalInspection>>, AppError> {
        Ok(ApiResponse::success(self.inspections.latest_for_car(car_id).await?))
    }

    pub async fn cleanup(
        &self,
        auth: &AuthUser,
        request: CleanupRequest,
    ) -> Result<ApiResponse<CleanupResponse>, AppError> {
        auth.require_any(&[UserRole::Mechanic], "clean up inspections")?;
        request.validate()?;

        let deleted = self
            .inspections
            .cleanup_older_than(request.older_than_days)
            .await?;
        Ok(ApiResponse::success(CleanupResponse { deleted }))
    }
}
