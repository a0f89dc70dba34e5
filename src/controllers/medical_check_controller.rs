use uuid::Uuid;
use validator::Validate;

use crate::dto::common_dto::{ApiResponse, CleanupRequest, CleanupResponse};
use crate::dto::medical_check_dto::{RecordMedicalCheckRequest, UpdateMedicalCheckNotesRequest};
use crate::middleware::AuthUser;
use crate::models::medical_check::MedicalCheck;
use crate::models::user::UserRole;
use crate::services::MedicalCheckService;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub struct MedicalCheckController {
    medical_checks: MedicalCheckService,
}

impl MedicalCheckController {
    pub fn new(state: &AppState) -> Self {
        Self {
            medical_checks: state.services.medical_checks.clone(),
        }
    }

    pub async fn record(
        &self,
        auth: &AuthUser,
        request: RecordMedicalCheckRequest,
    ) -> Result<ApiResponse<MedicalCheck>, AppError> {
        auth.require_any(&[UserRole::Doctor], "record medical checks")?;
        request.validate()?;

        let check = self
            .medical_checks
            .record(
                request.driver_id,
                auth.user_id,
                request.passed,
                request.notes,
                request.opens_shift,
            )
            .await?;

        Ok(ApiResponse::success_with_message(check, "Medical check recorded"))
    }

    pub async fn get(&self, id: Uuid) -> Result<ApiResponse<MedicalCheck>, AppError> {
        Ok(ApiResponse::success(self.medical_checks.get(id).await?))
    }

    pub async fn latest_for_driver(&self, driver_id: Uuid) -> Result<ApiResponse<Option<MedicalCheck>>, AppError> {
        Ok(ApiResponse::success(
            self.medical_checks.latest_for_driver(driver_id).await?,
        ))
    }

    pub async fn update_notes(
        &self,
        auth: &AuthUser,
        id: Uuid,
        request: UpdateMedicalCheckNotesRequest,
    ) -> Result<ApiResponse<MedicalCheck>, AppError> {
        auth.require_any(&[UserRole::Doctor], "edit medical checks")?;
        request.validate()?;

        let check = self
            .medical_checks
            .update_notes(id, request.notes, request.opens_shift)
            .await?;
        Ok(ApiResponse::success(check))
    }

    pub async fn cleanup(
        &self,
        auth: &AuthUser,
        request: CleanupRequest,
    ) -> Result<ApiResponse<CleanupResponse>, AppError> {
        auth.require_any(&[UserRole::Doctor], "clean up medical checks")?;
        request.validate()?;

        let deleted = self
            .medical_checks
            .cleanup_older_than(request.older_than_days)
            .await?;
        Ok(ApiResponse::success(CleanupResponse { deleted }))
    }
}
