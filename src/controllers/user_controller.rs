use uuid::Uuid;
use validator::Validate;

use crate::dto::common_dto::ApiResponse;
use crate::dto::user_dto::{CreateUserRequest, SetUserActiveRequest, UserResponse};
use crate::middleware::AuthUser;
use crate::models::user::UserRole;
use crate::services::UserService;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub struct UserController {
    users: UserService,
}

impl UserController {
    pub fn new(state: &AppState) -> Self {
        Self {
            users: state.services.users.clone(),
        }
    }

    pub async fn create(
        &self,
        auth: &AuthUser,
        request: CreateUserRequest,
    ) -> Result<ApiResponse<UserResponse>, AppError> {
        auth.require_any(&[UserRole::Operator], "create users")?;
        request.validate()?;

        let user = self
            .users
            .create(request.login, &request.password, request.full_name, request.role)
            .await?;

        Ok(ApiResponse::success_with_message(user.into(), "User created"))
    }

    pub async fn list(&self, auth: &AuthUser) -> Result<ApiResponse<Vec<UserResponse>>, AppError> {
        auth.require_any(&[UserRole::Operator], "list users")?;
        let users = self.users.list().await?;
        Ok(ApiResponse::success(users.into_iter().map(Into::into).collect()))
    }

    pub async fn get(&self, auth: &AuthUser, id: Uuid) -> Result<ApiResponse<UserResponse>, AppError> {
        if auth.user_id != id {
            auth.require_any(&[UserRole::Operator], "view other users")?;
        }
        let user = self.users.get(id).await?;
        Ok(ApiResponse::success(user.into()))
    }

    pub async fn me(&self, auth: &AuthUser) -> Result<ApiResponse<UserResponse>, AppError> {
        self.get(auth, auth.user_id).await
    }

    pub async fn set_active(
        &self,
        auth: &AuthUser,
        id: Uuid,
        request: SetUserActiveRequest,
    ) -> Result<ApiResponse<UserResponse>, AppError> {
        auth.require_any(&[UserRole::Operator], "change user status")?;
        if auth.user_id == id && !request.active {
            return Err(AppError::BadRequest("operators cannot deactivate themselves".to_string()));
        }
        let user = self.users.set_active(id, request.active).await?;
        Ok(ApiResponse::success(user.into()))
    }
}
