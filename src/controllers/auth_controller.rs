use validator::Validate;

use crate::dto::auth_dto::{LoginRequest, LoginResponse};
use crate::dto::common_dto::ApiResponse;
use crate::services::UserService;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub struct AuthController {
    users: UserService,
}

impl AuthController {
    pub fn new(state: &AppState) -> Self {
        Self {
            users: state.services.users.clone(),
        }
    }

    pub async fn login(&self, request: LoginRequest) -> Result<ApiResponse<LoginResponse>, AppError> {
        request.validate()?;

        let session = self.users.authenticate(&request.login, &request.password).await?;

        Ok(ApiResponse::success(LoginResponse {
            token: session.token,
            token_type: "Bearer".to_string(),
            expires_in: session.expires_in,
            user: session.user.into(),
        }))
    }
}
