//! Autenticación JWT
//!
//! Extractor `AuthUser`: valida el token Bearer, recarga el usuario y
//! rechaza cuentas desactivadas. Los controladores comprueban el rol con
//! `require_any`.

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header, request::Parts},
};
use uuid::Uuid;

use crate::{
    models::user::UserRole,
    state::AppState,
    utils::{
        errors::{forbidden_error, AppError, AppResult},
        jwt::{extract_token_from_header, verify_token},
    },
};

/// Usuario autenticado que se inyecta en los handlers
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: Uuid,
    pub login: String,
    pub role: UserRole,
}

impl AuthUser {
    /// Comprobar que el usuario tiene alguno de los roles permitidos
    pub fn require_any(&self, roles: &[UserRole], operation: &str) -> AppResult<()> {
        if roles.contains(&self.role) {
            return Ok(());
        }
        Err(forbidden_error(
            operation,
            &format!("role {} is not allowed", self.role),
        ))
    }

    pub fn is(&self, role: UserRole) -> bool {
        self.role == role
    }
}

#[async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| AppError::Unauthorized("Authorization token required".to_string()))?;

        let token = extract_token_from_header(auth_header)?;
        let claims = verify_token(token, &state.jwt)?;
        let user_id = Uuid::parse_str(&claims.sub)
            .map_err(|_| AppError::Unauthorized("Invalid user id in token".to_string()))?;

        // El rol vigente es el de la base de datos, no el del token
        let user = match state.services.users.get(user_id).await {
            Ok(user) => user,
            Err(AppError::NotFound(_)) => {
                return Err(AppError::Unauthorized("User not found".to_string()))
            }
            Err(e) => return Err(e),
        };

        if !user.active {
            return Err(AppError::Unauthorized("User account is deactivated".to_string()));
        }

        Ok(AuthUser {
            user_id: user.id,
            login: user.login,
            role: user.role,
        })
    }
}
