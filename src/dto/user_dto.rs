use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::user::{User, UserRole};
use crate::utils::validation::validate_login;

// Request para crear un usuario
#[derive(Debug, Deserialize, Validate)]
pub struct CreateUserRequest {
    #[validate(custom = "validate_login")]
    pub login: String,
    #[validate(length(min = 8, max = 128))]
    pub password: String,
    #[validate(length(min = 2, max = 200))]
    pub full_name: String,
    pub role: UserRole,
}

// Request para activar/desactivar un usuario
#[derive(Debug, Deserialize)]
pub struct SetUserActiveRequest {
    pub active: bool,
}

// Response de usuario (sin password)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub login: String,
    pub full_name: String,
    pub role: UserRole,
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            login: user.login,
            full_name: user.full_name,
            role: user.role,
            active: user.active,
            created_at: user.created_at,
        }
    }
}
