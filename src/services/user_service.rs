//! Servicio de usuarios y autenticación
//!
//! Alta de cuentas, login con bcrypt + JWT y activación/desactivación.

use std::sync::Arc;

use bcrypt::{hash, verify};
use tracing::{info, warn};
use uuid::Uuid;

use crate::models::user::{User, UserRole};
use crate::repositories::UserRepository;
use crate::utils::errors::{conflict_error, not_found_error, AppError, AppResult};
use crate::utils::jwt::{generate_token, JwtConfig};

/// Resultado de un login correcto
#[derive(Debug, Clone)]
pub struct AuthenticatedSession {
    pub token: String,
    pub expires_in: u64,
    pub user: User,
}

#[derive(Clone)]
pub struct UserService {
    users: Arc<dyn UserRepository>,
    jwt: JwtConfig,
    bcrypt_cost: u32,
}

impl UserService {
    pub fn new(users: Arc<dyn UserRepository>, jwt: JwtConfig, bcrypt_cost: u32) -> Self {
        Self {
            users,
            jwt,
            bcrypt_cost,
        }
    }

    pub async fn create(
        &self,
        login: String,
        password: &str,
        full_name: String,
        role: UserRole,
    ) -> AppResult<User> {
        if self.users.login_exists(&login).await? {
            return Err(conflict_error("User", "login", &login));
        }

        let password_hash = hash(password, self.bcrypt_cost)
            .map_err(|e| AppError::Hash(format!("Error hashing password: {}", e)))?;

        let user = self
            .users
            .create(&User::new(login, password_hash, full_name, role))
            .await?;

        info!("👤 Usuario {} creado con rol {}", user.login, user.role);
        Ok(user)
    }

    /// Verificar credenciales y emitir un token de sesión
    pub async fn authenticate(&self, login: &str, password: &str) -> AppResult<AuthenticatedSession> {
        let invalid = || AppError::Unauthorized("Invalid credentials".to_string());

        let user = self.users.find_by_login(login).await?.ok_or_else(invalid)?;

        let valid = verify(password, &user.password_hash)
            .map_err(|e| AppError::Hash(format!("Error verifying password: {}", e)))?;
        if !valid {
            warn!("🔒 Login fallido para {}", login);
            return Err(invalid());
        }

        if !user.active {
            return Err(AppError::Unauthorized("User account is deactivated".to_string()));
        }

        let token = generate_token(user.id, user.role, &self.jwt)?;
        Ok(AuthenticatedSession {
            token,
            expires_in: self.jwt.expiration,
            user,
        })
    }

    pub async fn get(&self, id: Uuid) -> AppResult<User> {
        self.users
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("User", id))
    }

    pub async fn list(&self) -> AppResult<Vec<User>> {
        self.users.list().await
    }

    pub async fn set_active(&self, id: Uuid, active: bool) -> AppResult<User> {
        let user = self
            .users
            .set_active(id, active)
            .await?
            .ok_or_else(|| not_found_error("User", id))?;

        info!("👤 Usuario {} activo={}", user.login, user.active);
        Ok(user)
    }

    /// Crear el primer operador si la base de datos no tiene usuarios
    pub async fn ensure_bootstrap_operator(&self, login: &str, password: &str) -> AppResult<Option<User>> {
        if self.users.count().await? > 0 {
            return Ok(None);
        }

        let user = self
            .create(
                login.to_string(),
                password,
                "Bootstrap operator".to_string(),
                UserRole::Operator,
            )
            .await?;
        info!("🚀 Operador inicial {} creado", user.login);
        Ok(Some(user))
    }
}
