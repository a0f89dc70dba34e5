//! Errores de la aplicación
//!
//! `AppError` recorre servicios y controladores; al responder se traduce
//! a un estado HTTP y a un cuerpo JSON con `code` estable.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Regla de negocio violada por el estado actual de la entidad
    #[error("Invalid state: {0}")]
    InvalidState(String),

    #[error("Internal server error: {0}")]
    Internal(String),

    #[error("JWT error: {0}")]
    Jwt(String),

    #[error("Hash error: {0}")]
    Hash(String),
}

/// Cuerpo JSON de toda respuesta de error
#[derive(Debug, serde::Serialize)]
struct ErrorBody {
    error: &'static str,
    message: String,
    code: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<serde_json::Value>,
}

impl AppError {
    /// Código estable para clientes de la API
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Database(_) => "DB_ERROR",
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::Unauthorized(_) => "UNAUTHORIZED",
            AppError::Forbidden(_) => "FORBIDDEN",
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::Conflict(_) => "CONFLICT",
            AppError::BadRequest(_) => "BAD_REQUEST",
            AppError::InvalidState(_) => "INVALID_STATE",
            AppError::Internal(_) => "INTERNAL_ERROR",
            AppError::Jwt(_) => "JWT_ERROR",
            AppError::Hash(_) => "HASH_ERROR",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized(_) | AppError::Jwt(_) => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::InvalidState(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Database(_) | AppError::Internal(_) | AppError::Hash(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn title(&self) -> &'static str {
        match self {
            AppError::Database(_) => "Database Error",
            AppError::Validation(_) => "Validation Error",
            AppError::Unauthorized(_) => "Unauthorized",
            AppError::Forbidden(_) => "Forbidden",
            AppError::NotFound(_) => "Not Found",
            AppError::Conflict(_) => "Conflict",
            AppError::BadRequest(_) => "Bad Request",
            AppError::InvalidState(_) => "Invalid State",
            AppError::Internal(_) => "Internal Server Error",
            AppError::Jwt(_) => "JWT Error",
            AppError::Hash(_) => "Hash Error",
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let error = self.title();
        let code = self.code();

        // Los fallos internos se registran completos y se responden genéricos
        let (message, details) = match self {
            AppError::Database(e) => {
                tracing::error!("❌ Database error: {}", e);
                ("Database operation failed".to_string(), None)
            }
            AppError::Internal(msg) => {
                tracing::error!("❌ Internal error: {}", msg);
                ("Unexpected server error".to_string(), None)
            }
            AppError::Hash(msg) => {
                tracing::error!("❌ Password hashing error: {}", msg);
                ("Could not process credentials".to_string(), None)
            }
            AppError::Validation(e) => {
                tracing::debug!("Rejected payload: {}", e);
                ("Request payload is invalid".to_string(), Some(json!(e)))
            }
            AppError::Unauthorized(msg) | AppError::Forbidden(msg) => {
                tracing::warn!("🔒 Access denied: {}", msg);
                (msg, None)
            }
            AppError::NotFound(msg)
            | AppError::Conflict(msg)
            | AppError::BadRequest(msg)
            | AppError::InvalidState(msg)
            | AppError::Jwt(msg) => (msg, None),
        };

        let body = ErrorBody {
            error,
            message,
            code,
            details,
        };
        (status, Json(body)).into_response()
    }
}

/// Resultado tipado para operaciones que pueden fallar
pub type AppResult<T> = Result<T, AppError>;

/// Recurso inexistente por id
pub fn not_found_error(resource: &str, id: impl std::fmt::Display) -> AppError {
    AppError::NotFound(format!("{resource} with id '{id}' not found"))
}

/// Valor único ya registrado
pub fn conflict_error(resource: &str, field: &str, value: &str) -> AppError {
    AppError::Conflict(format!("{resource} with {field} '{value}' already exists"))
}

pub fn forbidden_error(operation: &str, reason: &str) -> AppError {
    AppError::Forbidden(format!("Cannot {operation}: {reason}"))
}

pub fn invalid_state_error(message: impl Into<String>) -> AppError {
    AppError::InvalidState(message.into())
}

/// Traducir violaciones de índices únicos de Postgres a `Conflict`
pub fn map_unique_violation(e: sqlx::Error, message: &str) -> AppError {
    match &e {
        sqlx::Error::Database(db) if db.is_unique_violation() => {
            AppError::Conflict(message.to_string())
        }
        _ => AppError::Database(e),
    }
}
