//! Modelo de User
//!
//! Cuentas de acceso al sistema. El rol decide qué operaciones puede
//! realizar cada usuario.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use uuid::Uuid;

/// Rol del usuario - mapea al ENUM user_role
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Type, PartialEq, Eq, Hash)]
#[sqlx(type_name = "user_role", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    Operator,
    Driver,
    Doctor,
    Mechanic,
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            UserRole::Operator => "operator",
            UserRole::Driver => "driver",
            UserRole::Doctor => "doctor",
            UserRole::Mechanic => "mechanic",
        };
        f.write_str(name)
    }
}

/// User - mapea exactamente a la tabla users
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: Uuid,
    pub login: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub full_name: String,
    pub role: UserRole,
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn new(login: String, password_hash: String, full_name: String, role: UserRole) -> Self {
        Self {
            id: Uuid::new_v4(),
            login,
            password_hash,
            full_name,
            role,
            active: true,
            created_at: Utc::now(),
        }
    }
}
