//! Configuración de variables de entorno
//!
//! Este módulo maneja la configuración del entorno y las reglas de negocio
//! configurables (comisión, asignación estricta de pedidos).

use std::env;
use std::str::FromStr;

use anyhow::{Context, Result};
use rust_decimal::Decimal;

use crate::models::waybill::DEFAULT_COMMISSION_RATE;

/// Configuración del entorno
#[derive(Debug, Clone)]
pub struct EnvironmentConfig {
    pub environment: String,
    pub port: u16,
    pub host: String,
    pub database_url: String,
    pub database_max_connections: u32,
    pub jwt_secret: String,
    pub jwt_expiration: u64,
    pub cors_origins: Vec<String>,
    pub log_level: String,
    /// Comisión de la empresa sobre la recaudación del turno
    pub commission_rate: Decimal,
    /// Rechazar asignaciones de pedidos a conductores sin waybill activo
    pub strict_order_assignment: bool,
    pub bcrypt_cost: u32,
    pub bootstrap_operator_login: Option<String>,
    pub bootstrap_operator_password: Option<String>,
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            environment: "development".to_string(),
            port: 3000,
            host: "0.0.0.0".to_string(),
            database_url: "postgres://localhost/taxi_fleet".to_string(),
            database_max_connections: 20,
            jwt_secret: "change-me".to_string(),
            jwt_expiration: 43_200,
            cors_origins: Vec::new(),
            log_level: "info".to_string(),
            commission_rate: DEFAULT_COMMISSION_RATE,
            strict_order_assignment: false,
            bcrypt_cost: bcrypt::DEFAULT_COST,
            bootstrap_operator_login: None,
            bootstrap_operator_password: None,
        }
    }
}

fn parsed<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{} has an invalid value: '{}'", key, raw)),
        Err(_) => Ok(default),
    }
}

impl EnvironmentConfig {
    /// Leer la configuración desde variables de entorno (tras `dotenvy`)
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();
        let environment = env::var("ENVIRONMENT").unwrap_or(defaults.environment);

        let jwt_secret = match env::var("JWT_SECRET") {
            Ok(secret) => secret,
            Err(_) if environment != "production" => defaults.jwt_secret,
            Err(_) => anyhow::bail!("JWT_SECRET must be set in production"),
        };

        let commission_rate: Decimal = parsed("COMMISSION_RATE", defaults.commission_rate)?;
        if commission_rate < Decimal::ZERO || commission_rate > Decimal::ONE {
            anyhow::bail!("COMMISSION_RATE must be between 0 and 1, got {}", commission_rate);
        }

        Ok(Self {
            port: parsed("PORT", defaults.port)?,
            host: env::var("HOST").unwrap_or(defaults.host),
            database_url: env::var("DATABASE_URL").context("DATABASE_URL must be set")?,
            database_max_connections: parsed("DATABASE_MAX_CONNECTIONS", defaults.database_max_connections)?,
            jwt_secret,
            jwt_expiration: parsed("JWT_EXPIRATION", defaults.jwt_expiration)?,
            cors_origins: env::var("CORS_ORIGINS")
                .map(|origins| {
                    origins
                        .split(',')
                        .map(|s| s.trim().to_string())
                        .filter(|s| !s.is_empty())
                        .collect()
                })
                .unwrap_or_default(),
            log_level: env::var("LOG_LEVEL").unwrap_or(defaults.log_level),
            commission_rate,
            strict_order_assignment: parsed("STRICT_ORDER_ASSIGNMENT", defaults.strict_order_assignment)?,
            bcrypt_cost: parsed("BCRYPT_COST", defaults.bcrypt_cost)?,
            bootstrap_operator_login: env::var("BOOTSTRAP_OPERATOR_LOGIN").ok(),
            bootstrap_operator_password: env::var("BOOTSTRAP_OPERATOR_PASSWORD").ok(),
            environment,
        })
    }

    /// Verificar si estamos en modo producción
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// Obtener la URL del servidor
    pub fn server_url(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
