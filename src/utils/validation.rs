//! Utilidades de validación
//!
//! Validadores personalizados usados por los DTOs (`#[validate(custom = "...")]`)
//! y por los servicios.

use lazy_static::lazy_static;
use regex::Regex;
use rust_decimal::Decimal;
use serde::Serialize;
use validator::ValidationError;

lazy_static! {
    /// Matrícula: letras, dígitos y separadores opcionales
    static ref PLATE_REGEX: Regex = Regex::new(r"^[A-Z0-9]+([ -]?[A-Z0-9]+)*$").unwrap();
    /// Número de licencia de conducir
    static ref LICENSE_REGEX: Regex = Regex::new(r"^[A-Z0-9]{6,20}$").unwrap();
    /// VIN ISO 3779 (sin I, O, Q)
    static ref VIN_REGEX: Regex = Regex::new(r"^[A-HJ-NPR-Z0-9]{17}$").unwrap();
    static ref LOGIN_REGEX: Regex = Regex::new(r"^[a-zA-Z0-9_.-]{3,64}$").unwrap();
}

/// Error de validación con el valor rechazado como parámetro
fn rejected(code: &'static str, value: &str) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.add_param("value".into(), &value);
    error
}

/// Texto obligatorio: no vale solo con espacios
pub fn validate_not_empty(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(rejected("not_empty", value));
    }
    Ok(())
}

/// Teléfono de contacto: entre 10 y 15 dígitos, se ignoran separadores
pub fn validate_phone(value: &str) -> Result<(), ValidationError> {
    let digits = value.chars().filter(char::is_ascii_digit).count();
    if !(10..=15).contains(&digits) {
        return Err(rejected("phone", value));
    }
    Ok(())
}

/// Validar formato de matrícula del coche
pub fn validate_license_plate(value: &str) -> Result<(), ValidationError> {
    let upper = value.trim().to_uppercase();
    let compact = upper.replace([' ', '-'], "");
    if compact.len() < 4 || compact.len() > 10 || !PLATE_REGEX.is_match(&upper) {
        return Err(rejected("license_plate", value));
    }
    Ok(())
}

/// Validar número de licencia de conducir
pub fn validate_license_number(value: &str) -> Result<(), ValidationError> {
    if !LICENSE_REGEX.is_match(&value.trim().to_uppercase()) {
        let mut error = rejected("license_number", value);
        error.add_param("format".into(), &"6-20 letters or digits");
        return Err(error);
    }
    Ok(())
}

/// Validar VIN de 17 caracteres
pub fn validate_vin(value: &str) -> Result<(), ValidationError> {
    if !VIN_REGEX.is_match(&value.trim().to_uppercase()) {
        return Err(rejected("vin", value));
    }
    Ok(())
}

/// Validar login de usuario
pub fn validate_login(value: &str) -> Result<(), ValidationError> {
    if !LOGIN_REGEX.is_match(value) {
        return Err(rejected("login", value));
    }
    Ok(())
}

/// Importes, kilometrajes y tarifas nunca son negativos
pub fn validate_non_negative<T>(value: T) -> Result<(), ValidationError>
where
    T: PartialOrd + num_traits::Zero + Serialize,
{
    if value >= T::zero() {
        return Ok(());
    }
    let mut error = ValidationError::new("non_negative");
    error.add_param("value".into(), &value);
    Err(error)
}

/// Variante para campos `Decimal` de los DTOs
pub fn validate_non_negative_decimal(value: &Decimal) -> Result<(), ValidationError> {
    validate_non_negative(*value)
}

/// Normalizar matrícula para almacenamiento y búsqueda
pub fn normalize_plate(value: &str) -> String {
    value.trim().to_uppercase()
}
