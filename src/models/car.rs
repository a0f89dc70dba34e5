//! Modelo de Car
//!
//! Coches de la flota. Un coche solo puede salir a trabajar si está
//! operativo: estado técnico `ok`, activo y fuera del taller.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use uuid::Uuid;

/// Estado técnico del coche - mapea al ENUM car_technical_status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Type, PartialEq, Eq)]
#[sqlx(type_name = "car_technical_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum TechnicalStatus {
    Unknown,
    Ok,
    NeedsRepair,
    NeedsInspection,
    OutOfService,
}

/// Car - mapea exactamente a la tabla cars
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Car {
    pub id: Uuid,
    pub plate: String,
    pub vin: Option<String>,
    pub brand: Option<String>,
    pub model: Option<String>,
    pub technical_status: TechnicalStatus,
    pub active: bool,
    pub in_repair: bool,
    pub mileage: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Car {
    pub fn new(
        plate: String,
        vin: Option<String>,
        brand: Option<String>,
        model: Option<String>,
        mileage: i32,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            plate,
            vin,
            brand,
            model,
            technical_status: TechnicalStatus::Unknown,
            active: true,
            in_repair: false,
            mileage,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_operational(&self) -> bool {
        self.technical_status == TechnicalStatus::Ok && self.active && !self.in_repair
    }

    /// Entrar o salir del taller. Al salir el coche necesita una nueva inspección.
    pub fn set_in_repair(&mut self, in_repair: bool) {
        if self.in_repair == in_repair {
            return;
        }
        self.in_repair = in_repair;
        self.technical_status = if in_repair {
            TechnicalStatus::NeedsRepair
        } else {
            TechnicalStatus::NeedsInspection
        };
        self.updated_at = Utc::now();
    }

    pub fn set_active(&mut self, active: bool) {
        if self.active == active {
            return;
        }
        self.active = active;
        self.technical_status = if active {
            TechnicalStatus::NeedsInspection
        } else {
            TechnicalStatus::OutOfService
        };
        self.updated_at = Utc::now();
    }

    /// Aplicar el resultado de una inspección técnica
    pub fn apply_inspection(&mut self, passed: bool, mileage: i32) {
        self.technical_status = if passed {
            TechnicalStatus::Ok
        } else {
            TechnicalStatus::NeedsRepair
        };
        self.mileage = self.mileage.max(mileage);
        self.updated_at = Utc::now();
    }
}
