//! Modelo de Waybill (hoja de ruta del turno)
//!
//! Un waybill une un conductor, un coche y un intervalo de tiempo, y acumula
//! las estadísticas de los pedidos completados durante el turno.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use uuid::Uuid;

use crate::utils::errors::{invalid_state_error, AppResult};

/// Comisión fija de la empresa sobre la recaudación (20%)
pub const DEFAULT_COMMISSION_RATE: Decimal = Decimal::from_parts(20, 0, 0, false, 2);

/// Estado del waybill - mapea al ENUM waybill_status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Type, PartialEq, Eq)]
#[sqlx(type_name = "waybill_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum WaybillStatus {
    Active,
    Completed,
    Cancelled,
}

/// Waybill - mapea exactamente a la tabla waybills
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Waybill {
    pub id: Uuid,
    pub driver_id: Uuid,
    pub car_id: Uuid,
    /// Médico o técnico que abrió el turno
    pub issued_by: Uuid,
    /// Mecánico que cerró el turno
    pub closed_by: Option<Uuid>,
    pub medical_check_id: Option<Uuid>,
    pub inspection_id: Option<Uuid>,
    pub status: WaybillStatus,
    pub start_time: DateTime<Utc>,
    pub end_time: Option<DateTime<Utc>>,
    pub initial_mileage: i32,
    pub final_mileage: Option<i32>,
    pub total_distance: Decimal,
    pub revenue: Decimal,
    pub earnings: Decimal,
    pub order_count: i32,
    pub notes: Option<String>,
}

/// Datos necesarios para abrir un turno
#[derive(Debug, Clone)]
pub struct NewWaybill {
    pub driver_id: Uuid,
    pub car_id: Uuid,
    pub issued_by: Uuid,
    pub medical_check_id: Option<Uuid>,
    pub inspection_id: Option<Uuid>,
    pub initial_mileage: i32,
}

impl Waybill {
    /// Abrir un waybill en estado ACTIVE con los contadores a cero
    pub fn open(new: NewWaybill, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            driver_id: new.driver_id,
            car_id: new.car_id,
            issued_by: new.issued_by,
            closed_by: None,
            medical_check_id: new.medical_check_id,
            inspection_id: new.inspection_id,
            status: WaybillStatus::Active,
            start_time: now,
            end_time: None,
            initial_mileage: new.initial_mileage,
            final_mileage: None,
            total_distance: Decimal::ZERO,
            revenue: Decimal::ZERO,
            earnings: Decimal::ZERO,
            order_count: 0,
            notes: None,
        }
    }

    pub fn is_active(&self) -> bool {
        self.status == WaybillStatus::Active
    }

    /// Sumar un pedido completado a los totales del turno
    pub fn record_completed_order(&mut self, price: Decimal, distance: Decimal) {
        self.revenue += price;
        self.total_distance += distance;
        self.order_count += 1;
    }

    /// Cerrar el turno.
    ///
    /// Las ganancias del conductor son la recaudación menos la comisión,
    /// salvo que se indique un valor explícito.
    pub fn close(
        &mut self,
        mechanic_id: Uuid,
        final_mileage: i32,
        earnings_override: Option<Decimal>,
        commission_rate: Decimal,
        now: DateTime<Utc>,
    ) -> AppResult<()> {
        if !self.is_active() {
            return Err(invalid_state_error(format!(
                "waybill {} is not active",
                self.id
            )));
        }
        if final_mileage < self.initial_mileage {
            return Err(invalid_state_error(format!(
                "final mileage {} is lower than initial mileage {}",
                final_mileage, self.initial_mileage
            )));
        }

        self.earnings = match earnings_override {
            Some(earnings) => earnings,
            None => driver_earnings(self.revenue, commission_rate),
        };
        self.status = WaybillStatus::Completed;
        self.closed_by = Some(mechanic_id);
        self.final_mileage = Some(final_mileage);
        self.end_time = Some(now);
        Ok(())
    }

    /// Cancelar el turno mientras sigue activo
    pub fn cancel(&mut self, reason: &str, now: DateTime<Utc>) -> AppResult<()> {
        if !self.is_active() {
            return Err(invalid_state_error(format!(
                "waybill {} is not active",
                self.id
            )));
        }
        let line = format!("Cancelled: {}", reason.trim());
        self.notes = Some(match self.notes.take() {
            Some(existing) if !existing.is_empty() => format!("{}\n{}", existing, line),
            _ => line,
        });
        self.status = WaybillStatus::Cancelled;
        self.end_time = Some(now);
        Ok(())
    }
}

/// Recaudación menos comisión, redondeado a céntimos
pub fn driver_earnings(revenue: Decimal, commission_rate: Decimal) -> Decimal {
    (revenue * (Decimal::ONE - commission_rate)).round_dp(2)
}
