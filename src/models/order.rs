//! Modelo de Order (pedido de viaje)
//!
//! Los estados avanzan estrictamente hacia delante:
//! NEW → ASSIGNED → IN_PROGRESS → COMPLETED, o CANCELLED desde cualquier
//! estado no terminal.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use uuid::Uuid;

use crate::utils::errors::{invalid_state_error, AppResult};

/// Estado del pedido - mapea al ENUM order_status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Type, PartialEq, Eq)]
#[sqlx(type_name = "order_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    New,
    Assigned,
    InProgress,
    Completed,
    Cancelled,
}

impl OrderStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, OrderStatus::Completed | OrderStatus::Cancelled)
    }

    fn rank(self) -> u8 {
        match self {
            OrderStatus::New => 0,
            OrderStatus::Assigned => 1,
            OrderStatus::InProgress => 2,
            OrderStatus::Completed => 3,
            OrderStatus::Cancelled => 4,
        }
    }

    /// Transiciones permitidas: solo hacia delante, y cancelación desde
    /// cualquier estado no terminal.
    pub fn can_transition_to(self, next: OrderStatus) -> bool {
        if self.is_terminal() {
            return false;
        }
        match next {
            OrderStatus::Cancelled => true,
            OrderStatus::New => false,
            _ => next.rank() > self.rank(),
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            OrderStatus::New => "new",
            OrderStatus::Assigned => "assigned",
            OrderStatus::InProgress => "in_progress",
            OrderStatus::Completed => "completed",
            OrderStatus::Cancelled => "cancelled",
        };
        f.write_str(name)
    }
}

/// Order - mapea exactamente a la tabla orders
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Order {
    pub id: Uuid,
    pub operator_id: Uuid,
    pub driver_id: Option<Uuid>,
    pub car_id: Option<Uuid>,
    pub waybill_id: Option<Uuid>,
    pub status: OrderStatus,
    pub pickup_address: String,
    pub destination_address: String,
    pub customer_phone: Option<String>,
    pub price: Option<Decimal>,
    pub distance: Option<Decimal>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub assigned_at: Option<DateTime<Utc>>,
    pub started_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
    pub cancelled_at: Option<DateTime<Utc>>,
    pub cancel_reason: Option<String>,
}

/// Datos de un pedido nuevo creado por un operador
#[derive(Debug, Clone)]
pub struct NewOrder {
    pub operator_id: Uuid,
    pub pickup_address: String,
    pub destination_address: String,
    pub customer_phone: Option<String>,
    pub estimated_price: Option<Decimal>,
    pub notes: Option<String>,
}

impl Order {
    pub fn new(new: NewOrder) -> Self {
        Self {
            id: Uuid::new_v4(),
            operator_id: new.operator_id,
            driver_id: None,
            car_id: None,
            waybill_id: None,
            status: OrderStatus::New,
            pickup_address: new.pickup_address,
            destination_address: new.destination_address,
            customer_phone: new.customer_phone,
            price: new.estimated_price,
            distance: None,
            notes: new.notes,
            created_at: Utc::now(),
            assigned_at: None,
            started_at: None,
            completed_at: None,
            cancelled_at: None,
            cancel_reason: None,
        }
    }

    fn transition(&mut self, next: OrderStatus) -> AppResult<()> {
        if !self.status.can_transition_to(next) {
            return Err(invalid_state_error(format!(
                "order {} cannot move from {} to {}",
                self.id, self.status, next
            )));
        }
        self.status = next;
        Ok(())
    }

    pub fn assign(
        &mut self,
        driver_id: Uuid,
        car_id: Option<Uuid>,
        waybill_id: Option<Uuid>,
        now: DateTime<Utc>,
    ) -> AppResult<()> {
        if self.status != OrderStatus::New {
            return Err(invalid_state_error(format!(
                "order {} is already {}",
                self.id, self.status
            )));
        }
        self.transition(OrderStatus::Assigned)?;
        self.driver_id = Some(driver_id);
        self.car_id = car_id;
        self.waybill_id = waybill_id;
        self.assigned_at = Some(now);
        Ok(())
    }

    pub fn start(&mut self, now: DateTime<Utc>) -> AppResult<()> {
        if self.status != OrderStatus::Assigned {
            return Err(invalid_state_error(format!(
                "order {} must be assigned before it starts, current status is {}",
                self.id, self.status
            )));
        }
        self.transition(OrderStatus::InProgress)?;
        self.started_at = Some(now);
        Ok(())
    }

    pub fn complete(&mut self, price: Decimal, distance: Decimal, now: DateTime<Utc>) -> AppResult<()> {
        if self.driver_id.is_none() {
            return Err(invalid_state_error(format!(
                "order {} has no driver assigned",
                self.id
            )));
        }
        self.transition(OrderStatus::Completed)?;
        self.price = Some(price);
        self.distance = Some(distance);
        self.completed_at = Some(now);
        Ok(())
    }

    pub fn cancel(&mut self, reason: Option<String>, now: DateTime<Utc>) -> AppResult<()> {
        self.transition(OrderStatus::Cancelled)?;
        self.cancelled_at = Some(now);
        self.cancel_reason = reason;
        Ok(())
    }
}
