//! Servicio de pedidos (despacho)
//!
//! NEW → ASSIGNED → IN_PROGRESS → COMPLETED, o CANCELLED desde cualquier
//! estado no terminal. Al completar, el pedido suma su precio y distancia al
//! waybill activo al que pertenece.

use std::sync::Arc;

use chrono::Utc;
use rust_decimal::Decimal;
use tracing::{info, warn};
use uuid::Uuid;

use crate::models::order::{NewOrder, Order, OrderStatus};
use crate::repositories::{DriverRepository, OrderFilter, OrderRepository, WaybillRepository};
use crate::utils::errors::{invalid_state_error, not_found_error, AppError, AppResult};

#[derive(Clone)]
pub struct OrderService {
    orders: Arc<dyn OrderRepository>,
    drivers: Arc<dyn DriverRepository>,
    waybills: Arc<dyn WaybillRepository>,
    strict_assignment: bool,
}

impl OrderService {
    pub fn new(
        orders: Arc<dyn OrderRepository>,
        drivers: Arc<dyn DriverRepository>,
        waybills: Arc<dyn WaybillRepository>,
        strict_assignment: bool,
    ) -> Self {
        Self {
            orders,
            drivers,
            waybills,
            strict_assignment,
        }
    }

    pub async fn create(&self, new: NewOrder) -> AppResult<Order> {
        let order = self.orders.create(&Order::new(new)).await?;
        info!("📞 Pedido {} creado: {} → {}", order.id, order.pickup_address, order.destination_address);
        Ok(order)
    }

    pub async fn get(&self, id: Uuid) -> AppResult<Order> {
        self.orders
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Order", id))
    }

    pub async fn list(&self, filter: &OrderFilter) -> AppResult<Vec<Order>> {
        self.orders.list(filter).await
    }

    /// Asignar el pedido a un conductor.
    ///
    /// Sin waybill activo solo se avisa, salvo en modo estricto.
    pub async fn assign(&self, order_id: Uuid, driver_id: Uuid) -> AppResult<Order> {
        let mut order = self.get(order_id).await?;
        let driver = self
            .drivers
            .find_by_id(driver_id)
            .await?
            .ok_or_else(|| AppError::NotFound("driver not found".to_string()))?;

        let waybill = self.waybills.active_for_driver(driver.id).await?;
        let car_id = match &waybill {
            Some(waybill) => Some(waybill.car_id),
            None => driver.current_car_id,
        };
        if car_id.is_none() {
            return Err(invalid_state_error("driver has no car assigned"));
        }

        if waybill.is_none() {
            if self.strict_assignment {
                return Err(invalid_state_error(format!(
                    "driver {} has no active waybill",
                    driver.full_name
                )));
            }
            warn!(
                "⚠️ Pedido {} asignado a {} sin waybill activo",
                order.id, driver.full_name
            );
        }

        order.assign(driver.id, car_id, waybill.map(|w| w.id), Utc::now())?;
        let order = self.orders.update(&order, OrderStatus::New).await?;

        info!("🚕 Pedido {} asignado a {}", order.id, driver.full_name);
        Ok(order)
    }

    pub async fn start(&self, order_id: Uuid) -> AppResult<Order> {
        let mut order = self.get(order_id).await?;
        order.start(Utc::now())?;

        let order = self.orders.update(&order, OrderStatus::Assigned).await?;
        info!("🚕 Pedido {} en curso", order.id);
        Ok(order)
    }

    pub async fn complete(&self, order_id: Uuid, price: Decimal, distance: Decimal) -> AppResult<Order> {
        let mut order = self.get(order_id).await?;
        let prior = order.status;
        order.complete(price, distance, Utc::now())?;

        let (order, aggregated) = self.orders.complete(&order, prior).await?;
        match order.waybill_id {
            Some(waybill_id) if !aggregated => warn!(
                "⚠️ Pedido {} completado fuera del turno activo (waybill {})",
                order.id, waybill_id
            ),
            None => warn!("⚠️ Pedido {} completado sin waybill", order.id),
            _ => {}
        }

        info!("✅ Pedido {} completado: {} / {} km", order.id, price, distance);
        Ok(order)
    }

    pub async fn cancel(&self, order_id: Uuid, reason: Option<String>) -> AppResult<Order> {
        let mut order = self.get(order_id).await?;
        let prior = order.status;
        order.cancel(reason, Utc::now())?;

        let order = self.orders.update(&order, prior).await?;
        info!("❌ Pedido {} cancelado", order.id);
        Ok(order)
    }
}
