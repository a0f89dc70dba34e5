use uuid::Uuid;
use validator::Validate;

use crate::dto::common_dto::ApiResponse;
use crate::dto::order_dto::{
    AssignOrderRequest, CancelOrderRequest, CompleteOrderRequest, CreateOrderRequest,
    OrderFilters,
};
use crate::middleware::AuthUser;
use crate::models::order::{NewOrder, Order};
use crate::models::user::UserRole;
use crate::repositories::OrderFilter;
use crate::services::{DriverService, OrderService};
use crate::state::AppState;
use crate::utils::errors::{forbidden_error, AppError, AppResult};

pub struct OrderController {
    orders: OrderService,
    drivers: DriverService,
}

impl OrderController {
    pub fn new(state: &AppState) -> Self {
        Self {
            orders: state.services.orders.clone(),
            drivers: state.services.drivers.clone(),
        }
    }

    pub async fn create(
        &self,
        auth: &AuthUser,
        request: CreateOrderRequest,
    ) -> Result<ApiResponse<Order>, AppError> {
        auth.require_any(&[UserRole::Operator], "create orders")?;
        request.validate()?;

        let order = self
            .orders
            .create(NewOrder {
                operator_id: auth.user_id,
                pickup_address: request.pickup_address.trim().to_string(),
                destination_address: request.destination_address.trim().to_string(),
                customer_phone: request.customer_phone,
                estimated_price: request.estimated_price,
                notes: request.notes,
            })
            .await?;
        Ok(ApiResponse::success_with_message(order, "Order created"))
    }

    pub async fn get(&self, id: Uuid) -> Result<ApiResponse<Order>, AppError> {
        Ok(ApiResponse::success(self.orders.get(id).await?))
    }

    pub async fn list(&self, filters: OrderFilters) -> Result<ApiResponse<Vec<Order>>, AppError> {
        let orders = self
            .orders
            .list(&OrderFilter {
                status: filters.status,
                driver_id: filters.driver_id,
                waybill_id: filters.waybill_id,
            })
            .await?;
        Ok(ApiResponse::success(orders))
    }

    pub async fn assign(
        &self,
        auth: &AuthUser,
        id: Uuid,
        request: AssignOrderRequest,
    ) -> Result<ApiResponse<Order>, AppError> {
        auth.require_any(&[UserRole::Operator], "assign orders")?;
        let order = self.orders.assign(id, request.driver_id).await?;
        Ok(ApiResponse::success_with_message(order, "Order assigned"))
    }

    pub async fn start(&self, auth: &AuthUser, id: Uuid) -> Result<ApiResponse<Order>, AppError> {
        self.ensure_driver_or_operator(auth, id, "start orders").await?;
        let order = self.orders.start(id).await?;
        Ok(ApiResponse::success(order))
    }

    pub async fn complete(
        &self,
        auth: &AuthUser,
        id: Uuid,
        request: CompleteOrderRequest,
    ) -> Result<ApiResponse<Order>, AppError> {
        self.ensure_driver_or_operator(auth, id, "complete orders").await?;
        request.validate()?;

        let order = self
            .orders
            .complete(id, request.price, request.distance)
            .await?;
        Ok(ApiResponse::success_with_message(order, "Order completed"))
    }

    pub async fn cancel(
        &self,
        auth: &AuthUser,
        id: Uuid,
        request: CancelOrderRequest,
    ) -> Result<ApiResponse<Order>, AppError> {
        auth.require_any(&[UserRole::Operator], "cancel orders")?;
        request.validate()?;

        let order = self.orders.cancel(id, request.reason).await?;
        Ok(ApiResponse::success_with_message(order, "Order cancelled"))
    }

    /// Los conductores solo pueden mover sus propios pedidos
    async fn ensure_driver_or_operator(&self, auth: &AuthUser, order_id: Uuid, operation: &str) -> AppResult<()> {
        auth.require_any(&[UserRole::Driver, UserRole::Operator], operation)?;
        if !auth.is(UserRole::Driver) {
            return Ok(());
        }

        let driver = self.drivers.get_by_user(auth.user_id).await?;
        let order = self.orders.get(order_id).await?;
        if order.driver_id != Some(driver.id) {
            return Err(forbidden_error(operation, "order is assigned to another driver"));
        }
        Ok(())
    }
}
