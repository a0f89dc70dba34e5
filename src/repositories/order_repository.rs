use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::order::{Order, OrderStatus};
use crate::repositories::{OrderFilter, OrderRepository};
use crate::utils::errors::{invalid_state_error, AppError, AppResult};

pub struct PgOrderRepository {
    pool: PgPool,
}

impl PgOrderRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const UPDATE_ORDER: &str = r#"
    UPDATE orders
    SET driver_id = $2, car_id = $3, waybill_id = $4, status = $5, price = $6, distance = $7,
        notes = $8, assigned_at = $9, started_at = $10, completed_at = $11, cancelled_at = $12,
        cancel_reason = $13
    WHERE id = $1 AND status = $14
    RETURNING *
"#;

#[async_trait]
impl OrderRepository for PgOrderRepository {
    async fn create(&self, order: &Order) -> AppResult<Order> {
        let order = sqlx::query_as::<_, Order>(
            r#"
            INSERT INTO orders (
                id, operator_id, status, pickup_address, destination_address,
                customer_phone, price, notes, created_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING *
            "#,
        )
        .bind(order.id)
        .bind(order.operator_id)
        .bind(order.status)
        .bind(&order.pickup_address)
        .bind(&order.destination_address)
        .bind(&order.customer_phone)
        .bind(order.price)
        .bind(&order.notes)
        .bind(order.created_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(order)
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Order>> {
        let order = sqlx::query_as::<_, Order>("SELECT * FROM orders WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(order)
    }

    async fn list(&self, filter: &OrderFilter) -> AppResult<Vec<Order>> {
        let orders = sqlx::query_as::<_, Order>(
            r#"
            SELECT * FROM orders
            WHERE ($1::order_status IS NULL OR status = $1)
              AND ($2::uuid IS NULL OR driver_id = $2)
              AND ($3::uuid IS NULL OR waybill_id = $3)
            ORDER BY created_at DESC
            "#,
        )
        .bind(filter.status)
        .bind(filter.driver_id)
        .bind(filter.waybill_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(orders)
    }

    async fn count_in_progress_for_driver(&self, driver_id: Uuid) -> AppResult<i64> {
        let result: (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM orders WHERE driver_id = $1 AND status = 'in_progress'",
        )
        .bind(driver_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(result.0)
    }

    async fn update(&self, order: &Order, expected: OrderStatus) -> AppResult<Order> {
        bind_update(order, expected)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| stale_order(order, expected))
    }

    async fn complete(&self, order: &Order, expected: OrderStatus) -> AppResult<(Order, bool)> {
        let mut tx = self.pool.begin().await?;

        // Si otra petición ya completó el pedido no se vuelve a sumar al waybill
        let saved = bind_update(order, expected)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| stale_order(order, expected))?;

        let mut aggregated = false;
        if let Some(waybill_id) = saved.waybill_id {
            let result = sqlx::query(
                r#"
                UPDATE waybills
                SET revenue = revenue + $2, total_distance = total_distance + $3, order_count = order_count + 1
                WHERE id = $1 AND status = 'active'
                "#,
            )
            .bind(waybill_id)
            .bind(saved.price.unwrap_or_default())
            .bind(saved.distance.unwrap_or_default())
            .execute(&mut *tx)
            .await?;
            aggregated = result.rows_affected() == 1;
        }

        tx.commit().await?;
        Ok((saved, aggregated))
    }
}

fn stale_order(order: &Order, expected: OrderStatus) -> AppError {
    invalid_state_error(format!("order {} is no longer {}", order.id, expected))
}

fn bind_update(
    order: &Order,
    expected: OrderStatus,
) -> sqlx::query::QueryAs<'_, sqlx::Postgres, Order, sqlx::postgres::PgArguments> {
    sqlx::query_as::<_, Order>(UPDATE_ORDER)
        .bind(order.id)
        .bind(order.driver_id)
        .bind(order.car_id)
        .bind(order.waybill_id)
        .bind(order.status)
        .bind(order.price)
        .bind(order.distance)
        .bind(&order.notes)
        .bind(order.assigned_at)
        .bind(order.started_at)
        .bind(order.completed_at)
        .bind(order.cancelled_at)
        .bind(&order.cancel_reason)
        .bind(expected)
}
