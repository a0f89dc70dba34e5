mod common;

use common::{dec, test_config, TestFleet};
use taxi_fleet::models::order::OrderStatus;
use taxi_fleet::repositories::{OrderFilter, OrderRepository};
use taxi_fleet::utils::errors::AppError;

#[tokio::test]
async fn test_order_lifecycle_inside_shift() {
    let fleet = TestFleet::new().await;
    let (driver, car, waybill) = fleet.open_shift("DL200001", "4455-RST").await;

    let order = fleet.new_order().await;
    assert_eq!(order.status, OrderStatus::New);
    assert!(order.driver_id.is_none());

    let assigned = fleet.services.orders.assign(order.id, driver.id).await.unwrap();
    assert_eq!(assigned.status, OrderStatus::Assigned);
    assert_eq!(assigned.driver_id, Some(driver.id));
    assert_eq!(assigned.car_id, Some(car.id));
    assert_eq!(assigned.waybill_id, Some(waybill.id));
    assert!(assigned.assigned_at.is_some());

    let started = fleet.services.orders.start(order.id).await.unwrap();
    assert_eq!(started.status, OrderStatus::InProgress);
    assert!(started.started_at.is_some());

    let completed = fleet
        .services
        .orders
        .complete(order.id, dec("18.40"), dec("7.5"))
        .await
        .unwrap();
    assert_eq!(completed.status, OrderStatus::Completed);
    assert_eq!(completed.price, Some(dec("18.40")));
    assert_eq!(completed.distance, Some(dec("7.5")));

    let in_shift = fleet.services.waybills.orders(waybill.id).await.unwrap();
    assert_eq!(in_shift.len(), 1);
    assert_eq!(in_shift[0].id, order.id);
}

#[tokio::test]
async fn test_assign_without_shift_warns_but_succeeds() {
    let fleet = TestFleet::new().await;
    let (driver, car) = fleet.driver_with_car("DL200002", "5566-STV").await;
    let order = fleet.new_order().await;

    let assigned = fleet.services.orders.assign(order.id, driver.id).await.unwrap();
    assert_eq!(assigned.status, OrderStatus::Assigned);
    assert_eq!(assigned.car_id, Some(car.id));
    assert!(assigned.waybill_id.is_none());

    // Sin waybill el pedido se completa pero no suma a ningún turno
    fleet.services.orders.start(order.id).await.unwrap();
    let completed = fleet
        .services
        .orders
        .complete(order.id, dec("10"), dec("4"))
        .await
        .unwrap();
    assert_eq!(completed.status, OrderStatus::Completed);
    assert_eq!(fleet.store.waybill_count(), 0);
}

#[tokio::test]
async fn test_strict_assignment_requires_active_waybill() {
    let fleet = TestFleet::with_config(taxi_fleet::config::environment::EnvironmentConfig {
        strict_order_assignment: true,
        ..test_config()
    })
    .await;
    let (driver, _) = fleet.driver_with_car("DL200003", "6677-TVW").await;
    let order = fleet.new_order().await;

    let err = fleet
        .services
        .orders
        .assign(order.id, driver.id)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::InvalidState(ref m) if m.contains("no active waybill")));

    let unchanged = fleet.services.orders.get(order.id).await.unwrap();
    assert_eq!(unchanged.status, OrderStatus::New);
}

#[tokio::test]
async fn test_assign_requires_driver_with_car() {
    let fleet = TestFleet::new().await;
    let driver = fleet.driver("Pie Aterra", "DL200004").await;
    let order = fleet.new_order().await;

    let err = fleet
        .services
        .orders
        .assign(order.id, driver.id)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::InvalidState(ref m) if m == "driver has no car assigned"));

    let err = fleet
        .services
        .orders
        .assign(order.id, uuid::Uuid::new_v4())
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn test_order_transitions_only_move_forward() {
    let fleet = TestFleet::new().await;
    let (driver, _, _) = fleet.open_shift("DL200005", "7788-VWX").await;
    let order = fleet.new_order().await;

    // Iniciar sin asignar
    let err = fleet.services.orders.start(order.id).await.unwrap_err();
    assert!(matches!(err, AppError::InvalidState(_)));

    // Completar sin conductor
    let err = fleet
        .services
        .orders
        .complete(order.id, dec("5"), dec("1"))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::InvalidState(ref m) if m.contains("no driver assigned")));

    fleet.services.orders.assign(order.id, driver.id).await.unwrap();
    let err = fleet
        .services
        .orders
        .assign(order.id, driver.id)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::InvalidState(ref m) if m.contains("already assigned")));

    fleet.services.orders.start(order.id).await.unwrap();
    fleet
        .services
        .orders
        .complete(order.id, dec("5"), dec("1"))
        .await
        .unwrap();

    let err = fleet
        .services
        .orders
        .cancel(order.id, Some("cliente no aparece".to_string()))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::InvalidState(_)));
}

#[tokio::test]
async fn test_cancel_records_reason() {
    let fleet = TestFleet::new().await;
    let (driver, _, _) = fleet.open_shift("DL200006", "8899-WXY").await;

    let fresh = fleet.new_order().await;
    let cancelled = fleet
        .services
        .orders
        .cancel(fresh.id, Some("duplicado".to_string()))
        .await
        .unwrap();
    assert_eq!(cancelled.status, OrderStatus::Cancelled);
    assert_eq!(cancelled.cancel_reason.as_deref(), Some("duplicado"));
    assert!(cancelled.cancelled_at.is_some());

    let assigned = fleet.new_order().await;
    fleet.services.orders.assign(assigned.id, driver.id).await.unwrap();
    fleet.services.orders.start(assigned.id).await.unwrap();
    let cancelled = fleet.services.orders.cancel(assigned.id, None).await.unwrap();
    assert_eq!(cancelled.status, OrderStatus::Cancelled);
    assert!(cancelled.cancel_reason.is_none());

    // Un pedido cancelado no bloquea el cierre del turno
    assert_eq!(
        fleet
            .services
            .orders
            .list(&OrderFilter {
                status: Some(OrderStatus::InProgress),
                ..Default::default()
            })
            .await
            .unwrap()
            .len(),
        0
    );
}

#[tokio::test]
async fn test_completion_after_shift_closed_is_not_aggregated() {
    let fleet = TestFleet::new().await;
    let (driver, _, waybill) = fleet.open_shift("DL200007", "9900-XYZ").await;

    let order = fleet.new_order().await;
    fleet.services.orders.assign(order.id, driver.id).await.unwrap();

    // Un pedido solo asignado no impide cerrar
    let closed = fleet
        .services
        .waybills
        .close(waybill.id, fleet.mechanic.id, 10_000, None)
        .await
        .unwrap();
    assert_eq!(closed.order_count, 0);

    fleet.services.orders.start(order.id).await.unwrap();
    let completed = fleet
        .services
        .orders
        .complete(order.id, dec("22.00"), dec("9.0"))
        .await
        .unwrap();
    assert_eq!(completed.waybill_id, Some(waybill.id));

    let after = fleet.services.waybills.get(waybill.id).await.unwrap();
    assert_eq!(after.order_count, 0);
    assert_eq!(after.revenue, dec("0"));
    assert_eq!(after.earnings, dec("0"));
}

#[tokio::test]
async fn test_list_filters_by_driver_and_status() {
    let fleet = TestFleet::new().await;
    let (first, _, _) = fleet.open_shift("DL200008", "1100-ABZ").await;
    let (second, _, _) = fleet.open_shift("DL200009", "2200-BCZ").await;

    let a = fleet.new_order().await;
    let b = fleet.new_order().await;
    let c = fleet.new_order().await;
    fleet.services.orders.assign(a.id, first.id).await.unwrap();
    fleet.services.orders.assign(b.id, first.id).await.unwrap();
    fleet.services.orders.assign(c.id, second.id).await.unwrap();
    fleet.services.orders.start(b.id).await.unwrap();

    let for_first = fleet
        .services
        .orders
        .list(&OrderFilter {
            driver_id: Some(first.id),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(for_first.len(), 2);

    let in_progress = fleet
        .services
        .orders
        .list(&OrderFilter {
            status: Some(OrderStatus::InProgress),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(in_progress.len(), 1);
    assert_eq!(in_progress[0].id, b.id);
}

#[tokio::test]
async fn test_completed_order_is_added_to_waybill_once() {
    let fleet = TestFleet::new().await;
    let (driver, _, waybill) = fleet.open_shift("DL200020", "7788-WXY").await;
    let order = fleet.new_order().await;
    fleet.services.orders.assign(order.id, driver.id).await.unwrap();
    let in_progress = fleet.services.orders.start(order.id).await.unwrap();

    fleet
        .services
        .orders
        .complete(order.id, dec("22.50"), dec("9"))
        .await
        .unwrap();
    let err = fleet
        .services
        .orders
        .complete(order.id, dec("22.50"), dec("9"))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::InvalidState(_)));

    // Una segunda escritura basada en la copia en curso no debe volver a sumar
    let mut stale = in_progress.clone();
    stale
        .complete(dec("22.50"), dec("9"), chrono::Utc::now())
        .unwrap();
    let err = OrderRepository::complete(&*fleet.store, &stale, OrderStatus::InProgress)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::InvalidState(_)));

    let waybill = fleet.services.waybills.get(waybill.id).await.unwrap();
    assert_eq!(waybill.order_count, 1);
    assert_eq!(waybill.revenue, dec("22.50"));
    assert_eq!(waybill.total_distance, dec("9"));
}

#[tokio::test]
async fn test_stale_cancel_does_not_reopen_completed_order() {
    let fleet = TestFleet::new().await;
    let (driver, _, _) = fleet.open_shift("DL200021", "8899-XYZ").await;
    let order = fleet.new_order().await;
    let assigned = fleet.services.orders.assign(order.id, driver.id).await.unwrap();
    fleet.services.orders.start(order.id).await.unwrap();
    fleet
        .services
        .orders
        .complete(order.id, dec("8"), dec("3"))
        .await
        .unwrap();

    let mut stale = assigned.clone();
    stale
        .cancel(Some("customer left".to_string()), chrono::Utc::now())
        .unwrap();
    let err = OrderRepository::update(&*fleet.store, &stale, OrderStatus::Assigned)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::InvalidState(_)));

    let order = fleet.services.orders.get(order.id).await.unwrap();
    assert_eq!(order.status, OrderStatus::Completed);
}
