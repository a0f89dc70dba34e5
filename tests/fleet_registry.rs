mod common;

use common::{test_config, TestFleet};
use taxi_fleet::models::{car::TechnicalStatus, order::OrderStatus, user::UserRole};
use taxi_fleet::repositories::WaybillFilter;
use taxi_fleet::services::car_service::CarDetails;
use taxi_fleet::utils::errors::AppError;
use taxi_fleet::utils::jwt::{verify_token, JwtConfig};

#[tokio::test]
async fn test_login_issues_verifiable_token() {
    let fleet = TestFleet::new().await;

    let session = fleet
        .services
        .users
        .authenticate("doctor", "doctor-pass")
        .await
        .unwrap();
    assert_eq!(session.user.id, fleet.doctor.id);

    let claims = verify_token(&session.token, &JwtConfig::from(&test_config())).unwrap();
    assert_eq!(claims.sub, fleet.doctor.id.to_string());
    assert_eq!(claims.role, UserRole::Doctor);

    let err = fleet
        .services
        .users
        .authenticate("doctor", "wrong-pass")
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Unauthorized(_)));

    let err = fleet
        .services
        .users
        .authenticate("nobody", "doctor-pass")
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Unauthorized(_)));
}

#[tokio::test]
async fn test_deactivated_user_cannot_log_in() {
    let fleet = TestFleet::new().await;
    fleet
        .services
        .users
        .set_active(fleet.mechanic.id, false)
        .await
        .unwrap();

    let err = fleet
        .services
        .users
        .authenticate("mechanic", "mechanic-pass")
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Unauthorized(ref m) if m.contains("deactivated")));
}

#[tokio::test]
async fn test_duplicate_login_and_bootstrap() {
    let fleet = TestFleet::new().await;
    let err = fleet
        .services
        .users
        .create("doctor".to_string(), "whatever-pass", "Otra".to_string(), UserRole::Doctor)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));

    // Con usuarios existentes no se crea el operador inicial
    let created = fleet
        .services
        .users
        .ensure_bootstrap_operator("admin", "admin-pass")
        .await
        .unwrap();
    assert!(created.is_none());
}

#[tokio::test]
async fn test_plates_are_normalized_and_unique() {
    let fleet = TestFleet::new().await;
    let car = fleet.car(" 1234-bcd ", 0).await;
    assert_eq!(car.plate, "1234-BCD");
    assert_eq!(car.technical_status, TechnicalStatus::Unknown);
    assert!(!car.is_operational());

    let err = fleet
        .services
        .cars
        .create("1234-BCD", None, None, None, 0)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));

    let other = fleet.car("5678-FGH", 0).await;
    let err = fleet
        .services
        .cars
        .update(
            other.id,
            CarDetails {
                plate: Some("1234-bcd".to_string()),
                vin: None,
                brand: None,
                model: None,
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));
}

#[tokio::test]
async fn test_operational_listing() {
    let fleet = TestFleet::new().await;
    let ready = fleet.car("1111-AAA", 500).await;
    fleet.car("2222-BBB", 500).await;
    fleet.pass_inspection(ready.id).await;

    let all = fleet.services.cars.list(false).await.unwrap();
    assert_eq!(all.len(), 2);

    let operational = fleet.services.cars.list(true).await.unwrap();
    assert_eq!(operational.len(), 1);
    assert_eq!(operational[0].id, ready.id);
}

#[tokio::test]
async fn test_car_on_shift_cannot_leave_service() {
    let fleet = TestFleet::new().await;
    let (_, car, waybill) = fleet.open_shift("DL300001", "3333-CCC").await;

    let err = fleet
        .services
        .cars
        .set_in_repair(car.id, true)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::InvalidState(_)));
    let err = fleet.services.cars.set_active(car.id, false).await.unwrap_err();
    assert!(matches!(err, AppError::InvalidState(_)));

    fleet
        .services
        .waybills
        .close(waybill.id, fleet.mechanic.id, 10_000, None)
        .await
        .unwrap();
    let retired = fleet.services.cars.set_active(car.id, false).await.unwrap();
    assert!(!retired.active);
    assert_eq!(retired.technical_status, TechnicalStatus::OutOfService);
}

#[tokio::test]
async fn test_inspection_mileage_cannot_roll_back() {
    let fleet = TestFleet::new().await;
    let car = fleet.car("4444-DDD", 50_000).await;

    let err = fleet
        .services
        .inspections
        .record(car.id, fleet.mechanic.id, true, 49_000, None)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::InvalidState(_)));
    assert_eq!(fleet.store.inspection_count(), 0);

    fleet
        .services
        .inspections
        .record(car.id, fleet.mechanic.id, true, 50_300, None)
        .await
        .unwrap();
    let car = fleet.store.car_snapshot(car.id);
    assert_eq!(car.mileage, 50_300);
    assert!(car.is_operational());
}

#[tokio::test]
async fn test_car_belongs_to_one_driver() {
    let fleet = TestFleet::new().await;
    let (holder, car) = fleet.driver_with_car("DL300002", "5555-FFF").await;
    let other = fleet.driver("Otro Conductor", "DL300003").await;

    let err = fleet
        .services
        .drivers
        .assign_car(other.id, car.id)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));

    // Reasignar el mismo coche es idempotente
    let same = fleet.services.drivers.assign_car(holder.id, car.id).await.unwrap();
    assert_eq!(same.current_car_id, Some(car.id));

    let freed = fleet.services.drivers.unassign_car(holder.id).await.unwrap();
    assert!(freed.current_car_id.is_none());
    let other = fleet.services.drivers.assign_car(other.id, car.id).await.unwrap();
    assert_eq!(other.current_car_id, Some(car.id));
}

#[tokio::test]
async fn test_driver_on_shift_keeps_car() {
    let fleet = TestFleet::new().await;
    let (driver, _, _) = fleet.open_shift("DL300004", "6666-GGG").await;
    let spare = fleet.car("7777-HHH", 0).await;

    let err = fleet.services.drivers.unassign_car(driver.id).await.unwrap_err();
    assert!(matches!(err, AppError::InvalidState(_)));
    let err = fleet
        .services
        .drivers
        .assign_car(driver.id, spare.id)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::InvalidState(_)));
    let err = fleet.services.drivers.delete(driver.id).await.unwrap_err();
    assert!(matches!(err, AppError::InvalidState(_)));
}

#[tokio::test]
async fn test_driver_linking_rules() {
    let fleet = TestFleet::new().await;
    let account = fleet
        .services
        .users
        .create("luis.driver".to_string(), "driver-pass", "Luis".to_string(), UserRole::Driver)
        .await
        .unwrap();

    let err = fleet
        .services
        .drivers
        .create("Doctora".to_string(), "DL300005", None, Some(fleet.doctor.id))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::BadRequest(_)));

    let linked = fleet
        .services
        .drivers
        .create("Luis".to_string(), "dl300006", None, Some(account.id))
        .await
        .unwrap();
    assert_eq!(linked.license_number, "DL300006");
    assert_eq!(
        fleet.services.drivers.get_by_user(account.id).await.unwrap().id,
        linked.id
    );

    let err = fleet
        .services
        .drivers
        .create("Luis bis".to_string(), "DL300007", None, Some(account.id))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));

    let err = fleet
        .services
        .drivers
        .create("Duplicado".to_string(), "DL300006", None, None)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));
}

#[tokio::test]
async fn test_delete_driver_cascades_history() {
    let fleet = TestFleet::new().await;
    let (driver, car, waybill) = fleet.open_shift("DL300008", "8888-JJJ").await;

    let order = fleet.new_order().await;
    fleet.services.orders.assign(order.id, driver.id).await.unwrap();
    fleet.services.orders.start(order.id).await.unwrap();
    fleet
        .services
        .orders
        .complete(order.id, common::dec("15"), common::dec("6"))
        .await
        .unwrap();
    fleet
        .services
        .waybills
        .close(waybill.id, fleet.mechanic.id, 10_030, None)
        .await
        .unwrap();

    fleet.services.drivers.delete(driver.id).await.unwrap();

    assert!(matches!(
        fleet.services.drivers.get(driver.id).await.unwrap_err(),
        AppError::NotFound(_)
    ));
    assert_eq!(fleet.store.medical_check_count(), 0);
    assert!(fleet
        .services
        .waybills
        .list(&WaybillFilter {
            driver_id: Some(driver.id),
            ..Default::default()
        })
        .await
        .unwrap()
        .is_empty());

    // El pedido conserva su historial sin conductor
    let order = fleet.services.orders.get(order.id).await.unwrap();
    assert_eq!(order.status, OrderStatus::Completed);
    assert!(order.driver_id.is_none());
    // Y el coche queda libre
    assert!(fleet.services.cars.get(car.id).await.is_ok());
}

#[tokio::test]
async fn test_medical_check_notes_are_editable() {
    let fleet = TestFleet::new().await;
    let driver = fleet.driver("Ana", "DL300009").await;
    let check = fleet.pass_medical(driver.id).await;

    let updated = fleet
        .services
        .medical_checks
        .update_notes(check.id, Some("revisar en un mes".to_string()), false)
        .await
        .unwrap();
    assert_eq!(updated.notes.as_deref(), Some("revisar en un mes"));
    assert!(!updated.opens_shift);
    assert!(updated.passed);

    let err = fleet
        .services
        .medical_checks
        .update_notes(uuid::Uuid::new_v4(), None, false)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn test_cleanup_removes_only_old_records() {
    let fleet = TestFleet::new().await;
    let (driver, car, waybill) = fleet.open_shift("DL300010", "9999-KKK").await;
    let fresh_check = fleet.pass_medical(driver.id).await;

    let old_check = waybill.medical_check_id.unwrap();
    fleet.store.backdate_medical_check(old_check, 40);
    let old_inspection = waybill.inspection_id.unwrap();
    fleet.store.backdate_inspection(old_inspection, 400);

    let deleted = fleet
        .services
        .medical_checks
        .cleanup_older_than(30)
        .await
        .unwrap();
    assert_eq!(deleted, 1);
    let history = fleet.services.medical_checks.history(driver.id).await.unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].id, fresh_check.id);

    let deleted = fleet
        .services
        .inspections
        .cleanup_older_than(365)
        .await
        .unwrap();
    assert_eq!(deleted, 1);
    assert!(fleet
        .services
        .inspections
        .latest_for_car(car.id)
        .await
        .unwrap()
        .is_none());

    // El waybill sobrevive sin referencias
    let waybill = fleet.services.waybills.get(waybill.id).await.unwrap();
    assert!(waybill.medical_check_id.is_none());
    assert!(waybill.inspection_id.is_none());

    let err = fleet
        .services
        .medical_checks
        .cleanup_older_than(0)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::BadRequest(_)));
}

#[tokio::test]
async fn test_delete_driver_with_open_order_is_refused() {
    let fleet = TestFleet::new().await;
    let (driver, _) = fleet.driver_with_car("DL300020", "9900-ZZZ").await;
    let order = fleet.new_order().await;
    fleet.services.orders.assign(order.id, driver.id).await.unwrap();
    fleet.services.orders.start(order.id).await.unwrap();

    let err = fleet.services.drivers.delete(driver.id).await.unwrap_err();
    assert!(matches!(err, AppError::InvalidState(_)));

    let kept = fleet.services.orders.get(order.id).await.unwrap();
    assert_eq!(kept.status, OrderStatus::InProgress);
    assert_eq!(kept.driver_id, Some(driver.id));

    fleet
        .services
        .orders
        .complete(order.id, common::dec("12"), common::dec("5"))
        .await
        .unwrap();
    fleet.services.drivers.delete(driver.id).await.unwrap();

    let history = fleet.services.orders.get(order.id).await.unwrap();
    assert_eq!(history.status, OrderStatus::Completed);
    assert!(history.driver_id.is_none());
}

#[tokio::test]
async fn test_inspection_is_refused_while_car_in_repair() {
    let fleet = TestFleet::new().await;
    let car = fleet.car("1122-BBB", 20_000).await;
    fleet.services.cars.set_in_repair(car.id, true).await.unwrap();

    let err = fleet
        .services
        .inspections
        .record(car.id, fleet.mechanic.id, true, 20_000, None)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::InvalidState(_)));
    assert_eq!(fleet.store.inspection_count(), 0);

    let car = fleet.services.cars.set_in_repair(car.id, false).await.unwrap();
    assert_eq!(car.technical_status, TechnicalStatus::NeedsInspection);
    fleet.pass_inspection(car.id).await;

    let car = fleet.services.cars.get(car.id).await.unwrap();
    assert_eq!(car.technical_status, TechnicalStatus::Ok);
    assert!(car.is_operational());
}
