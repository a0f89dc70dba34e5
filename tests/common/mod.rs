//! Utilidades compartidas por los tests de integración
//!
//! `MemoryStore` implementa todos los repositorios sobre vectores en memoria,
//! con las mismas reglas que las transacciones de PostgreSQL (un solo
//! waybill activo por conductor y coche, cierre que actualiza kilometraje y
//! estado médico, pedidos completados que suman al waybill activo).

#![allow(dead_code)]

use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use taxi_fleet::config::environment::EnvironmentConfig;
use taxi_fleet::models::{
    car::Car,
    driver::{Driver, MedicalStatus},
    medical_check::MedicalCheck,
    order::{NewOrder, Order, OrderStatus},
    technical_inspection::TechnicalInspection,
    user::{User, UserRole},
    waybill::{Waybill, WaybillStatus},
};
use taxi_fleet::repositories::{
    CarRepository, DriverRepository, InspectionRepository, MedicalCheckRepository, OrderFilter,
    OrderRepository, Repositories, UserRepository, WaybillFilter, WaybillRepository,
};
use taxi_fleet::services::Services;
use taxi_fleet::utils::errors::{invalid_state_error, not_found_error, AppError, AppResult};

#[derive(Default)]
struct Tables {
    users: Vec<User>,
    cars: Vec<Car>,
    drivers: Vec<Driver>,
    medical_checks: Vec<MedicalCheck>,
    inspections: Vec<TechnicalInspection>,
    waybills: Vec<Waybill>,
    orders: Vec<Order>,
}

#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

impl MemoryStore {
    fn tables(&self) -> MutexGuard<'_, Tables> {
        self.tables.lock().unwrap()
    }

    pub fn car_snapshot(&self, id: Uuid) -> Car {
        self.tables().cars.iter().find(|c| c.id == id).cloned().unwrap()
    }

    pub fn driver_snapshot(&self, id: Uuid) -> Driver {
        self.tables().drivers.iter().find(|d| d.id == id).cloned().unwrap()
    }

    pub fn medical_check_count(&self) -> usize {
        self.tables().medical_checks.len()
    }

    pub fn inspection_count(&self) -> usize {
        self.tables().inspections.len()
    }

    pub fn waybill_count(&self) -> usize {
        self.tables().waybills.len()
    }

    /// Mover la fecha de un examen hacia atrás
    pub fn backdate_medical_check(&self, id: Uuid, days: i64) {
        let mut tables = self.tables();
        if let Some(check) = tables.medical_checks.iter_mut().find(|c| c.id == id) {
            check.checked_at = check.checked_at - Duration::days(days);
        }
    }

    pub fn backdate_inspection(&self, id: Uuid, days: i64) {
        let mut tables = self.tables();
        if let Some(inspection) = tables.inspections.iter_mut().find(|i| i.id == id) {
            inspection.inspected_at = inspection.inspected_at - Duration::days(days);
        }
    }
}

fn latest<T, K: Ord>(items: impl Iterator<Item = T>, key: impl Fn(&T) -> K) -> Option<T> {
    items.max_by_key(|item| key(item))
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn create(&self, user: &User) -> AppResult<User> {
        let mut tables = self.tables();
        if tables.users.iter().any(|u| u.login == user.login) {
            return Err(AppError::Conflict("login already exists".to_string()));
        }
        tables.users.push(user.clone());
        Ok(user.clone())
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        Ok(self.tables().users.iter().find(|u| u.id == id).cloned())
    }

    async fn find_by_login(&self, login: &str) -> AppResult<Option<User>> {
        Ok(self.tables().users.iter().find(|u| u.login == login).cloned())
    }

    async fn login_exists(&self, login: &str) -> AppResult<bool> {
        Ok(self.tables().users.iter().any(|u| u.login == login))
    }

    async fn list(&self) -> AppResult<Vec<User>> {
        Ok(self.tables().users.clone())
    }

    async fn set_active(&self, id: Uuid, active: bool) -> AppResult<Option<User>> {
        let mut tables = self.tables();
        Ok(tables.users.iter_mut().find(|u| u.id == id).map(|user| {
            user.active = active;
            user.clone()
        }))
    }

    async fn count(&self) -> AppResult<i64> {
        Ok(self.tables().users.len() as i64)
    }
}

#[async_trait]
impl CarRepository for MemoryStore {
    async fn create(&self, car: &Car) -> AppResult<Car> {
        let mut tables = self.tables();
        if tables.cars.iter().any(|c| c.plate == car.plate) {
            return Err(AppError::Conflict("plate is already registered".to_string()));
        }
        tables.cars.push(car.clone());
        Ok(car.clone())
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Car>> {
        Ok(self.tables().cars.iter().find(|c| c.id == id).cloned())
    }

    async fn plate_exists(&self, plate: &str) -> AppResult<bool> {
        Ok(self.tables().cars.iter().any(|c| c.plate == plate))
    }

    async fn list(&self, operational_only: bool) -> AppResult<Vec<Car>> {
        let mut cars: Vec<Car> = self
            .tables()
            .cars
            .iter()
            .filter(|c| !operational_only || c.is_operational())
            .cloned()
            .collect();
        cars.sort_by(|a, b| a.plate.cmp(&b.plate));
        Ok(cars)
    }

    async fn update(&self, car: &Car) -> AppResult<Car> {
        let mut tables = self.tables();
        let slot = tables
            .cars
            .iter_mut()
            .find(|c| c.id == car.id)
            .ok_or_else(|| not_found_error("Car", car.id))?;
        *slot = car.clone();
        Ok(car.clone())
    }
}

#[async_trait]
impl DriverRepository for MemoryStore {
    async fn create(&self, driver: &Driver) -> AppResult<Driver> {
        let mut tables = self.tables();
        if tables
            .drivers
            .iter()
            .any(|d| d.license_number == driver.license_number)
        {
            return Err(AppError::Conflict("license already registered".to_string()));
        }
        tables.drivers.push(driver.clone());
        Ok(driver.clone())
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Driver>> {
        Ok(self.tables().drivers.iter().find(|d| d.id == id).cloned())
    }

    async fn find_by_car(&self, car_id: Uuid) -> AppResult<Option<Driver>> {
        Ok(self
            .tables()
            .drivers
            .iter()
            .find(|d| d.current_car_id == Some(car_id))
            .cloned())
    }

    async fn find_by_user(&self, user_id: Uuid) -> AppResult<Option<Driver>> {
        Ok(self
            .tables()
            .drivers
            .iter()
            .find(|d| d.user_id == Some(user_id))
            .cloned())
    }

    async fn license_exists(&self, license_number: &str) -> AppResult<bool> {
        Ok(self
            .tables()
            .drivers
            .iter()
            .any(|d| d.license_number == license_number))
    }

    async fn list(&self) -> AppResult<Vec<Driver>> {
        let mut drivers = self.tables().drivers.clone();
        drivers.sort_by(|a, b| a.full_name.cmp(&b.full_name));
        Ok(drivers)
    }

    async fn update(&self, driver: &Driver) -> AppResult<Driver> {
        let mut tables = self.tables();
        let slot = tables
            .drivers
            .iter_mut()
            .find(|d| d.id == driver.id)
            .ok_or_else(|| not_found_error("Driver", driver.id))?;
        slot.full_name = driver.full_name.clone();
        slot.phone = driver.phone.clone();
        slot.medical_status = driver.medical_status;
        slot.updated_at = Utc::now();
        Ok(slot.clone())
    }

    async fn set_car(&self, driver_id: Uuid, car_id: Option<Uuid>) -> AppResult<Driver> {
        let mut tables = self.tables();
        if let Some(car_id) = car_id {
            if tables
                .drivers
                .iter()
                .any(|d| d.id != driver_id && d.current_car_id == Some(car_id))
            {
                return Err(AppError::Conflict(
                    "car is already assigned to another driver".to_string(),
                ));
            }
        }
        let slot = tables
            .drivers
            .iter_mut()
            .find(|d| d.id == driver_id)
            .ok_or_else(|| not_found_error("Driver", driver_id))?;
        slot.current_car_id = car_id;
        slot.updated_at = Utc::now();
        Ok(slot.clone())
    }

    async fn delete_cascade(&self, driver_id: Uuid) -> AppResult<()> {
        let mut tables = self.tables();
        if !tables.drivers.iter().any(|d| d.id == driver_id) {
            return Err(not_found_error("Driver", driver_id));
        }
        let open_orders = tables
            .orders
            .iter()
            .filter(|o| {
                o.driver_id == Some(driver_id)
                    && matches!(o.status, OrderStatus::Assigned | OrderStatus::InProgress)
            })
            .count();
        if open_orders > 0 {
            return Err(invalid_state_error(format!(
                "driver {} still has {} open order(s)",
                driver_id, open_orders
            )));
        }
        tables.medical_checks.retain(|c| c.driver_id != driver_id);
        let removed: Vec<Uuid> = tables
            .waybills
            .iter()
            .filter(|w| w.driver_id == driver_id)
            .map(|w| w.id)
            .collect();
        tables.waybills.retain(|w| w.driver_id != driver_id);
        for order in tables.orders.iter_mut() {
            if order.driver_id == Some(driver_id) {
                order.driver_id = None;
            }
            if order.waybill_id.map_or(false, |id| removed.contains(&id)) {
                order.waybill_id = None;
            }
        }
        tables.drivers.retain(|d| d.id != driver_id);
        Ok(())
    }
}

#[async_trait]
impl MedicalCheckRepository for MemoryStore {
    async fn record(&self, check: &MedicalCheck, driver_status: MedicalStatus) -> AppResult<MedicalCheck> {
        let mut tables = self.tables();
        let driver = tables
            .drivers
            .iter_mut()
            .find(|d| d.id == check.driver_id)
            .ok_or_else(|| not_found_error("Driver", check.driver_id))?;
        driver.medical_status = driver_status;
        tables.medical_checks.push(check.clone());
        Ok(check.clone())
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<MedicalCheck>> {
        Ok(self.tables().medical_checks.iter().find(|c| c.id == id).cloned())
    }

    async fn latest_for_driver(&self, driver_id: Uuid) -> AppResult<Option<MedicalCheck>> {
        let tables = self.tables();
        Ok(latest(
            tables.medical_checks.iter().filter(|c| c.driver_id == driver_id),
            |c| c.checked_at,
        )
        .cloned())
    }

    async fn list_for_driver(&self, driver_id: Uuid) -> AppResult<Vec<MedicalCheck>> {
        let mut checks: Vec<MedicalCheck> = self
            .tables()
            .medical_checks
            .iter()
            .filter(|c| c.driver_id == driver_id)
            .cloned()
            .collect();
        checks.sort_by(|a, b| b.checked_at.cmp(&a.checked_at));
        Ok(checks)
    }

    async fn update_notes(
        &self,
        id: Uuid,
        notes: Option<String>,
        opens_shift: bool,
    ) -> AppResult<Option<MedicalCheck>> {
        let mut tables = self.tables();
        Ok(tables.medical_checks.iter_mut().find(|c| c.id == id).map(|check| {
            check.notes = notes;
            check.opens_shift = opens_shift;
            check.clone()
        }))
    }

    async fn delete_older_than(&self, cutoff: DateTime<Utc>) -> AppResult<u64> {
        let mut tables = self.tables();
        let expired: Vec<Uuid> = tables
            .medical_checks
            .iter()
            .filter(|c| c.checked_at < cutoff)
            .map(|c| c.id)
            .collect();
        tables.medical_checks.retain(|c| !expired.contains(&c.id));
        for waybill in tables.waybills.iter_mut() {
            if waybill.medical_check_id.map_or(false, |id| expired.contains(&id)) {
                waybill.medical_check_id = None;
            }
        }
        Ok(expired.len() as u64)
    }
}

#[async_trait]
impl InspectionRepository for MemoryStore {
    async fn record(&self, inspection: &TechnicalInspection, car: &Car) -> AppResult<TechnicalInspection> {
        let mut tables = self.tables();
        let slot = tables
            .cars
            .iter_mut()
            .find(|c| c.id == car.id)
            .ok_or_else(|| not_found_error("Car", car.id))?;
        *slot = car.clone();
        tables.inspections.push(inspection.clone());
        Ok(inspection.clone())
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<TechnicalInspection>> {
        Ok(self.tables().inspections.iter().find(|i| i.id == id).cloned())
    }

    async fn latest_for_car(&self, car_id: Uuid) -> AppResult<Option<TechnicalInspection>> {
        let tables = self.tables();
        Ok(latest(
            tables.inspections.iter().filter(|i| i.car_id == car_id),
            |i| i.inspected_at,
        )
        .cloned())
    }

    async fn list_for_car(&self, car_id: Uuid) -> AppResult<Vec<TechnicalInspection>> {
        let mut inspections: Vec<TechnicalInspection> = self
            .tables()
            .inspections
            .iter()
            .filter(|i| i.car_id == car_id)
            .cloned()
            .collect();
        inspections.sort_by(|a, b| b.inspected_at.cmp(&a.inspected_at));
        Ok(inspections)
    }

    async fn delete_older_than(&self, cutoff: DateTime<Utc>) -> AppResult<u64> {
        let mut tables = self.tables();
        let expired: Vec<Uuid> = tables
            .inspections
            .iter()
            .filter(|i| i.inspected_at < cutoff)
            .map(|i| i.id)
            .collect();
        tables.inspections.retain(|i| !expired.contains(&i.id));
        for waybill in tables.waybills.iter_mut() {
            if waybill.inspection_id.map_or(false, |id| expired.contains(&id)) {
                waybill.inspection_id = None;
            }
        }
        Ok(expired.len() as u64)
    }
}

#[async_trait]
impl WaybillRepository for MemoryStore {
    async fn create(&self, waybill: &Waybill) -> AppResult<Waybill> {
        let mut tables = self.tables();
        if tables.waybills.iter().any(|w| {
            w.status == WaybillStatus::Active
                && (w.driver_id == waybill.driver_id || w.car_id == waybill.car_id)
        }) {
            return Err(AppError::Conflict(
                "driver or car already has an active waybill".to_string(),
            ));
        }
        tables.waybills.push(waybill.clone());
        Ok(waybill.clone())
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Waybill>> {
        Ok(self.tables().waybills.iter().find(|w| w.id == id).cloned())
    }

    async fn active_for_driver(&self, driver_id: Uuid) -> AppResult<Option<Waybill>> {
        Ok(self
            .tables()
            .waybills
            .iter()
            .find(|w| w.driver_id == driver_id && w.status == WaybillStatus::Active)
            .cloned())
    }

    async fn active_for_car(&self, car_id: Uuid) -> AppResult<Option<Waybill>> {
        Ok(self
            .tables()
            .waybills
            .iter()
            .find(|w| w.car_id == car_id && w.status == WaybillStatus::Active)
            .cloned())
    }

    async fn list(&self, filter: &WaybillFilter) -> AppResult<Vec<Waybill>> {
        let mut waybills: Vec<Waybill> = self
            .tables()
            .waybills
            .iter()
            .filter(|w| filter.status.map_or(true, |s| w.status == s))
            .filter(|w| filter.driver_id.map_or(true, |id| w.driver_id == id))
            .filter(|w| filter.car_id.map_or(true, |id| w.car_id == id))
            .cloned()
            .collect();
        waybills.sort_by(|a, b| b.start_time.cmp(&a.start_time));
        Ok(waybills)
    }

    async fn close(&self, waybill: &Waybill) -> AppResult<Waybill> {
        let final_mileage = waybill
            .final_mileage
            .ok_or_else(|| invalid_state_error("closing a waybill requires a final mileage"))?;

        let mut tables = self.tables();
        let slot = tables
            .waybills
            .iter_mut()
            .find(|w| w.id == waybill.id && w.status == WaybillStatus::Active)
            .ok_or_else(|| invalid_state_error(format!("waybill {} is not active", waybill.id)))?;
        slot.status = waybill.status;
        slot.closed_by = waybill.closed_by;
        slot.end_time = waybill.end_time;
        slot.final_mileage = Some(final_mileage);
        slot.earnings = waybill.earnings;
        let saved = slot.clone();

        if let Some(car) = tables.cars.iter_mut().find(|c| c.id == waybill.car_id) {
            car.mileage = car.mileage.max(final_mileage);
        }
        if let Some(driver) = tables.drivers.iter_mut().find(|d| d.id == waybill.driver_id) {
            driver.medical_status = MedicalStatus::Pending;
        }
        Ok(saved)
    }

    async fn update(&self, waybill: &Waybill) -> AppResult<Waybill> {
        let mut tables = self.tables();
        let slot = tables
            .waybills
            .iter_mut()
            .find(|w| w.id == waybill.id && w.status == WaybillStatus::Active)
            .ok_or_else(|| invalid_state_error(format!("waybill {} is not active", waybill.id)))?;
        slot.status = waybill.status;
        slot.end_time = waybill.end_time;
        slot.notes = waybill.notes.clone();
        Ok(slot.clone())
    }
}

#[async_trait]
impl OrderRepository for MemoryStore {
    async fn create(&self, order: &Order) -> AppResult<Order> {
        self.tables().orders.push(order.clone());
        Ok(order.clone())
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Order>> {
        Ok(self.tables().orders.iter().find(|o| o.id == id).cloned())
    }

    async fn list(&self, filter: &OrderFilter) -> AppResult<Vec<Order>> {
        let mut orders: Vec<Order> = self
            .tables()
            .orders
            .iter()
            .filter(|o| filter.status.map_or(true, |s| o.status == s))
            .filter(|o| filter.driver_id.map_or(true, |id| o.driver_id == Some(id)))
            .filter(|o| filter.waybill_id.map_or(true, |id| o.waybill_id == Some(id)))
            .cloned()
            .collect();
        orders.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(orders)
    }

    async fn count_in_progress_for_driver(&self, driver_id: Uuid) -> AppResult<i64> {
        Ok(self
            .tables()
            .orders
            .iter()
            .filter(|o| o.driver_id == Some(driver_id) && o.status == OrderStatus::InProgress)
            .count() as i64)
    }

    async fn update(&self, order: &Order, expected: OrderStatus) -> AppResult<Order> {
        let mut tables = self.tables();
        let slot = tables
            .orders
            .iter_mut()
            .find(|o| o.id == order.id && o.status == expected)
            .ok_or_else(|| stale_order(order, expected))?;
        *slot = order.clone();
        Ok(order.clone())
    }

    async fn complete(&self, order: &Order, expected: OrderStatus) -> AppResult<(Order, bool)> {
        let mut tables = self.tables();
        let slot = tables
            .orders
            .iter_mut()
            .find(|o| o.id == order.id && o.status == expected)
            .ok_or_else(|| stale_order(order, expected))?;
        *slot = order.clone();

        let mut aggregated = false;
        if let Some(waybill_id) = order.waybill_id {
            if let Some(waybill) = tables
                .waybills
                .iter_mut()
                .find(|w| w.id == waybill_id && w.status == WaybillStatus::Active)
            {
                waybill.record_completed_order(
                    order.price.unwrap_or_default(),
                    order.distance.unwrap_or_default(),
                );
                aggregated = true;
            }
        }
        Ok((order.clone(), aggregated))
    }
}

fn stale_order(order: &Order, expected: OrderStatus) -> AppError {
    invalid_state_error(format!("order {} is no longer {}", order.id, expected))
}

pub fn test_config() -> EnvironmentConfig {
    EnvironmentConfig {
        jwt_secret: "test-secret".to_string(),
        bcrypt_cost: 4,
        ..EnvironmentConfig::default()
    }
}

pub fn dec(value: &str) -> Decimal {
    value.parse().unwrap()
}

/// Flota de pruebas con un operador, una médica y un mecánico ya creados
pub struct TestFleet {
    pub store: Arc<MemoryStore>,
    pub services: Services,
    pub operator: User,
    pub doctor: User,
    pub mechanic: User,
}

impl TestFleet {
    pub async fn new() -> Self {
        Self::with_config(test_config()).await
    }

    pub async fn with_config(config: EnvironmentConfig) -> Self {
        let store = Arc::new(MemoryStore::default());
        let services = Services::new(Repositories::shared(store.clone()), &config);

        let operator = services
            .users
            .create("operator".to_string(), "operator-pass", "Olga Operadora".to_string(), UserRole::Operator)
            .await
            .unwrap();
        let doctor = services
            .users
            .create("doctor".to_string(), "doctor-pass", "Dra. Marta Sanz".to_string(), UserRole::Doctor)
            .await
            .unwrap();
        let mechanic = services
            .users
            .create("mechanic".to_string(), "mechanic-pass", "Pedro Taller".to_string(), UserRole::Mechanic)
            .await
            .unwrap();

        Self {
            store,
            services,
            operator,
            doctor,
            mechanic,
        }
    }

    pub async fn car(&self, plate: &str, mileage: i32) -> Car {
        self.services
            .cars
            .create(plate, None, Some("Toyota".to_string()), Some("Corolla".to_string()), mileage)
            .await
            .unwrap()
    }

    pub async fn driver(&self, name: &str, license: &str) -> Driver {
        self.services
            .drivers
            .create(name.to_string(), license, None, None)
            .await
            .unwrap()
    }

    /// Conductor con coche asignado, sin exámenes
    pub async fn driver_with_car(&self, license: &str, plate: &str) -> (Driver, Car) {
        let driver = self.driver("Luis Gómez", license).await;
        let car = self.car(plate, 10_000).await;
        let driver = self.services.drivers.assign_car(driver.id, car.id).await.unwrap();
        (driver, car)
    }

    pub async fn pass_medical(&self, driver_id: Uuid) -> MedicalCheck {
        self.services
            .medical_checks
            .record(driver_id, self.doctor.id, true, None, true)
            .await
            .unwrap()
    }

    pub async fn pass_inspection(&self, car_id: Uuid) -> TechnicalInspection {
        let car = self.services.cars.get(car_id).await.unwrap();
        self.services
            .inspections
            .record(car.id, self.mechanic.id, true, car.mileage, None)
            .await
            .unwrap()
    }

    /// Conductor y coche con todos los controles aprobados
    pub async fn ready_driver(&self, license: &str, plate: &str) -> (Driver, Car) {
        let (driver, car) = self.driver_with_car(license, plate).await;
        self.pass_medical(driver.id).await;
        self.pass_inspection(car.id).await;
        (driver, car)
    }

    pub async fn open_shift(&self, license: &str, plate: &str) -> (Driver, Car, Waybill) {
        let (driver, car) = self.ready_driver(license, plate).await;
        let waybill = self
            .services
            .waybills
            .open(driver.id, self.doctor.id, None)
            .await
            .unwrap();
        (driver, car, waybill)
    }

    pub async fn new_order(&self) -> Order {
        self.services
            .orders
            .create(NewOrder {
                operator_id: self.operator.id,
                pickup_address: "Calle Mayor 10".to_string(),
                destination_address: "Aeropuerto T4".to_string(),
                customer_phone: Some("+34600111222".to_string()),
                estimated_price: None,
                notes: None,
            })
            .await
            .unwrap()
    }
}
