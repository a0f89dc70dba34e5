//! Repositorios
//!
//! Cada entidad expone un trait asíncrono con su implementación PostgreSQL.
//! Los servicios solo conocen los traits, así las reglas de negocio se
//! pueden probar sin base de datos.

pub mod car_repository;
pub mod driver_repository;
pub mod inspection_repository;
pub mod medical_check_repository;
pub mod order_repository;
pub mod user_repository;
pub mod waybill_repository;

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::{
    car::Car,
    driver::{Driver, MedicalStatus},
    medical_check::MedicalCheck,
    order::{Order, OrderStatus},
    technical_inspection::TechnicalInspection,
    user::User,
    waybill::{Waybill, WaybillStatus},
};
use crate::utils::errors::AppResult;

pub use car_repository::PgCarRepository;
pub use driver_repository::PgDriverRepository;
pub use inspection_repository::PgInspectionRepository;
pub use medical_check_repository::PgMedicalCheckRepository;
pub use order_repository::PgOrderRepository;
pub use user_repository::PgUserRepository;
pub use waybill_repository::PgWaybillRepository;

/// Filtros para listados de waybills
#[derive(Debug, Clone, Default)]
pub struct WaybillFilter {
    pub status: Option<WaybillStatus>,
    pub driver_id: Option<Uuid>,
    pub car_id: Option<Uuid>,
}

/// Filtros para listados de pedidos
#[derive(Debug, Clone, Default)]
pub struct OrderFilter {
    pub status: Option<OrderStatus>,
    pub driver_id: Option<Uuid>,
    pub waybill_id: Option<Uuid>,
}

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn create(&self, user: &User) -> AppResult<User>;
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>>;
    async fn find_by_login(&self, login: &str) -> AppResult<Option<User>>;
    async fn login_exists(&self, login: &str) -> AppResult<bool>;
    async fn list(&self) -> AppResult<Vec<User>>;
    async fn set_active(&self, id: Uuid, active: bool) -> AppResult<Option<User>>;
    async fn count(&self) -> AppResult<i64>;
}

#[async_trait]
pub trait CarRepository: Send + Sync {
    async fn create(&self, car: &Car) -> AppResult<Car>;
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Car>>;
    async fn plate_exists(&self, plate: &str) -> AppResult<bool>;
    async fn list(&self, operational_only: bool) -> AppResult<Vec<Car>>;
    async fn update(&self, car: &Car) -> AppResult<Car>;
}

#[async_trait]
pub trait DriverRepository: Send + Sync {
    async fn create(&self, driver: &Driver) -> AppResult<Driver>;
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Driver>>;
    async fn find_by_car(&self, car_id: Uuid) -> AppResult<Option<Driver>>;
    async fn find_by_user(&self, user_id: Uuid) -> AppResult<Option<Driver>>;
    async fn license_exists(&self, license_number: &str) -> AppResult<bool>;
    async fn list(&self) -> AppResult<Vec<Driver>>;
    /// Actualiza datos de contacto; la asignación de coche va por `set_car`
    async fn update(&self, driver: &Driver) -> AppResult<Driver>;
    async fn set_car(&self, driver_id: Uuid, car_id: Option<Uuid>) -> AppResult<Driver>;
    /// Borrado administrativo en cascada (exámenes y waybills cerrados).
    /// Falla con `InvalidState` si el conductor tiene pedidos asignados o en curso.
    async fn delete_cascade(&self, driver_id: Uuid) -> AppResult<()>;
}

#[async_trait]
pub trait MedicalCheckRepository: Send + Sync {
    /// Inserta el examen y actualiza el estado médico del conductor
    async fn record(&self, check: &MedicalCheck, driver_status: MedicalStatus) -> AppResult<MedicalCheck>;
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<MedicalCheck>>;
    async fn latest_for_driver(&self, driver_id: Uuid) -> AppResult<Option<MedicalCheck>>;
    async fn list_for_driver(&self, driver_id: Uuid) -> AppResult<Vec<MedicalCheck>>;
    async fn update_notes(
        &self,
        id: Uuid,
        notes: Option<String>,
        opens_shift: bool,
    ) -> AppResult<Option<MedicalCheck>>;
    async fn delete_older_than(&self, cutoff: DateTime<Utc>) -> AppResult<u64>;
}

#[async_trait]
pub trait InspectionRepository: Send + Sync {
    /// Inserta la inspección y guarda el coche ya actualizado
    async fn record(&self, inspection: &TechnicalInspection, car: &Car) -> AppResult<TechnicalInspection>;
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<TechnicalInspection>>;
    async fn latest_for_car(&self, car_id: Uuid) -> AppResult<Option<TechnicalInspection>>;
    async fn list_for_car(&self, car_id: Uuid) -> AppResult<Vec<TechnicalInspection>>;
    async fn delete_older_than(&self, cutoff: DateTime<Utc>) -> AppResult<u64>;
}

#[async_trait]
pub trait WaybillRepository: Send + Sync {
    /// Falla con `Conflict` si ya hay un waybill activo para el conductor o el coche
    async fn create(&self, waybill: &Waybill) -> AppResult<Waybill>;
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Waybill>>;
    async fn active_for_driver(&self, driver_id: Uuid) -> AppResult<Option<Waybill>>;
    async fn active_for_car(&self, car_id: Uuid) -> AppResult<Option<Waybill>>;
    async fn list(&self, filter: &WaybillFilter) -> AppResult<Vec<Waybill>>;
    /// Guarda el cierre, el kilometraje del coche y deja al conductor pendiente de examen
    async fn close(&self, waybill: &Waybill) -> AppResult<Waybill>;
    /// Solo escribe sobre un waybill que sigue activo
    async fn update(&self, waybill: &Waybill) -> AppResult<Waybill>;
}

#[async_trait]
pub trait OrderRepository: Send + Sync {
    async fn create(&self, order: &Order) -> AppResult<Order>;
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Order>>;
    async fn list(&self, filter: &OrderFilter) -> AppResult<Vec<Order>>;
    async fn count_in_progress_for_driver(&self, driver_id: Uuid) -> AppResult<i64>;
    /// Guarda el pedido si en la base sigue en `expected`; si otro proceso
    /// lo movió antes, falla con `InvalidState`.
    async fn update(&self, order: &Order, expected: OrderStatus) -> AppResult<Order>;
    /// Guarda el pedido completado y, si su waybill sigue activo, suma
    /// precio y distancia a los totales. Devuelve si se agregó.
    async fn complete(&self, order: &Order, expected: OrderStatus) -> AppResult<(Order, bool)>;
}

/// Conjunto de repositorios que comparten los servicios
#[derive(Clone)]
pub struct Repositories {
    pub users: Arc<dyn UserRepository>,
    pub cars: Arc<dyn CarRepository>,
    pub drivers: Arc<dyn DriverRepository>,
    pub medical_checks: Arc<dyn MedicalCheckRepository>,
    pub inspections: Arc<dyn InspectionRepository>,
    pub waybills: Arc<dyn WaybillRepository>,
    pub orders: Arc<dyn OrderRepository>,
}

impl Repositories {
    pub fn postgres(pool: PgPool) -> Self {
        Self {
            users: Arc::new(PgUserRepository::new(pool.clone())),
            cars: Arc::new(PgCarRepository::new(pool.clone())),
            drivers: Arc::new(PgDriverRepository::new(pool.clone())),
            medical_checks: Arc::new(PgMedicalCheckRepository::new(pool.clone())),
            inspections: Arc::new(PgInspectionRepository::new(pool.clone())),
            waybills: Arc::new(PgWaybillRepository::new(pool.clone())),
            orders: Arc::new(PgOrderRepository::new(pool)),
        }
    }

    /// Usar un único almacén que implementa todos los traits
    pub fn shared<S>(store: Arc<S>) -> Self
    where
        S: UserRepository
            + CarRepository
            + DriverRepository
            + MedicalCheckRepository
            + InspectionRepository
            + WaybillRepository
            + OrderRepository
            + 'static,
    {
        Self {
            users: store.clone(),
            cars: store.clone(),
            drivers: store.clone(),
            medical_checks: store.clone(),
            inspections: store.clone(),
            waybills: store.clone(),
            orders: store,
        }
    }
}
