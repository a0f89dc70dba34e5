//! Services module
//!
//! Este módulo contiene la lógica de negocio de la flota. Los servicios
//! encapsulan las reglas del ciclo de turno y coordinan varios repositorios.

pub mod car_service;
pub mod driver_service;
pub mod medical_check_service;
pub mod order_service;
pub mod shift_service;
pub mod technical_inspection_service;
pub mod user_service;
pub mod waybill_service;

pub use car_service::CarService;
pub use driver_service::DriverService;
pub use medical_check_service::MedicalCheckService;
pub use order_service::OrderService;
pub use shift_service::ShiftService;
pub use technical_inspection_service::TechnicalInspectionService;
pub use user_service::UserService;
pub use waybill_service::WaybillService;

use crate::config::environment::EnvironmentConfig;
use crate::repositories::Repositories;
use crate::utils::jwt::JwtConfig;

/// Todos los servicios, listos para compartir en el estado de Axum
#[derive(Clone)]
pub struct Services {
    pub users: UserService,
    pub cars: CarService,
    pub drivers: DriverService,
    pub medical_checks: MedicalCheckService,
    pub inspections: TechnicalInspectionService,
    pub waybills: WaybillService,
    pub shifts: ShiftService,
    pub orders: OrderService,
}

impl Services {
    pub fn new(repos: Repositories, config: &EnvironmentConfig) -> Self {
        let users = UserService::new(repos.users.clone(), JwtConfig::from(config), config.bcrypt_cost);
        let cars = CarService::new(repos.cars.clone(), repos.waybills.clone());
        let drivers = DriverService::new(
            repos.drivers.clone(),
            repos.cars.clone(),
            repos.users.clone(),
            repos.waybills.clone(),
        );
        let medical_checks = MedicalCheckService::new(repos.medical_checks.clone(), repos.drivers.clone());
        let inspections = TechnicalInspectionService::new(repos.inspections.clone(), repos.cars.clone());
        let waybills = WaybillService::new(
            repos.waybills.clone(),
            repos.drivers.clone(),
            repos.cars.clone(),
            repos.orders.clone(),
            medical_checks.clone(),
            inspections.clone(),
            config.commission_rate,
        );
        let shifts = ShiftService::new(
            drivers.clone(),
            repos.cars.clone(),
            medical_checks.clone(),
            inspections.clone(),
            waybills.clone(),
        );
        let orders = OrderService::new(
            repos.orders.clone(),
            repos.drivers.clone(),
            repos.waybills.clone(),
            config.strict_order_assignment,
        );

        Self {
            users,
            cars,
            drivers,
            medical_checks,
            inspections,
            waybills,
            shifts,
            orders,
        }
    }
}
