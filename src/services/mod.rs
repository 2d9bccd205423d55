//! Business logic services

pub mod assets;
pub mod audit;
pub mod health;
pub mod maintenance;
pub mod reports;
pub mod requests;
pub mod users;

use crate::{config::AuthConfig, repository::Repository};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub users: users::UsersService,
    pub assets: assets::AssetsService,
    pub requests: requests::RequestsService,
    pub maintenance: maintenance::MaintenanceService,
    pub audit: audit::AuditService,
    pub reports: reports::ReportsService,
    pub health: health::HealthService,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(repository: Repository, auth_config: AuthConfig) -> Self {
        Self {
            users: users::UsersService::new(repository.clone(), auth_config),
            assets: assets::AssetsService::new(repository.clone()),
            requests: requests::RequestsService::new(repository.clone()),
            maintenance: maintenance::MaintenanceService::new(repository.clone()),
            audit: audit::AuditService::new(repository.clone()),
            reports: reports::ReportsService::new(repository.clone()),
            health: health::HealthService::new(repository),
        }
    }
}
