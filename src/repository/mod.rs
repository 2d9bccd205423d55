//! Repository layer for database operations

pub mod assets;
pub mod audit;
pub mod health;
pub mod maintenance;
pub mod reports;
pub mod requests;
pub mod users;

use std::sync::Arc;

use sqlx::{Pool, Postgres};

/// Main repository struct holding one store per resource
#[derive(Clone)]
pub struct Repository {
    pub assets: Arc<dyn assets::AssetsRepository>,
    pub requests: Arc<dyn requests::RequestsRepository>,
    pub maintenance: Arc<dyn maintenance::MaintenanceRepository>,
    pub audit: Arc<dyn audit::AuditRepository>,
    pub users: Arc<dyn users::UsersRepository>,
    pub reports: Arc<dyn reports::ReportsRepository>,
    pub health: Arc<dyn health::HealthRepository>,
}

impl Repository {
    /// Create a new repository backed by the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self {
            assets: Arc::new(assets::PgAssetsRepository::new(pool.clone())),
            requests: Arc::new(requests::PgRequestsRepository::new(pool.clone())),
            maintenance: Arc::new(maintenance::PgMaintenanceRepository::new(pool.clone())),
            audit: Arc::new(audit::PgAuditRepository::new(pool.clone())),
            users: Arc::new(users::PgUsersRepository::new(pool.clone())),
            reports: Arc::new(reports::PgReportsRepository::new(pool.clone())),
            health: Arc::new(health::PgHealthRepository::new(pool)),
        }
    }
}

/// Name of the violated constraint when `error` is a unique violation
pub(crate) fn unique_violation(error: &sqlx::Error) -> Option<String> {
    match error {
        sqlx::Error::Database(db) if db.is_unique_violation() => {
            Some(db.constraint().unwrap_or_default().to_string())
        }
        _ => None,
    }
}

/// Mock stores for service and router tests
#[cfg(test)]
pub(crate) struct Mocks {
    pub assets: assets::MockAssetsRepository,
    pub requests: requests::MockRequestsRepository,
    pub maintenance: maintenance::MockMaintenanceRepository,
    pub audit: audit::MockAuditRepository,
    pub users: users::MockUsersRepository,
    pub reports: reports::MockReportsRepository,
    pub health: health::MockHealthRepository,
}

#[cfg(test)]
impl Mocks {
    pub fn new() -> Self {
        Self {
            assets: assets::MockAssetsRepository::new(),
            requests: requests::MockRequestsRepository::new(),
            maintenance: maintenance::MockMaintenanceRepository::new(),
            audit: audit::MockAuditRepository::new(),
            users: users::MockUsersRepository::new(),
            reports: reports::MockReportsRepository::new(),
            health: health::MockHealthRepository::new(),
        }
    }

    pub fn into_repository(self) -> Repository {
        Repository {
            assets: Arc::new(self.assets),
            requests: Arc::new(self.requests),
            maintenance: Arc::new(self.maintenance),
            audit: Arc::new(self.audit),
            users: Arc::new(self.users),
            reports: Arc::new(self.reports),
            health: Arc::new(self.health),
        }
    }
}
