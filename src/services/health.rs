//! Liveness and readiness checks

use crate::{error::AppResult, repository::Repository};

#[derive(Clone)]
pub struct HealthService {
    repository: Repository,
}

impl HealthService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Fails when the database cannot be reached
    pub async fn ready(&self) -> AppResult<()> {
        self.repository.health.ping().await
    }
}
