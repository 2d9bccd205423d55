//! Maintenance workflow

use chrono::Utc;
use uuid::Uuid;
use validator::Validate;

use super::users::non_blank;
use crate::{
    access::{self, Resource, RowScope},
    error::{AppError, AppResult},
    models::{
        enums::{AssetStatus, MaintenancePriority, MaintenanceStatus},
        maintenance::{
            CreateMaintenance, MaintenanceChanges, MaintenanceDetails, MaintenanceRecord, NewMaintenance,
            UpdateMaintenance,
        },
        user::Principal,
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct MaintenanceService {
    repository: Repository,
}

impl MaintenanceService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Open a ticket. The asset goes into maintenance whatever its previous status.
    pub async fn create(&self, principal: &Principal, data: CreateMaintenance) -> AppResult<MaintenanceRecord> {
        data.validate()?;

        let (asset_id, issue) = match (data.asset_id, non_blank(data.issue)) {
            (Some(asset_id), Some(issue)) => (asset_id, issue),
            _ => return Err(AppError::Validation("Please provide an asset and an issue".to_string())),
        };

        let asset = self
            .repository
            .assets
            .get_by_id(asset_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Asset not found".to_string()))?;

        if !principal.is_admin() && !asset.is_owned_by(&principal.identities()) {
            return Err(AppError::Authorization(
                "You can only report issues for assets assigned to you".to_string(),
            ));
        }

        let record = self
            .repository
            .maintenance
            .create(NewMaintenance {
                asset_id,
                issue,
                description: non_blank(data.description),
                priority: data.priority.unwrap_or(MaintenancePriority::Medium),
                assigned_to: non_blank(data.assigned_to),
                scheduled_date: data.scheduled_date,
            })
            .await?;

        tracing::info!(
            ticket_id = %record.id,
            asset_id = %asset_id,
            previous = %asset.status,
            status = %AssetStatus::Maintenance,
            "Maintenance ticket opened"
        );
        Ok(record)
    }

    /// Tickets visible to the caller, newest first
    pub async fn list(&self, principal: &Principal) -> AppResult<Vec<MaintenanceDetails>> {
        let asset_ids = match access::visibility(principal.role, Resource::Maintenance).rows {
            RowScope::All => None,
            RowScope::Own => {
                let owned = self.repository.assets.ids_owned_by(principal.identities()).await?;
                if owned.is_empty() {
                    return Ok(Vec::new());
                }
                Some(owned)
            }
        };
        self.repository.maintenance.list(asset_ids).await
    }

    /// Move a ticket along its lifecycle and record cost (administrators only).
    /// Completing a ticket makes its asset available again.
    pub async fn update_status(
        &self,
        principal: &Principal,
        id: Uuid,
        data: UpdateMaintenance,
    ) -> AppResult<MaintenanceRecord> {
        principal.require_admin()?;

        let record = self
            .repository
            .maintenance
            .get_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Maintenance record not found".to_string()))?;

        // Re-sending the current status changes nothing
        let next = data.status.filter(|s| *s != record.status);
        if let Some(next) = next {
            if record.status.is_terminal() {
                return Err(AppError::InvalidState(format!(
                    "Maintenance ticket is already {}",
                    record.status
                )));
            }
            if !record.status.can_transition_to(next) {
                return Err(AppError::InvalidState(format!(
                    "Cannot move a {} ticket to {}",
                    record.status, next
                )));
            }
        }

        let completing = next == Some(MaintenanceStatus::Completed);
        let changes = MaintenanceChanges {
            expected_status: record.status,
            status: next,
            cost: data.cost,
            completion_date: if completing {
                Some(data.completion_date.unwrap_or_else(Utc::now))
            } else {
                None
            },
            release_asset: completing.then_some(record.asset_id),
        };

        let updated = self.repository.maintenance.update(id, changes).await?;

        if let Some(next) = next {
            tracing::info!(ticket_id = %id, from = %record.status, to = %next, "Maintenance ticket updated");
        }
        if completing {
            tracing::info!(asset_id = %record.asset_id, status = %AssetStatus::Available, "Asset status changed");
        }
        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        models::enums::Role,
        repository::Mocks,
        services::fixtures::{asset, maintenance_record, principal},
    };
    use mockall::predicate::eq;
    use rust_decimal::Decimal;

    fn ticket_for(asset_id: Uuid) -> CreateMaintenance {
        CreateMaintenance {
            asset_id: Some(asset_id),
            issue: Some("Broken hinge".into()),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_admin_opens_ticket_on_in_use_asset() {
        let target = asset("A-1", "S-1", AssetStatus::InUse);
        let asset_id = target.id;

        let mut mocks = Mocks::new();
        mocks
            .assets
            .expect_get_by_id()
            .returning(move |_| Ok(Some(target.clone())));
        mocks
            .maintenance
            .expect_create()
            .withf(move |m| m.asset_id == asset_id && m.priority == MaintenancePriority::Medium)
            .times(1)
            .returning(|m| Ok(maintenance_record(m.asset_id, MaintenanceStatus::Scheduled)));
        let service = MaintenanceService::new(mocks.into_repository());

        let record = service
            .create(&principal(Role::Admin), ticket_for(asset_id))
            .await
            .unwrap();
        assert_eq!(record.status, MaintenanceStatus::Scheduled);
    }

    #[tokio::test]
    async fn test_employee_may_only_report_own_assets() {
        let employee = principal(Role::Employee);

        let mut held = asset("A-1", "S-1", AssetStatus::InUse);
        held.current_owner = Some(employee.email.clone());
        let held_id = held.id;
        let mut other = asset("A-2", "S-2", AssetStatus::InUse);
        other.current_owner = Some("Someone Else".into());
        let other_id = other.id;

        let mut mocks = Mocks::new();
        mocks
            .assets
            .expect_get_by_id()
            .with(eq(held_id))
            .returning(move |_| Ok(Some(held.clone())));
        mocks
            .assets
            .expect_get_by_id()
            .with(eq(other_id))
            .returning(move |_| Ok(Some(other.clone())));
        mocks
            .maintenance
            .expect_create()
            .times(1)
            .returning(|m| Ok(maintenance_record(m.asset_id, MaintenanceStatus::Scheduled)));
        let service = MaintenanceService::new(mocks.into_repository());

        service.create(&employee, ticket_for(held_id)).await.unwrap();
        assert!(matches!(
            service.create(&employee, ticket_for(other_id)).await,
            Err(AppError::Authorization(_))
        ));
    }

    #[tokio::test]
    async fn test_owner_email_matches_regardless_of_case() {
        let employee = principal(Role::Employee);

        let mut held = asset("A-1", "S-1", AssetStatus::InUse);
        held.current_owner = Some(employee.email.to_uppercase());
        let held_id = held.id;

        let mut mocks = Mocks::new();
        mocks.assets.expect_get_by_id().returning(move |_| Ok(Some(held.clone())));
        mocks
            .maintenance
            .expect_create()
            .times(1)
            .returning(|m| Ok(maintenance_record(m.asset_id, MaintenanceStatus::Scheduled)));
        let service = MaintenanceService::new(mocks.into_repository());

        service.create(&employee, ticket_for(held_id)).await.unwrap();
    }

    #[tokio::test]
    async fn test_missing_asset_is_not_found() {
        let mut mocks = Mocks::new();
        mocks.assets.expect_get_by_id().returning(|_| Ok(None));
        mocks.maintenance.expect_create().never();
        let service = MaintenanceService::new(mocks.into_repository());

        let result = service.create(&principal(Role::Admin), ticket_for(Uuid::new_v4())).await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_employee_listing_is_limited_to_owned_assets() {
        let employee = principal(Role::Employee);
        let owned = vec![Uuid::new_v4()];
        let expected = owned.clone();
        let identities = vec!["dana@example.com".to_string(), "dana reyes".to_string()];

        let mut mocks = Mocks::new();
        mocks
            .assets
            .expect_ids_owned_by()
            .with(eq(identities))
            .times(1)
            .returning(move |_| Ok(owned.clone()));
        mocks
            .maintenance
            .expect_list()
            .with(eq(Some(expected)))
            .times(1)
            .returning(|_| Ok(vec![]));
        let service = MaintenanceService::new(mocks.into_repository());

        service.list(&employee).await.unwrap();
    }

    #[tokio::test]
    async fn test_employee_without_assets_sees_nothing() {
        let mut mocks = Mocks::new();
        mocks.assets.expect_ids_owned_by().returning(|_| Ok(vec![]));
        mocks.maintenance.expect_list().never();
        let service = MaintenanceService::new(mocks.into_repository());

        assert!(service.list(&principal(Role::Employee)).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_completion_releases_asset() {
        let stored = maintenance_record(Uuid::new_v4(), MaintenanceStatus::InProgress);
        let id = stored.id;
        let asset_id = stored.asset_id;

        let mut mocks = Mocks::new();
        mocks
            .maintenance
            .expect_get_by_id()
            .returning(move |_| Ok(Some(stored.clone())));
        mocks
            .maintenance
            .expect_update()
            .withf(move |ticket, c| {
                *ticket == id
                    && c.expected_status == MaintenanceStatus::InProgress
                    && c.status == Some(MaintenanceStatus::Completed)
                    && c.completion_date.is_some()
                    && c.release_asset == Some(asset_id)
                    && c.cost == Some(Some(Decimal::ZERO))
            })
            .times(1)
            .returning(move |_, _| Ok(maintenance_record(asset_id, MaintenanceStatus::Completed)));
        let service = MaintenanceService::new(mocks.into_repository());

        let data = UpdateMaintenance {
            status: Some(MaintenanceStatus::Completed),
            cost: Some(Some(Decimal::ZERO)),
            completion_date: None,
        };
        let updated = service.update_status(&principal(Role::Admin), id, data).await.unwrap();
        assert_eq!(updated.status, MaintenanceStatus::Completed);
    }

    #[tokio::test]
    async fn test_non_completing_updates_keep_asset() {
        let stored = maintenance_record(Uuid::new_v4(), MaintenanceStatus::Scheduled);
        let id = stored.id;

        let mut mocks = Mocks::new();
        mocks
            .maintenance
            .expect_get_by_id()
            .returning(move |_| Ok(Some(stored.clone())));
        mocks
            .maintenance
            .expect_update()
            .withf(|_, c| {
                c.status == Some(MaintenanceStatus::InProgress)
                    && c.release_asset.is_none()
                    && c.completion_date.is_none()
                    && c.cost.is_none()
            })
            .times(1)
            .returning(|_, _| Ok(maintenance_record(Uuid::new_v4(), MaintenanceStatus::InProgress)));
        let service = MaintenanceService::new(mocks.into_repository());

        let data = UpdateMaintenance { status: Some(MaintenanceStatus::InProgress), ..Default::default() };
        service.update_status(&principal(Role::Admin), id, data).await.unwrap();
    }

    #[tokio::test]
    async fn test_resending_completed_status_does_not_release_again() {
        let stored = maintenance_record(Uuid::new_v4(), MaintenanceStatus::Completed);
        let id = stored.id;

        let mut mocks = Mocks::new();
        mocks
            .maintenance
            .expect_get_by_id()
            .returning(move |_| Ok(Some(stored.clone())));
        mocks
            .maintenance
            .expect_update()
            .withf(|_, c| c.status.is_none() && c.release_asset.is_none())
            .times(1)
            .returning(|_, _| Ok(maintenance_record(Uuid::new_v4(), MaintenanceStatus::Completed)));
        let service = MaintenanceService::new(mocks.into_repository());

        let data = UpdateMaintenance { status: Some(MaintenanceStatus::Completed), ..Default::default() };
        service.update_status(&principal(Role::Admin), id, data).await.unwrap();
    }

    #[tokio::test]
    async fn test_concurrent_transition_is_rejected() {
        let stored = maintenance_record(Uuid::new_v4(), MaintenanceStatus::Scheduled);
        let id = stored.id;

        let mut mocks = Mocks::new();
        mocks
            .maintenance
            .expect_get_by_id()
            .returning(move |_| Ok(Some(stored.clone())));
        // The ticket was cancelled between the read and the write
        mocks
            .maintenance
            .expect_update()
            .withf(|_, c| c.expected_status == MaintenanceStatus::Scheduled)
            .times(1)
            .returning(|_, _| {
                Err(AppError::InvalidState("Maintenance ticket was changed concurrently".to_string()))
            });
        let service = MaintenanceService::new(mocks.into_repository());

        let data = UpdateMaintenance { status: Some(MaintenanceStatus::Completed), ..Default::default() };
        let result = service.update_status(&principal(Role::Admin), id, data).await;
        assert!(matches!(result, Err(AppError::InvalidState(_))));
    }

    #[tokio::test]
    async fn test_terminal_ticket_cannot_reopen() {
        let stored = maintenance_record(Uuid::new_v4(), MaintenanceStatus::Cancelled);
        let id = stored.id;

        let mut mocks = Mocks::new();
        mocks
            .maintenance
            .expect_get_by_id()
            .returning(move |_| Ok(Some(stored.clone())));
        mocks.maintenance.expect_update().never();
        let service = MaintenanceService::new(mocks.into_repository());

        let data = UpdateMaintenance { status: Some(MaintenanceStatus::InProgress), ..Default::default() };
        let result = service.update_status(&principal(Role::Admin), id, data).await;
        assert!(matches!(result, Err(AppError::InvalidState(_))));
    }

    #[tokio::test]
    async fn test_employee_cannot_update_ticket() {
        let mut mocks = Mocks::new();
        mocks.maintenance.expect_get_by_id().never();
        mocks.maintenance.expect_update().never();
        let service = MaintenanceService::new(mocks.into_repository());

        let data = UpdateMaintenance { status: Some(MaintenanceStatus::Completed), ..Default::default() };
        let result = service
            .update_status(&principal(Role::Employee), Uuid::new_v4(), data)
            .await;
        assert!(matches!(result, Err(AppError::Authorization(_))));
    }

    #[tokio::test]
    async fn test_update_unknown_ticket_is_not_found() {
        let mut mocks = Mocks::new();
        mocks.maintenance.expect_get_by_id().returning(|_| Ok(None));
        let service = MaintenanceService::new(mocks.into_repository());

        let result = service
            .update_status(&principal(Role::Admin), Uuid::new_v4(), UpdateMaintenance::default())
            .await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }
}
