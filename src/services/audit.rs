//! Audit log service

use validator::Validate;

use super::users::non_blank;
use crate::{
    access::{self, Resource, RowScope},
    error::{AppError, AppResult},
    models::{
        audit::{AuditEntry, AuditEntryDetails, CreateAuditEntry, NewAuditEntry},
        user::Principal,
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct AuditService {
    repository: Repository,
}

impl AuditService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Record an observation about an asset. The asset itself is not modified.
    pub async fn create(&self, principal: &Principal, data: CreateAuditEntry) -> AppResult<AuditEntry> {
        data.validate()?;

        let (asset_id, action, status) = match (data.asset_id, data.action, data.status) {
            (Some(asset_id), Some(action), Some(status)) => (asset_id, action, status),
            _ => {
                return Err(AppError::Validation(
                    "Please provide an asset, an action and a status".to_string(),
                ))
            }
        };

        let asset = self
            .repository
            .assets
            .get_by_id(asset_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Asset not found".to_string()))?;

        let entry = self
            .repository
            .audit
            .create(NewAuditEntry {
                asset_id,
                performed_by: principal.id,
                action,
                status,
                location: non_blank(data.location).or(asset.location),
                notes: non_blank(data.notes),
            })
            .await?;

        tracing::info!(entry_id = %entry.id, asset_id = %asset_id, action = %action, "Audit entry recorded");
        Ok(entry)
    }

    pub async fn list(&self, principal: &Principal) -> AppResult<Vec<AuditEntryDetails>> {
        let performed_by = match access::visibility(principal.role, Resource::Audit).rows {
            RowScope::All => None,
            RowScope::Own => Some(principal.id),
        };
        self.repository.audit.list(performed_by).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        models::enums::{AssetStatus, AuditAction, AuditStatus, Role},
        repository::Mocks,
        services::fixtures::{asset, audit_entry, principal},
    };

    #[tokio::test]
    async fn test_location_defaults_to_asset_location() {
        let mut target = asset("A-1", "S-1", AssetStatus::InUse);
        target.location = Some("HQ 3rd floor".into());
        let asset_id = target.id;
        let auditor = principal(Role::Employee);
        let auditor_id = auditor.id;

        let mut mocks = Mocks::new();
        mocks
            .assets
            .expect_get_by_id()
            .returning(move |_| Ok(Some(target.clone())));
        mocks
            .audit
            .expect_create()
            .withf(move |e| {
                e.asset_id == asset_id
                    && e.performed_by == auditor_id
                    && e.location.as_deref() == Some("HQ 3rd floor")
            })
            .times(1)
            .returning(|e| Ok(audit_entry(e)));
        let service = AuditService::new(mocks.into_repository());

        let entry = service
            .create(
                &auditor,
                CreateAuditEntry {
                    asset_id: Some(asset_id),
                    action: Some(AuditAction::CheckOut),
                    status: Some(AuditStatus::Verified),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(entry.action, AuditAction::CheckOut);
    }

    #[tokio::test]
    async fn test_explicit_location_wins() {
        let mut target = asset("A-1", "S-1", AssetStatus::Available);
        target.location = Some("HQ".into());
        let asset_id = target.id;

        let mut mocks = Mocks::new();
        mocks
            .assets
            .expect_get_by_id()
            .returning(move |_| Ok(Some(target.clone())));
        mocks
            .audit
            .expect_create()
            .withf(|e| e.location.as_deref() == Some("Warehouse"))
            .times(1)
            .returning(|e| Ok(audit_entry(e)));
        let service = AuditService::new(mocks.into_repository());

        service
            .create(
                &principal(Role::Admin),
                CreateAuditEntry {
                    asset_id: Some(asset_id),
                    action: Some(AuditAction::Audit),
                    status: Some(AuditStatus::Concern),
                    location: Some("Warehouse".into()),
                    notes: None,
                },
            )
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_unknown_asset_and_missing_fields() {
        let mut mocks = Mocks::new();
        mocks.assets.expect_get_by_id().returning(|_| Ok(None));
        mocks.audit.expect_create().never();
        let service = AuditService::new(mocks.into_repository());

        let unknown = CreateAuditEntry {
            asset_id: Some(uuid::Uuid::new_v4()),
            action: Some(AuditAction::Verification),
            status: Some(AuditStatus::Missing),
            ..Default::default()
        };
        assert!(matches!(
            service.create(&principal(Role::Admin), unknown).await,
            Err(AppError::NotFound(_))
        ));

        let incomplete = CreateAuditEntry { asset_id: Some(uuid::Uuid::new_v4()), ..Default::default() };
        assert!(matches!(
            service.create(&principal(Role::Admin), incomplete).await,
            Err(AppError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn test_every_role_sees_the_whole_log() {
        let mut mocks = Mocks::new();
        mocks
            .audit
            .expect_list()
            .with(mockall::predicate::eq(None))
            .times(2)
            .returning(|_| Ok(vec![]));
        let service = AuditService::new(mocks.into_repository());

        service.list(&principal(Role::Admin)).await.unwrap();
        service.list(&principal(Role::Employee)).await.unwrap();
    }
}
