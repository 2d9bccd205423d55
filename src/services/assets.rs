//! Asset registry service

use validator::Validate;

use super::users::non_blank;
use crate::{
    access::{self, FieldScope, Resource},
    error::{AppError, AppResult},
    models::{
        asset::{Asset, AssetListing, AvailableAsset, CreateAsset, NewAsset, RestrictedAsset},
        user::Principal,
    },
    repository::{assets::AssetKey, Repository},
};

#[derive(Clone)]
pub struct AssetsService {
    repository: Repository,
}

impl AssetsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Register a new asset (administrators only)
    pub async fn create(&self, principal: &Principal, data: CreateAsset) -> AppResult<Asset> {
        principal.require_admin()?;
        data.validate()?;

        let (asset_tag, serial_number, name, category, status) = match (
            non_blank(data.asset_tag),
            non_blank(data.serial_number),
            non_blank(data.name),
            data.category,
            data.status,
        ) {
            (Some(tag), Some(serial), Some(name), Some(category), Some(status)) => {
                (tag, serial, name, category, status)
            }
            _ => {
                return Err(AppError::Validation(
                    "Please fill in all required fields (ID, Serial, Name, Category, Status)".to_string(),
                ))
            }
        };

        if let Some(existing) = self
            .repository
            .assets
            .find_by_keys(asset_tag.clone(), serial_number.clone())
            .await?
        {
            if let Some(key) = AssetKey::colliding(&existing, &asset_tag, &serial_number) {
                return Err(key.conflict());
            }
        }

        let asset = self
            .repository
            .assets
            .create(NewAsset {
                asset_tag,
                serial_number,
                name,
                category,
                status,
                purchase_date: data.purchase_date,
                warranty_end: data.warranty_end,
                cost: data.cost,
                location: non_blank(data.location),
                department: non_blank(data.department),
                current_owner: non_blank(data.current_owner),
            })
            .await?;

        tracing::info!(asset_id = %asset.id, asset_tag = %asset.asset_tag, status = %asset.status, "Asset created");
        Ok(asset)
    }

    /// All assets, newest first, projected for the caller's role
    pub async fn list(&self, principal: &Principal) -> AppResult<Vec<AssetListing>> {
        let assets = self.repository.assets.list().await?;
        let visibility = access::visibility(principal.role, Resource::Asset);

        Ok(assets
            .into_iter()
            .map(|asset| match visibility.fields {
                FieldScope::Full => AssetListing::Full(asset),
                FieldScope::Restricted => AssetListing::Restricted(RestrictedAsset::from(asset)),
            })
            .collect())
    }

    pub async fn list_available(&self) -> AppResult<Vec<AvailableAsset>> {
        self.repository.assets.list_available().await
    }
}
