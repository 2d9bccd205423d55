//! Assets repository for database operations

use async_trait::async_trait;
use sqlx::{PgConnection, Pool, Postgres};
use uuid::Uuid;

use super::unique_violation;
use crate::{
    error::{AppError, AppResult},
    models::{
        asset::{Asset, AvailableAsset, NewAsset},
        enums::AssetStatus,
    },
};

/// Unique keys of an asset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetKey {
    AssetTag,
    SerialNumber,
}

impl AssetKey {
    /// Which key of `existing` collides with the new asset (asset ID checked first)
    pub fn colliding(existing: &Asset, asset_tag: &str, serial_number: &str) -> Option<AssetKey> {
        if existing.asset_tag == asset_tag {
            Some(AssetKey::AssetTag)
        } else if existing.serial_number == serial_number {
            Some(AssetKey::SerialNumber)
        } else {
            None
        }
    }

    fn from_constraint(name: &str) -> Option<AssetKey> {
        match name {
            "assets_asset_tag_key" => Some(AssetKey::AssetTag),
            "assets_serial_number_key" => Some(AssetKey::SerialNumber),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AssetKey::AssetTag => "ID",
            AssetKey::SerialNumber => "Serial Number",
        }
    }

    pub fn conflict(&self) -> AppError {
        AppError::Conflict(format!("Asset with this {} already exists", self.label()))
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AssetsRepository: Send + Sync {
    /// All assets, newest first
    async fn list(&self) -> AppResult<Vec<Asset>>;

    /// Assets currently available, minimal projection
    async fn list_available(&self) -> AppResult<Vec<AvailableAsset>>;

    async fn get_by_id(&self, id: Uuid) -> AppResult<Option<Asset>>;

    /// First asset using either key
    async fn find_by_keys(&self, asset_tag: String, serial_number: String) -> AppResult<Option<Asset>>;

    async fn create(&self, data: NewAsset) -> AppResult<Asset>;

    /// Ids of assets whose trimmed, lower-cased owner is one of `identities`
    async fn ids_owned_by(&self, identities: Vec<String>) -> AppResult<Vec<Uuid>>;
}

/// Write an asset status inside the caller's connection or transaction.
///
/// With `only_if`, the row is changed only while it still has that status.
/// Returns the number of rows changed.
pub(crate) async fn write_status(
    conn: &mut PgConnection,
    id: Uuid,
    status: AssetStatus,
    owner: Option<&str>,
    only_if: Option<AssetStatus>,
) -> Result<u64, sqlx::Error> {
    let result = sqlx::query(
        r#"
        UPDATE assets
        SET status = $2,
            current_owner = COALESCE($3, current_owner),
            updated_at = NOW()
        WHERE id = $1 AND ($4::text IS NULL OR status = $4)
        "#,
    )
    .bind(id)
    .bind(status)
    .bind(owner)
    .bind(only_if)
    .execute(conn)
    .await?;

    Ok(result.rows_affected())
}

#[derive(Clone)]
pub struct PgAssetsRepository {
    pool: Pool<Postgres>,
}

impl PgAssetsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AssetsRepository for PgAssetsRepository {
    async fn list(&self) -> AppResult<Vec<Asset>> {
        let assets = sqlx::query_as::<_, Asset>("SELECT * FROM assets ORDER BY created_at DESC")
            .fetch_all(&self.pool)
            .await?;
        Ok(assets)
    }

    async fn list_available(&self) -> AppResult<Vec<AvailableAsset>> {
        let assets = sqlx::query_as::<_, AvailableAsset>(
            r#"
            SELECT id, asset_tag, name, serial_number
            FROM assets
            WHERE status = $1
            ORDER BY asset_tag
            "#,
        )
        .bind(AssetStatus::Available)
        .fetch_all(&self.pool)
        .await?;
        Ok(assets)
    }

    async fn get_by_id(&self, id: Uuid) -> AppResult<Option<Asset>> {
        let asset = sqlx::query_as::<_, Asset>("SELECT * FROM assets WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(asset)
    }

    async fn find_by_keys(&self, asset_tag: String, serial_number: String) -> AppResult<Option<Asset>> {
        let asset = sqlx::query_as::<_, Asset>(
            "SELECT * FROM assets WHERE asset_tag = $1 OR serial_number = $2 LIMIT 1",
        )
        .bind(&asset_tag)
        .bind(&serial_number)
        .fetch_optional(&self.pool)
        .await?;
        Ok(asset)
    }

    async fn create(&self, data: NewAsset) -> AppResult<Asset> {
        let result = sqlx::query_as::<_, Asset>(
            r#"
            INSERT INTO assets (
                id, asset_tag, serial_number, name, category, status,
                current_owner, location, department, purchase_date, warranty_end, cost
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&data.asset_tag)
        .bind(&data.serial_number)
        .bind(&data.name)
        .bind(data.category)
        .bind(data.status)
        .bind(&data.current_owner)
        .bind(&data.location)
        .bind(&data.department)
        .bind(data.purchase_date)
        .bind(data.warranty_end)
        .bind(data.cost)
        .fetch_one(&self.pool)
        .await;

        // Two concurrent creations can both pass the service-level duplicate check
        match result {
            Ok(asset) => Ok(asset),
            Err(e) => match unique_violation(&e).as_deref().and_then(AssetKey::from_constraint) {
                Some(key) => Err(key.conflict()),
                None => Err(e.into()),
            },
        }
    }

    async fn ids_owned_by(&self, identities: Vec<String>) -> AppResult<Vec<Uuid>> {
        let ids = sqlx::query_scalar::<_, Uuid>(
            "SELECT id FROM assets WHERE LOWER(TRIM(current_owner)) = ANY($1)",
        )
        .bind(&identities)
        .fetch_all(&self.pool)
        .await?;
        Ok(ids)
    }
}
