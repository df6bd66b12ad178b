use anyhow::Result;
use compute::default_regenerator;
use sea_orm::{Database, DatabaseConnection};
use tracing::{info, debug, trace, error};

/// Rebuilds the stored schedule of one asset, or of every asset.
pub async fn regenerate(database_url: &str, asset_id: Option<i32>) -> Result<()> {
    trace!("Entering regenerate function");
    debug!("Database URL: {}", database_url);

    let db: DatabaseConnection = match Database::connect(database_url).await {
        Ok(connection) => connection,
        Err(e) => {
            error!("Failed to connect to database '{}': {}", database_url, e);
            return Err(e.into());
        }
    };

    regenerate_with(&db, asset_id).await
}

async fn regenerate_with(db: &DatabaseConnection, asset_id: Option<i32>) -> Result<()> {
    let regenerator = default_regenerator(None);

    match asset_id {
        Some(asset_id) => match regenerator.regenerate(db, asset_id).await {
            Ok(records) => {
                info!(
                    "Regenerated {} schedule years for asset {}",
                    records.len(),
                    asset_id
                );
            }
            Err(e) => {
                error!("Failed to regenerate asset {}: {}", asset_id, e);
                return Err(e.into());
            }
        },
        None => match regenerator.regenerate_all(db).await {
            Ok(count) => info!("Regenerated schedules for {} assets", count),
            Err(e) => {
                error!("Failed to regenerate schedules: {}", e);
                return Err(e.into());
            }
        },
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::test_utils::{seed_asset, setup_test_db};
    use model::entities::depreciation_record;
    use sea_orm::{EntityTrait, PaginatorTrait};

    #[tokio::test]
    async fn test_regenerate_single_and_all() {
        let db = setup_test_db().await;
        let first = seed_asset(&db, "Lathe").await;
        seed_asset(&db, "Press").await;

        regenerate_with(&db, Some(first.id)).await.unwrap();
        let single = depreciation_record::Entity::find().count(&db).await.unwrap();
        assert!(single > 0);

        regenerate_with(&db, None).await.unwrap();
        let all = depreciation_record::Entity::find().count(&db).await.unwrap();
        assert_eq!(all, single * 2);
    }

    #[tokio::test]
    async fn test_regenerate_unknown_asset_fails() {
        let db = setup_test_db().await;
        assert!(regenerate_with(&db, Some(99)).await.is_err());
    }
}
