//! Period reports over stored assets, schedules and disposals.

use std::collections::HashMap;

use chrono::{Datelike, NaiveDate};
use common::{
    AssetValueReportRow, DepreciationReportRow, DisposalReportRow, ReportData, ReportType,
};
use model::entities::{asset, depreciation_record, disposal};
use rust_decimal::Decimal;
use sea_orm::{ActiveEnum, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder};
use tracing::{debug, instrument};

use crate::error::{ComputeError, Result};

/// Builds the requested report for the inclusive period `start..=end`.
#[instrument(skip(db))]
pub async fn report<C: ConnectionTrait>(
    db: &C,
    report_type: ReportType,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<ReportData> {
    if start > end {
        return Err(ComputeError::invalid(format!(
            "start date {} is after end date {}",
            start, end
        )));
    }

    let data = match report_type {
        ReportType::AssetValue => ReportData::AssetValue(asset_value_report(db, start, end).await?),
        ReportType::Depreciation => {
            ReportData::Depreciation(depreciation_report(db, start, end).await?)
        }
        ReportType::Disposal => ReportData::Disposal(disposal_report(db, start, end).await?),
    };
    debug!("Built {} report with {} rows", report_type, data.len());
    Ok(data)
}

/// Assets purchased in the period with their latest scheduled book value.
pub async fn asset_value_report<C: ConnectionTrait>(
    db: &C,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<Vec<AssetValueReportRow>> {
    let assets = asset::Entity::find()
        .filter(asset::Column::PurchaseDate.between(start, end))
        .order_by_asc(asset::Column::PurchaseDate)
        .order_by_asc(asset::Column::Id)
        .all(db)
        .await?;

    let asset_ids: Vec<i32> = assets.iter().map(|a| a.id).collect();
    // Ascending years, so the last insert per asset is its latest book value
    let latest_book_values: HashMap<i32, Decimal> = depreciation_record::Entity::find()
        .filter(depreciation_record::Column::AssetId.is_in(asset_ids))
        .order_by_asc(depreciation_record::Column::Year)
        .all(db)
        .await?
        .into_iter()
        .map(|record| (record.asset_id, record.book_value))
        .collect();

    Ok(assets
        .into_iter()
        .map(|asset| AssetValueReportRow {
            current_value: latest_book_values
                .get(&asset.id)
                .copied()
                .unwrap_or(asset.cost),
            asset_id: asset.id,
            purchase_date: asset.purchase_date,
            original_cost: asset.cost,
            status: asset.status.to_value(),
            name: asset.name,
        })
        .collect())
}

/// Schedule rows for the calendar years the period touches, newest year first.
pub async fn depreciation_report<C: ConnectionTrait>(
    db: &C,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<Vec<DepreciationReportRow>> {
    let rows = depreciation_record::Entity::find()
        .filter(depreciation_record::Column::Year.between(start.year(), end.year()))
        .find_also_related(asset::Entity)
        .order_by_desc(depreciation_record::Column::Year)
        .order_by_asc(depreciation_record::Column::AssetId)
        .all(db)
        .await?;

    Ok(rows
        .into_iter()
        .map(|(record, asset)| DepreciationReportRow {
            asset_id: record.asset_id,
            asset_name: asset.map(|a| a.name).unwrap_or_default(),
            year: record.year,
            amount: record.amount,
            accumulated_depreciation: record.accumulated_depreciation,
            book_value: record.book_value,
        })
        .collect())
}

/// Disposals dated in the period, with the gain or loss against book value.
pub async fn disposal_report<C: ConnectionTrait>(
    db: &C,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<Vec<DisposalReportRow>> {
    let disposals = disposal::Entity::find()
        .filter(disposal::Column::DisposalDate.between(start, end))
        .find_also_related(asset::Entity)
        .order_by_desc(disposal::Column::DisposalDate)
        .order_by_asc(disposal::Column::Id)
        .all(db)
        .await?;

    let mut rows = Vec::with_capacity(disposals.len());
    for (disposal, asset) in disposals {
        let Some(asset) = asset else {
            continue;
        };
        let book_value = book_value_in_year(db, &asset, disposal.disposal_date.year()).await?;
        rows.push(DisposalReportRow {
            disposal_id: disposal.id,
            asset_id: asset.id,
            asset_name: asset.name,
            disposal_date: disposal.disposal_date,
            gain_or_loss: disposal.disposal_value - book_value,
            disposal_value: disposal.disposal_value,
            reason: disposal.reason,
            status: disposal.status.to_value(),
            book_value,
        });
    }
    Ok(rows)
}

/// Book value of the latest schedule year not after `year`; the cost when none exists.
pub async fn book_value_in_year<C: ConnectionTrait>(
    db: &C,
    asset: &asset::Model,
    year: i32,
) -> Result<Decimal> {
    let record = depreciation_record::Entity::find()
        .filter(depreciation_record::Column::AssetId.eq(asset.id))
        .filter(depreciation_record::Column::Year.lte(year))
        .order_by_desc(depreciation_record::Column::Year)
        .one(db)
        .await?;
    Ok(record.map(|r| r.book_value).unwrap_or(asset.cost))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::default_regenerator;
    use chrono::Utc;
    use migration::{Migrator, MigratorTrait};
    use model::entities::asset::{AssetStatus, DepreciationMethod};
    use model::entities::disposal::DisposalStatus;
    use rust_decimal_macros::dec;
    use sea_orm::{ActiveModelTrait, Database, DatabaseConnection, Set};

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    async fn setup_db() -> DatabaseConnection {
        let db = Database::connect("sqlite::memory:")
            .await
            .expect("Failed to connect to in-memory database");
        Migrator::up(&db, None).await.expect("Migrations failed.");
        db
    }

    async fn new_asset(db: &DatabaseConnection, name: &str, purchase_date: NaiveDate) -> asset::Model {
        asset::ActiveModel {
            name: Set(name.to_string()),
            description: Set(None),
            asset_type: Set("Vehicle".to_string()),
            cost: Set(dec!(10000)),
            purchase_date: Set(purchase_date),
            location: Set("Depot".to_string()),
            condition: Set("Good".to_string()),
            status: Set(AssetStatus::Active),
            depreciation_method: Set(DepreciationMethod::StraightLine),
            useful_life: Set(5),
            salvage_value: Set(dec!(1000)),
            total_estimated_units: Set(None),
            version: Set(1),
            created_at: Set(Utc::now()),
            updated_at: Set(Utc::now()),
            ..Default::default()
        }
        .insert(db)
        .await
        .expect("Failed to create asset")
    }

    /// Two vans bought 2022 and 2023 with schedules through 2024.
    async fn seeded() -> (DatabaseConnection, asset::Model, asset::Model) {
        let db = setup_db().await;
        let older = new_asset(&db, "Van A", date(2022, 3, 1)).await;
        let newer = new_asset(&db, "Van B", date(2023, 6, 1)).await;
        default_regenerator(Some(date(2024, 12, 31)))
            .regenerate_all(&db)
            .await
            .unwrap();
        (db, older, newer)
    }

    #[tokio::test]
    async fn test_asset_value_report_filters_on_purchase_date() {
        let (db, older, newer) = seeded().await;

        let rows = asset_value_report(&db, date(2022, 1, 1), date(2024, 12, 31))
            .await
            .unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].asset_id, older.id);
        // 2022..=2024 at 1800 per year
        assert_eq!(rows[0].current_value, dec!(4600));
        assert_eq!(rows[1].asset_id, newer.id);
        assert_eq!(rows[1].current_value, dec!(6400));
        assert_eq!(rows[1].status, "ACTIVE");

        let only_2023 = asset_value_report(&db, date(2023, 1, 1), date(2023, 12, 31))
            .await
            .unwrap();
        assert_eq!(only_2023.len(), 1);
        assert_eq!(only_2023[0].name, "Van B");
    }

    #[tokio::test]
    async fn test_asset_without_schedule_reports_cost() {
        let db = setup_db().await;
        new_asset(&db, "Trailer", date(2024, 2, 2)).await;

        let rows = asset_value_report(&db, date(2024, 1, 1), date(2024, 12, 31))
            .await
            .unwrap();
        assert_eq!(rows[0].current_value, dec!(10000));
    }

    #[tokio::test]
    async fn test_depreciation_report_uses_calendar_years() {
        let (db, older, newer) = seeded().await;

        let rows = depreciation_report(&db, date(2023, 7, 1), date(2024, 2, 1))
            .await
            .unwrap();

        let keys: Vec<(i32, i32)> = rows.iter().map(|r| (r.year, r.asset_id)).collect();
        assert_eq!(
            keys,
            vec![(2024, older.id), (2024, newer.id), (2023, older.id), (2023, newer.id)]
        );
        assert_eq!(rows[0].asset_name, "Van A");
        assert!(rows.iter().all(|r| r.amount == dec!(1800)));
    }

    #[tokio::test]
    async fn test_disposal_report_includes_gain_or_loss() {
        let (db, older, _) = seeded().await;
        disposal::ActiveModel {
            asset_id: Set(older.id),
            disposal_date: Set(date(2023, 11, 20)),
            disposal_value: Set(dec!(7000)),
            reason: Set("Fleet renewal".to_string()),
            status: Set(DisposalStatus::Pending),
            created_at: Set(Utc::now()),
            ..Default::default()
        }
        .insert(&db)
        .await
        .unwrap();

        let rows = disposal_report(&db, date(2023, 1, 1), date(2023, 12, 31))
            .await
            .unwrap();

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].asset_name, "Van A");
        assert_eq!(rows[0].status, "PENDING");
        // End of 2023: 10000 - 2 * 1800
        assert_eq!(rows[0].book_value, dec!(6400));
        assert_eq!(rows[0].gain_or_loss, dec!(600));

        let outside = disposal_report(&db, date(2024, 1, 1), date(2024, 12, 31))
            .await
            .unwrap();
        assert!(outside.is_empty());
    }

    #[tokio::test]
    async fn test_report_rejects_reversed_period() {
        let db = setup_db().await;

        let err = report(&db, ReportType::Depreciation, date(2024, 2, 1), date(2024, 1, 1))
            .await
            .unwrap_err();

        assert!(matches!(err, ComputeError::InvalidArgument(_)));
    }
}
