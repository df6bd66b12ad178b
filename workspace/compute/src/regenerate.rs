//! Persists depreciation schedules.
//!
//! Every write to an asset's schedule runs in one transaction and claims the
//! asset's version token first, so two writers racing on the same asset cannot
//! interleave their rows: the loser gets [`ComputeError::Conflict`] and its
//! transaction is rolled back.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use model::entities::asset::DepreciationMethod;
use model::entities::{asset, depreciation_record, production_usage};
use rust_decimal::Decimal;
use sea_orm::sea_query::{Expr, OnConflict};
use sea_orm::{
    ColumnTrait, Condition, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};
use tracing::{debug, info, instrument, trace, warn};

use crate::depreciation::{AssetFinancials, calculate};
use crate::error::{ComputeError, Result};
use crate::schedule::{ScheduleEntry, build_schedule};

/// Regenerates and records depreciation schedules relative to a fixed "today".
#[derive(Debug, Clone, Copy)]
pub struct ScheduleRegenerator {
    today: NaiveDate,
}

impl ScheduleRegenerator {
    pub fn new_with_today(today: NaiveDate) -> Self {
        Self { today }
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    /// Last calendar year included in regenerated schedules.
    pub fn current_year(&self) -> i32 {
        self.today.year()
    }

    /// Replaces the stored schedule of `asset_id` with one rebuilt from the
    /// asset's current parameters.
    #[instrument(skip(self, db))]
    pub async fn regenerate<C>(
        &self,
        db: &C,
        asset_id: i32,
    ) -> Result<Vec<depreciation_record::Model>>
    where
        C: ConnectionTrait + TransactionTrait,
    {
        let asset = find_asset(db, asset_id).await?;
        self.regenerate_asset(db, &asset).await
    }

    /// Same as [`Self::regenerate`] for an asset that was already loaded.
    /// Fails with a conflict when the stored asset no longer has `asset.version`.
    #[instrument(skip(self, db, asset), fields(asset_id = asset.id, version = asset.version))]
    pub async fn regenerate_asset<C>(
        &self,
        db: &C,
        asset: &asset::Model,
    ) -> Result<Vec<depreciation_record::Model>>
    where
        C: ConnectionTrait + TransactionTrait,
    {
        let financials = AssetFinancials::from_asset(asset);

        let txn = db.begin().await?;
        let usage = load_usage(&txn, asset.id).await?;
        let schedule = build_schedule(&financials, self.current_year(), &usage)?;

        claim_version(&txn, asset).await?;
        upsert_records(&txn, asset.id, &schedule).await?;
        prune_records(&txn, asset.id, &schedule).await?;

        let records = schedule_of(&txn, asset.id).await?;
        txn.commit().await?;

        info!(
            "Regenerated {} depreciation records for asset {} ({}..={})",
            records.len(),
            asset.id,
            financials.purchase_year,
            records.last().map(|r| r.year).unwrap_or(financials.purchase_year)
        );
        Ok(records)
    }

    /// Regenerates every stored asset. Returns how many schedules were rebuilt.
    #[instrument(skip(self, db))]
    pub async fn regenerate_all<C>(&self, db: &C) -> Result<usize>
    where
        C: ConnectionTrait + TransactionTrait,
    {
        let assets = asset::Entity::find()
            .order_by_asc(asset::Column::Id)
            .all(db)
            .await?;
        debug!("Regenerating schedules for {} assets", assets.len());

        for asset in &assets {
            self.regenerate_asset(db, asset).await?;
        }
        Ok(assets.len())
    }

    /// Computes a single calendar year through the calculator and stores it,
    /// replacing any record for the same year.
    ///
    /// For units-of-production assets the supplied usage is stored and the
    /// schedule is rebuilt from all stored usage, so accumulated depreciation
    /// keeps counting earlier years. A `total_estimated_units` override is
    /// saved on the asset; without one the asset's own estimate is used.
    #[instrument(skip(self, db))]
    pub async fn record_year<C>(
        &self,
        db: &C,
        asset_id: i32,
        year: i32,
        units_produced: Option<Decimal>,
        total_estimated_units: Option<Decimal>,
    ) -> Result<depreciation_record::Model>
    where
        C: ConnectionTrait + TransactionTrait,
    {
        let asset = find_asset(db, asset_id).await?;

        let year_of_service = year - asset.purchase_year() + 1;
        if year_of_service < 1 {
            return Err(ComputeError::invalid(format!(
                "year {} precedes the purchase year {}",
                year,
                asset.purchase_year()
            )));
        }

        let total_units = total_estimated_units.or(asset.total_estimated_units);
        let result = calculate(
            asset.cost,
            asset.salvage_value,
            asset.useful_life,
            asset.depreciation_method,
            year_of_service,
            units_produced,
            total_units,
        )?;

        let txn = db.begin().await?;
        claim_version(&txn, &asset).await?;

        if asset.depreciation_method == DepreciationMethod::UnitsOfProduction {
            if let Some(total) = total_estimated_units {
                if asset.total_estimated_units != Some(total) {
                    store_total_units(&txn, asset.id, total).await?;
                }
            }
            if let Some(units) = units_produced {
                upsert_usage(&txn, asset.id, year, units).await?;
            }

            let financials = AssetFinancials {
                total_estimated_units: total_units,
                ..AssetFinancials::from_asset(&asset)
            };
            let usage = load_usage(&txn, asset.id).await?;
            let schedule = build_schedule(&financials, self.current_year().max(year), &usage)?;
            upsert_records(&txn, asset.id, &schedule).await?;
        } else {
            depreciation_record::Entity::insert(record_row(
                asset.id,
                year,
                result.yearly_depreciation,
                result.accumulated_depreciation,
                result.book_value,
            ))
            .on_conflict(record_conflict())
            .exec_without_returning(&txn)
            .await?;
        }

        let record = depreciation_record::Entity::find()
            .filter(depreciation_record::Column::AssetId.eq(asset.id))
            .filter(depreciation_record::Column::Year.eq(year))
            .one(&txn)
            .await?
            .ok_or_else(|| {
                ComputeError::Runtime(format!(
                    "record for asset {} year {} missing after upsert",
                    asset.id, year
                ))
            })?;
        txn.commit().await?;

        info!("Recorded depreciation for asset {} year {}", asset.id, year);
        Ok(record)
    }
}

/// Loads an asset or fails with [`ComputeError::NotFound`].
pub async fn find_asset<C: ConnectionTrait>(db: &C, asset_id: i32) -> Result<asset::Model> {
    asset::Entity::find_by_id(asset_id)
        .one(db)
        .await?
        .ok_or_else(|| {
            warn!("Asset with ID {} not found", asset_id);
            ComputeError::NotFound(format!("asset {} not found", asset_id))
        })
}

/// The stored schedule of an existing asset, ascending by year.
pub async fn stored_schedule<C: ConnectionTrait>(
    db: &C,
    asset_id: i32,
) -> Result<Vec<depreciation_record::Model>> {
    find_asset(db, asset_id).await?;
    schedule_of(db, asset_id).await
}

async fn schedule_of<C: ConnectionTrait>(
    db: &C,
    asset_id: i32,
) -> Result<Vec<depreciation_record::Model>> {
    Ok(depreciation_record::Entity::find()
        .filter(depreciation_record::Column::AssetId.eq(asset_id))
        .order_by_asc(depreciation_record::Column::Year)
        .all(db)
        .await?)
}

async fn load_usage<C: ConnectionTrait>(db: &C, asset_id: i32) -> Result<BTreeMap<i32, Decimal>> {
    let rows = production_usage::Entity::find()
        .filter(production_usage::Column::AssetId.eq(asset_id))
        .all(db)
        .await?;
    trace!("Loaded {} usage rows for asset {}", rows.len(), asset_id);
    Ok(rows
        .into_iter()
        .map(|row| (row.year, row.units_produced))
        .collect())
}

/// Bumps the asset version if it still matches the one that was read.
async fn claim_version<C: ConnectionTrait>(db: &C, asset: &asset::Model) -> Result<()> {
    let result = asset::Entity::update_many()
        .col_expr(
            asset::Column::Version,
            Expr::col(asset::Column::Version).add(1),
        )
        .filter(asset::Column::Id.eq(asset.id))
        .filter(asset::Column::Version.eq(asset.version))
        .exec(db)
        .await?;

    if result.rows_affected == 0 {
        warn!(
            "Asset {} changed while its schedule was being written (expected version {})",
            asset.id, asset.version
        );
        return Err(ComputeError::Conflict(format!(
            "asset {} was modified concurrently, expected version {}",
            asset.id, asset.version
        )));
    }
    Ok(())
}

fn record_row(
    asset_id: i32,
    year: i32,
    amount: Decimal,
    accumulated_depreciation: Decimal,
    book_value: Decimal,
) -> depreciation_record::ActiveModel {
    depreciation_record::ActiveModel {
        asset_id: Set(asset_id),
        year: Set(year),
        amount: Set(amount),
        accumulated_depreciation: Set(accumulated_depreciation),
        book_value: Set(book_value),
        ..Default::default()
    }
}

fn record_conflict() -> OnConflict {
    OnConflict::columns([
        depreciation_record::Column::AssetId,
        depreciation_record::Column::Year,
    ])
    .update_columns([
        depreciation_record::Column::Amount,
        depreciation_record::Column::AccumulatedDepreciation,
        depreciation_record::Column::BookValue,
    ])
    .to_owned()
}

async fn upsert_records<C: ConnectionTrait>(
    db: &C,
    asset_id: i32,
    schedule: &[ScheduleEntry],
) -> Result<()> {
    let rows = schedule.iter().map(|entry| {
        record_row(
            asset_id,
            entry.year,
            entry.amount,
            entry.accumulated_depreciation,
            entry.book_value,
        )
    });

    let written = depreciation_record::Entity::insert_many(rows)
        .on_conflict(record_conflict())
        .exec_without_returning(db)
        .await?;
    trace!("Upserted {} depreciation rows for asset {}", written, asset_id);
    Ok(())
}

/// Removes rows that fall outside the regenerated year range.
async fn prune_records<C: ConnectionTrait>(
    db: &C,
    asset_id: i32,
    schedule: &[ScheduleEntry],
) -> Result<()> {
    let (Some(first), Some(last)) = (schedule.first(), schedule.last()) else {
        return Ok(());
    };

    let pruned = depreciation_record::Entity::delete_many()
        .filter(depreciation_record::Column::AssetId.eq(asset_id))
        .filter(
            Condition::any()
                .add(depreciation_record::Column::Year.lt(first.year))
                .add(depreciation_record::Column::Year.gt(last.year)),
        )
        .exec(db)
        .await?;
    if pruned.rows_affected > 0 {
        debug!(
            "Pruned {} stale depreciation rows for asset {}",
            pruned.rows_affected, asset_id
        );
    }
    Ok(())
}

async fn store_total_units<C: ConnectionTrait>(
    db: &C,
    asset_id: i32,
    total: Decimal,
) -> Result<()> {
    asset::Entity::update_many()
        .col_expr(asset::Column::TotalEstimatedUnits, Expr::value(total))
        .filter(asset::Column::Id.eq(asset_id))
        .exec(db)
        .await?;
    debug!("Asset {} now estimates {} total units", asset_id, total);
    Ok(())
}

async fn upsert_usage<C: ConnectionTrait>(
    db: &C,
    asset_id: i32,
    year: i32,
    units_produced: Decimal,
) -> Result<()> {
    production_usage::Entity::insert(production_usage::ActiveModel {
        asset_id: Set(asset_id),
        year: Set(year),
        units_produced: Set(units_produced),
        ..Default::default()
    })
    .on_conflict(
        OnConflict::columns([
            production_usage::Column::AssetId,
            production_usage::Column::Year,
        ])
        .update_column(production_usage::Column::UnitsProduced)
        .to_owned(),
    )
    .exec_without_returning(db)
    .await?;
    Ok(())
}
