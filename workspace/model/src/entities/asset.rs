use chrono::NaiveDate;
use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;

use super::{depreciation_record, disposal, production_usage};

/// The depreciation method applied to an asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(24))")]
pub enum DepreciationMethod {
    #[sea_orm(string_value = "STRAIGHT_LINE")]
    StraightLine,
    #[sea_orm(string_value = "DECLINING_BALANCE")]
    DecliningBalance,
    #[sea_orm(string_value = "UNITS_OF_PRODUCTION")]
    UnitsOfProduction,
}

/// Lifecycle status of an asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(10))")]
pub enum AssetStatus {
    #[sea_orm(string_value = "ACTIVE")]
    Active,
    #[sea_orm(string_value = "INACTIVE")]
    Inactive,
    #[sea_orm(string_value = "DISPOSED")]
    Disposed,
}

/// A physical asset (equipment, vehicle, furniture, building) tracked for depreciation.
/// The asset is the aggregate root for its depreciation records, usage rows and disposals.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "assets")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    /// Free-form category, e.g. "Vehicle" or "Building".
    pub asset_type: String,
    /// Original acquisition price.
    #[sea_orm(column_type = "Decimal(Some((16, 4)))")]
    pub cost: Decimal,
    pub purchase_date: NaiveDate,
    pub location: String,
    pub condition: String,
    pub status: AssetStatus,
    pub depreciation_method: DepreciationMethod,
    /// Expected productive life in years.
    pub useful_life: i32,
    #[sea_orm(column_type = "Decimal(Some((16, 4)))")]
    pub salvage_value: Decimal,
    /// Lifetime production estimate, only used by the units-of-production method.
    #[sea_orm(column_type = "Decimal(Some((16, 4)))", nullable)]
    pub total_estimated_units: Option<Decimal>,
    /// Optimistic lock token. Bumped on every edit and every schedule regeneration.
    #[sea_orm(default_value = "1")]
    pub version: i32,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::depreciation_record::Entity")]
    DepreciationRecord,
    #[sea_orm(has_many = "super::production_usage::Entity")]
    ProductionUsage,
    #[sea_orm(has_many = "super::disposal::Entity")]
    Disposal,
}

impl Related<depreciation_record::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::DepreciationRecord.def()
    }
}

impl Related<production_usage::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ProductionUsage.def()
    }
}

impl Related<disposal::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Disposal.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Calendar year the asset was acquired.
    pub fn purchase_year(&self) -> i32 {
        use chrono::Datelike;
        self.purchase_date.year()
    }
}
