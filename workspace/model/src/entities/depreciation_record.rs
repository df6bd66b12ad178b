use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;

use super::asset;

/// One row of an asset's depreciation schedule.
/// There is at most one record per asset and calendar year.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "depreciation_records")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub asset_id: i32,
    /// Absolute calendar year, not the ordinal year of service.
    pub year: i32,
    /// Depreciation charged in this year.
    #[sea_orm(column_type = "Decimal(Some((16, 4)))")]
    pub amount: Decimal,
    #[sea_orm(column_type = "Decimal(Some((16, 4)))")]
    pub accumulated_depreciation: Decimal,
    #[sea_orm(column_type = "Decimal(Some((16, 4)))")]
    pub book_value: Decimal,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "asset::Entity",
        from = "Column::AssetId",
        to = "asset::Column::Id",
        on_delete = "Cascade"
    )]
    Asset,
}

impl Related<asset::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Asset.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
