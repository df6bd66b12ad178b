use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;

use super::asset;

/// Units an asset produced during one calendar year.
/// Units-of-production schedules are built from these rows.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "production_usages")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub asset_id: i32,
    pub year: i32,
    #[sea_orm(column_type = "Decimal(Some((16, 4)))")]
    pub units_produced: Decimal,
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
