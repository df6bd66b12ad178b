use crate::entity_iden::EntityIden;
use model::entities::prelude::*;
use model::entities::{asset, production_usage};
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Lifetime production estimate for units-of-production assets
        manager
            .alter_table(
                Table::alter()
                    .table(Asset::table())
                    .add_column(
                        ColumnDef::new(Asset::column(asset::Column::TotalEstimatedUnits))
                            .decimal_len(16, 4)
                            .null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(ProductionUsage::table())
                    .if_not_exists()
                    .col(pk_auto(ProductionUsage::column(production_usage::Column::Id)))
                    .col(integer(ProductionUsage::column(production_usage::Column::AssetId)))
                    .col(integer(ProductionUsage::column(production_usage::Column::Year)))
                    .col(
                        decimal(ProductionUsage::column(production_usage::Column::UnitsProduced))
                            .decimal_len(16, 4),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_production_usage_asset")
                            .from(
                                ProductionUsage::table(),
                                ProductionUsage::column(production_usage::Column::AssetId),
                            )
                            .to(Asset::table(), Asset::column(asset::Column::Id))
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_production_usages_asset_year")
                    .table(ProductionUsage::table())
                    .col(ProductionUsage::column(production_usage::Column::AssetId))
                    .col(ProductionUsage::column(production_usage::Column::Year))
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ProductionUsage::table()).to_owned())
            .await?;

        manager
            .alter_table(
                Table::alter()
                    .table(Asset::table())
                    .drop_column(Asset::column(asset::Column::TotalEstimatedUnits))
                    .to_owned(),
            )
            .await?;

        Ok(())
    }
}
