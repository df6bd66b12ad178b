use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create assets table
        manager
            .create_table(
                Table::create()
                    .table(Assets::Table)
                    .if_not_exists()
                    .col(pk_auto(Assets::Id))
                    .col(string(Assets::Name))
                    .col(string_null(Assets::Description))
                    .col(string(Assets::AssetType))
                    .col(decimal(Assets::Cost).decimal_len(16, 4))
                    .col(date(Assets::PurchaseDate))
                    .col(string(Assets::Location))
                    .col(string(Assets::Condition))
                    .col(string(Assets::Status).string_len(10))
                    .col(string(Assets::DepreciationMethod).string_len(24))
                    .col(integer(Assets::UsefulLife))
                    .col(decimal(Assets::SalvageValue).decimal_len(16, 4))
                    .col(integer(Assets::Version).default(1))
                    .col(timestamp_with_time_zone(Assets::CreatedAt))
                    .col(timestamp_with_time_zone(Assets::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        // Create depreciation_records table
        manager
            .create_table(
                Table::create()
                    .table(DepreciationRecords::Table)
                    .if_not_exists()
                    .col(pk_auto(DepreciationRecords::Id))
                    .col(integer(DepreciationRecords::AssetId))
                    .col(integer(DepreciationRecords::Year))
                    .col(decimal(DepreciationRecords::Amount).decimal_len(16, 4))
                    .col(decimal(DepreciationRecords::AccumulatedDepreciation).decimal_len(16, 4))
                    .col(decimal(DepreciationRecords::BookValue).decimal_len(16, 4))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_depreciation_record_asset")
                            .from(DepreciationRecords::Table, DepreciationRecords::AssetId)
                            .to(Assets::Table, Assets::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Regeneration upserts on (asset_id, year)
        manager
            .create_index(
                Index::create()
                    .name("idx_depreciation_records_asset_year")
                    .table(DepreciationRecords::Table)
                    .col(DepreciationRecords::AssetId)
                    .col(DepreciationRecords::Year)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // Create disposals table
        manager
            .create_table(
                Table::create()
                    .table(Disposals::Table)
                    .if_not_exists()
                    .col(pk_auto(Disposals::Id))
                    .col(integer(Disposals::AssetId))
                    .col(date(Disposals::DisposalDate))
                    .col(decimal(Disposals::DisposalValue).decimal_len(16, 4))
                    .col(string(Disposals::Reason))
                    .col(string(Disposals::Status).string_len(10))
                    .col(timestamp_with_time_zone(Disposals::CreatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_disposal_asset")
                            .from(Disposals::Table, Disposals::AssetId)
                            .to(Assets::Table, Assets::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Disposals::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(DepreciationRecords::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Assets::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Assets {
    Table,
    Id,
    Name,
    Description,
    AssetType,
    Cost,
    PurchaseDate,
    Location,
    Condition,
    Status,
    DepreciationMethod,
    UsefulLife,
    SalvageValue,
    Version,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum DepreciationRecords {
    Table,
    Id,
    AssetId,
    Year,
    Amount,
    AccumulatedDepreciation,
    BookValue,
}

#[derive(DeriveIden)]
enum Disposals {
    Table,
    Id,
    AssetId,
    DisposalDate,
    DisposalValue,
    Reason,
    Status,
    CreatedAt,
}
