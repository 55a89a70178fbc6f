use sea_orm_migration::prelude::*;

use super::m20250301_000001_create_users::Users;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Festivals::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Festivals::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Festivals::Name).string().not_null())
                    .col(ColumnDef::new(Festivals::Description).text().not_null())
                    .col(ColumnDef::new(Festivals::Location).string().not_null())
                    .col(ColumnDef::new(Festivals::Region).string().not_null())
                    .col(ColumnDef::new(Festivals::Address).string().not_null())
                    .col(ColumnDef::new(Festivals::StartDate).date().not_null())
                    .col(ColumnDef::new(Festivals::EndDate).date().not_null())
                    .col(ColumnDef::new(Festivals::ImageUrl).string().null())
                    .col(ColumnDef::new(Festivals::Website).string().null())
                    .col(ColumnDef::new(Festivals::EntryFee).string().null())
                    .col(ColumnDef::new(Festivals::Latitude).double().not_null())
                    .col(ColumnDef::new(Festivals::Longitude).double().not_null())
                    .col(ColumnDef::new(Festivals::CreatedBy).string().null())
                    .col(
                        ColumnDef::new(Festivals::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Festivals::UpdatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_festivals_created_by")
                            .from(Festivals::Table, Festivals::CreatedBy)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_festivals_region")
                    .table(Festivals::Table)
                    .col(Festivals::Region)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_festivals_start_date")
                    .table(Festivals::Table)
                    .col(Festivals::StartDate)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Festivals::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Festivals {
    Table,
    Id,
    Name,
    Description,
    Location,
    Region,
    Address,
    StartDate,
    EndDate,
    ImageUrl,
    Website,
    EntryFee,
    Latitude,
    Longitude,
    CreatedBy,
    CreatedAt,
    UpdatedAt,
}
