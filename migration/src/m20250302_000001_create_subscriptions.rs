use sea_orm_migration::prelude::*;

use super::m20250301_000001_create_users::Users;
use super::m20250301_000002_create_festivals::Festivals;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Composite primary keys make both subscription collections sets
        manager
            .create_table(
                Table::create()
                    .table(UserRegionSubscriptions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(UserRegionSubscriptions::UserId)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(UserRegionSubscriptions::Region)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(UserRegionSubscriptions::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .primary_key(
                        Index::create()
                            .col(UserRegionSubscriptions::UserId)
                            .col(UserRegionSubscriptions::Region),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_region_subscriptions_user_id")
                            .from(UserRegionSubscriptions::Table, UserRegionSubscriptions::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(UserFestivalSubscriptions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(UserFestivalSubscriptions::UserId)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(UserFestivalSubscriptions::FestivalId)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(UserFestivalSubscriptions::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .primary_key(
                        Index::create()
                            .col(UserFestivalSubscriptions::UserId)
                            .col(UserFestivalSubscriptions::FestivalId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_festival_subscriptions_user_id")
                            .from(UserFestivalSubscriptions::Table, UserFestivalSubscriptions::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_festival_subscriptions_festival_id")
                    .table(UserFestivalSubscriptions::Table)
                    .col(UserFestivalSubscriptions::FestivalId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(UserFestivalSubscriptions::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(UserRegionSubscriptions::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum UserRegionSubscriptions {
    Table,
    UserId,
    Region,
    CreatedAt,
}

#[derive(DeriveIden)]
enum UserFestivalSubscriptions {
    Table,
    UserId,
    FestivalId,
    CreatedAt,
}
