//! Create `cars` table.
//! `id` uses AUTOINCREMENT so identities of deleted rows are never handed out again.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Cars::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Cars::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(big_integer(Cars::InventoryId).not_null())
                    .col(string(Cars::Make).not_null())
                    .col(string(Cars::Model).not_null())
                    .col(integer(Cars::Year).not_null())
                    .col(string(Cars::Color).not_null())
                    .col(string(Cars::Vin).not_null())
                    .col(timestamp(Cars::CreatedAt).not_null().default(Expr::current_timestamp()))
                    .col(timestamp(Cars::UpdatedAt).not_null().default(Expr::current_timestamp()))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_cars_inventory_id")
                    .table(Cars::Table)
                    .col(Cars::InventoryId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Cars::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Cars {
    Table,
    Id,
    InventoryId,
    Make,
    Model,
    Year,
    Color,
    Vin,
    CreatedAt,
    UpdatedAt,
}
