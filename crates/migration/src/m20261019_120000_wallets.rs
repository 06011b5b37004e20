use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Wallets::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Wallets::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Wallets::UserId)
                            .big_integer()
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(Wallets::Balance)
                            .big_integer()
                            .not_null()
                            .default(0)
                            .check(Expr::col(Wallets::Balance).gte(0)),
                    )
                    .col(
                        ColumnDef::new(Wallets::Reservation)
                            .big_integer()
                            .not_null()
                            .default(0)
                            .check(Expr::col(Wallets::Reservation).gte(0)),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Wallets::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Wallets {
    Table,
    Id,
    UserId,
    Balance,
    Reservation,
}
