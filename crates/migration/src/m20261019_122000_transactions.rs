use sea_orm_migration::prelude::*;

use super::m20261019_120000_wallets::Wallets;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Transactions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Transactions::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Transactions::WalletId).integer().not_null())
                    .col(ColumnDef::new(Transactions::Type).string().not_null())
                    .col(ColumnDef::new(Transactions::Payload).text().not_null())
                    .col(ColumnDef::new(Transactions::Amount).big_integer().not_null())
                    .col(
                        ColumnDef::new(Transactions::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-transactions-wallet_id")
                            .from(Transactions::Table, Transactions::WalletId)
                            .to(Wallets::Table, Wallets::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-transactions-wallet_id-created_at")
                    .table(Transactions::Table)
                    .col(Transactions::WalletId)
                    .col(Transactions::CreatedAt)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Transactions::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Transactions {
    Table,
    Id,
    WalletId,
    Type,
    Payload,
    Amount,
    CreatedAt,
}
