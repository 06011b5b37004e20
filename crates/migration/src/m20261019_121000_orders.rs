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
                    .table(Orders::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Orders::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Orders::WalletId).integer().not_null())
                    .col(ColumnDef::new(Orders::ExternalId).big_integer().not_null())
                    .col(ColumnDef::new(Orders::ServiceId).big_integer().not_null())
                    .col(ColumnDef::new(Orders::Status).string().not_null())
                    .col(
                        ColumnDef::new(Orders::Amount)
                            .big_integer()
                            .not_null()
                            .check(Expr::col(Orders::Amount).gte(0)),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-orders-wallet_id")
                            .from(Orders::Table, Orders::WalletId)
                            .to(Wallets::Table, Wallets::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-orders-external_id-service_id")
                    .table(Orders::Table)
                    .col(Orders::ExternalId)
                    .col(Orders::ServiceId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(OrderTransactions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(OrderTransactions::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(OrderTransactions::OrderId)
                            .integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(OrderTransactions::Type).string().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-order_transactions-order_id")
                            .from(OrderTransactions::Table, OrderTransactions::OrderId)
                            .to(Orders::Table, Orders::Id),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(OrderTransactions::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Orders::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Orders {
    Table,
    Id,
    WalletId,
    ExternalId,
    ServiceId,
    Status,
    Amount,
}

#[derive(Iden)]
pub enum OrderTransactions {
    Table,
    Id,
    OrderId,
    Type,
}
