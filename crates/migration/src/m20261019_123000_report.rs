use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Report::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Report::Period).string_len(7).not_null())
                    .col(ColumnDef::new(Report::ServiceId).big_integer().not_null())
                    .col(
                        ColumnDef::new(Report::TotalRevenue)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .primary_key(Index::create().col(Report::Period).col(Report::ServiceId))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Report::Table).to_owned())
            .await
    }
}

/// Monthly revenue per service.
#[derive(Iden)]
pub enum Report {
    Table,
    Period,
    ServiceId,
    TotalRevenue,
}
