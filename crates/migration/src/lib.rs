pub use sea_orm_migration::prelude::*;

mod m20261019_120000_wallets;
mod m20261019_121000_orders;
mod m20261019_122000_transactions;
mod m20261019_123000_report;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20261019_120000_wallets::Migration),
            Box::new(m20261019_121000_orders::Migration),
            Box::new(m20261019_122000_transactions::Migration),
            Box::new(m20261019_123000_report::Migration),
        ]
    }
}
