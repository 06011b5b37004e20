//! Ledger store: one function per store statement.
//!
//! Every function takes the connection it runs on, so the operations pass
//! their open `DatabaseTransaction` through each step. Balance and
//! reservation arithmetic is evaluated by the store in a single statement;
//! nothing here reads a balance and writes back a computed value.

mod orders;
mod report;
mod transactions;
mod wallets;

pub(crate) use orders::{
    append_order_log, ensure_no_live_order, find_order, insert_order, transition_order,
};
pub(crate) use report::{add_report_record, report_for_period};
pub(crate) use transactions::{append_transaction, transactions_in_range, transactions_page};
pub(crate) use wallets::{deposit, find_wallet, release_reservation, reserve_funds, upsert_wallet};

use sea_orm::{ConnectionTrait, DbErr, QueryResult, StatementBuilder};

use crate::{ResultEngine, error::StepExt};

/// Runs a statement that reads back one row with `RETURNING`.
async fn returning_one<C, S>(
    db: &C,
    stmt: &S,
    step: &'static str,
) -> ResultEngine<Option<QueryResult>>
where
    C: ConnectionTrait,
    S: StatementBuilder,
{
    let backend = db.get_database_backend();
    db.query_one(backend.build(stmt)).await.step(step)
}

/// Reads an `i64` column out of a returned row.
fn column_i64(row: &QueryResult, column: &str, step: &'static str) -> ResultEngine<i64> {
    row.try_get::<i64>("", column).step(step)
}

/// Turns a sea-query builder error into a store error.
fn build_err(err: impl std::fmt::Display) -> DbErr {
    DbErr::Custom(err.to_string())
}
