use sea_orm::{
    ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter,
    sea_query::{Expr, OnConflict, Query},
};

use crate::{
    EngineError, ResultEngine,
    error::{StepExt, is_check_violation},
    wallets,
};

use super::{build_err, column_i64, returning_one};

pub(crate) async fn find_wallet<C: ConnectionTrait>(
    db: &C,
    user_id: i64,
) -> ResultEngine<Option<wallets::Model>> {
    wallets::Entity::find()
        .filter(wallets::Column::UserId.eq(user_id))
        .one(db)
        .await
        .step("find wallet")
}

/// Inserts an empty wallet for `user_id` or returns the id of the existing
/// one. Safe to race: the unique `user_id` constraint decides the winner.
pub(crate) async fn upsert_wallet<C: ConnectionTrait>(db: &C, user_id: i64) -> ResultEngine<i32> {
    const STEP: &str = "create wallet";
    let mut stmt = Query::insert();
    stmt.into_table(wallets::Entity)
        .columns([
            wallets::Column::UserId,
            wallets::Column::Balance,
            wallets::Column::Reservation,
        ])
        .on_conflict(
            OnConflict::column(wallets::Column::UserId)
                .update_column(wallets::Column::UserId)
                .to_owned(),
        )
        .returning_col(wallets::Column::Id);
    stmt.values([Expr::value(user_id), Expr::value(0_i64), Expr::value(0_i64)])
        .map_err(build_err)
        .step(STEP)?;

    let row = returning_one(db, &stmt, STEP)
        .await?
        .ok_or(DbErr::RecordNotInserted)
        .step(STEP)?;
    row.try_get::<i32>("", "id").step(STEP)
}

/// `balance = balance + amount`, returning the new balance.
pub(crate) async fn deposit<C: ConnectionTrait>(
    db: &C,
    wallet_id: i32,
    amount: i64,
) -> ResultEngine<i64> {
    const STEP: &str = "deposit";
    let mut stmt = Query::update();
    stmt.table(wallets::Entity)
        .value(
            wallets::Column::Balance,
            Expr::col(wallets::Column::Balance).add(amount),
        )
        .and_where(Expr::col(wallets::Column::Id).eq(wallet_id))
        .returning_col(wallets::Column::Balance);

    let row = returning_one(db, &stmt, STEP)
        .await?
        .ok_or(DbErr::RecordNotUpdated)
        .step(STEP)?;
    column_i64(&row, "balance", STEP)
}

/// Moves `price` from balance to reservation in one guarded statement,
/// returning the new balance.
pub(crate) async fn reserve_funds<C: ConnectionTrait>(
    db: &C,
    wallet_id: i32,
    price: i64,
) -> ResultEngine<i64> {
    const STEP: &str = "reserve funds";
    let mut stmt = Query::update();
    stmt.table(wallets::Entity)
        .value(
            wallets::Column::Balance,
            Expr::col(wallets::Column::Balance).sub(price),
        )
        .value(
            wallets::Column::Reservation,
            Expr::col(wallets::Column::Reservation).add(price),
        )
        .and_where(Expr::col(wallets::Column::Id).eq(wallet_id))
        .and_where(Expr::col(wallets::Column::Balance).gte(price))
        .returning_col(wallets::Column::Balance);

    let not_enough = || EngineError::InsufficientFunds(format!("cannot reserve {price}"));
    match returning_one(db, &stmt, STEP).await {
        Ok(Some(row)) => column_i64(&row, "balance", STEP),
        Ok(None) => Err(not_enough()),
        Err(EngineError::Database { source, .. }) if is_check_violation(&source) => {
            Err(not_enough())
        }
        Err(err) => Err(err),
    }
}

/// Takes `reserved` off the reservation and returns `returned` of it to the
/// balance, returning the new balance.
pub(crate) async fn release_reservation<C: ConnectionTrait>(
    db: &C,
    wallet_id: i32,
    reserved: i64,
    returned: i64,
) -> ResultEngine<i64> {
    const STEP: &str = "release reservation";
    let mut stmt = Query::update();
    stmt.table(wallets::Entity)
        .value(
            wallets::Column::Reservation,
            Expr::col(wallets::Column::Reservation).sub(reserved),
        )
        .value(
            wallets::Column::Balance,
            Expr::col(wallets::Column::Balance).add(returned),
        )
        .and_where(Expr::col(wallets::Column::Id).eq(wallet_id))
        .returning_col(wallets::Column::Balance);

    let row = returning_one(db, &stmt, STEP)
        .await?
        .ok_or(DbErr::RecordNotUpdated)
        .step(STEP)?;
    column_i64(&row, "balance", STEP)
}
