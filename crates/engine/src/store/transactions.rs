use chrono::{DateTime, Utc};
use sea_orm::{
    ColumnTrait, ConnectionTrait, EntityTrait, Order, QueryFilter, QueryOrder, QuerySelect,
};

use crate::{
    Direction, ResultEngine, SortBy, Transaction, TransactionKind, TransactionPage,
    TransactionPayload, error::StepExt, transactions,
};

pub(crate) async fn append_transaction<C: ConnectionTrait>(
    db: &C,
    wallet_id: i32,
    kind: TransactionKind,
    payload: &TransactionPayload,
    amount: i64,
) -> ResultEngine<()> {
    let entry = transactions::ActiveModel::entry(wallet_id, kind, payload, amount)?;
    transactions::Entity::insert(entry)
        .exec(db)
        .await
        .step("append transaction")?;
    Ok(())
}

pub(crate) async fn transactions_page<C: ConnectionTrait>(
    db: &C,
    wallet_id: i32,
    page: &TransactionPage,
) -> ResultEngine<Vec<Transaction>> {
    let column = match page.sort_by {
        SortBy::Amount => transactions::Column::Amount,
        SortBy::Date => transactions::Column::CreatedAt,
    };
    let order = match page.direction {
        Direction::Asc => Order::Asc,
        Direction::Desc => Order::Desc,
    };
    let models = transactions::Entity::find()
        .filter(transactions::Column::WalletId.eq(wallet_id))
        .order_by(column, order.clone())
        .order_by(transactions::Column::Id, order)
        .limit(page.limit)
        .offset(page.offset)
        .all(db)
        .await
        .step("list transactions")?;
    Ok(models.into_iter().map(Transaction::from).collect())
}

/// Newest first, both bounds inclusive.
pub(crate) async fn transactions_in_range<C: ConnectionTrait>(
    db: &C,
    wallet_id: i32,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> ResultEngine<Vec<Transaction>> {
    let models = transactions::Entity::find()
        .filter(transactions::Column::WalletId.eq(wallet_id))
        .filter(transactions::Column::CreatedAt.gte(start))
        .filter(transactions::Column::CreatedAt.lte(end))
        .order_by_desc(transactions::Column::CreatedAt)
        .order_by_desc(transactions::Column::Id)
        .all(db)
        .await
        .step("list transactions by time")?;
    Ok(models.into_iter().map(Transaction::from).collect())
}
