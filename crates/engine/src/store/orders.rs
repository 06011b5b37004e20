use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter,
    QueryOrder, sea_query::Expr,
};

use crate::{
    EngineError, Order, OrderStatus, ResultEngine, ReserveCmd, error::StepExt,
    order_transactions, orders,
};

pub(crate) async fn insert_order<C: ConnectionTrait>(
    db: &C,
    wallet_id: i32,
    cmd: &ReserveCmd,
) -> ResultEngine<Order> {
    let model = orders::ActiveModel {
        id: ActiveValue::NotSet,
        wallet_id: ActiveValue::Set(wallet_id),
        external_id: ActiveValue::Set(cmd.external_id),
        service_id: ActiveValue::Set(cmd.service_id),
        status: ActiveValue::Set(OrderStatus::Reserved.as_str().to_string()),
        amount: ActiveValue::Set(cmd.price),
    }
    .insert(db)
    .await
    .step("create order")?;
    Order::try_from(model)
}

/// Order of the wallet with the given external id, optionally narrowed to
/// one service. A `reserved` order wins over settled ones; ties go to the
/// most recent.
pub(crate) async fn find_order<C: ConnectionTrait>(
    db: &C,
    wallet_id: i32,
    external_id: i64,
    service_id: Option<i64>,
) -> ResultEngine<Option<Order>> {
    let mut query = orders::Entity::find()
        .filter(orders::Column::WalletId.eq(wallet_id))
        .filter(orders::Column::ExternalId.eq(external_id));
    if let Some(service_id) = service_id {
        query = query.filter(orders::Column::ServiceId.eq(service_id));
    }
    let live = Expr::col((orders::Entity, orders::Column::Status))
        .eq(OrderStatus::Reserved.as_str());
    query
        .order_by_desc(live)
        .order_by_desc(orders::Column::Id)
        .one(db)
        .await
        .step("find order")?
        .map(Order::try_from)
        .transpose()
}

/// Fails when a `reserved` order already exists for the pair.
pub(crate) async fn ensure_no_live_order<C: ConnectionTrait>(
    db: &C,
    external_id: i64,
    service_id: i64,
) -> ResultEngine<()> {
    let live = orders::Entity::find()
        .filter(orders::Column::ExternalId.eq(external_id))
        .filter(orders::Column::ServiceId.eq(service_id))
        .filter(orders::Column::Status.eq(OrderStatus::Reserved.as_str()))
        .one(db)
        .await
        .step("find live order")?;
    match live {
        Some(_) => Err(EngineError::ExistingOrder(format!(
            "order {external_id} for service {service_id}"
        ))),
        None => Ok(()),
    }
}

/// Moves a `reserved` order to `status` and stores the final amount.
///
/// The update only matches while the order is still `reserved`, so of two
/// racing transitions exactly one succeeds.
pub(crate) async fn transition_order<C: ConnectionTrait>(
    db: &C,
    order: &Order,
    status: OrderStatus,
    amount: i64,
) -> ResultEngine<()> {
    let result = orders::Entity::update_many()
        .col_expr(orders::Column::Status, Expr::value(status.as_str()))
        .col_expr(orders::Column::Amount, Expr::value(amount))
        .filter(orders::Column::Id.eq(order.id))
        .filter(orders::Column::Status.eq(OrderStatus::Reserved.as_str()))
        .exec(db)
        .await
        .step("update order")?;
    if result.rows_affected == 0 {
        return Err(EngineError::InvalidOrderState(format!(
            "order {} is no longer reserved",
            order.external_id
        )));
    }
    Ok(())
}

pub(crate) async fn append_order_log<C: ConnectionTrait>(
    db: &C,
    order_id: i32,
    status: OrderStatus,
) -> ResultEngine<()> {
    order_transactions::Entity::insert(order_transactions::ActiveModel::entry(order_id, status))
        .exec(db)
        .await
        .step("append order log")?;
    Ok(())
}
