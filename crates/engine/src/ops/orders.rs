use crate::{
    CancelCmd, EngineError, Order, OrderStatus, Period, ResultEngine, ReserveCmd,
    TransactionKind, TransactionPayload, WriteOffCmd, store,
};

use super::{Engine, ensure_positive, logged, with_tx};

impl Engine {
    /// Moves `price` from the balance to the reservation and opens a
    /// `reserved` order. Returns the balance left after the reservation.
    ///
    /// Unlike [`Engine::add`] this never creates a wallet.
    pub async fn reserve(&self, cmd: ReserveCmd) -> ResultEngine<i64> {
        ensure_positive(cmd.price, "price")?;
        let result = with_tx!(self, |db_tx| {
            let wallet = store::find_wallet(&db_tx, cmd.user_id)
                .await?
                .ok_or(EngineError::WalletNotFound(cmd.user_id))?;
            store::ensure_no_live_order(&db_tx, cmd.external_id, cmd.service_id).await?;
            let balance = store::reserve_funds(&db_tx, wallet.id, cmd.price).await?;
            let order = store::insert_order(&db_tx, wallet.id, &cmd).await?;
            store::append_order_log(&db_tx, order.id, OrderStatus::Reserved).await?;
            store::append_transaction(
                &db_tx,
                wallet.id,
                TransactionKind::Reservation,
                &TransactionPayload::order(cmd.external_id),
                cmd.price,
            )
            .await?;
            Ok((wallet.id, balance))
        });
        let (wallet_id, balance) = logged("reserve", result)?;
        tracing::info!(
            wallet_id,
            external_id = cmd.external_id,
            amount = cmd.price,
            balance,
            "funds reserved"
        );
        Ok(balance)
    }

    /// Settles a reserved order for `price`.
    ///
    /// The whole reserved amount leaves the reservation and the unused part
    /// (`reserved - price`) goes back to the balance. The service revenue of
    /// the settlement period grows by the reserved amount. Returns the new
    /// balance.
    pub async fn write_off(&self, cmd: WriteOffCmd) -> ResultEngine<i64> {
        ensure_positive(cmd.price, "price")?;
        let period = Period::from_datetime(cmd.settled_at);
        let result = with_tx!(self, |db_tx| {
            let wallet = store::find_wallet(&db_tx, cmd.user_id)
                .await?
                .ok_or(EngineError::WalletNotFound(cmd.user_id))?;
            let order = store::find_order(
                &db_tx,
                wallet.id,
                cmd.external_id,
                Some(cmd.service_id),
            )
            .await?
            .ok_or_else(|| {
                EngineError::OrderNotFound(format!(
                    "order {} for service {}",
                    cmd.external_id, cmd.service_id
                ))
            })?;
            order.ensure_reserved()?;
            order.ensure_covers(cmd.price)?;

            store::transition_order(&db_tx, &order, OrderStatus::WrittenOff, cmd.price).await?;
            store::append_order_log(&db_tx, order.id, OrderStatus::WrittenOff).await?;
            let returned = order.amount - cmd.price;
            let balance =
                store::release_reservation(&db_tx, wallet.id, order.amount, returned).await?;
            store::append_transaction(
                &db_tx,
                wallet.id,
                TransactionKind::WriteOff,
                &TransactionPayload::order(cmd.external_id),
                cmd.price,
            )
            .await?;
            store::add_report_record(&db_tx, period, cmd.service_id, order.amount).await?;
            Ok((wallet.id, balance))
        });
        let (wallet_id, balance) = logged("write off", result)?;
        tracing::info!(
            wallet_id,
            external_id = cmd.external_id,
            amount = cmd.price,
            balance,
            %period,
            "order written off"
        );
        Ok(balance)
    }

    /// Cancels a reserved order and returns the whole reservation to the
    /// balance. Returns the new balance.
    ///
    /// The order is looked up by external id alone; when several orders of
    /// the wallet share it, a still reserved one is used before the most
    /// recent settled one.
    pub async fn cancel(&self, cmd: CancelCmd) -> ResultEngine<i64> {
        let result = with_tx!(self, |db_tx| {
            let wallet = store::find_wallet(&db_tx, cmd.user_id)
                .await?
                .ok_or(EngineError::WalletNotFound(cmd.user_id))?;
            let order = store::find_order(&db_tx, wallet.id, cmd.external_id, None)
                .await?
                .ok_or_else(|| EngineError::OrderNotFound(format!("order {}", cmd.external_id)))?;
            order.ensure_reserved()?;

            store::transition_order(&db_tx, &order, OrderStatus::Cancelled, order.amount).await?;
            store::append_order_log(&db_tx, order.id, OrderStatus::Cancelled).await?;
            let balance =
                store::release_reservation(&db_tx, wallet.id, order.amount, order.amount).await?;
            store::append_transaction(
                &db_tx,
                wallet.id,
                TransactionKind::Cancel,
                &TransactionPayload::order(cmd.external_id),
                order.amount,
            )
            .await?;
            Ok((wallet.id, order.amount, balance))
        });
        let (wallet_id, amount, balance) = logged("cancel", result)?;
        tracing::info!(
            wallet_id,
            external_id = cmd.external_id,
            amount,
            balance,
            "reservation cancelled"
        );
        Ok(balance)
    }

    /// Return an [`Order`] (snapshot from DB).
    ///
    /// Same lookup as [`Engine::write_off`] when `service_id` is given, same
    /// as [`Engine::cancel`] otherwise.
    pub async fn order(
        &self,
        user_id: i64,
        external_id: i64,
        service_id: Option<i64>,
    ) -> ResultEngine<Order> {
        let wallet = self.require_wallet(user_id).await?;
        store::find_order(&self.database, wallet.id, external_id, service_id)
            .await?
            .ok_or_else(|| EngineError::OrderNotFound(format!("order {external_id}")))
    }
}
