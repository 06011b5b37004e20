use crate::{
    EngineError, ResultEngine, TransactionKind, TransactionPayload, Wallet, store, wallets,
};

use super::{Engine, ensure_positive, logged, with_tx};

impl Engine {
    /// Tops up the wallet of `user_id` by `amount`, creating the wallet on
    /// the first deposit. Returns the new balance.
    pub async fn add(&self, user_id: i64, amount: i64) -> ResultEngine<i64> {
        ensure_positive(amount, "amount")?;
        let result = with_tx!(self, |db_tx| {
            let wallet_id = store::upsert_wallet(&db_tx, user_id).await?;
            let balance = store::deposit(&db_tx, wallet_id, amount).await?;
            store::append_transaction(
                &db_tx,
                wallet_id,
                TransactionKind::IncomingTransfer,
                &TransactionPayload::enrollment(),
                amount,
            )
            .await?;
            Ok((wallet_id, balance))
        });
        let (wallet_id, balance) = logged("add", result)?;
        tracing::info!(wallet_id, amount, balance, "funds added");
        Ok(balance)
    }

    /// Spendable balance of `user_id`. Reserved funds are not included.
    pub async fn balance(&self, user_id: i64) -> ResultEngine<i64> {
        let wallet = logged("balance", self.require_wallet(user_id).await)?;
        Ok(wallet.balance)
    }

    /// Return a [`Wallet`] (snapshot from DB).
    pub async fn wallet(&self, user_id: i64) -> ResultEngine<Wallet> {
        let wallet = logged("wallet", self.require_wallet(user_id).await)?;
        Ok(Wallet::from(wallet))
    }

    pub(super) async fn require_wallet(&self, user_id: i64) -> ResultEngine<wallets::Model> {
        store::find_wallet(&self.database, user_id)
            .await?
            .ok_or(EngineError::WalletNotFound(user_id))
    }
}
