use chrono::{DateTime, Utc};

use crate::{EngineError, ResultEngine, Transaction, TransactionPage, store};

use super::{Engine, logged};

impl Engine {
    /// One page of the wallet history of `user_id`, ordered as requested.
    ///
    /// Ties on the sort key are broken by insertion order so pages do not
    /// overlap.
    pub async fn transactions(
        &self,
        user_id: i64,
        page: &TransactionPage,
    ) -> ResultEngine<Vec<Transaction>> {
        if page.limit == 0 {
            return Err(EngineError::InvalidAmount("limit must be > 0".to_string()));
        }
        let result = async {
            let wallet = self.require_wallet(user_id).await?;
            store::transactions_page(&self.database, wallet.id, page).await
        }
        .await;
        logged("list transactions", result)
    }

    /// Every transaction of `user_id` created in `[start, end]`, newest
    /// first.
    pub async fn transactions_by_time(
        &self,
        user_id: i64,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> ResultEngine<Vec<Transaction>> {
        if start > end {
            return Err(EngineError::InvalidAmount(format!(
                "start {start} is after end {end}"
            )));
        }
        let result = async {
            let wallet = self.require_wallet(user_id).await?;
            store::transactions_in_range(&self.database, wallet.id, start, end).await
        }
        .await;
        logged("list transactions by time", result)
    }
}
