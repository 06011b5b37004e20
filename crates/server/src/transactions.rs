//! Transaction history endpoints.

use api_types::transaction::{
    Direction, GetTransactions, GetTransactionsByTime, SortBy, TransactionList, TransactionView,
};
use axum::{Json, extract::State};
use engine::{Transaction, TransactionPage};

use crate::{ServerResult, ok, server::ServerState};

pub async fn list(
    State(state): State<ServerState>,
    Json(payload): Json<GetTransactions>,
) -> ServerResult<TransactionList> {
    let page = TransactionPage::new(payload.limit)
        .offset(payload.offset)
        .sort_by(match payload.sort_by {
            SortBy::Amount => engine::SortBy::Amount,
            SortBy::Date => engine::SortBy::Date,
        })
        .direction(match payload.direction {
            Direction::Asc => engine::Direction::Asc,
            Direction::Desc => engine::Direction::Desc,
        });
    let transactions = state.engine.transactions(payload.user_id, &page).await?;
    ok(to_list(transactions))
}

pub async fn list_by_time(
    State(state): State<ServerState>,
    Json(payload): Json<GetTransactionsByTime>,
) -> ServerResult<TransactionList> {
    let transactions = state
        .engine
        .transactions_by_time(payload.user_id, payload.start, payload.end)
        .await?;
    ok(to_list(transactions))
}

fn to_list(transactions: Vec<Transaction>) -> TransactionList {
    TransactionList {
        transactions: transactions
            .into_iter()
            .map(|t| TransactionView {
                description: t.description,
                amount: t.amount,
                created_at: t.created_at,
            })
            .collect(),
    }
}
