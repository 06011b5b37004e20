//! Balance and top-up endpoints.

use api_types::wallet::{Add, Balance, GetBalance};
use axum::{Json, extract::State};

use crate::{ServerResult, ok, server::ServerState};

pub async fn get_balance(
    State(state): State<ServerState>,
    Json(payload): Json<GetBalance>,
) -> ServerResult<Balance> {
    let balance = state.engine.balance(payload.user_id).await?;
    ok(Balance { balance })
}

pub async fn add(
    State(state): State<ServerState>,
    Json(payload): Json<Add>,
) -> ServerResult<Balance> {
    let balance = state.engine.add(payload.user_id, payload.cash).await?;
    ok(Balance { balance })
}
