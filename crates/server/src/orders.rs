//! Reservation lifecycle endpoints.

use api_types::{
    order::{Cancel, Reserve, WriteOff},
    wallet::Balance,
};
use axum::{Json, extract::State};
use engine::{CancelCmd, ReserveCmd, WriteOffCmd};

use crate::{ServerResult, ok, server::ServerState};

pub async fn reserve(
    State(state): State<ServerState>,
    Json(payload): Json<Reserve>,
) -> ServerResult<Balance> {
    let cmd = ReserveCmd::new(
        payload.user_id,
        payload.service_id,
        payload.order_id,
        payload.price,
    );
    let balance = state.engine.reserve(cmd).await?;
    ok(Balance { balance })
}

pub async fn write_off(
    State(state): State<ServerState>,
    Json(payload): Json<WriteOff>,
) -> ServerResult<Balance> {
    let cmd = WriteOffCmd::new(
        payload.user_id,
        payload.service_id,
        payload.order_id,
        payload.price,
    );
    let balance = state.engine.write_off(cmd).await?;
    ok(Balance { balance })
}

pub async fn cancel(
    State(state): State<ServerState>,
    Json(payload): Json<Cancel>,
) -> ServerResult<Balance> {
    let cmd = CancelCmd::new(payload.user_id, payload.order_id);
    let balance = state.engine.cancel(cmd).await?;
    ok(Balance { balance })
}
