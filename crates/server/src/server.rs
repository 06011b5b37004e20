use std::{future::Future, sync::Arc};

use axum::{Router, routing::post};

use crate::{orders, report, transactions, wallets};
use engine::Engine;

#[derive(Clone)]
pub struct ServerState {
    pub engine: Arc<Engine>,
}

/// Every operation is a `POST` with a JSON body under `/v1`.
pub fn router(engine: Arc<Engine>) -> Router {
    let v1 = Router::new()
        .route("/getBalance", post(wallets::get_balance))
        .route("/add", post(wallets::add))
        .route("/reserve", post(orders::reserve))
        .route("/writeOff", post(orders::write_off))
        .route("/cancel", post(orders::cancel))
        .route("/getTransactions", post(transactions::list))
        .route("/getTransactionsByTime", post(transactions::list_by_time))
        .route("/getReport", post(report::get));

    Router::new()
        .nest("/v1", v1)
        .with_state(ServerState { engine })
}

/// Binds `addr` and serves until `shutdown` resolves.
pub async fn run(
    engine: Engine,
    addr: &str,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> Result<(), std::io::Error> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    run_with_listener(engine, listener, shutdown).await
}

pub async fn run_with_listener(
    engine: Engine,
    listener: tokio::net::TcpListener,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> Result<(), std::io::Error> {
    let addr = listener.local_addr()?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, router(Arc::new(engine)))
        .with_graceful_shutdown(shutdown)
        .await
}
