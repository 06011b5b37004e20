//! Wallet ledger engine.
//!
//! Tracks per-user balances and reservations and records every money
//! movement (top-up, reservation, write-off, cancellation) against a
//! relational store. Each mutating operation is a single unit of work: the
//! wallet arithmetic, the order transition and the audit rows either all
//! commit or none do.

pub use commands::{CancelCmd, Direction, ReserveCmd, SortBy, TransactionPage, WriteOffCmd};
pub use error::EngineError;
pub use ops::{Engine, EngineBuilder};
pub use orders::{Order, OrderStatus};
pub use report::{Period, ServiceRevenue};
pub use services::{service_display_name, service_name};
pub use transactions::{Transaction, TransactionKind, TransactionPayload};
pub use wallets::Wallet;

mod commands;
mod error;
mod ops;
mod order_transactions;
mod orders;
mod report;
mod services;
mod store;
mod transactions;
mod wallets;

type ResultEngine<T> = Result<T, EngineError>;
