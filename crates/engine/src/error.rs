//! The module contains the error the engine can throw.
//!
//! Business errors are distinct variants so callers match on the kind:
//!
//! - [`WalletNotFound`] the user has no wallet yet.
//! - [`InsufficientFunds`] the balance cannot cover a reservation.
//! - [`OrderNotFound`] no order matches the given key.
//! - [`InvalidOrderState`] the order already left the `reserved` state.
//!
//! Everything the store reports is wrapped in [`Database`] together with the
//! step that failed.
//!
//!  [`WalletNotFound`]: EngineError::WalletNotFound
//!  [`InsufficientFunds`]: EngineError::InsufficientFunds
//!  [`OrderNotFound`]: EngineError::OrderNotFound
//!  [`InvalidOrderState`]: EngineError::InvalidOrderState
//!  [`Database`]: EngineError::Database
use sea_orm::{DbErr, RuntimeErr, sqlx};
use thiserror::Error;

use crate::ResultEngine;

/// Engine custom errors.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("wallet not found for user {0}")]
    WalletNotFound(i64),
    #[error("Insufficient funds: {0}")]
    InsufficientFunds(String),
    #[error("order not found: {0}")]
    OrderNotFound(String),
    #[error("\"{0}\" already present!")]
    ExistingOrder(String),
    #[error("Invalid order state: {0}")]
    InvalidOrderState(String),
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
    #[error("Invalid period: {0}")]
    InvalidPeriod(String),
    #[error("Invalid payload: {0}")]
    Payload(String),
    #[error("{step}: {source}")]
    Database {
        step: &'static str,
        #[source]
        source: DbErr,
    },
}

impl EngineError {
    /// Returns `true` for failures that are not the caller's fault.
    pub fn is_internal(&self) -> bool {
        matches!(self, Self::Database { .. } | Self::Payload(_))
    }
}

impl From<DbErr> for EngineError {
    fn from(source: DbErr) -> Self {
        Self::Database {
            step: "database",
            source,
        }
    }
}

impl PartialEq for EngineError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::WalletNotFound(a), Self::WalletNotFound(b)) => a == b,
            (Self::InsufficientFunds(a), Self::InsufficientFunds(b)) => a == b,
            (Self::OrderNotFound(a), Self::OrderNotFound(b)) => a == b,
            (Self::ExistingOrder(a), Self::ExistingOrder(b)) => a == b,
            (Self::InvalidOrderState(a), Self::InvalidOrderState(b)) => a == b,
            (Self::InvalidAmount(a), Self::InvalidAmount(b)) => a == b,
            (Self::InvalidPeriod(a), Self::InvalidPeriod(b)) => a == b,
            (Self::Payload(a), Self::Payload(b)) => a == b,
            (
                Self::Database {
                    step: a,
                    source: a_err,
                },
                Self::Database {
                    step: b,
                    source: b_err,
                },
            ) => a == b && a_err.to_string() == b_err.to_string(),
            _ => false,
        }
    }
}

/// Attaches the name of the failing step to a store error.
pub(crate) trait StepExt<T> {
    fn step(self, step: &'static str) -> ResultEngine<T>;
}

impl<T> StepExt<T> for Result<T, DbErr> {
    fn step(self, step: &'static str) -> ResultEngine<T> {
        self.map_err(|source| EngineError::Database { step, source })
    }
}

/// Returns `true` when the store rejected a row because of a `CHECK`
/// constraint (Postgres `23514`, SQLite extended code `275`).
pub(crate) fn is_check_violation(err: &DbErr) -> bool {
    let runtime = match err {
        DbErr::Exec(runtime) | DbErr::Query(runtime) => runtime,
        _ => return false,
    };
    match runtime {
        RuntimeErr::SqlxError(sqlx::Error::Database(db_err)) => {
            matches!(db_err.code().as_deref(), Some("23514") | Some("275"))
                || db_err.message().contains("CHECK constraint failed")
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn business_errors_are_not_internal() {
        assert!(!EngineError::WalletNotFound(1).is_internal());
        assert!(!EngineError::InsufficientFunds("x".to_string()).is_internal());
        assert!(!EngineError::OrderNotFound("x".to_string()).is_internal());
        assert!(!EngineError::InvalidOrderState("x".to_string()).is_internal());
    }

    #[test]
    fn step_keeps_the_failing_step() {
        let result: Result<(), DbErr> = Err(DbErr::Custom("boom".to_string()));
        let err = result.step("append transaction").unwrap_err();

        assert!(err.is_internal());
        let message = err.to_string();
        assert!(message.starts_with("append transaction: "));
        assert!(message.contains("boom"));
    }

    #[test]
    fn custom_errors_are_not_check_violations() {
        assert!(!is_check_violation(&DbErr::Custom("CHECK".to_string())));
        assert!(!is_check_violation(&DbErr::RecordNotFound("x".to_string())));
    }
}
