use sea_orm::DatabaseConnection;

use crate::{EngineError, ResultEngine};

mod orders;
mod reports;
mod transactions;
mod wallets;

/// Run a block inside a DB transaction, committing on success and rolling back on error.
///
/// The block is evaluated as an async block, so `?` and `return` inside it
/// leave the block and still go through the rollback.
macro_rules! with_tx {
    ($self:expr, |$tx:ident| $body:expr) => {{
        let result: $crate::ResultEngine<_> = match $crate::error::StepExt::step(
            sea_orm::TransactionTrait::begin(&$self.database).await,
            "begin tx",
        ) {
            Ok($tx) => {
                let outcome = async {
                    let out: $crate::ResultEngine<_> = $body;
                    out
                }
                .await;
                match outcome {
                    Ok(value) => $crate::error::StepExt::step($tx.commit().await, "commit tx")
                        .map(|()| value),
                    Err(err) => {
                        if let Err(rollback_err) = $tx.rollback().await {
                            tracing::error!("rollback failed: {rollback_err}");
                        }
                        Err(err)
                    }
                }
            }
            Err(err) => Err(err),
        };
        result
    }};
}

pub(crate) use with_tx;

#[derive(Debug)]
pub struct Engine {
    database: DatabaseConnection,
}

impl Engine {
    /// Return a builder for `Engine`. Help to build the struct.
    pub fn builder() -> EngineBuilder {
        EngineBuilder::default()
    }
}

/// Logs a failed operation: store failures as errors, rejected requests as
/// plain information.
fn logged<T>(operation: &'static str, result: ResultEngine<T>) -> ResultEngine<T> {
    if let Err(err) = &result {
        if err.is_internal() {
            tracing::error!("{operation} failed: {err}");
        } else {
            tracing::info!("{operation} rejected: {err}");
        }
    }
    result
}

fn ensure_positive(value: i64, label: &str) -> ResultEngine<()> {
    if value <= 0 {
        return Err(EngineError::InvalidAmount(format!(
            "{label} must be > 0, got {value}"
        )));
    }
    Ok(())
}

/// The builder for `Engine`
#[derive(Default)]
pub struct EngineBuilder {
    database: DatabaseConnection,
}

impl EngineBuilder {
    /// Pass the required database
    pub fn database(mut self, db: DatabaseConnection) -> EngineBuilder {
        self.database = db;
        self
    }

    /// Construct `Engine`
    pub async fn build(self) -> ResultEngine<Engine> {
        Ok(Engine {
            database: self.database,
        })
    }
}
