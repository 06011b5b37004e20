//! Command structs for engine operations.
//!
//! These types group parameters for the order operations
//! (reserve/write-off/cancel) and transaction listing, keeping call sites
//! readable and avoiding long argument lists.

use chrono::{DateTime, Utc};

/// Hold funds for an order.
#[derive(Clone, Debug)]
pub struct ReserveCmd {
    pub user_id: i64,
    pub service_id: i64,
    pub external_id: i64,
    pub price: i64,
}

impl ReserveCmd {
    #[must_use]
    pub fn new(user_id: i64, service_id: i64, external_id: i64, price: i64) -> Self {
        Self {
            user_id,
            service_id,
            external_id,
            price,
        }
    }
}

/// Settle a reserved order.
///
/// `price` may be lower than the reserved amount; the difference goes back
/// to the balance.
#[derive(Clone, Debug)]
pub struct WriteOffCmd {
    pub user_id: i64,
    pub service_id: i64,
    pub external_id: i64,
    pub price: i64,
    /// Selects the report period.
    pub settled_at: DateTime<Utc>,
}

impl WriteOffCmd {
    #[must_use]
    pub fn new(user_id: i64, service_id: i64, external_id: i64, price: i64) -> Self {
        Self {
            user_id,
            service_id,
            external_id,
            price,
            settled_at: Utc::now(),
        }
    }

    #[must_use]
    pub fn settled_at(mut self, settled_at: DateTime<Utc>) -> Self {
        self.settled_at = settled_at;
        self
    }
}

/// Release a reserved order back to the balance.
#[derive(Clone, Debug)]
pub struct CancelCmd {
    pub user_id: i64,
    pub external_id: i64,
}

impl CancelCmd {
    #[must_use]
    pub fn new(user_id: i64, external_id: i64) -> Self {
        Self {
            user_id,
            external_id,
        }
    }
}

/// Sort key for transaction listing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SortBy {
    Amount,
    #[default]
    Date,
}

/// Sort direction for transaction listing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Direction {
    Asc,
    #[default]
    Desc,
}

/// One page of a wallet's transaction history.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransactionPage {
    pub limit: u64,
    pub offset: u64,
    pub sort_by: SortBy,
    pub direction: Direction,
}

impl TransactionPage {
    /// Newest first.
    #[must_use]
    pub fn new(limit: u64) -> Self {
        Self {
            limit,
            offset: 0,
            sort_by: SortBy::default(),
            direction: Direction::default(),
        }
    }

    #[must_use]
    pub fn offset(mut self, offset: u64) -> Self {
        self.offset = offset;
        self
    }

    #[must_use]
    pub fn sort_by(mut self, sort_by: SortBy) -> Self {
        self.sort_by = sort_by;
        self
    }

    #[must_use]
    pub fn direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }
}
