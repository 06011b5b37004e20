use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Response envelope shared by every endpoint.
///
/// Exactly one of `data` and `error` is present.
#[derive(Debug, Serialize, Deserialize)]
pub struct Envelope<T> {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ApiError>,
}

impl<T> Envelope<T> {
    pub fn data(data: T) -> Self {
        Self {
            data: Some(data),
            error: None,
        }
    }

    pub fn error(error: ApiError) -> Self {
        Self {
            data: None,
            error: Some(error),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiError {
    pub code: String,
    pub message: String,
}

/// Stable error codes returned in [`ApiError::code`].
pub mod codes {
    pub const WALLET_NOT_FOUND: &str = "wallet_not_found";
    pub const NOT_ENOUGH_CASH: &str = "not_enough_cash";
    pub const ORDER_NOT_FOUND: &str = "order_not_found";
    pub const ORDER_ALREADY_RESERVED: &str = "order_already_reserved";
    pub const INVALID_ORDER_STATE: &str = "invalid_order_state";
    pub const INVALID_REQUEST: &str = "invalid_request";
    pub const INTERNAL_ERROR: &str = "internal_error";
}

pub mod wallet {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct GetBalance {
        pub user_id: i64,
    }

    /// Top-up request.
    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Add {
        pub user_id: i64,
        /// Amount in minor units.
        pub cash: i64,
    }

    /// Balance after the operation, reserved funds excluded.
    #[derive(Debug, PartialEq, Eq, Serialize, Deserialize)]
    pub struct Balance {
        pub balance: i64,
    }
}

pub mod order {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Reserve {
        pub user_id: i64,
        pub service_id: i64,
        pub order_id: i64,
        pub price: i64,
    }

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct WriteOff {
        pub user_id: i64,
        pub service_id: i64,
        pub order_id: i64,
        pub price: i64,
    }

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Cancel {
        pub user_id: i64,
        pub order_id: i64,
    }
}

pub mod transaction {
    use super::*;

    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "snake_case")]
    pub enum SortBy {
        Amount,
        #[default]
        Date,
    }

    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "snake_case")]
    pub enum Direction {
        Asc,
        #[default]
        Desc,
    }

    /// Paginated history request. Missing sort fields mean newest first.
    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct GetTransactions {
        pub user_id: i64,
        pub limit: u64,
        #[serde(default)]
        pub offset: u64,
        #[serde(default)]
        pub sort_by: SortBy,
        #[serde(default)]
        pub direction: Direction,
    }

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct GetTransactionsByTime {
        pub user_id: i64,
        pub start: DateTime<Utc>,
        pub end: DateTime<Utc>,
    }

    #[derive(Debug, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct TransactionView {
        pub description: String,
        pub amount: i64,
        pub created_at: DateTime<Utc>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct TransactionList {
        pub transactions: Vec<TransactionView>,
    }
}

pub mod report {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct GetReport {
        /// `YYYY-MM`.
        pub period: String,
    }

    #[derive(Debug, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ReportRow {
        pub service_id: i64,
        pub service_name: String,
        pub total_revenue: i64,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct Report {
        pub period: String,
        pub rows: Vec<ReportRow>,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn envelope_omits_the_absent_half() {
        let ok = serde_json::to_value(Envelope::data(wallet::Balance { balance: 5 })).unwrap();
        assert_eq!(ok, serde_json::json!({ "data": { "balance": 5 } }));

        let err = serde_json::to_value(Envelope::<wallet::Balance>::error(ApiError {
            code: codes::WALLET_NOT_FOUND.to_string(),
            message: "wallet not found".to_string(),
        }))
        .unwrap();
        assert_eq!(
            err,
            serde_json::json!({
                "error": { "code": "wallet_not_found", "message": "wallet not found" }
            })
        );
    }

    #[test]
    fn transaction_listing_defaults_to_newest_first() {
        let req: transaction::GetTransactions =
            serde_json::from_str(r#"{ "userId": 1, "limit": 10 }"#).unwrap();
        assert_eq!(req.offset, 0);
        assert_eq!(req.sort_by, transaction::SortBy::Date);
        assert_eq!(req.direction, transaction::Direction::Desc);

        let req: transaction::GetTransactions = serde_json::from_str(
            r#"{ "userId": 1, "limit": 10, "sortBy": "amount", "direction": "asc" }"#,
        )
        .unwrap();
        assert_eq!(req.sort_by, transaction::SortBy::Amount);
        assert_eq!(req.direction, transaction::Direction::Asc);
    }
}
