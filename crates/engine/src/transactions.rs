//! Wallet transaction log.
//!
//! Every money movement appends one row. Rows are never updated or deleted;
//! listing turns them into display records with a human-readable
//! description.

use chrono::{DateTime, Utc};
use sea_orm::{ActiveValue, entity::prelude::*};
use serde::{Deserialize, Serialize};

use crate::{EngineError, ResultEngine};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionKind {
    IncomingTransfer,
    Reservation,
    WriteOff,
    Cancel,
}

impl TransactionKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::IncomingTransfer => "incoming_transfer",
            Self::Reservation => "reservation",
            Self::WriteOff => "write_off",
            Self::Cancel => "cancel",
        }
    }

    /// Description shown when the payload cannot be decoded.
    fn bare_description(self) -> &'static str {
        match self {
            Self::IncomingTransfer => "Incoming transfer",
            Self::Reservation => "Funds reserved for order",
            Self::WriteOff => "Funds written off for order",
            Self::Cancel => "Reservation cancelled for order",
        }
    }
}

impl TryFrom<&str> for TransactionKind {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "incoming_transfer" => Ok(Self::IncomingTransfer),
            "reservation" => Ok(Self::Reservation),
            "write_off" => Ok(Self::WriteOff),
            "cancel" => Ok(Self::Cancel),
            other => Err(EngineError::Payload(format!(
                "invalid transaction kind: {other}"
            ))),
        }
    }
}

/// Structured payload stored with each transaction.
///
/// Top-ups carry `{"type":"enrollment"}`, order movements carry
/// `{"order_id":N}` where `N` is the caller's external order id.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TransactionPayload {
    Order {
        order_id: i64,
    },
    Marker {
        #[serde(rename = "type")]
        marker: String,
    },
}

impl TransactionPayload {
    pub fn enrollment() -> Self {
        Self::Marker {
            marker: "enrollment".to_string(),
        }
    }

    pub fn order(external_id: i64) -> Self {
        Self::Order {
            order_id: external_id,
        }
    }

    pub fn order_id(&self) -> Option<i64> {
        match self {
            Self::Order { order_id } => Some(*order_id),
            Self::Marker { .. } => None,
        }
    }

    pub(crate) fn to_json(&self) -> ResultEngine<String> {
        serde_json::to_string(self).map_err(|err| EngineError::Payload(err.to_string()))
    }

    pub(crate) fn from_json(raw: &str) -> ResultEngine<Self> {
        serde_json::from_str(raw).map_err(|err| EngineError::Payload(err.to_string()))
    }
}

/// A transaction as shown to the wallet owner.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub description: String,
    pub amount: i64,
    pub created_at: DateTime<Utc>,
}

/// Builds the description for a stored `(type, payload)` pair.
///
/// Never fails: unknown types and undecodable payloads degrade to a generic
/// text so a single bad row does not hide the rest of a page.
pub(crate) fn describe(kind: &str, payload: &str) -> String {
    let Ok(kind) = TransactionKind::try_from(kind) else {
        tracing::warn!("unknown transaction type {kind:?}");
        return "Unknown transaction type".to_string();
    };
    if kind == TransactionKind::IncomingTransfer {
        return kind.bare_description().to_string();
    }
    match TransactionPayload::from_json(payload).map(|p| p.order_id()) {
        Ok(Some(order_id)) => format!("{} {order_id}", kind.bare_description()),
        Ok(None) | Err(_) => {
            tracing::warn!(
                "transaction payload {payload:?} has no order id for {}",
                kind.as_str()
            );
            kind.bare_description().to_string()
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "transactions")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub wallet_id: i32,
    #[sea_orm(column_name = "type")]
    pub kind: String,
    pub payload: String,
    pub amount: i64,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::wallets::Entity",
        from = "Column::WalletId",
        to = "super::wallets::Column::Id",
        on_update = "NoAction",
        on_delete = "NoAction"
    )]
    Wallets,
}

impl Related<super::wallets::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Wallets.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl ActiveModel {
    pub(crate) fn entry(
        wallet_id: i32,
        kind: TransactionKind,
        payload: &TransactionPayload,
        amount: i64,
    ) -> ResultEngine<Self> {
        Ok(Self {
            id: ActiveValue::NotSet,
            wallet_id: ActiveValue::Set(wallet_id),
            kind: ActiveValue::Set(kind.as_str().to_string()),
            payload: ActiveValue::Set(payload.to_json()?),
            amount: ActiveValue::Set(amount),
            created_at: ActiveValue::Set(Utc::now()),
        })
    }
}

impl From<Model> for Transaction {
    fn from(model: Model) -> Self {
        Self {
            description: describe(&model.kind, &model.payload),
            amount: model.amount,
            created_at: model.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payloads_use_the_stored_shapes() {
        assert_eq!(
            TransactionPayload::enrollment().to_json().unwrap(),
            r#"{"type":"enrollment"}"#
        );
        assert_eq!(
            TransactionPayload::order(17).to_json().unwrap(),
            r#"{"order_id":17}"#
        );
        assert_eq!(
            TransactionPayload::from_json(r#"{"order_id":17}"#).unwrap(),
            TransactionPayload::order(17)
        );
        assert_eq!(TransactionPayload::enrollment().order_id(), None);
    }

    #[test]
    fn descriptions_interpolate_the_order() {
        assert_eq!(
            describe("incoming_transfer", r#"{"type":"enrollment"}"#),
            "Incoming transfer"
        );
        assert_eq!(
            describe("reservation", r#"{"order_id":5}"#),
            "Funds reserved for order 5"
        );
        assert_eq!(
            describe("write_off", r#"{"order_id":5}"#),
            "Funds written off for order 5"
        );
        assert_eq!(
            describe("cancel", r#"{"order_id":5}"#),
            "Reservation cancelled for order 5"
        );
    }

    #[test]
    fn bad_rows_degrade_instead_of_failing() {
        assert_eq!(describe("refund", "{}"), "Unknown transaction type");
        assert_eq!(
            describe("reservation", "not json"),
            "Funds reserved for order"
        );
        assert_eq!(
            describe("cancel", r#"{"type":"enrollment"}"#),
            "Reservation cancelled for order"
        );
    }

    #[test]
    fn kinds_parse_from_storage() {
        assert_eq!(
            TransactionKind::try_from("write_off"),
            Ok(TransactionKind::WriteOff)
        );
        assert!(TransactionKind::try_from("bonus").is_err());
    }
}
