//! Orders: the reservation-to-settlement lifecycle of a caller's order.

use sea_orm::entity::prelude::*;

use crate::{EngineError, ResultEngine};

/// Status of an [`Order`].
///
/// `Reserved` is the only non-terminal state and the only one from which a
/// write-off or a cancellation may proceed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OrderStatus {
    Reserved,
    WrittenOff,
    Cancelled,
}

impl OrderStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Reserved => "reserved",
            Self::WrittenOff => "written_off",
            Self::Cancelled => "cancelled",
        }
    }

    pub fn is_terminal(self) -> bool {
        !matches!(self, Self::Reserved)
    }
}

impl TryFrom<&str> for OrderStatus {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "reserved" => Ok(Self::Reserved),
            "written_off" => Ok(Self::WrittenOff),
            "cancelled" => Ok(Self::Cancelled),
            other => Err(EngineError::InvalidOrderState(format!(
                "unknown order status: {other}"
            ))),
        }
    }
}

/// An order as seen by the engine.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Order {
    pub id: i32,
    pub wallet_id: i32,
    pub external_id: i64,
    pub service_id: i64,
    /// Reserved amount while `Reserved`, settled amount once `WrittenOff`.
    pub amount: i64,
    pub status: OrderStatus,
}

impl Order {
    /// Fails unless the order can still be written off or cancelled.
    pub(crate) fn ensure_reserved(&self) -> ResultEngine<()> {
        if self.status.is_terminal() {
            return Err(EngineError::InvalidOrderState(format!(
                "order {} is {}",
                self.external_id,
                self.status.as_str()
            )));
        }
        Ok(())
    }

    /// Fails when `price` is more than what was reserved.
    pub(crate) fn ensure_covers(&self, price: i64) -> ResultEngine<()> {
        if price > self.amount {
            return Err(EngineError::InvalidAmount(format!(
                "price {price} exceeds reserved amount {} of order {}",
                self.amount, self.external_id
            )));
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "orders")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub wallet_id: i32,
    pub external_id: i64,
    pub service_id: i64,
    pub status: String,
    pub amount: i64,
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
    #[sea_orm(has_many = "super::order_transactions::Entity")]
    OrderTransactions,
}

impl Related<super::wallets::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Wallets.def()
    }
}

impl Related<super::order_transactions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::OrderTransactions.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl TryFrom<Model> for Order {
    type Error = EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: model.id,
            wallet_id: model.wallet_id,
            external_id: model.external_id,
            service_id: model.service_id,
            amount: model.amount,
            status: OrderStatus::try_from(model.status.as_str())?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn order(status: OrderStatus) -> Order {
        Order {
            id: 1,
            wallet_id: 1,
            external_id: 42,
            service_id: 1,
            amount: 400,
            status,
        }
    }

    #[test]
    fn status_round_trips_through_storage_strings() {
        for status in [
            OrderStatus::Reserved,
            OrderStatus::WrittenOff,
            OrderStatus::Cancelled,
        ] {
            assert_eq!(OrderStatus::try_from(status.as_str()), Ok(status));
        }
    }

    #[test]
    fn unknown_status_is_rejected() {
        assert!(matches!(
            OrderStatus::try_from("refunded"),
            Err(EngineError::InvalidOrderState(_))
        ));
    }

    #[test]
    fn only_reserved_orders_can_move() {
        assert!(order(OrderStatus::Reserved).ensure_reserved().is_ok());
        assert_eq!(
            order(OrderStatus::WrittenOff).ensure_reserved(),
            Err(EngineError::InvalidOrderState(
                "order 42 is written_off".to_string()
            ))
        );
        assert!(order(OrderStatus::Cancelled).ensure_reserved().is_err());
    }

    #[test]
    fn settlement_cannot_exceed_reservation() {
        let reserved = order(OrderStatus::Reserved);
        assert!(reserved.ensure_covers(400).is_ok());
        assert!(reserved.ensure_covers(1).is_ok());
        assert!(matches!(
            reserved.ensure_covers(401),
            Err(EngineError::InvalidAmount(_))
        ));
    }
}
