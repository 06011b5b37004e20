//! The module contains `Wallet` struct and its entity.

use sea_orm::entity::prelude::*;

/// A wallet.
///
/// One wallet per user. `balance` is the spendable amount, `reservation` is
/// the amount currently held for pending orders. Both are in minor currency
/// units and never negative.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Wallet {
    pub id: i32,
    pub user_id: i64,
    pub balance: i64,
    pub reservation: i64,
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "wallets")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub user_id: i64,
    pub balance: i64,
    pub reservation: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::orders::Entity")]
    Orders,
    #[sea_orm(has_many = "super::transactions::Entity")]
    Transactions,
}

impl Related<super::orders::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Orders.def()
    }
}

impl Related<super::transactions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Transactions.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Wallet {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            user_id: model.user_id,
            balance: model.balance,
            reservation: model.reservation,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wallet_keeps_balance_and_reservation_apart() {
        let wallet = Wallet::from(Model {
            id: 1,
            user_id: 7,
            balance: 600,
            reservation: 400,
        });

        assert_eq!(wallet.user_id, 7);
        assert_eq!((wallet.balance, wallet.reservation), (600, 400));
    }
}
