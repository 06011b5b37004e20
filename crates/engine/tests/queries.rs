use chrono::{Duration, Utc};
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Statement};

use engine::{
    CancelCmd, Direction, Engine, EngineError, ReserveCmd, SortBy, TransactionPage, WriteOffCmd,
};
use migration::MigratorTrait;

async fn engine_with_db() -> (Engine, DatabaseConnection) {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    let engine = Engine::builder()
        .database(db.clone())
        .build()
        .await
        .unwrap();
    (engine, db)
}

fn amounts(transactions: &[engine::Transaction]) -> Vec<i64> {
    transactions.iter().map(|t| t.amount).collect()
}

#[tokio::test]
async fn listing_by_amount_ascending_describes_each_entry() {
    let (engine, _db) = engine_with_db().await;
    engine.add(1, 1000).await.unwrap();
    engine.reserve(ReserveCmd::new(1, 1, 77, 400)).await.unwrap();

    let page = TransactionPage::new(10)
        .sort_by(SortBy::Amount)
        .direction(Direction::Asc);
    let transactions = engine.transactions(1, &page).await.unwrap();

    assert_eq!(amounts(&transactions), vec![400, 1000]);
    assert_eq!(transactions[0].description, "Funds reserved for order 77");
    assert_eq!(transactions[1].description, "Incoming transfer");
    assert!(transactions.iter().all(|t| !t.description.is_empty()));
}

#[tokio::test]
async fn listing_pages_do_not_overlap() {
    let (engine, _db) = engine_with_db().await;
    for amount in [100, 200, 300, 400, 500] {
        engine.add(1, amount).await.unwrap();
    }

    let first = TransactionPage::new(2)
        .sort_by(SortBy::Amount)
        .direction(Direction::Desc);
    let second = first.clone().offset(2);
    let third = first.clone().offset(4);

    assert_eq!(
        amounts(&engine.transactions(1, &first).await.unwrap()),
        vec![500, 400]
    );
    assert_eq!(
        amounts(&engine.transactions(1, &second).await.unwrap()),
        vec![300, 200]
    );
    assert_eq!(
        amounts(&engine.transactions(1, &third).await.unwrap()),
        vec![100]
    );
}

#[tokio::test]
async fn default_listing_is_newest_first() {
    let (engine, _db) = engine_with_db().await;
    engine.add(1, 1000).await.unwrap();
    engine.reserve(ReserveCmd::new(1, 2, 5, 300)).await.unwrap();
    engine
        .write_off(WriteOffCmd::new(1, 2, 5, 250))
        .await
        .unwrap();
    engine.reserve(ReserveCmd::new(1, 2, 6, 100)).await.unwrap();
    engine.cancel(CancelCmd::new(1, 6)).await.unwrap();

    let transactions = engine
        .transactions(1, &TransactionPage::new(10))
        .await
        .unwrap();
    let descriptions: Vec<_> = transactions
        .iter()
        .map(|t| t.description.as_str())
        .collect();
    assert_eq!(
        descriptions,
        vec![
            "Reservation cancelled for order 6",
            "Funds reserved for order 6",
            "Funds written off for order 5",
            "Funds reserved for order 5",
            "Incoming transfer",
        ]
    );
    assert!(
        transactions
            .windows(2)
            .all(|pair| pair[0].created_at >= pair[1].created_at)
    );
}

#[tokio::test]
async fn listing_rejects_bad_requests() {
    let (engine, _db) = engine_with_db().await;

    assert_eq!(
        engine.transactions(1, &TransactionPage::new(10)).await,
        Err(EngineError::WalletNotFound(1))
    );

    engine.add(1, 1000).await.unwrap();
    assert!(matches!(
        engine.transactions(1, &TransactionPage::new(0)).await,
        Err(EngineError::InvalidAmount(_))
    ));
    let now = Utc::now();
    assert!(matches!(
        engine
            .transactions_by_time(1, now, now - Duration::hours(1))
            .await,
        Err(EngineError::InvalidAmount(_))
    ));
}

#[tokio::test]
async fn listing_by_time_uses_inclusive_bounds() {
    let (engine, _db) = engine_with_db().await;
    let start = Utc::now() - Duration::seconds(1);
    engine.add(1, 1000).await.unwrap();
    engine.reserve(ReserveCmd::new(1, 1, 3, 200)).await.unwrap();
    let end = Utc::now() + Duration::seconds(1);

    let transactions = engine.transactions_by_time(1, start, end).await.unwrap();
    assert_eq!(amounts(&transactions), vec![200, 1000]);

    let all = engine
        .transactions(1, &TransactionPage::new(10))
        .await
        .unwrap();
    let newest = all[0].created_at;
    let only_newest = engine
        .transactions_by_time(1, newest, newest)
        .await
        .unwrap();
    assert_eq!(amounts(&only_newest), vec![200]);

    let before = engine
        .transactions_by_time(1, start - Duration::days(1), start - Duration::hours(1))
        .await
        .unwrap();
    assert!(before.is_empty());
}

#[tokio::test]
async fn unreadable_rows_degrade_instead_of_hiding_the_page() {
    let (engine, db) = engine_with_db().await;
    engine.add(1, 1000).await.unwrap();
    let wallet_id = engine.wallet(1).await.unwrap().id;

    let backend = db.get_database_backend();
    for (kind, payload, amount) in [("bonus", "{}", 5_i64), ("reservation", "oops", 6_i64)] {
        db.execute(Statement::from_sql_and_values(
            backend,
            "INSERT INTO transactions (wallet_id, type, payload, amount, created_at) \
             VALUES (?, ?, ?, ?, ?)",
            vec![
                wallet_id.into(),
                kind.into(),
                payload.into(),
                amount.into(),
                Utc::now().into(),
            ],
        ))
        .await
        .unwrap();
    }

    let page = TransactionPage::new(10)
        .sort_by(SortBy::Amount)
        .direction(Direction::Asc);
    let transactions = engine.transactions(1, &page).await.unwrap();
    let descriptions: Vec<_> = transactions
        .iter()
        .map(|t| t.description.as_str())
        .collect();
    assert_eq!(
        descriptions,
        vec![
            "Unknown transaction type",
            "Funds reserved for order",
            "Incoming transfer"
        ]
    );
}
