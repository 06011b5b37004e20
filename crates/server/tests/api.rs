use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use http_body_util::BodyExt;
use sea_orm::Database;
use serde_json::{Value, json};
use tower::ServiceExt;

use engine::Engine;
use migration::MigratorTrait;

async fn app() -> Router {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    let engine = Engine::builder().database(db).build().await.unwrap();
    server::router(Arc::new(engine))
}

async fn post(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}

#[tokio::test]
async fn order_lifecycle_over_http() {
    let app = app().await;

    let (status, body) = post(&app, "/v1/add", json!({ "userId": 1, "cash": 1000 })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "data": { "balance": 1000 } }));

    let (_, body) = post(
        &app,
        "/v1/reserve",
        json!({ "userId": 1, "serviceId": 1, "orderId": 1, "price": 400 }),
    )
    .await;
    assert_eq!(body["data"]["balance"], 600);

    let (_, body) = post(
        &app,
        "/v1/writeOff",
        json!({ "userId": 1, "serviceId": 1, "orderId": 1, "price": 300 }),
    )
    .await;
    assert_eq!(body["data"]["balance"], 700);

    let (_, body) = post(
        &app,
        "/v1/reserve",
        json!({ "userId": 1, "serviceId": 2, "orderId": 2, "price": 200 }),
    )
    .await;
    assert_eq!(body["data"]["balance"], 500);

    let (_, body) = post(&app, "/v1/cancel", json!({ "userId": 1, "orderId": 2 })).await;
    assert_eq!(body["data"]["balance"], 700);

    let (_, body) = post(&app, "/v1/getBalance", json!({ "userId": 1 })).await;
    assert_eq!(body, json!({ "data": { "balance": 700 } }));
}

#[tokio::test]
async fn business_errors_use_stable_codes() {
    let app = app().await;

    let (status, body) = post(&app, "/v1/getBalance", json!({ "userId": 5 })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["error"]["code"], "wallet_not_found");
    assert!(body.get("data").is_none());

    post(&app, "/v1/add", json!({ "userId": 5, "cash": 100 })).await;
    let (status, body) = post(
        &app,
        "/v1/reserve",
        json!({ "userId": 5, "serviceId": 1, "orderId": 9, "price": 1000 }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["error"]["code"], "not_enough_cash");

    let (_, body) = post(&app, "/v1/cancel", json!({ "userId": 5, "orderId": 9 })).await;
    assert_eq!(body["error"]["code"], "order_not_found");

    let (_, body) = post(&app, "/v1/add", json!({ "userId": 5, "cash": -1 })).await;
    assert_eq!(body["error"]["code"], "invalid_request");

    let (_, body) = post(&app, "/v1/getReport", json!({ "period": "2026-13" })).await;
    assert_eq!(body["error"]["code"], "invalid_request");
}

#[tokio::test]
async fn undecodable_bodies_are_rejected() {
    let app = app().await;
    let (status, _) = post(&app, "/v1/add", json!({ "userId": "one" })).await;
    assert!(status.is_client_error());
}

#[tokio::test]
async fn history_and_report_endpoints() {
    let app = app().await;
    post(&app, "/v1/add", json!({ "userId": 1, "cash": 1000 })).await;
    post(
        &app,
        "/v1/reserve",
        json!({ "userId": 1, "serviceId": 3, "orderId": 4, "price": 250 }),
    )
    .await;

    let (_, body) = post(
        &app,
        "/v1/getTransactions",
        json!({ "userId": 1, "limit": 10, "sortBy": "amount", "direction": "asc" }),
    )
    .await;
    let transactions = body["data"]["transactions"].as_array().unwrap();
    assert_eq!(transactions.len(), 2);
    assert_eq!(transactions[0]["amount"], 250);
    assert_eq!(transactions[0]["description"], "Funds reserved for order 4");
    assert_eq!(transactions[1]["description"], "Incoming transfer");
    assert!(transactions[0]["createdAt"].is_string());

    let (_, body) = post(
        &app,
        "/v1/getTransactionsByTime",
        json!({
            "userId": 1,
            "start": "2000-01-01T00:00:00Z",
            "end": "2999-01-01T00:00:00Z"
        }),
    )
    .await;
    assert_eq!(body["data"]["transactions"].as_array().unwrap().len(), 2);

    post(
        &app,
        "/v1/writeOff",
        json!({ "userId": 1, "serviceId": 3, "orderId": 4, "price": 250 }),
    )
    .await;
    let period = chrono::Utc::now().format("%Y-%m").to_string();
    let (_, body) = post(&app, "/v1/getReport", json!({ "period": period })).await;
    assert_eq!(body["data"]["period"], period);
    assert_eq!(
        body["data"]["rows"],
        json!([{ "serviceId": 3, "serviceName": "XL-advert", "totalRevenue": 250 }])
    );
}
