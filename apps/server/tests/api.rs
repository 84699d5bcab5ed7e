//! End-to-end API tests: the real router over an in-memory database,
//! driven in-process with `tower::ServiceExt::oneshot`.

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use warung_db::{Database, DbConfig};
use warung_server::router;

async fn app() -> Router {
    let db = Database::new(DbConfig::in_memory()).await.unwrap();
    router(db)
}

/// Sends one request and returns (status, parsed JSON body).
async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let request = match body {
        Some(body) => Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

fn product_body(name: &str, price: i64, cost: i64, stock: i64) -> Value {
    json!({
        "name": name,
        "category": "Makanan",
        "price": price,
        "cost": cost,
        "stock": stock,
        "minStock": 2,
        "supplier": "PD Sinar Jaya",
    })
}

#[tokio::test]
async fn health_reports_database_up() {
    let app = app().await;
    let (status, body) = send(&app, "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["database"], true);
}

#[tokio::test]
async fn product_crud_flow() {
    let app = app().await;

    let (status, created) = send(
        &app,
        "POST",
        "/products",
        Some(product_body("Indomie Goreng", 10_000, 6_000, 5)),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["name"], "Indomie Goreng");
    assert_eq!(created["minStock"], 2);
    let id = created["id"].as_i64().unwrap();

    let (status, list) = send(&app, "GET", "/products", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list.as_array().unwrap().len(), 1);

    let (status, updated) = send(
        &app,
        "PUT",
        &format!("/products/{id}"),
        Some(json!({ "price": 11_000 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["price"], 11_000);
    assert_eq!(updated["stock"], 5);

    let (status, _) = send(&app, "DELETE", &format!("/products/{id}"), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, body) = send(
        &app,
        "PUT",
        &format!("/products/{id}"),
        Some(json!({ "price": 1 })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "NOT_FOUND");
}

#[tokio::test]
async fn delete_product_with_sale_history() {
    let app = app().await;
    let (_, product) = send(
        &app,
        "POST",
        "/products",
        Some(product_body("Teh Botol", 5_000, 3_500, 10)),
    )
    .await;
    let id = product["id"].as_i64().unwrap();

    send(
        &app,
        "POST",
        "/transactions",
        Some(json!({
            "items": [{ "productId": id, "quantity": 1, "price": 5_000 }],
            "paymentMethod": "cash",
        })),
    )
    .await;

    let (status, _) = send(&app, "DELETE", &format!("/products/{id}"), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    // History still lists the sold item by its snapshot
    let (_, history) = send(&app, "GET", "/transactions", None).await;
    assert_eq!(history[0]["items"][0]["productName"], "Teh Botol");
}

#[tokio::test]
async fn product_validation_is_bad_request() {
    let app = app().await;
    let (status, body) = send(
        &app,
        "POST",
        "/products",
        Some(product_body("   ", 1_000, 500, 1)),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn low_stock_listing() {
    let app = app().await;
    send(&app, "POST", "/products", Some(product_body("Plenty", 1_000, 500, 50))).await;
    send(&app, "POST", "/products", Some(product_body("Scarce", 1_000, 500, 1))).await;

    let (status, list) = send(&app, "GET", "/products/low-stock", None).await;
    assert_eq!(status, StatusCode::OK);
    let list = list.as_array().unwrap();
    assert_eq!(list.len(), 1);
    assert_eq!(list[0]["name"], "Scarce");
}

#[tokio::test]
async fn checkout_records_sale_and_decrements_stock() {
    let app = app().await;
    let (_, product) = send(
        &app,
        "POST",
        "/products",
        Some(product_body("Indomie Goreng", 10_000, 6_000, 5)),
    )
    .await;
    let id = product["id"].as_i64().unwrap();

    let (status, sale) = send(
        &app,
        "POST",
        "/transactions",
        Some(json!({
            "items": [{ "productId": id, "quantity": 3, "price": 10_000, "cost": 6_000 }],
            "cashierId": "k1",
            "cashierName": "Kasir Satu",
            "paymentMethod": "cash",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(sale["subtotal"], 30_000);
    assert_eq!(sale["total"], 30_000);
    assert_eq!(sale["items"][0]["productName"], "Indomie Goreng");
    assert_eq!(sale["items"][0]["lineTotal"], 30_000);

    let (_, products) = send(&app, "GET", "/products", None).await;
    assert_eq!(products[0]["stock"], 2);

    let (status, history) = send(&app, "GET", "/transactions", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(history.as_array().unwrap().len(), 1);
    assert_eq!(history[0]["items"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn checkout_insufficient_stock_is_descriptive() {
    let app = app().await;
    let (_, product) = send(
        &app,
        "POST",
        "/products",
        Some(product_body("Indomie Goreng", 10_000, 6_000, 2)),
    )
    .await;
    let id = product["id"].as_i64().unwrap();

    let (status, body) = send(
        &app,
        "POST",
        "/transactions",
        Some(json!({
            "items": [{ "productId": id, "quantity": 3, "price": 10_000 }],
            "paymentMethod": "cash",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["code"], "INSUFFICIENT_STOCK");
    assert!(body["message"].as_str().unwrap().contains("Indomie Goreng"));

    // Nothing persisted
    let (_, products) = send(&app, "GET", "/products", None).await;
    assert_eq!(products[0]["stock"], 2);
    let (_, history) = send(&app, "GET", "/transactions", None).await;
    assert!(history.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn checkout_empty_cart_is_bad_request() {
    let app = app().await;
    let (status, body) = send(
        &app,
        "POST",
        "/transactions",
        Some(json!({ "items": [], "paymentMethod": "cash" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "CART_ERROR");
}

#[tokio::test]
async fn purchase_restocks_product() {
    let app = app().await;
    let (_, product) = send(
        &app,
        "POST",
        "/products",
        Some(product_body("Beras 5kg", 68_000, 60_000, 3)),
    )
    .await;
    let id = product["id"].as_i64().unwrap();

    let (status, purchase) = send(
        &app,
        "POST",
        "/purchases",
        Some(json!({
            "productId": id,
            "quantity": 10,
            "unitCost": 61_000,
            "supplier": "CV Tani Makmur",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(purchase["total"], 610_000);
    assert_eq!(purchase["productName"], "Beras 5kg");

    let (_, products) = send(&app, "GET", "/products", None).await;
    assert_eq!(products[0]["stock"], 13);
    assert_eq!(products[0]["cost"], 61_000);
}

#[tokio::test]
async fn purchase_unknown_product_is_not_found() {
    let app = app().await;
    let (status, body) = send(
        &app,
        "POST",
        "/purchases",
        Some(json!({ "productId": 404, "quantity": 1, "unitCost": 100 })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "NOT_FOUND");
}

#[tokio::test]
async fn supplier_directory_with_aggregates() {
    let app = app().await;
    let (status, created) = send(
        &app,
        "POST",
        "/suppliers",
        Some(json!({ "name": "PD Sinar Jaya", "contactPerson": "Pak Budi" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let id = created["id"].as_i64().unwrap();

    send(&app, "POST", "/products", Some(product_body("Aqua", 4_000, 2_500, 10))).await;

    let (status, list) = send(&app, "GET", "/suppliers", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list[0]["name"], "PD Sinar Jaya");
    assert_eq!(list[0]["productCount"], 1);
    assert_eq!(list[0]["purchaseCount"], 0);
    assert_eq!(list[0]["totalPurchases"], 0);

    let (status, updated) = send(
        &app,
        "PUT",
        &format!("/suppliers/{id}"),
        Some(json!({ "phone": "0812-0000-0000" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["phone"], "0812-0000-0000");

    let (status, _) = send(&app, "DELETE", &format!("/suppliers/{id}"), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn dashboard_and_chart() {
    let app = app().await;
    let (_, product) = send(
        &app,
        "POST",
        "/products",
        Some(product_body("Indomie Goreng", 10_000, 6_000, 20)),
    )
    .await;
    let id = product["id"].as_i64().unwrap();

    send(
        &app,
        "POST",
        "/transactions",
        Some(json!({
            "items": [{ "productId": id, "quantity": 3, "price": 10_000 }],
            "paymentMethod": "cash",
        })),
    )
    .await;

    let (status, stats) = send(&app, "GET", "/dashboard", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(stats["totalProducts"], 1);
    assert_eq!(stats["totalSales"], 30_000);
    assert_eq!(stats["todaySales"], 30_000);
    assert_eq!(stats["todayTransactionCount"], 1);
    assert_eq!(stats["profit"], 12_000);
    assert_eq!(stats["recentTransactions"].as_array().unwrap().len(), 1);

    let (status, chart) = send(&app, "GET", "/chart?period=7", None).await;
    assert_eq!(status, StatusCode::OK);
    let chart = chart.as_array().unwrap();
    assert_eq!(chart.len(), 7);
    assert_eq!(chart.last().unwrap()["sales"], 30_000);
    assert_eq!(chart.last().unwrap()["transactions"], 1);

    let (_, chart30) = send(&app, "GET", "/chart?period=30", None).await;
    assert_eq!(chart30.as_array().unwrap().len(), 30);
}

#[tokio::test]
async fn reset_data_wipes_history_only() {
    let app = app().await;
    let (_, product) = send(
        &app,
        "POST",
        "/products",
        Some(product_body("Aqua", 4_000, 2_500, 10)),
    )
    .await;
    let id = product["id"].as_i64().unwrap();

    send(
        &app,
        "POST",
        "/transactions",
        Some(json!({
            "items": [{ "productId": id, "quantity": 1, "price": 4_000 }],
            "paymentMethod": "cash",
        })),
    )
    .await;

    let (status, body) = send(&app, "POST", "/reset-data", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);

    let (_, history) = send(&app, "GET", "/transactions", None).await;
    assert!(history.as_array().unwrap().is_empty());

    // Catalog survives with its decremented stock
    let (_, products) = send(&app, "GET", "/products", None).await;
    assert_eq!(products.as_array().unwrap().len(), 1);
    assert_eq!(products[0]["stock"], 9);
}
