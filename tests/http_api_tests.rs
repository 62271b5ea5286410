use axum::http::StatusCode;
use axum_test::TestServer;
use dispensary::application::engine::PharmacyEngine;
use dispensary::infrastructure::in_memory::InMemoryCatalog;
use dispensary::interfaces::http;
use serde_json::{Value, json};
use std::sync::Arc;

fn server() -> TestServer {
    let engine = Arc::new(PharmacyEngine::new(Box::new(InMemoryCatalog::new())));
    TestServer::new(http::router(engine)).unwrap()
}

async fn create_medicine(server: &TestServer, stock: u32, price: &str) -> String {
    let res = server
        .post("/api/medicines")
        .json(&json!({
            "name": "Aspirin",
            "price": price,
            "stock": stock,
        }))
        .await;
    res.assert_status(StatusCode::CREATED);
    let body: Value = res.json();
    assert_eq!(body["success"], true);
    body["data"]["id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_health() {
    let server = server();
    let res = server.get("/api/health").await;
    res.assert_status_ok();
    let body: Value = res.json();
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_medicine_crud() {
    let server = server();
    let id = create_medicine(&server, 10, "5.00").await;

    let res = server.get("/api/medicines").await;
    res.assert_status_ok();
    let body: Value = res.json();
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
    assert_eq!(body["data"][0]["category"], "General");

    let res = server.put(&format!("/api/medicines/{id}")).json(&json!({
        "name": "Paracetamol",
        "stock": 25,
    })).await;
    res.assert_status_ok();
    let body: Value = res.json();
    assert_eq!(body["data"]["name"], "Paracetamol");
    assert_eq!(body["data"]["stock"], 25);
    assert_eq!(body["data"]["price"], "5.00");

    let res = server.delete(&format!("/api/medicines/{id}")).await;
    res.assert_status_ok();
    let body: Value = res.json();
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Medicine deleted successfully");

    let res = server.get(&format!("/api/medicines/{id}")).await;
    res.assert_status(StatusCode::NOT_FOUND);
    let body: Value = res.json();
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "Medicine not found");
}

#[tokio::test]
async fn test_place_order_success() {
    let server = server();
    let id = create_medicine(&server, 10, "5.00").await;

    let res = server
        .post("/api/orders")
        .json(&json!({
            "medicine_id": id,
            "customer_name": "Alice",
            "customer_email": "alice@example.com",
            "quantity": 3,
        }))
        .await;
    res.assert_status(StatusCode::CREATED);
    let body: Value = res.json();
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Order placed successfully");
    assert_eq!(body["data"]["status"], "pending");
    assert_eq!(body["data"]["total_price"], "15.00");

    let res = server.get(&format!("/api/medicines/{id}")).await;
    let body: Value = res.json();
    assert_eq!(body["data"]["stock"], 7);
}

#[tokio::test]
async fn test_place_order_insufficient_stock() {
    let server = server();
    let id = create_medicine(&server, 2, "5.00").await;

    let res = server
        .post("/api/orders")
        .json(&json!({
            "medicine_id": id,
            "customer_name": "Alice",
            "customer_email": "alice@example.com",
            "quantity": 5,
        }))
        .await;
    res.assert_status(StatusCode::CONFLICT);
    let body: Value = res.json();
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "Insufficient stock available");

    // Stock untouched.
    let res = server.get(&format!("/api/medicines/{id}")).await;
    let body: Value = res.json();
    assert_eq!(body["data"]["stock"], 2);
}

#[tokio::test]
async fn test_place_order_unknown_medicine() {
    let server = server();

    let res = server
        .post("/api/orders")
        .json(&json!({
            "medicine_id": "00000000-0000-0000-0000-000000000000",
            "customer_name": "Alice",
            "customer_email": "alice@example.com",
            "quantity": 1,
        }))
        .await;
    res.assert_status(StatusCode::NOT_FOUND);
    let body: Value = res.json();
    assert_eq!(body["error"], "Medicine not found");
}

#[tokio::test]
async fn test_cancel_restores_stock_exactly_once() {
    let server = server();
    let id = create_medicine(&server, 7, "2.00").await;

    let res = server
        .post("/api/orders")
        .json(&json!({
            "medicine_id": id,
            "customer_name": "Alice",
            "customer_email": "alice@example.com",
            "quantity": 4,
        }))
        .await;
    let body: Value = res.json();
    let order_id = body["data"]["id"].as_str().unwrap().to_string();

    let res = server
        .patch(&format!("/api/orders/{order_id}/status"))
        .json(&json!({ "status": "cancelled" }))
        .await;
    res.assert_status_ok();
    let body: Value = res.json();
    assert_eq!(body["data"]["status"], "cancelled");

    let res = server.get(&format!("/api/medicines/{id}")).await;
    let body: Value = res.json();
    assert_eq!(body["data"]["stock"], 11);

    // Cancelling again is a conflict and must not restore twice.
    let res = server
        .patch(&format!("/api/orders/{order_id}/status"))
        .json(&json!({ "status": "cancelled" }))
        .await;
    res.assert_status(StatusCode::CONFLICT);

    let res = server.get(&format!("/api/medicines/{id}")).await;
    let body: Value = res.json();
    assert_eq!(body["data"]["stock"], 11);
}

#[tokio::test]
async fn test_unrecognized_status_is_rejected() {
    let server = server();
    let id = create_medicine(&server, 5, "1.00").await;

    let res = server
        .post("/api/orders")
        .json(&json!({
            "medicine_id": id,
            "customer_name": "Alice",
            "customer_email": "alice@example.com",
            "quantity": 1,
        }))
        .await;
    let body: Value = res.json();
    let order_id = body["data"]["id"].as_str().unwrap().to_string();

    let res = server
        .patch(&format!("/api/orders/{order_id}/status"))
        .json(&json!({ "status": "shipped" }))
        .await;
    res.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = res.json();
    assert_eq!(body["success"], false);
    assert!(body["error"].as_str().unwrap().contains("Invalid status"));

    // Order unchanged.
    let res = server.get("/api/orders").await;
    let body: Value = res.json();
    assert_eq!(body["data"][0]["status"], "pending");
}

#[tokio::test]
async fn test_orders_list_resolves_medicine_summary() {
    let server = server();
    let id = create_medicine(&server, 10, "5.00").await;

    server
        .post("/api/orders")
        .json(&json!({
            "medicine_id": id,
            "customer_name": "Alice",
            "customer_email": "alice@example.com",
            "quantity": 2,
        }))
        .await;

    let res = server.get("/api/orders").await;
    res.assert_status_ok();
    let body: Value = res.json();
    let order = &body["data"][0];
    assert_eq!(order["medicine"]["name"], "Aspirin");
    assert_eq!(order["medicine"]["price"], "5.00");
    assert_eq!(order["medicine"]["category"], "General");

    // Deleting the medicine degrades the summary to null, not an error.
    server.delete(&format!("/api/medicines/{id}")).await;
    let res = server.get("/api/orders").await;
    let body: Value = res.json();
    assert!(body["data"][0]["medicine"].is_null());
}

#[tokio::test]
async fn test_unknown_fields_are_rejected() {
    let server = server();

    let res = server
        .post("/api/medicines")
        .json(&json!({
            "name": "Aspirin",
            "price": "1.00",
            "stock": 1,
            "discount": true,
        }))
        .await;
    res.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = res.json();
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn test_malformed_path_id_is_enveloped() {
    let server = server();
    let res = server.get("/api/medicines/not-a-uuid").await;
    res.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = res.json();
    assert_eq!(body["success"], false);
    assert!(body["error"].as_str().unwrap().contains("Invalid medicine id"));
}

#[tokio::test]
async fn test_missing_order_fields_are_rejected() {
    let server = server();
    let id = create_medicine(&server, 5, "1.00").await;

    // Blank customer name fails engine validation.
    let res = server
        .post("/api/orders")
        .json(&json!({
            "medicine_id": id,
            "customer_name": "",
            "customer_email": "alice@example.com",
            "quantity": 1,
        }))
        .await;
    res.assert_status(StatusCode::BAD_REQUEST);

    // Missing field fails deserialization, same envelope.
    let res = server
        .post("/api/orders")
        .json(&json!({
            "medicine_id": id,
            "quantity": 1,
        }))
        .await;
    res.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = res.json();
    assert_eq!(body["success"], false);

    // Zero quantity is rejected, not silently accepted.
    let res = server
        .post("/api/orders")
        .json(&json!({
            "medicine_id": id,
            "customer_name": "Alice",
            "customer_email": "alice@example.com",
            "quantity": 0,
        }))
        .await;
    res.assert_status(StatusCode::BAD_REQUEST);
}
