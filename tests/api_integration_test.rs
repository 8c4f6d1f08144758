use artisan_order_manager::{
    api::{build_router, AppState},
    catalog::{AcceptAllDomains, CatalogService},
    state::create_in_memory_store,
};
use axum::{
    body::{to_bytes, Body},
    http::{Method, Request, StatusCode},
    Router,
};
use chrono::NaiveDate;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

fn app() -> Router {
    let today = || NaiveDate::from_ymd_opt(2030, 1, 1).unwrap();
    let catalog = CatalogService::new(create_in_memory_store(), Arc::new(AcceptAllDomains))
        .with_today(Arc::new(today));
    build_router(AppState::new(Arc::new(catalog)))
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let request = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => request
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => request.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

async fn create_client(app: &Router, name: &str, carnet: u64) -> Value {
    let (status, body) = send(
        app,
        Method::POST,
        "/v1/clients",
        Some(json!({
            "name": name,
            "carnet": carnet,
            "email": "cliente@example.com",
            "address": "Calle Sagárnaga 189"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    body
}

async fn create_product(app: &Router, name: &str, price: &str) -> Value {
    let (status, body) = send(
        app,
        Method::POST,
        "/v1/products",
        Some(json!({ "name": name, "price": price, "stock": 20 })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    body
}

#[tokio::test]
async fn test_health() {
    let app = app();
    let (status, body) = send(&app, Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_product_list_shape_and_ranking() {
    let app = app();
    for name in ["Manta", "Poncho", "Sombrero", "Tapiz"] {
        create_product(&app, name, "10.00").await;
    }

    let (status, body) = send(&app, Method::GET, "/v1/products?q=%20o%20&page_size=2", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["query"], "o");
    assert_eq!(body["items"][0]["name"], "Poncho");
    assert_eq!(body["items"][1]["name"], "Sombrero");
    assert_eq!(body["page"], 1);
    assert_eq!(body["page_size"], 2);
    assert_eq!(body["total_count"], 2);
    assert_eq!(body["total_pages"], 1);
    assert_eq!(body["window"], json!({ "start": 1, "end": 1 }));
    assert_eq!(body["has_previous"], false);
    assert_eq!(body["has_next"], false);
}

#[tokio::test]
async fn test_list_clamps_paging_parameters() {
    let app = app();
    for n in 1..=7 {
        create_product(&app, &format!("Tapiz {n}"), "5.50").await;
    }

    let (_, body) = send(&app, Method::GET, "/v1/products?page=-3&page_size=0", None).await;
    assert_eq!(body["page"], 1);
    assert_eq!(body["page_size"], 5);
    assert_eq!(body["total_pages"], 2);
    assert_eq!(body["has_next"], true);

    let (_, body) = send(&app, Method::GET, "/v1/products?page=40&page_size=500", None).await;
    assert_eq!(body["page"], 1);
    assert_eq!(body["page_size"], 99);
    assert_eq!(body["items"].as_array().unwrap().len(), 7);
}

#[tokio::test]
async fn test_client_errors_map_to_status_codes() {
    let app = app();

    let (status, body) = send(
        &app,
        Method::POST,
        "/v1/clients",
        Some(json!({
            "name": "Ana",
            "carnet": 5,
            "email": "ana@example.com",
            "address": "Calle Sagárnaga 189"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    assert_eq!(body["error"]["status"], 400);

    create_client(&app, "Ana María Ticona", 5).await;
    let (status, body) = send(
        &app,
        Method::POST,
        "/v1/clients",
        Some(json!({
            "name": "ana maría ticona",
            "carnet": 5,
            "email": "ana@example.com",
            "address": "Calle Sagárnaga 189"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"]["code"], "CONFLICT");

    let (status, body) = send(&app, Method::GET, "/v1/clients/77", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_client_delete_is_not_routed() {
    let app = app();
    create_client(&app, "Ana María Ticona", 5).await;

    let (status, _) = send(&app, Method::DELETE, "/v1/clients/1", None).await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn test_order_lifecycle() {
    let app = app();
    let client = create_client(&app, "Ana María Ticona", 5).await;
    let product = create_product(&app, "Aguayo tradicional", "150.25").await;

    let (status, order) = send(
        &app,
        Method::POST,
        "/v1/orders",
        Some(json!({
            "ordered_at": "2030-02-01T09:30:15",
            "client_id": client["id"],
            "address": "Av. Montes 330",
            "total": "999.00"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{order}");
    assert_eq!(order["total"], "0.00");
    assert_eq!(order["ordered_at"], "2030-02-01T09:30:00");
    let order_id = order["id"].as_u64().unwrap();

    let (status, line) = send(
        &app,
        Method::POST,
        &format!("/v1/orders/{order_id}/lines"),
        Some(json!({ "product_id": product["id"], "quantity": 2 })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{line}");
    assert_eq!(line["unit_price"], "150.25");
    assert_eq!(line["subtotal"], "300.50");

    let (_, fetched) = send(&app, Method::GET, &format!("/v1/orders/{order_id}"), None).await;
    assert_eq!(fetched["total"], "300.50");

    let (status, lines) = send(
        &app,
        Method::GET,
        &format!("/v1/orders/{order_id}/lines?q=AGUAYO"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(lines["total_count"], 1);
    assert_eq!(lines["items"][0]["product_name"], "Aguayo tradicional");

    let (_, orders) = send(&app, Method::GET, "/v1/orders?q=ticona", None).await;
    assert_eq!(orders["items"][0]["client_name"], "Ana María Ticona");

    let line_id = line["id"].as_u64().unwrap();
    let (status, _) = send(
        &app,
        Method::DELETE,
        &format!("/v1/order-lines/{line_id}"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, fetched) = send(&app, Method::GET, &format!("/v1/orders/{order_id}"), None).await;
    assert_eq!(fetched["total"], "0.00");

    let (status, _) = send(&app, Method::DELETE, &format!("/v1/orders/{order_id}"), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, _) = send(&app, Method::GET, &format!("/v1/orders/{order_id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_pickers() {
    let app = app();
    create_client(&app, "Zenón Huanca Poma", 9_045_123).await;
    create_client(&app, "Ana Lucía Choque", 4_512_300).await;
    create_product(&app, "Chompa de alpaca", "250").await;

    let (status, body) = send(&app, Method::GET, "/v1/pickers/clients?q=45123&mode=CI", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["items"][0]["ci"], 4_512_300);
    assert_eq!(body["items"][1]["ci"], 9_045_123);
    assert!(body["items"][0].get("address").is_some());

    let (_, body) = send(&app, Method::GET, "/v1/pickers/clients?q=zenon", None).await;
    assert_eq!(body["total_count"], 1);
    assert_eq!(body["items"][0]["name"], "Zenón Huanca Poma");

    let (_, body) = send(&app, Method::GET, "/v1/pickers/products?q=CHOMPA", None).await;
    assert_eq!(body["items"][0], json!({ "id": 1, "name": "Chompa de alpaca", "price": "250.00" }));
}

#[tokio::test]
async fn test_malformed_paging_values_fall_back_to_defaults() {
    let app = app();
    for n in 1..=7 {
        create_product(&app, &format!("Tapiz {n}"), "5.50").await;
    }

    let (status, body) = send(&app, Method::GET, "/v1/products?page=99999999999999999999", None).await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["page"], 2);
    assert_eq!(body["total_pages"], 2);

    let (status, body) = send(&app, Method::GET, "/v1/clients?page_size=abc", None).await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["page_size"], 5);

    let (status, body) = send(&app, Method::GET, "/v1/products?page=&page_size=", None).await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["page"], 1);
    assert_eq!(body["page_size"], 5);

    let (status, body) = send(
        &app,
        Method::GET,
        "/v1/pickers/products?page=x&page_size=99999999999999999999",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["page"], 1);
    assert_eq!(body["page_size"], 99);
}

#[tokio::test]
async fn test_client_list_browses_alphabetically() {
    let app = app();
    create_client(&app, "Zulema Choque", 11).await;
    create_client(&app, "beto flores rojas", 12).await;
    create_client(&app, "Ángela Mamani", 13).await;

    let (status, body) = send(&app, Method::GET, "/v1/clients", None).await;
    assert_eq!(status, StatusCode::OK);
    let names: Vec<&str> = body["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|item| item["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Ángela Mamani", "beto flores rojas", "Zulema Choque"]);
}
