//! End-to-end tests of the HTTP surface against an in-memory database.

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use randgate_backend::{app, config::Settings, db};
use serde_json::{json, Value};
use tower::ServiceExt;

async fn test_app() -> Router {
    let pool = db::connect_in_memory().await.unwrap();
    let settings = Settings::from_lookup(|_| None).unwrap();
    app::create_app(app::AppState::new(pool, settings))
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

#[tokio::test]
async fn root_and_health() {
    let app = test_app().await;

    let (status, body) = send(&app, "GET", "/", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Welcome to RandGate Bid Response System API");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));

    let (status, body) = send(&app, "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["services"]["database"], "ok");
}

#[tokio::test]
async fn responses_carry_a_request_id() {
    let app = test_app().await;

    let request = Request::builder().uri("/health").body(Body::empty()).unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert!(response.headers().contains_key("x-request-id"));
}

#[tokio::test]
async fn tender_and_bid_lifecycle() {
    let app = test_app().await;

    let (status, owner) = send(
        &app,
        "POST",
        "/companies",
        Some(json!({ "name": "City Works", "bee_status": "Level 2" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let owner_id = owner["data"]["id"].as_str().unwrap().to_string();

    let (_, bidder) = send(
        &app,
        "POST",
        "/companies",
        Some(json!({ "name": "Bidder Ltd", "email": "bids@bidder.example.com" })),
    )
    .await;
    let bidder_id = bidder["data"]["id"].as_str().unwrap().to_string();

    let (status, tender) = send(
        &app,
        "POST",
        "/tenders",
        Some(json!({
            "company_id": owner_id,
            "title": "Road resurfacing",
            "tender_type": "RFT",
            "deadline": "2030-06-30T12:00:00Z",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(tender["data"]["status"], "draft");
    assert_eq!(tender["data"]["tender_type"], "RFT");
    let tender_id = tender["data"]["id"].as_str().unwrap().to_string();

    let (status, bid) = send(
        &app,
        "POST",
        "/bids",
        Some(json!({
            "tender_id": tender_id,
            "company_id": bidder_id,
            "price_quote": 1250000.0,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert!(bid["data"]["submitted_at"].is_null());
    let bid_id = bid["data"]["id"].as_str().unwrap().to_string();

    let (status, submitted) = send(
        &app,
        "PATCH",
        &format!("/bids/{bid_id}"),
        Some(json!({ "status": "submitted" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(submitted["data"]["status"], "submitted");
    assert!(submitted["data"]["submitted_at"].is_string());

    let (status, listed) = send(&app, "GET", &format!("/bids?tender_id={tender_id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed["data"].as_array().unwrap().len(), 1);
    assert_eq!(listed["pagination"]["has_next"], false);

    let (status, fetched) = send(&app, "GET", &format!("/tenders/{tender_id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["data"]["title"], "Road resurfacing");
}

#[tokio::test]
async fn store_errors_become_http_errors() {
    let app = test_app().await;

    send(&app, "POST", "/companies", Some(json!({ "name": "Dup" }))).await;
    let (status, body) = send(&app, "POST", "/companies", Some(json!({ "name": "Dup" }))).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "CONFLICT");

    let (status, body) = send(
        &app,
        "POST",
        "/tenders",
        Some(json!({
            "company_id": "7d1c2b3a-0000-4000-8000-000000000000",
            "title": "Nobody's tender",
            "deadline": "2030-01-01T00:00:00Z",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "BAD_REQUEST");

    let (status, body) = send(
        &app,
        "GET",
        "/templates/7d1c2b3a-0000-4000-8000-000000000000",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "NOT_FOUND");
}

#[tokio::test]
async fn unknown_enum_values_are_rejected() {
    let app = test_app().await;

    let (_, owner) = send(&app, "POST", "/companies", Some(json!({ "name": "Enum Co" }))).await;
    let owner_id = owner["data"]["id"].as_str().unwrap().to_string();

    let (status, body) = send(
        &app,
        "POST",
        "/tenders",
        Some(json!({
            "company_id": owner_id,
            "title": "Bad type",
            "tender_type": "RFX",
            "deadline": "2030-01-01T00:00:00Z",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "BAD_REQUEST");
    assert!(body["message"].as_str().unwrap().contains("RFX"));

    let (status, body) = send(&app, "GET", "/tenders?status=cancelled", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "BAD_REQUEST");
    assert!(body["message"].as_str().unwrap().contains("cancelled"));

    let (status, body) = send(
        &app,
        "PATCH",
        &format!("/companies/{owner_id}"),
        Some(json!({ "name": 42 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "BAD_REQUEST");

    let (status, body) = send(&app, "GET", "/tenders/not-a-uuid", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn malformed_bodies_get_the_error_envelope() {
    let app = test_app().await;

    let request = Request::builder()
        .method("POST")
        .uri("/companies")
        .body(Body::from(r#"{"name": "No content type"}"#))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let request = Request::builder()
        .method("POST")
        .uri("/companies")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(r#"{"name": "#))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn template_deactivation_and_filtering() {
    let app = test_app().await;

    let (_, owner) = send(&app, "POST", "/companies", Some(json!({ "name": "Templater" }))).await;
    let owner_id = owner["data"]["id"].as_str().unwrap().to_string();

    let (status, template) = send(
        &app,
        "POST",
        "/templates",
        Some(json!({
            "company_id": owner_id,
            "name": "Cleaning proposal",
            "content": "{\"sections\":[]}",
            "category": "Cleaning",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(template["data"]["is_active"], true);
    let template_id = template["data"]["id"].as_str().unwrap().to_string();

    let (status, retired) = send(
        &app,
        "POST",
        &format!("/templates/{template_id}/deactivate"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(retired["data"]["is_active"], false);

    let (_, active) = send(
        &app,
        "GET",
        &format!("/templates?company_id={owner_id}&is_active=true"),
        None,
    )
    .await;
    assert!(active["data"].as_array().unwrap().is_empty());

    let (_, all) = send(&app, "GET", &format!("/templates?company_id={owner_id}"), None).await;
    assert_eq!(all["data"].as_array().unwrap().len(), 1);
}
