//! API integration tests
//!
//! Most tests drive the router in-process over the in-memory store with a
//! fixed clock. The `#[ignore]` ones expect a running server.

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{header::CONTENT_TYPE, Method, Request, StatusCode},
    Router,
};
use chrono::NaiveDate;
use serde_json::{json, Value};
use tower::ServiceExt;

use circulation_server::{
    api,
    config::AppConfig,
    lending::{FixedClock, LoanOutcome, RefusalReason},
    models::LoanRequest,
    repository::Repository,
    services::Services,
    AppState,
};

const BASE_URL: &str = "http://localhost:8080/api/v1";

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

// 2024-01-04 is a Thursday, 2024-01-06 a Saturday
fn thursday() -> NaiveDate {
    day(2024, 1, 4)
}

fn saturday() -> NaiveDate {
    day(2024, 1, 6)
}

fn services_on(today: NaiveDate) -> Arc<Services> {
    let config = AppConfig::default();
    Arc::new(Services::new(
        Repository::in_memory(),
        &config.lending,
        Arc::new(FixedClock(today)),
    ))
}

fn router_for(services: Arc<Services>) -> Router {
    api::create_router(AppState {
        config: Arc::new(AppConfig::default()),
        services,
    })
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let request = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => request
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(serde_json::to_vec(&body).unwrap()))
            .unwrap(),
        None => request.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

async fn register_material(app: &Router, isbn: &str, material_type: &str) {
    let (status, _) = send(
        app,
        Method::POST,
        "/api/v1/materials",
        Some(json!({ "isbn": isbn, "name": "Test material", "material_type": material_type })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
}

async fn register_borrower(app: &Router, identification: &str) {
    let (status, _) = send(
        app,
        Method::POST,
        "/api/v1/borrowers",
        Some(json!({ "identification": identification, "name": "Ada Lovelace" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
}

async fn request_loan(app: &Router, isbn: &str, borrower: &str) -> (StatusCode, Value) {
    send(
        app,
        Method::POST,
        "/api/v1/loans",
        Some(json!({ "isbn": isbn, "borrower_identification": borrower })),
    )
    .await
}

#[tokio::test]
async fn test_health_check() {
    let app = router_for(services_on(thursday()));
    let (status, body) = send(&app, Method::GET, "/api/v1/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_book_with_high_digit_sum_is_due_in_fifteen_business_days() {
    let app = router_for(services_on(thursday()));
    register_material(&app, "978-2-16-148410-0", "book").await;
    register_borrower(&app, "CC-1020").await;

    let (status, body) = request_loan(&app, "978-2-16-148410-0", "CC-1020").await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["success"], true);
    assert_eq!(body["isbn"], "978-2-16-148410-0");
    assert_eq!(body["loan_date"], "2024-01-04");
    assert_eq!(body["due_date"], "2024-01-25");
    assert!(body["loan_id"].is_string());
}

#[tokio::test]
async fn test_book_with_low_digit_sum_is_due_in_ten_business_days() {
    let app = router_for(services_on(thursday()));
    register_material(&app, "0-306-40615-2", "book").await;
    register_borrower(&app, "CC-1020").await;

    let (status, body) = request_loan(&app, "0-306-40615-2", "cc-1020").await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["due_date"], "2024-01-18");
}

#[tokio::test]
async fn test_periodical_on_saturday_is_refused_and_not_persisted() {
    let app = router_for(services_on(saturday()));
    register_material(&app, "0317-8471", "periodical").await;
    register_borrower(&app, "CC-1020").await;

    let (status, body) = request_loan(&app, "0317-8471", "CC-1020").await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["success"], false);
    assert_eq!(body["reason"], "periodical_on_weekend");
    assert_eq!(body["message"], "periodical cannot be loaned on a weekend");
    assert_eq!(body["isbn"], "0317-8471");

    let (_, loans) = send(&app, Method::GET, "/api/v1/materials/0317-8471/loans", None).await;
    assert_eq!(loans, json!([]));
}

#[tokio::test]
async fn test_palindrome_isbn_is_reference_only() {
    let app = router_for(services_on(thursday()));
    register_material(&app, "12321", "book").await;
    register_borrower(&app, "CC-1020").await;

    let (status, body) = request_loan(&app, "12321", "CC-1020").await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["reason"], "reference_only");
}

#[tokio::test]
async fn test_second_loan_of_same_material_conflicts() {
    let app = router_for(services_on(thursday()));
    register_material(&app, "0-306-40615-2", "book").await;
    register_borrower(&app, "CC-1020").await;
    register_borrower(&app, "CC-2040").await;

    let (first, _) = request_loan(&app, "0-306-40615-2", "CC-1020").await;
    let (second, body) = request_loan(&app, "0-306-40615-2", "CC-2040").await;

    assert_eq!(first, StatusCode::CREATED);
    assert_eq!(second, StatusCode::CONFLICT);
    assert_eq!(body["reason"], "already_on_loan");

    let (_, loans) = send(&app, Method::GET, "/api/v1/materials/0-306-40615-2/loans", None).await;
    let loans = loans.as_array().unwrap();
    assert_eq!(loans.len(), 1);
    assert_eq!(loans[0]["borrower_identification"], "CC-1020");
}

#[tokio::test]
async fn test_simultaneous_requests_grant_exactly_one_loan() {
    let services = services_on(thursday());
    let app = router_for(services.clone());
    register_material(&app, "0-306-40615-2", "book").await;
    for id in 0..8 {
        register_borrower(&app, &format!("CC-{}", id)).await;
    }

    let handles: Vec<_> = (0..8)
        .map(|id| {
            let services = services.clone();
            tokio::spawn(async move {
                services
                    .loans
                    .request_loan(LoanRequest {
                        isbn: "0-306-40615-2".to_string(),
                        borrower_identification: format!("CC-{}", id),
                    })
                    .await
            })
        })
        .collect();

    let mut granted = 0;
    for handle in handles {
        match handle.await.unwrap().unwrap() {
            LoanOutcome::Granted(_) => granted += 1,
            LoanOutcome::Refused(refusal) => {
                assert_eq!(refusal.reason, RefusalReason::AlreadyOnLoan)
            }
        }
    }
    assert_eq!(granted, 1);

    let active = services
        .loans
        .active_loans_for_material("0-306-40615-2")
        .await
        .unwrap();
    assert_eq!(active.len(), 1);
}

#[tokio::test]
async fn test_unknown_material_and_borrower_are_not_found() {
    let app = router_for(services_on(thursday()));
    register_material(&app, "0-306-40615-2", "book").await;

    let (status, body) = request_loan(&app, "0-000-00000-1", "CC-1020").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["reason"], "material_not_found");

    let (status, body) = request_loan(&app, "0-306-40615-2", "CC-1020").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["reason"], "borrower_not_found");
}

#[tokio::test]
async fn test_blank_isbn_is_a_bad_request() {
    let app = router_for(services_on(thursday()));
    let (status, body) = request_loan(&app, "", "CC-1020").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "BadValue");
}

#[tokio::test]
async fn test_material_on_loan_cannot_be_deleted() {
    let app = router_for(services_on(thursday()));
    register_material(&app, "0-306-40615-2", "book").await;
    register_material(&app, "0317-8471", "periodical").await;
    register_borrower(&app, "CC-1020").await;
    request_loan(&app, "0-306-40615-2", "CC-1020").await;

    let (status, _) = send(&app, Method::DELETE, "/api/v1/materials/0-306-40615-2", None).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, _) = send(&app, Method::DELETE, "/api/v1/materials/0317-8471", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send(&app, Method::GET, "/api/v1/materials/0317-8471", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_duplicate_registrations_conflict() {
    let app = router_for(services_on(thursday()));
    register_material(&app, "0-306-40615-2", "book").await;
    register_borrower(&app, "CC-1020").await;

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/v1/materials",
        Some(json!({ "isbn": "0-306-40615-2", "name": "Again", "material_type": "book" })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/v1/borrowers",
        Some(json!({ "identification": "cc-1020", "name": "Again" })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, body) = send(&app, Method::GET, "/api/v1/borrowers/cc-1020", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["identification"], "CC-1020");
}

#[tokio::test]
#[ignore] // Run with: cargo test -- --ignored
async fn test_live_health_check() {
    let client = reqwest::Client::new();

    let response = client
        .get(format!("{}/health", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
#[ignore]
async fn test_live_unknown_material_is_refused() {
    let client = reqwest::Client::new();

    let response = client
        .post(format!("{}/loans", BASE_URL))
        .json(&json!({
            "isbn": "does-not-exist-0001",
            "borrower_identification": "nobody"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 404);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["success"], false);
    assert_eq!(body["reason"], "material_not_found");
}
