//! Integration tests for the expense service

use axum::{
    body::Body,
    http::{Request, StatusCode},
    response::Response,
    Router,
};
use serde_json::{json, Value};
use snap_domain::{Category, Expense, ExpenseDraft};
use snap_extractor::{ExtractorConfig, ReceiptExtractor};
use snap_llm::{LlmError, MockProvider, SharedProvider};
use snap_server::handlers::{create_router, AppState, ErrorResponse, HealthCheckResponse};
use snap_store::SqliteStore;
use std::sync::Arc;
use tower::ServiceExt; // for oneshot

const BOUNDARY: &str = "snap-test-boundary";

const RECEIPT_REPLY: &str = r#"Here is the JSON:
```json
{"total": 42.1, "currency": "usd", "category": "Shopping", "vendor": "Hardware Co", "billingDate": "2024-04-20"}
```"#;

/// Helper to create test application state
fn create_test_app(provider: MockProvider) -> Router {
    let provider: SharedProvider = Arc::new(provider);
    let state = AppState {
        extractor: Arc::new(ReceiptExtractor::new(provider, ExtractorConfig::default())),
        store: Arc::new(SqliteStore::new(":memory:").unwrap()),
    };
    create_router(state)
}

fn multipart_body(field: &str, content_type: &str, bytes: &[u8]) -> Vec<u8> {
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
    body.extend_from_slice(
        format!(
            "Content-Disposition: form-data; name=\"{}\"; filename=\"receipt\"\r\n",
            field
        )
        .as_bytes(),
    );
    body.extend_from_slice(format!("Content-Type: {}\r\n\r\n", content_type).as_bytes());
    body.extend_from_slice(bytes);
    body.extend_from_slice(format!("\r\n--{}--\r\n", BOUNDARY).as_bytes());
    body
}

fn upload(field: &str, content_type: &str, bytes: &[u8]) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/process-image")
        .header(
            "content-type",
            format!("multipart/form-data; boundary={}", BOUNDARY),
        )
        .body(Body::from(multipart_body(field, content_type, bytes)))
        .unwrap()
}

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn empty_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

async fn read_json<T: serde::de::DeserializeOwned>(response: Response) -> T {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

async fn error_message(response: Response) -> String {
    read_json::<ErrorResponse>(response).await.error
}

#[tokio::test]
async fn test_health_check_endpoint() {
    let app = create_test_app(MockProvider::default());

    let response = app.oneshot(empty_request("GET", "/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let health: HealthCheckResponse = read_json(response).await;
    assert_eq!(health.status, "healthy");
    assert_eq!(health.model, "mock");
    assert_eq!(health.store, "sqlite");
}

#[tokio::test]
async fn test_process_image_returns_draft() {
    let provider = MockProvider::new(RECEIPT_REPLY);
    let app = create_test_app(provider.clone());

    let response = app
        .oneshot(upload("image", "image/jpeg", b"\xff\xd8\xff\xe0fake"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let draft: Value = read_json(response).await;
    assert_eq!(
        draft,
        json!({
            "total": 42.1,
            "currency": "USD",
            "category": "Shopping",
            "vendor": "Hardware Co",
            "billingDate": "2024-04-20"
        })
    );

    let images = provider.images();
    assert_eq!(images.len(), 1);
    assert_eq!(images[0].mime_type, "image/jpeg");
}

#[tokio::test]
async fn test_process_image_without_image_field() {
    let provider = MockProvider::new(RECEIPT_REPLY);
    let app = create_test_app(provider.clone());

    let response = app
        .oneshot(upload("file", "image/png", b"png"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(error_message(response).await, "No image provided");
    assert_eq!(provider.call_count(), 0);
}

#[tokio::test]
async fn test_process_image_requires_multipart() {
    let app = create_test_app(MockProvider::new(RECEIPT_REPLY));

    let response = app
        .oneshot(json_request("POST", "/api/process-image", json!({"image": "x"})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_process_image_rejects_unsupported_type() {
    let provider = MockProvider::new(RECEIPT_REPLY);
    let app = create_test_app(provider.clone());

    let response = app
        .oneshot(upload("image", "image/gif", b"GIF89a"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(error_message(response).await.contains("image/gif"));
    assert_eq!(provider.call_count(), 0);
}

#[tokio::test]
async fn test_process_image_rejects_oversized_png() {
    let provider = MockProvider::new(RECEIPT_REPLY);
    let app = create_test_app(provider.clone());

    let bytes = vec![0u8; 6 * 1024 * 1024];
    let response = app.oneshot(upload("image", "image/png", &bytes)).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(provider.call_count(), 0);
}

#[tokio::test]
async fn test_process_image_without_api_key() {
    let provider = MockProvider::new(RECEIPT_REPLY)
        .not_ready(LlmError::MissingCredential("GOOGLE_API_KEY".into()));
    let app = create_test_app(provider);

    let response = app
        .oneshot(upload("image", "image/png", b"png"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        error_message(response).await,
        "GOOGLE_API_KEY environment variable is required"
    );
}

#[tokio::test]
async fn test_process_image_unparseable_reply() {
    let app = create_test_app(MockProvider::new("I can't read that, sorry."));

    let response = app
        .oneshot(upload("image", "image/png", b"png"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(error_message(response).await, "Failed to parse AI response");
}

#[tokio::test]
async fn test_process_image_model_failure_message() {
    let provider = MockProvider::new(RECEIPT_REPLY);
    provider.push_error(LlmError::Http {
        status: 429,
        message: "Resource has been exhausted".into(),
    });
    let app = create_test_app(provider);

    let response = app
        .oneshot(upload("image", "image/png", b"png"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        error_message(response).await,
        "HTTP 429: Resource has been exhausted"
    );
}

#[tokio::test]
async fn test_expense_crud_cycle() {
    let app = create_test_app(MockProvider::default());

    // Create
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/expenses",
            json!({"total": 12.5, "currency": "USD", "category": "Food", "vendor": "Cafe", "billingDate": "2024-03-01"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let created: Expense = read_json(response).await;
    assert_eq!(created.vendor, "Cafe");

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/expenses",
            json!({"total": 30, "currency": "EUR", "category": "Travel", "vendor": "Rail"}),
        ))
        .await
        .unwrap();
    let second: Expense = read_json(response).await;

    // List, newest first, camelCase keys
    let response = app
        .clone()
        .oneshot(empty_request("GET", "/api/expenses"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let listed: Value = read_json(response).await;
    let listed = listed.as_array().unwrap();
    assert_eq!(listed.len(), 2);
    assert_eq!(listed[0]["id"], json!(second.id.as_str()));
    assert_eq!(listed[1]["billingDate"], "2024-03-01");
    assert!(listed[1].get("recordedAt").is_some());

    // Update
    let response = app
        .clone()
        .oneshot(json_request(
            "PUT",
            &format!("/api/expenses/{}", created.id),
            json!({"total": 13, "currency": "USD", "category": "Food", "vendor": "Cafe Deluxe", "billingDate": null}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let updated: Expense = read_json(response).await;
    assert_eq!(updated.id, created.id);
    assert_eq!(updated.recorded_at, created.recorded_at);
    assert_eq!(updated.vendor, "Cafe Deluxe");
    assert_eq!(updated.billing_date, None);

    // Delete, twice
    for _ in 0..2 {
        let response = app
            .clone()
            .oneshot(empty_request("DELETE", &format!("/api/expenses/{}", created.id)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
    }

    let response = app
        .oneshot(empty_request("GET", "/api/expenses"))
        .await
        .unwrap();
    let remaining: Vec<Expense> = read_json(response).await;
    assert_eq!(remaining, vec![second]);
}

#[tokio::test]
async fn test_billing_date_text_forms_accepted() {
    let app = create_test_app(MockProvider::default());

    // A serialized JavaScript Date keeps only its calendar day
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/expenses",
            json!({"total": 8, "currency": "USD", "category": "Food", "vendor": "Deli", "billingDate": "2024-05-06T00:00:00.000Z"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let created: Expense = read_json(response).await;
    assert_eq!(
        created.billing_date,
        chrono::NaiveDate::from_ymd_opt(2024, 5, 6)
    );

    let response = app
        .clone()
        .oneshot(json_request(
            "PUT",
            &format!("/api/expenses/{}", created.id),
            json!({"total": 8, "currency": "USD", "category": "Food", "vendor": "Deli", "billingDate": ""}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let updated: Expense = read_json(response).await;
    assert_eq!(updated.billing_date, None);

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/expenses",
            json!({"total": 8, "currency": "USD", "category": "Food", "vendor": "Deli", "billingDate": "last tuesday"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_update_unknown_expense() {
    let app = create_test_app(MockProvider::default());

    let response = app
        .oneshot(json_request(
            "PUT",
            "/api/expenses/does-not-exist",
            json!({"total": 1, "currency": "USD", "category": "Other", "vendor": "x"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_create_rejects_invalid_drafts() {
    let app = create_test_app(MockProvider::default());

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/expenses",
            json!({"total": -5, "currency": "USD", "category": "Food", "vendor": "Cafe"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        error_message(response).await,
        "Total must be non-negative, got -5"
    );

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/expenses",
            json!({"total": 5, "currency": "US Dollars", "category": "Food", "vendor": "Cafe"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app
        .oneshot(json_request("POST", "/api/expenses", json!({"vendor": "Cafe"})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_summary_endpoint() {
    let app = create_test_app(MockProvider::default());

    let drafts = [
        ExpenseDraft::new(10.0, "USD", Category::Food, "A"),
        ExpenseDraft::new(2.5, "USD", Category::Food, "B"),
        ExpenseDraft::new(99.0, "EUR", Category::Travel, "C"),
    ];
    for draft in &drafts {
        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/api/expenses",
                serde_json::to_value(draft).unwrap(),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let response = app
        .oneshot(empty_request("GET", "/api/summary"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let summary: Value = read_json(response).await;
    assert_eq!(
        summary,
        json!([
            {"category": "Food", "currency": "USD", "total": 12.5, "count": 2},
            {"category": "Travel", "currency": "EUR", "total": 99.0, "count": 1}
        ])
    );
}
