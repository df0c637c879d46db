//! HTTP request handlers for the expense service.
//!
//! Receipt extraction, expense CRUD, the category summary and a health
//! check, all as JSON over axum.

use axum::{
    extract::{
        multipart::MultipartRejection, rejection::JsonRejection, DefaultBodyLimit, Multipart,
        Path, State,
    },
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post, put},
    Router as AxumRouter,
};
use serde::{Deserialize, Serialize};
use snap_domain::traits::ExpenseStore;
use snap_domain::{summarize, CategoryTotal, Expense, ExpenseDraft, ExpenseId, ValidationError};
use snap_extractor::{ExtractorError, ReceiptExtractor};
use snap_llm::SharedProvider;
use snap_store::{SharedStore, StoreError};
use std::sync::Arc;
use tracing::{error, info, warn};

/// Multipart field carrying the receipt
pub const IMAGE_FIELD: &str = "image";

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Receipt extraction pipeline
    pub extractor: Arc<ReceiptExtractor<SharedProvider>>,
    /// Expense store
    pub store: SharedStore,
}

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthCheckResponse {
    /// Overall health status
    pub status: String,
    /// Model used for extraction
    pub model: String,
    /// Store backend name
    pub store: String,
}

/// Error response
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}

/// Application error type
#[derive(Debug)]
pub enum AppError {
    /// Malformed request
    BadRequest(String),
    /// Extraction pipeline error
    Extractor(ExtractorError),
    /// Store error
    Store(StoreError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::Extractor(e) => match e {
                ExtractorError::Validation(_) => (StatusCode::BAD_REQUEST, e.to_string()),
                ExtractorError::Configuration(_)
                | ExtractorError::ExternalCall(_)
                | ExtractorError::Parse(_) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
            },
            AppError::Store(e) => match e {
                StoreError::NotFound(_) => (StatusCode::NOT_FOUND, e.to_string()),
                StoreError::InvalidData(_) => (StatusCode::BAD_REQUEST, e.to_string()),
                _ => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
            },
        };

        if status.is_server_error() {
            error!("Request failed: {}", message);
        }

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}

impl From<ExtractorError> for AppError {
    fn from(e: ExtractorError) -> Self {
        AppError::Extractor(e)
    }
}

impl From<StoreError> for AppError {
    fn from(e: StoreError) -> Self {
        AppError::Store(e)
    }
}

impl From<ValidationError> for AppError {
    fn from(e: ValidationError) -> Self {
        AppError::BadRequest(e.to_string())
    }
}

impl From<JsonRejection> for AppError {
    fn from(e: JsonRejection) -> Self {
        AppError::BadRequest(e.body_text())
    }
}

impl From<MultipartRejection> for AppError {
    fn from(e: MultipartRejection) -> Self {
        AppError::BadRequest(e.body_text())
    }
}

/// POST /api/process-image - Extract an expense draft from a receipt photo
///
/// Expects multipart form data with the image in the `image` field. The
/// draft is returned, not saved.
async fn process_image(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<ExpenseDraft>, AppError> {
    // Missing configuration is reported before the upload is read
    state.extractor.ensure_ready()?;

    let mut multipart = multipart?;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.body_text()))?
    {
        if field.name() != Some(IMAGE_FIELD) {
            continue;
        }

        let mime_type = field.content_type().unwrap_or_default().to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::BadRequest(e.body_text()))?;
        info!("Received image: {} bytes, type '{}'", bytes.len(), mime_type);

        let draft = state.extractor.extract(&bytes, &mime_type).await?;
        return Ok(Json(draft));
    }

    warn!("No image provided in form data");
    Err(AppError::BadRequest("No image provided".to_string()))
}

/// GET /api/expenses - All expenses, newest first
async fn list_expenses(State(state): State<AppState>) -> Result<Json<Vec<Expense>>, AppError> {
    Ok(Json(state.store.list_all().await?))
}

/// POST /api/expenses - Save a draft
async fn create_expense(
    State(state): State<AppState>,
    payload: Result<Json<ExpenseDraft>, JsonRejection>,
) -> Result<(StatusCode, Json<Expense>), AppError> {
    let Json(draft) = payload?;
    let expense = state.store.insert(&draft.normalized()?).await?;
    info!("Created expense {}", expense.id);
    Ok((StatusCode::CREATED, Json(expense)))
}

/// PUT /api/expenses/:id - Replace the editable fields of an expense
async fn update_expense(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<ExpenseDraft>, JsonRejection>,
) -> Result<Json<Expense>, AppError> {
    let Json(draft) = payload?;
    let expense = state
        .store
        .update(&ExpenseId::new(id), &draft.normalized()?)
        .await?;
    info!("Updated expense {}", expense.id);
    Ok(Json(expense))
}

/// DELETE /api/expenses/:id - Delete an expense; unknown ids succeed
async fn delete_expense(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    let id = ExpenseId::new(id);
    state.store.delete(&id).await?;
    info!("Deleted expense {}", id);
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/summary - Totals per category and currency
async fn expense_summary(
    State(state): State<AppState>,
) -> Result<Json<Vec<CategoryTotal>>, AppError> {
    let expenses = state.store.list_all().await?;
    Ok(Json(summarize(&expenses)))
}

/// GET /health - Service health check
async fn health_check(State(state): State<AppState>) -> Json<HealthCheckResponse> {
    let status = match state.extractor.ensure_ready() {
        Ok(()) => "healthy",
        Err(_) => "degraded",
    };

    Json(HealthCheckResponse {
        status: status.to_string(),
        model: state.extractor.model_name().to_string(),
        store: state.store.backend_name().to_string(),
    })
}

/// Create the axum router with all routes
pub fn create_router(state: AppState) -> AxumRouter {
    // Room for the image plus multipart framing
    let body_limit = state.extractor.config().max_image_bytes.saturating_mul(2);

    AxumRouter::new()
        .route("/api/process-image", post(process_image))
        .route("/api/expenses", get(list_expenses).post(create_expense))
        .route("/api/expenses/:id", put(update_expense).delete(delete_expense))
        .route("/api/summary", get(expense_summary))
        .route("/health", get(health_check))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}
