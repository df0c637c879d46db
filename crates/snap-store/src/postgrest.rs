//! Supabase / PostgREST expense store
//!
//! Talks to `{url}/rest/v1/{table}` with the project key sent both as the
//! `apikey` header and as a bearer token. The remote table assigns `id`,
//! `date` and audit timestamps.

use crate::row::{ExpenseRow, ToStoreRow};
use crate::StoreError;
use async_trait::async_trait;
use chrono::Utc;
use reqwest::{Method, RequestBuilder, Response};
use serde::Deserialize;
use snap_domain::dates::format_timestamp;
use snap_domain::traits::ExpenseStore;
use snap_domain::{Expense, ExpenseDraft, ExpenseId};
use tracing::debug;

/// Default table name
pub const DEFAULT_TABLE: &str = "expenses";

/// Environment variable holding the project key
pub const API_KEY_ENV: &str = "SUPABASE_KEY";

/// PostgREST error body
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

/// PostgREST-backed implementation of ExpenseStore
pub struct PostgrestStore {
    base_url: String,
    api_key: String,
    table: String,
    client: reqwest::Client,
}

impl PostgrestStore {
    /// Create a store for a project URL (e.g. `https://xyz.supabase.co`)
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
            table: DEFAULT_TABLE.to_string(),
            client: reqwest::Client::new(),
        }
    }

    /// Use a table other than `expenses`
    pub fn with_table(mut self, table: impl Into<String>) -> Self {
        self.table = table.into();
        self
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/rest/v1/{}",
            self.base_url.trim_end_matches('/'),
            self.table
        )
    }

    fn request(&self, method: Method) -> RequestBuilder {
        self.client
            .request(method, self.endpoint())
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
    }

    /// Turn non-2xx answers into `StoreError::Remote`
    async fn check(response: Response) -> Result<Response, StoreError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorBody>(&body)
            .map(|b| b.message)
            .unwrap_or(body);
        Err(StoreError::Remote {
            status: status.as_u16(),
            message,
        })
    }

    async fn rows(response: Response) -> Result<Vec<ExpenseRow>, StoreError> {
        let response = Self::check(response).await?;
        response
            .json::<Vec<ExpenseRow>>()
            .await
            .map_err(|e| StoreError::UnexpectedResponse(e.to_string()))
    }
}

#[async_trait]
impl ExpenseStore for PostgrestStore {
    type Error = StoreError;

    async fn list_all(&self) -> Result<Vec<Expense>, StoreError> {
        let response = self
            .request(Method::GET)
            .query(&[("select", "*"), ("order", "date.desc")])
            .send()
            .await?;

        let rows = Self::rows(response).await?;
        debug!("Fetched {} expenses from {}", rows.len(), self.table);
        rows.into_iter()
            .map(|row| row.into_expense().map_err(StoreError::from))
            .collect()
    }

    async fn insert(&self, draft: &ExpenseDraft) -> Result<Expense, StoreError> {
        draft.validate()?;

        let response = self
            .request(Method::POST)
            .header("Prefer", "return=representation")
            .json(&[draft.to_store_row()])
            .send()
            .await?;

        let row = Self::rows(response)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| StoreError::UnexpectedResponse("insert returned no rows".to_string()))?;
        Ok(row.into_expense()?)
    }

    async fn update(&self, id: &ExpenseId, draft: &ExpenseDraft) -> Result<Expense, StoreError> {
        draft.validate()?;

        let mut row = draft.to_store_row();
        row.updated_at = Some(format_timestamp(Utc::now()));

        let response = self
            .request(Method::PATCH)
            .query(&[("id", format!("eq.{}", id))])
            .header("Prefer", "return=representation")
            .json(&row)
            .send()
            .await?;

        let row = Self::rows(response)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| StoreError::NotFound(id.clone()))?;
        Ok(row.into_expense()?)
    }

    async fn delete(&self, id: &ExpenseId) -> Result<(), StoreError> {
        let response = self
            .request(Method::DELETE)
            .query(&[("id", format!("eq.{}", id))])
            .send()
            .await?;
        Self::check(response).await?;
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "postgrest"
    }
}
