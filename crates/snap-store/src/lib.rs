//! Expense Snap Storage Layer
//!
//! Implements the `ExpenseStore` trait from `snap-domain`.
//!
//! # Backends
//!
//! - [`SqliteStore`]: local SQLite file (or `:memory:`)
//! - [`PostgrestStore`]: Supabase / PostgREST `rest/v1/<table>` endpoint
//!
//! Both map records through [`row::ExpenseRow`], the store's snake_case
//! row layout. [`SyncedLedger`] keeps an in-memory
//! [`Ledger`](snap_domain::Ledger) in step with a store.
//!
//! # Examples
//!
//! ```
//! use snap_domain::traits::ExpenseStore;
//! use snap_domain::{Category, ExpenseDraft};
//! use snap_store::SqliteStore;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let store = SqliteStore::new(":memory:").unwrap();
//! let expense = store
//!     .insert(&ExpenseDraft::new(4.5, "USD", Category::Food, "Cafe"))
//!     .await
//!     .unwrap();
//! assert_eq!(store.list_all().await.unwrap(), vec![expense]);
//! # }
//! ```

#![warn(missing_docs)]

pub mod config;
pub mod postgrest;
pub mod row;
pub mod sqlite;
pub mod synced;

use snap_domain::traits::ExpenseStore;
use snap_domain::{ExpenseId, ValidationError};
use std::sync::Arc;
use thiserror::Error;

pub use config::StoreConfig;
pub use postgrest::PostgrestStore;
pub use row::{ExpenseRow, StoredNumber, ToStoreRow};
pub use sqlite::SqliteStore;
pub use synced::SyncedLedger;

/// Store handle shared across request handlers
pub type SharedStore = Arc<dyn ExpenseStore<Error = StoreError>>;

/// Errors that can occur during storage operations
#[derive(Error, Debug)]
pub enum StoreError {
    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Expense not found
    #[error("Expense not found: {0}")]
    NotFound(ExpenseId),

    /// Record or row failed validation
    #[error("Invalid data: {0}")]
    InvalidData(#[from] ValidationError),

    /// Network or transport failure talking to a remote store
    #[error("Communication error: {0}")]
    Communication(String),

    /// Remote store answered with an error status
    #[error("Store returned HTTP {status}: {message}")]
    Remote {
        /// Status code
        status: u16,
        /// Message from the error body
        message: String,
    },

    /// Remote store answered 2xx with an unusable body
    #[error("Unexpected store response: {0}")]
    UnexpectedResponse(String),

    /// Store cannot be opened with the given settings
    #[error("{0}")]
    Config(String),
}

impl From<reqwest::Error> for StoreError {
    fn from(e: reqwest::Error) -> Self {
        StoreError::Communication(e.to_string())
    }
}
