//! SQLite-backed expense store

use crate::row::{ExpenseRow, StoredNumber, ToStoreRow};
use crate::StoreError;
use async_trait::async_trait;
use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension, Row};
use snap_domain::dates::format_timestamp;
use snap_domain::traits::ExpenseStore;
use snap_domain::{Expense, ExpenseDraft, ExpenseId};
use std::path::Path;
use std::sync::{Mutex, MutexGuard, PoisonError};
use tracing::debug;

const SELECT_COLUMNS: &str =
    "SELECT id, total, currency, category, vendor, date, billing_date, created_at, updated_at FROM expenses";

/// SQLite-based implementation of ExpenseStore
///
/// Rows keep `total` as decimal text and timestamps as RFC 3339 text with
/// nanosecond precision, so ordering by `date` is chronological.
///
/// # Thread Safety
///
/// The connection sits behind a mutex; concurrent calls are serialized.
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Create a new SqliteStore with the given database path
    ///
    /// Use `:memory:` for an in-memory database (useful for testing).
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use snap_store::SqliteStore;
    ///
    /// let store = SqliteStore::new("expenses.db").unwrap();
    /// ```
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let conn = Connection::open(path)?;
        conn.execute_batch(include_str!("schema.sql"))?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn conn(&self) -> MutexGuard<'_, Connection> {
        self.conn.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Look up a single expense
    pub fn get(&self, id: &ExpenseId) -> Result<Option<Expense>, StoreError> {
        let conn = self.conn();
        let row = conn
            .query_row(
                &format!("{} WHERE id = ?1", SELECT_COLUMNS),
                params![id.as_str()],
                read_row,
            )
            .optional()?;
        Ok(row.map(ExpenseRow::into_expense).transpose()?)
    }

    fn list_sync(&self) -> Result<Vec<Expense>, StoreError> {
        let conn = self.conn();
        let mut stmt = conn.prepare(&format!(
            "{} ORDER BY date DESC, rowid DESC",
            SELECT_COLUMNS
        ))?;
        let rows = stmt
            .query_map([], read_row)?
            .collect::<Result<Vec<_>, _>>()?;

        rows.into_iter()
            .map(|row| row.into_expense().map_err(StoreError::from))
            .collect()
    }

    fn insert_sync(&self, draft: &ExpenseDraft) -> Result<Expense, StoreError> {
        draft.validate()?;

        let now = Utc::now();
        let id = ExpenseId::generate();
        let mut expense = Expense::from_draft(id.clone(), now, draft.clone());
        expense.created_at = Some(now);
        expense.updated_at = Some(now);
        let row = expense.to_store_row();

        self.conn().execute(
            "INSERT INTO expenses (id, total, currency, category, vendor, date, billing_date, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            params![
                row.id,
                row.total.to_string(),
                row.currency,
                row.category,
                row.vendor,
                row.date,
                row.billing_date,
                row.created_at,
                row.updated_at,
            ],
        )?;

        debug!("Inserted expense {}", id);
        self.get(&id)?.ok_or(StoreError::NotFound(id))
    }

    fn update_sync(&self, id: &ExpenseId, draft: &ExpenseDraft) -> Result<Expense, StoreError> {
        draft.validate()?;

        let row = draft.to_store_row();
        let changed = self.conn().execute(
            "UPDATE expenses
             SET total = ?1, currency = ?2, category = ?3, vendor = ?4, billing_date = ?5, updated_at = ?6
             WHERE id = ?7",
            params![
                row.total.to_string(),
                row.currency,
                row.category,
                row.vendor,
                row.billing_date,
                format_timestamp(Utc::now()),
                id.as_str(),
            ],
        )?;

        if changed == 0 {
            return Err(StoreError::NotFound(id.clone()));
        }

        debug!("Updated expense {}", id);
        self.get(id)?.ok_or_else(|| StoreError::NotFound(id.clone()))
    }

    fn delete_sync(&self, id: &ExpenseId) -> Result<(), StoreError> {
        let deleted = self
            .conn()
            .execute("DELETE FROM expenses WHERE id = ?1", params![id.as_str()])?;
        debug!("Deleted {} row(s) for expense {}", deleted, id);
        Ok(())
    }
}

fn read_row(row: &Row<'_>) -> rusqlite::Result<ExpenseRow> {
    Ok(ExpenseRow {
        id: row.get(0)?,
        total: StoredNumber::Text(row.get(1)?),
        currency: row.get(2)?,
        category: row.get(3)?,
        vendor: row.get(4)?,
        date: row.get(5)?,
        billing_date: row.get(6)?,
        created_at: row.get(7)?,
        updated_at: row.get(8)?,
    })
}

#[async_trait]
impl ExpenseStore for SqliteStore {
    type Error = StoreError;

    async fn list_all(&self) -> Result<Vec<Expense>, StoreError> {
        self.list_sync()
    }

    async fn insert(&self, draft: &ExpenseDraft) -> Result<Expense, StoreError> {
        self.insert_sync(draft)
    }

    async fn update(&self, id: &ExpenseId, draft: &ExpenseDraft) -> Result<Expense, StoreError> {
        self.update_sync(id, draft)
    }

    async fn delete(&self, id: &ExpenseId) -> Result<(), StoreError> {
        self.delete_sync(id)
    }

    fn backend_name(&self) -> &'static str {
        "sqlite"
    }
}
