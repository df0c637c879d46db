//! Ledger kept in step with a store
//!
//! Every mutation awaits the store first and only then touches the local
//! ledger, so a failed write leaves local state unchanged.

use snap_domain::traits::ExpenseStore;
use snap_domain::{Expense, ExpenseDraft, ExpenseId, Ledger};
use tracing::debug;

/// A [`Ledger`] backed by an [`ExpenseStore`]
///
/// Methods take `&mut self`, so one session cannot have two writes in
/// flight at once.
pub struct SyncedLedger<S> {
    store: S,
    ledger: Ledger,
}

impl<S: ExpenseStore> SyncedLedger<S> {
    /// Wrap a store with an empty local ledger
    pub fn new(store: S) -> Self {
        Self {
            store,
            ledger: Ledger::new(),
        }
    }

    /// Replace local contents with the store's listing
    pub async fn refresh(&mut self) -> Result<&Ledger, S::Error> {
        let expenses = self.store.list_all().await?;
        debug!("Loaded {} expenses from {}", expenses.len(), self.store.backend_name());
        self.ledger.load(expenses);
        Ok(&self.ledger)
    }

    /// Persist a draft, then add the stored expense locally
    pub async fn add(&mut self, draft: ExpenseDraft) -> Result<Expense, S::Error> {
        let expense = self.store.insert(&draft).await?;
        self.ledger.insert(expense.clone());
        Ok(expense)
    }

    /// Persist new draft fields, then update the local entry
    pub async fn replace(&mut self, id: &ExpenseId, draft: ExpenseDraft) -> Result<Expense, S::Error> {
        let expense = self.store.update(id, &draft).await?;
        self.ledger.upsert(expense.clone());
        Ok(expense)
    }

    /// Delete in the store, then locally. Unknown ids succeed with `None`.
    pub async fn remove(&mut self, id: &ExpenseId) -> Result<Option<Expense>, S::Error> {
        self.store.delete(id).await?;
        Ok(self.ledger.remove(id))
    }

    /// Local view, newest first
    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    /// Underlying store
    pub fn store(&self) -> &S {
        &self.store
    }
}
