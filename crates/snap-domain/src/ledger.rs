//! In-memory expense ledger
//!
//! A [`Ledger`] is owned by exactly one session and passed around explicitly;
//! it holds no locks. Entries are kept newest-first by `recorded_at`.

use crate::expense::{Expense, ExpenseDraft, ExpenseId};
use chrono::{DateTime, Utc};
use thiserror::Error;

/// Errors from ledger mutations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    /// No entry with this id
    #[error("Expense not found: {0}")]
    NotFound(ExpenseId),
}

/// Ordered collection of expenses, newest first.
///
/// # Examples
///
/// ```
/// use snap_domain::{Category, ExpenseDraft, Ledger};
///
/// let mut ledger = Ledger::new();
/// let first = ledger.add(ExpenseDraft::new(4.5, "USD", Category::Food, "Cafe"));
/// let second = ledger.add(ExpenseDraft::new(30.0, "USD", Category::Travel, "Taxi"));
///
/// assert_eq!(ledger.len(), 2);
/// assert_eq!(ledger.expenses()[0].id, second.id);
///
/// ledger.remove(&first.id);
/// assert_eq!(ledger.len(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Ledger {
    expenses: Vec<Expense>,
}

impl Ledger {
    /// Create an empty ledger
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a ledger from existing expenses, e.g. a store listing
    pub fn from_expenses(expenses: Vec<Expense>) -> Self {
        let mut ledger = Self::new();
        ledger.load(expenses);
        ledger
    }

    /// Assign a fresh id and the current time, then prepend
    pub fn add(&mut self, draft: ExpenseDraft) -> Expense {
        self.add_at(draft, Utc::now())
    }

    /// Same as [`Ledger::add`] with an explicit `recorded_at`
    pub fn add_at(&mut self, draft: ExpenseDraft, recorded_at: DateTime<Utc>) -> Expense {
        let expense = Expense::from_draft(ExpenseId::generate(), recorded_at, draft);
        self.insert(expense.clone());
        expense
    }

    /// Place an already-identified expense by `recorded_at`.
    ///
    /// Among entries sharing the same instant, the one inserted last comes first.
    pub fn insert(&mut self, expense: Expense) {
        let position = self
            .expenses
            .iter()
            .position(|existing| existing.recorded_at <= expense.recorded_at)
            .unwrap_or(self.expenses.len());
        self.expenses.insert(position, expense);
    }

    /// Replace the entry with the same id, or insert it when absent
    pub fn upsert(&mut self, expense: Expense) {
        match self.expenses.iter().position(|e| e.id == expense.id) {
            Some(index) if self.expenses[index].recorded_at == expense.recorded_at => {
                self.expenses[index] = expense;
            }
            Some(index) => {
                self.expenses.remove(index);
                self.insert(expense);
            }
            None => self.insert(expense),
        }
    }

    /// Remove by id. Unknown ids are a no-op returning `None`.
    pub fn remove(&mut self, id: &ExpenseId) -> Option<Expense> {
        let index = self.expenses.iter().position(|e| &e.id == id)?;
        Some(self.expenses.remove(index))
    }

    /// Overwrite the draft fields of an entry, keeping `id` and `recorded_at`
    pub fn replace(&mut self, id: &ExpenseId, draft: ExpenseDraft) -> Result<Expense, LedgerError> {
        let expense = self
            .expenses
            .iter_mut()
            .find(|e| &e.id == id)
            .ok_or_else(|| LedgerError::NotFound(id.clone()))?;
        expense.apply(draft);
        Ok(expense.clone())
    }

    /// Replace all contents, sorting newest-first (stable for equal instants)
    pub fn load(&mut self, mut expenses: Vec<Expense>) {
        expenses.sort_by(|a, b| b.recorded_at.cmp(&a.recorded_at));
        self.expenses = expenses;
    }

    /// Look up an entry by id
    pub fn get(&self, id: &ExpenseId) -> Option<&Expense> {
        self.expenses.iter().find(|e| &e.id == id)
    }

    /// Entries, newest first
    pub fn expenses(&self) -> &[Expense] {
        &self.expenses
    }

    /// Iterate entries, newest first
    pub fn iter(&self) -> impl Iterator<Item = &Expense> {
        self.expenses.iter()
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.expenses.len()
    }

    /// Whether the ledger has no entries
    pub fn is_empty(&self) -> bool {
        self.expenses.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::category::Category;
    use chrono::{Duration, TimeZone};

    fn draft(vendor: &str) -> ExpenseDraft {
        ExpenseDraft::new(10.0, "USD", Category::Shopping, vendor)
    }

    fn at(seconds: i64) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap() + Duration::seconds(seconds)
    }

    fn vendors(ledger: &Ledger) -> Vec<&str> {
        ledger.iter().map(|e| e.vendor.as_str()).collect()
    }

    #[test]
    fn test_add_prepends_newest() {
        let mut ledger = Ledger::new();
        ledger.add_at(draft("a"), at(1));
        ledger.add_at(draft("b"), at(2));
        ledger.add_at(draft("c"), at(3));
        assert_eq!(vendors(&ledger), vec!["c", "b", "a"]);
    }

    #[test]
    fn test_add_assigns_distinct_ids() {
        let mut ledger = Ledger::new();
        let a = ledger.add(draft("a"));
        let b = ledger.add(draft("b"));
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_insert_orders_by_recorded_at() {
        let mut ledger = Ledger::new();
        ledger.add_at(draft("new"), at(10));
        ledger.add_at(draft("old"), at(1));
        ledger.add_at(draft("mid"), at(5));
        assert_eq!(vendors(&ledger), vec!["new", "mid", "old"]);
    }

    #[test]
    fn test_same_instant_later_insertion_first() {
        let mut ledger = Ledger::new();
        ledger.add_at(draft("first"), at(1));
        ledger.add_at(draft("second"), at(1));
        assert_eq!(vendors(&ledger), vec!["second", "first"]);
    }

    #[test]
    fn test_remove_unknown_is_noop() {
        let mut ledger = Ledger::new();
        let kept = ledger.add(draft("kept"));

        assert!(ledger.remove(&ExpenseId::new("missing")).is_none());
        assert_eq!(ledger.len(), 1);
        assert!(ledger.get(&kept.id).is_some());
    }

    #[test]
    fn test_remove_only_target() {
        let mut ledger = Ledger::new();
        let a = ledger.add_at(draft("a"), at(1));
        ledger.add_at(draft("b"), at(2));

        let removed = ledger.remove(&a.id).unwrap();
        assert_eq!(removed.vendor, "a");
        assert_eq!(vendors(&ledger), vec!["b"]);
    }

    #[test]
    fn test_replace_preserves_identity() {
        let mut ledger = Ledger::new();
        let original = ledger.add_at(draft("before"), at(7));

        let updated = ledger
            .replace(&original.id, ExpenseDraft::new(99.0, "EUR", Category::Travel, "after"))
            .unwrap();

        assert_eq!(updated.id, original.id);
        assert_eq!(updated.recorded_at, original.recorded_at);
        assert_eq!(updated.vendor, "after");
        assert_eq!(ledger.get(&original.id).unwrap().total, 99.0);
    }

    #[test]
    fn test_replace_unknown_is_not_found() {
        let mut ledger = Ledger::new();
        let missing = ExpenseId::new("nope");
        let result = ledger.replace(&missing, draft("x"));
        assert_eq!(result, Err(LedgerError::NotFound(missing)));
    }

    #[test]
    fn test_load_sorts_and_is_stable() {
        let e1 = Expense::from_draft(ExpenseId::new("1"), at(1), draft("one"));
        let e2 = Expense::from_draft(ExpenseId::new("2"), at(3), draft("two"));
        let e3 = Expense::from_draft(ExpenseId::new("3"), at(3), draft("three"));

        let ledger = Ledger::from_expenses(vec![e1, e2, e3]);
        assert_eq!(vendors(&ledger), vec!["two", "three", "one"]);
    }

    #[test]
    fn test_upsert_replaces_in_place() {
        let mut ledger = Ledger::new();
        let a = ledger.add_at(draft("a"), at(1));
        ledger.add_at(draft("b"), at(2));

        let mut changed = a.clone();
        changed.vendor = "a2".to_string();
        ledger.upsert(changed);

        assert_eq!(vendors(&ledger), vec!["b", "a2"]);
        assert_eq!(ledger.len(), 2);
    }
}
