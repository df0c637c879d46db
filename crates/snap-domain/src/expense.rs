//! Expense records - drafts and persisted expenses

use crate::category::Category;
use crate::error::ValidationError;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque identifier for an expense.
///
/// Locally generated ids are UUIDv7 strings, which sort by creation time.
/// Ids assigned by an external store are kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExpenseId(String);

impl ExpenseId {
    /// Generate a new UUIDv7-based id
    ///
    /// # Examples
    ///
    /// ```
    /// use snap_domain::ExpenseId;
    ///
    /// let a = ExpenseId::generate();
    /// let b = ExpenseId::generate();
    /// assert_ne!(a, b);
    /// ```
    pub fn generate() -> Self {
        Self(uuid::Uuid::now_v7().to_string())
    }

    /// Wrap an id assigned elsewhere
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the raw id text
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ExpenseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for ExpenseId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for ExpenseId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// An expense before it has a persistent identifier.
///
/// Produced by manual entry or by normalizing a model reply.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseDraft {
    /// Amount paid, never negative
    pub total: f64,

    /// ISO 4217 style three-letter code, uppercase
    pub currency: String,

    /// Expense category
    pub category: Category,

    /// Business name on the receipt
    pub vendor: String,

    /// Transaction date printed on the receipt, if any
    #[serde(default, deserialize_with = "crate::dates::deserialize_optional_date")]
    pub billing_date: Option<NaiveDate>,
}

impl ExpenseDraft {
    /// Create a draft without a billing date
    pub fn new(
        total: f64,
        currency: impl Into<String>,
        category: impl Into<Category>,
        vendor: impl Into<String>,
    ) -> Self {
        Self {
            total,
            currency: currency.into(),
            category: category.into(),
            vendor: vendor.into(),
            billing_date: None,
        }
    }

    /// Set the billing date
    pub fn with_billing_date(mut self, date: NaiveDate) -> Self {
        self.billing_date = Some(date);
        self
    }

    /// Trim and uppercase text fields, then check every invariant.
    ///
    /// # Examples
    ///
    /// ```
    /// use snap_domain::{Category, ExpenseDraft};
    ///
    /// let draft = ExpenseDraft::new(12.5, " usd", "food", " Cafe ")
    ///     .normalized()
    ///     .unwrap();
    /// assert_eq!(draft.currency, "USD");
    /// assert_eq!(draft.vendor, "Cafe");
    /// assert_eq!(draft.category, Category::Food);
    /// ```
    pub fn normalized(mut self) -> Result<Self, ValidationError> {
        self.currency = self.currency.trim().to_ascii_uppercase();
        self.vendor = self.vendor.trim().to_string();
        if let Category::Custom(name) = &self.category {
            self.category = Category::from(name.as_str());
        }
        self.validate()?;
        Ok(self)
    }

    /// Check every invariant without modifying the draft
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.total.is_finite() {
            return Err(ValidationError::InvalidTotal(self.total.to_string()));
        }
        if self.total < 0.0 {
            return Err(ValidationError::NegativeTotal(self.total));
        }
        if !is_currency_code(&self.currency) {
            return Err(ValidationError::InvalidCurrency(self.currency.clone()));
        }
        if let Category::Custom(name) = &self.category {
            if name.trim().is_empty() {
                return Err(ValidationError::EmptyCategory);
            }
        }
        if self.vendor.trim().is_empty() {
            return Err(ValidationError::EmptyVendor);
        }
        Ok(())
    }
}

fn is_currency_code(code: &str) -> bool {
    code.len() == 3 && code.chars().all(|c| c.is_ascii_uppercase())
}

/// A persisted or listed expense.
///
/// `id` and `recorded_at` are fixed at creation; updates replace only the
/// draft fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    /// Unique identifier
    pub id: ExpenseId,

    /// Amount paid
    pub total: f64,

    /// Three-letter currency code
    pub currency: String,

    /// Expense category
    pub category: Category,

    /// Business name
    pub vendor: String,

    /// Date on the receipt, if known
    #[serde(default, deserialize_with = "crate::dates::deserialize_optional_date")]
    pub billing_date: Option<NaiveDate>,

    /// When the expense entered the system
    pub recorded_at: DateTime<Utc>,

    /// Store-supplied creation audit timestamp
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,

    /// Store-supplied last-update audit timestamp
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Expense {
    /// Promote a draft to an expense
    pub fn from_draft(id: ExpenseId, recorded_at: DateTime<Utc>, draft: ExpenseDraft) -> Self {
        Self {
            id,
            total: draft.total,
            currency: draft.currency,
            category: draft.category,
            vendor: draft.vendor,
            billing_date: draft.billing_date,
            recorded_at,
            created_at: None,
            updated_at: None,
        }
    }

    /// Copy of the editable fields
    pub fn draft(&self) -> ExpenseDraft {
        ExpenseDraft {
            total: self.total,
            currency: self.currency.clone(),
            category: self.category.clone(),
            vendor: self.vendor.clone(),
            billing_date: self.billing_date,
        }
    }

    /// Overwrite the editable fields, keeping `id` and `recorded_at`
    pub fn apply(&mut self, draft: ExpenseDraft) {
        self.total = draft.total;
        self.currency = draft.currency;
        self.category = draft.category;
        self.vendor = draft.vendor;
        self.billing_date = draft.billing_date;
    }
}
