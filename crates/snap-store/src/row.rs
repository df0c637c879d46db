//! Store row layout and conversions
//!
//! Rows use the store's snake_case column names. `total` may come back as
//! a JSON number or as decimal text (Postgres `numeric`), so it is kept in a
//! [`StoredNumber`] until conversion.

use serde::{Deserialize, Deserializer, Serialize};
use snap_domain::dates::{format_date, format_timestamp, parse_date, parse_timestamp};
use snap_domain::{Category, Expense, ExpenseDraft, ExpenseId, ValidationError};
use std::fmt;

/// Numeric column that may arrive as a number or as text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StoredNumber {
    /// JSON number
    Number(f64),
    /// Decimal text, e.g. `"12.50"`
    Text(String),
}

impl StoredNumber {
    /// Read as a finite, non-negative amount
    pub fn to_total(&self) -> Result<f64, ValidationError> {
        let value = match self {
            StoredNumber::Number(n) => *n,
            StoredNumber::Text(s) => s
                .trim()
                .parse::<f64>()
                .map_err(|_| ValidationError::InvalidTotal(s.clone()))?,
        };
        if !value.is_finite() {
            return Err(ValidationError::InvalidTotal(value.to_string()));
        }
        if value < 0.0 {
            return Err(ValidationError::NegativeTotal(value));
        }
        Ok(value)
    }
}

impl fmt::Display for StoredNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoredNumber::Number(n) => write!(f, "{}", n),
            StoredNumber::Text(s) => f.write_str(s),
        }
    }
}

/// One row of the `expenses` table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseRow {
    /// Row identifier; absent before insertion
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "deserialize_id"
    )]
    pub id: Option<String>,

    /// Amount paid
    pub total: StoredNumber,

    /// Currency code
    pub currency: String,

    /// Category name
    pub category: String,

    /// Vendor name
    pub vendor: String,

    /// Entry timestamp (`recorded_at`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,

    /// Receipt date as `YYYY-MM-DD`; written as `null` when absent
    #[serde(default)]
    pub billing_date: Option<String>,

    /// Audit timestamp
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,

    /// Audit timestamp
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

/// Identity columns may be text (uuid) or integers (bigserial)
fn deserialize_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Int(i64),
    }

    Ok(Option::<RawId>::deserialize(deserializer)?.map(|id| match id {
        RawId::Text(s) => s,
        RawId::Int(n) => n.to_string(),
    }))
}

/// Conversion into the store's row layout
pub trait ToStoreRow {
    /// Build the row for this record
    fn to_store_row(&self) -> ExpenseRow;
}

impl ToStoreRow for ExpenseDraft {
    fn to_store_row(&self) -> ExpenseRow {
        ExpenseRow {
            id: None,
            total: StoredNumber::Number(self.total),
            currency: self.currency.clone(),
            category: self.category.to_string(),
            vendor: self.vendor.clone(),
            date: None,
            billing_date: self.billing_date.map(format_date),
            created_at: None,
            updated_at: None,
        }
    }
}

impl ToStoreRow for Expense {
    fn to_store_row(&self) -> ExpenseRow {
        ExpenseRow {
            id: Some(self.id.to_string()),
            date: Some(format_timestamp(self.recorded_at)),
            created_at: self.created_at.map(format_timestamp),
            updated_at: self.updated_at.map(format_timestamp),
            ..self.draft().to_store_row()
        }
    }
}

impl ExpenseRow {
    /// Editable fields only; identity and timestamps are ignored
    pub fn into_draft(self) -> Result<ExpenseDraft, ValidationError> {
        let total = self.total.to_total()?;
        let billing_date = match self.billing_date.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(value) => Some(parse_date(value).ok_or_else(|| ValidationError::InvalidDate {
                field: "billing_date",
                value: value.to_string(),
            })?),
        };

        Ok(ExpenseDraft {
            total,
            currency: self.currency,
            category: Category::from(self.category),
            vendor: self.vendor,
            billing_date,
        })
    }

    /// Full record; `id` and `date` are required
    pub fn into_expense(mut self) -> Result<Expense, ValidationError> {
        let id = self
            .id
            .take()
            .filter(|id| !id.is_empty())
            .ok_or(ValidationError::MissingField("id"))?;
        let date = self.date.take().ok_or(ValidationError::MissingField("date"))?;
        let recorded_at = timestamp("date", &date)?;
        let created_at = self
            .created_at
            .take()
            .map(|ts| timestamp("created_at", &ts))
            .transpose()?;
        let updated_at = self
            .updated_at
            .take()
            .map(|ts| timestamp("updated_at", &ts))
            .transpose()?;

        let mut expense = Expense::from_draft(ExpenseId::new(id), recorded_at, self.into_draft()?);
        expense.created_at = created_at;
        expense.updated_at = updated_at;
        Ok(expense)
    }
}

fn timestamp(
    field: &'static str,
    value: &str,
) -> Result<chrono::DateTime<chrono::Utc>, ValidationError> {
    parse_timestamp(value).ok_or_else(|| ValidationError::InvalidDate {
        field,
        value: value.to_string(),
    })
}
