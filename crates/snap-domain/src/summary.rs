//! Per-category totals

use crate::category::Category;
use crate::expense::Expense;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Sum of expenses sharing a category and currency.
///
/// Amounts in different currencies are never added together.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryTotal {
    /// Category being summed
    pub category: Category,
    /// Currency of every summed expense
    pub currency: String,
    /// Sum of totals
    pub total: f64,
    /// Number of expenses
    pub count: usize,
}

/// Group expenses by (category, currency), ordered by category then currency
pub fn summarize<'a>(expenses: impl IntoIterator<Item = &'a Expense>) -> Vec<CategoryTotal> {
    let mut groups: BTreeMap<(Category, String), (f64, usize)> = BTreeMap::new();
    for expense in expenses {
        let entry = groups
            .entry((expense.category.clone(), expense.currency.clone()))
            .or_insert((0.0, 0));
        entry.0 += expense.total;
        entry.1 += 1;
    }

    groups
        .into_iter()
        .map(|((category, currency), (total, count))| CategoryTotal {
            category,
            currency,
            total,
            count,
        })
        .collect()
}
