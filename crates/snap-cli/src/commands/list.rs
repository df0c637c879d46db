//! List and summary command implementations.

use crate::cli::ListArgs;
use crate::error::Result;
use crate::output::Formatter;
use snap_domain::traits::ExpenseStore;
use snap_domain::{summarize, Category, Expense, Ledger};
use snap_store::SharedStore;

/// Execute the list command.
pub async fn execute_list(args: ListArgs, store: &SharedStore, formatter: &Formatter) -> Result<()> {
    let ledger = Ledger::from_expenses(store.list_all().await?);
    let expenses = select(&ledger, &args);
    println!("{}", formatter.format_expenses(&expenses)?);
    Ok(())
}

/// Execute the summary command.
pub async fn execute_summary(store: &SharedStore, formatter: &Formatter) -> Result<()> {
    let expenses = store.list_all().await?;
    println!("{}", formatter.format_summary(&summarize(&expenses))?);
    Ok(())
}

/// Apply the category filter and limit, newest first.
fn select(ledger: &Ledger, args: &ListArgs) -> Vec<Expense> {
    let category = args.category.as_deref().map(Category::from);
    ledger
        .iter()
        .filter(|e| category.as_ref().map_or(true, |c| &e.category == c))
        .take(args.limit.unwrap_or(usize::MAX))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};
    use snap_domain::ExpenseDraft;

    fn ledger() -> Ledger {
        let base = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
        let mut ledger = Ledger::new();
        ledger.add_at(ExpenseDraft::new(5.0, "USD", Category::Food, "Bakery"), base);
        ledger.add_at(
            ExpenseDraft::new(40.0, "USD", Category::Travel, "Taxi"),
            base + Duration::hours(1),
        );
        ledger.add_at(
            ExpenseDraft::new(7.0, "USD", Category::Food, "Deli"),
            base + Duration::hours(2),
        );
        ledger
    }

    fn vendors(expenses: &[Expense]) -> Vec<&str> {
        expenses.iter().map(|e| e.vendor.as_str()).collect()
    }

    #[test]
    fn test_select_all() {
        let args = ListArgs {
            category: None,
            limit: None,
        };
        assert_eq!(vendors(&select(&ledger(), &args)), vec!["Deli", "Taxi", "Bakery"]);
    }

    #[test]
    fn test_select_by_category_is_case_insensitive() {
        let args = ListArgs {
            category: Some("food".to_string()),
            limit: None,
        };
        assert_eq!(vendors(&select(&ledger(), &args)), vec!["Deli", "Bakery"]);
    }

    #[test]
    fn test_limit() {
        let args = ListArgs {
            category: None,
            limit: Some(1),
        };
        assert_eq!(vendors(&select(&ledger(), &args)), vec!["Deli"]);
    }
}
