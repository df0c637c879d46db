//! Add and edit command implementations.

use crate::cli::{DraftArgs, EditArgs};
use crate::error::{CliError, Result};
use crate::output::Formatter;
use snap_domain::traits::ExpenseStore;
use snap_domain::{Category, ExpenseDraft, ExpenseId};
use snap_store::SharedStore;

/// Execute the add command.
pub async fn execute_add(args: DraftArgs, store: &SharedStore, formatter: &Formatter) -> Result<()> {
    let mut draft = ExpenseDraft::new(
        args.total,
        args.currency,
        Category::from(args.category),
        args.vendor,
    );
    draft.billing_date = args.billing_date;

    let expense = store.insert(&draft.normalized()?).await?;
    println!("{}", formatter.expense_saved("Added", &expense.id));
    Ok(())
}

/// Execute the edit command.
///
/// Unset fields keep their stored values.
pub async fn execute_edit(args: EditArgs, store: &SharedStore, formatter: &Formatter) -> Result<()> {
    let id = ExpenseId::new(args.id.as_str());
    let current = store
        .list_all()
        .await?
        .into_iter()
        .find(|e| e.id == id)
        .ok_or_else(|| CliError::NotFound(id.to_string()))?;

    let draft = apply_edits(current.draft(), &args)?;
    let expense = store.update(&id, &draft).await?;

    let rendered = formatter.format_draft(&expense.draft())?;
    if !rendered.is_empty() {
        println!("{}", rendered);
    }
    println!("{}", formatter.expense_saved("Updated", &expense.id));
    Ok(())
}

/// Merge the requested changes into `draft`.
fn apply_edits(mut draft: ExpenseDraft, args: &EditArgs) -> Result<ExpenseDraft> {
    let unchanged = args.total.is_none()
        && args.currency.is_none()
        && args.category.is_none()
        && args.vendor.is_none()
        && args.billing_date.is_none()
        && !args.clear_billing_date;
    if unchanged {
        return Err(CliError::InvalidInput("Nothing to change".to_string()));
    }

    if let Some(total) = args.total {
        draft.total = total;
    }
    if let Some(currency) = &args.currency {
        draft.currency = currency.clone();
    }
    if let Some(category) = &args.category {
        draft.category = Category::from(category.as_str());
    }
    if let Some(vendor) = &args.vendor {
        draft.vendor = vendor.clone();
    }
    if args.billing_date.is_some() {
        draft.billing_date = args.billing_date;
    }
    if args.clear_billing_date {
        draft.billing_date = None;
    }

    Ok(draft.normalized()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OutputFormat;
    use chrono::NaiveDate;
    use snap_domain::ValidationError;
    use snap_store::SqliteStore;
    use std::sync::Arc;

    fn edit(id: &str) -> EditArgs {
        EditArgs {
            id: id.to_string(),
            total: None,
            currency: None,
            category: None,
            vendor: None,
            billing_date: None,
            clear_billing_date: false,
        }
    }

    fn draft() -> ExpenseDraft {
        ExpenseDraft::new(20.0, "USD", Category::Shopping, "Market")
            .with_billing_date(NaiveDate::from_ymd_opt(2024, 2, 2).unwrap())
    }

    #[test]
    fn test_apply_edits_keeps_unset_fields() {
        let mut args = edit("x");
        args.vendor = Some("  Night Market ".to_string());
        args.currency = Some("eur".to_string());

        let updated = apply_edits(draft(), &args).unwrap();
        assert_eq!(updated.vendor, "Night Market");
        assert_eq!(updated.currency, "EUR");
        assert_eq!(updated.total, 20.0);
        assert_eq!(updated.billing_date, draft().billing_date);
    }

    #[test]
    fn test_apply_edits_clears_billing_date() {
        let mut args = edit("x");
        args.clear_billing_date = true;
        assert_eq!(apply_edits(draft(), &args).unwrap().billing_date, None);
    }

    #[test]
    fn test_apply_edits_requires_a_change() {
        assert!(matches!(
            apply_edits(draft(), &edit("x")),
            Err(CliError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_apply_edits_validates() {
        let mut args = edit("x");
        args.total = Some(-3.0);
        assert!(matches!(
            apply_edits(draft(), &args),
            Err(CliError::Validation(ValidationError::NegativeTotal(_)))
        ));
    }

    #[tokio::test]
    async fn test_add_then_edit() {
        let store: SharedStore = Arc::new(SqliteStore::new(":memory:").unwrap());
        let formatter = Formatter::new(OutputFormat::Quiet, false);

        let args = DraftArgs {
            total: 4.0,
            currency: "usd".to_string(),
            category: "entertainment".to_string(),
            vendor: "Cinema".to_string(),
            billing_date: None,
        };
        execute_add(args, &store, &formatter).await.unwrap();

        let added = store.list_all().await.unwrap().remove(0);
        assert_eq!(added.category, Category::Entertainment);
        assert_eq!(added.currency, "USD");

        let mut args = edit(added.id.as_str());
        args.total = Some(6.5);
        execute_edit(args, &store, &formatter).await.unwrap();

        let edited = store.list_all().await.unwrap().remove(0);
        assert_eq!(edited.id, added.id);
        assert_eq!(edited.total, 6.5);
        assert_eq!(edited.vendor, "Cinema");
    }

    #[tokio::test]
    async fn test_edit_unknown_id() {
        let store: SharedStore = Arc::new(SqliteStore::new(":memory:").unwrap());
        let formatter = Formatter::new(OutputFormat::Quiet, false);

        let mut args = edit("missing");
        args.total = Some(1.0);
        assert!(matches!(
            execute_edit(args, &store, &formatter).await,
            Err(CliError::NotFound(id)) if id == "missing"
        ));
    }
}
