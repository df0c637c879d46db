//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use colored::*;
use snap_domain::dates::format_date;
use snap_domain::{CategoryTotal, Expense, ExpenseDraft, ExpenseId};
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
    Table,
};

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Format a list of expenses.
    pub fn format_expenses(&self, expenses: &[Expense]) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(expenses)?),
            OutputFormat::Table => Ok(self.format_expenses_table(expenses)),
            OutputFormat::Quiet => Ok(expenses
                .iter()
                .map(|e| e.id.to_string())
                .collect::<Vec<_>>()
                .join("\n")),
        }
    }

    fn format_expenses_table(&self, expenses: &[Expense]) -> String {
        if expenses.is_empty() {
            return self.colorize("No expenses found.", "yellow");
        }

        let mut builder = Builder::default();
        builder.push_record(["ID", "Recorded", "Billed", "Vendor", "Category", "Total"]);

        for expense in expenses {
            builder.push_record([
                expense.id.to_string(),
                expense.recorded_at.format("%Y-%m-%d %H:%M").to_string(),
                billing_date(expense.billing_date),
                expense.vendor.clone(),
                expense.category.to_string(),
                amount(expense.total, &expense.currency),
            ]);
        }

        styled(builder.build())
    }

    /// Format an extracted or edited draft.
    ///
    /// Quiet mode prints nothing; the draft has no ID yet.
    pub fn format_draft(&self, draft: &ExpenseDraft) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(draft)?),
            OutputFormat::Quiet => Ok(String::new()),
            OutputFormat::Table => {
                let mut builder = Builder::default();
                builder.push_record(["Field", "Value"]);
                builder.push_record(["Vendor".to_string(), draft.vendor.clone()]);
                builder.push_record(["Category".to_string(), draft.category.to_string()]);
                builder.push_record(["Total".to_string(), amount(draft.total, &draft.currency)]);
                builder.push_record(["Billed".to_string(), billing_date(draft.billing_date)]);
                Ok(styled(builder.build()))
            }
        }
    }

    /// Format per-category totals.
    pub fn format_summary(&self, totals: &[CategoryTotal]) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(totals)?),
            OutputFormat::Quiet => Ok(totals
                .iter()
                .map(|t| format!("{}\t{}\t{:.2}", t.category, t.currency, t.total))
                .collect::<Vec<_>>()
                .join("\n")),
            OutputFormat::Table => {
                if totals.is_empty() {
                    return Ok(self.colorize("No expenses found.", "yellow"));
                }

                let mut builder = Builder::default();
                builder.push_record(["Category", "Count", "Total"]);
                for total in totals {
                    builder.push_record([
                        total.category.to_string(),
                        total.count.to_string(),
                        amount(total.total, &total.currency),
                    ]);
                }
                Ok(styled(builder.build()))
            }
        }
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an error message.
    pub fn error(&self, message: &str) -> String {
        self.colorize(&format!("✗ {}", message), "red")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    /// Report a stored expense; quiet mode prints the bare ID.
    pub fn expense_saved(&self, verb: &str, id: &ExpenseId) -> String {
        match self.format {
            OutputFormat::Quiet => id.to_string(),
            _ => self.success(&format!("{} expense {}", verb, id)),
        }
    }

    /// Format bulk operation result.
    pub fn bulk_result(&self, operation: &str, count: usize) -> String {
        self.success(&format!("{} {} expense(s)", operation, count))
    }

    /// Apply color if enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "green" => text.green().to_string(),
            "red" => text.red().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            _ => text.to_string(),
        }
    }
}

fn styled(mut table: Table) -> String {
    table
        .with(Style::rounded())
        .with(Modify::new(Rows::first()).with(Alignment::center()));
    table.to_string()
}

fn amount(total: f64, currency: &str) -> String {
    format!("{:.2} {}", total, currency)
}

fn billing_date(date: Option<chrono::NaiveDate>) -> String {
    date.map(format_date).unwrap_or_else(|| "-".to_string())
}
