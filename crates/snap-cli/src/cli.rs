//! CLI command definitions and argument parsing.

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Expense Snap CLI - Scan receipts and manage your expense ledger.
#[derive(Debug, Parser)]
#[command(name = "snap")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(long, global = true, env = "SNAP_CONFIG")]
    pub config: Option<PathBuf>,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
    /// Quiet format (IDs only)
    Quiet,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Extract an expense from a receipt image
    Scan(ScanArgs),

    /// List recorded expenses, newest first
    List(ListArgs),

    /// Show totals per category and currency
    Summary,

    /// Record an expense by hand
    Add(DraftArgs),

    /// Change fields of a recorded expense
    Edit(EditArgs),

    /// Delete expenses
    Delete(DeleteArgs),
}

/// Arguments for the scan command.
#[derive(Debug, Parser)]
pub struct ScanArgs {
    /// Receipt image (JPEG or PNG)
    pub image: PathBuf,

    /// MIME type, when it cannot be inferred from the file extension
    #[arg(short, long)]
    pub mime: Option<String>,

    /// Save the extracted expense to the ledger
    #[arg(short, long)]
    pub save: bool,
}

/// Arguments for the list command.
#[derive(Debug, Parser)]
pub struct ListArgs {
    /// Only show this category
    #[arg(short, long)]
    pub category: Option<String>,

    /// Maximum number of results
    #[arg(short, long)]
    pub limit: Option<usize>,
}

/// Fields of a new expense.
#[derive(Debug, Parser)]
pub struct DraftArgs {
    /// Amount paid
    pub total: f64,

    /// Three-letter currency code (e.g., USD)
    pub currency: String,

    /// Category (Food, Travel, Shopping, Entertainment, Utilities, Healthcare, Education, Other)
    pub category: String,

    /// Business name
    pub vendor: String,

    /// Date on the receipt (YYYY-MM-DD)
    #[arg(short, long)]
    pub billing_date: Option<NaiveDate>,
}

/// Arguments for the edit command.
#[derive(Debug, Parser)]
pub struct EditArgs {
    /// Expense ID
    pub id: String,

    /// New total
    #[arg(short, long)]
    pub total: Option<f64>,

    /// New currency code
    #[arg(long)]
    pub currency: Option<String>,

    /// New category
    #[arg(short, long)]
    pub category: Option<String>,

    /// New vendor
    #[arg(short, long)]
    pub vendor: Option<String>,

    /// New billing date (YYYY-MM-DD)
    #[arg(short, long, conflicts_with = "clear_billing_date")]
    pub billing_date: Option<NaiveDate>,

    /// Remove the billing date
    #[arg(long)]
    pub clear_billing_date: bool,
}

/// Arguments for the delete command.
#[derive(Debug, Parser)]
pub struct DeleteArgs {
    /// Expense IDs to delete
    pub ids: Vec<String>,

    /// Read IDs from file (one per line)
    #[arg(long)]
    pub file: Option<PathBuf>,

    /// Skip confirmation prompt
    #[arg(short = 'y', long)]
    pub yes: bool,
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Json => crate::config::OutputFormat::Json,
            CliFormat::Quiet => crate::config::OutputFormat::Quiet,
        }
    }
}
