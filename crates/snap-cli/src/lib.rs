//! Expense Snap CLI library.
//!
//! Scans receipts through the extraction pipeline and manages the expense
//! ledger in the configured store.

#![warn(missing_docs)]

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod output;

pub use cli::{Cli, Command};
pub use config::Config;
pub use error::{CliError, Result};
pub use output::Formatter;
