//! Expense Snap Domain Layer
//!
//! Core value types and trait interfaces shared by every other crate in the
//! workspace. Infrastructure (model API client, stores, HTTP) lives elsewhere
//! and plugs in through the traits in [`traits`].
//!
//! ## Key Concepts
//!
//! - **ExpenseDraft**: an expense before it has a persistent identifier
//! - **Expense**: a draft plus `id` and `recorded_at`, the time it entered the system
//! - **Category**: fixed set of receipt categories, free text tolerated
//! - **Ledger**: newest-first in-memory list owned by a single session
//! - **InlineImage**: base64 image payload in the shape the model API expects

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod category;
pub mod dates;
pub mod error;
pub mod expense;
pub mod image;
pub mod ledger;
pub mod summary;
pub mod traits;

// Re-exports for convenience
pub use category::Category;
pub use error::ValidationError;
pub use expense::{Expense, ExpenseDraft, ExpenseId};
pub use image::{InlineImage, InlinePart};
pub use ledger::{Ledger, LedgerError};
pub use summary::{summarize, CategoryTotal};
