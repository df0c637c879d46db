//! Trait definitions for external interactions
//!
//! These traits define the boundaries between domain logic and infrastructure.
//! Infrastructure implementations live in other crates.

use crate::expense::{Expense, ExpenseDraft, ExpenseId};
use crate::image::InlineImage;
use async_trait::async_trait;
use std::sync::Arc;

/// Trait for multimodal model calls
///
/// Implemented by the infrastructure layer (snap-llm)
#[async_trait]
pub trait ModelProvider: Send + Sync {
    /// Error type for model calls
    type Error: std::error::Error + Send + Sync + 'static;

    /// Send one prompt plus one inline image and return the model's text reply
    async fn generate(&self, prompt: &str, image: &InlineImage) -> Result<String, Self::Error>;

    /// Fail fast when the provider cannot make calls at all (e.g. no credential)
    fn ensure_ready(&self) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Model identifier, for logs and health output
    fn model_name(&self) -> &str;
}

/// Trait for the expense store collaborator
///
/// Implemented by the infrastructure layer (snap-store)
#[async_trait]
pub trait ExpenseStore: Send + Sync {
    /// Error type for store operations
    type Error: std::error::Error + Send + Sync + 'static;

    /// All expenses, newest `recorded_at` first
    async fn list_all(&self) -> Result<Vec<Expense>, Self::Error>;

    /// Persist a draft; the store assigns `id` and `recorded_at`
    async fn insert(&self, draft: &ExpenseDraft) -> Result<Expense, Self::Error>;

    /// Overwrite the draft fields of an existing expense
    async fn update(&self, id: &ExpenseId, draft: &ExpenseDraft) -> Result<Expense, Self::Error>;

    /// Delete an expense; deleting an unknown id succeeds
    async fn delete(&self, id: &ExpenseId) -> Result<(), Self::Error>;

    /// Short backend name, for logs and health output
    fn backend_name(&self) -> &'static str;
}

#[async_trait]
impl<T: ModelProvider + ?Sized> ModelProvider for Arc<T> {
    type Error = T::Error;

    async fn generate(&self, prompt: &str, image: &InlineImage) -> Result<String, Self::Error> {
        (**self).generate(prompt, image).await
    }

    fn ensure_ready(&self) -> Result<(), Self::Error> {
        (**self).ensure_ready()
    }

    fn model_name(&self) -> &str {
        (**self).model_name()
    }
}

#[async_trait]
impl<T: ExpenseStore + ?Sized> ExpenseStore for Arc<T> {
    type Error = T::Error;

    async fn list_all(&self) -> Result<Vec<Expense>, Self::Error> {
        (**self).list_all().await
    }

    async fn insert(&self, draft: &ExpenseDraft) -> Result<Expense, Self::Error> {
        (**self).insert(draft).await
    }

    async fn update(&self, id: &ExpenseId, draft: &ExpenseDraft) -> Result<Expense, Self::Error> {
        (**self).update(id, draft).await
    }

    async fn delete(&self, id: &ExpenseId) -> Result<(), Self::Error> {
        (**self).delete(id).await
    }

    fn backend_name(&self) -> &'static str {
        (**self).backend_name()
    }
}
