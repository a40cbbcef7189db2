//! Persistence for transactions.
//!
//! The rest of the crate only talks to the `TransactionStore` trait. The store owns durability and
//! nothing else: ordering for display, filtering and validation all happen elsewhere.

mod memory;
mod sqlite;

use crate::error::StoreError;
use crate::model::{Transaction, TransactionFields};
use async_trait::async_trait;
use uuid::Uuid;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// The four operations the app needs from persistent storage. Updates and deletes address a
/// record by id only, never by position.
#[async_trait]
pub trait TransactionStore: Send + Sync {
    /// Returns every stored transaction, oldest first.
    async fn fetch_all(&self) -> StoreResult<Vec<Transaction>>;

    async fn add(&self, transaction: Transaction) -> StoreResult<()>;

    /// Overwrites every field of the record with `id`. Fails with `StoreError::NotFound` if there
    /// is no such record.
    async fn update_by_id(&self, id: Uuid, fields: TransactionFields) -> StoreResult<()>;

    /// Fails with `StoreError::NotFound` if there is no such record.
    async fn delete_by_id(&self, id: Uuid) -> StoreResult<()>;
}
