use crate::error::StoreError;
use crate::model::{Transaction, TransactionFields};
use crate::store::{StoreResult, TransactionStore};
use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

/// A `TransactionStore` that keeps everything in memory. Nothing survives the process.
#[derive(Debug, Default)]
pub struct MemoryStore {
    data: RwLock<Vec<Transaction>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_transactions(transactions: impl IntoIterator<Item = Transaction>) -> Self {
        Self {
            data: RwLock::new(transactions.into_iter().collect()),
        }
    }

    pub async fn len(&self) -> usize {
        self.data.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.data.read().await.is_empty()
    }
}

#[async_trait]
impl TransactionStore for MemoryStore {
    async fn fetch_all(&self) -> StoreResult<Vec<Transaction>> {
        let mut all = self.data.read().await.clone();
        all.sort_by_key(Transaction::date);
        Ok(all)
    }

    async fn add(&self, transaction: Transaction) -> StoreResult<()> {
        let mut data = self.data.write().await;
        if data.iter().any(|t| t.id() == transaction.id()) {
            return Err(StoreError::WriteFailed(format!(
                "a transaction with id {} already exists",
                transaction.id()
            )));
        }
        data.push(transaction);
        Ok(())
    }

    async fn update_by_id(&self, id: Uuid, fields: TransactionFields) -> StoreResult<()> {
        let mut data = self.data.write().await;
        let existing = data
            .iter_mut()
            .find(|t| t.id() == id)
            .ok_or(StoreError::NotFound(id))?;
        existing.apply(fields);
        Ok(())
    }

    async fn delete_by_id(&self, id: Uuid) -> StoreResult<()> {
        let mut data = self.data.write().await;
        let before = data.len();
        data.retain(|t| t.id() != id);
        if data.len() == before {
            return Err(StoreError::NotFound(id));
        }
        Ok(())
    }
}
