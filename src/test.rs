//! Shared test utilities for creating test environments.
//!
//! This module is only compiled when running tests (`#[cfg(test)]`).

use crate::error::StoreError;
use crate::model::{Amount, Category, Transaction, TransactionFields, TransactionType};
use crate::store::{StoreResult, TransactionStore};
use crate::Config;
use async_trait::async_trait;
use chrono::{DateTime, Duration, TimeZone, Utc};
use std::str::FromStr;
use std::sync::Mutex;
use tempfile::TempDir;
use uuid::Uuid;

/// Test environment that sets up a penny home directory with Config and database.
/// Holds TempDir to keep the directory alive for the duration of the test.
pub struct TestEnv {
    _temp_dir: TempDir,
    config: Config,
}

impl TestEnv {
    /// Creates a test environment with Config and initialized database.
    pub async fn new() -> Self {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().join("penny");
        let config = Config::create(&root).await.unwrap();
        Self {
            _temp_dir: temp_dir,
            config,
        }
    }

    /// Returns a clone of the Config.
    pub fn config(&self) -> Config {
        self.config.clone()
    }

    /// Writes `transactions` straight into the database.
    pub async fn insert_transactions(&self, transactions: &[Transaction]) {
        for t in transactions {
            self.config.store().add(t.clone()).await.unwrap();
        }
    }
}

/// A fixed, whole-second reference time so that stored dates compare equal after a round trip.
pub fn base_date() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 4, 30, 12, 0, 0).unwrap()
}

/// A food expense dated `days_ago` days before `base_date`.
pub fn sample_transaction(title: &str, amount: &str, days_ago: i64) -> Transaction {
    Transaction::new(TransactionFields {
        title: title.to_string(),
        amount: Amount::from_str(amount).unwrap(),
        date: base_date() - Duration::days(days_ago),
        notes: None,
        kind: TransactionType::Expense,
        category: Category::Food,
    })
}

/// A store call as seen by `MockStore`.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum StoreCall {
    FetchAll,
    Add(Transaction),
    UpdateById(Uuid, TransactionFields),
    DeleteById(Uuid),
}

/// Which operation a `MockStore` should fail.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum FailOn {
    FetchAll,
    Add,
    UpdateById,
    DeleteById,
}

/// An in-memory store that records every call it receives and can be told to fail one operation.
#[derive(Debug, Default)]
pub struct MockStore {
    data: Mutex<Vec<Transaction>>,
    calls: Mutex<Vec<StoreCall>>,
    fail_on: Option<FailOn>,
}

impl MockStore {
    pub fn with_transactions(transactions: impl IntoIterator<Item = Transaction>) -> Self {
        Self {
            data: Mutex::new(transactions.into_iter().collect()),
            ..Self::default()
        }
    }

    pub fn failing(fail_on: FailOn) -> Self {
        Self {
            fail_on: Some(fail_on),
            ..Self::default()
        }
    }

    /// Adds records without recording a call.
    pub fn seed(&self, transactions: impl IntoIterator<Item = Transaction>) {
        self.data.lock().unwrap().extend(transactions);
    }

    pub fn calls(&self) -> Vec<StoreCall> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: StoreCall) {
        self.calls.lock().unwrap().push(call);
    }

    fn check(&self, op: FailOn) -> StoreResult<()> {
        match self.fail_on {
            Some(fail_on) if fail_on == op && op == FailOn::FetchAll => {
                Err(StoreError::Unavailable("injected failure".to_string()))
            }
            Some(fail_on) if fail_on == op => {
                Err(StoreError::WriteFailed("injected failure".to_string()))
            }
            _ => Ok(()),
        }
    }
}

#[async_trait]
impl TransactionStore for MockStore {
    async fn fetch_all(&self) -> StoreResult<Vec<Transaction>> {
        self.record(StoreCall::FetchAll);
        self.check(FailOn::FetchAll)?;
        let mut all = self.data.lock().unwrap().clone();
        all.sort_by_key(Transaction::date);
        Ok(all)
    }

    async fn add(&self, transaction: Transaction) -> StoreResult<()> {
        self.record(StoreCall::Add(transaction.clone()));
        self.check(FailOn::Add)?;
        self.data.lock().unwrap().push(transaction);
        Ok(())
    }

    async fn update_by_id(&self, id: Uuid, fields: TransactionFields) -> StoreResult<()> {
        self.record(StoreCall::UpdateById(id, fields.clone()));
        self.check(FailOn::UpdateById)?;
        let mut data = self.data.lock().unwrap();
        let t = data
            .iter_mut()
            .find(|t| t.id() == id)
            .ok_or(StoreError::NotFound(id))?;
        t.apply(fields);
        Ok(())
    }

    async fn delete_by_id(&self, id: Uuid) -> StoreResult<()> {
        self.record(StoreCall::DeleteById(id));
        self.check(FailOn::DeleteById)?;
        let mut data = self.data.lock().unwrap();
        let before = data.len();
        data.retain(|t| t.id() != id);
        if data.len() == before {
            return Err(StoreError::NotFound(id));
        }
        Ok(())
    }
}
