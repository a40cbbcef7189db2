//! A `TransactionStore` backed by a single SQLite file.

use crate::error::StoreError;
use crate::model::{Amount, Category, Transaction, TransactionFields, TransactionType};
use crate::store::{StoreResult, TransactionStore};
use crate::Result;
use anyhow::{bail, Context};
use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions, SqliteRow};
use sqlx::{Executor, Row, SqlitePool};
use std::path::Path;
use std::str::FromStr;
use tracing::debug;
use uuid::Uuid;

const SCHEMA: &str = include_str!("schema.sql");

#[derive(Debug, Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// - Validates that no file currently exists at `path`
    /// - Creates a new SQLite file at `path`
    /// - Creates the schema
    pub async fn init(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            bail!("A database already exists at '{}'", path.display());
        }
        let store = Self::connect(path, true).await?;
        store.create_schema().await?;
        debug!("Created database at {}", path.display());
        Ok(store)
    }

    /// Opens an existing SQLite file at `path`, making sure the schema is present.
    pub async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.is_file() {
            bail!("The database file is missing '{}'", path.display());
        }
        let store = Self::connect(path, false).await?;
        store.create_schema().await?;
        Ok(store)
    }

    async fn connect(path: &Path, create: bool) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(&format!("sqlite:{}", path.display()))
            .context("Failed to parse SQLite connection string")?
            .create_if_missing(create);

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await
            .with_context(|| format!("Failed to open SQLite database at {}", path.display()))?;
        Ok(Self { pool })
    }

    async fn create_schema(&self) -> Result<()> {
        self.pool
            .execute(SCHEMA)
            .await
            .context("Failed to create the database schema")?;
        Ok(())
    }

    /// Closes the connection pool.
    pub async fn close(&self) {
        self.pool.close().await
    }
}

/// Timestamps are stored in UTC with a fixed precision so that text order is time order.
fn format_date(date: DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn from_row(row: &SqliteRow) -> anyhow::Result<Transaction> {
    let id: String = row.try_get("id")?;
    let amount: String = row.try_get("amount")?;
    let date: String = row.try_get("date")?;
    let kind: String = row.try_get("type")?;
    let category: String = row.try_get("category")?;

    let id = Uuid::parse_str(&id).with_context(|| format!("Bad transaction id '{id}'"))?;
    let fields = TransactionFields {
        title: row.try_get("title")?,
        amount: Amount::from_str(&amount).with_context(|| format!("Bad amount '{amount}'"))?,
        date: DateTime::parse_from_rfc3339(&date)
            .with_context(|| format!("Bad date '{date}'"))?
            .with_timezone(&Utc),
        notes: row.try_get("notes")?,
        kind: TransactionType::from_str(&kind).with_context(|| format!("Bad type '{kind}'"))?,
        category: Category::from_str(&category)
            .with_context(|| format!("Bad category '{category}'"))?,
    };
    Ok(Transaction::with_id(id, fields))
}

fn write_failed(e: sqlx::Error) -> StoreError {
    StoreError::WriteFailed(e.to_string())
}

#[async_trait]
impl TransactionStore for SqliteStore {
    async fn fetch_all(&self) -> StoreResult<Vec<Transaction>> {
        let rows = sqlx::query(
            "SELECT id, title, amount, date, notes, type, category FROM transactions \
             ORDER BY date ASC, rowid ASC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| StoreError::Unavailable(e.to_string()))?;

        rows.iter()
            .map(|row| from_row(row).map_err(|e| StoreError::Unavailable(format!("{e:#}"))))
            .collect()
    }

    async fn add(&self, transaction: Transaction) -> StoreResult<()> {
        sqlx::query(
            "INSERT INTO transactions (id, title, amount, date, notes, type, category) \
             VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(transaction.id().to_string())
        .bind(transaction.title())
        .bind(transaction.amount().to_plain_string())
        .bind(format_date(transaction.date()))
        .bind(transaction.notes())
        .bind(transaction.kind().to_string())
        .bind(transaction.category().to_string())
        .execute(&self.pool)
        .await
        .map_err(write_failed)?;
        Ok(())
    }

    async fn update_by_id(&self, id: Uuid, fields: TransactionFields) -> StoreResult<()> {
        let result = sqlx::query(
            "UPDATE transactions SET title = ?, amount = ?, date = ?, notes = ?, type = ?, \
             category = ? WHERE id = ?",
        )
        .bind(fields.title.as_str())
        .bind(fields.amount.to_plain_string())
        .bind(format_date(fields.date))
        .bind(fields.notes.as_deref())
        .bind(fields.kind.to_string())
        .bind(fields.category.to_string())
        .bind(id.to_string())
        .execute(&self.pool)
        .await
        .map_err(write_failed)?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound(id));
        }
        Ok(())
    }

    async fn delete_by_id(&self, id: Uuid) -> StoreResult<()> {
        let result = sqlx::query("DELETE FROM transactions WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(write_failed)?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound(id));
        }
        Ok(())
    }
}
