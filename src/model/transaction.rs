use crate::model::{Amount, Category, TransactionType};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single recorded income or expense.
///
/// Nothing here enforces that `category` agrees with `kind` or that `title` is non-empty. Those
/// rules are checked by the editor before a record is written, so records created by other means
/// may violate them and everything that reads transactions has to tolerate that.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Transaction {
    pub(crate) id: Uuid,
    pub(crate) title: String,
    pub(crate) amount: Amount,
    pub(crate) date: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) notes: Option<String>,
    #[serde(rename = "type")]
    pub(crate) kind: TransactionType,
    pub(crate) category: Category,
}

impl Transaction {
    /// Creates a transaction with a freshly generated id.
    pub fn new(fields: TransactionFields) -> Self {
        Self::with_id(Uuid::new_v4(), fields)
    }

    pub fn with_id(id: Uuid, fields: TransactionFields) -> Self {
        let TransactionFields {
            title,
            amount,
            date,
            notes,
            kind,
            category,
        } = fields;
        Self {
            id,
            title,
            amount,
            date,
            notes,
            kind,
            category,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn amount(&self) -> Amount {
        self.amount
    }

    /// The SQLite store keeps dates to the microsecond. Drafts are truncated to that precision
    /// before they are saved.
    pub fn date(&self) -> DateTime<Utc> {
        self.date
    }

    pub fn notes(&self) -> Option<&str> {
        self.notes.as_deref()
    }

    pub fn kind(&self) -> TransactionType {
        self.kind
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn is_income(&self) -> bool {
        self.kind == TransactionType::Income
    }

    pub fn is_expense(&self) -> bool {
        self.kind == TransactionType::Expense
    }

    /// Everything except the id.
    pub fn fields(&self) -> TransactionFields {
        TransactionFields {
            title: self.title.clone(),
            amount: self.amount,
            date: self.date,
            notes: self.notes.clone(),
            kind: self.kind,
            category: self.category,
        }
    }

    /// Overwrites every field except the id.
    pub fn apply(&mut self, fields: TransactionFields) {
        let id = self.id;
        *self = Self::with_id(id, fields);
    }
}

/// The mutable part of a transaction. This is what an update-by-id writes and what a new record is
/// built from.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct TransactionFields {
    pub title: String,
    pub amount: Amount,
    pub date: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(rename = "type")]
    pub kind: TransactionType,
    pub category: Category,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn fields() -> TransactionFields {
        TransactionFields {
            title: "Groceries".to_string(),
            amount: Amount::from_str("100").unwrap(),
            date: DateTime::parse_from_rfc3339("2025-04-18T10:00:00Z")
                .unwrap()
                .with_timezone(&Utc),
            notes: Some("Weekly".to_string()),
            kind: TransactionType::Expense,
            category: Category::Food,
        }
    }

    #[test]
    fn test_new_generates_distinct_ids() {
        let a = Transaction::new(fields());
        let b = Transaction::new(fields());
        assert_ne!(a.id(), b.id());
        assert_eq!(a.fields(), b.fields());
    }

    #[test]
    fn test_apply_keeps_id() {
        let mut t = Transaction::new(fields());
        let id = t.id();
        let mut changed = fields();
        changed.title = "Rent".to_string();
        changed.notes = None;
        t.apply(changed.clone());
        assert_eq!(t.id(), id);
        assert_eq!(t.fields(), changed);
        assert_eq!(t.notes(), None);
    }

    #[test]
    fn test_json_shape() {
        let t = Transaction::with_id(Uuid::nil(), fields());
        let json = serde_json::to_value(&t).unwrap();
        assert_eq!(json["type"], "expense");
        assert_eq!(json["category"], "food");
        assert_eq!(json["amount"], "100");
        let back: Transaction = serde_json::from_value(json).unwrap();
        assert_eq!(back, t);
    }
}
