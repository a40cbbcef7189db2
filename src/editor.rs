//! The add/edit workflow for a single transaction.
//!
//! An editor starts either from defaults (`EditMode::New`) or from a copy of an existing record
//! (`EditMode::Editing`). Field changes always succeed. `save` validates the draft and, if it is
//! well-formed, hands back the store command to run; the caller reports the outcome with
//! `save_succeeded` or `save_failed`. The draft is never discarded on failure.

use crate::error::ValidationError;
use crate::model::{Amount, Category, Transaction, TransactionFields, TransactionType};
use chrono::{DateTime, SubsecRound, Utc};
use serde::Serialize;
use uuid::Uuid;

/// Dates are kept to the microsecond, the precision the SQLite store persists.
const DATE_SUBSEC_DIGITS: u16 = 6;

/// Whether an editor is open. There is no implicit "no editor" state.
#[derive(Debug, Default, Clone, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Editor {
    #[default]
    Closed,
    Open(EditorState),
}

impl Editor {
    pub fn is_open(&self) -> bool {
        matches!(self, Editor::Open(_))
    }

    pub fn state(&self) -> Option<&EditorState> {
        match self {
            Editor::Closed => None,
            Editor::Open(state) => Some(state),
        }
    }

    pub fn state_mut(&mut self) -> Option<&mut EditorState> {
        match self {
            Editor::Closed => None,
            Editor::Open(state) => Some(state),
        }
    }
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EditMode {
    New,
    /// Editing the stored record with this id.
    Editing(Uuid),
}

#[derive(Debug, Default, Clone, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EditorStatus {
    #[default]
    Drafting,
    /// `save` found the draft malformed. Nothing was sent to the store.
    Rejected(ValidationError),
    /// A store command was issued and has not reported back yet.
    Saving,
    /// The store command failed. The draft is intact so the user can retry.
    Failed(String),
    Completed,
}

/// The uncommitted field values.
#[derive(Debug, Clone, Eq, PartialEq, Serialize)]
pub struct Draft {
    pub title: String,
    pub amount: Amount,
    pub date: DateTime<Utc>,
    pub notes: String,
    pub kind: TransactionType,
    pub category: Category,
}

impl Draft {
    /// Defaults for a brand new transaction: an income in the salary category, dated `now`.
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            title: String::new(),
            amount: Amount::ZERO,
            date: now.trunc_subsecs(DATE_SUBSEC_DIGITS),
            notes: String::new(),
            kind: TransactionType::Income,
            category: Category::Salary,
        }
    }

    pub fn from_transaction(transaction: &Transaction) -> Self {
        Self {
            title: transaction.title().to_string(),
            amount: transaction.amount(),
            date: transaction.date(),
            notes: transaction.notes().unwrap_or_default().to_string(),
            kind: transaction.kind(),
            category: transaction.category(),
        }
    }

    /// Checks, in order and stopping at the first failure: the trimmed title is non-empty, the
    /// amount is positive, and the category belongs to the selected type.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.title.trim().is_empty() {
            return Err(ValidationError::TitleEmpty);
        }
        if !self.amount.is_positive() {
            return Err(ValidationError::AmountNotPositive);
        }
        if self.category.implied_type() != self.kind {
            return Err(ValidationError::CategoryTypeMismatch);
        }
        Ok(())
    }

    /// The values that will be written. Blank notes are stored as no notes.
    pub fn to_fields(&self) -> TransactionFields {
        let notes = if self.notes.trim().is_empty() {
            None
        } else {
            Some(self.notes.clone())
        };
        TransactionFields {
            title: self.title.clone(),
            amount: self.amount,
            date: self.date,
            notes,
            kind: self.kind,
            category: self.category,
        }
    }

    fn set_kind(&mut self, kind: TransactionType) {
        self.kind = kind;
        if self.category.implied_type() != kind {
            self.category = Category::first_of_type(kind).unwrap_or(Category::Salary);
        }
    }
}

/// A single-field change to a draft.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum Field {
    Title(String),
    Amount(Amount),
    Date(DateTime<Utc>),
    Notes(String),
    Type(TransactionType),
    Category(Category),
}

/// What the store should do to commit a valid draft.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum SaveCommand {
    Add(TransactionFields),
    Update { id: Uuid, fields: TransactionFields },
}

#[derive(Debug, Clone, Eq, PartialEq, Serialize)]
pub struct EditorState {
    mode: EditMode,
    draft: Draft,
    status: EditorStatus,
}

impl EditorState {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            mode: EditMode::New,
            draft: Draft::new(now),
            status: EditorStatus::Drafting,
        }
    }

    pub fn editing(transaction: &Transaction) -> Self {
        Self {
            mode: EditMode::Editing(transaction.id()),
            draft: Draft::from_transaction(transaction),
            status: EditorStatus::Drafting,
        }
    }

    pub fn mode(&self) -> EditMode {
        self.mode
    }

    pub fn draft(&self) -> &Draft {
        &self.draft
    }

    pub fn status(&self) -> &EditorStatus {
        &self.status
    }

    pub fn is_editing(&self) -> bool {
        matches!(self.mode, EditMode::Editing(_))
    }

    pub fn is_completed(&self) -> bool {
        self.status == EditorStatus::Completed
    }

    /// Overwrites one field. Changing the type also moves the category to the first category of
    /// the new type when the current one no longer fits.
    pub fn change(&mut self, field: Field) {
        match field {
            Field::Title(title) => self.draft.title = title,
            Field::Amount(amount) => self.draft.amount = amount,
            Field::Date(date) => self.draft.date = date.trunc_subsecs(DATE_SUBSEC_DIGITS),
            Field::Notes(notes) => self.draft.notes = notes,
            Field::Type(kind) => self.draft.set_kind(kind),
            Field::Category(category) => self.draft.category = category,
        }
        if matches!(
            self.status,
            EditorStatus::Rejected(_) | EditorStatus::Failed(_)
        ) {
            self.status = EditorStatus::Drafting;
        }
    }

    /// Validates the draft. On success the editor moves to `Saving` and the command to run is
    /// returned; on failure the editor records the rejection and the draft is left as it was.
    pub fn save(&mut self) -> Result<SaveCommand, ValidationError> {
        if let Err(e) = self.draft.validate() {
            self.status = EditorStatus::Rejected(e);
            return Err(e);
        }
        let fields = self.draft.to_fields();
        self.status = EditorStatus::Saving;
        Ok(match self.mode {
            EditMode::New => SaveCommand::Add(fields),
            EditMode::Editing(id) => SaveCommand::Update { id, fields },
        })
    }

    pub fn save_succeeded(&mut self) {
        self.status = EditorStatus::Completed;
    }

    pub fn save_failed(&mut self, message: impl Into<String>) {
        self.status = EditorStatus::Failed(message.into());
    }

    /// Abandons the draft without touching the store.
    pub fn cancel(&mut self) {
        self.status = EditorStatus::Completed;
    }
}
