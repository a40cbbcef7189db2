//! Application state, the actions that change it, and the runtime that talks to the store.
//!
//! `reduce` is a pure function: it updates `AppState` and describes any store work as an `Effect`
//! without performing it. `App` owns the store, runs effects one at a time in the order they were
//! issued, feeds their results back in as actions and publishes every new state to subscribers.

use crate::editor::{Editor, EditorState, EditorStatus, Field, SaveCommand};
use crate::error::StoreError;
use crate::model::{Amount, Category, SortOption, TimeFrame, Transaction};
use crate::query;
use crate::store::TransactionStore;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::{BTreeMap, VecDeque};
use std::fmt::{Display, Formatter};
use tokio::sync::watch;
use tracing::{debug, trace, warn};
use uuid::Uuid;

#[derive(Debug, Default, Clone, Eq, PartialEq, Serialize)]
pub struct AppState {
    transactions: Vec<Transaction>,
    time_frame: TimeFrame,
    search_text: String,
    sort_option: SortOption,
    editor: Editor,
    error_message: Option<String>,
}

impl AppState {
    /// An empty state with the given view parameters.
    pub fn new(time_frame: TimeFrame, sort_option: SortOption) -> Self {
        Self {
            time_frame,
            sort_option,
            ..Self::default()
        }
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn time_frame(&self) -> TimeFrame {
        self.time_frame
    }

    pub fn search_text(&self) -> &str {
        &self.search_text
    }

    pub fn sort_option(&self) -> SortOption {
        self.sort_option
    }

    pub fn editor(&self) -> &Editor {
        &self.editor
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    pub fn total_income(&self) -> Amount {
        query::total_income(&self.transactions)
    }

    pub fn total_expense(&self) -> Amount {
        query::total_expense(&self.transactions)
    }

    pub fn balance(&self) -> Amount {
        query::balance(&self.transactions)
    }

    /// Time-frame filtered and sorted, ignoring the search text. Used by the dashboard.
    pub fn display_transactions(&self, now: DateTime<Utc>) -> Vec<Transaction> {
        query::display_view(&self.transactions, self.time_frame, self.sort_option, now)
    }

    /// The display list narrowed by the search text. Used by the transaction list.
    pub fn filtered_transactions(&self, now: DateTime<Utc>) -> Vec<Transaction> {
        query::search_filter(&self.display_transactions(now), &self.search_text)
    }

    pub fn expenses_by_category(&self, now: DateTime<Utc>) -> BTreeMap<Category, Amount> {
        query::aggregate_by_category(&self.display_transactions(now))
    }

    pub fn summary(&self, now: DateTime<Utc>) -> query::Summary {
        query::Summary::build(&self.transactions, self.time_frame, self.sort_option, now)
    }
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub enum Action {
    LoadTransactions,
    TransactionsLoaded(Vec<Transaction>),
    TransactionsLoadFailed(String),
    SetTimeFrame(TimeFrame),
    SetSearchText(String),
    SetSortOption(SortOption),
    /// Opens a blank editor whose date defaults to `now`.
    BeginAdd { now: DateTime<Utc> },
    BeginEdit(Transaction),
    ChangeField(Field),
    Save,
    SaveSucceeded,
    SaveFailed(String),
    Cancel,
    EditorClosed,
    Delete(Uuid),
    DeleteSucceeded(Uuid),
    DeleteFailed(String),
    DismissError,
}

impl Action {
    /// A short name for logging, without the payload.
    pub fn name(&self) -> &'static str {
        match self {
            Action::LoadTransactions => "load_transactions",
            Action::TransactionsLoaded(_) => "transactions_loaded",
            Action::TransactionsLoadFailed(_) => "transactions_load_failed",
            Action::SetTimeFrame(_) => "set_time_frame",
            Action::SetSearchText(_) => "set_search_text",
            Action::SetSortOption(_) => "set_sort_option",
            Action::BeginAdd { .. } => "begin_add",
            Action::BeginEdit(_) => "begin_edit",
            Action::ChangeField(_) => "change_field",
            Action::Save => "save",
            Action::SaveSucceeded => "save_succeeded",
            Action::SaveFailed(_) => "save_failed",
            Action::Cancel => "cancel",
            Action::EditorClosed => "editor_closed",
            Action::Delete(_) => "delete",
            Action::DeleteSucceeded(_) => "delete_succeeded",
            Action::DeleteFailed(_) => "delete_failed",
            Action::DismissError => "dismiss_error",
        }
    }
}

/// Work the reducer asks the runtime to do.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum Effect {
    None,
    FetchAll,
    Save(SaveCommand),
    Delete(Uuid),
    /// Feed another action back into the reducer.
    Send(Action),
    /// Run several effects in order.
    Batch(Vec<Effect>),
}

/// The store operation a failure message is about.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum StoreOp {
    Fetch,
    Add,
    Update,
    Delete,
}

impl Display for StoreOp {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreOp::Fetch => f.write_str("Fetch"),
            StoreOp::Add => f.write_str("Add"),
            StoreOp::Update => f.write_str("Update"),
            StoreOp::Delete => f.write_str("Delete"),
        }
    }
}

/// The message shown to the user when a store call fails. There is one message per operation and
/// cause: a missing record is called out, every other failure reads "<Op> failed".
pub fn failure_message(op: StoreOp, error: &StoreError) -> String {
    if error.is_not_found() {
        format!("{op} failed: transaction not found")
    } else {
        format!("{op} failed")
    }
}

/// Applies `action` to `state` and returns the effect the runtime should perform next.
pub fn reduce(state: &mut AppState, action: Action) -> Effect {
    match action {
        Action::LoadTransactions => Effect::FetchAll,
        Action::TransactionsLoaded(transactions) => {
            state.transactions = transactions;
            Effect::None
        }
        Action::TransactionsLoadFailed(message) => {
            state.error_message = Some(message);
            Effect::None
        }
        Action::SetTimeFrame(frame) => {
            state.time_frame = frame;
            Effect::None
        }
        Action::SetSearchText(text) => {
            state.search_text = text;
            Effect::None
        }
        Action::SetSortOption(option) => {
            state.sort_option = option;
            Effect::None
        }
        Action::BeginAdd { now } => {
            state.editor = Editor::Open(EditorState::new(now));
            Effect::None
        }
        Action::BeginEdit(transaction) => {
            state.editor = Editor::Open(EditorState::editing(&transaction));
            Effect::None
        }
        Action::ChangeField(field) => {
            if let Some(editor) = state.editor.state_mut() {
                editor.change(field);
            }
            Effect::None
        }
        Action::Save => {
            let Some(editor) = state.editor.state_mut() else {
                debug!("Save requested with no open editor");
                return Effect::None;
            };
            if matches!(
                editor.status(),
                EditorStatus::Saving | EditorStatus::Completed
            ) {
                debug!("Ignoring save while the editor is {:?}", editor.status());
                return Effect::None;
            }
            match editor.save() {
                Ok(command) => Effect::Save(command),
                Err(e) => {
                    debug!("Draft rejected: {e}");
                    Effect::None
                }
            }
        }
        Action::SaveSucceeded => match state.editor.state_mut() {
            Some(editor) => {
                editor.save_succeeded();
                Effect::Batch(vec![
                    Effect::Send(Action::EditorClosed),
                    Effect::Send(Action::LoadTransactions),
                ])
            }
            None => Effect::Send(Action::LoadTransactions),
        },
        Action::SaveFailed(message) => {
            if let Some(editor) = state.editor.state_mut() {
                editor.save_failed(message);
            }
            Effect::None
        }
        Action::Cancel => match state.editor.state_mut() {
            Some(editor) => {
                editor.cancel();
                Effect::Send(Action::EditorClosed)
            }
            None => Effect::None,
        },
        Action::EditorClosed => {
            state.editor = Editor::Closed;
            Effect::None
        }
        Action::Delete(id) => Effect::Delete(id),
        Action::DeleteSucceeded(id) => {
            state.transactions.retain(|t| t.id() != id);
            Effect::FetchAll
        }
        Action::DeleteFailed(message) => {
            state.error_message = Some(message);
            Effect::None
        }
        Action::DismissError => {
            state.error_message = None;
            Effect::None
        }
    }
}

/// Drives `reduce` against a concrete store.
///
/// `dispatch` takes `&mut self`, so there is never more than one store call in flight and actions
/// are handled in the order they are issued. Store calls are not cancelled, retried or applied
/// optimistically.
pub struct App<S> {
    store: S,
    state: AppState,
    notifier: watch::Sender<AppState>,
    last_saved: Option<Transaction>,
    last_deleted: Option<Uuid>,
}

impl<S> App<S>
where
    S: TransactionStore,
{
    pub fn new(store: S) -> Self {
        Self::with_state(store, AppState::default())
    }

    pub fn with_state(store: S, state: AppState) -> Self {
        let (notifier, _) = watch::channel(state.clone());
        Self {
            store,
            state,
            notifier,
            last_saved: None,
            last_deleted: None,
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// The record written by the most recent successful save, as it was sent to the store.
    pub fn last_saved(&self) -> Option<&Transaction> {
        self.last_saved.as_ref()
    }

    /// Returns a receiver that observes every state the app moves through.
    pub fn subscribe(&self) -> watch::Receiver<AppState> {
        self.notifier.subscribe()
    }

    /// Runs `action` and everything it causes until no work is left.
    pub async fn dispatch(&mut self, action: Action) {
        let mut queue = VecDeque::from([action]);
        while let Some(action) = queue.pop_front() {
            debug!("Dispatching {}", action.name());
            let effect = reduce(&mut self.state, action);
            self.notifier.send_replace(self.state.clone());
            self.perform(effect, &mut queue).await;
        }
    }

    async fn perform(&mut self, effect: Effect, queue: &mut VecDeque<Action>) {
        let mut pending = VecDeque::from([effect]);
        while let Some(effect) = pending.pop_front() {
            trace!("Performing {effect:?}");
            match effect {
                Effect::None => {}
                Effect::Send(action) => queue.push_back(action),
                Effect::Batch(effects) => pending.extend(effects),
                Effect::FetchAll => queue.push_back(self.fetch_all().await),
                Effect::Save(command) => queue.push_back(self.save_command(command).await),
                Effect::Delete(id) => queue.push_back(self.run_delete(id).await),
            }
        }
    }

    async fn fetch_all(&self) -> Action {
        match self.store.fetch_all().await {
            Ok(transactions) => {
                debug!("Loaded {} transactions", transactions.len());
                Action::TransactionsLoaded(transactions)
            }
            Err(e) => {
                warn!("Failed to load transactions: {e}");
                Action::TransactionsLoadFailed(failure_message(StoreOp::Fetch, &e))
            }
        }
    }

    async fn save_command(&mut self, command: SaveCommand) -> Action {
        let (op, transaction, result) = match command {
            SaveCommand::Add(fields) => {
                let transaction = Transaction::new(fields);
                debug!("Adding transaction {}", transaction.id());
                let result = self.store.add(transaction.clone()).await;
                (StoreOp::Add, transaction, result)
            }
            SaveCommand::Update { id, fields } => {
                debug!("Updating transaction {id}");
                let transaction = Transaction::with_id(id, fields.clone());
                let result = self.store.update_by_id(id, fields).await;
                (StoreOp::Update, transaction, result)
            }
        };
        match result {
            Ok(()) => {
                self.last_saved = Some(transaction);
                Action::SaveSucceeded
            }
            Err(e) => {
                warn!("Failed to save transaction: {e}");
                Action::SaveFailed(failure_message(op, &e))
            }
        }
    }

    async fn run_delete(&mut self, id: Uuid) -> Action {
        match self.store.delete_by_id(id).await {
            Ok(()) => {
                self.last_deleted = Some(id);
                Action::DeleteSucceeded(id)
            }
            Err(e) => {
                warn!("Failed to delete transaction {id}: {e}");
                Action::DeleteFailed(failure_message(StoreOp::Delete, &e))
            }
        }
    }

    pub async fn load_transactions(&mut self) {
        self.dispatch(Action::LoadTransactions).await
    }

    pub async fn set_time_frame(&mut self, frame: TimeFrame) {
        self.dispatch(Action::SetTimeFrame(frame)).await
    }

    pub async fn set_search_text(&mut self, text: impl Into<String>) {
        self.dispatch(Action::SetSearchText(text.into())).await
    }

    pub async fn set_sort_option(&mut self, option: SortOption) {
        self.dispatch(Action::SetSortOption(option)).await
    }

    pub async fn begin_add(&mut self) {
        self.dispatch(Action::BeginAdd { now: Utc::now() }).await
    }

    pub async fn begin_edit(&mut self, transaction: Transaction) {
        self.dispatch(Action::BeginEdit(transaction)).await
    }

    pub async fn change_field(&mut self, field: Field) {
        self.dispatch(Action::ChangeField(field)).await
    }

    /// Saves the open draft and reports where the editor ended up: `Completed` once the store has
    /// accepted the write (the editor is closed by then), otherwise the editor's current status.
    /// A failed reload after the write shows up in `error_message` and does not change the answer.
    pub async fn save(&mut self) -> EditorStatus {
        self.last_saved = None;
        self.dispatch(Action::Save).await;
        match self.state.editor() {
            Editor::Closed => EditorStatus::Completed,
            Editor::Open(editor) => editor.status().clone(),
        }
    }

    pub async fn cancel(&mut self) {
        self.dispatch(Action::Cancel).await
    }

    /// Deletes the record with `id`. Returns whether the store removed it, which stays true when
    /// only the reload that follows fails.
    pub async fn delete(&mut self, id: Uuid) -> bool {
        self.last_deleted = None;
        self.dispatch(Action::Delete(id)).await;
        self.last_deleted == Some(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationError;
    use crate::model::{TransactionFields, TransactionType};
    use crate::store::MemoryStore;
    use crate::test::{sample_transaction, FailOn, MockStore, StoreCall};
    use std::str::FromStr;

    fn amt(s: &str) -> Amount {
        Amount::from_str(s).unwrap()
    }

    #[test]
    fn test_reduce_parameters_have_no_effect() {
        let mut state = AppState::default();
        assert_eq!(
            reduce(&mut state, Action::SetTimeFrame(TimeFrame::Year)),
            Effect::None
        );
        assert_eq!(
            reduce(&mut state, Action::SetSearchText("rent".into())),
            Effect::None
        );
        assert_eq!(
            reduce(&mut state, Action::SetSortOption(SortOption::TitleAscending)),
            Effect::None
        );
        assert_eq!(state.time_frame(), TimeFrame::Year);
        assert_eq!(state.search_text(), "rent");
        assert_eq!(state.sort_option(), SortOption::TitleAscending);
    }

    #[test]
    fn test_reduce_load_and_delete_effects() {
        let mut state = AppState::default();
        assert_eq!(reduce(&mut state, Action::LoadTransactions), Effect::FetchAll);
        let id = Uuid::new_v4();
        assert_eq!(reduce(&mut state, Action::Delete(id)), Effect::Delete(id));
    }

    #[test]
    fn test_reduce_save_without_editor_is_noop() {
        let mut state = AppState::default();
        assert_eq!(reduce(&mut state, Action::Save), Effect::None);
        assert_eq!(reduce(&mut state, Action::Cancel), Effect::None);
        assert_eq!(state, AppState::default());
    }

    #[test]
    fn test_failure_messages() {
        let id = Uuid::new_v4();
        assert_eq!(
            failure_message(StoreOp::Delete, &StoreError::WriteFailed("io".into())),
            "Delete failed"
        );
        assert_eq!(
            failure_message(StoreOp::Delete, &StoreError::NotFound(id)),
            "Delete failed: transaction not found"
        );
        assert_eq!(
            failure_message(StoreOp::Fetch, &StoreError::Unavailable("locked".into())),
            "Fetch failed"
        );
    }

    #[tokio::test]
    async fn test_load_transactions() {
        let t = sample_transaction("Groceries", "100", 1);
        let mut app = App::new(MockStore::with_transactions([t.clone()]));
        app.load_transactions().await;
        assert_eq!(app.state().transactions(), &[t]);
        assert_eq!(app.state().error_message(), None);
    }

    #[tokio::test]
    async fn test_load_failure_sets_message() {
        let t = sample_transaction("Groceries", "100", 1);
        let mut app = App::with_state(
            MockStore::failing(FailOn::FetchAll),
            AppState {
                transactions: vec![t.clone()],
                ..AppState::default()
            },
        );
        app.load_transactions().await;
        assert_eq!(app.state().error_message(), Some("Fetch failed"));
        assert_eq!(app.state().transactions(), &[t]);
    }

    #[tokio::test]
    async fn test_add_flow_issues_one_add() {
        let mut app = App::new(MockStore::default());
        app.begin_add().await;
        app.change_field(Field::Title("Travel".into())).await;
        app.change_field(Field::Amount(amt("50"))).await;
        app.change_field(Field::Type(TransactionType::Expense)).await;
        app.change_field(Field::Category(Category::Travel)).await;
        let draft = app.state().editor().state().unwrap().draft().to_fields();

        let status = app.save().await;
        assert_eq!(status, EditorStatus::Completed);
        assert!(!app.state().editor().is_open());

        let adds: Vec<_> = app
            .store()
            .calls()
            .into_iter()
            .filter_map(|c| match c {
                StoreCall::Add(t) => Some(t),
                _ => None,
            })
            .collect();
        assert_eq!(adds.len(), 1);
        assert_eq!(adds[0].fields(), draft);
        assert_eq!(adds[0].title(), "Travel");
        assert_eq!(adds[0].amount(), amt("50"));
        assert_eq!(adds[0].kind(), TransactionType::Expense);
        assert_eq!(adds[0].category(), Category::Travel);

        // the list is reloaded after the save
        assert_eq!(app.state().transactions(), &adds[..]);
    }

    #[tokio::test]
    async fn test_edit_flow_issues_one_update() {
        let existing = sample_transaction("Old Title", "50", 2);
        let mut app = App::new(MockStore::with_transactions([existing.clone()]));
        app.load_transactions().await;
        app.begin_edit(existing.clone()).await;
        app.change_field(Field::Title("Rent".into())).await;
        app.change_field(Field::Amount(amt("100"))).await;
        app.change_field(Field::Type(TransactionType::Income)).await;
        app.change_field(Field::Category(Category::Rental)).await;
        assert_eq!(app.save().await, EditorStatus::Completed);

        let updates: Vec<_> = app
            .store()
            .calls()
            .into_iter()
            .filter(|c| matches!(c, StoreCall::UpdateById(..)))
            .collect();
        assert_eq!(updates.len(), 1);
        let StoreCall::UpdateById(id, fields) = &updates[0] else {
            unreachable!()
        };
        assert_eq!(*id, existing.id());
        assert_eq!(fields.title, "Rent");
        assert_eq!(fields.category, Category::Rental);
        assert_eq!(app.state().transactions()[0].title(), "Rent");
        assert!(!app
            .store()
            .calls()
            .iter()
            .any(|c| matches!(c, StoreCall::Add(_))));
    }

    #[tokio::test]
    async fn test_invalid_draft_makes_no_store_call() {
        let mut app = App::new(MockStore::default());
        app.begin_add().await;
        app.change_field(Field::Amount(amt("50"))).await;
        let before = app.state().editor().state().unwrap().draft().clone();

        let status = app.save().await;
        assert_eq!(
            status,
            EditorStatus::Rejected(ValidationError::TitleEmpty)
        );
        assert!(app.store().calls().is_empty());
        assert_eq!(app.state().editor().state().unwrap().draft(), &before);
    }

    #[tokio::test]
    async fn test_failed_save_keeps_editor_open() {
        let mut app = App::new(MockStore::failing(FailOn::Add));
        app.begin_add().await;
        app.change_field(Field::Title("Salary".into())).await;
        app.change_field(Field::Amount(amt("2000"))).await;
        let status = app.save().await;
        assert_eq!(status, EditorStatus::Failed("Add failed".into()));
        let editor = app.state().editor().state().unwrap();
        assert_eq!(editor.draft().title, "Salary");
        assert!(app.state().transactions().is_empty());
    }

    #[tokio::test]
    async fn test_failed_update_keeps_draft_and_list() {
        let existing = sample_transaction("Groceries", "40", 1);
        let mut app = App::new(MockStore::failing(FailOn::UpdateById));
        app.store().seed([existing.clone()]);
        app.load_transactions().await;
        app.begin_edit(existing.clone()).await;
        app.change_field(Field::Title("Market".into())).await;

        let status = app.save().await;
        assert_eq!(status, EditorStatus::Failed("Update failed".into()));
        let editor = app.state().editor().state().unwrap();
        assert!(editor.is_editing());
        assert_eq!(editor.draft().title, "Market");
        assert_eq!(app.state().transactions(), &[existing]);
        assert!(app.last_saved().is_none());
    }

    #[tokio::test]
    async fn test_save_succeeds_when_reload_fails() {
        let mut app = App::new(MockStore::failing(FailOn::FetchAll));
        app.begin_add().await;
        app.change_field(Field::Title("Bonus".into())).await;
        app.change_field(Field::Amount(amt("300"))).await;

        assert_eq!(app.save().await, EditorStatus::Completed);
        let saved = app.last_saved().unwrap();
        assert_eq!(saved.title(), "Bonus");
        assert!(app
            .store()
            .calls()
            .contains(&StoreCall::Add(saved.clone())));
        assert_eq!(app.state().error_message(), Some("Fetch failed"));
    }

    #[tokio::test]
    async fn test_cancel_closes_without_store_call() {
        let mut app = App::new(MockStore::default());
        app.begin_add().await;
        app.change_field(Field::Title("draft".into())).await;
        app.cancel().await;
        assert!(!app.state().editor().is_open());
        assert!(app.store().calls().is_empty());
    }

    #[tokio::test]
    async fn test_delete_success_removes_record() {
        let keep = sample_transaction("Keep", "1", 1);
        let gone = sample_transaction("Gone", "2", 1);
        let mut app = App::new(MemoryStore::with_transactions([keep.clone(), gone.clone()]));
        app.load_transactions().await;
        assert!(app.delete(gone.id()).await);
        assert_eq!(app.state().transactions(), &[keep]);
        assert_eq!(app.state().error_message(), None);
    }

    #[tokio::test]
    async fn test_delete_failure_keeps_record() {
        let x = sample_transaction("X", "10", 1);
        let mut app = App::new(MockStore::failing(FailOn::DeleteById));
        app.store().seed([x.clone()]);
        app.load_transactions().await;
        assert!(!app.delete(x.id()).await);
        assert_eq!(app.state().transactions(), &[x]);
        assert_eq!(app.state().error_message(), Some("Delete failed"));

        app.dispatch(Action::DismissError).await;
        assert_eq!(app.state().error_message(), None);
    }

    #[tokio::test]
    async fn test_delete_succeeds_when_reload_fails() {
        let x = sample_transaction("X", "10", 1);
        let y = sample_transaction("Y", "20", 1);
        let mut app = App::with_state(
            MockStore::failing(FailOn::FetchAll),
            AppState {
                transactions: vec![x.clone(), y.clone()],
                ..AppState::default()
            },
        );
        app.store().seed([x.clone(), y.clone()]);

        assert!(app.delete(x.id()).await);
        assert_eq!(app.state().transactions(), &[y]);
        assert_eq!(app.state().error_message(), Some("Fetch failed"));
    }

    #[tokio::test]
    async fn test_delete_missing_id() {
        let mut app = App::new(MemoryStore::new());
        assert!(!app.delete(Uuid::new_v4()).await);
        assert_eq!(
            app.state().error_message(),
            Some("Delete failed: transaction not found")
        );
    }

    #[tokio::test]
    async fn test_subscribers_see_latest_state() {
        let mut app = App::new(MockStore::default());
        let mut rx = app.subscribe();
        app.begin_add().await;
        assert!(rx.has_changed().unwrap());
        assert!(rx.borrow_and_update().editor().is_open());

        app.change_field(Field::Title("Bonus".into())).await;
        app.change_field(Field::Amount(amt("300"))).await;
        app.change_field(Field::Category(Category::Business)).await;
        app.save().await;
        let latest = rx.borrow_and_update().clone();
        assert!(!latest.editor().is_open());
        assert_eq!(latest.transactions().len(), 1);
    }

    #[tokio::test]
    async fn test_derived_views() {
        let now = Utc::now();
        let food = Transaction::new(TransactionFields {
            title: "Lunch".into(),
            amount: amt("12"),
            date: now,
            notes: None,
            kind: TransactionType::Expense,
            category: Category::Food,
        });
        let pay = Transaction::new(TransactionFields {
            title: "Pay".into(),
            amount: amt("100"),
            date: now,
            notes: None,
            kind: TransactionType::Income,
            category: Category::Salary,
        });
        let mut app = App::new(MemoryStore::with_transactions([food, pay]));
        app.load_transactions().await;
        app.set_search_text("lun").await;
        let state = app.state();
        assert_eq!(state.filtered_transactions(now).len(), 1);
        assert_eq!(state.display_transactions(now).len(), 2);
        assert_eq!(state.expenses_by_category(now)[&Category::Food], amt("12"));
        assert_eq!(state.balance(), amt("88"));
        assert_eq!(state.summary(now).total_income, amt("100"));
    }
}
