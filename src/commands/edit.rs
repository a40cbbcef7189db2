use crate::args::EditArgs;
use crate::commands::{check_saved, format_row, Out};
use crate::editor::Field;
use crate::error::{ErrorType, IntoResult};
use crate::model::Transaction;
use crate::state::App;
use crate::store::TransactionStore;
use crate::{Config, Result};
use anyhow::anyhow;
use tracing::warn;

/// Changes the fields of an existing transaction that were given in `args`. The record keeps its
/// id and is validated as a whole before it is written.
pub async fn edit(config: Config, args: EditArgs) -> Result<Out<Transaction>> {
    let mut app = App::new(config.store().clone());
    app.load_transactions().await;
    if let Some(message) = app.state().error_message() {
        return Err(anyhow!("{message}")).pub_result(ErrorType::Store);
    }
    edit_loaded(app, args).await
}

/// Edits a transaction from the list `app` has already loaded.
async fn edit_loaded<S>(mut app: App<S>, args: EditArgs) -> Result<Out<Transaction>>
where
    S: TransactionStore,
{
    let id = args.id();
    let original = app
        .state()
        .transactions()
        .iter()
        .find(|t| t.id() == id)
        .cloned()
        .ok_or_else(|| anyhow!("Transaction not found: {id}"))
        .pub_result(ErrorType::Request)?;

    app.begin_edit(original).await;
    if let Some(title) = args.title() {
        app.change_field(Field::Title(title.to_string())).await;
    }
    if let Some(amount) = args.amount() {
        app.change_field(Field::Amount(amount)).await;
    }
    if let Some(date) = args.date() {
        app.change_field(Field::Date(date)).await;
    }
    if let Some(notes) = args.notes() {
        app.change_field(Field::Notes(notes.to_string())).await;
    }
    // the type goes first so that an explicit category is not replaced by the type's default
    if let Some(kind) = args.kind() {
        app.change_field(Field::Type(kind)).await;
    }
    if let Some(category) = args.category() {
        app.change_field(Field::Category(category)).await;
    }
    check_saved(app.save().await)?;

    let updated = app
        .last_saved()
        .cloned()
        .ok_or_else(|| anyhow!("The store did not report the updated transaction"))
        .pub_result(ErrorType::Store)?;
    let mut message = format!("Updated transaction\n{}", format_row(&updated));
    if let Some(reload) = app.state().error_message() {
        warn!("Transaction {id} was updated but the list could not be reloaded: {reload}");
        message.push_str(&format!("\n({reload})"));
    }
    Ok(Out::new(message, updated))
}
