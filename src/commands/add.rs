use crate::args::AddArgs;
use crate::commands::{check_saved, format_row, Out};
use crate::editor::Field;
use crate::error::{ErrorType, IntoResult};
use crate::model::Transaction;
use crate::state::App;
use crate::store::TransactionStore;
use crate::{Config, Result};
use anyhow::anyhow;
use tracing::warn;

/// Records a new transaction. The values go through the same editor and validation as an
/// interactive add, so a bad title, amount or category/type pairing is rejected before anything is
/// written.
pub async fn add(config: Config, args: AddArgs) -> Result<Out<Transaction>> {
    add_with(App::new(config.store().clone()), args).await
}

async fn add_with<S>(mut app: App<S>, args: AddArgs) -> Result<Out<Transaction>>
where
    S: TransactionStore,
{
    app.begin_add().await;
    app.change_field(Field::Title(args.title().to_string())).await;
    app.change_field(Field::Amount(args.amount())).await;
    app.change_field(Field::Type(args.kind())).await;
    app.change_field(Field::Category(args.category())).await;
    if let Some(date) = args.date() {
        app.change_field(Field::Date(date)).await;
    }
    if let Some(notes) = args.notes() {
        app.change_field(Field::Notes(notes.to_string())).await;
    }
    check_saved(app.save().await)?;

    let added = app
        .last_saved()
        .cloned()
        .ok_or_else(|| anyhow!("The store did not report the new transaction"))
        .pub_result(ErrorType::Store)?;
    let mut message = format!("Added transaction\n{}", format_row(&added));
    if let Some(reload) = app.state().error_message() {
        warn!(
            "Transaction {} was added but the list could not be reloaded: {reload}",
            added.id()
        );
        message.push_str(&format!("\n({reload})"));
    }
    Ok(Out::new(message, added))
}
