use crate::args::ListArgs;
use crate::commands::{format_row, Out};
use crate::error::{ErrorType, IntoResult};
use crate::model::Transaction;
use crate::state::{App, AppState};
use crate::{Config, Result};
use anyhow::anyhow;
use chrono::Utc;

/// Lists the transactions in the chosen time frame that match the search text, in the chosen
/// order. Missing options fall back to the defaults in the config file.
pub async fn list(config: Config, args: ListArgs) -> Result<Out<Vec<Transaction>>> {
    let frame = args.time_frame().unwrap_or(config.time_frame());
    let sort = args.sort().unwrap_or(config.sort_option());
    let mut app = App::with_state(config.store().clone(), AppState::new(frame, sort));
    app.load_transactions().await;
    if let Some(message) = app.state().error_message() {
        return Err(anyhow!("{message}")).pub_result(ErrorType::Store);
    }
    if let Some(search) = args.search() {
        app.set_search_text(search).await;
    }

    let transactions = app.state().filtered_transactions(Utc::now());
    let mut message = format!(
        "{} transaction{} ({}, {})",
        transactions.len(),
        if transactions.len() == 1 { "" } else { "s" },
        frame.label(),
        sort.label()
    );
    for t in &transactions {
        message.push('\n');
        message.push_str(&format_row(t));
    }
    Ok(Out::new(message, transactions))
}
