use crate::args::DeleteArgs;
use crate::commands::Out;
use crate::error::{ErrorType, IntoResult};
use crate::state::App;
use crate::store::TransactionStore;
use crate::{Config, Result};
use anyhow::anyhow;
use tracing::warn;
use uuid::Uuid;

/// Deletes one transaction by id.
pub async fn delete(config: Config, args: DeleteArgs) -> Result<Out<String>> {
    delete_with(App::new(config.store().clone()), args.id()).await
}

async fn delete_with<S: TransactionStore>(mut app: App<S>, id: Uuid) -> Result<Out<String>> {
    let deleted = app.delete(id).await;
    match app.state().error_message() {
        Some(message) if !deleted => Err(anyhow!("{message}")).pub_result(ErrorType::Store),
        Some(message) => {
            warn!("Transaction {id} was deleted but the list could not be reloaded: {message}");
            Ok(Out::new(
                format!("Deleted transaction {id} ({message})"),
                id.to_string(),
            ))
        }
        None => Ok(Out::new(format!("Deleted transaction {id}"), id.to_string())),
    }
}
