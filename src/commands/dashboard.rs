use crate::args::DashboardArgs;
use crate::commands::{format_row, Out};
use crate::error::{ErrorType, IntoResult};
use crate::query::Summary;
use crate::state::{App, AppState};
use crate::{Config, Result};
use anyhow::{anyhow, Context};
use chrono::Utc;
use std::fmt::Write;

/// Builds the dashboard: overall totals, the expense breakdown for the time frame (largest
/// first) and the most recent transactions in the time frame.
pub async fn dashboard(config: Config, args: DashboardArgs) -> Result<Out<Summary>> {
    let frame = args.time_frame().unwrap_or(config.time_frame());
    let sort = args.sort().unwrap_or(config.sort_option());
    let mut app = App::with_state(config.store().clone(), AppState::new(frame, sort));
    app.load_transactions().await;
    if let Some(message) = app.state().error_message() {
        return Err(anyhow!("{message}")).pub_result(ErrorType::Store);
    }

    let summary = app.state().summary(Utc::now());
    let text = render(&summary).context("Unable to render the dashboard")?;
    Ok(Out::new(text, summary))
}

fn render(summary: &Summary) -> std::result::Result<String, std::fmt::Error> {
    let mut s = String::new();
    writeln!(s, "Balance  {}", summary.balance)?;
    writeln!(s, "Income   {}", summary.total_income)?;
    writeln!(s, "Expenses {}", summary.total_expense)?;

    writeln!(s, "\nExpenses by category ({})", summary.time_frame.label())?;
    if summary.expenses_by_category.is_empty() {
        writeln!(s, "  no expenses")?;
    }
    for (category, amount) in &summary.expenses_by_category {
        writeln!(s, "  {:<13} {:>14}", category.display_name(), amount)?;
    }

    write!(s, "\nRecent activity")?;
    if summary.recent.is_empty() {
        write!(s, "\n  no transactions")?;
    }
    for t in &summary.recent {
        write!(s, "\n  {}", format_row(t))?;
    }
    Ok(s)
}
