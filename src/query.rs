//! Pure derivations over a list of transactions: time-frame and search filtering, sorting,
//! category breakdowns and totals.
//!
//! Nothing in here performs I/O or reads the clock; `now` is always passed in. The views the
//! presentation needs are compositions of these functions:
//!
//! - display view: `sort_transactions(filter_by_time_frame(all, frame, now), sort)`
//! - search view: `search_filter(display view, query)`
//! - breakdown: `aggregate_by_category(display view)`, never affected by search
//! - summary card totals: over the full, unfiltered list

use crate::model::{Amount, Category, SortOption, TimeFrame, Transaction};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::BTreeMap;

/// How many transactions the dashboard lists under recent activity.
pub const RECENT_COUNT: usize = 5;

/// Keeps the transactions dated on or after the start of `frame`. `AllTime` returns the input
/// unchanged.
pub fn filter_by_time_frame(
    transactions: &[Transaction],
    frame: TimeFrame,
    now: DateTime<Utc>,
) -> Vec<Transaction> {
    match frame.start_date(now) {
        Some(start) => transactions
            .iter()
            .filter(|t| t.date() >= start)
            .cloned()
            .collect(),
        None => transactions.to_vec(),
    }
}

/// Returns a sorted copy. The sort is stable, so records with equal keys keep their input order.
pub fn sort_transactions(transactions: &[Transaction], option: SortOption) -> Vec<Transaction> {
    let mut sorted = transactions.to_vec();
    match option {
        SortOption::TitleAscending | SortOption::TitleDescending => {
            // lowercase once per record rather than once per comparison
            let mut keyed: Vec<(String, Transaction)> = sorted
                .into_iter()
                .map(|t| (t.title().to_lowercase(), t))
                .collect();
            keyed.sort_by(|(a, _), (b, _)| {
                let ord = a.cmp(b);
                if option == SortOption::TitleDescending {
                    ord.reverse()
                } else {
                    ord
                }
            });
            sorted = keyed.into_iter().map(|(_, t)| t).collect();
        }
        _ => sorted.sort_by(|a, b| compare(a, b, option)),
    }
    sorted
}

/// The order `option` puts `a` and `b` in.
pub fn compare(a: &Transaction, b: &Transaction, option: SortOption) -> Ordering {
    match option {
        SortOption::DateAscending => a.date().cmp(&b.date()),
        SortOption::DateDescending => b.date().cmp(&a.date()),
        SortOption::AmountAscending => a.amount().cmp(&b.amount()),
        SortOption::AmountDescending => b.amount().cmp(&a.amount()),
        SortOption::TitleAscending => a.title().to_lowercase().cmp(&b.title().to_lowercase()),
        SortOption::TitleDescending => b.title().to_lowercase().cmp(&a.title().to_lowercase()),
    }
}

/// Keeps the transactions whose title or category display name contains `query`, ignoring case.
/// An empty query keeps everything.
pub fn search_filter(transactions: &[Transaction], query: &str) -> Vec<Transaction> {
    if query.is_empty() {
        return transactions.to_vec();
    }
    let needle = query.to_lowercase();
    transactions
        .iter()
        .filter(|t| {
            t.title().to_lowercase().contains(&needle)
                || t.category()
                    .display_name()
                    .to_lowercase()
                    .contains(&needle)
        })
        .cloned()
        .collect()
}

/// Sums expense amounts per category. Categories without any expense are absent from the map.
pub fn aggregate_by_category(transactions: &[Transaction]) -> BTreeMap<Category, Amount> {
    let mut totals = BTreeMap::new();
    for t in transactions.iter().filter(|t| t.is_expense()) {
        *totals.entry(t.category()).or_insert(Amount::ZERO) += t.amount();
    }
    totals
}

/// Orders a category breakdown for display: largest total first, ties in canonical order.
pub fn ranked_categories(totals: &BTreeMap<Category, Amount>) -> Vec<(Category, Amount)> {
    let mut ranked: Vec<(Category, Amount)> = totals.iter().map(|(c, a)| (*c, *a)).collect();
    ranked.sort_by(|(_, a), (_, b)| b.cmp(a));
    ranked
}

pub fn total_income(transactions: &[Transaction]) -> Amount {
    transactions
        .iter()
        .filter(|t| t.is_income())
        .map(Transaction::amount)
        .sum()
}

pub fn total_expense(transactions: &[Transaction]) -> Amount {
    transactions
        .iter()
        .filter(|t| t.is_expense())
        .map(Transaction::amount)
        .sum()
}

/// Income minus expense.
pub fn balance(transactions: &[Transaction]) -> Amount {
    total_income(transactions) - total_expense(transactions)
}

/// The time-frame filtered, sorted list used by the dashboard. Search is not applied.
pub fn display_view(
    transactions: &[Transaction],
    frame: TimeFrame,
    sort: SortOption,
    now: DateTime<Utc>,
) -> Vec<Transaction> {
    sort_transactions(&filter_by_time_frame(transactions, frame, now), sort)
}

/// The display view narrowed by a search query, used by the transaction list.
pub fn search_view(
    transactions: &[Transaction],
    frame: TimeFrame,
    sort: SortOption,
    query: &str,
    now: DateTime<Utc>,
) -> Vec<Transaction> {
    search_filter(&display_view(transactions, frame, sort, now), query)
}

/// The first `n` records of a view.
pub fn recent_transactions(view: &[Transaction], n: usize) -> Vec<Transaction> {
    view.iter().take(n).cloned().collect()
}

/// Everything the dashboard shows, computed in one place.
#[derive(Debug, Clone, Eq, PartialEq, Serialize)]
pub struct Summary {
    pub time_frame: TimeFrame,
    pub total_income: Amount,
    pub total_expense: Amount,
    pub balance: Amount,
    pub expenses_by_category: Vec<(Category, Amount)>,
    pub recent: Vec<Transaction>,
}

impl Summary {
    /// Totals are over `all`; the breakdown and recent activity are over the display view.
    pub fn build(
        all: &[Transaction],
        frame: TimeFrame,
        sort: SortOption,
        now: DateTime<Utc>,
    ) -> Self {
        let view = display_view(all, frame, sort, now);
        Self {
            time_frame: frame,
            total_income: total_income(all),
            total_expense: total_expense(all),
            balance: balance(all),
            expenses_by_category: ranked_categories(&aggregate_by_category(&view)),
            recent: recent_transactions(&view, RECENT_COUNT),
        }
    }
}
