//! View parameters chosen by the user: which time window to look at and how to order the list.

use chrono::{DateTime, Duration, Months, Utc};
use serde::{Deserialize, Serialize};

/// A date range relative to "now".
#[derive(
    Debug,
    Default,
    Clone,
    Copy,
    Eq,
    PartialEq,
    Hash,
    Serialize,
    Deserialize,
    clap::ValueEnum,
)]
#[serde(rename_all = "snake_case")]
pub enum TimeFrame {
    Week,
    #[default]
    Month,
    Year,
    AllTime,
}

serde_plain::derive_display_from_serialize!(TimeFrame);
serde_plain::derive_fromstr_from_deserialize!(TimeFrame);

impl TimeFrame {
    /// The inclusive lower bound of the frame, or `None` for `AllTime`.
    ///
    /// Months and years are subtracted as calendar units, so the day clamps to the end of a
    /// shorter month (Mar 31 minus one month is the last day of February). If the subtraction
    /// leaves chrono's representable range the frame is treated as unbounded.
    pub fn start_date(self, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        match self {
            TimeFrame::Week => now.checked_sub_signed(Duration::days(7)),
            TimeFrame::Month => now.checked_sub_months(Months::new(1)),
            TimeFrame::Year => now.checked_sub_months(Months::new(12)),
            TimeFrame::AllTime => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TimeFrame::Week => "Week",
            TimeFrame::Month => "Month",
            TimeFrame::Year => "Year",
            TimeFrame::AllTime => "All Time",
        }
    }
}

/// The six total orders a transaction list can be displayed in.
#[derive(
    Debug,
    Default,
    Clone,
    Copy,
    Eq,
    PartialEq,
    Hash,
    Serialize,
    Deserialize,
    clap::ValueEnum,
)]
#[serde(rename_all = "snake_case")]
pub enum SortOption {
    #[default]
    DateDescending,
    DateAscending,
    AmountDescending,
    AmountAscending,
    TitleAscending,
    TitleDescending,
}

serde_plain::derive_display_from_serialize!(SortOption);
serde_plain::derive_fromstr_from_deserialize!(SortOption);

impl SortOption {
    pub fn label(self) -> &'static str {
        match self {
            SortOption::DateDescending => "Date ↓",
            SortOption::DateAscending => "Date ↑",
            SortOption::AmountDescending => "Amount ↓",
            SortOption::AmountAscending => "Amount ↑",
            SortOption::TitleAscending => "Title A-Z",
            SortOption::TitleDescending => "Title Z-A",
        }
    }
}
