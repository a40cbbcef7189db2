//! Types that represent the core data model, such as `Transaction` and `Category`.
mod amount;
mod category;
mod options;
mod transaction;

pub use amount::{Amount, AmountError};
pub use category::{Category, CategoryInfo, TransactionType};
pub use options::{SortOption, TimeFrame};
pub use transaction::{Transaction, TransactionFields};
