use serde::{Deserialize, Serialize};

/// The cash-flow direction of a transaction.
#[derive(
    Debug,
    Default,
    Clone,
    Copy,
    Eq,
    PartialEq,
    Ord,
    PartialOrd,
    Hash,
    Serialize,
    Deserialize,
    clap::ValueEnum,
)]
#[serde(rename_all = "snake_case")]
pub enum TransactionType {
    #[default]
    Income,
    Expense,
}

serde_plain::derive_display_from_serialize!(TransactionType);
serde_plain::derive_fromstr_from_deserialize!(TransactionType);

/// The fixed set of transaction categories. Declaration order is the canonical enumeration order,
/// which matters when a type change has to pick a replacement category.
#[derive(
    Debug,
    Default,
    Clone,
    Copy,
    Eq,
    PartialEq,
    Ord,
    PartialOrd,
    Hash,
    Serialize,
    Deserialize,
    clap::ValueEnum,
)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    #[default]
    Salary,
    Interest,
    Rental,
    Business,
    Food,
    Travel,
    Entertainment,
    Shopping,
    Healthcare,
    Other,
}

serde_plain::derive_display_from_serialize!(Category);
serde_plain::derive_fromstr_from_deserialize!(Category);

/// Static metadata attached to each category.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize)]
pub struct CategoryInfo {
    pub category: Category,
    pub display_name: &'static str,
    pub implied_type: TransactionType,
    pub color: &'static str,
}

const fn info(
    category: Category,
    display_name: &'static str,
    implied_type: TransactionType,
    color: &'static str,
) -> CategoryInfo {
    CategoryInfo {
        category,
        display_name,
        implied_type,
        color,
    }
}

/// One row per category, in canonical order. `Category::info` indexes into this by discriminant.
static CATEGORY_TABLE: [CategoryInfo; 10] = [
    info(Category::Salary, "Salary", TransactionType::Income, "green"),
    info(Category::Interest, "Interest", TransactionType::Income, "yellow"),
    info(Category::Rental, "Rental", TransactionType::Income, "teal"),
    info(Category::Business, "Business", TransactionType::Income, "blue"),
    info(Category::Food, "Food", TransactionType::Expense, "orange"),
    info(Category::Travel, "Travel", TransactionType::Expense, "purple"),
    info(Category::Entertainment, "Entertainment", TransactionType::Expense, "pink"),
    info(Category::Shopping, "Shopping", TransactionType::Expense, "red"),
    info(Category::Healthcare, "Healthcare", TransactionType::Expense, "mint"),
    info(Category::Other, "Other", TransactionType::Expense, "indigo"),
];

impl Category {
    /// Every category in canonical order.
    pub fn all() -> impl Iterator<Item = Category> {
        CATEGORY_TABLE.iter().map(|row| row.category)
    }

    /// The full metadata table in canonical order.
    pub fn table() -> &'static [CategoryInfo] {
        &CATEGORY_TABLE
    }

    pub fn info(self) -> &'static CategoryInfo {
        &CATEGORY_TABLE[self as usize]
    }

    pub fn display_name(self) -> &'static str {
        self.info().display_name
    }

    /// The transaction type this category always belongs to.
    pub fn implied_type(self) -> TransactionType {
        self.info().implied_type
    }

    pub fn color(self) -> &'static str {
        self.info().color
    }

    /// The first category in canonical order whose implied type is `kind`.
    pub fn first_of_type(kind: TransactionType) -> Option<Category> {
        Category::all().find(|c| c.implied_type() == kind)
    }
}
