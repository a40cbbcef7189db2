use crate::commands::Out;
use crate::model::{Category, CategoryInfo};
use crate::Result;

/// Prints the fixed category table.
pub async fn categories() -> Result<Out<Vec<CategoryInfo>>> {
    let table = Category::table().to_vec();
    let mut message = String::from("Categories");
    for info in &table {
        message.push_str(&format!(
            "\n  {:<13} {:<7} {:<13} {}",
            info.display_name, info.implied_type, info.category, info.color
        ));
    }
    Ok(Out::new(message, table))
}
