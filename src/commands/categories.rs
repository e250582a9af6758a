use crate::commands::Out;
use crate::model::Category;
use crate::Result;

/// Lists the fixed set of categories, in the order they are offered.
pub async fn categories() -> Result<Out<Vec<Category>>> {
    let all = Category::ALL.to_vec();
    let names: Vec<&str> = all.iter().map(|c| c.as_str()).collect();
    Ok(Out::new(format!("Categories: {}", names.join(", ")), all))
}
