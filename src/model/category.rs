use anyhow::bail;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// The fixed set of categories an expense can be filed under.
#[derive(
    Default,
    Debug,
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
pub enum Category {
    #[default]
    Food,
    Transport,
    Shopping,
    Bills,
    Entertainment,
    Health,
    Other,
}

serde_plain::derive_display_from_serialize!(Category);

impl Category {
    /// Every category, in the order they are offered to the user.
    pub const ALL: [Category; 7] = [
        Category::Food,
        Category::Transport,
        Category::Shopping,
        Category::Bills,
        Category::Entertainment,
        Category::Health,
        Category::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Food => "Food",
            Category::Transport => "Transport",
            Category::Shopping => "Shopping",
            Category::Bills => "Bills",
            Category::Entertainment => "Entertainment",
            Category::Health => "Health",
            Category::Other => "Other",
        }
    }
}

impl FromStr for Category {
    type Err = anyhow::Error;

    /// Matching is case-insensitive so that `food` and `Food` are the same on the command line.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        match Category::ALL
            .iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s))
        {
            Some(c) => Ok(*c),
            None => bail!("Invalid category '{s}'"),
        }
    }
}

/// Which expenses to show: all of them, or only one category. `All` is the default.
#[derive(Default, Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(Category),
}

const ALL_STR: &str = "All";

impl CategoryFilter {
    /// Returns true if an expense in `category` passes this filter.
    pub fn matches(&self, category: Category) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(c) => *c == category,
        }
    }

    /// The phrase shown under the totals, e.g. "across all categories" or "in Food".
    pub fn scope_label(&self) -> String {
        match self {
            CategoryFilter::All => String::from("across all categories"),
            CategoryFilter::Only(c) => format!("in {c}"),
        }
    }
}

impl From<Category> for CategoryFilter {
    fn from(value: Category) -> Self {
        CategoryFilter::Only(value)
    }
}

impl Display for CategoryFilter {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            CategoryFilter::All => f.write_str(ALL_STR),
            CategoryFilter::Only(c) => Display::fmt(c, f),
        }
    }
}

impl FromStr for CategoryFilter {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case(ALL_STR) {
            return Ok(CategoryFilter::All);
        }
        Ok(CategoryFilter::Only(Category::from_str(s)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_serde_names() {
        let json = serde_json::to_string(&Category::Entertainment).unwrap();
        assert_eq!(json, "\"Entertainment\"");
        let c: Category = serde_json::from_str("\"Bills\"").unwrap();
        assert_eq!(c, Category::Bills);
        assert!(serde_json::from_str::<Category>("\"Groceries\"").is_err());
    }

    #[test]
    fn test_category_display_matches_serde() {
        for c in Category::ALL {
            assert_eq!(c.to_string(), c.as_str());
        }
    }

    #[test]
    fn test_category_from_str_case_insensitive() {
        assert_eq!(Category::from_str("transport").unwrap(), Category::Transport);
        assert_eq!(Category::from_str(" HEALTH ").unwrap(), Category::Health);
        let err = Category::from_str("Rent").unwrap_err();
        assert!(err.to_string().contains("Invalid category"));
    }

    #[test]
    fn test_category_default_is_food() {
        assert_eq!(Category::default(), Category::Food);
    }

    #[test]
    fn test_filter_parse_and_display() {
        assert_eq!(CategoryFilter::from_str("All").unwrap(), CategoryFilter::All);
        assert_eq!(CategoryFilter::from_str("all").unwrap(), CategoryFilter::All);
        assert_eq!(
            CategoryFilter::from_str("Shopping").unwrap(),
            CategoryFilter::Only(Category::Shopping)
        );
        assert!(CategoryFilter::from_str("Everything").is_err());
        assert_eq!(CategoryFilter::All.to_string(), "All");
        assert_eq!(CategoryFilter::Only(Category::Other).to_string(), "Other");
    }

    #[test]
    fn test_filter_matches() {
        assert!(CategoryFilter::All.matches(Category::Bills));
        assert!(CategoryFilter::Only(Category::Bills).matches(Category::Bills));
        assert!(!CategoryFilter::Only(Category::Bills).matches(Category::Food));
    }

    #[test]
    fn test_scope_label() {
        assert_eq!(CategoryFilter::All.scope_label(), "across all categories");
        assert_eq!(CategoryFilter::Only(Category::Food).scope_label(), "in Food");
    }
}
