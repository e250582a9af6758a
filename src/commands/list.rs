//! List command handler.

use crate::args::ListArgs;
use crate::commands::Out;
use crate::model::{CategoryFilter, Expense};
use crate::tracker::Tracker;
use crate::view::{render, Summary, View};
use crate::{Config, Result};
use serde::Serialize;
use std::fmt::{Display, Formatter};

/// An owned copy of a `View`, so it can outlive the `Tracker` that produced it.
#[derive(Debug, Clone, Serialize)]
pub struct Listing {
    filter: String,
    summary: Summary,
    expenses: Vec<Expense>,
    #[serde(skip)]
    category: CategoryFilter,
}

impl Listing {
    fn from_view(view: &View<'_>) -> Self {
        Self {
            filter: view.filter().to_string(),
            summary: view.summary(),
            expenses: view.expenses().iter().map(|e| (*e).clone()).collect(),
            category: view.filter(),
        }
    }

    pub fn summary(&self) -> Summary {
        self.summary
    }

    pub fn expenses(&self) -> &[Expense] {
        &self.expenses
    }
}

impl Display for Listing {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        render(f, self.category, self.summary, &self.expenses)
    }
}

/// Shows the total, the count and the expenses that pass the category filter.
pub async fn list(config: Config, args: ListArgs) -> Result<Out<Listing>> {
    let tracker = Tracker::open(config.persistence()).await;
    let listing = Listing::from_view(&tracker.view(args.category()));
    let count = listing.expenses().len();
    let message = format!(
        "Listed {} expense{}",
        count,
        if count == 1 { "" } else { "s" }
    );
    Ok(Out::new(message, listing))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::args::AddArgs;
    use crate::commands::add;
    use crate::model::Category;
    use crate::test::TestEnv;
    use crate::view::EMPTY_STATE;
    use crate::model::Amount;
    use std::str::FromStr;

    #[tokio::test]
    async fn test_list_first_run_is_empty() {
        let env = TestEnv::new().await;
        let out = list(env.config(), ListArgs::new(CategoryFilter::All))
            .await
            .unwrap();
        let listing = out.structure().unwrap();
        assert_eq!(listing.summary().count, 0);
        assert_eq!(listing.summary().total, Amount::ZERO);
        assert!(listing.to_string().contains(EMPTY_STATE));
        assert!(listing.to_string().contains("$0.00"));
        assert_eq!(out.message(), "Listed 0 expenses");
    }

    #[tokio::test]
    async fn test_list_with_filter() {
        let env = TestEnv::new().await;
        for (description, amount, category) in [
            ("Groceries", "45.10", Category::Food),
            ("Train", "12", Category::Transport),
            ("Snack", "2.40", Category::Food),
        ] {
            add(env.config(), AddArgs::new(description, amount, category))
                .await
                .unwrap();
        }

        let out = list(env.config(), ListArgs::new(CategoryFilter::All))
            .await
            .unwrap();
        let all = out.structure().unwrap();
        assert_eq!(all.summary().count, 3);
        assert_eq!(all.summary().total, Amount::from_str("59.50").unwrap());
        assert_eq!(all.expenses()[0].description(), "Snack");

        let out = list(env.config(), ListArgs::new(Category::Food.into()))
            .await
            .unwrap();
        let food = out.structure().unwrap();
        assert_eq!(food.summary().count, 2);
        assert_eq!(food.summary().total, Amount::from_str("47.5").unwrap());
        let text = food.to_string();
        assert!(text.contains("Total Expenses: $47.50 (in Food)"));
        assert!(!text.contains("Train"));
        assert_eq!(text, View::new(food.expenses(), Category::Food.into()).to_string());
        assert_eq!(out.message(), "Listed 2 expenses");
    }

    #[tokio::test]
    async fn test_list_filter_without_matches() {
        let env = TestEnv::new().await;
        add(env.config(), AddArgs::new("Train", "12", Category::Transport))
            .await
            .unwrap();
        let out = list(env.config(), ListArgs::new(Category::Health.into()))
            .await
            .unwrap();
        let listing = out.structure().unwrap();
        assert!(listing.expenses().is_empty());
        assert!(listing.to_string().contains(EMPTY_STATE));
    }

    #[tokio::test]
    async fn test_listing_serializes_filter_name() {
        let env = TestEnv::new().await;
        let out = list(env.config(), ListArgs::new(Category::Bills.into()))
            .await
            .unwrap();
        let json = serde_json::to_value(out.structure().unwrap()).unwrap();
        assert_eq!(json["filter"], "Bills");
        assert_eq!(json["expenses"], serde_json::json!([]));
    }
}
