use crate::model::{Amount, Category};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A single user-entered spending entry.
///
/// Records are only built by the store's `add` operation or deserialized from storage, and are
/// never changed afterward. Serialized, a record looks like this:
///
/// ```json
/// {
///   "id": "1760803200000",
///   "date": "2025-10-18",
///   "description": "Lunch at cafe",
///   "amount": 12.5,
///   "category": "Food"
/// }
/// ```
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    id: String,
    date: NaiveDate,
    description: String,
    amount: Amount,
    category: Category,
}

impl Expense {
    pub(crate) fn new(
        id: impl Into<String>,
        date: NaiveDate,
        description: impl Into<String>,
        amount: Amount,
        category: Category,
    ) -> Self {
        Self {
            id: id.into(),
            date,
            description: description.into(),
            amount,
            category,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn amount(&self) -> Amount {
        self.amount
    }

    pub fn category(&self) -> Category {
        self.category
    }
}
