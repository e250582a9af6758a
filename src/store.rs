//! The in-memory expense store.
//!
//! `ExpenseStore` owns the canonical, newest-first list of expenses. It knows nothing about
//! persistence; see `crate::tracker` for the object that saves after every mutation.

use crate::model::{Amount, Category, Expense};
use chrono::{Local, NaiveDate, Utc};
use std::fmt::{Debug, Display, Formatter};
use std::str::FromStr;
use tracing::trace;

/// Supplies "today" and "now" to the store so that new expenses can be dated and given ids.
pub trait Clock {
    /// The calendar date that new expenses are stamped with.
    fn today(&self) -> NaiveDate;

    /// Milliseconds since the Unix epoch, used as the basis for new ids.
    fn now_millis(&self) -> i64;
}

/// The real clock. Dates are in the local time zone.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }

    fn now_millis(&self) -> i64 {
        Utc::now().timestamp_millis()
    }
}

/// The result of asking the store to add an expense.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum AddOutcome {
    /// The expense was created and is now first in the store.
    Added(Expense),
    /// Nothing was changed.
    Declined(Declined),
}

impl AddOutcome {
    pub fn added(&self) -> Option<&Expense> {
        match self {
            AddOutcome::Added(expense) => Some(expense),
            AddOutcome::Declined(_) => None,
        }
    }
}

/// Why an add was declined.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Declined {
    EmptyDescription,
    InvalidAmount,
    /// Too large, or too many significant digits, to be saved and read back unchanged.
    UnstorableAmount,
}

impl Display for Declined {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Declined::EmptyDescription => f.write_str("the description is empty"),
            Declined::InvalidAmount => f.write_str("the amount is not a number"),
            Declined::UnstorableAmount => f.write_str("the amount cannot be stored exactly"),
        }
    }
}

/// The ordered collection of expenses, newest first.
pub struct ExpenseStore {
    records: Vec<Expense>,
    clock: Box<dyn Clock + Send>,
}

impl Debug for ExpenseStore {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExpenseStore")
            .field("records", &self.records)
            .finish_non_exhaustive()
    }
}

impl Default for ExpenseStore {
    fn default() -> Self {
        Self::new(Box::new(SystemClock))
    }
}

impl ExpenseStore {
    /// Creates an empty store that dates and names new expenses using `clock`.
    pub fn new(clock: Box<dyn Clock + Send>) -> Self {
        Self {
            records: Vec::new(),
            clock,
        }
    }

    /// Replaces everything in the store with `records`. The records are trusted as-is.
    pub fn load(&mut self, records: Vec<Expense>) {
        trace!("Loading {} expenses into the store", records.len());
        self.records = records;
    }

    /// Creates a new expense and puts it at the front of the store.
    ///
    /// Nothing changes if `description` is blank, if `amount` does not parse as a number, or if
    /// the amount could not be saved and restored unchanged. The returned `AddOutcome` says which.
    pub fn add(&mut self, description: &str, amount: &str, category: Category) -> AddOutcome {
        if description.trim().is_empty() {
            return AddOutcome::Declined(Declined::EmptyDescription);
        }
        let amount = match Amount::from_str(amount) {
            Ok(amount) => amount,
            Err(e) => {
                trace!("Unable to parse amount '{amount}': {e}");
                return AddOutcome::Declined(Declined::InvalidAmount);
            }
        };
        if !amount.is_storable() {
            trace!("Amount '{}' cannot be stored exactly", amount.value());
            return AddOutcome::Declined(Declined::UnstorableAmount);
        }
        let expense = Expense::new(
            self.next_id(),
            self.clock.today(),
            description,
            amount,
            category,
        );
        self.records.insert(0, expense.clone());
        AddOutcome::Added(expense)
    }

    /// Removes the expense with `id` and returns it. Returns `None` if there is no such expense.
    pub fn remove(&mut self, id: &str) -> Option<Expense> {
        let ix = self.records.iter().position(|e| e.id() == id)?;
        Some(self.records.remove(ix))
    }

    pub fn get(&self, id: &str) -> Option<&Expense> {
        self.records.iter().find(|e| e.id() == id)
    }

    pub fn records(&self) -> &[Expense] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The current time in milliseconds, bumped until it does not collide with an existing id.
    fn next_id(&self) -> String {
        let mut millis = self.clock.now_millis();
        loop {
            let id = millis.to_string();
            if self.get(&id).is_none() {
                return id;
            }
            millis += 1;
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use rust_decimal::Decimal;

    /// A clock that never moves.
    #[derive(Debug, Clone, Copy)]
    pub(crate) struct FixedClock {
        pub(crate) today: NaiveDate,
        pub(crate) millis: i64,
    }

    impl Default for FixedClock {
        fn default() -> Self {
            Self {
                today: NaiveDate::from_ymd_opt(2025, 10, 18).unwrap(),
                millis: 1_760_800_000_000,
            }
        }
    }

    impl Clock for FixedClock {
        fn today(&self) -> NaiveDate {
            self.today
        }

        fn now_millis(&self) -> i64 {
            self.millis
        }
    }

    fn store() -> ExpenseStore {
        ExpenseStore::new(Box::new(FixedClock::default()))
    }

    #[test]
    fn test_add_empty_description_is_declined() {
        let mut store = store();
        let outcome = store.add("", "10", Category::Food);
        assert_eq!(outcome, AddOutcome::Declined(Declined::EmptyDescription));
        assert!(store.is_empty());

        let outcome = store.add("   ", "10", Category::Food);
        assert_eq!(outcome, AddOutcome::Declined(Declined::EmptyDescription));
        assert!(store.is_empty());
    }

    #[test]
    fn test_add_bad_amount_is_declined() {
        let mut store = store();
        let outcome = store.add("Lunch", "abc", Category::Food);
        assert_eq!(outcome, AddOutcome::Declined(Declined::InvalidAmount));
        let outcome = store.add("Lunch", "", Category::Food);
        assert_eq!(outcome, AddOutcome::Declined(Declined::InvalidAmount));
        assert_eq!(store.len(), 0);
    }

    #[test]
    fn test_add_unstorable_amount_is_declined() {
        let mut store = store();
        for amount in [
            "79228162514264337593543950335",
            "1000000000000001",
            "0.12345678901234567891",
        ] {
            let outcome = store.add("Yacht", amount, Category::Shopping);
            assert_eq!(outcome, AddOutcome::Declined(Declined::UnstorableAmount));
        }
        assert!(store.is_empty());

        let outcome = store.add("House", "$1,000,000,000,000,000", Category::Bills);
        assert!(outcome.added().is_some());
    }

    #[test]
    fn test_add_prepends_new_expense() {
        let mut store = store();
        store.add("Breakfast", "4", Category::Food);
        let outcome = store.add("Lunch", "12.50", Category::Food);
        let added = outcome.added().unwrap();

        assert_eq!(store.len(), 2);
        assert_eq!(store.records()[0], *added);
        assert_eq!(added.description(), "Lunch");
        assert_eq!(added.amount().value(), Decimal::new(1250, 2));
        assert_eq!(added.category(), Category::Food);
        assert_eq!(added.date(), FixedClock::default().today);
        assert_eq!(store.records()[1].description(), "Breakfast");
    }

    #[test]
    fn test_ids_are_unique_when_clock_does_not_move() {
        let mut store = store();
        let a = store.add("a", "1", Category::Other).added().cloned().unwrap();
        let b = store.add("b", "1", Category::Other).added().cloned().unwrap();
        let c = store.add("c", "1", Category::Other).added().cloned().unwrap();
        assert_eq!(a.id(), "1760800000000");
        assert_eq!(b.id(), "1760800000001");
        assert_eq!(c.id(), "1760800000002");
    }

    #[test]
    fn test_remove_is_idempotent() {
        let mut store = store();
        store.add("Coffee", "3.50", Category::Food);
        let id = store
            .add("Taxi", "20", Category::Transport)
            .added()
            .unwrap()
            .id()
            .to_string();

        let removed = store.remove(&id).unwrap();
        assert_eq!(removed.description(), "Taxi");
        let after_once = store.records().to_vec();

        assert!(store.remove(&id).is_none());
        assert_eq!(store.records(), after_once.as_slice());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_remove_missing_id_is_noop() {
        let mut store = store();
        store.add("Coffee", "3.50", Category::Food);
        assert!(store.remove("does-not-exist").is_none());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_load_replaces_everything() {
        let mut store = store();
        store.add("Coffee", "3.50", Category::Food);
        let replacement = vec![Expense::new(
            "1",
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            "Rent",
            Amount::from_str("900").unwrap(),
            Category::Bills,
        )];
        store.load(replacement.clone());
        assert_eq!(store.records(), replacement.as_slice());

        store.load(Vec::new());
        assert!(store.is_empty());
    }
}
