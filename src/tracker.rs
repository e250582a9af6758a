//! The `Tracker` is the expense session: it restores the store once when opened and saves the
//! whole list after every change.

use crate::model::{Category, CategoryFilter, Expense};
use crate::persist::Persistence;
use crate::store::{AddOutcome, ExpenseStore};
use crate::view::View;
use tracing::{debug, warn};

/// An open expense session.
#[derive(Debug)]
pub struct Tracker {
    store: ExpenseStore,
    persistence: Persistence,
}

impl Tracker {
    /// Opens a session using the system clock.
    pub async fn open(persistence: Persistence) -> Self {
        Self::open_with_store(persistence, ExpenseStore::default()).await
    }

    /// Opens a session, loading whatever `persistence` restores into `store`.
    ///
    /// This is the only time the stored list is read. Loading does not write anything back.
    pub async fn open_with_store(mut persistence: Persistence, mut store: ExpenseStore) -> Self {
        let records = persistence.restore().await;
        store.load(records);
        debug!("Opened expense tracker with {} expenses", store.len());
        Self { store, persistence }
    }

    /// Adds an expense and, if it was accepted, saves the list.
    pub async fn add(&mut self, description: &str, amount: &str, category: Category) -> AddOutcome {
        let outcome = self.store.add(description, amount, category);
        match &outcome {
            AddOutcome::Added(expense) => {
                debug!("Added expense {}", expense.id());
                self.persist().await;
            }
            AddOutcome::Declined(reason) => debug!("Declined to add an expense: {reason}"),
        }
        outcome
    }

    /// Removes the expense with `id` and saves the list. Does nothing if there is no such
    /// expense.
    pub async fn remove(&mut self, id: &str) -> Option<Expense> {
        let removed = self.store.remove(id);
        match &removed {
            Some(_) => {
                debug!("Removed expense {id}");
                self.persist().await;
            }
            None => debug!("No expense with id {id} to remove"),
        }
        removed
    }

    pub fn records(&self) -> &[Expense] {
        self.store.records()
    }

    /// The filtered list and totals for `filter`.
    pub fn view(&self, filter: CategoryFilter) -> View<'_> {
        View::new(self.store.records(), filter)
    }

    /// A failed save leaves the in-memory change in place.
    async fn persist(&mut self) {
        if let Err(e) = self.persistence.save(self.store.records()).await {
            warn!("Unable to save expenses: {e:#}");
        }
    }
}
