//! Derived views of the expense list: the filtered rows and their totals.
//!
//! Everything here is a pure function of its inputs.

use crate::model::{Amount, CategoryFilter, Expense};
use serde::Serialize;
use std::fmt::{Display, Formatter};
use tracing::warn;

/// The message shown when there is nothing to list.
pub const EMPTY_STATE: &str = "No expenses yet";

/// Returns the records that pass `filter`, in their original order.
pub fn filter(records: &[Expense], filter: CategoryFilter) -> Vec<&Expense> {
    records
        .iter()
        .filter(|e| filter.matches(e.category()))
        .collect()
}

/// The total and count of a set of expenses.
#[derive(Debug, Default, Clone, Copy, Eq, PartialEq, Serialize)]
pub struct Summary {
    pub total: Amount,
    pub count: usize,
}

/// Sums the amounts of `records` and counts them. No rounding is done.
///
/// A total too large to represent is clamped to the largest representable amount.
pub fn aggregate<'a, I>(records: I) -> Summary
where
    I: IntoIterator<Item = &'a Expense>,
{
    records
        .into_iter()
        .fold(Summary::default(), |summary, expense| Summary {
            total: add_to_total(summary.total, expense),
            count: summary.count + 1,
        })
}

fn add_to_total(total: Amount, expense: &Expense) -> Amount {
    match total.checked_add(expense.amount()) {
        Some(sum) => sum,
        None => {
            warn!(
                "The total overflowed when adding expense {}, it has been clamped",
                expense.id()
            );
            total.saturating_add(expense.amount())
        }
    }
}

/// Writes the totals for `filter` followed by `rows`, or the empty-state message when there are
/// no rows.
pub(crate) fn render<'a, I>(
    f: &mut Formatter<'_>,
    filter: CategoryFilter,
    summary: Summary,
    rows: I,
) -> std::fmt::Result
where
    I: IntoIterator<Item = &'a Expense>,
{
    let scope = filter.scope_label();
    writeln!(f, "Total Expenses: {} ({scope})", summary.total)?;
    writeln!(f, "Total Transactions: {} ({scope})", summary.count)?;
    writeln!(f)?;
    let mut rows = rows.into_iter().peekable();
    if rows.peek().is_none() {
        return writeln!(f, "{EMPTY_STATE}");
    }
    for expense in rows {
        writeln!(
            f,
            "{}  {:<30}  {:<13}  {:>12}  [{}]",
            expense.date(),
            expense.description(),
            expense.category().as_str(),
            expense.amount(),
            expense.id()
        )?;
    }
    Ok(())
}

/// Everything needed to show the expense list to a user for a given filter.
#[derive(Debug, Clone, Serialize)]
pub struct View<'a> {
    #[serde(serialize_with = "serialize_filter")]
    filter: CategoryFilter,
    summary: Summary,
    expenses: Vec<&'a Expense>,
}

impl<'a> View<'a> {
    pub fn new(records: &'a [Expense], category: CategoryFilter) -> Self {
        let expenses = filter(records, category);
        let summary = aggregate(expenses.iter().copied());
        Self {
            filter: category,
            summary,
            expenses,
        }
    }

    pub fn filter(&self) -> CategoryFilter {
        self.filter
    }

    pub fn summary(&self) -> Summary {
        self.summary
    }

    pub fn expenses(&self) -> &[&'a Expense] {
        &self.expenses
    }

    /// True when the empty-state message is shown instead of rows.
    pub fn is_empty(&self) -> bool {
        self.expenses.is_empty()
    }
}

fn serialize_filter<S>(filter: &CategoryFilter, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.collect_str(filter)
}

impl Display for View<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        render(f, self.filter, self.summary, self.expenses.iter().copied())
    }
}
