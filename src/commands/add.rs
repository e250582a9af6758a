//! Add command handler.

use crate::args::AddArgs;
use crate::commands::Out;
use crate::model::Expense;
use crate::store::AddOutcome;
use crate::tracker::Tracker;
use crate::{Config, Result};

/// Records a new expense, dated today, at the front of the list.
///
/// An empty description or an amount that is not a number is not an error: nothing is added and
/// the returned message says why.
pub async fn add(config: Config, args: AddArgs) -> Result<Out<Expense>> {
    let mut tracker = Tracker::open(config.persistence()).await;
    let outcome = tracker
        .add(args.description(), args.amount(), args.category())
        .await;
    Ok(match outcome {
        AddOutcome::Added(expense) => Out::new(
            format!(
                "Added {} for {} in {} (id {})",
                expense.description(),
                expense.amount(),
                expense.category(),
                expense.id()
            ),
            expense,
        ),
        AddOutcome::Declined(reason) => format!("Nothing added: {reason}").into(),
    })
}
