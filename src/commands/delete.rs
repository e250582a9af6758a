//! Delete command handler.

use crate::args::DeleteArgs;
use crate::commands::Out;
use crate::model::Expense;
use crate::tracker::Tracker;
use crate::{Config, Result};

/// Deletes the expense with the given id.
///
/// Deleting an id that does not exist is not an error; nothing changes and the message says so.
pub async fn delete(config: Config, args: DeleteArgs) -> Result<Out<Expense>> {
    let mut tracker = Tracker::open(config.persistence()).await;
    Ok(match tracker.remove(args.id()).await {
        Some(expense) => Out::new(
            format!("Deleted {} ({})", expense.description(), expense.id()),
            expense,
        ),
        None => format!("No expense with id {}", args.id()).into(),
    })
}
