//! A small expense tracker: record expenses, keep them in a local JSON file, and view totals by
//! category.
//!
//! The pieces are:
//! - `store::ExpenseStore`, the in-memory, newest-first list of expenses.
//! - `persist::Persistence`, which saves and restores that list to a `persist::Slot`.
//! - `view`, which filters the list by category and totals it.
//! - `tracker::Tracker`, which ties them together: restore once on open, save after each change.

pub mod args;
pub mod commands;
mod config;
mod error;
pub mod model;
pub mod persist;
pub mod store;
pub mod tracker;
mod utils;
pub mod view;

#[cfg(test)]
mod test;

pub use config::Config;
pub use error::{Error, Result};
