//! An expense tracker backed by a local SQLite database.
//!
//! Expenses are dated, categorised amounts of money. The [ExpenseStore] trait
//! provides creation, modification, deletion, filtered listing and monthly
//! per-category totals. [SQLiteExpenseStore] keeps expenses in a single
//! database file and [InMemoryExpenseStore] keeps them in memory.
//!
//! Front ends, such as the `expenses` command line tool in [cli], hold a store
//! and call one operation per user action.
//!
//! ```no_run
//! use expense_tracker::{Expense, ExpenseFilter, ExpenseStore, SQLiteExpenseStore};
//!
//! let mut store = SQLiteExpenseStore::open("data/expenses.db")?;
//! let id = store.insert(Expense::build("2025-11-01", "Food", 12.5).note("lunch"))?;
//! let food = store.list(&ExpenseFilter::default().category("Food"))?;
//! let november = store.monthly_summary("2025-11")?;
//! # Ok::<(), expense_tracker::Error>(())
//! ```

#![warn(missing_docs)]

pub mod cli;
pub mod csv;
pub mod db;
mod error;
mod expense;
mod filter;
pub mod input;
mod logging;
mod stores;
mod summary;

pub use crate::csv::{export_to_csv, import_from_csv, read_csv, write_csv};
pub use error::Error;
pub use expense::{Expense, ExpenseBuilder, ExpenseId};
pub use filter::{ExpenseFilter, SqlConditions};
pub use logging::{level_for_verbosity, setup_logging};
pub use stores::{ExpenseStore, InMemoryExpenseStore, SQLiteExpenseStore};
pub use summary::MonthlySummary;
