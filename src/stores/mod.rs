//! Contains the expense store trait and its implementations.

mod expense;
mod memory;

pub mod sqlite;

pub use expense::ExpenseStore;
pub(crate) use expense::check_amount;
pub use memory::InMemoryExpenseStore;
pub use sqlite::SQLiteExpenseStore;
