//! Contains the SQLite backed store.

pub mod expense;

pub use expense::SQLiteExpenseStore;
