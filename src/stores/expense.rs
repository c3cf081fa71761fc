//! Defines the expense store trait.

use crate::{
    Error,
    expense::{Expense, ExpenseBuilder, ExpenseId},
    filter::ExpenseFilter,
    summary::MonthlySummary,
};

/// Returns [Error::NanAmount] if the amount of `expense` is NaN.
///
/// Stores call this before writing so that they all treat NaN the same way.
pub(crate) fn check_amount(expense: &ExpenseBuilder) -> Result<(), Error> {
    if expense.amount.is_nan() {
        return Err(Error::NanAmount);
    }

    Ok(())
}

/// Handles the creation, modification, deletion and retrieval of expenses.
///
/// Every call completes its work before returning and no state is kept
/// between calls other than the stored expenses themselves.
pub trait ExpenseStore {
    /// Make sure the backing storage and its schema exist.
    ///
    /// Safe to call more than once.
    fn initialize(&mut self) -> Result<(), Error>;

    /// Add a new expense to the store and return its newly assigned ID.
    ///
    /// The fields are stored exactly as given, no validation is done, with one
    /// exception: a NaN amount cannot be stored and is rejected with
    /// [Error::NanAmount]. Infinite amounts are stored as given.
    fn insert(&mut self, expense: ExpenseBuilder) -> Result<ExpenseId, Error>;

    /// Replace every field except the ID of the expense with `id`.
    ///
    /// Returns `false` without changing anything if there is no expense with
    /// `id`. This is not an error.
    ///
    /// A NaN amount is rejected with [Error::NanAmount], as for [ExpenseStore::insert].
    fn update(&mut self, id: ExpenseId, expense: ExpenseBuilder) -> Result<bool, Error>;

    /// Remove the expense with `id`.
    ///
    /// Returns `false` if there was no expense with `id`. This is not an error.
    fn delete(&mut self, id: ExpenseId) -> Result<bool, Error>;

    /// Retrieve the expenses matching `filter`, newest date first.
    ///
    /// Expenses with the same date are ordered by descending ID.
    fn list(&self, filter: &ExpenseFilter) -> Result<Vec<Expense>, Error>;

    /// Sum the amounts of expenses per category for every expense whose date
    /// starts with `year_month`, e.g. "2025-11".
    ///
    /// This is a plain text prefix match, it does not check that the date is
    /// a real calendar date in that month.
    fn monthly_summary(&self, year_month: &str) -> Result<MonthlySummary, Error>;
}
