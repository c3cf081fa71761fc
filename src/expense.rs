//! Defines the expense record and the builder used to create and update expenses.

use serde::{Deserialize, Serialize};

/// Alias for the integer type used for expense IDs.
pub type ExpenseId = i64;

/// A dated, categorised record of money spent.
///
/// To create a new `Expense`, use [Expense::build] and pass the builder to
/// [ExpenseStore::insert](crate::ExpenseStore::insert).
///
/// The field order matches the CSV export columns `id,date,category,amount,note`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    /// The ID assigned by the store when the expense was inserted.
    pub id: ExpenseId,
    /// When the expense happened, formatted as `YYYY-MM-DD`.
    ///
    /// The store treats this as opaque text, it is not checked to be a real
    /// calendar date.
    pub date: String,
    /// Free text category, e.g. "Food" or "Transport".
    pub category: String,
    /// The amount of money spent.
    pub amount: f64,
    /// An optional note about the expense, empty if not given.
    #[serde(default)]
    pub note: String,
}

impl Expense {
    /// Start building the mutable fields of an expense.
    ///
    /// Shortcut for [ExpenseBuilder] for discoverability.
    pub fn build(date: &str, category: &str, amount: f64) -> ExpenseBuilder {
        ExpenseBuilder {
            date: date.to_owned(),
            category: category.to_owned(),
            amount,
            note: String::new(),
        }
    }
}

/// Every field of an [Expense] except its ID.
///
/// Used both to insert new expenses and to replace the fields of an existing
/// expense.
///
/// # Examples
///
/// ```
/// use expense_tracker::Expense;
///
/// let lunch = Expense::build("2025-11-01", "Food", 12.5).note("lunch");
///
/// assert_eq!(lunch.note, "lunch");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ExpenseBuilder {
    /// The date of the expense, see [Expense::date].
    pub date: String,
    /// The category of the expense.
    pub category: String,
    /// The amount of money spent.
    pub amount: f64,
    /// A note about the expense. Defaults to an empty string.
    pub note: String,
}

impl ExpenseBuilder {
    /// Set the note for the expense.
    pub fn note(mut self, note: &str) -> Self {
        self.note = note.to_owned();
        self
    }

    /// Attach an ID to the fields to create an [Expense].
    pub fn finalise(self, id: ExpenseId) -> Expense {
        Expense {
            id,
            date: self.date,
            category: self.category,
            amount: self.amount,
            note: self.note,
        }
    }
}

impl From<Expense> for ExpenseBuilder {
    fn from(expense: Expense) -> Self {
        Self {
            date: expense.date,
            category: expense.category,
            amount: expense.amount,
            note: expense.note,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Expense, ExpenseBuilder};

    #[test]
    fn build_defaults_note_to_empty() {
        let builder = Expense::build("2025-11-03", "Transport", 5.0);

        assert_eq!(builder.note, "");
    }

    #[test]
    fn finalise_keeps_fields() {
        let expense = Expense::build("2025-11-01", "Food", 12.5)
            .note("lunch")
            .finalise(7);

        assert_eq!(
            expense,
            Expense {
                id: 7,
                date: "2025-11-01".to_owned(),
                category: "Food".to_owned(),
                amount: 12.5,
                note: "lunch".to_owned(),
            }
        );
    }

    #[test]
    fn builder_from_expense_drops_id() {
        let expense = Expense::build("2025-11-01", "Food", 12.5).finalise(3);

        let builder = ExpenseBuilder::from(expense);

        assert_eq!(builder, Expense::build("2025-11-01", "Food", 12.5));
    }
}
