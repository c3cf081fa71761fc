//! Implements an in-memory expense store.

use crate::{
    Error,
    expense::{Expense, ExpenseBuilder, ExpenseId},
    filter::ExpenseFilter,
    stores::{ExpenseStore, check_amount},
    summary::MonthlySummary,
};

/// Keeps expenses in memory for the lifetime of the value.
///
/// Has the same observable behaviour as
/// [SQLiteExpenseStore](crate::SQLiteExpenseStore) apart from durability,
/// including rejecting NaN amounts and summing with compensated summation,
/// which makes it a stand-in for tests of code that consumes an
/// [ExpenseStore].
#[derive(Debug, Clone, Default)]
pub struct InMemoryExpenseStore {
    expenses: Vec<Expense>,
    last_id: ExpenseId,
}

impl InMemoryExpenseStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl ExpenseStore for InMemoryExpenseStore {
    fn initialize(&mut self) -> Result<(), Error> {
        Ok(())
    }

    fn insert(&mut self, expense: ExpenseBuilder) -> Result<ExpenseId, Error> {
        check_amount(&expense)?;

        // IDs are never reused, even after the newest expense is deleted.
        self.last_id += 1;
        self.expenses.push(expense.finalise(self.last_id));

        Ok(self.last_id)
    }

    fn update(&mut self, id: ExpenseId, expense: ExpenseBuilder) -> Result<bool, Error> {
        check_amount(&expense)?;

        match self.expenses.iter_mut().find(|existing| existing.id == id) {
            Some(existing) => {
                *existing = expense.finalise(id);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn delete(&mut self, id: ExpenseId) -> Result<bool, Error> {
        let count_before = self.expenses.len();
        self.expenses.retain(|expense| expense.id != id);

        Ok(self.expenses.len() != count_before)
    }

    fn list(&self, filter: &ExpenseFilter) -> Result<Vec<Expense>, Error> {
        let mut expenses: Vec<Expense> = self
            .expenses
            .iter()
            .filter(|expense| filter.matches(expense))
            .cloned()
            .collect();

        expenses.sort_by(|a, b| b.date.cmp(&a.date).then(b.id.cmp(&a.id)));

        Ok(expenses)
    }

    fn monthly_summary(&self, year_month: &str) -> Result<MonthlySummary, Error> {
        Ok(self
            .expenses
            .iter()
            .filter(|expense| expense.date.starts_with(year_month))
            .map(|expense| (expense.category.clone(), expense.amount))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use crate::{expense::Expense, filter::ExpenseFilter, stores::ExpenseStore};

    use super::InMemoryExpenseStore;

    #[test]
    fn insert_then_list_returns_same_fields() {
        let mut store = InMemoryExpenseStore::new();
        let builder = Expense::build("2025-11-01", "Food", 12.5).note("lunch");

        let id = store.insert(builder.clone()).unwrap();

        assert_eq!(
            store.list(&ExpenseFilter::default()).unwrap(),
            vec![builder.finalise(id)]
        );
    }

    #[test]
    fn update_and_delete_missing_ids_are_no_ops() {
        let mut store = InMemoryExpenseStore::new();
        let id = store
            .insert(Expense::build("2025-11-01", "Food", 12.5))
            .unwrap();

        assert_eq!(
            store.update(id + 1, Expense::build("2025-11-02", "Other", 1.0)),
            Ok(false)
        );
        assert_eq!(store.delete(id + 1), Ok(false));
        assert_eq!(store.list(&ExpenseFilter::default()).unwrap().len(), 1);
    }

    #[test]
    fn update_keeps_id() {
        let mut store = InMemoryExpenseStore::new();
        let id = store
            .insert(Expense::build("2025-11-01", "Food", 12.5))
            .unwrap();
        let replacement = Expense::build("2025-11-05", "Utilities", 80.0).note("power");

        assert_eq!(store.update(id, replacement.clone()), Ok(true));
        assert_eq!(
            store.list(&ExpenseFilter::default()).unwrap(),
            vec![replacement.finalise(id)]
        );
    }

    #[test]
    fn list_orders_by_date_then_id_descending() {
        let mut store = InMemoryExpenseStore::new();
        for date in ["2025-01-02", "2025-01-03", "2025-01-02", "2025-01-01"] {
            store.insert(Expense::build(date, "Food", 1.0)).unwrap();
        }

        let got: Vec<_> = store
            .list(&ExpenseFilter::default())
            .unwrap()
            .into_iter()
            .map(|expense| expense.id)
            .collect();

        assert_eq!(got, vec![2, 3, 1, 4]);
    }

    #[test]
    fn ids_are_not_reused_after_delete() {
        let mut store = InMemoryExpenseStore::new();
        let first = store
            .insert(Expense::build("2025-11-01", "Food", 1.0))
            .unwrap();
        store.delete(first).unwrap();

        let second = store
            .insert(Expense::build("2025-11-01", "Food", 1.0))
            .unwrap();

        assert_eq!(second, first + 1);
    }

    #[test]
    fn monthly_summary_uses_text_prefix_match() {
        let mut store = InMemoryExpenseStore::new();
        store
            .insert(Expense::build("2025-11-01", "Food", 12.5))
            .unwrap();
        store
            .insert(Expense::build("2025-110-1", "Food", 1.0))
            .unwrap();
        store
            .insert(Expense::build("2025-11-03", "Transport", 5.0))
            .unwrap();
        store
            .insert(Expense::build("2025-12-01", "Transport", 9.0))
            .unwrap();

        let summary = store.monthly_summary("2025-11").unwrap();

        assert_eq!(summary.get("Food"), Some(13.5));
        assert_eq!(summary.get("Transport"), Some(5.0));
        assert!(store.monthly_summary("2024-01").unwrap().is_empty());
    }
}
