//! A structured filter for listing expenses.
//!
//! The filter is a conjunction of optional predicates. It is translated to
//! parameterized SQL conditions for [SQLiteExpenseStore](crate::SQLiteExpenseStore)
//! and evaluated directly by [InMemoryExpenseStore](crate::InMemoryExpenseStore).

use crate::expense::Expense;

/// Defines which expenses should be returned by
/// [ExpenseStore::list](crate::ExpenseStore::list).
///
/// A `None` field places no constraint on that field, so the default filter
/// matches every expense.
///
/// Dates are compared as text. Because dates are stored as `YYYY-MM-DD`,
/// lexicographic order is also chronological order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpenseFilter {
    /// Only include expenses whose category is exactly this value.
    pub category: Option<String>,
    /// Only include expenses on or after this date (inclusive).
    pub date_from: Option<String>,
    /// Only include expenses on or before this date (inclusive).
    pub date_to: Option<String>,
}

/// A SQL `WHERE` clause and the positional parameters it refers to.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SqlConditions {
    /// The conditions joined by `AND`, without the `WHERE` keyword.
    ///
    /// Empty when the filter has no predicates.
    pub clause: String,
    /// The values bound to `?1`, `?2`, ... in `clause`.
    pub params: Vec<String>,
}

impl ExpenseFilter {
    /// Only include expenses in `category`.
    pub fn category(mut self, category: &str) -> Self {
        self.category = Some(category.to_owned());
        self
    }

    /// Only include expenses dated on or after `date`.
    pub fn date_from(mut self, date: &str) -> Self {
        self.date_from = Some(date.to_owned());
        self
    }

    /// Only include expenses dated on or before `date`.
    pub fn date_to(mut self, date: &str) -> Self {
        self.date_to = Some(date.to_owned());
        self
    }

    /// Whether the filter places no constraints on the expenses.
    pub fn is_empty(&self) -> bool {
        self.category.is_none() && self.date_from.is_none() && self.date_to.is_none()
    }

    /// Whether `expense` satisfies every predicate in the filter.
    pub fn matches(&self, expense: &Expense) -> bool {
        let category_matches = self
            .category
            .as_ref()
            .is_none_or(|category| expense.category == *category);
        let after_start = self
            .date_from
            .as_ref()
            .is_none_or(|from| expense.date.as_str() >= from.as_str());
        let before_end = self
            .date_to
            .as_ref()
            .is_none_or(|to| expense.date.as_str() <= to.as_str());

        category_matches && after_start && before_end
    }

    /// Translate the filter into parameterized SQL conditions.
    ///
    /// Filter values are only ever passed as parameters, never interpolated
    /// into the SQL text.
    pub fn to_sql_conditions(&self) -> SqlConditions {
        let mut clause_parts = Vec::new();
        let mut params = Vec::new();

        if let Some(category) = &self.category {
            params.push(category.clone());
            clause_parts.push(format!("category = ?{}", params.len()));
        }

        if let Some(date_from) = &self.date_from {
            params.push(date_from.clone());
            clause_parts.push(format!("date >= ?{}", params.len()));
        }

        if let Some(date_to) = &self.date_to {
            params.push(date_to.clone());
            clause_parts.push(format!("date <= ?{}", params.len()));
        }

        SqlConditions {
            clause: clause_parts.join(" AND "),
            params,
        }
    }
}
