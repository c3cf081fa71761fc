//! Implements a SQLite backed expense store.
use std::{
    fs,
    path::{Path, PathBuf},
};

use rusqlite::{Connection, params_from_iter};

use crate::{
    Error,
    db::{self, EXPENSE_COLUMNS, map_expense_row},
    expense::{Expense, ExpenseBuilder, ExpenseId},
    filter::ExpenseFilter,
    stores::{ExpenseStore, check_amount},
    summary::MonthlySummary,
};

/// Stores expenses in a SQLite database file.
///
/// No connection is kept between calls. Each operation opens the file, runs
/// a single statement and closes the connection again, so the file is the
/// only source of truth and concurrent writers are serialised by SQLite's own
/// file locking.
#[derive(Debug, Clone)]
pub struct SQLiteExpenseStore {
    path: PathBuf,
}

impl SQLiteExpenseStore {
    /// Create a store for the database file at `path`.
    ///
    /// Nothing is read or written until the first operation, call
    /// [ExpenseStore::initialize] before using a new file.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Create a store for the database file at `path` and initialize it.
    ///
    /// # Errors
    /// Returns the errors described in [ExpenseStore::initialize].
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, Error> {
        let mut store = Self::new(path);
        store.initialize()?;

        Ok(store)
    }

    /// The path of the database file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn connect(&self) -> Result<Connection, Error> {
        db::open(&self.path)
    }
}

impl ExpenseStore for SQLiteExpenseStore {
    /// Create the parent directory, database file and expenses table if they
    /// do not exist yet.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::StorageUnavailable] if the directory or file cannot be created or opened,
    /// - [Error::SchemaMismatch] if the existing expenses table has different columns,
    /// - or [Error::SqlError] if there is some other SQL error.
    fn initialize(&mut self) -> Result<(), Error> {
        if let Some(parent) = self
            .path
            .parent()
            .filter(|parent| !parent.as_os_str().is_empty())
        {
            fs::create_dir_all(parent).map_err(|error| Error::StorageUnavailable {
                path: self.path.clone(),
                reason: error.to_string(),
            })?;
        }

        let connection = self.connect()?;
        db::initialize(&connection)?;

        tracing::debug!("initialized expense database at {:?}", self.path);

        Ok(())
    }

    /// Insert a new expense into the database.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::NanAmount] if the amount is NaN,
    /// - [Error::StorageUnavailable] if the database cannot be opened,
    /// - or [Error::SqlError] if there is some other SQL error.
    fn insert(&mut self, expense: ExpenseBuilder) -> Result<ExpenseId, Error> {
        check_amount(&expense)?;
        let connection = self.connect()?;

        let id = connection
            .prepare(
                "INSERT INTO expenses (date, category, amount, note)
                 VALUES (?1, ?2, ?3, ?4)
                 RETURNING id",
            )?
            .query_row(
                (expense.date, expense.category, expense.amount, expense.note),
                |row| row.get(0),
            )?;

        tracing::debug!("inserted expense {id}");

        Ok(id)
    }

    /// Replace the fields of the expense with `id`.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::NanAmount] if the amount is NaN,
    /// - [Error::StorageUnavailable] if the database cannot be opened,
    /// - or [Error::SqlError] if there is some other SQL error.
    fn update(&mut self, id: ExpenseId, expense: ExpenseBuilder) -> Result<bool, Error> {
        check_amount(&expense)?;
        let connection = self.connect()?;

        let rows_affected = connection.execute(
            "UPDATE expenses SET date = ?1, category = ?2, amount = ?3, note = ?4 WHERE id = ?5",
            (
                expense.date,
                expense.category,
                expense.amount,
                expense.note,
                id,
            ),
        )?;

        tracing::debug!("updated {rows_affected} expense(s) with id {id}");

        Ok(rows_affected != 0)
    }

    /// Delete the expense with `id`.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::StorageUnavailable] if the database cannot be opened,
    /// - or [Error::SqlError] if there is some other SQL error.
    fn delete(&mut self, id: ExpenseId) -> Result<bool, Error> {
        let connection = self.connect()?;

        let rows_affected = connection.execute("DELETE FROM expenses WHERE id = ?1", (id,))?;

        tracing::debug!("deleted {rows_affected} expense(s) with id {id}");

        Ok(rows_affected != 0)
    }

    /// Query for expenses in the database.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::StorageUnavailable] if the database cannot be opened,
    /// - or [Error::SqlError] if there is some other SQL error.
    fn list(&self, filter: &ExpenseFilter) -> Result<Vec<Expense>, Error> {
        let conditions = filter.to_sql_conditions();

        let mut query_string_parts = vec![format!("SELECT {EXPENSE_COLUMNS} FROM expenses")];

        if !conditions.clause.is_empty() {
            query_string_parts.push(format!("WHERE {}", conditions.clause));
        }

        // Sort by ID after date so that expenses on the same day keep a stable order.
        query_string_parts.push("ORDER BY date DESC, id DESC".to_owned());

        let query_string = query_string_parts.join(" ");
        let connection = self.connect()?;

        connection
            .prepare(&query_string)?
            .query_map(params_from_iter(conditions.params.iter()), map_expense_row)?
            .map(|maybe_expense| maybe_expense.map_err(Error::SqlError))
            .collect()
    }

    /// Sum expenses per category for the dates starting with `year_month`.
    ///
    /// `year_month` is compared with `substr` rather than `LIKE` so that `%`
    /// and `_` are matched literally.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::StorageUnavailable] if the database cannot be opened,
    /// - or [Error::SqlError] if there is some other SQL error.
    fn monthly_summary(&self, year_month: &str) -> Result<MonthlySummary, Error> {
        let connection = self.connect()?;

        connection
            .prepare(
                "SELECT category, SUM(amount) FROM expenses
                 WHERE substr(date, 1, length(?1)) = ?1
                 GROUP BY category",
            )?
            .query_map((year_month,), |row| {
                Ok((row.get::<_, String>(0)?, row.get::<_, f64>(1)?))
            })?
            .map(|maybe_total| maybe_total.map_err(Error::SqlError))
            .collect()
    }
}
