/*! This module defines the SQLite schema for expenses and how connections to the database are opened. */

use std::{path::Path, time::Duration};

use rusqlite::{Connection, MAIN_DB, Row, Transaction as SqlTransaction, TransactionBehavior};

use crate::{Error, expense::Expense};

/// How long a statement waits for another process to release its lock on the
/// database file before failing.
pub const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// The columns of the `expenses` table, in the order they are selected.
pub const EXPENSE_COLUMNS: &str = "id, date, category, amount, note";

/// The expected column names and declared types of the `expenses` table.
const EXPECTED_SCHEMA: [(&str, &str); 5] = [
    ("id", "INTEGER"),
    ("date", "TEXT"),
    ("category", "TEXT"),
    ("amount", "REAL"),
    ("note", "TEXT"),
];

/// Open a connection to the database file at `path`.
///
/// The file is created if it does not exist, but its parent directory must
/// already exist.
///
/// # Errors
/// Returns [Error::StorageUnavailable] if the file cannot be opened, if it
/// exists but is not a SQLite database, or if it can only be opened read-only.
pub fn open(path: &Path) -> Result<Connection, Error> {
    let unavailable = |error: rusqlite::Error| Error::StorageUnavailable {
        path: path.to_owned(),
        reason: error.to_string(),
    };

    let connection = Connection::open(path).map_err(unavailable)?;
    connection.busy_timeout(BUSY_TIMEOUT).map_err(unavailable)?;

    // SQLite opens files lazily, reading the schema version forces it to read
    // the file header so that bad files are reported here.
    connection
        .query_row("PRAGMA schema_version", [], |row| row.get::<_, i64>(0))
        .map_err(unavailable)?;

    ensure_writable(&connection, path)?;

    Ok(connection)
}

/// SQLite quietly falls back to a read-only connection when the file cannot be
/// opened for writing, which would otherwise only show up as an error on the
/// first write.
fn ensure_writable(connection: &Connection, path: &Path) -> Result<(), Error> {
    let is_readonly = connection
        .is_readonly(MAIN_DB)
        .map_err(|error| Error::StorageUnavailable {
            path: path.to_owned(),
            reason: error.to_string(),
        })?;

    if is_readonly {
        return Err(Error::StorageUnavailable {
            path: path.to_owned(),
            reason: "the database file is read-only".to_owned(),
        });
    }

    Ok(())
}

/// Create the expenses table if it does not exist and check its shape.
///
/// Safe to call on every start up.
///
/// # Errors
/// Returns [Error::SchemaMismatch] if an existing `expenses` table has
/// different columns, or [Error::SqlError] if there is some other SQL error.
pub fn initialize(connection: &Connection) -> Result<(), Error> {
    let transaction = SqlTransaction::new_unchecked(connection, TransactionBehavior::Exclusive)?;

    create_expense_table(&transaction)?;
    verify_expense_table(&transaction)?;

    transaction.execute(
        "CREATE INDEX IF NOT EXISTS idx_expenses_date ON expenses(date)",
        (),
    )?;

    transaction.commit()?;

    Ok(())
}

fn create_expense_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS expenses (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                date TEXT NOT NULL,
                category TEXT NOT NULL,
                amount REAL NOT NULL,
                note TEXT
                )",
        (),
    )?;

    Ok(())
}

/// Check the column names and declared types of the `expenses` table.
fn verify_expense_table(connection: &Connection) -> Result<(), Error> {
    let columns: Vec<(String, String)> = connection
        .prepare("SELECT name, type FROM pragma_table_info('expenses') ORDER BY cid")?
        .query_map([], |row| Ok((row.get(0)?, row.get(1)?)))?
        .collect::<Result<_, _>>()?;

    let matches_expected = columns.len() == EXPECTED_SCHEMA.len()
        && columns
            .iter()
            .zip(EXPECTED_SCHEMA)
            .all(|((name, declared_type), (want_name, want_type))| {
                name == want_name && declared_type.eq_ignore_ascii_case(want_type)
            });

    if matches_expected {
        return Ok(());
    }

    let found = columns
        .iter()
        .map(|(name, declared_type)| format!("{name} {declared_type}"))
        .collect::<Vec<_>>()
        .join(", ");
    let expected = EXPECTED_SCHEMA
        .iter()
        .map(|(name, declared_type)| format!("{name} {declared_type}"))
        .collect::<Vec<_>>()
        .join(", ");

    Err(Error::SchemaMismatch(format!(
        "expected columns ({expected}), found ({found})"
    )))
}

/// Map a database row selected with [EXPENSE_COLUMNS] to an [Expense].
///
/// A NULL note is read as an empty string.
pub fn map_expense_row(row: &Row) -> Result<Expense, rusqlite::Error> {
    let id = row.get(0)?;
    let date = row.get(1)?;
    let category = row.get(2)?;
    let amount = row.get(3)?;
    let note: Option<String> = row.get(4)?;

    Ok(Expense {
        id,
        date,
        category,
        amount,
        note: note.unwrap_or_default(),
    })
}

#[cfg(test)]
mod tests {
    use std::fs;

    use rusqlite::{Connection, OpenFlags};
    use tempfile::TempDir;

    use crate::Error;

    use super::{EXPENSE_COLUMNS, ensure_writable, initialize, map_expense_row, open};

    #[test]
    fn initialize_is_idempotent() {
        let conn = Connection::open_in_memory().unwrap();

        initialize(&conn).unwrap();
        conn.execute(
            "INSERT INTO expenses (date, category, amount, note) VALUES ('2025-11-01', 'Food', 12.5, 'lunch')",
            (),
        )
        .unwrap();
        initialize(&conn).unwrap();

        let count: i64 = conn
            .query_row("SELECT COUNT(id) FROM expenses", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 1);
    }

    #[test]
    fn initialize_rejects_incompatible_table() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute(
            "CREATE TABLE expenses (id INTEGER PRIMARY KEY, description TEXT NOT NULL)",
            (),
        )
        .unwrap();

        let result = initialize(&conn);

        assert!(
            matches!(result, Err(Error::SchemaMismatch(_))),
            "want schema mismatch, got {result:?}"
        );
    }

    #[test]
    fn initialize_rejects_wrong_column_type() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute(
            "CREATE TABLE expenses (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                date TEXT NOT NULL,
                category TEXT NOT NULL,
                amount TEXT NOT NULL,
                note TEXT
            )",
            (),
        )
        .unwrap();

        let result = initialize(&conn);

        assert!(matches!(result, Err(Error::SchemaMismatch(_))));
    }

    #[test]
    fn null_note_maps_to_empty_string() {
        let conn = Connection::open_in_memory().unwrap();
        initialize(&conn).unwrap();
        conn.execute(
            "INSERT INTO expenses (date, category, amount, note) VALUES ('2025-11-01', 'Food', 3, NULL)",
            (),
        )
        .unwrap();

        let expense = conn
            .query_row(
                &format!("SELECT {EXPENSE_COLUMNS} FROM expenses"),
                [],
                map_expense_row,
            )
            .unwrap();

        assert_eq!(expense.note, "");
        assert_eq!(expense.amount, 3.0);
    }

    #[test]
    fn open_fails_on_file_that_is_not_a_database() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("expenses.db");
        fs::write(&path, "not a database\n".repeat(100)).unwrap();

        let result = open(&path);

        assert!(
            matches!(result, Err(Error::StorageUnavailable { .. })),
            "want storage unavailable, got {result:?}"
        );
    }

    #[test]
    fn open_fails_when_parent_directory_is_missing() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing").join("expenses.db");

        let result = open(&path);

        assert!(matches!(result, Err(Error::StorageUnavailable { .. })));
    }

    #[test]
    fn read_only_connection_is_unavailable() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("expenses.db");
        initialize(&open(&path).unwrap()).unwrap();
        let read_only = Connection::open_with_flags(&path, OpenFlags::SQLITE_OPEN_READ_ONLY).unwrap();

        let result = ensure_writable(&read_only, &path);

        assert_eq!(
            result,
            Err(Error::StorageUnavailable {
                path,
                reason: "the database file is read-only".to_owned(),
            })
        );
    }

    #[test]
    fn writable_connection_is_available() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("expenses.db");
        let connection = open(&path).unwrap();

        assert_eq!(ensure_writable(&connection, &path), Ok(()));
    }
}
