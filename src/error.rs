//! Defines the crate level error type.

use std::path::PathBuf;

/// The errors that may occur when working with the expense store.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The backing database file could not be created, opened or read.
    ///
    /// This covers a parent directory that cannot be created, a path without
    /// write permission and files that are not SQLite databases. The store
    /// cannot proceed after this error.
    #[error("could not open the expense database at {path:?}: {reason}")]
    StorageUnavailable {
        /// The path of the database file.
        path: PathBuf,
        /// A description of the underlying failure.
        reason: String,
    },

    /// An existing `expenses` table does not have the expected columns.
    ///
    /// The table is never migrated automatically.
    #[error("the expenses table has an incompatible schema: {0}")]
    SchemaMismatch(String),

    /// The amount of an expense was NaN.
    ///
    /// SQLite stores NaN as NULL, so it cannot be kept in the `amount` column.
    /// Every store rejects it so that they all behave the same way.
    #[error("the amount of an expense cannot be NaN")]
    NanAmount,

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),

    /// The CSV had issues that prevented it from being parsed.
    #[error("could not parse the CSV file: {0}")]
    InvalidCSV(String),

    /// The expenses could not be written to the export destination.
    #[error("could not export expenses: {0}")]
    ExportError(String),

    /// User input was rejected before it reached the store.
    ///
    /// The store never produces this error, it comes from
    /// [crate::input] when validating form or command-line input.
    #[error("{0}")]
    InvalidInput(String),

    /// Output could not be written, e.g. to the terminal.
    #[error("an I/O error occurred: {0}")]
    IoError(String),
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        Error::SqlError(value)
    }
}

impl From<std::io::Error> for Error {
    fn from(value: std::io::Error) -> Self {
        Error::IoError(value.to_string())
    }
}

impl From<csv::Error> for Error {
    fn from(value: csv::Error) -> Self {
        Error::InvalidCSV(value.to_string())
    }
}
