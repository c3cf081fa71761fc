//! Exports expenses to CSV files and reads them back.
//!
//! Files have the header `id,date,category,amount,note` followed by one row
//! per expense. Fields containing commas, quotes or new lines are quoted.

use std::{
    fs::{self, File},
    io::{Read, Write},
    path::Path,
};

use csv::{ReaderBuilder, Terminator, WriterBuilder};

use crate::{Error, expense::Expense};

/// The header row of exported CSV files.
pub const CSV_HEADER: [&str; 5] = ["id", "date", "category", "amount", "note"];

/// Write `expenses` as CSV to `path`, creating parent directories if needed.
///
/// An existing file at `path` is overwritten.
///
/// # Errors
/// Returns [Error::ExportError] if the directory or file cannot be created or
/// written to.
pub fn export_to_csv(expenses: &[Expense], path: &Path) -> Result<(), Error> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .map_err(|error| Error::ExportError(format!("{}: {error}", parent.display())))?;
    }

    let file = File::create(path)
        .map_err(|error| Error::ExportError(format!("{}: {error}", path.display())))?;

    write_csv(expenses, file)?;

    tracing::info!("exported {} expenses to {}", expenses.len(), path.display());

    Ok(())
}

/// Write `expenses` as CSV to `writer`.
///
/// The header row is always written, even if there are no expenses.
///
/// # Errors
/// Returns [Error::ExportError] if `writer` fails.
pub fn write_csv<W: Write>(expenses: &[Expense], writer: W) -> Result<(), Error> {
    let export_error = |error: csv::Error| Error::ExportError(error.to_string());

    let mut csv_writer = WriterBuilder::new()
        .has_headers(false)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(writer);

    csv_writer.write_record(CSV_HEADER).map_err(export_error)?;

    for expense in expenses {
        csv_writer.serialize(expense).map_err(export_error)?;
    }

    csv_writer
        .flush()
        .map_err(|error| Error::ExportError(error.to_string()))
}

/// Read expenses from the CSV file at `path`.
///
/// # Errors
/// Returns [Error::InvalidCSV] if the file cannot be read or a row does not
/// describe an expense.
pub fn import_from_csv(path: &Path) -> Result<Vec<Expense>, Error> {
    let file = File::open(path)
        .map_err(|error| Error::InvalidCSV(format!("{}: {error}", path.display())))?;

    read_csv(file)
}

/// Read expenses from CSV text produced by [write_csv].
///
/// A missing or empty note is read as an empty string.
///
/// # Errors
/// Returns [Error::InvalidCSV] if a row does not describe an expense, e.g.
/// the amount is not a number.
pub fn read_csv<R: Read>(reader: R) -> Result<Vec<Expense>, Error> {
    ReaderBuilder::new()
        .has_headers(true)
        .from_reader(reader)
        .deserialize::<Expense>()
        .map(|maybe_expense| maybe_expense.map_err(Error::from))
        .collect()
}
