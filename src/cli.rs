//! The command line interface for recording and reviewing expenses.
//!
//! Each subcommand performs one store operation and prints the result, in the
//! same way a form-driven front end would re-render after every action.

use std::{io::Write, path::PathBuf};

use clap::{ArgAction, Args as ClapArgs, Parser, Subcommand};
use prettytable::{Table, format, row};

use crate::{
    Error,
    csv::{export_to_csv, import_from_csv},
    expense::{Expense, ExpenseBuilder, ExpenseId},
    filter::ExpenseFilter,
    input::{filter_from_input, today, validate_expense},
    stores::ExpenseStore,
};

/// The database path used when neither `--db-path` nor [DB_PATH_ENV_VAR] is set.
pub const DEFAULT_DB_PATH: &str = "data/expenses.db";

/// The environment variable that overrides the database path.
pub const DB_PATH_ENV_VAR: &str = "EXPENSES_DB_PATH";

/// Record, filter, summarise and export personal expenses.
#[derive(Parser, Debug)]
#[command(name = "expenses", version, about, long_about = None)]
pub struct Args {
    /// File path to the SQLite database of expenses.
    #[arg(long, env = DB_PATH_ENV_VAR, default_value = DEFAULT_DB_PATH)]
    pub db_path: PathBuf,

    /// Log more detail, repeat for even more (-v, -vv, -vvv).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// What to do.
    #[command(subcommand)]
    pub command: Command,
}

/// The operations offered by the command line interface.
#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Record a new expense.
    Add(ExpenseArgs),

    /// Replace every field of an existing expense.
    Update {
        /// The ID of the expense to update.
        id: ExpenseId,

        #[command(flatten)]
        #[allow(missing_docs)]
        expense: ExpenseArgs,
    },

    /// Delete an expense.
    Delete {
        /// The ID of the expense to delete.
        id: ExpenseId,
    },

    /// List expenses, newest first.
    List {
        /// Only show expenses in this category ("All" shows every category).
        #[arg(long, default_value = "")]
        category: String,

        /// Only show expenses on or after this date (YYYY-MM-DD).
        #[arg(long, default_value = "")]
        from: String,

        /// Only show expenses on or before this date (YYYY-MM-DD).
        #[arg(long, default_value = "")]
        to: String,

        /// Print the expenses as JSON instead of a table.
        #[arg(long)]
        json: bool,
    },

    /// Show the total spent per category in a month.
    Summary {
        /// The month to summarise (YYYY-MM).
        year_month: String,
    },

    /// Write every expense to a CSV file.
    Export {
        /// Where to save the CSV file.
        path: PathBuf,
    },

    /// Add every expense in a CSV file as a new expense.
    Import {
        /// The CSV file to read, in the format written by `export`.
        path: PathBuf,
    },
}

/// The fields of the expense form.
#[derive(ClapArgs, Debug, Clone, PartialEq)]
pub struct ExpenseArgs {
    /// When the expense happened (YYYY-MM-DD or DD-MM-YYYY). Defaults to today
    /// for new expenses.
    #[arg(long)]
    pub date: Option<String>,

    /// The category, e.g. Food, Transport, Utilities, Shopping or Other.
    #[arg(long, default_value = "")]
    pub category: String,

    /// How much was spent, must be greater than zero.
    #[arg(long, allow_hyphen_values = true)]
    pub amount: String,

    /// An optional note.
    #[arg(long, default_value = "")]
    pub note: String,
}

impl ExpenseArgs {
    fn validate(&self, default_date: Option<String>) -> Result<ExpenseBuilder, Error> {
        let date = self.date.clone().or(default_date).unwrap_or_default();

        validate_expense(&date, &self.category, &self.amount, &self.note)
    }
}

/// Run `command` against `store`, writing messages for the user to `out`.
///
/// # Errors
/// Returns [Error::InvalidInput] if the user's input is rejected, otherwise
/// any error from the store, CSV file or `out` is passed on.
pub fn run<S, W>(command: Command, store: &mut S, out: &mut W) -> Result<(), Error>
where
    S: ExpenseStore,
    W: Write,
{
    match command {
        Command::Add(expense) => {
            let builder = expense.validate(Some(today()))?;
            let id = store.insert(builder)?;

            tracing::info!("added expense {id}");
            writeln!(out, "Added expense {id}.")?;
        }
        Command::Update { id, expense } => {
            let builder = expense.validate(None)?;

            if store.update(id, builder)? {
                tracing::info!("updated expense {id}");
                writeln!(out, "Updated expense {id}.")?;
            } else {
                writeln!(out, "No expense with ID {id}, nothing was updated.")?;
            }
        }
        Command::Delete { id } => {
            if store.delete(id)? {
                tracing::info!("deleted expense {id}");
                writeln!(out, "Deleted expense {id}.")?;
            } else {
                writeln!(out, "No expense with ID {id}, nothing was deleted.")?;
            }
        }
        Command::List {
            category,
            from,
            to,
            json,
        } => {
            let expenses = store.list(&filter_from_input(&category, &from, &to))?;

            if json {
                serde_json::to_writer_pretty(&mut *out, &expenses)
                    .map_err(|error| Error::IoError(error.to_string()))?;
                writeln!(out)?;
            } else if expenses.is_empty() {
                writeln!(out, "No expenses found.")?;
            } else {
                write!(out, "{}", render_table(&expenses))?;
            }
        }
        Command::Summary { year_month } => {
            let year_month = year_month.trim();
            let summary = store.monthly_summary(year_month)?;

            if summary.is_empty() {
                writeln!(out, "No expenses recorded for {year_month}.")?;
            } else {
                writeln!(out, "Summary {year_month}")?;

                for (category, amount) in summary.iter() {
                    writeln!(out, "{category}: {amount:.2}")?;
                }

                writeln!(out)?;
                writeln!(out, "Total: {:.2}", summary.total())?;
            }
        }
        Command::Export { path } => {
            let expenses = store.list(&ExpenseFilter::default())?;
            export_to_csv(&expenses, &path)?;

            writeln!(
                out,
                "Exported {} expenses to {}.",
                expenses.len(),
                path.display()
            )?;
        }
        Command::Import { path } => {
            let expenses = import_from_csv(&path)?;
            let count = expenses.len();

            // Stored IDs are assigned by the store, the IDs in the file are ignored.
            // Files are written newest first, so inserting from the end keeps the
            // order of expenses that share a date.
            for expense in expenses.into_iter().rev() {
                store.insert(ExpenseBuilder::from(expense))?;
            }

            tracing::info!("imported {count} expenses from {}", path.display());
            writeln!(out, "Imported {count} expenses from {}.", path.display())?;
        }
    }

    Ok(())
}

fn render_table(expenses: &[Expense]) -> Table {
    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_NO_BORDER_LINE_SEPARATOR);
    table.set_titles(row!["ID", "Date", "Category", "Amount", "Note"]);

    for expense in expenses {
        table.add_row(row![
            expense.id,
            expense.date,
            expense.category,
            format!("{:.2}", expense.amount),
            expense.note
        ]);
    }

    table
}
