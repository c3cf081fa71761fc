use std::{error::Error, io, process::exit};

use clap::Parser;

use expense_tracker::{
    Error as ExpenseError, ExpenseStore, SQLiteExpenseStore,
    cli::{Args, run},
    setup_logging,
};

/// Record, filter, summarise and export expenses from the command line.
fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    setup_logging(args.verbose);

    let mut store = SQLiteExpenseStore::new(&args.db_path);
    store.initialize()?;

    let mut stdout = io::stdout().lock();

    match run(args.command, &mut store, &mut stdout) {
        Err(ExpenseError::InvalidInput(message)) => {
            eprintln!("Invalid input: {message}");
            exit(2);
        }
        result => Ok(result?),
    }
}
