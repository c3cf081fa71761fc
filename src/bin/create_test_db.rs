use std::error::Error;
use std::path::Path;
use std::process::exit;

use clap::Parser;

use expense_tracker::{Expense, ExpenseStore, SQLiteExpenseStore, input::SUGGESTED_CATEGORIES};

/// A utility for creating a test database for the expenses command line tool.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to save the SQLite database to.
    #[arg(long, short)]
    output_path: String,

    /// The year of the sample expenses.
    #[arg(long, default_value_t = 2025)]
    year: u16,
}

/// Create and populate a database for manual testing.
fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let output_path = Path::new(&args.output_path);

    match output_path.extension() {
        None => {
            eprintln!("Output path must include a file extension (e.g., 'my_database.db').");
            exit(1);
        }
        Some(extension) if extension.is_empty() => {
            eprintln!("Output path must include a file extension (e.g., 'my_database.db').");
            exit(1);
        }
        _ => {}
    }

    if output_path.is_file() {
        eprintln!("File already exists at {output_path:#?}!");
        exit(1);
    }

    println!("Creating database at {output_path:#?}");
    let mut store = SQLiteExpenseStore::open(output_path)?;

    println!("Creating sample expenses...");

    let mut count = 0;

    for month in 1..=12u32 {
        for (index, category) in SUGGESTED_CATEGORIES.iter().enumerate() {
            let index = index as u32;
            let day = 1 + (index * 6 + month) % 28;
            let date = format!("{}-{month:02}-{day:02}", args.year);
            let amount = f64::from(10 * (index + 1) + month) + 0.25 * f64::from(index);

            store.insert(
                Expense::build(&date, category, amount).note(&format!("sample {category} expense")),
            )?;
            count += 1;
        }
    }

    println!("Created {count} expenses.");
    println!("Success!");

    Ok(())
}
