//! Turns raw user input into values the expense store accepts.
//!
//! The store takes whatever it is given, so all checks on what a user types
//! live here.

use time::{
    Date, OffsetDateTime, format_description::BorrowedFormatItem, macros::format_description,
};

use crate::{Error, expense::ExpenseBuilder, filter::ExpenseFilter};

/// The categories offered to the user. Other categories are still accepted.
pub const SUGGESTED_CATEGORIES: [&str; 5] = ["Food", "Transport", "Utilities", "Shopping", "Other"];

/// The category used when the user leaves the category blank.
pub const DEFAULT_CATEGORY: &str = "Other";

/// The category filter value that means "every category".
pub const ALL_CATEGORIES: &str = "All";

const ISO_DATE_FORMAT: &[BorrowedFormatItem] = format_description!("[year]-[month]-[day]");
const DAY_FIRST_DATE_FORMAT: &[BorrowedFormatItem] = format_description!("[day]-[month]-[year]");

/// Parse a monetary amount, falling back to `0.0` if `text` is not a number.
pub fn parse_amount(text: &str) -> f64 {
    text.trim().parse().unwrap_or(0.0)
}

/// Convert a `YYYY-MM-DD` or `DD-MM-YYYY` date to `YYYY-MM-DD`.
///
/// # Errors
/// Returns [Error::InvalidInput] if `text` is not a real date in either format.
pub fn normalise_date(text: &str) -> Result<String, Error> {
    let text = text.trim();

    let date = Date::parse(text, ISO_DATE_FORMAT)
        .or_else(|_| Date::parse(text, DAY_FIRST_DATE_FORMAT))
        .map_err(|_| {
            Error::InvalidInput(format!(
                "\"{text}\" is not a valid date, use YYYY-MM-DD or DD-MM-YYYY"
            ))
        })?;

    format_date(date)
}

/// Today's date in the local time zone as `YYYY-MM-DD`.
///
/// Falls back to UTC if the local offset cannot be determined.
pub fn today() -> String {
    let now = OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc());

    // The ISO format only has numeric components, so formatting cannot fail.
    format_date(now.date()).unwrap_or_default()
}

fn format_date(date: Date) -> Result<String, Error> {
    date.format(ISO_DATE_FORMAT)
        .map_err(|error| Error::InvalidInput(format!("could not format date {date}: {error}")))
}

/// Check the fields of an expense form and convert them into an [ExpenseBuilder].
///
/// All fields are trimmed. A blank category becomes [DEFAULT_CATEGORY] and an
/// unparseable amount is treated as `0.0`.
///
/// # Errors
/// Returns [Error::InvalidInput] if the date is blank or not a valid date, or
/// if the amount is not greater than zero.
pub fn validate_expense(
    date: &str,
    category: &str,
    amount: &str,
    note: &str,
) -> Result<ExpenseBuilder, Error> {
    if date.trim().is_empty() {
        return Err(Error::InvalidInput("a date is required".to_owned()));
    }

    let date = normalise_date(date)?;

    let amount = parse_amount(amount);
    if amount <= 0.0 || !amount.is_finite() {
        return Err(Error::InvalidInput(
            "the amount must be a number greater than zero".to_owned(),
        ));
    }

    let category = match category.trim() {
        "" => DEFAULT_CATEGORY,
        category => category,
    };

    Ok(ExpenseBuilder {
        date,
        category: category.to_owned(),
        amount,
        note: note.trim().to_owned(),
    })
}

/// Build an [ExpenseFilter] from the fields of a filter form.
///
/// A blank category or [ALL_CATEGORIES] and blank dates place no constraint
/// on the listed expenses. Dates are compared as given.
pub fn filter_from_input(category: &str, date_from: &str, date_to: &str) -> ExpenseFilter {
    let non_blank = |text: &str| {
        let text = text.trim();
        (!text.is_empty()).then(|| text.to_owned())
    };

    ExpenseFilter {
        category: non_blank(category).filter(|category| category != ALL_CATEGORIES),
        date_from: non_blank(date_from),
        date_to: non_blank(date_to),
    }
}
