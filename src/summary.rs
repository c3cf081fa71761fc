//! Per-category totals for a single month.

use std::collections::BTreeMap;

/// The summed amount of each category's expenses for one year-month.
///
/// Categories are kept in alphabetical order. A month without expenses gives
/// an empty summary rather than an error.
///
/// Amounts are added with Kahan-Babuska-Neumaier compensated summation, the
/// same algorithm SQLite uses for `SUM`, so sums built in memory match sums
/// computed by the database.
#[derive(Debug, Clone, Default)]
pub struct MonthlySummary {
    totals: BTreeMap<String, CompensatedSum>,
}

/// A running sum and the rounding error lost from it so far.
#[derive(Debug, Clone, Copy, Default)]
struct CompensatedSum {
    sum: f64,
    error: f64,
}

impl CompensatedSum {
    fn add(&mut self, amount: f64) {
        let total = self.sum + amount;

        if self.sum.abs() > amount.abs() {
            self.error += (self.sum - total) + amount;
        } else {
            self.error += (amount - total) + self.sum;
        }

        self.sum = total;
    }

    fn value(&self) -> f64 {
        self.sum + self.error
    }
}

impl MonthlySummary {
    /// Add `amount` to the running total for `category`.
    pub fn add(&mut self, category: &str, amount: f64) {
        self.totals
            .entry(category.to_owned())
            .or_default()
            .add(amount);
    }

    /// The summed amount for `category`, if it had any expenses.
    pub fn get(&self, category: &str) -> Option<f64> {
        self.totals.get(category).map(CompensatedSum::value)
    }

    /// Iterate over `(category, amount)` pairs in category order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.totals
            .iter()
            .map(|(category, total)| (category.as_str(), total.value()))
    }

    /// The number of categories in the summary.
    pub fn len(&self) -> usize {
        self.totals.len()
    }

    /// Whether no expenses matched the month.
    pub fn is_empty(&self) -> bool {
        self.totals.is_empty()
    }

    /// The sum of every category's amount.
    pub fn total(&self) -> f64 {
        let mut total = CompensatedSum::default();

        for (_, amount) in self.iter() {
            total.add(amount);
        }

        total.value()
    }
}

impl PartialEq for MonthlySummary {
    fn eq(&self, other: &Self) -> bool {
        self.iter().eq(other.iter())
    }
}

impl FromIterator<(String, f64)> for MonthlySummary {
    fn from_iter<I: IntoIterator<Item = (String, f64)>>(iter: I) -> Self {
        let mut summary = MonthlySummary::default();

        for (category, amount) in iter {
            summary.add(&category, amount);
        }

        summary
    }
}
