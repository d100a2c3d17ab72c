//! Per-column descriptive statistics for a cleaned table.

use crate::analyzers::aggregate::count_by;
use crate::analyzers::types::{ColumnStats, ColumnSummary};
use crate::analyzers::utility::{mean, quantile, stddev};
use crate::record::Table;

/// Summarizes every column of `table`, in header order.
///
/// A column is numeric when all of its present values parse as finite
/// numbers and there is at least one; every other column gets the
/// categorical summary (distinct values, most frequent value and its
/// frequency).
pub fn describe(table: &Table) -> Vec<ColumnSummary> {
    table
        .columns
        .iter()
        .map(|&column| {
            let values: Vec<&str> = table.values(column).flatten().collect();
            ColumnSummary {
                column: table.column_name(column).to_string(),
                count: values.len(),
                stats: summarize(table.column_name(column), &values),
            }
        })
        .collect()
}

fn summarize(name: &str, values: &[&str]) -> ColumnStats {
    match parse_numbers(values) {
        Some(numbers) => numeric(numbers),
        None => {
            let counts = count_by(name, values.iter().copied().map(Some), None);
            let top = counts.entries.first();
            ColumnStats::Categorical {
                unique: counts.entries.len(),
                top: top.map(|e| e.value.clone()),
                freq: top.map(|e| e.count),
            }
        }
    }
}

fn parse_numbers(values: &[&str]) -> Option<Vec<f64>> {
    if values.is_empty() {
        return None;
    }
    values
        .iter()
        .map(|v| v.trim().parse::<f64>().ok().filter(|n| n.is_finite()))
        .collect()
}

fn numeric(mut numbers: Vec<f64>) -> ColumnStats {
    numbers.sort_by(f64::total_cmp);
    let avg = mean(&numbers);

    ColumnStats::Numeric {
        mean: avg,
        std: stddev(&numbers, avg),
        min: numbers[0],
        q25: quantile(&numbers, 0.25),
        q50: quantile(&numbers, 0.5),
        q75: quantile(&numbers, 0.75),
        max: numbers[numbers.len() - 1],
    }
}
