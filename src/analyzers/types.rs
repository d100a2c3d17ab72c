//! Data types produced by the aggregation step.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::cleaner::CleanStats;

/// One distinct value and how many rows carry it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CountEntry {
    pub value: String,
    pub count: usize,
}

/// Frequency list for one categorical column, most frequent first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CountResult {
    pub column: String,
    /// Rows counted before truncation.
    pub total: usize,
    pub entries: Vec<CountEntry>,
}

impl CountResult {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Count for `value`, zero when it is absent or was truncated away.
    pub fn count_of(&self, value: &str) -> usize {
        self.entries
            .iter()
            .find(|e| e.value == value)
            .map_or(0, |e| e.count)
    }

    /// Share of `count` within the whole column, as a percentage.
    pub fn pct(&self, count: usize) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            (count as f64 / self.total as f64) * 100.0
        }
    }
}

/// The four frequency lists shown in a report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Aggregates {
    pub sectors: CountResult,
    pub regions: CountResult,
    pub size_categories: CountResult,
    pub countries: CountResult,
}

/// Descriptive statistics for one column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnSummary {
    pub column: String,
    pub count: usize,
    pub stats: ColumnStats,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ColumnStats {
    Categorical {
        unique: usize,
        top: Option<String>,
        freq: Option<usize>,
    },
    Numeric {
        mean: f64,
        std: Option<f64>,
        min: f64,
        q25: f64,
        q50: f64,
        q75: f64,
        max: f64,
    },
}

/// Machine-readable run summary, written next to the rendered report.
#[derive(Debug, Serialize)]
pub struct AnalysisSummary {
    pub generated_at: DateTime<Utc>,
    pub source: Option<String>,
    pub clean: CleanStats,
    pub aggregates: Aggregates,
}
