//! CSV ingestion for company data.

use csv::ReaderBuilder;
use thiserror::Error;
use tracing::debug;

use crate::record::{Column, REQUIRED_COLUMNS, Table};

/// Cell text treated as missing, compared case-insensitively after trimming.
const NA_MARKERS: &[&str] = &[
    "#n/a", "#n/a n/a", "#na", "-1.#ind", "-1.#qnan", "-nan", "1.#ind", "1.#qnan", "<na>", "n/a",
    "na", "null", "nan", "none",
];

/// Errors raised while turning uploaded bytes into a [`RawTable`].
#[derive(Error, Debug)]
pub enum IngestError {
    #[error("Failed to parse CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("Missing required columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),
}

/// Uncleaned rows straight from the CSV, with missing cells as `None`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<Option<String>>>,
}

impl RawTable {
    /// Position of the first header named `name`.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }
}

impl From<&Table> for RawTable {
    /// Re-expresses a cleaned table as raw input, so it can be cleaned again.
    fn from(table: &Table) -> Self {
        let headers = table.headers().into_iter().map(str::to_string).collect();
        let rows = table
            .records
            .iter()
            .map(|record| {
                table
                    .columns
                    .iter()
                    .map(|c| record.value(*c).and_then(cell))
                    .collect()
            })
            .collect();

        RawTable { headers, rows }
    }
}

/// Decodes CSV bytes with a header row into a [`RawTable`].
///
/// # Errors
///
/// Returns [`IngestError::Csv`] for malformed CSV (ragged rows, invalid
/// UTF-8) and [`IngestError::MissingColumns`] when any of
/// [`REQUIRED_COLUMNS`] is absent from the header.
pub fn parse_companies(bytes: &[u8]) -> Result<RawTable, IngestError> {
    let mut reader = ReaderBuilder::new().has_headers(true).from_reader(bytes);

    let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();

    let missing: Vec<String> = REQUIRED_COLUMNS
        .iter()
        .filter(|required| !headers.iter().any(|h| h == *required))
        .map(|required| required.to_string())
        .collect();
    if !missing.is_empty() {
        return Err(IngestError::MissingColumns(missing));
    }

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result?;
        rows.push(record.iter().map(cell).collect());
    }

    debug!(
        columns = headers.len(),
        rows = rows.len(),
        "Company CSV parsed"
    );

    Ok(RawTable { headers, rows })
}

/// Maps a raw field onto `None` when it represents a missing value.
fn cell(field: &str) -> Option<String> {
    let trimmed = field.trim();
    if trimmed.is_empty()
        || NA_MARKERS
            .iter()
            .any(|marker| marker.eq_ignore_ascii_case(trimmed))
    {
        None
    } else {
        Some(field.to_string())
    }
}

/// Header positions bound to each known column role; first occurrence wins.
pub(crate) fn column_roles(headers: &[String]) -> Vec<Option<Column>> {
    let mut seen = Vec::new();
    headers
        .iter()
        .map(|h| match Column::from_name(h) {
            Some(column) if !seen.contains(&column) => {
                seen.push(column);
                Some(column)
            }
            _ => None,
        })
        .collect()
}
