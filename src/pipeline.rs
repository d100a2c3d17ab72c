//! Upload to analysis: parse, clean and aggregate in one call.

use tracing::debug;

use crate::analyzers::aggregate::aggregate;
use crate::analyzers::types::Aggregates;
use crate::cleaner::{CleanStats, clean_with_stats};
use crate::parser::{IngestError, parse_companies};
use crate::record::Table;

/// A cleaned table together with its row counts and frequency lists.
#[derive(Debug, Clone, PartialEq)]
pub struct Analysis {
    pub table: Table,
    pub stats: CleanStats,
    pub aggregates: Aggregates,
}

/// Runs the whole pipeline over uploaded CSV bytes.
///
/// # Errors
///
/// Returns an [`IngestError`] when the bytes are not valid CSV or lack a
/// required column. Nothing is returned for a partially read file.
pub fn analyze(bytes: &[u8]) -> Result<Analysis, IngestError> {
    let raw = parse_companies(bytes)?;
    let (table, stats) = clean_with_stats(raw);
    let aggregates = aggregate(&table);

    debug!(
        rows = table.len(),
        sectors = aggregates.sectors.entries.len(),
        countries = aggregates.countries.entries.len(),
        "Analysis complete"
    );

    Ok(Analysis {
        table,
        stats,
        aggregates,
    })
}

/// What the tool is showing: nothing yet, or the results of one upload.
#[derive(Debug, Clone, PartialEq)]
pub enum Session {
    AwaitingInput,
    Displaying(Analysis),
}

impl Session {
    /// Moves to [`Session::Displaying`] for a provided upload. A failed
    /// upload is an error, it does not fall back to awaiting input.
    pub fn from_upload(upload: Option<&[u8]>) -> Result<Self, IngestError> {
        match upload {
            None => Ok(Session::AwaitingInput),
            Some(bytes) => analyze(bytes).map(Session::Displaying),
        }
    }
}
