//! Normalization and deduplication of raw company rows.
//!
//! Cleaning never fails: every field has a default. The order of the steps
//! matters, in particular the all-missing drop rule looks at the values as
//! they were read, before `unknown` is filled in.

use serde::Serialize;
use std::collections::HashSet;
use tracing::debug;

use crate::parser::{RawTable, column_roles};
use crate::record::{Column, CompanySize, Record, Table, UNKNOWN, derive_country};

/// Row counts observed while cleaning.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CleanStats {
    pub rows_in: usize,
    pub duplicates_removed: usize,
    pub rows_dropped: usize,
    pub rows_out: usize,
}

/// Cleans `raw`, discarding the row counts.
pub fn clean(raw: RawTable) -> Table {
    clean_with_stats(raw).0
}

/// Deduplicates, drops empty rows, normalizes and derives columns.
///
/// `raw` must carry every required column, which [`crate::parser::parse_companies`]
/// guarantees; a missing one reads as an all-missing column.
#[tracing::instrument(skip_all, fields(rows = raw.rows.len()))]
pub fn clean_with_stats(raw: RawTable) -> (Table, CleanStats) {
    let roles = column_roles(&raw.headers);
    let position = |column: Column| roles.iter().position(|r| *r == Some(column));

    let name_at = position(Column::CompanyName);
    let focus_at = position(Column::Focus);
    let sector_at = position(Column::Sector);
    let region_at = position(Column::Region);
    let size_at = position(Column::Size);

    // Output layout: input order, extras numbered as they appear, derived
    // columns appended unless the input already had them.
    let mut columns = Vec::with_capacity(raw.headers.len() + 2);
    let mut extra_names = Vec::new();
    let mut extra_positions = Vec::new();
    for (i, role) in roles.iter().enumerate() {
        match role {
            Some(column) => columns.push(*column),
            None => {
                columns.push(Column::Extra(extra_names.len()));
                extra_names.push(raw.headers[i].clone());
                extra_positions.push(i);
            }
        }
    }
    for derived in [Column::SizeCategory, Column::Country] {
        if !columns.contains(&derived) {
            columns.push(derived);
        }
    }

    let mut stats = CleanStats {
        rows_in: raw.rows.len(),
        ..Default::default()
    };
    let mut seen: HashSet<Option<String>> = HashSet::new();
    let mut records = Vec::with_capacity(raw.rows.len());

    for mut row in raw.rows {
        let mut take = |at: Option<usize>| at.and_then(|i| row.get_mut(i)?.take());

        let company_name = take(name_at);
        if seen.contains(&company_name) {
            stats.duplicates_removed += 1;
            continue;
        }
        seen.insert(company_name.clone());

        let focus = take(focus_at);
        let sector = take(sector_at);
        let region = take(region_at);
        let size = take(size_at);

        if sector.is_none() && region.is_none() && size.is_none() {
            stats.rows_dropped += 1;
            continue;
        }

        let region = normalize(region);
        let size = CompanySize::parse(&normalize(size));
        let extras = extra_positions
            .iter()
            .map(|&i| row.get_mut(i)?.take())
            .collect();

        records.push(Record {
            company_name,
            focus: normalize(focus),
            sector: normalize(sector),
            country: derive_country(&region),
            region,
            size,
            size_category: size.category(),
            extras,
        });
    }

    stats.rows_out = records.len();
    debug!(
        rows_in = stats.rows_in,
        duplicates_removed = stats.duplicates_removed,
        rows_dropped = stats.rows_dropped,
        rows_out = stats.rows_out,
        "Company table cleaned"
    );

    (
        Table {
            columns,
            extra_names,
            records,
        },
        stats,
    )
}

/// Fills a missing value with `unknown`, otherwise lowercases and trims it.
fn normalize(value: Option<String>) -> String {
    match value {
        Some(v) => v.to_lowercase().trim().to_string(),
        None => UNKNOWN.to_string(),
    }
}
