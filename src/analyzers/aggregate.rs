use crate::analyzers::types::{Aggregates, CountEntry, CountResult};
use crate::record::{COUNTRY, Column, REGION, SECTOR, SIZE_CATEGORY, Table};
use std::collections::HashMap;

pub const TOP_SECTORS: usize = 10;
pub const TOP_REGIONS: usize = 10;
pub const TOP_COUNTRIES: usize = 5;

/// Counts occurrences of each value, most frequent first.
///
/// Sorting is stable, so values with equal counts keep the order in which
/// they were first seen. Missing values are not counted. The result is cut
/// to `limit` entries when one is given.
pub fn count_by<'a, I>(column: &str, values: I, limit: Option<usize>) -> CountResult
where
    I: IntoIterator<Item = Option<&'a str>>,
{
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut entries: Vec<CountEntry> = Vec::new();
    let mut total = 0;

    for value in values.into_iter().flatten() {
        total += 1;
        match index.get(value) {
            Some(&i) => entries[i].count += 1,
            None => {
                index.insert(value, entries.len());
                entries.push(CountEntry {
                    value: value.to_string(),
                    count: 1,
                });
            }
        }
    }

    entries.sort_by(|a, b| b.count.cmp(&a.count));
    if let Some(limit) = limit {
        entries.truncate(limit);
    }

    CountResult {
        column: column.to_string(),
        total,
        entries,
    }
}

/// Builds the sector, region, size category and country frequency lists.
pub fn aggregate(table: &Table) -> Aggregates {
    Aggregates {
        sectors: count_by(SECTOR, table.values(Column::Sector), Some(TOP_SECTORS)),
        regions: count_by(REGION, table.values(Column::Region), Some(TOP_REGIONS)),
        size_categories: count_by(SIZE_CATEGORY, table.values(Column::SizeCategory), None),
        countries: count_by(COUNTRY, table.values(Column::Country), Some(TOP_COUNTRIES)),
    }
}
