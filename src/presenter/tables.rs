//! ASCII table formatting using the [`tabled`] crate.

use tabled::builder::Builder;
use tabled::settings::Style;

use crate::analyzers::types::{ColumnStats, ColumnSummary, CountResult};

const STAT_ROWS: [&str; 11] = [
    "count", "unique", "top", "freq", "mean", "std", "min", "25%", "50%", "75%", "max",
];

/// Formats column summaries with one row per statistic and one column per
/// table column. Statistics that do not apply to a column are left blank.
pub fn format_summary_table(summaries: &[ColumnSummary]) -> String {
    if summaries.is_empty() {
        return "No columns to describe".to_string();
    }

    let mut builder = Builder::default();

    let mut header = vec![String::new()];
    header.extend(summaries.iter().map(|s| s.column.clone()));
    builder.push_record(header);

    for stat in STAT_ROWS {
        let mut row = vec![stat.to_string()];
        row.extend(summaries.iter().map(|s| stat_cell(s, stat)));
        builder.push_record(row);
    }

    let mut table = builder.build();
    table.with(Style::modern());
    table.to_string()
}

fn stat_cell(summary: &ColumnSummary, stat: &str) -> String {
    if stat == "count" {
        return summary.count.to_string();
    }

    match &summary.stats {
        ColumnStats::Categorical { unique, top, freq } => match stat {
            "unique" => unique.to_string(),
            "top" => top.clone().unwrap_or_default(),
            "freq" => freq.map(|f| f.to_string()).unwrap_or_default(),
            _ => String::new(),
        },
        ColumnStats::Numeric {
            mean,
            std,
            min,
            q25,
            q50,
            q75,
            max,
        } => match stat {
            "mean" => number(*mean),
            "std" => std.map(number).unwrap_or_default(),
            "min" => number(*min),
            "25%" => number(*q25),
            "50%" => number(*q50),
            "75%" => number(*q75),
            "max" => number(*max),
            _ => String::new(),
        },
    }
}

fn number(value: f64) -> String {
    format!("{:.6}", value)
}

/// Formats a frequency list as a two-column `<column> | count` table.
pub fn format_count_table(counts: &CountResult) -> String {
    if counts.is_empty() {
        return format!("No {} values to count", counts.column);
    }

    let mut builder = Builder::default();
    builder.push_record([counts.column.clone(), "count".to_string()]);
    for entry in &counts.entries {
        builder.push_record([entry.value.clone(), entry.count.to_string()]);
    }

    let mut table = builder.build();
    table.with(Style::modern());
    table.to_string()
}

/// Prefixes `table` with an underlined title.
pub fn with_title(title: &str, table: &str) -> String {
    format!("{}\n{}\n{}", title, "=".repeat(title.len()), table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzers::aggregate::count_by;

    #[test]
    fn test_count_table_lists_entries_in_order() {
        let counts = count_by("sector", ["tech", "health", "tech"].map(Some), None);
        let table = format_count_table(&counts);

        assert!(table.contains("sector"));
        assert!(table.contains("count"));
        let tech = table.find("tech").unwrap();
        let health = table.find("health").unwrap();
        assert!(tech < health);
    }

    #[test]
    fn test_count_table_empty() {
        let counts = count_by("region", std::iter::empty(), None);
        assert_eq!(format_count_table(&counts), "No region values to count");
    }

    #[test]
    fn test_summary_table_blanks_inapplicable_stats() {
        let summaries = vec![
            ColumnSummary {
                column: "sector".to_string(),
                count: 2,
                stats: ColumnStats::Categorical {
                    unique: 1,
                    top: Some("tech".to_string()),
                    freq: Some(2),
                },
            },
            ColumnSummary {
                column: "employees".to_string(),
                count: 1,
                stats: ColumnStats::Numeric {
                    mean: 4.0,
                    std: None,
                    min: 4.0,
                    q25: 4.0,
                    q50: 4.0,
                    q75: 4.0,
                    max: 4.0,
                },
            },
        ];

        let table = format_summary_table(&summaries);

        assert!(table.contains("employees"));
        assert!(table.contains("tech"));
        assert!(table.contains("4.000000"));
        assert_eq!(stat_cell(&summaries[0], "mean"), "");
        assert_eq!(stat_cell(&summaries[1], "top"), "");
        assert_eq!(stat_cell(&summaries[1], "std"), "");
        assert_eq!(stat_cell(&summaries[0], "freq"), "2");
    }

    #[test]
    fn test_with_title() {
        assert_eq!(with_title("Sectors", "t"), "Sectors\n=======\nt");
    }
}
