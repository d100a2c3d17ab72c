//! Export of the cleaned table and persistence of rendered reports.
//!
//! Supports CSV export, pretty-printing, JSON serialization, and writing a
//! report directory.

use anyhow::{Context, Result};
use bytes::Bytes;
use csv::WriterBuilder;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

use crate::analyzers::types::AnalysisSummary;
use crate::presenter::Report;
use crate::record::Table;

pub const EXPORT_FILE_NAME: &str = "cleaned_company_data.csv";
pub const EXPORT_MIME: &str = "text/csv";
pub const SUMMARY_FILE_NAME: &str = "summary.json";

/// A named payload offered for download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Download {
    pub file_name: &'static str,
    pub mime: &'static str,
    pub data: Bytes,
}

/// Serializes `table` as comma-delimited UTF-8 CSV with a header row.
///
/// Columns follow the table's layout, derived columns included. Missing
/// cells are written as empty fields.
pub fn to_csv(table: &Table) -> Result<Vec<u8>> {
    let mut writer = WriterBuilder::new().from_writer(Vec::new());

    writer.write_record(table.headers())?;
    for record in &table.records {
        writer.write_record(table.columns.iter().map(|c| record.value(*c).unwrap_or("")))?;
    }
    writer.flush()?;

    writer
        .into_inner()
        .map_err(|e| anyhow::anyhow!("Failed to finish CSV export: {}", e))
}

/// Wraps the CSV export of `table` as the `cleaned_company_data.csv` download.
pub fn export(table: &Table) -> Result<Download> {
    let data = to_csv(table)?;
    debug!(
        bytes = data.len(),
        rows = table.len(),
        "Cleaned CSV exported"
    );

    Ok(Download {
        file_name: EXPORT_FILE_NAME,
        mime: EXPORT_MIME,
        data: Bytes::from(data),
    })
}

/// Logs an analysis summary using Rust's debug pretty-print format.
pub fn print_pretty(summary: &AnalysisSummary) {
    debug!("{:#?}", summary);
}

/// Logs an analysis summary as pretty-printed JSON.
pub fn print_json(summary: &AnalysisSummary) -> Result<()> {
    info!("{}", serde_json::to_string_pretty(summary)?);
    Ok(())
}

/// Writes the charts, the cleaned CSV and `summary.json` into `dir`,
/// creating it if needed.
pub fn write_report(
    dir: &Path,
    report: &Report,
    download: &Download,
    summary: &AnalysisSummary,
) -> Result<()> {
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create report directory {}", dir.display()))?;

    for chart in &report.charts {
        let path = dir.join(chart.file_name);
        fs::write(&path, &chart.svg)
            .with_context(|| format!("Failed to write chart {}", path.display()))?;
    }

    let csv_path = dir.join(download.file_name);
    fs::write(&csv_path, &download.data)
        .with_context(|| format!("Failed to write {}", csv_path.display()))?;

    let summary_path = dir.join(SUMMARY_FILE_NAME);
    fs::write(&summary_path, serde_json::to_vec_pretty(summary)?)
        .with_context(|| format!("Failed to write {}", summary_path.display()))?;

    info!(
        dir = %dir.display(),
        charts = report.charts.len(),
        "Report written"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzers::aggregate::aggregate;
    use crate::cleaner::{CleanStats, clean};
    use crate::parser::parse_companies;
    use chrono::Utc;
    use std::env;

    #[test]
    fn test_export_names_the_download() {
        let download = export(&sample_table()).unwrap();

        assert_eq!(download.file_name, "cleaned_company_data.csv");
        assert_eq!(download.mime, "text/csv");
        assert!(!download.data.is_empty());
    }

    #[test]
    fn test_to_csv_appends_derived_columns() {
        let csv = String::from_utf8(to_csv(&sample_table()).unwrap()).unwrap();
        let lines: Vec<_> = csv.lines().collect();

        assert_eq!(
            lines[0],
            "company_name,focus,sector,region,size,website,size_category,country"
        );
        assert_eq!(lines[1], "Acme,ai,tech,\"usa, ca\",11-50,,Small,ca");
        assert_eq!(
            lines[2],
            "Beta,unknown,health,berlin,unknown,beta.de,Unknown,berlin"
        );
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn test_export_reingests_to_same_table() {
        let table = sample_table();
        let download = export(&table).unwrap();

        let reloaded = clean(parse_companies(&download.data).unwrap());

        assert_eq!(reloaded, table);
    }

    #[test]
    fn test_print_pretty_does_not_panic() {
        print_pretty(&sample_summary());
    }

    #[test]
    fn test_print_json_does_not_panic() {
        print_json(&sample_summary()).unwrap();
    }

    #[test]
    fn test_write_report_creates_files() {
        let dir = env::temp_dir().join("company_analyzer_test_report");
        let _ = fs::remove_dir_all(&dir); // clean up any prior run

        let report = Report {
            summary: String::new(),
            sectors: String::new(),
            regions: String::new(),
            charts: vec![crate::presenter::Chart {
                file_name: "top_sectors.svg",
                title: "Top Sectors",
                svg: "<svg></svg>".to_string(),
            }],
        };
        let download = export(&sample_table()).unwrap();

        write_report(&dir, &report, &download, &sample_summary()).unwrap();

        assert_eq!(
            fs::read_to_string(dir.join("top_sectors.svg")).unwrap(),
            "<svg></svg>"
        );
        assert!(dir.join("cleaned_company_data.csv").exists());
        let summary = fs::read_to_string(dir.join("summary.json")).unwrap();
        assert!(summary.contains("\"generated_at\""));
        assert!(summary.contains("\"rows_out\": 2"));

        fs::remove_dir_all(&dir).unwrap();
    }

    // Helper functions for tests
    fn sample_table() -> Table {
        let csv = "company_name,focus,sector,region,size,website\n\
                   Acme,AI,Tech,\"USA, CA\",11-50,\n\
                   Acme,AI,Tech,\"USA, CA\",11-50,\n\
                   Beta,,Health,Berlin,5000+,beta.de\n";
        clean(parse_companies(csv.as_bytes()).unwrap())
    }

    fn sample_summary() -> AnalysisSummary {
        let table = sample_table();
        AnalysisSummary {
            generated_at: Utc::now(),
            source: Some("companies.csv".to_string()),
            clean: CleanStats {
                rows_in: 3,
                duplicates_removed: 1,
                rows_dropped: 0,
                rows_out: table.len(),
            },
            aggregates: aggregate(&table),
        }
    }
}
