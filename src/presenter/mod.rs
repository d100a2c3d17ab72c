//! Rendering of an analysis into display tables and charts.

pub mod charts;
pub mod tables;

use tracing::{debug, warn};

use crate::analyzers::describe::describe;
use crate::pipeline::Analysis;
use charts::{ChartError, ChartSize, horizontal_bar_chart, pie_chart, size_category_chart};
use tables::{format_count_table, format_summary_table, with_title};

pub const SECTOR_CHART_TITLE: &str = "Top 10 Sectors by Company Count";
pub const COUNTRY_CHART_TITLE: &str = "Top 5 Countries Distribution";
pub const SIZE_CHART_TITLE: &str = "Company Size Category Distribution";

/// A rendered chart and the file name it is saved under.
#[derive(Debug, Clone)]
pub struct Chart {
    pub file_name: &'static str,
    pub title: &'static str,
    pub svg: String,
}

/// Everything shown for one analysis, in display order.
#[derive(Debug, Clone)]
pub struct Report {
    pub summary: String,
    pub sectors: String,
    pub regions: String,
    pub charts: Vec<Chart>,
}

impl Report {
    /// Text sections joined for terminal output.
    pub fn text(&self) -> String {
        [
            self.summary.as_str(),
            self.sectors.as_str(),
            self.regions.as_str(),
        ]
        .join("\n\n")
    }
}

/// Renders the summary table, the sector and region tables, then the sector
/// bar chart, country pie chart and size category chart.
///
/// Charts whose counts are empty are skipped.
#[tracing::instrument(skip_all, fields(rows = analysis.table.len()))]
pub fn render(analysis: &Analysis, size: ChartSize) -> Result<Report, ChartError> {
    let aggregates = &analysis.aggregates;

    let summary = with_title(
        "Summary Stats",
        &format_summary_table(&describe(&analysis.table)),
    );
    let sectors = with_title(
        "Top 10 Sectors by Company Count",
        &format_count_table(&aggregates.sectors),
    );
    let regions = with_title("Region Counts", &format_count_table(&aggregates.regions));

    let mut charts = Vec::with_capacity(3);

    if aggregates.sectors.is_empty() {
        warn!("No sectors to chart, skipping sector chart");
    } else {
        charts.push(Chart {
            file_name: "top_sectors.svg",
            title: SECTOR_CHART_TITLE,
            svg: horizontal_bar_chart(
                &aggregates.sectors,
                SECTOR_CHART_TITLE,
                "Count",
                "Sector",
                size,
            )?,
        });
    }

    if aggregates.countries.is_empty() {
        warn!("No countries to chart, skipping country chart");
    } else {
        charts.push(Chart {
            file_name: "top_countries.svg",
            title: COUNTRY_CHART_TITLE,
            svg: pie_chart(&aggregates.countries, COUNTRY_CHART_TITLE, size)?,
        });
    }

    if aggregates.size_categories.is_empty() {
        warn!("No size categories to chart, skipping size chart");
    } else {
        charts.push(Chart {
            file_name: "size_categories.svg",
            title: SIZE_CHART_TITLE,
            svg: size_category_chart(&aggregates.size_categories, SIZE_CHART_TITLE, size)?,
        });
    }

    debug!(charts = charts.len(), "Report rendered");
    Ok(Report {
        summary,
        sectors,
        regions,
        charts,
    })
}
