//! Chart rendering with [`plotters`].
//!
//! Charts are drawn into in-memory SVG documents, which keeps rendering free
//! of system font and image dependencies. Callers decide where, if anywhere,
//! the SVG ends up.

use plotters::coord::Shift;
use plotters::element::Pie;
use plotters::prelude::*;
use thiserror::Error;

use crate::analyzers::types::CountResult;
use crate::record::SizeCategory;

/// Errors that can occur during chart generation
#[derive(Error, Debug)]
pub enum ChartError {
    #[error("Failed to create drawing area: {0}")]
    DrawingArea(String),

    #[error("Failed to configure chart: {0}")]
    ChartConfig(String),

    #[error("Failed to draw chart elements: {0}")]
    Drawing(String),

    #[error("Invalid data: {0}")]
    InvalidData(String),
}

type Result<T> = core::result::Result<T, ChartError>;

/// Pixel dimensions of a rendered chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChartSize {
    pub width: u32,
    pub height: u32,
}

impl Default for ChartSize {
    fn default() -> Self {
        Self {
            width: 1000,
            height: 600,
        }
    }
}

/// Slice and bar colors, in pick order.
const PALETTE: [RGBColor; 10] = [
    RGBColor(31, 119, 180),
    RGBColor(255, 127, 14),
    RGBColor(44, 160, 44),
    RGBColor(214, 39, 40),
    RGBColor(148, 103, 189),
    RGBColor(140, 86, 75),
    RGBColor(227, 119, 194),
    RGBColor(127, 127, 127),
    RGBColor(188, 189, 34),
    RGBColor(23, 190, 207),
];

const FONT: &str = "sans-serif";

/// Horizontal bar chart: one bar per entry, value on the y axis, count on
/// the x axis, most frequent at the top.
pub fn horizontal_bar_chart(
    counts: &CountResult,
    title: &str,
    x_label: &str,
    y_label: &str,
    size: ChartSize,
) -> Result<String> {
    if counts.is_empty() {
        return Err(ChartError::InvalidData(format!(
            "No {} values to chart",
            counts.column
        )));
    }

    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, (size.width, size.height)).into_drawing_area();
        draw_horizontal_bars(&root, counts, title, x_label, y_label)?;
        root.present()
            .map_err(|e| ChartError::Drawing(e.to_string()))?;
    }
    Ok(svg)
}

fn draw_horizontal_bars<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    counts: &CountResult,
    title: &str,
    x_label: &str,
    y_label: &str,
) -> Result<()> {
    root.fill(&WHITE)
        .map_err(|e| ChartError::DrawingArea(e.to_string()))?;

    // Reversed so the largest count sits at the top of the y axis.
    let labels: Vec<&str> = counts
        .entries
        .iter()
        .rev()
        .map(|e| e.value.as_str())
        .collect();
    let bars = counts.entries.len() as u32;
    let x_max = axis_max(counts.entries.iter().map(|e| e.count));

    let mut chart = ChartBuilder::on(root)
        .caption(title, (FONT, 28))
        .margin(20)
        .x_label_area_size(50)
        .y_label_area_size(160)
        .build_cartesian_2d(0u32..x_max, (0u32..bars).into_segmented())
        .map_err(|e| ChartError::ChartConfig(e.to_string()))?;

    chart
        .configure_mesh()
        .disable_y_mesh()
        .x_desc(x_label)
        .y_desc(y_label)
        // integer axes never step below 1, so an oversized hint labels every bar
        .y_labels(labels.len() * 2 + 1)
        .y_label_formatter(&|v: &SegmentValue<u32>| match v {
            SegmentValue::CenterOf(i) => labels
                .get(*i as usize)
                .map_or_else(String::new, |l| l.to_string()),
            _ => String::new(),
        })
        .label_style((FONT, 14))
        .draw()
        .map_err(|e| ChartError::Drawing(e.to_string()))?;

    chart
        .draw_series(
            Histogram::horizontal(&chart)
                .style(PALETTE[0].filled())
                .margin(4)
                .data(
                    counts
                        .entries
                        .iter()
                        .rev()
                        .enumerate()
                        .map(|(i, e)| (i as u32, e.count as u32)),
                ),
        )
        .map_err(|e| ChartError::Drawing(e.to_string()))?;

    Ok(())
}

/// Pie chart of the entries' counts with a percentage label on each slice.
pub fn pie_chart(counts: &CountResult, title: &str, size: ChartSize) -> Result<String> {
    if counts.is_empty() {
        return Err(ChartError::InvalidData(format!(
            "No {} values to chart",
            counts.column
        )));
    }

    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, (size.width, size.height)).into_drawing_area();
        draw_pie(&root, counts, title)?;
        root.present()
            .map_err(|e| ChartError::Drawing(e.to_string()))?;
    }
    Ok(svg)
}

fn draw_pie<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    counts: &CountResult,
    title: &str,
) -> Result<()> {
    root.fill(&WHITE)
        .map_err(|e| ChartError::DrawingArea(e.to_string()))?;
    let area = root
        .titled(title, (FONT, 28))
        .map_err(|e| ChartError::DrawingArea(e.to_string()))?;

    let (width, height) = area.dim_in_pixel();
    let center = (width as i32 / 2, height as i32 / 2);
    let radius = f64::from(width.min(height)) * 0.35;

    let sizes: Vec<f64> = counts.entries.iter().map(|e| e.count as f64).collect();
    let colors: Vec<RGBColor> = (0..sizes.len())
        .map(|i| PALETTE[i % PALETTE.len()])
        .collect();
    let labels: Vec<&str> = counts.entries.iter().map(|e| e.value.as_str()).collect();

    let mut pie = Pie::new(&center, &radius, &sizes, &colors, &labels);
    pie.start_angle(90.0);
    pie.label_style((FONT, 18).into_font().color(&BLACK));
    pie.percentages((FONT, radius * 0.08).into_font().color(&WHITE));

    area.draw(&pie)
        .map_err(|e| ChartError::Drawing(e.to_string()))?;

    Ok(())
}

/// Vertical bar chart of size categories, always in Small, Medium, Large,
/// Unknown order; categories without rows get an empty bar.
pub fn size_category_chart(counts: &CountResult, title: &str, size: ChartSize) -> Result<String> {
    if counts.is_empty() {
        return Err(ChartError::InvalidData(format!(
            "No {} values to chart",
            counts.column
        )));
    }

    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, (size.width, size.height)).into_drawing_area();
        draw_size_categories(&root, counts, title)?;
        root.present()
            .map_err(|e| ChartError::Drawing(e.to_string()))?;
    }
    Ok(svg)
}

fn draw_size_categories<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    counts: &CountResult,
    title: &str,
) -> Result<()> {
    root.fill(&WHITE)
        .map_err(|e| ChartError::DrawingArea(e.to_string()))?;

    let bars = category_counts(counts);
    let y_max = axis_max(bars.iter().map(|(_, count)| *count));

    let mut chart = ChartBuilder::on(root)
        .caption(title, (FONT, 28))
        .margin(20)
        .x_label_area_size(50)
        .y_label_area_size(60)
        .build_cartesian_2d(
            (0u32..SizeCategory::ALL.len() as u32).into_segmented(),
            0u32..y_max,
        )
        .map_err(|e| ChartError::ChartConfig(e.to_string()))?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_desc("Size Category")
        .y_desc("Count")
        .x_labels(SizeCategory::ALL.len() * 2 + 1)
        .x_label_formatter(&|v: &SegmentValue<u32>| match v {
            SegmentValue::CenterOf(i) => SizeCategory::ALL
                .get(*i as usize)
                .map_or_else(String::new, |c| c.to_string()),
            _ => String::new(),
        })
        .label_style((FONT, 14))
        .draw()
        .map_err(|e| ChartError::Drawing(e.to_string()))?;

    chart
        .draw_series(
            Histogram::vertical(&chart)
                .style(PALETTE[0].filled())
                .margin(10)
                .data(
                    bars.iter()
                        .enumerate()
                        .map(|(i, (_, count))| (i as u32, *count as u32)),
                ),
        )
        .map_err(|e| ChartError::Drawing(e.to_string()))?;

    Ok(())
}

/// Counts per size category in display order, zero for absent categories.
pub fn category_counts(counts: &CountResult) -> Vec<(SizeCategory, usize)> {
    SizeCategory::ALL
        .iter()
        .map(|c| (*c, counts.count_of(c.as_str())))
        .collect()
}

/// Upper bound of a count axis, leaving headroom above the tallest bar.
fn axis_max(counts: impl Iterator<Item = usize>) -> u32 {
    let max = counts.max().unwrap_or(0) as u32;
    max + (max / 10).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzers::aggregate::count_by;

    #[test]
    fn test_empty_counts_are_rejected() {
        let empty = count_by("sector", std::iter::empty(), None);
        let size = ChartSize::default();

        assert!(matches!(
            horizontal_bar_chart(&empty, "t", "x", "y", size),
            Err(ChartError::InvalidData(_))
        ));
        assert!(matches!(
            pie_chart(&empty, "t", size),
            Err(ChartError::InvalidData(_))
        ));
        assert!(matches!(
            size_category_chart(&empty, "t", size),
            Err(ChartError::InvalidData(_))
        ));
    }

    #[test]
    fn test_category_counts_fill_missing_categories() {
        let counts = count_by("size_category", ["Large", "Small", "Large"].map(Some), None);

        assert_eq!(
            category_counts(&counts),
            vec![
                (SizeCategory::Small, 1),
                (SizeCategory::Medium, 0),
                (SizeCategory::Large, 2),
                (SizeCategory::Unknown, 0),
            ]
        );
    }

    #[test]
    fn test_axis_max_leaves_headroom() {
        assert_eq!(axis_max([0].into_iter()), 1);
        assert_eq!(axis_max([3, 7].into_iter()), 8);
        assert_eq!(axis_max([40].into_iter()), 44);
    }

    #[test]
    fn test_horizontal_bar_chart_renders_svg() {
        let counts = count_by("sector", ["fintech", "biotech", "fintech"].map(Some), None);

        let svg = horizontal_bar_chart(
            &counts,
            "Top Sectors",
            "Count",
            "Sector",
            ChartSize::default(),
        )
        .unwrap();

        assert!(svg.contains("<svg"));
        assert!(svg.contains("Top Sectors"));
        assert!(svg.contains("fintech"));
        assert!(svg.contains("biotech"));
    }

    #[test]
    fn test_pie_chart_renders_svg() {
        let counts = count_by(
            "country",
            ["ca", "germany", "ca", "japan"].map(Some),
            Some(5),
        );

        let svg = pie_chart(&counts, "Top Countries", ChartSize::default()).unwrap();

        assert!(svg.contains("Top Countries"));
        assert!(svg.contains("germany"));
    }

    #[test]
    fn test_size_category_chart_renders_svg() {
        let counts = count_by("size_category", ["Small", "Unknown"].map(Some), None);

        let svg = size_category_chart(&counts, "Sizes", ChartSize::default()).unwrap();

        assert!(svg.contains("Medium"));
        assert!(svg.contains("Large"));
    }
}
