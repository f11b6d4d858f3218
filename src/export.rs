//! Chart data export for model results.
//!
//! Each model produces one or more named curves; this module flattens
//! them into chart series with optional markers (the EOQ line, the LP
//! optimum, the queue operating point) and writes them to disk as
//! JSON Lines or CSV.
//!
//! # Example
//!
//! ```rust
//! use modelar::export::{ChartSeries, Marker};
//!
//! let mut series = ChartSeries::new("total cost");
//! series.marker = Some(Marker::VerticalLine { x: 223.6 });
//! ```

use std::fmt;
use std::fs::File;
use std::io::{BufWriter, Write as IoWrite};
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, ModelResult};
use crate::models::{inventory, production, queueing};
use crate::models::{Curve, CurvePoint, EoqInput, ProductionInput, ProductionResult, QueueInput};

// ============================================================================
// Chart Series
// ============================================================================

/// Highlight attached to a chart series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Marker {
    /// Vertical reference line at a given x.
    VerticalLine {
        /// Position on the x axis.
        x: f64,
    },
    /// Single highlighted point.
    Point {
        /// Position on the x axis.
        x: f64,
        /// Position on the y axis.
        y: f64,
    },
}

/// A named curve ready for export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSeries {
    /// Series name, used as the chart legend entry.
    pub name: String,
    /// Sampled points in x order.
    pub points: Vec<CurvePoint>,
    /// Optional highlight for this series.
    pub marker: Option<Marker>,
}

impl ChartSeries {
    /// Create an empty series with a name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            points: Vec::new(),
            marker: None,
        }
    }

    /// Build a series from a sampled curve.
    #[must_use]
    pub fn from_curve(curve: &Curve) -> Self {
        Self {
            name: curve.label().to_string(),
            points: curve.points().to_vec(),
            marker: None,
        }
    }
}

// ============================================================================
// Chart Builders
// ============================================================================

/// Build the production chart: one series per constraint boundary plus
/// the feasible frontier, with the optimal plan marked on the frontier.
///
/// # Errors
///
/// Returns error if the input is invalid or the chart is not
/// expressible for this number of products.
pub fn production_chart(
    input: &ProductionInput,
    samples: usize,
) -> ModelResult<Vec<ChartSeries>> {
    let curves = production::constraint_frontier(input, samples)?;
    let mut series: Vec<ChartSeries> = curves.iter().map(ChartSeries::from_curve).collect();

    if let ProductionResult::Optimal { quantities, .. } = production::solve(input)? {
        if let [q0, q1] = quantities[..] {
            if let Some(frontier) = series.last_mut() {
                frontier.marker = Some(Marker::Point { x: q0, y: q1 });
            }
        }
    }

    Ok(series)
}

/// Build the inventory chart: the total cost curve with a vertical
/// line at the economic order quantity.
///
/// # Errors
///
/// Returns error if the input is invalid or `samples` is zero.
pub fn inventory_chart(input: &EoqInput, samples: usize) -> ModelResult<Vec<ChartSeries>> {
    let result = inventory::compute_with_samples(input, samples)?;

    let mut series = ChartSeries::from_curve(&result.total_cost_curve);
    series.marker = Some(Marker::VerticalLine { x: result.eoq });

    Ok(vec![series])
}

/// Build the queueing chart: average number in system across arrival
/// rates, with the operating point marked when the queue is stable.
///
/// # Errors
///
/// Returns error if the input is invalid or `samples` is zero.
pub fn queueing_chart(input: &QueueInput, samples: usize) -> ModelResult<Vec<ChartSeries>> {
    let curve = queueing::occupancy_curve(input, samples)?;

    let mut series = ChartSeries::from_curve(&curve);
    if let Some(metrics) = queueing::evaluate(input)?.metrics() {
        series.marker = Some(Marker::Point {
            x: input.arrival_rate,
            y: metrics.avg_in_system,
        });
    }

    Ok(vec![series])
}

// ============================================================================
// Export Pipeline
// ============================================================================

/// Export format for chart data.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExportFormat {
    /// One JSON object per series, one per line.
    #[default]
    JsonLines,
    /// Flat `series,x,y` rows.
    Csv,
}

impl ExportFormat {
    /// File extension for this format.
    #[must_use]
    pub const fn extension(&self) -> &'static str {
        match self {
            Self::JsonLines => "jsonl",
            Self::Csv => "csv",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::JsonLines => write!(f, "json"),
            Self::Csv => write!(f, "csv"),
        }
    }
}

impl FromStr for ExportFormat {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" | "jsonl" | "json-lines" => Ok(Self::JsonLines),
            "csv" => Ok(Self::Csv),
            other => Err(ModelError::config(format!(
                "Unknown export format '{other}' (expected 'json' or 'csv')"
            ))),
        }
    }
}

/// Export series to JSON Lines format.
///
/// # Errors
///
/// Returns error if file operations fail.
pub fn to_json_lines(series: &[ChartSeries], path: &Path) -> ModelResult<()> {
    let file =
        File::create(path).map_err(|e| ModelError::io(format!("Failed to create file: {e}")))?;
    let mut writer = BufWriter::new(file);

    for entry in series {
        let json = serde_json::to_string(entry)
            .map_err(|e| ModelError::serialization(format!("JSON serialization failed: {e}")))?;
        writeln!(writer, "{json}").map_err(|e| ModelError::io(format!("Write failed: {e}")))?;
    }

    writer
        .flush()
        .map_err(|e| ModelError::io(format!("Flush failed: {e}")))?;

    Ok(())
}

/// Export series to CSV format.
///
/// Points are written as long-format `series,x,y` rows. Markers are
/// carried only by the JSON Lines format.
///
/// # Errors
///
/// Returns error if file operations fail.
pub fn to_csv(series: &[ChartSeries], path: &Path) -> ModelResult<()> {
    let file =
        File::create(path).map_err(|e| ModelError::io(format!("Failed to create file: {e}")))?;
    let mut writer = BufWriter::new(file);

    writeln!(writer, "series,x,y")
        .map_err(|e| ModelError::io(format!("Write header failed: {e}")))?;

    for entry in series {
        for point in &entry.points {
            writeln!(writer, "{},{},{}", entry.name, point.x, point.y)
                .map_err(|e| ModelError::io(format!("Write data failed: {e}")))?;
        }
    }

    writer
        .flush()
        .map_err(|e| ModelError::io(format!("Flush failed: {e}")))?;

    Ok(())
}

/// Export series using the given format.
///
/// # Errors
///
/// Returns error if export fails.
pub fn export(series: &[ChartSeries], path: &Path, format: ExportFormat) -> ModelResult<()> {
    match format {
        ExportFormat::JsonLines => to_json_lines(series, path),
        ExportFormat::Csv => to_csv(series, path),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn workshop_production() -> ProductionInput {
        ProductionInput::default()
    }

    #[test]
    fn test_chart_series_from_curve() {
        let mut curve = Curve::new("demo");
        curve.push(1.0, 2.0);
        curve.push(2.0, 4.0);

        let series = ChartSeries::from_curve(&curve);
        assert_eq!(series.name, "demo");
        assert_eq!(series.points.len(), 2);
        assert!(series.marker.is_none());
    }

    #[test]
    fn test_production_chart_marks_optimum() {
        let series = production_chart(&workshop_production(), 100).unwrap();
        assert_eq!(series.len(), 3);

        let frontier = series.last().unwrap();
        assert_eq!(frontier.name, "feasible frontier");
        match frontier.marker {
            Some(Marker::Point { x, y }) => {
                assert!((x - 20.0).abs() < 1e-6);
                assert!((y - 60.0).abs() < 1e-6);
            }
            other => panic!("expected optimum marker, got {other:?}"),
        }
    }

    #[test]
    fn test_inventory_chart_marks_eoq() {
        let series = inventory_chart(&EoqInput::default(), 100).unwrap();
        assert_eq!(series.len(), 1);
        assert_eq!(series[0].name, "total cost");
        assert_eq!(series[0].points.len(), 100);

        match series[0].marker {
            Some(Marker::VerticalLine { x }) => {
                assert!((x - 223.606_797_749_978_97).abs() < 1e-9);
            }
            other => panic!("expected EOQ marker, got {other:?}"),
        }
    }

    #[test]
    fn test_queueing_chart_marks_operating_point() {
        let series = queueing_chart(&QueueInput::default(), 100).unwrap();
        assert_eq!(series.len(), 1);
        assert_eq!(series[0].name, "average in system");

        match series[0].marker {
            Some(Marker::Point { x, y }) => {
                assert!((x - 2.0).abs() < 1e-9);
                assert!((y - 2.0).abs() < 1e-9);
            }
            other => panic!("expected operating point marker, got {other:?}"),
        }
    }

    #[test]
    fn test_queueing_chart_unstable_has_no_marker() {
        let input = QueueInput::new(5.0, 3.0);
        let series = queueing_chart(&input, 50).unwrap();
        assert!(series[0].marker.is_none());
        assert_eq!(series[0].points.len(), 50);
    }

    #[test]
    fn test_export_to_json_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chart.jsonl");

        let series = inventory_chart(&EoqInput::default(), 10).unwrap();
        to_json_lines(&series, &path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 1);

        let parsed: ChartSeries = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(parsed.name, "total cost");
        assert_eq!(parsed.points.len(), 10);
        assert!(parsed.marker.is_some());
    }

    #[test]
    fn test_export_to_csv() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chart.csv");

        let series = production_chart(&workshop_production(), 20).unwrap();
        to_csv(&series, &path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        // Header plus 3 series of 20 points each
        assert_eq!(lines.len(), 61);
        assert_eq!(lines[0], "series,x,y");
        assert!(lines[1].starts_with("constraint 1,"));
    }

    #[test]
    fn test_export_dispatch_by_format() {
        let dir = tempfile::tempdir().unwrap();
        let series = queueing_chart(&QueueInput::default(), 10).unwrap();

        let json_path = dir.path().join("queue.jsonl");
        export(&series, &json_path, ExportFormat::JsonLines).unwrap();
        assert!(json_path.exists());

        let csv_path = dir.path().join("queue.csv");
        export(&series, &csv_path, ExportFormat::Csv).unwrap();
        assert!(csv_path.exists());
    }

    #[test]
    fn test_export_format_from_str() {
        assert_eq!("csv".parse::<ExportFormat>().unwrap(), ExportFormat::Csv);
        assert_eq!("json".parse::<ExportFormat>().unwrap(), ExportFormat::JsonLines);
        assert_eq!("JSONL".parse::<ExportFormat>().unwrap(), ExportFormat::JsonLines);
        assert!("parquet".parse::<ExportFormat>().is_err());
    }

    #[test]
    fn test_export_format_extension() {
        assert_eq!(ExportFormat::JsonLines.extension(), "jsonl");
        assert_eq!(ExportFormat::Csv.extension(), "csv");
    }

    #[test]
    fn test_export_format_display() {
        assert_eq!(ExportFormat::JsonLines.to_string(), "json");
        assert_eq!(ExportFormat::Csv.to_string(), "csv");
    }

    #[test]
    fn test_export_to_unwritable_path_fails() {
        let series = vec![ChartSeries::new("empty")];
        let result = to_csv(&series, Path::new("/nonexistent/dir/chart.csv"));
        assert!(result.is_err());
    }

    #[test]
    fn test_marker_serde_round_trip() {
        let marker = Marker::Point { x: 20.0, y: 60.0 };
        let json = serde_json::to_string(&marker).unwrap();
        assert!(json.contains("point"));

        let back: Marker = serde_json::from_str(&json).unwrap();
        assert_eq!(back, marker);
    }
}
