//! Result sinks: CSV files, plot-trace JSON, and console tables
//!
//! The sweep and projection drivers return plain records; everything here
//! is presentation. Numbers are rounded to 3 significant digits at this
//! boundary only.

use crate::error::Result;
use crate::pca::ProjectionRecord;
use crate::stats::round_sig;
use crate::sweep::DimensionRecord;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::path::Path;

/// Display precision in significant digits, matching the historical runs.
pub const DISPLAY_SIG_DIGITS: u32 = 3;

#[derive(Debug, Serialize)]
struct SweepRow {
    dimension: usize,
    points_per_trial: usize,
    mean: f64,
    std_dev: f64,
    trials: String,
}

/// Append one CSV row per dimension value.
pub fn write_sweep_csv<P: AsRef<Path>>(path: P, records: &[DimensionRecord]) -> Result<()> {
    let file = File::create(path)?;
    let mut writer = csv::Writer::from_writer(file);

    for record in records {
        writer.serialize(SweepRow {
            dimension: record.dimension,
            points_per_trial: record.points_per_trial,
            mean: round_sig(record.mean, DISPLAY_SIG_DIGITS),
            std_dev: round_sig(record.std_dev, DISPLAY_SIG_DIGITS),
            trials: record
                .trials
                .iter()
                .map(|&v| round_sig(v, DISPLAY_SIG_DIGITS).to_string())
                .collect::<Vec<_>>()
                .join(" "),
        })?;
    }

    writer.flush()?;
    Ok(())
}

#[derive(Debug, Serialize)]
struct ProjectionRow {
    x: f64,
    y: f64,
    label: String,
}

/// One CSV row per projected point: x, y, region label.
pub fn write_projection_csv<P: AsRef<Path>>(path: P, record: &ProjectionRecord) -> Result<()> {
    let file = File::create(path)?;
    let mut writer = csv::Writer::from_writer(file);

    for point in &record.points {
        writer.serialize(ProjectionRow {
            x: point.x,
            y: point.y,
            label: point.label.to_string(),
        })?;
    }

    writer.flush()?;
    Ok(())
}

/// One named series of plot points. Numeric data only; styling is the
/// consumer's concern.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trace {
    pub name: String,
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_y: Option<Vec<f64>>,
}

/// Axis and title metadata for a plot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Layout {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
}

/// A complete plot submission: layout plus ordered traces.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlotData {
    pub layout: Layout,
    pub traces: Vec<Trace>,
}

/// Build the sweep trace: x = dimension, y = mean, error bars = std dev.
pub fn sweep_trace(name: &str, records: &[DimensionRecord]) -> Trace {
    Trace {
        name: name.to_string(),
        x: records.iter().map(|r| r.dimension as f64).collect(),
        y: records.iter().map(|r| r.mean).collect(),
        error_y: Some(records.iter().map(|r| r.std_dev).collect()),
    }
}

/// Build one trace per region from a projection record.
pub fn projection_traces(record: &ProjectionRecord) -> Vec<Trace> {
    use crate::classify::Region;

    [Region::Inside, Region::Outside, Region::Corner]
        .iter()
        .filter_map(|&region| {
            let points: Vec<_> = record
                .points
                .iter()
                .filter(|p| p.label == region)
                .collect();
            if points.is_empty() {
                return None;
            }
            Some(Trace {
                name: region.to_string(),
                x: points.iter().map(|p| p.x).collect(),
                y: points.iter().map(|p| p.y).collect(),
                error_y: None,
            })
        })
        .collect()
}

/// Write plot data as JSON for an external charting consumer.
pub fn write_plot_json<P: AsRef<Path>>(path: P, plot: &PlotData) -> Result<()> {
    let file = File::create(path)?;
    serde_json::to_writer_pretty(file, plot)?;
    Ok(())
}

/// Print a sweep summary table.
pub fn print_sweep_table(records: &[DimensionRecord]) {
    println!(
        "{:>6} {:>12} {:>12} {:>12}",
        "Dims", "Points", "Mean", "StdDev"
    );
    println!("{:-<46}", "");

    for record in records {
        println!(
            "{:>6} {:>12} {:>12} {:>12}",
            record.dimension,
            record.points_per_trial,
            round_sig(record.mean, DISPLAY_SIG_DIGITS),
            round_sig(record.std_dev, DISPLAY_SIG_DIGITS),
        );
    }
}

/// Print the eigenstructure and region counts of a projection.
pub fn print_projection_summary(record: &ProjectionRecord) {
    use crate::classify::Region;

    println!("Top-2 eigenvalues:");
    for (i, value) in record.eigenvalues.iter().enumerate() {
        println!("  PC{}: {}", i + 1, round_sig(*value, DISPLAY_SIG_DIGITS));
    }

    println!("Region counts:");
    for region in [Region::Inside, Region::Outside, Region::Corner] {
        let count = record.points.iter().filter(|p| p.label == region).count();
        println!("  {:>8}: {}", region.to_string(), count);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::Region;
    use crate::pca::ProjectedPoint;
    use tempfile::tempdir;

    fn sample_records() -> Vec<DimensionRecord> {
        vec![
            DimensionRecord {
                dimension: 1,
                points_per_trial: 100,
                mean: 0.987654,
                std_dev: 0.0123456,
                trials: vec![0.98, 0.99, 1.0],
            },
            DimensionRecord {
                dimension: 2,
                points_per_trial: 200,
                mean: 0.765432,
                std_dev: 0.0234567,
                trials: vec![0.75, 0.77, 0.78],
            },
        ]
    }

    #[test]
    fn test_write_sweep_csv() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("sweep.csv");

        write_sweep_csv(&path, &sample_records()).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        let mut lines = contents.lines();
        assert_eq!(
            lines.next().unwrap(),
            "dimension,points_per_trial,mean,std_dev,trials"
        );
        // 3 significant digits at the display boundary.
        assert!(lines.next().unwrap().starts_with("1,100,0.988,0.0123,"));
        assert_eq!(contents.lines().count(), 3);
    }

    #[test]
    fn test_sweep_trace() {
        let trace = sweep_trace("fill", &sample_records());

        assert_eq!(trace.x, vec![1.0, 2.0]);
        assert_eq!(trace.y, vec![0.987654, 0.765432]);
        assert_eq!(
            trace.error_y,
            Some(vec![0.0123456, 0.0234567])
        );
    }

    #[test]
    fn test_plot_json_round_trip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("plot.json");

        let plot = PlotData {
            layout: Layout {
                title: "Fill ratio by dimension".to_string(),
                x_label: "Dimensions".to_string(),
                y_label: "Fill ratio".to_string(),
            },
            traces: vec![sweep_trace("fill", &sample_records())],
        };

        write_plot_json(&path, &plot).unwrap();

        let back: PlotData =
            serde_json::from_reader(std::fs::File::open(&path).unwrap()).unwrap();
        assert_eq!(back, plot);
    }

    #[test]
    fn test_projection_outputs() {
        let record = ProjectionRecord {
            points: vec![
                ProjectedPoint {
                    x: 1.0,
                    y: 2.0,
                    label: Region::Inside,
                },
                ProjectedPoint {
                    x: -1.0,
                    y: 0.5,
                    label: Region::Outside,
                },
            ],
            eigenvalues: [3.0, 1.0],
            eigenvectors: [vec![1.0, 0.0, 0.0], vec![0.0, 1.0, 0.0]],
        };

        let traces = projection_traces(&record);
        assert_eq!(traces.len(), 2);
        assert_eq!(traces[0].name, "inside");
        assert_eq!(traces[1].name, "outside");

        let dir = tempdir().unwrap();
        let path = dir.path().join("projection.csv");
        write_projection_csv(&path, &record).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(contents.lines().next().unwrap(), "x,y,label");
        assert!(contents.contains("1.0,2.0,inside"));
    }
}
