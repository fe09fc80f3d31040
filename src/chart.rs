// File: src/chart.rs
//
// Chart-ready data for the three presentation paths: 2D line/scatter/bubble
// charts with one series per candidate, and one 3D surface or heatmap per
// candidate. Rendering is left to whatever tool consumes the exported data.

use crate::benchmarks::ResultCollection;
use crate::errors::GridError;
use crate::grid::{series, Columns, Grid, Heatmap, Surface};
use serde::{Deserialize, Serialize};

const AXIS_NAMES: [&str; 3] = ["x", "y", "z"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartStyle {
    #[default]
    Line,
    Scatter,
    /// Two axes as position, time as marker size
    Bubble,
}

/// Which condition positions a chart plots
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SeriesAxes {
    One(usize),
    Two(usize, usize),
}

impl SeriesAxes {
    pub fn positions(&self) -> Vec<usize> {
        match *self {
            SeriesAxes::One(a) => vec![a],
            SeriesAxes::Two(a, b) => vec![a, b],
        }
    }

    fn first(&self) -> usize {
        match *self {
            SeriesAxes::One(a) | SeriesAxes::Two(a, _) => a,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartOptions {
    pub style: ChartStyle,
    /// Marker size for scatter charts, and the scale factor for bubbles
    pub size: f64,
    pub cmap: String,
    /// Legend location code, passed through to the renderer
    pub legend_loc: u8,
    pub xlabel: String,
    pub ylabel: String,
    pub title: String,
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self {
            style: ChartStyle::Line,
            size: 500.0,
            cmap: "rainbow".to_string(),
            legend_loc: 2,
            xlabel: "xlabel".to_string(),
            ylabel: "time".to_string(),
            title: "title".to_string(),
        }
    }
}

impl ChartOptions {
    /// Defaults for surface and heatmap charts, where the y label names a
    /// condition axis rather than time
    pub fn grid_default() -> Self {
        Self { cmap: "coolwarm".to_string(), ylabel: "ylabel".to_string(), ..Self::default() }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Series {
    pub label: String,
    /// Position in the colour map, from 0.0 to 1.0
    pub color: f64,
    pub x: Vec<i64>,
    pub y: Vec<f64>,
    /// Marker sizes, only for bubble charts
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sizes: Option<Vec<f64>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Chart2d {
    pub options: ChartOptions,
    pub series: Vec<Series>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SurfaceChart {
    pub title: String,
    pub xlabel: String,
    pub ylabel: String,
    pub cmap: String,
    pub surface: Surface,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeatmapChart {
    pub title: String,
    pub xlabel: String,
    pub ylabel: String,
    pub cmap: String,
    pub heatmap: Heatmap,
}

/// Replace `{n}` placeholders in a candidate label with the name of the chart
/// axis that plots condition position `n`.
pub fn substitute_titles(label: &str, axes: SeriesAxes) -> String {
    let mut title = label.to_string();
    for (name, position) in AXIS_NAMES.iter().zip(axes.positions()) {
        title = title.replace(&format!("{{{}}}", position), name);
    }
    title
}

/// `n` evenly spaced points from 0.0 to 1.0 inclusive
pub fn linspace(n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![0.0],
        _ => (0..n).map(|i| i as f64 / (n - 1) as f64).collect(),
    }
}

/// One series per candidate, in result order
pub fn chart_2d(
    results: &ResultCollection,
    axes: SeriesAxes,
    options: ChartOptions,
) -> Result<Chart2d, GridError> {
    let colors = linspace(results.len());
    let mut all_series = Vec::with_capacity(results.len());

    for ((label, rows), &color) in results.iter().zip(&colors) {
        let title = substitute_titles(label, axes);
        let series = match (options.style, axes) {
            (ChartStyle::Bubble, SeriesAxes::Two(a, b)) => {
                let columns = Columns::from_rows(rows)?;
                let sizes = columns.times.iter().map(|t| options.size * t).collect();
                Series {
                    label: title,
                    color,
                    x: columns.axis(a)?.to_vec(),
                    y: columns.axis(b)?.iter().map(|&v| v as f64).collect(),
                    sizes: Some(sizes),
                }
            }
            (ChartStyle::Bubble, SeriesAxes::One(_)) => return Err(GridError::BubbleNeedsTwoAxes),
            (ChartStyle::Line | ChartStyle::Scatter, _) => {
                let (x, y) = series(rows, axes.first())?;
                Series { label: title, color, x, y, sizes: None }
            }
        };
        all_series.push(series);
    }

    Ok(Chart2d { options, series: all_series })
}

/// One surface chart per candidate
pub fn surfaces(
    results: &ResultCollection,
    axes: (usize, usize),
    options: &ChartOptions,
) -> Result<Vec<SurfaceChart>, GridError> {
    results
        .iter()
        .map(|(label, rows)| {
            let grid = Grid::from_rows(rows, axes)?;
            Ok(SurfaceChart {
                title: substitute_titles(label, SeriesAxes::Two(axes.0, axes.1)),
                xlabel: options.xlabel.clone(),
                ylabel: options.ylabel.clone(),
                cmap: options.cmap.clone(),
                surface: grid.surface(),
            })
        })
        .collect()
}

/// One heatmap per candidate
pub fn heatmaps(
    results: &ResultCollection,
    axes: (usize, usize),
    options: &ChartOptions,
) -> Result<Vec<HeatmapChart>, GridError> {
    results
        .iter()
        .map(|(label, rows)| {
            let grid = Grid::from_rows(rows, axes)?;
            Ok(HeatmapChart {
                title: substitute_titles(label, SeriesAxes::Two(axes.0, axes.1)),
                xlabel: options.xlabel.clone(),
                ylabel: options.ylabel.clone(),
                cmap: options.cmap.clone(),
                heatmap: grid.heatmap(),
            })
        })
        .collect()
}
