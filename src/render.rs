//! Chart rendering.
//!
//! The pipeline ends by handing a [`ChartSpec`] — a titled set of named
//! `(time, value)` series — to [`render_chart`], which draws a multi-series
//! line chart: x = time, y = cumulative count, one line per series, legend
//! in the upper left. Output is an SVG file, so rendering works headless
//! with no font or raster system dependencies.
//!
//! Everything upstream of the spec is the interesting part of this program;
//! this module is deliberately a thin adapter over plotters.

use std::error::Error;
use std::path::Path;

use chrono::{DateTime, Duration, Utc};
use plotters::chart::SeriesLabelPosition;
use plotters::prelude::*;

use crate::error::{ChatgraphError, Result};
use crate::series::Series;

/// Output size of the rendered chart in pixels.
pub const CHART_SIZE: (u32, u32) = (1280, 720);

/// A fully assembled chart: what to draw, nothing about how to compute it.
#[derive(Debug, Clone)]
pub struct ChartSpec {
    /// Chart caption.
    pub title: String,
    /// Lines to draw, legend order = vector order.
    pub series: Vec<Series>,
}

impl ChartSpec {
    /// Creates a spec from a title and series set.
    pub fn new(title: impl Into<String>, series: Vec<Series>) -> Self {
        Self {
            title: title.into(),
            series,
        }
    }
}

/// Renders `spec` as an SVG line chart at `path`.
///
/// # Errors
///
/// Returns [`ChatgraphError::Render`] when the spec has no drawable points
/// or the backend fails.
pub fn render_chart(spec: &ChartSpec, path: &Path) -> Result<()> {
    draw(spec, path).map_err(|e| ChatgraphError::render(e.to_string()))
}

fn draw(spec: &ChartSpec, path: &Path) -> std::result::Result<(), Box<dyn Error>> {
    let points = spec.series.iter().flat_map(|series| series.points.iter());
    let Some((x_min, x_max, y_max)) = bounds(points) else {
        return Err("nothing to draw: every series is empty".into());
    };
    // A single-instant axis has no width; pad it so the frame still draws.
    let x_max = if x_min == x_max {
        x_max + Duration::days(1)
    } else {
        x_max
    };

    let root = SVGBackend::new(path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(&spec.title, ("sans-serif", 24))
        .margin(12)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(x_min..x_max, 0u64..y_max.max(1))?;

    chart
        .configure_mesh()
        .x_desc("Date")
        .y_desc("Messages")
        .x_labels(8)
        .x_label_formatter(&|timestamp| timestamp.format("%Y-%m-%d").to_string())
        .draw()?;

    for (i, series) in spec.series.iter().enumerate() {
        let color = Palette99::pick(i).mix(1.0);
        chart
            .draw_series(LineSeries::new(
                series.points.iter().copied(),
                color.stroke_width(2),
            ))?
            .label(series.name.as_str())
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 18, y)], color));
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperLeft)
        .background_style(&WHITE.mix(0.85))
        .border_style(&BLACK)
        .draw()?;

    root.present()?;
    Ok(())
}

/// Returns `(x_min, x_max, y_max)` over all points, or `None` if there are
/// no points at all.
fn bounds<'a, I>(points: I) -> Option<(DateTime<Utc>, DateTime<Utc>, u64)>
where
    I: Iterator<Item = &'a (DateTime<Utc>, u64)>,
{
    let mut result: Option<(DateTime<Utc>, DateTime<Utc>, u64)> = None;
    for &(timestamp, value) in points {
        result = Some(match result {
            None => (timestamp, timestamp, value),
            Some((min, max, y)) => (min.min(timestamp), max.max(timestamp), y.max(value)),
        });
    }
    result
}
