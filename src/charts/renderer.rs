//! Static Chart Renderer
//! Exports the current scatter view and the correlation heatmap as PNG files
//! with plotters.

use crate::dashboard::ViewModel;
use crate::data::{SleepBand, StressLevel};
use crate::stats::CorrelationMatrix;
use plotters::prelude::*;
use std::ops::Range;
use std::path::Path;
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Nothing to render: {0}")]
    EmptyView(String),
    #[error("Drawing failed: {0}")]
    Drawing(String),
}

fn drawing_error<E: std::fmt::Display>(err: E) -> RenderError {
    RenderError::Drawing(err.to_string())
}

// Colors (RGB), same palette as the interactive charts
const SHORT_SLEEP: RGBColor = RGBColor(231, 76, 60);
const SEVEN_SLEEP: RGBColor = RGBColor(241, 196, 15);
const LONG_SLEEP: RGBColor = RGBColor(46, 204, 113);
const LOW_STRESS: RGBColor = RGBColor(52, 152, 219);
const MODERATE_STRESS: RGBColor = RGBColor(155, 89, 182);
const HIGH_STRESS: RGBColor = RGBColor(52, 73, 94);

pub struct StaticChartRenderer;

impl StaticChartRenderer {
    fn band_color(band: SleepBand) -> RGBColor {
        match band {
            SleepBand::Short => SHORT_SLEEP,
            SleepBand::Seven => SEVEN_SLEEP,
            SleepBand::Long => LONG_SLEEP,
        }
    }

    fn stress_color(level: StressLevel) -> RGBColor {
        match level {
            StressLevel::Low => LOW_STRESS,
            StressLevel::Moderate => MODERATE_STRESS,
            StressLevel::High => HIGH_STRESS,
        }
    }

    /// Padded axis range covering all finite `values`; (0, 1) when there are none.
    pub fn axis_range(values: impl IntoIterator<Item = f64>) -> Range<f64> {
        let (min, max) = values
            .into_iter()
            .filter(|v| v.is_finite())
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
                (lo.min(v), hi.max(v))
            });
        if min.is_infinite() {
            return 0.0..1.0;
        }
        let pad = if max > min { (max - min) * 0.05 } else { 0.5 };
        (min - pad)..(max + pad)
    }

    /// Render the filtered scatter (with trendlines) to a PNG file.
    pub fn export_scatter_png(
        view: &ViewModel,
        path: &Path,
        size: (u32, u32),
    ) -> Result<(), RenderError> {
        if let Some(message) = view.scatter.empty_message() {
            return Err(RenderError::EmptyView(message));
        }
        let rows = view.scatter.rows();
        let x_var = view.x_var().unwrap_or_default();

        let root = BitMapBackend::new(path, size).into_drawing_area();
        root.fill(&WHITE).map_err(drawing_error)?;

        let x_range = Self::axis_range(rows.iter().map(|r| r.x));
        let mut chart = ChartBuilder::on(&root)
            .caption(&view.title, ("sans-serif", 24))
            .margin(15)
            .x_label_area_size(40)
            .y_label_area_size(50)
            .build_cartesian_2d(x_range, 0f64..5f64)
            .map_err(drawing_error)?;

        chart
            .configure_mesh()
            .x_desc(x_var)
            .y_desc("GPA")
            .draw()
            .map_err(drawing_error)?;

        // Colour by sleep band, marker by stress level, as in the interactive plot
        let radius = (view.point_size / 2).max(1) as i32;
        for band in SleepBand::ALL {
            let color = Self::band_color(band);
            let style = color.mix(0.8).filled();
            for level in StressLevel::ALL {
                let points: Vec<(f64, f64)> = rows
                    .iter()
                    .filter(|r| r.sleep_band == band && r.stress_level == level)
                    .map(|r| (r.x, r.gpa))
                    .collect();
                if points.is_empty() {
                    continue;
                }
                let name = format!("{} / {}", band, level);

                match level {
                    StressLevel::Low => {
                        chart
                            .draw_series(points.iter().map(|&p| Circle::new(p, radius, style)))
                            .map_err(drawing_error)?
                            .label(name)
                            .legend(move |(x, y)| Circle::new((x, y), 5, color.filled()));
                    }
                    StressLevel::Moderate => {
                        chart
                            .draw_series(points.iter().map(|&p| {
                                EmptyElement::at(p)
                                    + Rectangle::new([(-radius, -radius), (radius, radius)], style)
                            }))
                            .map_err(drawing_error)?
                            .label(name)
                            .legend(move |(x, y)| {
                                Rectangle::new([(x - 5, y - 5), (x + 5, y + 5)], color.filled())
                            });
                    }
                    StressLevel::High => {
                        chart
                            .draw_series(
                                points
                                    .iter()
                                    .map(|&p| TriangleMarker::new(p, radius, style)),
                            )
                            .map_err(drawing_error)?
                            .label(name)
                            .legend(move |(x, y)| TriangleMarker::new((x, y), 5, color.filled()));
                    }
                }
            }
        }

        for line in &view.trendlines {
            let color = Self::stress_color(line.stress_level);
            let [start, end] = line.segment();
            chart
                .draw_series(LineSeries::new(
                    vec![(start[0], start[1]), (end[0], end[1])],
                    color.stroke_width(2),
                ))
                .map_err(drawing_error)?
                .label(format!("OLS {}", line.stress_level))
                .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color));
        }

        chart
            .configure_series_labels()
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()
            .map_err(drawing_error)?;
        root.present().map_err(drawing_error)?;

        info!(path = %path.display(), points = rows.len(), "exported scatter PNG");
        Ok(())
    }

    /// Render the correlation heatmap, one annotated cell per pair.
    pub fn export_heatmap_png(
        matrix: &CorrelationMatrix,
        path: &Path,
        size: (u32, u32),
    ) -> Result<(), RenderError> {
        if matrix.is_empty() {
            return Err(RenderError::EmptyView("no numeric columns".to_string()));
        }
        let n = matrix.len();
        let labels: Vec<String> = matrix.columns.clone();

        let root = BitMapBackend::new(path, size).into_drawing_area();
        root.fill(&WHITE).map_err(drawing_error)?;

        let mut chart = ChartBuilder::on(&root)
            .caption("Correlation Matrix of Student Habits and GPA", ("sans-serif", 22))
            .margin(15)
            .x_label_area_size(60)
            .y_label_area_size(120)
            .build_cartesian_2d(0f64..n as f64, 0f64..n as f64)
            .map_err(drawing_error)?;

        let formatter = |v: &f64| {
            let idx = v.floor() as usize;
            labels
                .get(idx)
                .map(|name| name.split('_').next().unwrap_or(name).to_string())
                .unwrap_or_default()
        };
        chart
            .configure_mesh()
            .disable_mesh()
            .x_labels(n * 2)
            .y_labels(n * 2)
            .x_label_formatter(&formatter)
            .y_label_formatter(&formatter)
            .draw()
            .map_err(drawing_error)?;

        chart
            .draw_series((0..n).flat_map(|i| {
                (0..n).map(move |j| {
                    let value = matrix.values[i][j];
                    let [r, g, b] = Self::diverging_rgb(value);
                    Rectangle::new(
                        [(j as f64, i as f64), (j as f64 + 1.0, i as f64 + 1.0)],
                        RGBColor(r, g, b).filled(),
                    )
                })
            }))
            .map_err(drawing_error)?;

        chart
            .draw_series((0..n).flat_map(|i| {
                (0..n).map(move |j| {
                    let value = matrix.values[i][j];
                    let text = if value.is_nan() {
                        "n/a".to_string()
                    } else {
                        format!("{:.2}", value)
                    };
                    Text::new(
                        text,
                        (j as f64 + 0.3, i as f64 + 0.55),
                        ("sans-serif", 14).into_font(),
                    )
                })
            }))
            .map_err(drawing_error)?;

        root.present().map_err(drawing_error)?;
        info!(path = %path.display(), columns = n, "exported heatmap PNG");
        Ok(())
    }

    /// RdBu_r-style colour for a coefficient; grey for NaN.
    fn diverging_rgb(value: f64) -> [u8; 3] {
        let color = crate::charts::ChartPlotter::diverging_color(value);
        [color.r(), color.g(), color.b()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::{derive, SelectionState};
    use crate::data::{fixtures, DataLoader};
    use crate::stats::CorrelationEngine;

    #[test]
    fn axis_range_pads_observed_values() {
        let range = StaticChartRenderer::axis_range([2.0, 4.0, f64::NAN]);
        assert!((range.start - 1.9).abs() < 1e-12);
        assert!((range.end - 4.1).abs() < 1e-12);
    }

    #[test]
    fn axis_range_handles_degenerate_input() {
        assert_eq!(StaticChartRenderer::axis_range(Vec::new()), 0.0..1.0);
        assert_eq!(StaticChartRenderer::axis_range([3.0, 3.0]), 2.5..3.5);
    }

    #[test]
    fn empty_view_is_not_exported() {
        let dataset = fixtures::sample_dataset();
        let mut state = SelectionState::default();
        state.selected_stress.clear();
        let view = derive(&dataset, &state);

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scatter.png");
        let err = StaticChartRenderer::export_scatter_png(&view, &path, (800, 600)).unwrap_err();
        assert!(matches!(err, RenderError::EmptyView(_)));
        assert!(!path.exists());
    }

    #[test]
    fn empty_matrix_is_not_exported() {
        let matrix = CorrelationMatrix {
            columns: Vec::new(),
            values: Vec::new(),
        };
        let dir = tempfile::tempdir().unwrap();
        let err = StaticChartRenderer::export_heatmap_png(
            &matrix,
            &dir.path().join("heatmap.png"),
            (800, 600),
        )
        .unwrap_err();
        assert!(matches!(err, RenderError::EmptyView(_)));
    }

    /// Text needs a system font; hosts without one fail with a font error.
    fn assert_png_written(result: Result<(), RenderError>, path: &Path) {
        match result {
            Ok(()) => {
                let size = std::fs::metadata(path).map(|m| m.len()).unwrap_or(0);
                assert!(size > 0, "{} is empty", path.display());
            }
            Err(RenderError::Drawing(msg)) if msg.to_lowercase().contains("font") => {
                eprintln!("no usable font, PNG not checked: {msg}");
            }
            Err(err) => panic!("export failed: {err}"),
        }
    }

    #[test]
    fn exports_sample_scatter_png() {
        let dataset = fixtures::sample_dataset();
        let view = derive(&dataset, &SelectionState::default());
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scatter.png");

        let result = StaticChartRenderer::export_scatter_png(&view, &path, (800, 600));
        assert_png_written(result, &path);
    }

    #[test]
    fn exports_sample_heatmap_png() {
        let dataset = fixtures::sample_dataset();
        let columns = DataLoader::numeric_columns(&dataset);
        let matrix = CorrelationEngine::correlation_matrix(&dataset, &columns);
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("heatmap.png");

        let result = StaticChartRenderer::export_heatmap_png(&matrix, &path, (900, 700));
        assert_png_written(result, &path);
    }

    #[test]
    fn diverging_rgb_matches_interactive_palette() {
        assert_eq!(StaticChartRenderer::diverging_rgb(1.0), [178, 24, 43]);
        assert_eq!(StaticChartRenderer::diverging_rgb(-1.0), [33, 102, 172]);
    }
}
