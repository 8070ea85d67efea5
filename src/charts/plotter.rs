//! Chart Plotter Module
//! Creates the interactive heatmap, scatter and boxplot using egui_plot.

use crate::dashboard::ViewModel;
use crate::data::{SleepBand, StressLevel};
use crate::stats::{CorrelationMatrix, GroupStats};
use egui::{Align2, Color32, FontId, RichText, Sense};
use egui_plot::{BoxElem, BoxPlot, BoxSpread, Legend, Line, MarkerShape, Plot, PlotPoints, Points};

/// Sleep band colours (red / yellow / green)
pub const SHORT_SLEEP_COLOR: Color32 = Color32::from_rgb(231, 76, 60);
pub const SEVEN_SLEEP_COLOR: Color32 = Color32::from_rgb(241, 196, 15);
pub const LONG_SLEEP_COLOR: Color32 = Color32::from_rgb(46, 204, 113);

/// Stress level colours, used by the boxplot and trendlines.
pub const STRESS_PALETTE: [Color32; 3] = [
    Color32::from_rgb(52, 152, 219), // Blue
    Color32::from_rgb(155, 89, 182), // Purple
    Color32::from_rgb(52, 73, 94),   // Dark slate
];

// RdBu_r end points and midpoint
const NEGATIVE_COLOR: [f32; 3] = [33.0, 102.0, 172.0];
const NEUTRAL_COLOR: [f32; 3] = [247.0, 247.0, 247.0];
const POSITIVE_COLOR: [f32; 3] = [178.0, 24.0, 43.0];

const HEATMAP_CELL: f32 = 62.0;

/// Creates dashboard charts using egui_plot.
pub struct ChartPlotter;

impl ChartPlotter {
    pub fn band_color(band: SleepBand) -> Color32 {
        match band {
            SleepBand::Short => SHORT_SLEEP_COLOR,
            SleepBand::Seven => SEVEN_SLEEP_COLOR,
            SleepBand::Long => LONG_SLEEP_COLOR,
        }
    }

    pub fn stress_color(level: StressLevel) -> Color32 {
        match level {
            StressLevel::Low => STRESS_PALETTE[0],
            StressLevel::Moderate => STRESS_PALETTE[1],
            StressLevel::High => STRESS_PALETTE[2],
        }
    }

    pub fn stress_marker(level: StressLevel) -> MarkerShape {
        match level {
            StressLevel::Low => MarkerShape::Circle,
            StressLevel::Moderate => MarkerShape::Square,
            StressLevel::High => MarkerShape::Up,
        }
    }

    /// Diverging blue-white-red colour for a coefficient in [-1, 1].
    /// NaN is drawn grey.
    pub fn diverging_color(value: f64) -> Color32 {
        if value.is_nan() {
            return Color32::from_gray(200);
        }
        let t = value.clamp(-1.0, 1.0) as f32;
        let (from, to, frac) = if t < 0.0 {
            (NEUTRAL_COLOR, NEGATIVE_COLOR, -t)
        } else {
            (NEUTRAL_COLOR, POSITIVE_COLOR, t)
        };
        let mix = |i: usize| (from[i] + (to[i] - from[i]) * frac).round() as u8;
        Color32::from_rgb(mix(0), mix(1), mix(2))
    }

    /// Shorten a column name for heatmap headers ("Study_Hours_Per_Day" -> "Study").
    pub fn short_label(column: &str) -> &str {
        column.split('_').next().unwrap_or(column)
    }

    /// Draw the correlation heatmap as a grid of painted cells with tooltips.
    pub fn draw_heatmap(ui: &mut egui::Ui, matrix: &CorrelationMatrix) {
        if matrix.is_empty() {
            ui.label(RichText::new("No numeric columns").color(Color32::GRAY));
            return;
        }

        egui::Grid::new("correlation_heatmap")
            .spacing([2.0, 2.0])
            .show(ui, |ui| {
                ui.label("");
                for column in &matrix.columns {
                    ui.label(RichText::new(Self::short_label(column)).size(11.0).strong());
                }
                ui.end_row();

                for (i, row_name) in matrix.columns.iter().enumerate() {
                    ui.label(RichText::new(Self::short_label(row_name)).size(11.0).strong());
                    for j in 0..matrix.len() {
                        let value = matrix.values[i][j];
                        let (rect, response) = ui.allocate_exact_size(
                            egui::vec2(HEATMAP_CELL, HEATMAP_CELL * 0.6),
                            Sense::hover(),
                        );
                        let fill = Self::diverging_color(value);
                        ui.painter().rect_filled(rect, 2.0, fill);

                        let text_color = if value.abs() > 0.6 {
                            Color32::WHITE
                        } else {
                            Color32::BLACK
                        };
                        let text = if value.is_nan() {
                            "n/a".to_string()
                        } else {
                            format!("{:.2}", value)
                        };
                        ui.painter().text(
                            rect.center(),
                            Align2::CENTER_CENTER,
                            text,
                            FontId::proportional(12.0),
                            text_color,
                        );
                        response.on_hover_text(matrix.tooltip_at(i, j));
                    }
                    ui.end_row();
                }
            });
    }

    /// Draw the filtered scatter: colour by sleep band, marker by stress
    /// level, one OLS line per stress level.
    pub fn draw_scatter(ui: &mut egui::Ui, view: &ViewModel) {
        if let Some(message) = view.scatter.empty_message() {
            ui.add_space(20.0);
            ui.vertical_centered(|ui| {
                ui.label(RichText::new(message).size(16.0).color(Color32::GRAY));
            });
            ui.add_space(20.0);
            return;
        }

        let x_label = view.x_var().unwrap_or_default().to_string();
        let radius = view.point_size as f32 / 2.0;
        let rows = view.scatter.rows();

        Plot::new("gpa_scatter")
            .height(380.0)
            .legend(Legend::default())
            .x_axis_label(x_label)
            .y_axis_label("GPA")
            .include_y(0.0)
            .include_y(5.0)
            .allow_scroll(false)
            .show(ui, |plot_ui| {
                for band in SleepBand::ALL {
                    for level in StressLevel::ALL {
                        let points: PlotPoints = rows
                            .iter()
                            .filter(|r| r.sleep_band == band && r.stress_level == level)
                            .map(|r| [r.x, r.gpa])
                            .collect();
                        if points.points().is_empty() {
                            continue;
                        }
                        plot_ui.points(
                            Points::new(points)
                                .shape(Self::stress_marker(level))
                                .radius(radius)
                                .filled(true)
                                .color(Self::band_color(band).gamma_multiply(0.8))
                                .name(format!("{} / {}", band, level)),
                        );
                    }
                }

                for line in &view.trendlines {
                    let [start, end] = line.segment();
                    plot_ui.line(
                        Line::new(PlotPoints::from(vec![start, end]))
                            .color(Self::stress_color(line.stress_level))
                            .width(2.0)
                            .name(format!("OLS {}", line.stress_level)),
                    );
                }
            });
    }

    /// Draw GPA distribution by stress level.
    pub fn draw_gpa_boxplot(ui: &mut egui::Ui, groups: &[GroupStats]) {
        if groups.is_empty() {
            ui.label(RichText::new("No GPA data").color(Color32::GRAY));
            return;
        }

        let labels: Vec<String> = groups.iter().map(|g| g.group_name.clone()).collect();

        Plot::new("gpa_by_stress")
            .height(300.0)
            .allow_zoom(false)
            .allow_drag(false)
            .allow_scroll(false)
            .x_axis_label("Stress_Level")
            .y_axis_label("GPA")
            .x_axis_formatter(move |mark, _range| {
                let idx = mark.value.round() as usize;
                if (mark.value - idx as f64).abs() < 1e-6 && idx < labels.len() {
                    labels[idx].clone()
                } else {
                    String::new()
                }
            })
            .show(ui, |plot_ui| {
                for (i, group) in groups.iter().enumerate() {
                    let color = group
                        .group_name
                        .parse::<StressLevel>()
                        .map(Self::stress_color)
                        .unwrap_or(Color32::GRAY);

                    let elem = BoxElem::new(
                        i as f64,
                        BoxSpread::new(
                            group.whisker_low,
                            group.q1,
                            group.median,
                            group.q3,
                            group.whisker_high,
                        ),
                    )
                    .box_width(0.5)
                    .fill(color.gamma_multiply(0.3))
                    .stroke(egui::Stroke::new(1.5, color))
                    .name(format!("{} (n={})", group.group_name, group.count));

                    plot_ui.box_plot(BoxPlot::new(vec![elem]).name(&group.group_name));
                }
            });
    }
}
