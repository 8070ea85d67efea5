//! Data Processor Module
//! Sleep banding and the filter/derive pipeline that turns the dataset plus
//! the current selection into plot-ready rows.

use crate::data::loader::Dataset;
use crate::data::schema::{
    SleepBand, StressLevel, GPA_COL, SLEEP_BAND_COL, SLEEP_HOURS_COL, STRESS_COL,
};
use serde::Serialize;
use statrs::statistics::Statistics;
use std::collections::BTreeSet;
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProcessorError {
    #[error("Invalid numeric input: {0:?}")]
    InvalidNumericInput(String),
}

/// How sleep hours that are not a number are banded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BandingPolicy {
    /// Unparseable or missing hours fall into the lowest band.
    #[default]
    Lenient,
    /// Unparseable or missing hours are an error.
    Strict,
}

/// One scatter point: the projection of a record the chart layer needs.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlotRow {
    /// Position of the record in the source dataset.
    pub row: usize,
    pub student_id: Option<i64>,
    pub x: f64,
    pub gpa: f64,
    pub sleep_band: SleepBand,
    pub stress_level: StressLevel,
    pub sleep_hours: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EmptyReason {
    NoAxisSelected,
    MissingColumns { columns: Vec<String> },
}

/// Result of the filter pipeline: rows to plot, or why there are none.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum FilteredView {
    Rows { x_var: String, point_size: u32, rows: Vec<PlotRow> },
    Empty { reason: EmptyReason },
}

impl FilteredView {
    pub fn rows(&self) -> &[PlotRow] {
        match self {
            FilteredView::Rows { rows, .. } => rows,
            FilteredView::Empty { .. } => &[],
        }
    }

    pub fn missing_columns(&self) -> Option<&[String]> {
        match self {
            FilteredView::Empty {
                reason: EmptyReason::MissingColumns { columns },
            } => Some(columns),
            _ => None,
        }
    }

    /// User facing message for a view with nothing to draw.
    pub fn empty_message(&self) -> Option<String> {
        match self {
            FilteredView::Empty {
                reason: EmptyReason::NoAxisSelected,
            } => Some("Select an X-axis variable".to_string()),
            FilteredView::Empty {
                reason: EmptyReason::MissingColumns { columns },
            } => Some(format!("No data: missing columns {}", columns.join(", "))),
            FilteredView::Rows { rows, .. } if rows.is_empty() => {
                Some("No students match the current filters".to_string())
            }
            FilteredView::Rows { .. } => None,
        }
    }
}

/// Ordinary least squares fit of GPA on the X variable for one stress level.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Trendline {
    pub stress_level: StressLevel,
    pub slope: f64,
    pub intercept: f64,
    pub x_min: f64,
    pub x_max: f64,
}

impl Trendline {
    pub fn predict(&self, x: f64) -> f64 {
        self.intercept + self.slope * x
    }

    /// End points of the fitted segment over the observed X range.
    pub fn segment(&self) -> [[f64; 2]; 2] {
        [
            [self.x_min, self.predict(self.x_min)],
            [self.x_max, self.predict(self.x_max)],
        ]
    }
}

/// Handles data derivation and filtering operations.
pub struct DataProcessor;

impl DataProcessor {
    /// Band daily sleep hours: floor ≥ 8 is "8+h", floor 7 is "7h",
    /// anything else (including negative hours and NaN) is "≤6h".
    pub fn sleep_band(hours: f64) -> SleepBand {
        let floor = hours.floor();
        if floor >= 8.0 {
            SleepBand::Long
        } else if floor == 7.0 {
            SleepBand::Seven
        } else {
            SleepBand::Short
        }
    }

    pub fn parse_hours(raw: &str) -> Result<f64, ProcessorError> {
        raw.trim()
            .parse::<f64>()
            .map_err(|_| ProcessorError::InvalidNumericInput(raw.to_string()))
    }

    /// Band a raw cell value.
    pub fn sleep_band_from_text(raw: &str, policy: BandingPolicy) -> Result<SleepBand, ProcessorError> {
        match Self::parse_hours(raw) {
            Ok(hours) => Self::band_for_value(hours, policy),
            Err(err) => match policy {
                BandingPolicy::Lenient => {
                    debug!(value = raw, "unparseable sleep hours, banding as {}", SleepBand::Short);
                    Ok(SleepBand::Short)
                }
                BandingPolicy::Strict => Err(err),
            },
        }
    }

    /// Band an already-coerced value; NaN stands for a missing or dirty cell.
    pub fn band_for_value(hours: f64, policy: BandingPolicy) -> Result<SleepBand, ProcessorError> {
        if hours.is_nan() && policy == BandingPolicy::Strict {
            return Err(ProcessorError::InvalidNumericInput(hours.to_string()));
        }
        Ok(Self::sleep_band(hours))
    }

    /// Filter the dataset by the selected stress levels and sleep bands and
    /// project the surviving records, in source order.
    ///
    /// An empty selection set keeps nothing. Missing columns produce an
    /// explicit empty view instead of partial data.
    pub fn filtered_view(
        dataset: &Dataset,
        x_var: Option<&str>,
        selected_stress: &BTreeSet<StressLevel>,
        selected_sleep: &BTreeSet<SleepBand>,
        point_size: u32,
    ) -> FilteredView {
        let Some(x_var) = x_var else {
            return FilteredView::Empty {
                reason: EmptyReason::NoAxisSelected,
            };
        };

        let mut missing: Vec<String> = Vec::new();
        for name in [x_var, GPA_COL, SLEEP_BAND_COL, STRESS_COL] {
            if !dataset.has_column(name) && !missing.iter().any(|m| m == name) {
                missing.push(name.to_string());
            }
        }
        if !missing.is_empty() {
            debug!(?missing, "filtered view unavailable");
            return FilteredView::Empty {
                reason: EmptyReason::MissingColumns { columns: missing },
            };
        }

        let (Some(xs), Some(gpa), Some(stress), Some(bands)) = (
            dataset.numeric_values(x_var),
            dataset.numeric_values(GPA_COL),
            dataset.stress_levels(),
            dataset.sleep_bands(),
        ) else {
            return FilteredView::Empty {
                reason: EmptyReason::MissingColumns {
                    columns: vec![x_var.to_string()],
                },
            };
        };
        let ids = dataset.student_ids();
        let sleep_hours = dataset
            .numeric_values(SLEEP_HOURS_COL)
            .unwrap_or_else(|| vec![f64::NAN; dataset.len()]);

        let rows: Vec<PlotRow> = (0..dataset.len())
            .filter(|&i| selected_stress.contains(&stress[i]))
            .filter(|&i| selected_sleep.contains(&bands[i]))
            .map(|i| PlotRow {
                row: i,
                student_id: ids[i],
                x: xs[i],
                gpa: gpa[i],
                sleep_band: bands[i],
                stress_level: stress[i],
                sleep_hours: sleep_hours[i],
            })
            .collect();

        debug!(x_var, kept = rows.len(), total = dataset.len(), "filtered view");
        FilteredView::Rows {
            x_var: x_var.to_string(),
            point_size,
            rows,
        }
    }

    /// One OLS trendline per stress level present in `rows`, in
    /// Low/Moderate/High order. Groups with fewer than two finite points or
    /// no spread in X are skipped.
    pub fn ols_trendlines(rows: &[PlotRow]) -> Vec<Trendline> {
        StressLevel::ALL
            .into_iter()
            .filter_map(|level| {
                let (xs, ys): (Vec<f64>, Vec<f64>) = rows
                    .iter()
                    .filter(|r| r.stress_level == level && r.x.is_finite() && r.gpa.is_finite())
                    .map(|r| (r.x, r.gpa))
                    .unzip();
                if xs.len() < 2 {
                    return None;
                }

                let var_x = xs.iter().variance();
                if var_x == 0.0 || var_x.is_nan() {
                    return None;
                }
                let slope = xs.iter().covariance(ys.iter()) / var_x;
                let intercept = ys.iter().mean() - slope * xs.iter().mean();
                let x_min = xs.iter().copied().fold(f64::INFINITY, f64::min);
                let x_max = xs.iter().copied().fold(f64::NEG_INFINITY, f64::max);

                Some(Trendline {
                    stress_level: level,
                    slope,
                    intercept,
                    x_min,
                    x_max,
                })
            })
            .collect()
    }
}
