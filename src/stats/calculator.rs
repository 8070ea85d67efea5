//! Statistics Calculator Module
//! Descriptive statistics for the summary cards and the GPA boxplot.

use crate::data::schema::{GPA_COL, SLEEP_HOURS_COL, STUDY_COL};
use crate::data::{Dataset, StressLevel};
use serde::Serialize;

/// Descriptive statistics for one group of values.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupStats {
    pub group_name: String,
    pub count: usize,
    pub mean: f64,
    pub median: f64,
    pub std: f64,
    pub q1: f64,
    pub q3: f64,
    pub min: f64,
    pub max: f64,
    /// Lowest value within 1.5 IQR of Q1.
    pub whisker_low: f64,
    /// Highest value within 1.5 IQR of Q3.
    pub whisker_high: f64,
}

impl Default for GroupStats {
    fn default() -> Self {
        Self {
            group_name: String::new(),
            count: 0,
            mean: f64::NAN,
            median: f64::NAN,
            std: f64::NAN,
            q1: f64::NAN,
            q3: f64::NAN,
            min: f64::NAN,
            max: f64::NAN,
            whisker_low: f64::NAN,
            whisker_high: f64::NAN,
        }
    }
}

/// Headline number shown at the top of the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryCard {
    pub title: String,
    pub value: Option<f64>,
}

impl SummaryCard {
    pub fn display_value(&self) -> String {
        match self.value {
            Some(v) => format!("{:.2}", v),
            None => "n/a".to_string(),
        }
    }
}

/// Handles statistical calculations.
pub struct StatsCalculator;

impl StatsCalculator {
    /// Compute descriptive statistics, ignoring NaN values.
    pub fn compute_descriptive_stats(values: &[f64]) -> GroupStats {
        let mut sorted: Vec<f64> = values.iter().copied().filter(|v| !v.is_nan()).collect();
        let n = sorted.len();
        if n == 0 {
            return GroupStats::default();
        }
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

        let mean = sorted.iter().sum::<f64>() / n as f64;
        let variance = if n > 1 {
            sorted.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (n - 1) as f64
        } else {
            0.0
        };

        let q1 = Self::percentile(&sorted, 25.0);
        let q3 = Self::percentile(&sorted, 75.0);
        let iqr = q3 - q1;
        let whisker_low = sorted
            .iter()
            .copied()
            .find(|&v| v >= q1 - 1.5 * iqr)
            .unwrap_or(q1);
        let whisker_high = sorted
            .iter()
            .rev()
            .copied()
            .find(|&v| v <= q3 + 1.5 * iqr)
            .unwrap_or(q3);

        GroupStats {
            group_name: String::new(),
            count: n,
            mean,
            median: Self::percentile(&sorted, 50.0),
            std: variance.sqrt(),
            q1,
            q3,
            min: sorted[0],
            max: sorted[n - 1],
            whisker_low,
            whisker_high,
        }
    }

    /// Calculate percentile using linear interpolation (NumPy compatible).
    fn percentile(sorted_values: &[f64], p: f64) -> f64 {
        let n = sorted_values.len();
        if n == 0 {
            return f64::NAN;
        }
        if n == 1 {
            return sorted_values[0];
        }

        let rank = (p / 100.0) * (n - 1) as f64;
        let lower = rank.floor() as usize;
        let upper = (rank.ceil() as usize).min(n - 1);
        let frac = rank - lower as f64;

        if lower == upper {
            sorted_values[lower]
        } else {
            sorted_values[lower] * (1.0 - frac) + sorted_values[upper] * frac
        }
    }

    fn column_mean(dataset: &Dataset, column: &str) -> Option<f64> {
        let stats = Self::compute_descriptive_stats(&dataset.numeric_values(column)?);
        (stats.count > 0).then_some(stats.mean)
    }

    /// Average GPA, study hours and sleep hours.
    pub fn summary_cards(dataset: &Dataset) -> Vec<SummaryCard> {
        [
            ("Average GPA", GPA_COL),
            ("Average Study Hours", STUDY_COL),
            ("Average Sleep Hours", SLEEP_HOURS_COL),
        ]
        .into_iter()
        .map(|(title, column)| SummaryCard {
            title: title.to_string(),
            value: Self::column_mean(dataset, column),
        })
        .collect()
    }

    /// GPA distribution for each stress level, Low to High. Levels with no
    /// students are omitted.
    pub fn gpa_by_stress(dataset: &Dataset) -> Vec<GroupStats> {
        let (Some(gpa), Some(stress)) = (dataset.numeric_values(GPA_COL), dataset.stress_levels())
        else {
            return Vec::new();
        };

        StressLevel::ALL
            .into_iter()
            .filter_map(|level| {
                let values: Vec<f64> = gpa
                    .iter()
                    .zip(stress.iter())
                    .filter(|(_, s)| **s == level)
                    .map(|(g, _)| *g)
                    .collect();
                let mut stats = Self::compute_descriptive_stats(&values);
                if stats.count == 0 {
                    return None;
                }
                stats.group_name = level.label().to_string();
                Some(stats)
            })
            .collect()
    }
}
