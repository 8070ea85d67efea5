//! Correlation Module
//! Pairwise Pearson correlation matrix and qualitative labels for tooltips.

use crate::data::Dataset;
use rayon::prelude::*;
use serde::Serialize;
use statrs::statistics::Statistics;
use std::fmt;
use tracing::{debug, warn};

/// Qualitative strength/direction of a correlation coefficient.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum CorrelationLabel {
    StrongPositive,
    ModeratePositive,
    WeakPositive,
    NoCorrelation,
    WeakNegative,
    ModerateNegative,
    StrongNegative,
}

impl CorrelationLabel {
    pub fn as_str(self) -> &'static str {
        match self {
            CorrelationLabel::StrongPositive => "Strong Positive",
            CorrelationLabel::ModeratePositive => "Moderate Positive",
            CorrelationLabel::WeakPositive => "Weak Positive",
            CorrelationLabel::NoCorrelation => "No Correlation",
            CorrelationLabel::WeakNegative => "Weak Negative",
            CorrelationLabel::ModerateNegative => "Moderate Negative",
            CorrelationLabel::StrongNegative => "Strong Negative",
        }
    }
}

impl fmt::Display for CorrelationLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Square, symmetric matrix of rounded Pearson coefficients.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorrelationMatrix {
    pub columns: Vec<String>,
    pub values: Vec<Vec<f64>>,
}

impl CorrelationMatrix {
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn index_of(&self, column: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == column)
    }

    pub fn get(&self, a: &str, b: &str) -> Option<f64> {
        Some(self.values[self.index_of(a)?][self.index_of(b)?])
    }

    pub fn tooltip_at(&self, i: usize, j: usize) -> String {
        let value = self.values[i][j];
        let shown = if value.is_nan() {
            "n/a".to_string()
        } else {
            format!("{:.2}", value)
        };
        format!(
            "{} vs {}: {} ({})",
            self.columns[i],
            self.columns[j],
            shown,
            CorrelationEngine::describe_correlation(value)
        )
    }

    pub fn tooltip(&self, a: &str, b: &str) -> Option<String> {
        Some(self.tooltip_at(self.index_of(a)?, self.index_of(b)?))
    }
}

/// Computes correlation matrices over dataset columns.
pub struct CorrelationEngine;

impl CorrelationEngine {
    /// Pearson correlation of every pair of `columns`, rounded to 2 decimals.
    ///
    /// The upper triangle is computed and mirrored, so the result is symmetric
    /// with an exact 1.0 diagonal. Columns the dataset cannot provide as
    /// numbers are left out.
    pub fn correlation_matrix(dataset: &Dataset, columns: &[String]) -> CorrelationMatrix {
        let mut names: Vec<String> = Vec::with_capacity(columns.len());
        let mut series: Vec<Vec<f64>> = Vec::with_capacity(columns.len());
        for name in columns {
            match dataset.numeric_values(name) {
                Some(values) => {
                    names.push(name.clone());
                    series.push(values);
                }
                None => warn!(column = %name, "skipping column absent from dataset"),
            }
        }

        let n = names.len();
        let pairs: Vec<(usize, usize)> = (0..n)
            .flat_map(|i| ((i + 1)..n).map(move |j| (i, j)))
            .collect();

        let upper: Vec<(usize, usize, f64)> = pairs
            .par_iter()
            .map(|&(i, j)| (i, j, round2(Self::pearson(&series[i], &series[j]))))
            .collect();

        let mut values = vec![vec![f64::NAN; n]; n];
        for (i, row) in values.iter_mut().enumerate() {
            row[i] = 1.0;
        }
        for (i, j, r) in upper {
            values[i][j] = r;
            values[j][i] = r;
        }

        debug!(columns = n, pairs = pairs.len(), "computed correlation matrix");
        CorrelationMatrix {
            columns: names,
            values,
        }
    }

    /// Pearson coefficient over pairwise-complete observations.
    ///
    /// NaN when fewer than two pairs remain or either side has no variance.
    pub fn pearson(x: &[f64], y: &[f64]) -> f64 {
        let (xs, ys): (Vec<f64>, Vec<f64>) = x
            .iter()
            .zip(y.iter())
            .filter(|(a, b)| a.is_finite() && b.is_finite())
            .map(|(&a, &b)| (a, b))
            .unzip();
        if xs.len() < 2 {
            return f64::NAN;
        }

        let sx = xs.iter().std_dev();
        let sy = ys.iter().std_dev();
        if sx == 0.0 || sy == 0.0 {
            return f64::NAN;
        }
        (xs.iter().covariance(ys.iter()) / (sx * sy)).clamp(-1.0, 1.0)
    }

    /// Classify a coefficient; a value exactly on a threshold belongs to the
    /// stronger band. NaN is treated as no correlation.
    pub fn describe_correlation(value: f64) -> CorrelationLabel {
        if value >= 0.7 {
            CorrelationLabel::StrongPositive
        } else if value >= 0.3 {
            CorrelationLabel::ModeratePositive
        } else if value > 0.0 {
            CorrelationLabel::WeakPositive
        } else if value <= -0.7 {
            CorrelationLabel::StrongNegative
        } else if value <= -0.3 {
            CorrelationLabel::ModerateNegative
        } else if value < 0.0 {
            CorrelationLabel::WeakNegative
        } else {
            CorrelationLabel::NoCorrelation
        }
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
