//! CSV Data Loader Module
//! Loads the student lifestyle CSV with Polars, validates its schema and
//! caches the derived categorical columns.

use crate::data::processor::{BandingPolicy, DataProcessor};
use crate::data::schema::{
    SleepBand, StressLevel, GPA_COL, ID_COL, REQUIRED_NUMERIC_COLUMNS, SLEEP_BAND_COL,
    SLEEP_HOURS_COL, STRESS_COL,
};
use polars::prelude::*;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("Data unavailable at {}: {reason}", .path.display())]
    DataUnavailable { path: PathBuf, reason: String },
    #[error("Schema violation: {0}")]
    SchemaViolation(String),
    #[error("Invalid numeric input in {column} at row {row}")]
    InvalidNumericInput { column: String, row: usize },
    #[error("Polars error: {0}")]
    PolarsError(#[from] PolarsError),
}

/// Immutable in-memory table of student records.
///
/// The Polars frame holds the source columns; the stress level and sleep
/// band columns are coerced/derived once and cached next to it.
#[derive(Debug, Clone)]
pub struct Dataset {
    df: DataFrame,
    stress: Option<Vec<StressLevel>>,
    sleep_bands: Option<Vec<SleepBand>>,
}

impl Dataset {
    /// Build a dataset from an in-memory frame.
    ///
    /// Does not enforce the required column list; a frame without a GPA column
    /// is a valid (if not very useful) dataset. `Stress_Level`, when present,
    /// must only hold Low/Moderate/High.
    pub fn from_frame(mut df: DataFrame, policy: BandingPolicy) -> Result<Self, LoaderError> {
        let stress = match df.column(STRESS_COL) {
            Ok(column) => Some(Self::coerce_stress(column)?),
            Err(_) => None,
        };

        // Dirty sleep cells make the CSV reader infer a text column
        let text_hours = match df.column(SLEEP_HOURS_COL) {
            Ok(column) if column.dtype() == &DataType::String => Some(column.clone()),
            _ => None,
        };

        let sleep_bands = if let Some(column) = text_hours {
            let bands = Self::band_text_cells(&column, policy)?;
            df.with_column(column.cast(&DataType::Float64)?)?;
            Some(bands)
        } else if df.column(SLEEP_HOURS_COL).is_ok() {
            let hours = Self::column_as_f64(&df, SLEEP_HOURS_COL)?;
            let mut bands = Vec::with_capacity(hours.len());
            for (row, value) in hours.into_iter().enumerate() {
                let band = DataProcessor::band_for_value(value, policy).map_err(|_| {
                    LoaderError::InvalidNumericInput {
                        column: SLEEP_HOURS_COL.to_string(),
                        row,
                    }
                })?;
                bands.push(band);
            }
            Some(bands)
        } else if let Ok(column) = df.column(SLEEP_BAND_COL) {
            Some(Self::parse_sleep_bands(column)?)
        } else {
            None
        };

        Ok(Self {
            df,
            stress,
            sleep_bands,
        })
    }

    fn coerce_stress(column: &Column) -> Result<Vec<StressLevel>, LoaderError> {
        let text = column.cast(&DataType::String)?;
        let ca = text.str()?;
        ca.into_iter()
            .enumerate()
            .map(|(row, value)| match value {
                Some(raw) => raw.parse::<StressLevel>().map_err(|bad| {
                    LoaderError::SchemaViolation(format!(
                        "unexpected {} value {:?} at row {}",
                        STRESS_COL, bad, row
                    ))
                }),
                None => Err(LoaderError::SchemaViolation(format!(
                    "{} is empty at row {}",
                    STRESS_COL, row
                ))),
            })
            .collect()
    }

    fn band_text_cells(column: &Column, policy: BandingPolicy) -> Result<Vec<SleepBand>, LoaderError> {
        let ca = column.str()?;
        ca.into_iter()
            .enumerate()
            .map(|(row, value)| {
                DataProcessor::sleep_band_from_text(value.unwrap_or_default(), policy).map_err(
                    |_| LoaderError::InvalidNumericInput {
                        column: SLEEP_HOURS_COL.to_string(),
                        row,
                    },
                )
            })
            .collect()
    }

    fn parse_sleep_bands(column: &Column) -> Result<Vec<SleepBand>, LoaderError> {
        let text = column.cast(&DataType::String)?;
        let ca = text.str()?;
        ca.into_iter()
            .enumerate()
            .map(|(row, value)| {
                value.unwrap_or_default().parse::<SleepBand>().map_err(|bad| {
                    LoaderError::SchemaViolation(format!(
                        "unexpected {} value {:?} at row {}",
                        SLEEP_BAND_COL, bad, row
                    ))
                })
            })
            .collect()
    }

    /// Cast a column to f64; nulls and unparseable cells become NaN.
    fn column_as_f64(df: &DataFrame, name: &str) -> Result<Vec<f64>, LoaderError> {
        let column = df.column(name)?;
        let values = column.cast(&DataType::Float64)?;
        let ca = values.f64()?;
        Ok(ca.into_iter().map(|v| v.unwrap_or(f64::NAN)).collect())
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.df.height()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Get a reference to the underlying DataFrame.
    pub fn frame(&self) -> &DataFrame {
        &self.df
    }

    /// Whether a column (source or derived) is available.
    pub fn has_column(&self, name: &str) -> bool {
        match name {
            STRESS_COL => self.stress.is_some(),
            SLEEP_BAND_COL => self.sleep_bands.is_some(),
            _ => self.df.column(name).is_ok(),
        }
    }

    /// Source column names in schema order, followed by derived ones.
    pub fn column_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .df
            .get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect();
        if self.sleep_bands.is_some() && !names.iter().any(|n| n == SLEEP_BAND_COL) {
            names.push(SLEEP_BAND_COL.to_string());
        }
        names
    }

    /// Values of a column as f64 (NaN for nulls), or None if it is absent.
    pub fn numeric_values(&self, name: &str) -> Option<Vec<f64>> {
        Self::column_as_f64(&self.df, name).ok()
    }

    pub fn student_ids(&self) -> Vec<Option<i64>> {
        self.df
            .column(ID_COL)
            .ok()
            .and_then(|col| col.cast(&DataType::Int64).ok())
            .and_then(|col| col.i64().ok().map(|ca| ca.into_iter().collect()))
            .unwrap_or_else(|| vec![None; self.len()])
    }

    pub fn stress_levels(&self) -> Option<&[StressLevel]> {
        self.stress.as_deref()
    }

    pub fn sleep_bands(&self) -> Option<&[SleepBand]> {
        self.sleep_bands.as_deref()
    }
}

/// Handles CSV file loading with Polars.
#[derive(Debug, Clone, Copy, Default)]
pub struct DataLoader {
    policy: BandingPolicy,
}

impl DataLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_policy(policy: BandingPolicy) -> Self {
        Self { policy }
    }

    /// Load the student CSV. Missing or unreadable files are
    /// `DataUnavailable`; missing/mistyped required columns and unknown
    /// stress levels are `SchemaViolation`.
    pub fn load_csv(&self, path: &Path) -> Result<Dataset, LoaderError> {
        if !path.is_file() {
            return Err(LoaderError::DataUnavailable {
                path: path.to_path_buf(),
                reason: "file not found".to_string(),
            });
        }

        let path_str = path.to_string_lossy().to_string();
        let df = LazyCsvReader::new(&path_str)
            .with_infer_schema_length(Some(10000))
            .with_ignore_errors(true)
            .finish()
            .and_then(|lazy| lazy.collect())
            .map_err(|e| LoaderError::DataUnavailable {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;

        Self::check_required_columns(&df)?;
        let dataset = Dataset::from_frame(df, self.policy)?;
        if dataset.is_empty() {
            warn!(path = %path.display(), "dataset has no rows; charts will be empty");
        }

        info!(
            path = %path.display(),
            rows = dataset.len(),
            columns = dataset.column_names().len(),
            "loaded student dataset"
        );
        Ok(dataset)
    }

    fn check_required_columns(df: &DataFrame) -> Result<(), LoaderError> {
        let mut missing: Vec<&str> = Vec::new();
        for name in REQUIRED_NUMERIC_COLUMNS {
            match df.column(name) {
                Ok(column) if is_numeric_dtype(column.dtype()) => {}
                // Banded leniently (or rejected under strict banding) by `Dataset::from_frame`
                Ok(column) if name == SLEEP_HOURS_COL && column.dtype() == &DataType::String => {}
                Ok(column) => {
                    return Err(LoaderError::SchemaViolation(format!(
                        "column {} must be numeric, found {}",
                        name,
                        column.dtype()
                    )))
                }
                Err(_) => missing.push(name),
            }
        }
        if df.column(STRESS_COL).is_err() {
            missing.push(STRESS_COL);
        }

        if missing.is_empty() {
            Ok(())
        } else {
            Err(LoaderError::SchemaViolation(format!(
                "missing columns: {}",
                missing.join(", ")
            )))
        }
    }

    /// Numeric columns in schema order, excluding the identifier.
    pub fn numeric_columns(dataset: &Dataset) -> Vec<String> {
        let columns: Vec<String> = dataset
            .frame()
            .get_columns()
            .iter()
            .filter(|col| is_numeric_dtype(col.dtype()))
            .map(|col| col.name().to_string())
            .filter(|name| name != ID_COL)
            .collect();
        debug!(?columns, "classified numeric columns");
        columns
    }

    /// Options for the scatter plot's X axis: every numeric column but GPA.
    pub fn x_axis_candidates(dataset: &Dataset) -> Vec<String> {
        Self::numeric_columns(dataset)
            .into_iter()
            .filter(|name| name != GPA_COL)
            .collect()
    }
}

fn is_numeric_dtype(dtype: &DataType) -> bool {
    matches!(
        dtype,
        DataType::Float32
            | DataType::Float64
            | DataType::Int8
            | DataType::Int16
            | DataType::Int32
            | DataType::Int64
            | DataType::UInt8
            | DataType::UInt16
            | DataType::UInt32
            | DataType::UInt64
    )
}
