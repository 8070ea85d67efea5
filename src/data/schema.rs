//! Dataset Schema Module
//! Column names and categorical types of the student lifestyle dataset.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const ID_COL: &str = "Student_ID";
pub const STUDY_COL: &str = "Study_Hours_Per_Day";
pub const EXTRACURRICULAR_COL: &str = "Extracurricular_Hours_Per_Day";
pub const SLEEP_HOURS_COL: &str = "Sleep_Hours_Per_Day";
pub const SOCIAL_COL: &str = "Social_Hours_Per_Day";
pub const PHYSICAL_COL: &str = "Physical_Activity_Hours_Per_Day";
pub const GPA_COL: &str = "GPA";
pub const STRESS_COL: &str = "Stress_Level";

/// Derived column, computed from `Sleep_Hours_Per_Day` at load time.
pub const SLEEP_BAND_COL: &str = "Sleep_Band";

/// Numeric columns that must exist (with a numeric dtype) in the source file.
pub const REQUIRED_NUMERIC_COLUMNS: [&str; 7] = [
    ID_COL,
    STUDY_COL,
    EXTRACURRICULAR_COL,
    SLEEP_HOURS_COL,
    SOCIAL_COL,
    PHYSICAL_COL,
    GPA_COL,
];

pub const DEFAULT_DATA_PATH: &str = "data/student_lifestyle_dataset.csv";
pub const DEFAULT_X_VAR: &str = STUDY_COL;

/// Stress level category of a student.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum StressLevel {
    Low,
    Moderate,
    High,
}

impl StressLevel {
    pub const ALL: [StressLevel; 3] = [StressLevel::Low, StressLevel::Moderate, StressLevel::High];

    pub fn label(self) -> &'static str {
        match self {
            StressLevel::Low => "Low",
            StressLevel::Moderate => "Moderate",
            StressLevel::High => "High",
        }
    }
}

impl fmt::Display for StressLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for StressLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        StressLevel::ALL
            .into_iter()
            .find(|level| level.label() == trimmed)
            .ok_or_else(|| trimmed.to_string())
    }
}

/// Three-level bucketing of daily sleep hours, colour coded red/yellow/green.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SleepBand {
    #[serde(rename = "≤6h")]
    Short,
    #[serde(rename = "7h")]
    Seven,
    #[serde(rename = "8+h")]
    Long,
}

impl SleepBand {
    pub const ALL: [SleepBand; 3] = [SleepBand::Short, SleepBand::Seven, SleepBand::Long];

    pub fn label(self) -> &'static str {
        match self {
            SleepBand::Short => "≤6h",
            SleepBand::Seven => "7h",
            SleepBand::Long => "8+h",
        }
    }

    /// Name of the colour the band is drawn with (and of its quick filter).
    pub fn colour_name(self) -> &'static str {
        match self {
            SleepBand::Short => "Red",
            SleepBand::Seven => "Yellow",
            SleepBand::Long => "Green",
        }
    }
}

impl fmt::Display for SleepBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for SleepBand {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        SleepBand::ALL
            .into_iter()
            .find(|band| band.label() == trimmed)
            .ok_or_else(|| trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stress_level_parses_exact_labels() {
        assert_eq!("Low".parse::<StressLevel>(), Ok(StressLevel::Low));
        assert_eq!(" Moderate ".parse::<StressLevel>(), Ok(StressLevel::Moderate));
        assert_eq!("High".parse::<StressLevel>(), Ok(StressLevel::High));
    }

    #[test]
    fn stress_level_is_case_sensitive() {
        assert_eq!("low".parse::<StressLevel>(), Err("low".to_string()));
        assert_eq!("HIGH".parse::<StressLevel>(), Err("HIGH".to_string()));
    }

    #[test]
    fn unknown_stress_level_reports_the_value() {
        assert_eq!("Extreme".parse::<StressLevel>(), Err("Extreme".to_string()));
        assert!("".parse::<StressLevel>().is_err());
    }

    #[test]
    fn sleep_band_labels_round_trip_through_from_str() {
        for band in SleepBand::ALL {
            assert_eq!(band.label().parse::<SleepBand>(), Ok(band));
        }
        assert!("6h".parse::<SleepBand>().is_err());
    }

    #[test]
    fn sleep_band_serializes_as_label() {
        let json = serde_json::to_string(&SleepBand::Short).unwrap();
        assert_eq!(json, "\"≤6h\"");
    }
}
