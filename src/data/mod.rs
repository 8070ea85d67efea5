//! Data module - CSV loading, schema and the filter/derive pipeline

mod loader;
mod processor;
pub mod schema;

pub use loader::{DataLoader, Dataset};
pub use processor::{BandingPolicy, DataProcessor, FilteredView, Trendline};
pub use schema::{SleepBand, StressLevel};

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;
    use polars::prelude::*;

    pub const SAMPLE_CSV: &str = "\
Student_ID,Study_Hours_Per_Day,Extracurricular_Hours_Per_Day,Sleep_Hours_Per_Day,Social_Hours_Per_Day,Physical_Activity_Hours_Per_Day,GPA,Stress_Level
1,6.9,3.8,8.7,2.8,1.8,2.99,Moderate
2,5.3,3.5,8.0,4.2,3.0,2.75,Low
3,5.1,3.9,9.2,1.2,4.6,2.67,Low
4,6.5,2.1,7.2,1.7,6.5,2.88,Moderate
5,8.1,0.6,6.5,2.2,6.6,3.51,High
6,6.0,2.1,7.99,0.3,7.6,2.9,Moderate
7,7.0,0.7,5.0,1.4,9.9,3.1,High
8,9.0,1.5,6.99,0.8,5.7,3.6,High
";

    pub fn sample_frame() -> DataFrame {
        DataFrame::new(vec![
            Column::new("Student_ID".into(), vec![1i64, 2, 3, 4, 5, 6, 7, 8]),
            Column::new(
                "Study_Hours_Per_Day".into(),
                vec![6.9, 5.3, 5.1, 6.5, 8.1, 6.0, 7.0, 9.0],
            ),
            Column::new(
                "Extracurricular_Hours_Per_Day".into(),
                vec![3.8, 3.5, 3.9, 2.1, 0.6, 2.1, 0.7, 1.5],
            ),
            Column::new(
                "Sleep_Hours_Per_Day".into(),
                vec![8.7, 8.0, 9.2, 7.2, 6.5, 7.99, 5.0, 6.99],
            ),
            Column::new(
                "Social_Hours_Per_Day".into(),
                vec![2.8, 4.2, 1.2, 1.7, 2.2, 0.3, 1.4, 0.8],
            ),
            Column::new(
                "Physical_Activity_Hours_Per_Day".into(),
                vec![1.8, 3.0, 4.6, 6.5, 6.6, 7.6, 9.9, 5.7],
            ),
            Column::new(
                "GPA".into(),
                vec![2.99, 2.75, 2.67, 2.88, 3.51, 2.9, 3.1, 3.6],
            ),
            Column::new(
                "Stress_Level".into(),
                vec![
                    "Moderate", "Low", "Low", "Moderate", "High", "Moderate", "High", "High",
                ],
            ),
        ])
        .expect("sample frame")
    }

    pub fn sample_dataset() -> Dataset {
        Dataset::from_frame(sample_frame(), BandingPolicy::Lenient).expect("sample dataset")
    }
}
