//! Stats module - Summary statistics and correlation

mod calculator;
mod correlation;

pub use calculator::{GroupStats, StatsCalculator, SummaryCard};
pub use correlation::{CorrelationEngine, CorrelationMatrix};
