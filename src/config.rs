//! Command line configuration.

use crate::dashboard::{SelectionState, POINT_SIZE_MAX, POINT_SIZE_MIN};
use crate::data::schema::DEFAULT_DATA_PATH;
use crate::data::BandingPolicy;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "student-habits-dashboard")]
#[command(version, about = "Student habits and academic performance dashboard", long_about = None)]
pub struct Cli {
    /// Path to the student lifestyle CSV
    #[arg(long, default_value = DEFAULT_DATA_PATH)]
    pub data: PathBuf,

    /// Initial X-axis variable of the scatter plot
    #[arg(long)]
    pub x_var: Option<String>,

    /// Initial scatter point size
    #[arg(long, value_parser = clap::value_parser!(u32).range(POINT_SIZE_MIN as i64..=POINT_SIZE_MAX as i64))]
    pub point_size: Option<u32>,

    /// Reject unparseable sleep hours instead of banding them as "≤6h"
    #[arg(long)]
    pub strict_sleep: bool,

    /// Write the derived view model as JSON and exit without opening a window
    #[arg(long)]
    pub dump_view: Option<PathBuf>,

    /// Export the scatter plot as PNG and exit without opening a window
    #[arg(long)]
    pub export_png: Option<PathBuf>,

    /// Log level used when RUST_LOG is not set
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

/// What the program should do once the dataset is loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunMode {
    Window,
    Headless {
        dump_view: Option<PathBuf>,
        export_png: Option<PathBuf>,
    },
}

/// Validated settings, independent of clap.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardConfig {
    pub data_path: PathBuf,
    pub banding: BandingPolicy,
    pub initial_state: SelectionState,
    pub mode: RunMode,
}

impl From<Cli> for DashboardConfig {
    fn from(cli: Cli) -> Self {
        let mut initial_state = SelectionState::default();
        if let Some(x_var) = cli.x_var {
            initial_state.x_var = Some(x_var);
        }
        if let Some(size) = cli.point_size {
            initial_state.point_size = size;
        }

        let banding = if cli.strict_sleep {
            BandingPolicy::Strict
        } else {
            BandingPolicy::Lenient
        };

        let mode = if cli.dump_view.is_some() || cli.export_png.is_some() {
            RunMode::Headless {
                dump_view: cli.dump_view,
                export_png: cli.export_png,
            }
        } else {
            RunMode::Window
        };

        Self {
            data_path: cli.data,
            banding,
            initial_state,
            mode,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn defaults_open_the_window_on_the_bundled_dataset() {
        let config = DashboardConfig::from(Cli::parse_from(["dashboard"]));
        assert_eq!(
            config.data_path,
            PathBuf::from("data/student_lifestyle_dataset.csv")
        );
        assert_eq!(config.banding, BandingPolicy::Lenient);
        assert_eq!(config.initial_state, SelectionState::default());
        assert_eq!(config.mode, RunMode::Window);
    }

    #[test]
    fn flags_override_initial_selection() {
        let cli = Cli::parse_from([
            "dashboard",
            "--data",
            "other.csv",
            "--x-var",
            "Social_Hours_Per_Day",
            "--point-size",
            "16",
            "--strict-sleep",
            "--dump-view",
            "view.json",
        ]);
        let config = DashboardConfig::from(cli);
        assert_eq!(config.data_path, PathBuf::from("other.csv"));
        assert_eq!(config.banding, BandingPolicy::Strict);
        assert_eq!(
            config.initial_state.x_var.as_deref(),
            Some("Social_Hours_Per_Day")
        );
        assert_eq!(config.initial_state.point_size, 16);
        assert_eq!(
            config.mode,
            RunMode::Headless {
                dump_view: Some(PathBuf::from("view.json")),
                export_png: None,
            }
        );
    }

    #[test]
    fn out_of_range_point_size_is_rejected() {
        assert!(Cli::try_parse_from(["dashboard", "--point-size", "500"]).is_err());
    }
}
