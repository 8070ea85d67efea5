//! Student Habits Dashboard
//!
//! Loads a student lifestyle CSV once, computes summary statistics and a
//! correlation matrix, and shows a heatmap, a filterable scatter plot and a
//! GPA boxplot driven by a handful of controls.

mod charts;
mod config;
mod dashboard;
mod data;
mod gui;
mod headless;
mod stats;

use anyhow::Context;
use clap::Parser;
use config::{Cli, DashboardConfig, RunMode};
use dashboard::Dashboard;
use data::{DataLoader, Dataset};
use eframe::egui;
use gui::{ChartViewer, DashboardApp, StaticPanels};
use stats::{CorrelationEngine, StatsCalculator};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();

    let config = DashboardConfig::from(cli);

    // Load and prepare data; no partial dashboard without it
    let dataset = DataLoader::with_policy(config.banding)
        .load_csv(&config.data_path)
        .with_context(|| format!("failed to load {}", config.data_path.display()))?;
    let dataset = Arc::new(dataset);
    let panels = build_static_panels(&dataset);
    let dashboard = Dashboard::new(Arc::clone(&dataset), config.initial_state.clone());

    match config.mode {
        RunMode::Headless {
            dump_view,
            export_png,
        } => headless::run(&dashboard, dump_view.as_deref(), export_png.as_deref()),
        RunMode::Window => run_window(dashboard, panels),
    }
}

fn build_static_panels(dataset: &Dataset) -> StaticPanels {
    let numeric_cols = DataLoader::numeric_columns(dataset);
    StaticPanels {
        summary: StatsCalculator::summary_cards(dataset),
        correlations: CorrelationEngine::correlation_matrix(dataset, &numeric_cols),
        gpa_by_stress: StatsCalculator::gpa_by_stress(dataset),
    }
}

fn run_window(dashboard: Dashboard, panels: StaticPanels) -> anyhow::Result<()> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1400.0, 900.0])
            .with_min_inner_size([1100.0, 700.0])
            .with_title("Student Habits Dashboard"),
        ..Default::default()
    };

    eframe::run_native(
        "Student Habits Dashboard",
        options,
        Box::new(|cc| {
            Ok(Box::new(DashboardApp::new(
                cc,
                dashboard,
                ChartViewer::new(panels),
            )))
        }),
    )
    .map_err(|e| anyhow::anyhow!("failed to run dashboard window: {e}"))
}
