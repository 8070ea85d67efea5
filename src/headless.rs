//! Headless Output
//! Writes the derived view model and static charts without opening a window.

use crate::charts::StaticChartRenderer;
use crate::dashboard::{Dashboard, ViewModel};
use anyhow::Context;
use std::path::Path;
use tracing::{info, warn};

pub const EXPORT_SIZE: (u32, u32) = (1400, 1000);

/// Write the current view (`--dump-view`) and/or scatter PNG (`--export-png`).
pub fn run(
    dashboard: &Dashboard,
    dump_view: Option<&Path>,
    export_png: Option<&Path>,
) -> anyhow::Result<()> {
    let view = dashboard.view();
    if let Some(message) = view.scatter.empty_message() {
        warn!(%message, "scatter view is empty");
    }

    if let Some(path) = dump_view {
        write_view_json(view, path)?;
    }

    if let Some(path) = export_png {
        StaticChartRenderer::export_scatter_png(view, path, EXPORT_SIZE)
            .with_context(|| format!("failed to export {}", path.display()))?;
    }
    Ok(())
}

pub fn write_view_json(view: &ViewModel, path: &Path) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(view).context("failed to serialize view")?;
    std::fs::write(path, json).with_context(|| format!("failed to write {}", path.display()))?;
    info!(path = %path.display(), rows = view.matched, "wrote view model");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::{DashboardEvent, SelectionState};
    use crate::data::fixtures;
    use pretty_assertions::assert_eq;
    use std::sync::Arc;

    fn dashboard() -> Dashboard {
        Dashboard::new(Arc::new(fixtures::sample_dataset()), SelectionState::default())
    }

    #[test]
    fn dump_view_writes_parseable_json() {
        let mut dashboard = dashboard();
        dashboard.dispatch(DashboardEvent::SetSleepRed);

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("view.json");
        run(&dashboard, Some(&path), None).unwrap();

        let json: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(json["scatter"]["status"], "rows");
        assert_eq!(json["matched"], 3);
        assert_eq!(json["total"], 8);
        assert_eq!(json["scatter"]["x_var"], "Study_Hours_Per_Day");
    }

    #[test]
    fn dump_view_of_empty_selection_still_writes() {
        let mut dashboard = dashboard();
        for level in crate::data::StressLevel::ALL {
            dashboard.dispatch(DashboardEvent::ToggleStressLevel(level));
        }

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("view.json");
        run(&dashboard, Some(&path), None).unwrap();

        let json: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(json["matched"], 0);
        assert_eq!(json["scatter"]["rows"].as_array().map(Vec::len), Some(0));
    }

    #[test]
    fn unwritable_dump_path_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("view.json");
        let err = run(&dashboard(), Some(&path), None).unwrap_err();
        assert!(err.to_string().contains("failed to write"), "{err}");
    }

    #[test]
    fn export_of_empty_view_is_an_error() {
        let mut dashboard = dashboard();
        for band in crate::data::SleepBand::ALL {
            dashboard.dispatch(DashboardEvent::ToggleSleepBand(band));
        }
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scatter.png");
        assert!(run(&dashboard, None, Some(&path)).is_err());
        assert!(!path.exists());
    }
}
