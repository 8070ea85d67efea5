//! Dashboard Main Application
//! Main window with control panel and chart viewer.

use crate::charts::StaticChartRenderer;
use crate::dashboard::Dashboard;
use crate::gui::{ChartViewer, ControlPanel, ControlPanelAction};
use crate::headless::EXPORT_SIZE;
use egui::SidePanel;
use std::path::PathBuf;
use tracing::{error, info};

/// Main application window.
pub struct DashboardApp {
    dashboard: Dashboard,
    control_panel: ControlPanel,
    chart_viewer: ChartViewer,
}

impl DashboardApp {
    pub fn new(
        _cc: &eframe::CreationContext<'_>,
        dashboard: Dashboard,
        chart_viewer: ChartViewer,
    ) -> Self {
        let mut control_panel = ControlPanel::new();
        control_panel.set_status(&format!(
            "Loaded {} students",
            dashboard.dataset().len()
        ));
        Self {
            dashboard,
            control_panel,
            chart_viewer,
        }
    }

    fn ask_png_path(default_name: &str) -> Option<PathBuf> {
        rfd::FileDialog::new()
            .add_filter("PNG Image", &["png"])
            .set_file_name(default_name)
            .save_file()
    }

    /// Export the current scatter view, then open it with the system viewer.
    fn handle_export_scatter(&mut self) {
        let Some(path) = Self::ask_png_path("scatter.png") else {
            return; // User cancelled
        };
        let result =
            StaticChartRenderer::export_scatter_png(self.dashboard.view(), &path, EXPORT_SIZE);
        self.finish_export(result, path);
    }

    fn handle_export_heatmap(&mut self) {
        let Some(path) = Self::ask_png_path("correlation_heatmap.png") else {
            return;
        };
        let result = StaticChartRenderer::export_heatmap_png(
            self.chart_viewer.correlations(),
            &path,
            EXPORT_SIZE,
        );
        self.finish_export(result, path);
    }

    fn finish_export(
        &mut self,
        result: Result<(), crate::charts::RenderError>,
        path: PathBuf,
    ) {
        match result {
            Ok(()) => {
                self.control_panel
                    .set_status(&format!("Exported {}", path.display()));
                if let Err(e) = open::that(&path) {
                    info!(error = %e, "could not open exported file");
                }
            }
            Err(e) => {
                error!(error = %e, "export failed");
                self.control_panel.set_status(&format!("Error: {}", e));
            }
        }
    }
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Left panel - Control Panel
        SidePanel::left("control_panel")
            .min_width(300.0)
            .max_width(350.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    let action = self.control_panel.show(
                        ui,
                        self.dashboard.state(),
                        self.dashboard.x_candidates(),
                    );

                    match action {
                        ControlPanelAction::Dispatch(event) => {
                            if self.dashboard.dispatch(event) {
                                let view = self.dashboard.view();
                                self.control_panel.set_status(&format!(
                                    "Showing {} of {} students",
                                    view.matched, view.total
                                ));
                            }
                        }
                        ControlPanelAction::ExportScatter => self.handle_export_scatter(),
                        ControlPanelAction::ExportHeatmap => self.handle_export_heatmap(),
                        ControlPanelAction::None => {}
                    }
                });
            });

        // Central panel - Chart Viewer
        egui::CentralPanel::default().show(ctx, |ui| {
            self.chart_viewer.show(ui, self.dashboard.view());
        });
    }
}
