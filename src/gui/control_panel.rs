//! Control Panel Widget
//! Left side panel with the scatter plot controls.

use crate::charts::ChartPlotter;
use crate::dashboard::{DashboardEvent, SelectionState, POINT_SIZE_MAX, POINT_SIZE_MIN};
use crate::data::{SleepBand, StressLevel};
use egui::{Color32, ComboBox, RichText};

/// Left side control panel. Holds no selection of its own: it draws the
/// current `SelectionState` and reports what the user changed.
pub struct ControlPanel {
    pub status: String,
}

impl Default for ControlPanel {
    fn default() -> Self {
        Self {
            status: "Ready".to_string(),
        }
    }
}

impl ControlPanel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Draw the control panel. At most one action is reported per frame.
    pub fn show(
        &mut self,
        ui: &mut egui::Ui,
        state: &SelectionState,
        x_candidates: &[String],
    ) -> ControlPanelAction {
        let mut action = ControlPanelAction::None;

        // Title
        ui.vertical_centered(|ui| {
            ui.add_space(5.0);
            ui.label(
                RichText::new("📊 Student Habits")
                    .size(22.0)
                    .color(Color32::from_rgb(100, 149, 237)),
            );
            ui.label(
                RichText::new("Academic Performance Dashboard")
                    .size(11.0)
                    .color(Color32::GRAY),
            );
        });
        ui.add_space(10.0);
        ui.separator();
        ui.add_space(5.0);

        // ===== X-axis Section =====
        ui.label(RichText::new("📈 X-axis Variable").size(14.0).strong());
        ui.add_space(5.0);

        let selected_text = state.x_var.clone().unwrap_or_default();
        ComboBox::from_id_salt("x_var")
            .width(240.0)
            .selected_text(selected_text)
            .show_ui(ui, |ui| {
                for col in x_candidates {
                    let is_selected = state.x_var.as_deref() == Some(col.as_str());
                    if ui.selectable_label(is_selected, col).clicked() && !is_selected {
                        action = ControlPanelAction::Dispatch(DashboardEvent::SetXVar(col.clone()));
                    }
                }
            });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Stress Level Section =====
        ui.label(RichText::new("😰 Stress Level").size(14.0).strong());
        ui.add_space(5.0);

        ui.horizontal(|ui| {
            for level in StressLevel::ALL {
                let mut checked = state.selected_stress.contains(&level);
                if ui.checkbox(&mut checked, level.label()).changed() {
                    action = ControlPanelAction::Dispatch(DashboardEvent::ToggleStressLevel(level));
                }
            }
        });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Sleep Band Section =====
        ui.label(RichText::new("😴 Sleep Band").size(14.0).strong());
        ui.add_space(5.0);

        ui.horizontal(|ui| {
            for band in SleepBand::ALL {
                let mut checked = state.selected_sleep.contains(&band);
                let text = RichText::new(band.label()).color(ChartPlotter::band_color(band));
                if ui.checkbox(&mut checked, text).changed() {
                    action = ControlPanelAction::Dispatch(DashboardEvent::ToggleSleepBand(band));
                }
            }
        });

        ui.add_space(5.0);
        ui.horizontal(|ui| {
            if ui.small_button("All").clicked() {
                action = ControlPanelAction::Dispatch(DashboardEvent::SetSleepAll);
            }
            for band in SleepBand::ALL {
                let label = RichText::new(format!("Only {}", band.colour_name()))
                    .color(ChartPlotter::band_color(band));
                if ui.small_button(label).clicked() {
                    action = ControlPanelAction::Dispatch(DashboardEvent::only(band));
                }
            }
        });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Point Size Section =====
        ui.label(RichText::new("⚙️ Point Size").size(14.0).strong());
        ui.add_space(5.0);

        let mut point_size = state.point_size;
        let slider = egui::Slider::new(&mut point_size, POINT_SIZE_MIN..=POINT_SIZE_MAX).text("px");
        if ui.add(slider).changed() {
            action = ControlPanelAction::Dispatch(DashboardEvent::SetPointSize(point_size));
        }

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Export Buttons =====
        ui.vertical_centered(|ui| {
            let button = egui::Button::new(RichText::new("🖼 Export Scatter PNG").size(14.0))
                .min_size(egui::vec2(200.0, 30.0));
            if ui.add(button).clicked() {
                action = ControlPanelAction::ExportScatter;
            }

            ui.add_space(8.0);

            let button = egui::Button::new(RichText::new("🖼 Export Heatmap PNG").size(14.0))
                .min_size(egui::vec2(200.0, 30.0));
            if ui.add(button).clicked() {
                action = ControlPanelAction::ExportHeatmap;
            }
        });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(5.0);

        let status_color = if self.status.contains("Error") {
            Color32::from_rgb(220, 53, 69)
        } else {
            Color32::GRAY
        };
        ui.label(RichText::new(&self.status).size(11.0).color(status_color));

        action
    }

    /// Set status line
    pub fn set_status(&mut self, status: &str) {
        self.status = status.to_string();
    }
}

/// Actions triggered by control panel
#[derive(Debug, Clone, PartialEq)]
pub enum ControlPanelAction {
    None,
    Dispatch(DashboardEvent),
    ExportScatter,
    ExportHeatmap,
}
