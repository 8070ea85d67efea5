//! Chart Viewer Widget
//! Central scrollable panel: summary cards, correlation heatmap, filtered
//! scatter and the GPA boxplot.

use crate::charts::ChartPlotter;
use crate::dashboard::ViewModel;
use crate::stats::{CorrelationMatrix, GroupStats, SummaryCard};
use egui::{Color32, RichText, ScrollArea};

const CARD_SPACING: f32 = 15.0;
const SUMMARY_CARD_WIDTH: f32 = 200.0;

/// Panels computed once per dataset load.
pub struct StaticPanels {
    pub summary: Vec<SummaryCard>,
    pub correlations: CorrelationMatrix,
    pub gpa_by_stress: Vec<GroupStats>,
}

/// Scrollable chart display area.
pub struct ChartViewer {
    panels: StaticPanels,
}

impl ChartViewer {
    pub fn new(panels: StaticPanels) -> Self {
        Self { panels }
    }

    pub fn correlations(&self) -> &CorrelationMatrix {
        &self.panels.correlations
    }

    /// Draw every card; only the scatter card depends on `view`.
    pub fn show(&self, ui: &mut egui::Ui, view: &ViewModel) {
        ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                ui.vertical_centered(|ui| {
                    ui.label(
                        RichText::new("📊 Student Habits and Academic Performance Dashboard")
                            .size(24.0)
                            .strong(),
                    );
                });
                ui.add_space(CARD_SPACING);

                ui.horizontal(|ui| {
                    for card in &self.panels.summary {
                        Self::draw_summary_card(ui, card);
                        ui.add_space(CARD_SPACING);
                    }
                });
                ui.add_space(CARD_SPACING);

                Self::card(ui, "Correlation Heatmap", |ui| {
                    ChartPlotter::draw_heatmap(ui, &self.panels.correlations);
                });
                ui.add_space(CARD_SPACING);

                Self::card(ui, &view.title, |ui| {
                    ui.label(
                        RichText::new(format!(
                            "{} of {} students shown",
                            view.matched, view.total
                        ))
                        .size(11.0)
                        .color(Color32::GRAY),
                    );
                    ChartPlotter::draw_scatter(ui, view);
                });
                ui.add_space(CARD_SPACING);

                Self::card(ui, "GPA by Stress Level", |ui| {
                    ChartPlotter::draw_gpa_boxplot(ui, &self.panels.gpa_by_stress);
                });
            });
    }

    fn draw_summary_card(ui: &mut egui::Ui, card: &SummaryCard) {
        egui::Frame::none()
            .rounding(8.0)
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .inner_margin(12.0)
            .show(ui, |ui| {
                ui.set_width(SUMMARY_CARD_WIDTH);
                ui.vertical_centered(|ui| {
                    ui.label(RichText::new(&card.title).size(13.0).color(Color32::GRAY));
                    ui.label(RichText::new(card.display_value()).size(26.0).strong());
                });
            });
    }

    fn card(ui: &mut egui::Ui, title: &str, add_contents: impl FnOnce(&mut egui::Ui)) {
        egui::Frame::none()
            .rounding(8.0)
            .stroke(egui::Stroke::new(1.0, Color32::from_gray(90)))
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .inner_margin(12.0)
            .show(ui, |ui| {
                ui.label(RichText::new(title).size(18.0).strong());
                ui.add_space(8.0);
                add_contents(ui);
            });
    }
}
