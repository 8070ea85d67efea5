//! View Model Module
//! Pure derivation of everything the scatter card draws from the dataset and
//! the current selection.

use crate::dashboard::state::SelectionState;
use crate::data::{DataProcessor, Dataset, FilteredView, Trendline};
use serde::Serialize;

/// Chart-ready output of one recomputation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewModel {
    pub title: String,
    pub point_size: u32,
    pub scatter: FilteredView,
    pub trendlines: Vec<Trendline>,
    pub matched: usize,
    pub total: usize,
}

impl ViewModel {
    pub fn x_var(&self) -> Option<&str> {
        match &self.scatter {
            FilteredView::Rows { x_var, .. } => Some(x_var),
            FilteredView::Empty { .. } => None,
        }
    }
}

/// Recompute the view for `state`. Never mutates the dataset or the state.
pub fn derive(dataset: &Dataset, state: &SelectionState) -> ViewModel {
    let scatter = DataProcessor::filtered_view(
        dataset,
        state.x_var.as_deref(),
        &state.selected_stress,
        &state.selected_sleep,
        state.point_size,
    );
    let trendlines = DataProcessor::ols_trendlines(scatter.rows());
    let title = match &state.x_var {
        Some(x_var) => format!("{} vs GPA by Stress Level", x_var),
        None => "GPA by Stress Level".to_string(),
    };

    ViewModel {
        title,
        point_size: state.point_size,
        matched: scatter.rows().len(),
        total: dataset.len(),
        scatter,
        trendlines,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::state::DashboardEvent;
    use crate::data::{fixtures, StressLevel};
    use pretty_assertions::assert_eq;

    #[test]
    fn default_view_plots_every_student() {
        let dataset = fixtures::sample_dataset();
        let view = derive(&dataset, &SelectionState::default());
        assert_eq!(view.title, "Study_Hours_Per_Day vs GPA by Stress Level");
        assert_eq!(view.x_var(), Some("Study_Hours_Per_Day"));
        assert_eq!((view.matched, view.total), (8, 8));
        let levels: Vec<StressLevel> = view.trendlines.iter().map(|t| t.stress_level).collect();
        assert_eq!(
            levels,
            vec![StressLevel::Low, StressLevel::Moderate, StressLevel::High]
        );
    }

    #[test]
    fn derive_is_pure() {
        let dataset = fixtures::sample_dataset();
        let state = SelectionState::default()
            .reduce(DashboardEvent::SetSleepGreen)
            .reduce(DashboardEvent::SetPointSize(14));
        let snapshot = state.clone();
        assert_eq!(derive(&dataset, &state), derive(&dataset, &state));
        assert_eq!(state, snapshot);
    }

    #[test]
    fn empty_stress_selection_yields_no_rows() {
        let dataset = fixtures::sample_dataset();
        let mut state = SelectionState::default();
        for level in StressLevel::ALL {
            state = state.reduce(DashboardEvent::ToggleStressLevel(level));
        }
        let view = derive(&dataset, &state);
        assert_eq!(view.matched, 0);
        assert!(view.trendlines.is_empty());
        assert!(view.scatter.empty_message().is_some());
    }

    #[test]
    fn view_model_serializes_for_the_chart_layer() {
        let dataset = fixtures::sample_dataset();
        let state = SelectionState::default().reduce(DashboardEvent::SetSleepRed);
        let json = serde_json::to_value(derive(&dataset, &state)).unwrap();
        assert_eq!(json["scatter"]["status"], "rows");
        assert_eq!(json["scatter"]["rows"][0]["sleep_band"], "≤6h");
        assert_eq!(json["scatter"]["rows"][0]["stress_level"], "High");
        assert_eq!(json["matched"], 3);
    }
}
