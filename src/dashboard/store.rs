//! Dashboard Store Module
//! Owns the selection state and the derived view; every control event is
//! dispatched here and recomputed synchronously before the next one.

use crate::dashboard::state::{DashboardEvent, SelectionState};
use crate::dashboard::view::{derive, ViewModel};
use crate::data::schema::DEFAULT_X_VAR;
use crate::data::{DataLoader, Dataset};
use std::sync::Arc;
use tracing::{debug, warn};

pub struct Dashboard {
    dataset: Arc<Dataset>,
    x_candidates: Vec<String>,
    state: SelectionState,
    view: ViewModel,
    recomputations: u64,
}

impl Dashboard {
    /// Build the store and render the initial view for `initial`.
    ///
    /// An initial X variable outside the candidate list is replaced by the
    /// default one (or the first candidate when the default is unavailable).
    pub fn new(dataset: Arc<Dataset>, mut initial: SelectionState) -> Self {
        let x_candidates = DataLoader::x_axis_candidates(&dataset);
        if let Some(x_var) = &initial.x_var {
            if !x_candidates.contains(x_var) {
                let fallback = Self::fallback_x_var(&x_candidates);
                warn!(
                    requested = %x_var,
                    fallback = fallback.as_deref().unwrap_or("<none>"),
                    "initial X-axis variable is not a candidate"
                );
                initial.x_var = fallback;
            }
        }
        let view = derive(&dataset, &initial);
        Self {
            dataset,
            x_candidates,
            state: initial,
            view,
            recomputations: 1,
        }
    }

    /// Reduce `event` into the state and re-derive the view.
    ///
    /// Returns whether the view was recomputed: events that leave the state
    /// unchanged, and X-axis choices outside the candidate list, are no-ops.
    pub fn dispatch(&mut self, event: DashboardEvent) -> bool {
        if let DashboardEvent::SetXVar(column) = &event {
            if !self.x_candidates.iter().any(|c| c == column) {
                warn!(column = %column, "ignoring unknown X-axis variable");
                return false;
            }
        }

        let next = self.state.clone().reduce(event.clone());
        if next == self.state {
            debug!(?event, "event left selection unchanged");
            return false;
        }

        self.view = derive(&self.dataset, &next);
        self.state = next;
        self.recomputations += 1;
        debug!(
            ?event,
            matched = self.view.matched,
            recomputations = self.recomputations,
            "dispatched"
        );
        true
    }

    fn fallback_x_var(candidates: &[String]) -> Option<String> {
        candidates
            .iter()
            .find(|c| c.as_str() == DEFAULT_X_VAR)
            .or_else(|| candidates.first())
            .cloned()
    }

    pub fn state(&self) -> &SelectionState {
        &self.state
    }

    pub fn view(&self) -> &ViewModel {
        &self.view
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn x_candidates(&self) -> &[String] {
        &self.x_candidates
    }

    pub fn recomputations(&self) -> u64 {
        self.recomputations
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{fixtures, BandingPolicy, SleepBand};
    use pretty_assertions::assert_eq;
    use std::collections::BTreeSet;

    fn dashboard() -> Dashboard {
        Dashboard::new(Arc::new(fixtures::sample_dataset()), SelectionState::default())
    }

    #[test]
    fn initial_render_uses_declared_defaults() {
        let dashboard = dashboard();
        assert_eq!(dashboard.state(), &SelectionState::default());
        assert_eq!(dashboard.view().matched, 8);
        assert_eq!(dashboard.recomputations(), 1);
    }

    #[test]
    fn each_change_recomputes_the_view() {
        let mut dashboard = dashboard();
        assert!(dashboard.dispatch(DashboardEvent::SetSleepRed));
        assert_eq!(dashboard.view().matched, 3);
        assert!(dashboard.dispatch(DashboardEvent::SetXVar(
            "Social_Hours_Per_Day".to_string()
        )));
        assert_eq!(dashboard.view().x_var(), Some("Social_Hours_Per_Day"));
        assert!(dashboard.dispatch(DashboardEvent::SetPointSize(20)));
        assert_eq!(dashboard.view().point_size, 20);
        assert_eq!(dashboard.recomputations(), 4);
    }

    #[test]
    fn unchanged_state_skips_recomputation() {
        let mut dashboard = dashboard();
        assert!(!dashboard.dispatch(DashboardEvent::SetSleepAll));
        assert!(!dashboard.dispatch(DashboardEvent::SetPointSize(10)));
        assert_eq!(dashboard.recomputations(), 1);
    }

    #[test]
    fn unknown_x_var_is_ignored() {
        let mut dashboard = dashboard();
        assert!(!dashboard.dispatch(DashboardEvent::SetXVar("GPA".to_string())));
        assert!(!dashboard.dispatch(DashboardEvent::SetXVar("Shoe_Size".to_string())));
        assert_eq!(dashboard.view().x_var(), Some("Study_Hours_Per_Day"));
    }

    #[test]
    fn quick_filter_overrides_checklist_edits() {
        let mut dashboard = dashboard();
        dashboard.dispatch(DashboardEvent::ToggleSleepBand(SleepBand::Short));
        dashboard.dispatch(DashboardEvent::SetSleepGreen);
        assert_eq!(
            dashboard.state().selected_sleep,
            BTreeSet::from([SleepBand::Long])
        );
        assert!(dashboard
            .view()
            .scatter
            .rows()
            .iter()
            .all(|r| r.sleep_band == SleepBand::Long));
    }

    #[test]
    fn initial_x_var_outside_candidates_falls_back_to_default() {
        let dataset = Arc::new(fixtures::sample_dataset());
        for column in ["Sleep_Band", "Stress_Level", "GPA", "Student_ID", "Shoe_Size"] {
            let initial = SelectionState {
                x_var: Some(column.to_string()),
                ..SelectionState::default()
            };
            let dashboard = Dashboard::new(Arc::clone(&dataset), initial);
            assert_eq!(
                dashboard.state().x_var.as_deref(),
                Some("Study_Hours_Per_Day"),
                "{column}"
            );
            assert_eq!(dashboard.view().x_var(), Some("Study_Hours_Per_Day"));
            assert_eq!(dashboard.view().matched, 8);
            assert_eq!(dashboard.view().scatter.rows()[0].x, 6.9);
        }
    }

    #[test]
    fn initial_candidate_x_var_is_kept() {
        let initial = SelectionState {
            x_var: Some("Social_Hours_Per_Day".to_string()),
            ..SelectionState::default()
        };
        let dashboard = Dashboard::new(Arc::new(fixtures::sample_dataset()), initial);
        assert_eq!(dashboard.view().x_var(), Some("Social_Hours_Per_Day"));
    }

    #[test]
    fn fallback_uses_first_candidate_without_study_hours() {
        let frame = fixtures::sample_frame().drop("Study_Hours_Per_Day").unwrap();
        let dataset = Dataset::from_frame(frame, BandingPolicy::Lenient).unwrap();
        let dashboard = Dashboard::new(Arc::new(dataset), SelectionState::default());
        assert_eq!(
            dashboard.state().x_var.as_deref(),
            Some("Extracurricular_Hours_Per_Day")
        );
    }
}
