//! Selection State Module
//! The UI selection and the single reducer every control event goes through.

use crate::data::schema::DEFAULT_X_VAR;
use crate::data::{SleepBand, StressLevel};
use serde::Serialize;
use std::collections::BTreeSet;

pub const POINT_SIZE_MIN: u32 = 4;
pub const POINT_SIZE_MAX: u32 = 30;
pub const DEFAULT_POINT_SIZE: u32 = 10;

/// Current values of every dashboard control.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectionState {
    pub x_var: Option<String>,
    pub selected_stress: BTreeSet<StressLevel>,
    pub selected_sleep: BTreeSet<SleepBand>,
    pub point_size: u32,
}

impl Default for SelectionState {
    fn default() -> Self {
        Self {
            x_var: Some(DEFAULT_X_VAR.to_string()),
            selected_stress: StressLevel::ALL.into_iter().collect(),
            selected_sleep: SleepBand::ALL.into_iter().collect(),
            point_size: DEFAULT_POINT_SIZE,
        }
    }
}

/// A single user interaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DashboardEvent {
    /// Quick filter: select every sleep band.
    SetSleepAll,
    /// Quick filter: only "≤6h".
    SetSleepRed,
    /// Quick filter: only "7h".
    SetSleepYellow,
    /// Quick filter: only "8+h".
    SetSleepGreen,
    ToggleSleepBand(SleepBand),
    ToggleStressLevel(StressLevel),
    SetXVar(String),
    SetPointSize(u32),
}

impl DashboardEvent {
    /// Quick filter event that selects exactly `band`.
    pub fn only(band: SleepBand) -> Self {
        match band {
            SleepBand::Short => DashboardEvent::SetSleepRed,
            SleepBand::Seven => DashboardEvent::SetSleepYellow,
            SleepBand::Long => DashboardEvent::SetSleepGreen,
        }
    }
}

impl SelectionState {
    /// Apply one event. Quick filters replace the sleep selection outright;
    /// toggles flip membership of a single value.
    pub fn reduce(mut self, event: DashboardEvent) -> Self {
        match event {
            DashboardEvent::SetSleepAll => {
                self.selected_sleep = SleepBand::ALL.into_iter().collect();
            }
            DashboardEvent::SetSleepRed => {
                self.selected_sleep = BTreeSet::from([SleepBand::Short]);
            }
            DashboardEvent::SetSleepYellow => {
                self.selected_sleep = BTreeSet::from([SleepBand::Seven]);
            }
            DashboardEvent::SetSleepGreen => {
                self.selected_sleep = BTreeSet::from([SleepBand::Long]);
            }
            DashboardEvent::ToggleSleepBand(band) => {
                if !self.selected_sleep.remove(&band) {
                    self.selected_sleep.insert(band);
                }
            }
            DashboardEvent::ToggleStressLevel(level) => {
                if !self.selected_stress.remove(&level) {
                    self.selected_stress.insert(level);
                }
            }
            DashboardEvent::SetXVar(column) => self.x_var = Some(column),
            DashboardEvent::SetPointSize(size) => {
                self.point_size = size.clamp(POINT_SIZE_MIN, POINT_SIZE_MAX);
            }
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn with_sleep(bands: &[SleepBand]) -> SelectionState {
        SelectionState {
            selected_sleep: bands.iter().copied().collect(),
            ..SelectionState::default()
        }
    }

    #[test]
    fn default_selects_everything() {
        let state = SelectionState::default();
        assert_eq!(state.x_var.as_deref(), Some("Study_Hours_Per_Day"));
        assert_eq!(state.selected_stress.len(), 3);
        assert_eq!(state.selected_sleep.len(), 3);
        assert_eq!(state.point_size, DEFAULT_POINT_SIZE);
    }

    #[test]
    fn quick_filter_replaces_selection() {
        let state =
            with_sleep(&[SleepBand::Seven, SleepBand::Long]).reduce(DashboardEvent::SetSleepRed);
        assert_eq!(state.selected_sleep, BTreeSet::from([SleepBand::Short]));
    }

    #[test]
    fn each_quick_filter_selects_exactly_its_band() {
        for band in SleepBand::ALL {
            let state = SelectionState::default().reduce(DashboardEvent::only(band));
            assert_eq!(state.selected_sleep, BTreeSet::from([band]));
        }
    }

    #[test]
    fn last_quick_filter_wins() {
        let state = SelectionState::default()
            .reduce(DashboardEvent::SetSleepGreen)
            .reduce(DashboardEvent::SetSleepYellow);
        assert_eq!(state.selected_sleep, BTreeSet::from([SleepBand::Seven]));
    }

    #[test]
    fn all_restores_every_band() {
        let state = with_sleep(&[]).reduce(DashboardEvent::SetSleepAll);
        assert_eq!(
            state.selected_sleep,
            SleepBand::ALL.into_iter().collect::<BTreeSet<_>>()
        );
    }

    #[test]
    fn toggles_flip_membership() {
        let state = SelectionState::default()
            .reduce(DashboardEvent::ToggleStressLevel(StressLevel::High))
            .reduce(DashboardEvent::ToggleSleepBand(SleepBand::Short));
        assert!(!state.selected_stress.contains(&StressLevel::High));
        assert!(!state.selected_sleep.contains(&SleepBand::Short));

        let state = state.reduce(DashboardEvent::ToggleStressLevel(StressLevel::High));
        assert!(state.selected_stress.contains(&StressLevel::High));
    }

    #[test]
    fn point_size_is_clamped() {
        let state = SelectionState::default().reduce(DashboardEvent::SetPointSize(1));
        assert_eq!(state.point_size, POINT_SIZE_MIN);
        let state = state.reduce(DashboardEvent::SetPointSize(500));
        assert_eq!(state.point_size, POINT_SIZE_MAX);
        let state = state.reduce(DashboardEvent::SetPointSize(12));
        assert_eq!(state.point_size, 12);
    }

    #[test]
    fn set_x_var_leaves_filters_alone() {
        let before = with_sleep(&[SleepBand::Long]);
        let after = before.clone().reduce(DashboardEvent::SetXVar("GPA".to_string()));
        assert_eq!(after.x_var.as_deref(), Some("GPA"));
        assert_eq!(after.selected_sleep, before.selected_sleep);
        assert_eq!(after.selected_stress, before.selected_stress);
    }
}
