//! Dashboard module - Selection state, reducer and derived view

mod state;
mod store;
mod view;

pub use state::{DashboardEvent, SelectionState, POINT_SIZE_MAX, POINT_SIZE_MIN};
pub use store::Dashboard;
pub use view::{derive, ViewModel};
