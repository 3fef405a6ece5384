//! Application and per-goal view-model state.

pub mod app_state;
pub mod goal_state;

pub use app_state::{DeadlineApp, REFRESH_INTERVAL};
pub use goal_state::GoalCardState;
