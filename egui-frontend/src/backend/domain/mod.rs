//! Domain layer: the progress engine and the goal service.

pub mod goal_service;
pub mod progress;

pub use goal_service::{GoalDraft, GoalService, ValidationError};
pub use progress::{GoalProgress, IndicatorTier};
