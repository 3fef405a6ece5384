//! Display values for the circular progress indicator: the arc fraction and
//! the center text, computed away from the painting code so they can be
//! tested.

use crate::backend::domain::progress::GoalProgress;

/// Everything the ring renderer needs for one goal.
#[derive(Debug, Clone, PartialEq)]
pub struct RingDisplay {
    /// Swept fraction of the full circle, 0.0 to 1.0.
    pub fraction: f32,
    /// Large center text: the remaining-day count.
    pub center_text: String,
    /// Small text under the count: "days remaining" or "days until start".
    pub secondary_text: String,
}

impl RingDisplay {
    pub fn from_progress(progress: &GoalProgress) -> Self {
        Self {
            fraction: arc_fraction(progress.progress_percentage),
            center_text: progress.days_remaining.to_string(),
            secondary_text: progress.days_remaining_label.to_string(),
        }
    }
}

/// Convert a 0..100 percentage to a 0..1 arc fraction, clamped.
pub fn arc_fraction(percentage: f64) -> f32 {
    (percentage / 100.0).clamp(0.0, 1.0) as f32
}
