//! # Goal Card State
//!
//! The per-goal view-model: wraps one [`Goal`] record and holds everything
//! the card renderer reads, so rendering itself never computes.
//!
//! ## Responsibilities:
//! - Derived display values, evaluated in one pass against a single date
//! - Notes sorted by creation date descending
//! - The indicator color memo: color and percentage are cached and only
//!   recomputed once the percentage moves by at least 0.1, a deliberate
//!   debounce against redundant display updates
//!
//! ## Invalidation:
//! Replacing the wrapped record (which is how every edit, note add/remove,
//! and achievement toggle lands here) drops the memo entirely; a periodic
//! refresh recomputes derived values but keeps the memo's 0.1 guard.

use chrono::NaiveDate;
use egui::Color32;

use shared::{Goal, Note};

use crate::backend::domain::progress::{self, GoalProgress};
use crate::ui::components::theme::{argb_color, indicator_color};

/// Sentinel forcing the first color computation through the memo guard.
const NO_CACHED_PERCENTAGE: f64 = -1.0;

/// Percentage movement below this is treated as unchanged.
const PROGRESS_EPSILON: f64 = 0.1;

pub struct GoalCardState {
    goal: Goal,
    progress: GoalProgress,
    sorted_notes: Vec<Note>,
    cached_progress_percentage: f64,
    cached_indicator_color: Color32,
}

impl GoalCardState {
    pub fn new(goal: Goal, today: NaiveDate) -> Self {
        let mut state = Self {
            progress: progress::evaluate(&goal, today),
            sorted_notes: sort_notes(&goal),
            goal,
            cached_progress_percentage: NO_CACHED_PERCENTAGE,
            cached_indicator_color: Color32::GRAY,
        };
        state.refresh_indicator_color();
        state
    }

    pub fn goal(&self) -> &Goal {
        &self.goal
    }

    pub fn progress(&self) -> &GoalProgress {
        &self.progress
    }

    /// Notes ordered by creation date descending, newest first.
    pub fn notes(&self) -> &[Note] {
        &self.sorted_notes
    }

    /// The headline indicator color, served from the memo.
    pub fn indicator_color(&self) -> Color32 {
        self.cached_indicator_color
    }

    /// Color for the time ring: the goal's stored color, or the default
    /// blue when none was picked.
    pub fn time_indicator_color(&self) -> Color32 {
        argb_color(progress::stored_color_argb(&self.goal))
    }

    pub fn days_remaining_text(&self) -> String {
        format!(
            "{} {}",
            self.progress.days_remaining, self.progress.days_remaining_label
        )
    }

    /// Swap in a new version of the record (after an edit, note operation,
    /// or achievement toggle). Drops every cached value.
    pub fn replace_goal(&mut self, goal: Goal, today: NaiveDate) {
        self.goal = goal;
        self.sorted_notes = sort_notes(&self.goal);
        self.progress = progress::evaluate(&self.goal, today);
        self.cached_progress_percentage = NO_CACHED_PERCENTAGE;
        self.refresh_indicator_color();
    }

    /// Recompute derived values against the current date. Invoked by the
    /// periodic tick; the indicator color only updates once the percentage
    /// has moved by at least 0.1.
    pub fn refresh(&mut self, today: NaiveDate) {
        self.progress = progress::evaluate(&self.goal, today);
        self.refresh_indicator_color();
    }

    fn refresh_indicator_color(&mut self) {
        let percentage = self.progress.progress_percentage;
        if (percentage - self.cached_progress_percentage).abs() < PROGRESS_EPSILON {
            return;
        }
        self.cached_progress_percentage = percentage;
        self.cached_indicator_color = indicator_color(self.progress.tier);
    }
}

fn sort_notes(goal: &Goal) -> Vec<Note> {
    let mut notes = goal.notes.clone();
    notes.sort_by(|a, b| b.created_date.cmp(&a.created_date));
    notes
}
