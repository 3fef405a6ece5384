//! # Progress Engine
//!
//! Pure functions that turn a stored [`Goal`] and the current date into the
//! derived display state: progress percentages, remaining days, archival and
//! overdue flags, and the indicator color tier.
//!
//! ## Key Rules
//!
//! - All date arithmetic is whole-day; time of day never enters into it.
//! - `today` is sampled once by the caller and threaded through every
//!   function, so the several values computed for one display pass can never
//!   disagree about what day it is. [`evaluate`] bundles a full pass.
//! - Archival is a pure function of `deadline` and the calendar; it is never
//!   stored or toggled by the user.

use chrono::NaiveDate;
use shared::{Goal, GoalType};

/// Default indicator color when the goal has no stored color: #2196F3 blue.
pub const DEFAULT_PROGRESS_COLOR_ARGB: u32 = 0xFF21_96F3;

/// Color tier for the progress indicator. The mapping from tier to a
/// concrete color is a presentation concern; the tier boundaries and the
/// overdue override are part of this engine's contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndicatorTier {
    /// Overdue goals, regardless of percentage.
    Alert,
    /// Progress above 75%.
    Good,
    /// Progress above 50%.
    Warn,
    /// Everything else.
    Neutral,
}

/// One consistent evaluation of every derived value, computed against a
/// single `today`.
#[derive(Debug, Clone, PartialEq)]
pub struct GoalProgress {
    pub has_started: bool,
    pub days_remaining: i64,
    pub days_remaining_label: &'static str,
    pub target_progress_percentage: f64,
    pub time_progress_percentage: f64,
    pub progress_percentage: f64,
    pub is_overdue: bool,
    pub is_archived: bool,
    pub tier: IndicatorTier,
}

/// Compute all derived values for `goal` as of `today`.
pub fn evaluate(goal: &Goal, today: NaiveDate) -> GoalProgress {
    GoalProgress {
        has_started: has_started(goal, today),
        days_remaining: days_remaining(goal, today),
        days_remaining_label: days_remaining_label(goal, today),
        target_progress_percentage: target_progress_percentage(goal),
        time_progress_percentage: time_progress_percentage(goal, today),
        progress_percentage: progress_percentage(goal, today),
        is_overdue: is_overdue(goal, today),
        is_archived: is_archived(goal, today),
        tier: indicator_tier(goal, today),
    }
}

pub fn has_started(goal: &Goal, today: NaiveDate) -> bool {
    today >= goal.start_date
}

/// Days until the deadline once started, days until the start date before
/// then. Both branches floor at zero; never negative.
pub fn days_remaining(goal: &Goal, today: NaiveDate) -> i64 {
    if !has_started(goal, today) {
        (goal.start_date - today).num_days().max(0)
    } else {
        (goal.deadline - today).num_days().max(0)
    }
}

pub fn days_remaining_label(goal: &Goal, today: NaiveDate) -> &'static str {
    if !has_started(goal, today) {
        "days until start"
    } else {
        "days remaining"
    }
}

/// Amount-based progress. Zero unless the goal is quantitative with a
/// positive target; clamped to [0, 100] since `current_amount` may exceed
/// the target.
pub fn target_progress_percentage(goal: &Goal) -> f64 {
    if !goal.is_quantitative() {
        return 0.0;
    }
    let target = match goal.target_amount {
        Some(t) if t > 0.0 => t,
        _ => return 0.0,
    };
    (goal.current_amount / target * 100.0).clamp(0.0, 100.0)
}

/// Time-based progress through the start..deadline window.
///
/// Archived goals always read 100. A zero-length or inverted window is
/// treated as already complete. The day in progress counts as elapsed, so a
/// goal running Jan 1 to Jan 10 reads 5/9 elapsed on Jan 5.
pub fn time_progress_percentage(goal: &Goal, today: NaiveDate) -> f64 {
    if is_archived(goal, today) {
        return 100.0;
    }
    if !has_started(goal, today) {
        return 0.0;
    }

    let total_days = (goal.deadline - goal.start_date).num_days();
    if total_days <= 0 {
        return 100.0;
    }

    let elapsed_days = (today - goal.start_date).num_days() + 1;
    (elapsed_days as f64 / total_days as f64 * 100.0).clamp(0.0, 100.0)
}

/// The headline percentage: amount-based for quantitative goals, otherwise
/// 100 when achieved and time-based until then.
pub fn progress_percentage(goal: &Goal, today: NaiveDate) -> f64 {
    if goal.is_quantitative() {
        target_progress_percentage(goal)
    } else if goal.is_achieved {
        100.0
    } else {
        time_progress_percentage(goal, today)
    }
}

/// Deadline passed but the goal is still being shown.
///
/// Deliberately narrower than a plain date comparison: `days_remaining` is
/// floored at zero, so this holds from the day after the deadline onward
/// rather than flipping through a negative countdown. Kept in this exact
/// form; see [`is_archived`] for the plain comparison.
pub fn is_overdue(goal: &Goal, today: NaiveDate) -> bool {
    today > goal.deadline && has_started(goal, today) && days_remaining(goal, today) == 0
}

/// Date-only comparison: the deadline has fully passed.
pub fn is_archived(goal: &Goal, today: NaiveDate) -> bool {
    today > goal.deadline
}

/// Tier for the headline indicator: overdue overrides everything, then
/// thresholds on [`progress_percentage`].
pub fn indicator_tier(goal: &Goal, today: NaiveDate) -> IndicatorTier {
    if is_overdue(goal, today) {
        return IndicatorTier::Alert;
    }
    let progress = progress_percentage(goal, today);
    if progress > 75.0 {
        IndicatorTier::Good
    } else if progress > 50.0 {
        IndicatorTier::Warn
    } else {
        IndicatorTier::Neutral
    }
}

/// The stored indicator color, falling back to the fixed default blue.
pub fn stored_color_argb(goal: &Goal) -> u32 {
    goal.progress_color_argb
        .unwrap_or(DEFAULT_PROGRESS_COLOR_ARGB)
}

/// Unpack an ARGB integer into (alpha, red, green, blue) components.
pub fn decode_argb(argb: u32) -> (u8, u8, u8, u8) {
    (
        ((argb >> 24) & 0xFF) as u8,
        ((argb >> 16) & 0xFF) as u8,
        ((argb >> 8) & 0xFF) as u8,
        (argb & 0xFF) as u8,
    )
}
