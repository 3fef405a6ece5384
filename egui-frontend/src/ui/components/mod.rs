//! # UI Components Module
//!
//! This module organizes the UI components for the deadline tracker.
//!
//! ## Module Organization:
//! - `theme` - light/dark color tables and the persisted theme service
//! - `styling` - applying the active theme to the egui style
//! - `circular_progress` - the ring-style progress indicator
//! - `goal_card` - one goal rendered as a card
//! - `modals` - the goal editor and add-note dialogs

pub mod circular_progress;
pub mod goal_card;
pub mod modals;
pub mod styling;
pub mod theme;

pub use goal_card::{render_goal_card, GoalCardAction};
pub use styling::apply_theme;
pub use theme::{ThemeKind, ThemeService};
