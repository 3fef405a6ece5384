//! # App Module
//!
//! Re-exports the top-level application type so `main` only needs one
//! import.

pub use crate::ui::state::app_state::DeadlineApp;
