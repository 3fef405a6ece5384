//! Storage layer: the [`GoalStore`] contract and its JSON implementation.

pub mod json;
pub mod traits;

pub use json::{JsonConnection, JsonGoalStore, StorageError};
pub use traits::GoalStore;
