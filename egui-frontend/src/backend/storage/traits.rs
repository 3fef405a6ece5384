//! Storage trait for goal persistence.
//!
//! The domain layer talks to storage only through [`GoalStore`], keeping the
//! business logic agnostic of the on-disk format.

use shared::Goal;

use super::json::StorageError;

/// Contract for a goal collection backed by durable storage.
///
/// Mutations update the in-memory collection first and then persist it, so a
/// failed write returns an error while the edit itself is retained; the next
/// successful mutation re-saves full state.
pub trait GoalStore {
    /// All goals, ordered by deadline ascending.
    fn get_all(&self) -> Vec<Goal>;

    /// Look up a single goal by id.
    fn get(&self, goal_id: &str) -> Option<Goal>;

    fn add(&mut self, goal: Goal) -> Result<(), StorageError>;

    /// Full-record replace by id. Unknown ids are logged and ignored.
    fn update(&mut self, goal: Goal) -> Result<(), StorageError>;

    fn delete(&mut self, goal_id: &str) -> Result<(), StorageError>;
}
