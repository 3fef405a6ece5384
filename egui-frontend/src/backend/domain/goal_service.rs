//! # Goal Service
//!
//! Business logic for goal management: validation at the edit boundary and
//! CRUD orchestration over the [`GoalStore`].
//!
//! ## Key Responsibilities
//!
//! - **Validation**: rejecting bad input (empty names, inverted date
//!   ranges, non-positive amounts) before any state is mutated
//! - **Goal CRUD**: creating, updating, and deleting goals
//! - **Note operations**: adding and removing notes with their progress
//!   amount applied to, or reversed from, the parent goal
//! - **Error policy**: validation failures stop here; persistence failures
//!   come back as reportable errors with the in-memory edit retained, never
//!   as a crash

use anyhow::Result;
use chrono::NaiveDate;
use log::{info, warn};

use shared::{Goal, GoalType};

use crate::backend::storage::GoalStore;

/// Rejected user input. These never reach the data model; the caller
/// prompts the user to correct and no state is mutated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Goal name cannot be empty")]
    EmptyName,
    #[error("Deadline cannot be before the start date")]
    DeadlineBeforeStart,
    #[error("Target amount must be positive")]
    NonPositiveTarget,
    #[error("Current amount cannot be negative")]
    NegativeCurrentAmount,
    #[error("Note content cannot be empty")]
    EmptyNote,
    #[error("Progress amount must be positive")]
    NonPositiveNoteAmount,
}

/// The editable fields of a goal, as collected by the editor form.
#[derive(Debug, Clone)]
pub struct GoalDraft {
    pub name: String,
    pub goal_type: GoalType,
    pub start_date: NaiveDate,
    pub deadline: NaiveDate,
    pub target_amount: Option<f64>,
    /// Direct edit of the accumulated amount; `None` leaves whatever the
    /// notes have built up untouched.
    pub current_amount: Option<f64>,
    pub progress_color_argb: Option<u32>,
}

/// Service for managing goals over a storage backend.
pub struct GoalService<S: GoalStore> {
    store: S,
}

impl<S: GoalStore> GoalService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// All goals, ordered by deadline ascending.
    pub fn all_goals(&self) -> Vec<Goal> {
        self.store.get_all()
    }

    pub fn get_goal(&self, goal_id: &str) -> Option<Goal> {
        self.store.get(goal_id)
    }

    /// Create a new goal from a validated draft.
    pub fn create_goal(&mut self, draft: GoalDraft) -> Result<Goal> {
        validate_draft(&draft)?;

        let mut goal = Goal::new(
            draft.name.trim(),
            draft.goal_type,
            draft.start_date,
            draft.deadline,
        );
        goal.target_amount = draft.target_amount;
        if let Some(amount) = draft.current_amount {
            goal.current_amount = amount;
        }
        goal.progress_color_argb = draft.progress_color_argb;

        info!("Creating goal '{}' due {}", goal.name, goal.deadline);
        self.store.add(goal.clone())?;
        Ok(goal)
    }

    /// Apply a draft to an existing goal. Identity, creation timestamp,
    /// achievement flag, and notes all carry over untouched; the
    /// accumulated amount does too unless the draft edits it directly.
    pub fn update_goal(&mut self, goal_id: &str, draft: GoalDraft) -> Result<Goal> {
        validate_draft(&draft)?;

        let mut goal = self.require_goal(goal_id)?;
        goal.name = draft.name.trim().to_string();
        goal.goal_type = draft.goal_type;
        goal.start_date = draft.start_date;
        goal.deadline = draft.deadline;
        goal.target_amount = draft.target_amount;
        if let Some(amount) = draft.current_amount {
            goal.current_amount = amount;
        }
        goal.progress_color_argb = draft.progress_color_argb;

        info!("Updating goal '{}'", goal.name);
        self.store.update(goal.clone())?;
        Ok(goal)
    }

    pub fn delete_goal(&mut self, goal_id: &str) -> Result<()> {
        info!("Deleting goal {}", goal_id);
        self.store.delete(goal_id)?;
        Ok(())
    }

    /// Add a note to a goal; a positive progress amount also increments the
    /// goal's accumulated amount.
    pub fn add_note(
        &mut self,
        goal_id: &str,
        content: &str,
        progress_amount: Option<f64>,
    ) -> Result<Goal> {
        if content.trim().is_empty() {
            return Err(ValidationError::EmptyNote.into());
        }
        if matches!(progress_amount, Some(a) if a <= 0.0) {
            return Err(ValidationError::NonPositiveNoteAmount.into());
        }

        let mut goal = self.require_goal(goal_id)?;
        goal.add_note(content.trim(), progress_amount);
        self.store.update(goal.clone())?;
        Ok(goal)
    }

    /// Remove a note, reversing its progress amount (clamped at zero).
    pub fn delete_note(&mut self, goal_id: &str, note_id: &str) -> Result<Goal> {
        let mut goal = self.require_goal(goal_id)?;
        if goal.remove_note(note_id).is_none() {
            warn!("Note {} not found on goal {}", note_id, goal_id);
        }
        self.store.update(goal.clone())?;
        Ok(goal)
    }

    /// Set the achievement flag. Only semantically meaningful for
    /// qualitative goals but accepted for quantitative ones as well.
    pub fn set_achieved(&mut self, goal_id: &str, achieved: bool) -> Result<Goal> {
        let mut goal = self.require_goal(goal_id)?;
        goal.is_achieved = achieved;
        self.store.update(goal.clone())?;
        Ok(goal)
    }

    fn require_goal(&self, goal_id: &str) -> Result<Goal> {
        self.store
            .get(goal_id)
            .ok_or_else(|| anyhow::anyhow!("Unknown goal id: {}", goal_id))
    }
}

fn validate_draft(draft: &GoalDraft) -> Result<(), ValidationError> {
    if draft.name.trim().is_empty() {
        return Err(ValidationError::EmptyName);
    }
    if draft.deadline < draft.start_date {
        return Err(ValidationError::DeadlineBeforeStart);
    }
    // A quantitative goal may omit its target (progress reads zero), but a
    // provided target must be positive.
    if matches!(draft.target_amount, Some(t) if t <= 0.0) {
        return Err(ValidationError::NonPositiveTarget);
    }
    if matches!(draft.current_amount, Some(a) if a < 0.0) {
        return Err(ValidationError::NegativeCurrentAmount);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::storage::{JsonConnection, JsonGoalStore};
    use tempfile::TempDir;

    fn setup_service() -> (GoalService<JsonGoalStore>, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let connection = JsonConnection::new(temp_dir.path()).unwrap();
        (GoalService::new(JsonGoalStore::open(connection)), temp_dir)
    }

    fn draft(name: &str) -> GoalDraft {
        GoalDraft {
            name: name.to_string(),
            goal_type: GoalType::Quantitative,
            start_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            deadline: NaiveDate::from_ymd_opt(2024, 1, 31).unwrap(),
            target_amount: Some(1000.0),
            current_amount: None,
            progress_color_argb: None,
        }
    }

    fn validation_error(err: &anyhow::Error) -> Option<ValidationError> {
        err.downcast_ref::<ValidationError>().copied()
    }

    #[test]
    fn create_rejects_empty_name() {
        let (mut service, _temp_dir) = setup_service();
        let err = service.create_goal(draft("   ")).unwrap_err();
        assert_eq!(validation_error(&err), Some(ValidationError::EmptyName));
        assert!(service.all_goals().is_empty());
    }

    #[test]
    fn create_rejects_deadline_before_start() {
        let (mut service, _temp_dir) = setup_service();
        let mut d = draft("backwards");
        d.deadline = NaiveDate::from_ymd_opt(2023, 12, 1).unwrap();
        let err = service.create_goal(d).unwrap_err();
        assert_eq!(
            validation_error(&err),
            Some(ValidationError::DeadlineBeforeStart)
        );
    }

    #[test]
    fn create_rejects_non_positive_target() {
        let (mut service, _temp_dir) = setup_service();
        let mut d = draft("zero target");
        d.target_amount = Some(0.0);
        let err = service.create_goal(d).unwrap_err();
        assert_eq!(
            validation_error(&err),
            Some(ValidationError::NonPositiveTarget)
        );
    }

    #[test]
    fn create_allows_quantitative_goal_without_target() {
        let (mut service, _temp_dir) = setup_service();
        let mut d = draft("targetless");
        d.target_amount = None;
        let goal = service.create_goal(d).unwrap();
        assert_eq!(goal.target_amount, None);
    }

    #[test]
    fn same_day_start_and_deadline_is_valid() {
        let (mut service, _temp_dir) = setup_service();
        let mut d = draft("one day");
        d.deadline = d.start_date;
        assert!(service.create_goal(d).is_ok());
    }

    #[test]
    fn update_preserves_identity_and_accumulated_state() {
        let (mut service, _temp_dir) = setup_service();
        let goal = service.create_goal(draft("original")).unwrap();
        service.add_note(&goal.id, "progress", Some(100.0)).unwrap();

        let mut d = draft("renamed");
        d.deadline = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let updated = service.update_goal(&goal.id, d).unwrap();

        assert_eq!(updated.id, goal.id);
        assert_eq!(updated.created_date, goal.created_date);
        assert_eq!(updated.name, "renamed");
        assert_eq!(updated.current_amount, 100.0);
        assert_eq!(updated.notes.len(), 1);
    }

    #[test]
    fn update_applies_a_direct_current_amount_edit() {
        let (mut service, _temp_dir) = setup_service();
        let goal = service.create_goal(draft("hand edited")).unwrap();
        service.add_note(&goal.id, "notes first", Some(100.0)).unwrap();

        let mut d = draft("hand edited");
        d.current_amount = Some(420.0);
        let updated = service.update_goal(&goal.id, d).unwrap();

        assert_eq!(updated.current_amount, 420.0);
        assert_eq!(service.get_goal(&goal.id).unwrap().current_amount, 420.0);
        // Notes are untouched by a direct edit.
        assert_eq!(updated.notes.len(), 1);
    }

    #[test]
    fn negative_current_amount_is_rejected() {
        let (mut service, _temp_dir) = setup_service();
        let mut d = draft("below zero");
        d.current_amount = Some(-1.0);
        let err = service.create_goal(d).unwrap_err();
        assert_eq!(
            validation_error(&err),
            Some(ValidationError::NegativeCurrentAmount)
        );
    }

    #[test]
    fn add_note_increments_and_delete_note_reverses() {
        let (mut service, _temp_dir) = setup_service();
        let goal = service.create_goal(draft("tracked")).unwrap();

        let with_note = service.add_note(&goal.id, "batch", Some(250.0)).unwrap();
        assert_eq!(with_note.current_amount, 250.0);

        let note_id = with_note.notes[0].id.clone();
        let reverted = service.delete_note(&goal.id, &note_id).unwrap();
        assert_eq!(reverted.current_amount, 0.0);
        assert!(reverted.notes.is_empty());
    }

    #[test]
    fn add_note_rejects_empty_content_and_bad_amounts() {
        let (mut service, _temp_dir) = setup_service();
        let goal = service.create_goal(draft("strict")).unwrap();

        let err = service.add_note(&goal.id, "  ", None).unwrap_err();
        assert_eq!(validation_error(&err), Some(ValidationError::EmptyNote));

        let err = service.add_note(&goal.id, "negative", Some(-5.0)).unwrap_err();
        assert_eq!(
            validation_error(&err),
            Some(ValidationError::NonPositiveNoteAmount)
        );

        assert_eq!(service.get_goal(&goal.id).unwrap().notes.len(), 0);
    }

    #[test]
    fn set_achieved_is_accepted_for_both_goal_types() {
        let (mut service, _temp_dir) = setup_service();
        let quantitative = service.create_goal(draft("numbers")).unwrap();
        let mut d = draft("feelings");
        d.goal_type = GoalType::Qualitative;
        d.target_amount = None;
        let qualitative = service.create_goal(d).unwrap();

        assert!(service.set_achieved(&quantitative.id, true).unwrap().is_achieved);
        assert!(service.set_achieved(&qualitative.id, true).unwrap().is_achieved);
    }

    #[test]
    fn delete_goal_removes_it() {
        let (mut service, _temp_dir) = setup_service();
        let goal = service.create_goal(draft("short lived")).unwrap();
        service.delete_goal(&goal.id).unwrap();
        assert!(service.get_goal(&goal.id).is_none());
    }
}
