use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Whether a goal is tracked against a numeric target or a simple
/// done/not-done flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GoalType {
    Quantitative,
    Qualitative,
}

/// A timestamped annotation on a goal, optionally carrying an incremental
/// progress amount that was applied to the parent goal when the note was
/// created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: String,
    pub created_date: DateTime<Utc>,
    pub content: String,
    pub progress_amount: Option<f64>,
}

impl Note {
    pub fn new(content: impl Into<String>, progress_amount: Option<f64>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            created_date: Utc::now(),
            content: content.into(),
            progress_amount,
        }
    }
}

/// A tracked objective with a deadline.
///
/// This is the persisted shape of a goal. Everything displayed beyond these
/// raw fields (progress percentages, remaining days, archival state) is
/// derived from them and the current date, never stored.
///
/// Invariants enforced at the edit boundary, not re-checked here:
/// - `name` is non-empty
/// - `deadline >= start_date`
/// - `target_amount`, when present, is positive
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Goal {
    /// Opaque unique identifier, immutable after creation.
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub goal_type: GoalType,
    /// Calendar date the goal starts counting; time of day is ignored.
    pub start_date: NaiveDate,
    /// Calendar date the goal is due; time of day is ignored.
    pub deadline: NaiveDate,
    pub created_date: DateTime<Utc>,
    /// Numeric target, meaningful only for quantitative goals.
    pub target_amount: Option<f64>,
    /// Accumulated amount. Never negative; not bounded by `target_amount`.
    pub current_amount: f64,
    /// User-toggled completion flag, meaningful only for qualitative goals.
    pub is_achieved: bool,
    pub notes: Vec<Note>,
    /// Packed ARGB color for the progress indicator, if the user picked one.
    pub progress_color_argb: Option<u32>,
}

impl Goal {
    /// Create a fresh goal with a new id and `created_date = now`.
    pub fn new(
        name: impl Into<String>,
        goal_type: GoalType,
        start_date: NaiveDate,
        deadline: NaiveDate,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            goal_type,
            start_date,
            deadline,
            created_date: Utc::now(),
            target_amount: None,
            current_amount: 0.0,
            is_achieved: false,
            notes: Vec::new(),
            progress_color_argb: None,
        }
    }

    pub fn is_quantitative(&self) -> bool {
        self.goal_type == GoalType::Quantitative
    }

    /// Append a note. A positive `progress_amount` is also added to
    /// `current_amount`; the addition is reversed by [`Goal::remove_note`].
    pub fn add_note(&mut self, content: impl Into<String>, progress_amount: Option<f64>) -> String {
        let note = Note::new(content, progress_amount);
        let note_id = note.id.clone();
        if let Some(amount) = note.progress_amount {
            if amount > 0.0 {
                self.current_amount += amount;
            }
        }
        self.notes.push(note);
        note_id
    }

    /// Remove a note by id, reversing its progress amount. `current_amount`
    /// is clamped at zero in case it was edited down in between.
    pub fn remove_note(&mut self, note_id: &str) -> Option<Note> {
        let index = self.notes.iter().position(|n| n.id == note_id)?;
        let note = self.notes.remove(index);
        if let Some(amount) = note.progress_amount {
            if amount > 0.0 {
                self.current_amount = (self.current_amount - amount).max(0.0);
            }
        }
        Some(note)
    }

    /// Sum of the progress amounts carried by this goal's notes.
    ///
    /// Informational only: amounts can also be edited directly, so nothing
    /// ties this to `current_amount`.
    pub fn total_progress_from_notes(&self) -> f64 {
        self.notes
            .iter()
            .filter_map(|n| n.progress_amount)
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quantitative_goal() -> Goal {
        let mut goal = Goal::new(
            "Read pages",
            GoalType::Quantitative,
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, 31).unwrap(),
        );
        goal.target_amount = Some(1000.0);
        goal
    }

    #[test]
    fn new_goal_has_id_and_zero_amount() {
        let goal = quantitative_goal();
        assert!(!goal.id.is_empty());
        assert_eq!(goal.current_amount, 0.0);
        assert!(goal.notes.is_empty());
        assert!(!goal.is_achieved);
    }

    #[test]
    fn add_note_applies_positive_progress_amount() {
        let mut goal = quantitative_goal();
        goal.add_note("first batch", Some(250.0));
        assert_eq!(goal.current_amount, 250.0);
        assert_eq!(goal.notes.len(), 1);
    }

    #[test]
    fn add_note_without_amount_leaves_current_amount_alone() {
        let mut goal = quantitative_goal();
        goal.add_note("just a thought", None);
        assert_eq!(goal.current_amount, 0.0);
    }

    #[test]
    fn remove_note_reverses_its_amount() {
        let mut goal = quantitative_goal();
        let note_id = goal.add_note("progress", Some(20.0));
        goal.remove_note(&note_id);
        assert_eq!(goal.current_amount, 0.0);
        assert!(goal.notes.is_empty());
    }

    #[test]
    fn remove_note_clamps_at_zero() {
        let mut goal = quantitative_goal();
        let note_id = goal.add_note("progress", Some(20.0));
        // Direct edit in between drops the amount below the note's share.
        goal.current_amount = 5.0;
        goal.remove_note(&note_id);
        assert_eq!(goal.current_amount, 0.0);
    }

    #[test]
    fn remove_unknown_note_is_a_no_op() {
        let mut goal = quantitative_goal();
        goal.add_note("progress", Some(20.0));
        assert!(goal.remove_note("missing").is_none());
        assert_eq!(goal.current_amount, 20.0);
        assert_eq!(goal.notes.len(), 1);
    }

    #[test]
    fn total_progress_from_notes_ignores_amountless_notes() {
        let mut goal = quantitative_goal();
        goal.add_note("a", Some(10.0));
        goal.add_note("b", None);
        goal.add_note("c", Some(15.0));
        assert_eq!(goal.total_progress_from_notes(), 25.0);
    }

    #[test]
    fn goal_serializes_with_camel_case_fields() {
        let goal = quantitative_goal();
        let json = serde_json::to_value(&goal).unwrap();
        assert!(json.get("startDate").is_some());
        assert!(json.get("targetAmount").is_some());
        assert!(json.get("currentAmount").is_some());
        assert_eq!(json.get("type").unwrap(), "Quantitative");
    }
}
