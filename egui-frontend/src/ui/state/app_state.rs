//! # App State Module
//!
//! Central state and mutation handlers for the deadline tracker app.
//!
//! ## Purpose:
//! [`DeadlineApp`] is the single owner of every goal record: the backend
//! handle, the per-goal view-models, the modal form states, and the
//! user-facing messages all live here, and every mutation runs on the UI
//! thread through the handlers below. The periodic refresh tick and user
//! edits are therefore serialized by construction.
//!
//! ## Error policy:
//! Validation failures land back in the open form; persistence failures
//! become a warning banner while the in-memory edit is kept (the next
//! successful save rewrites full state); nothing here panics or exits.

use anyhow::Result;
use chrono::{Local, NaiveDate};
use log::{info, warn};
use std::time::{Duration, Instant};

use shared::Goal;

use crate::backend::domain::ValidationError;
use crate::backend::Backend;
use crate::ui::components::modals::{AddNoteState, GoalEditorState};
use crate::ui::components::theme::ThemeService;
use crate::ui::components::GoalCardAction;
use crate::ui::state::goal_state::GoalCardState;

/// How often displayed countdowns and archival state are recomputed
/// without user interaction.
pub const REFRESH_INTERVAL: Duration = Duration::from_secs(60);

/// Main application struct for the egui deadline tracker.
pub struct DeadlineApp {
    pub backend: Backend,
    pub theme: ThemeService,

    /// One view-model per goal, ordered by deadline ascending.
    pub cards: Vec<GoalCardState>,
    /// Whether the archived list is shown instead of the active one.
    pub viewing_archived: bool,

    // Modal state
    pub editor: Option<GoalEditorState>,
    pub note_dialog: Option<AddNoteState>,

    // UI messages
    pub error_message: Option<String>,
    pub success_message: Option<String>,

    pub last_refresh: Instant,
}

impl DeadlineApp {
    /// Initialize against the per-user data directory.
    pub fn new() -> Result<Self> {
        Self::with_backend(Backend::new()?)
    }

    pub fn with_backend(backend: Backend) -> Result<Self> {
        let mut theme = ThemeService::new(backend.theme_settings_path());
        theme.subscribe(|kind| info!("Theme changed to {}", kind.as_str()));

        let mut app = Self {
            backend,
            theme,
            cards: Vec::new(),
            viewing_archived: false,
            editor: None,
            note_dialog: None,
            error_message: None,
            success_message: None,
            last_refresh: Instant::now(),
        };
        app.reload_goals();
        Ok(app)
    }

    fn today() -> NaiveDate {
        Local::now().date_naive()
    }

    /// Rebuild every view-model from the store. Used after structural
    /// changes (create, delete, reordered deadlines).
    pub fn reload_goals(&mut self) {
        let today = Self::today();
        self.cards = self
            .backend
            .goals
            .all_goals()
            .into_iter()
            .map(|goal| GoalCardState::new(goal, today))
            .collect();
    }

    /// Recompute all derived values against the current wall clock.
    pub fn refresh_all(&mut self) {
        let today = Self::today();
        for card in &mut self.cards {
            card.refresh(today);
        }
    }

    /// Run the 1-minute refresh if it is due.
    pub fn maybe_periodic_refresh(&mut self) {
        if self.last_refresh.elapsed() >= REFRESH_INTERVAL {
            self.refresh_all();
            self.last_refresh = Instant::now();
        }
    }

    /// Swap one updated record into its view-model, invalidating that
    /// card's caches only.
    fn replace_card(&mut self, goal: Goal) {
        let today = Self::today();
        match self.cards.iter_mut().find(|c| c.goal().id == goal.id) {
            Some(card) => card.replace_goal(goal, today),
            None => self.reload_goals(),
        }
    }

    pub fn clear_messages(&mut self) {
        self.error_message = None;
        self.success_message = None;
    }

    fn report_warning(&mut self, context: &str, err: &anyhow::Error) {
        warn!("{context}: {err:#}");
        self.error_message = Some(format!("{context}: {err}"));
    }

    pub fn open_new_goal_editor(&mut self) {
        self.editor = Some(GoalEditorState::for_new(Self::today()));
    }

    /// Apply an interaction reported by a goal card.
    pub fn apply_card_action(&mut self, goal_id: &str, action: GoalCardAction) {
        match action {
            GoalCardAction::Edit => {
                if let Some(goal) = self.backend.goals.get_goal(goal_id) {
                    self.editor = Some(GoalEditorState::for_goal(&goal));
                }
            }
            GoalCardAction::Delete => match self.backend.goals.delete_goal(goal_id) {
                Ok(()) => {
                    self.success_message = Some("Goal deleted".to_string());
                    self.reload_goals();
                }
                Err(err) => {
                    self.report_warning("Delete not saved to disk", &err);
                    self.reload_goals();
                }
            },
            GoalCardAction::AddNote => {
                if let Some(goal) = self.backend.goals.get_goal(goal_id) {
                    self.note_dialog = Some(AddNoteState::for_goal(&goal.id, &goal.name));
                }
            }
            GoalCardAction::DeleteNote(note_id) => {
                match self.backend.goals.delete_note(goal_id, &note_id) {
                    Ok(goal) => self.replace_card(goal),
                    Err(err) => {
                        self.report_warning("Note removal not saved to disk", &err);
                        self.reload_goals();
                    }
                }
            }
            GoalCardAction::SetAchieved(achieved) => {
                match self.backend.goals.set_achieved(goal_id, achieved) {
                    Ok(goal) => self.replace_card(goal),
                    Err(err) => {
                        self.report_warning("Change not saved to disk", &err);
                        self.reload_goals();
                    }
                }
            }
        }
    }

    /// Commit the goal editor form.
    pub fn submit_editor(&mut self) {
        let Some(mut editor) = self.editor.take() else {
            return;
        };

        let draft = match editor.to_draft() {
            Ok(draft) => draft,
            Err(message) => {
                editor.error = Some(message);
                self.editor = Some(editor);
                return;
            }
        };

        let result = match &editor.editing_id {
            Some(id) => self.backend.goals.update_goal(id, draft),
            None => self.backend.goals.create_goal(draft),
        };

        match result {
            Ok(goal) => {
                self.success_message = Some(format!("Saved '{}'", goal.name));
                self.reload_goals();
            }
            Err(err) => {
                if let Some(validation) = err.downcast_ref::<ValidationError>() {
                    // Back to the form; nothing was mutated.
                    editor.error = Some(validation.to_string());
                    self.editor = Some(editor);
                } else {
                    self.report_warning("Goal not saved to disk", &err);
                    self.reload_goals();
                }
            }
        }
    }

    /// Commit the add-note form.
    pub fn submit_note(&mut self) {
        let Some(mut dialog) = self.note_dialog.take() else {
            return;
        };

        let amount = match dialog.parsed_amount() {
            Ok(amount) => amount,
            Err(message) => {
                dialog.error = Some(message);
                self.note_dialog = Some(dialog);
                return;
            }
        };

        match self
            .backend
            .goals
            .add_note(&dialog.goal_id, &dialog.content, amount)
        {
            Ok(goal) => self.replace_card(goal),
            Err(err) => {
                if let Some(validation) = err.downcast_ref::<ValidationError>() {
                    dialog.error = Some(validation.to_string());
                    self.note_dialog = Some(dialog);
                } else {
                    self.report_warning("Note not saved to disk", &err);
                    self.reload_goals();
                }
            }
        }
    }
}
