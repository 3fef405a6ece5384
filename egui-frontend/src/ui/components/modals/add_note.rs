//! Add-note dialog: content plus an optional positive progress amount.

use egui;

/// What the user did with the dialog this frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoteAction {
    Submit,
    Cancel,
}

pub struct AddNoteState {
    pub goal_id: String,
    pub goal_name: String,
    pub content: String,
    pub amount_text: String,
    pub error: Option<String>,
}

impl AddNoteState {
    pub fn for_goal(goal_id: impl Into<String>, goal_name: impl Into<String>) -> Self {
        Self {
            goal_id: goal_id.into(),
            goal_name: goal_name.into(),
            content: String::new(),
            amount_text: String::new(),
            error: None,
        }
    }

    /// Parse the optional progress amount. Empty means no amount; anything
    /// else must be a number (positivity is enforced by the goal service).
    pub fn parsed_amount(&self) -> Result<Option<f64>, String> {
        let trimmed = self.amount_text.trim();
        if trimmed.is_empty() {
            return Ok(None);
        }
        trimmed
            .parse::<f64>()
            .map(Some)
            .map_err(|_| "Progress amount must be a number".to_string())
    }

    pub fn render(&mut self, ctx: &egui::Context) -> Option<NoteAction> {
        let mut action = None;

        egui::Window::new(format!("Add Note: {}", self.goal_name))
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.label("Note");
                ui.text_edit_multiline(&mut self.content);

                ui.label("Progress amount (optional)");
                ui.text_edit_singleline(&mut self.amount_text);

                if let Some(error) = &self.error {
                    ui.colored_label(egui::Color32::RED, error);
                }

                ui.horizontal(|ui| {
                    if ui.button("Add").clicked() {
                        action = Some(NoteAction::Submit);
                    }
                    if ui.button("Cancel").clicked() {
                        action = Some(NoteAction::Cancel);
                    }
                });
            });

        action
    }
}
