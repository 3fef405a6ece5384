//! # Goal Editor Modal
//!
//! Form state and rendering for creating or editing a goal. This is the
//! edit boundary: input is parsed and validated here (and again in the goal
//! service) before anything touches the data model, and a rejected form
//! just shows its error and stays open.

use chrono::{Duration, NaiveDate};
use egui::{self, Color32};
use egui_extras::DatePickerButton;

use shared::{Goal, GoalType};

use crate::backend::domain::GoalDraft;
use crate::ui::components::theme::{argb_color, color_to_argb};

/// What the user did with the editor this frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorAction {
    Submit,
    Cancel,
}

/// Form state for the goal editor window.
pub struct GoalEditorState {
    /// `None` when creating, the goal's id when editing.
    pub editing_id: Option<String>,
    pub name: String,
    pub goal_type: GoalType,
    pub start_date: NaiveDate,
    pub deadline: NaiveDate,
    pub target_amount_text: String,
    pub current_amount_text: String,
    pub use_custom_color: bool,
    pub custom_color: Color32,
    pub error: Option<String>,
}

impl GoalEditorState {
    pub fn for_new(today: NaiveDate) -> Self {
        Self {
            editing_id: None,
            name: String::new(),
            goal_type: GoalType::Qualitative,
            start_date: today,
            deadline: today + Duration::days(30),
            target_amount_text: String::new(),
            current_amount_text: String::new(),
            use_custom_color: false,
            custom_color: argb_color(crate::backend::domain::progress::DEFAULT_PROGRESS_COLOR_ARGB),
            error: None,
        }
    }

    pub fn for_goal(goal: &Goal) -> Self {
        Self {
            editing_id: Some(goal.id.clone()),
            name: goal.name.clone(),
            goal_type: goal.goal_type,
            start_date: goal.start_date,
            deadline: goal.deadline,
            target_amount_text: goal
                .target_amount
                .map(|t| format!("{t}"))
                .unwrap_or_default(),
            current_amount_text: format!("{}", goal.current_amount),
            use_custom_color: goal.progress_color_argb.is_some(),
            custom_color: argb_color(
                goal.progress_color_argb
                    .unwrap_or(crate::backend::domain::progress::DEFAULT_PROGRESS_COLOR_ARGB),
            ),
            error: None,
        }
    }

    /// Parse the form into a draft. Business validation (empty name, date
    /// order, positive target) happens in the goal service; only parse
    /// failures are rejected here.
    pub fn to_draft(&self) -> Result<GoalDraft, String> {
        let target_amount = if self.goal_type == GoalType::Quantitative
            && !self.target_amount_text.trim().is_empty()
        {
            Some(
                self.target_amount_text
                    .trim()
                    .parse::<f64>()
                    .map_err(|_| "Target amount must be a number".to_string())?,
            )
        } else {
            None
        };

        let current_amount = if self.goal_type == GoalType::Quantitative
            && !self.current_amount_text.trim().is_empty()
        {
            Some(
                self.current_amount_text
                    .trim()
                    .parse::<f64>()
                    .map_err(|_| "Current amount must be a number".to_string())?,
            )
        } else {
            None
        };

        Ok(GoalDraft {
            name: self.name.clone(),
            goal_type: self.goal_type,
            start_date: self.start_date,
            deadline: self.deadline,
            target_amount,
            current_amount,
            progress_color_argb: self
                .use_custom_color
                .then(|| color_to_argb(self.custom_color)),
        })
    }

    /// Render the editor window. Returns the user's action, if any.
    pub fn render(&mut self, ctx: &egui::Context) -> Option<EditorAction> {
        let mut action = None;
        let title = if self.editing_id.is_some() {
            "Edit Goal"
        } else {
            "New Goal"
        };

        egui::Window::new(title)
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                egui::Grid::new("goal_editor_grid")
                    .num_columns(2)
                    .spacing([12.0, 8.0])
                    .show(ui, |ui| {
                        ui.label("Name");
                        ui.text_edit_singleline(&mut self.name);
                        ui.end_row();

                        ui.label("Type");
                        egui::ComboBox::from_id_source("goal_type")
                            .selected_text(match self.goal_type {
                                GoalType::Quantitative => "Quantitative",
                                GoalType::Qualitative => "Qualitative",
                            })
                            .show_ui(ui, |ui| {
                                ui.selectable_value(
                                    &mut self.goal_type,
                                    GoalType::Qualitative,
                                    "Qualitative",
                                );
                                ui.selectable_value(
                                    &mut self.goal_type,
                                    GoalType::Quantitative,
                                    "Quantitative",
                                );
                            });
                        ui.end_row();

                        ui.label("Start date");
                        ui.add(DatePickerButton::new(&mut self.start_date).id_source("start_date"));
                        ui.end_row();

                        ui.label("Deadline");
                        ui.add(DatePickerButton::new(&mut self.deadline).id_source("deadline"));
                        ui.end_row();

                        if self.goal_type == GoalType::Quantitative {
                            ui.label("Target amount");
                            ui.text_edit_singleline(&mut self.target_amount_text);
                            ui.end_row();

                            ui.label("Current amount");
                            ui.text_edit_singleline(&mut self.current_amount_text);
                            ui.end_row();
                        }

                        ui.label("Custom color");
                        ui.horizontal(|ui| {
                            ui.checkbox(&mut self.use_custom_color, "");
                            if self.use_custom_color {
                                ui.color_edit_button_srgba(&mut self.custom_color);
                            }
                        });
                        ui.end_row();
                    });

                if let Some(error) = &self.error {
                    ui.colored_label(egui::Color32::RED, error);
                }

                ui.horizontal(|ui| {
                    if ui.button("Save").clicked() {
                        action = Some(EditorAction::Submit);
                    }
                    if ui.button("Cancel").clicked() {
                        action = Some(EditorAction::Cancel);
                    }
                });
            });

        action
    }
}
