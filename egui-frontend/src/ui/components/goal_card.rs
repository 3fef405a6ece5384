//! # Goal Card
//!
//! Renders one goal as a card: name, state tags, the circular progress
//! ring, the countdown text, and the notes list. All values come from the
//! [`GoalCardState`] view-model; nothing is computed here.
//!
//! Interactions are reported back as a [`GoalCardAction`] so the app can
//! apply them after the frame's immutable borrow of the card list ends.

use egui::{self, RichText};

use crate::ui::components::circular_progress::{render_ring, RingConfig, RingDisplay};
use crate::ui::components::theme::ThemeColors;
use crate::ui::state::goal_state::GoalCardState;

/// What the user asked for on a card this frame.
#[derive(Debug, Clone, PartialEq)]
pub enum GoalCardAction {
    Edit,
    Delete,
    AddNote,
    DeleteNote(String),
    SetAchieved(bool),
}

pub fn render_goal_card(
    ui: &mut egui::Ui,
    card: &GoalCardState,
    palette: &ThemeColors,
) -> Option<GoalCardAction> {
    let mut action = None;

    egui::Frame::none()
        .fill(palette.surface)
        .stroke(egui::Stroke::new(1.0, palette.border))
        .rounding(egui::Rounding::same(8.0))
        .inner_margin(egui::Margin::same(12.0))
        .show(ui, |ui| {
            ui.set_width(ui.available_width());

            ui.horizontal(|ui| {
                ui.label(RichText::new(&card.goal().name).heading().color(palette.text));
                render_state_tags(ui, card);
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.small_button("Delete").clicked() {
                        action = Some(GoalCardAction::Delete);
                    }
                    if ui.small_button("Edit").clicked() {
                        action = Some(GoalCardAction::Edit);
                    }
                });
            });

            ui.horizontal(|ui| {
                let display = RingDisplay::from_progress(card.progress());
                render_ring(
                    ui,
                    &RingConfig::default(),
                    &display,
                    card.indicator_color(),
                    palette.border,
                    palette.text,
                );

                ui.vertical(|ui| {
                    ui.label(
                        RichText::new(card.days_remaining_text())
                            .color(palette.text_secondary),
                    );
                    if let Some(a) = render_progress_summary(ui, card, palette) {
                        action = Some(a);
                    }
                });
            });

            if let Some(a) = render_notes(ui, card, palette) {
                action = Some(a);
            }
        });

    action
}

fn render_state_tags(ui: &mut egui::Ui, card: &GoalCardState) {
    if card.progress().is_overdue {
        ui.label(RichText::new("overdue").small().color(egui::Color32::RED));
    }
    if card.progress().is_archived {
        ui.label(RichText::new("archived").small().weak());
    }
}

fn render_progress_summary(
    ui: &mut egui::Ui,
    card: &GoalCardState,
    palette: &ThemeColors,
) -> Option<GoalCardAction> {
    let mut action = None;
    let progress = card.progress();
    let goal = card.goal();

    if goal.is_quantitative() {
        match goal.target_amount {
            Some(target) => ui.label(
                RichText::new(format!(
                    "{:.0} / {:.0} ({:.0}%)",
                    goal.current_amount, target, progress.target_progress_percentage
                ))
                .color(palette.text),
            ),
            None => ui.label(
                RichText::new(format!("{:.0} logged, no target", goal.current_amount))
                    .color(palette.text_secondary),
            ),
        };
    } else {
        let mut achieved = goal.is_achieved;
        if ui.checkbox(&mut achieved, "Achieved").changed() {
            action = Some(GoalCardAction::SetAchieved(achieved));
        }
    }

    ui.label(
        RichText::new(format!("time {:.0}%", progress.time_progress_percentage))
            .small()
            .color(card.time_indicator_color()),
    );
    action
}

fn render_notes(
    ui: &mut egui::Ui,
    card: &GoalCardState,
    palette: &ThemeColors,
) -> Option<GoalCardAction> {
    let mut action = None;

    egui::CollapsingHeader::new(format!("Notes ({})", card.notes().len()))
        .id_source(("notes", &card.goal().id))
        .show(ui, |ui| {
            for note in card.notes() {
                egui::Frame::none()
                    .fill(palette.note_background)
                    .rounding(egui::Rounding::same(4.0))
                    .inner_margin(egui::Margin::same(6.0))
                    .show(ui, |ui| {
                        ui.horizontal(|ui| {
                            ui.vertical(|ui| {
                                ui.label(RichText::new(&note.content).color(palette.text));
                                let mut meta =
                                    note.created_date.format("%Y-%m-%d %H:%M").to_string();
                                if let Some(amount) = note.progress_amount {
                                    meta.push_str(&format!("  +{amount:.0}"));
                                }
                                ui.label(
                                    RichText::new(meta).small().color(palette.text_secondary),
                                );
                            });
                            ui.with_layout(
                                egui::Layout::right_to_left(egui::Align::Center),
                                |ui| {
                                    if ui.small_button("✕").clicked() {
                                        action =
                                            Some(GoalCardAction::DeleteNote(note.id.clone()));
                                    }
                                },
                            );
                        });
                    });
            }
            if ui.button("Add note").clicked() {
                action = Some(GoalCardAction::AddNote);
            }
        });

    action
}
