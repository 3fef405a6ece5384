//! eframe glue: the per-frame update loop for [`DeadlineApp`].
//!
//! Each frame reapplies the active theme, runs the 1-minute countdown
//! refresh if it is due, renders the header, messages, and goal cards, and
//! finally the modal windows. Card interactions are collected during the
//! immutable pass over the card list and applied afterwards.

use eframe::egui;

use crate::ui::components::modals::{EditorAction, NoteAction};
use crate::ui::components::theme::{colors, ThemeKind};
use crate::ui::components::{apply_theme, render_goal_card, GoalCardAction};
use crate::ui::state::app_state::{DeadlineApp, REFRESH_INTERVAL};

impl eframe::App for DeadlineApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        apply_theme(ctx, self.theme.current());

        self.maybe_periodic_refresh();
        // Wake up even when idle so countdowns advance without input.
        ctx.request_repaint_after(REFRESH_INTERVAL);

        let mut pending: Vec<(String, GoalCardAction)> = Vec::new();

        egui::CentralPanel::default().show(ctx, |ui| {
            self.render_header(ui);
            ui.separator();
            self.render_messages(ui);
            self.render_goal_list(ui, &mut pending);
        });

        for (goal_id, action) in pending {
            self.apply_card_action(&goal_id, action);
        }

        self.render_modals(ctx);
    }
}

impl DeadlineApp {
    fn render_header(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.heading("Deadline Tracker");

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                let theme_label = match self.theme.current() {
                    ThemeKind::Light => "🌙 Dark",
                    ThemeKind::Dark => "☀ Light",
                };
                if ui.button(theme_label).clicked() {
                    self.theme.toggle();
                }

                let view_label = if self.viewing_archived {
                    "Show active"
                } else {
                    "Show archived"
                };
                if ui.button(view_label).clicked() {
                    self.viewing_archived = !self.viewing_archived;
                }

                if ui.button("+ New Goal").clicked() {
                    self.open_new_goal_editor();
                }
            });
        });
    }

    fn render_messages(&mut self, ui: &mut egui::Ui) {
        let mut dismissed = false;
        if let Some(error) = &self.error_message {
            ui.horizontal(|ui| {
                ui.colored_label(egui::Color32::RED, error);
                dismissed = ui.small_button("✕").clicked();
            });
        } else if let Some(success) = &self.success_message {
            ui.horizontal(|ui| {
                ui.colored_label(egui::Color32::from_rgb(0, 128, 0), success);
                dismissed = ui.small_button("✕").clicked();
            });
        }
        if dismissed {
            self.clear_messages();
        }
    }

    fn render_goal_list(
        &mut self,
        ui: &mut egui::Ui,
        pending: &mut Vec<(String, GoalCardAction)>,
    ) {
        let palette = colors(self.theme.current());
        let viewing_archived = self.viewing_archived;

        let visible: Vec<&crate::ui::state::GoalCardState> = self
            .cards
            .iter()
            .filter(|card| card.progress().is_archived == viewing_archived)
            .collect();

        if visible.is_empty() {
            ui.add_space(40.0);
            ui.vertical_centered(|ui| {
                let empty_text = if viewing_archived {
                    "No archived goals."
                } else {
                    "No active goals. Create one with + New Goal."
                };
                ui.label(egui::RichText::new(empty_text).weak());
            });
            return;
        }

        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                for card in visible {
                    if let Some(action) = render_goal_card(ui, card, palette) {
                        pending.push((card.goal().id.clone(), action));
                    }
                    ui.add_space(8.0);
                }
            });
    }

    fn render_modals(&mut self, ctx: &egui::Context) {
        if let Some(editor) = self.editor.as_mut() {
            match editor.render(ctx) {
                Some(EditorAction::Submit) => self.submit_editor(),
                Some(EditorAction::Cancel) => self.editor = None,
                None => {}
            }
        }

        if let Some(dialog) = self.note_dialog.as_mut() {
            match dialog.render(ctx) {
                Some(NoteAction::Submit) => self.submit_note(),
                Some(NoteAction::Cancel) => self.note_dialog = None,
                None => {}
            }
        }
    }
}
