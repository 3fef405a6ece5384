//! Applies the active theme's colors to the egui style.

use egui::{Context, Rounding};

use super::theme::{colors, ThemeKind};

/// Apply the theme to the egui context. Cheap enough to call at the start
/// of every frame, which is how an immediate-mode UI picks up a change.
pub fn apply_theme(ctx: &Context, kind: ThemeKind) {
    let palette = colors(kind);
    let mut style = (*ctx.style()).clone();

    style.visuals = match kind {
        ThemeKind::Light => egui::Visuals::light(),
        ThemeKind::Dark => egui::Visuals::dark(),
    };
    style.visuals.panel_fill = palette.background;
    style.visuals.window_fill = palette.surface;
    style.visuals.window_stroke = egui::Stroke::new(1.0, palette.border);
    style.visuals.override_text_color = Some(palette.text);
    // In egui 0.28, text edits draw their background with extreme_bg_color.
    style.visuals.extreme_bg_color = palette.input_background;
    style.visuals.faint_bg_color = palette.note_background;

    style.spacing.button_padding = egui::vec2(12.0, 6.0);
    style.spacing.item_spacing = egui::vec2(8.0, 8.0);
    style.visuals.widgets.inactive.rounding = Rounding::same(6.0);
    style.visuals.widgets.active.rounding = Rounding::same(6.0);
    style.visuals.widgets.hovered.rounding = Rounding::same(6.0);

    ctx.set_style(style);
}
