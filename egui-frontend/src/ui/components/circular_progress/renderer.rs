//! # Circular Progress Renderer
//!
//! Draws the ring-style progress indicator with egui's painting primitives:
//! a full background ring, a progress arc starting at 12 o'clock, and the
//! remaining-days text in the center.

use egui::{self, Color32};
use std::f32::consts::PI;

use super::calculations::RingDisplay;

/// Configuration for the ring's appearance.
#[derive(Debug, Clone)]
pub struct RingConfig {
    pub radius: f32,
    pub stroke_width: f32,
    pub center_font_size: f32,
    pub secondary_font_size: f32,
}

impl Default for RingConfig {
    fn default() -> Self {
        Self {
            radius: 44.0,
            stroke_width: 9.0,
            center_font_size: 20.0,
            secondary_font_size: 9.0,
        }
    }
}

/// Render the ring into the current layout position.
pub fn render_ring(
    ui: &mut egui::Ui,
    config: &RingConfig,
    display: &RingDisplay,
    progress_color: Color32,
    track_color: Color32,
    text_color: Color32,
) {
    let diameter = (config.radius + config.stroke_width) * 2.0;
    let (rect, _response) =
        ui.allocate_exact_size(egui::vec2(diameter, diameter), egui::Sense::hover());
    let center = rect.center();
    let painter = ui.painter();

    // Background ring.
    painter.circle_stroke(
        center,
        config.radius,
        egui::Stroke::new(config.stroke_width, track_color),
    );

    // Progress arc, starting at 12 o'clock.
    if display.fraction > 0.0 {
        let start_angle = -PI / 2.0;
        let end_angle = start_angle + 2.0 * PI * display.fraction;
        draw_arc(
            painter,
            center,
            config.radius,
            config.stroke_width,
            start_angle,
            end_angle,
            progress_color,
        );
    }

    painter.text(
        center,
        egui::Align2::CENTER_CENTER,
        &display.center_text,
        egui::FontId::proportional(config.center_font_size),
        text_color,
    );
    painter.text(
        center + egui::vec2(0.0, config.center_font_size * 0.9),
        egui::Align2::CENTER_CENTER,
        &display.secondary_text,
        egui::FontId::proportional(config.secondary_font_size),
        text_color,
    );
}

/// Draw an arc as short line segments; egui has no native arc primitive.
fn draw_arc(
    painter: &egui::Painter,
    center: egui::Pos2,
    radius: f32,
    stroke_width: f32,
    start_angle: f32,
    end_angle: f32,
    color: Color32,
) {
    // Roughly three pixels per segment, within sane bounds.
    let arc_length = (end_angle - start_angle).abs();
    let num_segments = ((arc_length * radius / 3.0).ceil() as i32).clamp(8, 100);
    let angle_step = (end_angle - start_angle) / num_segments as f32;

    for i in 0..num_segments {
        let angle1 = start_angle + angle_step * i as f32;
        let angle2 = start_angle + angle_step * (i + 1) as f32;
        let point1 = egui::pos2(
            center.x + radius * angle1.cos(),
            center.y + radius * angle1.sin(),
        );
        let point2 = egui::pos2(
            center.x + radius * angle2.cos(),
            center.y + radius * angle2.sin(),
        );
        painter.line_segment([point1, point2], egui::Stroke::new(stroke_width, color));
    }
}
