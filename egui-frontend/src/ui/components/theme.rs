//! # Theme Configuration
//!
//! Centralized color configuration plus the theme service that persists the
//! user's light/dark choice.
//!
//! The service is an explicitly constructed instance owned by the app and
//! passed down; anything that wants to react to a change registers a
//! subscriber against that instance. There is no globally reachable
//! singleton.

use egui::Color32;
use log::warn;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::backend::domain::progress::{self, IndicatorTier};

/// The two available themes. Unknown stored values fall back to light.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThemeKind {
    #[default]
    Light,
    Dark,
}

impl ThemeKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ThemeKind::Light => "Light",
            ThemeKind::Dark => "Dark",
        }
    }

    fn parse(value: &str) -> Self {
        match value {
            "Dark" => ThemeKind::Dark,
            _ => ThemeKind::Light,
        }
    }
}

/// Color table for one theme.
#[derive(Debug, Clone)]
pub struct ThemeColors {
    pub background: Color32,
    pub surface: Color32,
    pub border: Color32,
    pub text: Color32,
    pub text_secondary: Color32,
    pub header_background: Color32,
    pub input_background: Color32,
    pub note_background: Color32,
}

pub const LIGHT_COLORS: ThemeColors = ThemeColors {
    background: Color32::WHITE,
    surface: Color32::from_rgb(245, 245, 245),
    border: Color32::from_rgb(224, 224, 224),
    text: Color32::BLACK,
    text_secondary: Color32::from_rgb(100, 100, 100),
    header_background: Color32::from_rgb(45, 45, 48),
    input_background: Color32::WHITE,
    note_background: Color32::from_rgb(249, 249, 249),
};

pub const DARK_COLORS: ThemeColors = ThemeColors {
    background: Color32::from_rgb(30, 30, 30),
    surface: Color32::from_rgb(45, 45, 45),
    border: Color32::from_rgb(60, 60, 60),
    text: Color32::WHITE,
    text_secondary: Color32::from_rgb(200, 200, 200),
    header_background: Color32::from_rgb(25, 25, 25),
    input_background: Color32::from_rgb(40, 40, 40),
    note_background: Color32::from_rgb(50, 50, 50),
};

pub fn colors(kind: ThemeKind) -> &'static ThemeColors {
    match kind {
        ThemeKind::Light => &LIGHT_COLORS,
        ThemeKind::Dark => &DARK_COLORS,
    }
}

/// Concrete color for a progress indicator tier.
pub fn indicator_color(tier: IndicatorTier) -> Color32 {
    match tier {
        IndicatorTier::Alert => Color32::from_rgb(255, 0, 0),
        IndicatorTier::Good => Color32::from_rgb(0, 128, 0),
        IndicatorTier::Warn => Color32::from_rgb(255, 165, 0),
        IndicatorTier::Neutral => Color32::from_rgb(0, 0, 255),
    }
}

/// Decode a stored packed ARGB value into an egui color.
pub fn argb_color(argb: u32) -> Color32 {
    let (a, r, g, b) = progress::decode_argb(argb);
    Color32::from_rgba_unmultiplied(r, g, b, a)
}

/// Pack an egui color back into the stored ARGB form.
pub fn color_to_argb(color: Color32) -> u32 {
    ((color.a() as u32) << 24)
        | ((color.r() as u32) << 16)
        | ((color.g() as u32) << 8)
        | (color.b() as u32)
}

#[derive(Debug, Serialize, Deserialize)]
struct ThemeSettings {
    theme: String,
}

/// Holds the current theme, persists it, and notifies subscribers on
/// change.
pub struct ThemeService {
    settings_path: PathBuf,
    current: ThemeKind,
    subscribers: Vec<Box<dyn Fn(ThemeKind)>>,
}

impl ThemeService {
    /// Load the persisted theme, defaulting to light for a missing or
    /// unparseable settings file.
    pub fn new(settings_path: PathBuf) -> Self {
        let current = Self::load(&settings_path);
        Self {
            settings_path,
            current,
            subscribers: Vec::new(),
        }
    }

    fn load(path: &Path) -> ThemeKind {
        let raw = match fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(_) => return ThemeKind::Light,
        };
        match serde_json::from_str::<ThemeSettings>(&raw) {
            Ok(settings) => ThemeKind::parse(&settings.theme),
            Err(err) => {
                warn!("Theme settings unreadable ({err}), defaulting to light");
                ThemeKind::Light
            }
        }
    }

    pub fn current(&self) -> ThemeKind {
        self.current
    }

    /// Switch themes. No-op if unchanged; otherwise persists the choice and
    /// notifies every subscriber. Save failures are non-fatal.
    pub fn set(&mut self, kind: ThemeKind) {
        if self.current == kind {
            return;
        }
        self.current = kind;
        self.save();
        for subscriber in &self.subscribers {
            subscriber(kind);
        }
    }

    pub fn toggle(&mut self) {
        let next = match self.current {
            ThemeKind::Light => ThemeKind::Dark,
            ThemeKind::Dark => ThemeKind::Light,
        };
        self.set(next);
    }

    /// Register a callback invoked on every theme change.
    pub fn subscribe(&mut self, subscriber: impl Fn(ThemeKind) + 'static) {
        self.subscribers.push(Box::new(subscriber));
    }

    fn save(&self) {
        let settings = ThemeSettings {
            theme: self.current.as_str().to_string(),
        };
        let json = match serde_json::to_string_pretty(&settings) {
            Ok(json) => json,
            Err(err) => {
                warn!("Could not encode theme settings: {err}");
                return;
            }
        };
        if let Err(err) = fs::write(&self.settings_path, json) {
            warn!("Could not save theme settings: {err}");
        }
    }
}
