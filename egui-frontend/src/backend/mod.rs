//! # Backend Module
//!
//! Everything behind the UI: the domain layer (progress engine, goal
//! service) and the JSON storage layer, composed into one [`Backend`]
//! handle owned by the app.
//!
//! ## Purpose:
//! The backend is constructed once at startup and handed to the UI, which
//! is the single owner of all goal records; every mutation and refresh runs
//! on the UI thread, so no locking is needed anywhere in here.

pub mod domain;
pub mod storage;

use anyhow::Result;
use std::path::PathBuf;

use domain::GoalService;
use storage::{JsonConnection, JsonGoalStore};

/// Composition root for the non-UI half of the application.
pub struct Backend {
    pub goals: GoalService<JsonGoalStore>,
    connection: JsonConnection,
}

impl Backend {
    /// Open the per-user data directory and load the goal collection.
    pub fn new() -> Result<Self> {
        let connection = JsonConnection::for_app()?;
        Self::with_connection(connection)
    }

    /// Build a backend over an explicit data directory. Tests use this.
    pub fn with_connection(connection: JsonConnection) -> Result<Self> {
        let store = JsonGoalStore::open(connection.clone());
        Ok(Self {
            goals: GoalService::new(store),
            connection,
        })
    }

    /// Where the theme service keeps its settings file.
    pub fn theme_settings_path(&self) -> PathBuf {
        self.connection.theme_file_path()
    }
}
