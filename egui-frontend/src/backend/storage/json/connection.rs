//! Data directory handling for the JSON storage layer.

use log::info;
use std::fs;
use std::path::{Path, PathBuf};

use super::StorageError;

/// Directory name under the per-user local application data directory.
const APP_DATA_DIR: &str = "deadline-tracker";

/// Resolves and owns the application data directory.
///
/// Both the goal document and the theme settings file live under this one
/// directory, which is created on first run.
#[derive(Debug, Clone)]
pub struct JsonConnection {
    base_dir: PathBuf,
}

impl JsonConnection {
    /// Open a connection rooted at an explicit directory, creating it if
    /// needed. Tests use this with a temp dir.
    pub fn new(base_dir: impl AsRef<Path>) -> Result<Self, StorageError> {
        let base_dir = base_dir.as_ref().to_path_buf();
        if !base_dir.exists() {
            fs::create_dir_all(&base_dir).map_err(|source| StorageError::CreateDir {
                path: base_dir.clone(),
                source,
            })?;
            info!("Created data directory: {:?}", base_dir);
        }
        Ok(Self { base_dir })
    }

    /// Open the per-user application data directory.
    pub fn for_app() -> Result<Self, StorageError> {
        let base = dirs::data_local_dir().ok_or(StorageError::NoDataDir)?;
        Self::new(base.join(APP_DATA_DIR))
    }

    pub fn goals_file_path(&self) -> PathBuf {
        self.base_dir.join("goals.json")
    }

    pub fn theme_file_path(&self) -> PathBuf {
        self.base_dir.join("theme.json")
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }
}
