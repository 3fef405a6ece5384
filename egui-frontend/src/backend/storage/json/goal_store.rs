//! # JSON Goal Store
//!
//! File-backed implementation of [`GoalStore`]: one pretty-printed JSON
//! document holding the full goal collection, read once at startup and
//! rewritten in full on every mutation.
//!
//! ## Resilience
//!
//! - Writes go to a temp file and are renamed into place, so a crashed or
//!   failed write never leaves a torn document behind.
//! - An unreadable or unparseable document is moved aside under a
//!   timestamped backup name and the store starts empty; launch never fails
//!   on bad data.
//! - Records loaded from older versions of the file get their missing
//!   fields back-filled deterministically; records with a blank id are
//!   discarded.
//! - Reads are lenient about the legacy file format: PascalCase field
//!   names, signed color integers, comments, and trailing commas are all
//!   accepted.

use chrono::{DateTime, Local, NaiveDate, Utc};
use log::{debug, info, warn};
use serde::Deserialize;
use std::fs;
use std::io;
use std::path::PathBuf;

use shared::{Goal, GoalType, Note};

use super::connection::JsonConnection;
use crate::backend::storage::traits::GoalStore;

/// Errors from the storage layer. Callers surface these as non-fatal
/// warnings; the in-memory collection stays valid either way.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("could not determine the local application data directory")]
    NoDataDir,
    #[error("failed to create data directory {path:?}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to write {path:?}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to encode goal data")]
    Encode(#[from] serde_json::Error),
}

/// Lenient on-disk shape of a goal. Every field is optional or defaulted so
/// that documents written by older versions still load; PascalCase aliases
/// cover the legacy field spelling.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredGoal {
    #[serde(default, alias = "Id")]
    id: String,
    #[serde(default, alias = "Name")]
    name: String,
    #[serde(default, rename = "type", alias = "Type")]
    goal_type: Option<GoalType>,
    #[serde(default, alias = "StartDate")]
    start_date: Option<NaiveDate>,
    #[serde(default, alias = "Deadline")]
    deadline: Option<NaiveDate>,
    #[serde(default, alias = "CreatedDate")]
    created_date: Option<DateTime<Utc>>,
    #[serde(default, alias = "TargetAmount")]
    target_amount: Option<f64>,
    #[serde(default, alias = "CurrentAmount")]
    current_amount: f64,
    #[serde(default, alias = "IsAchieved")]
    is_achieved: bool,
    #[serde(default, alias = "Notes")]
    notes: Vec<StoredNote>,
    #[serde(
        default,
        alias = "ProgressColorArgb",
        deserialize_with = "argb_from_signed"
    )]
    progress_color_argb: Option<u32>,
}

/// Older documents store the packed ARGB color as a signed 32-bit integer,
/// so any color with full alpha comes in negative. Accept either sign and
/// reinterpret the bits.
fn argb_from_signed<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = Option::<i64>::deserialize(deserializer)?;
    Ok(value.map(|v| v as u32))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredNote {
    #[serde(default, alias = "Id")]
    id: String,
    #[serde(default, alias = "CreatedDate")]
    created_date: Option<DateTime<Utc>>,
    #[serde(default, alias = "Content")]
    content: String,
    #[serde(default, alias = "ProgressAmount")]
    progress_amount: Option<f64>,
}

impl StoredGoal {
    /// Back-fill missing fields and convert to the domain record. Returns
    /// `None` for records with a blank id, which are discarded rather than
    /// defaulted.
    fn into_goal(self, now: DateTime<Utc>) -> Option<Goal> {
        if self.id.trim().is_empty() {
            return None;
        }

        let created_date = self.created_date.unwrap_or(now);
        let start_date = self
            .start_date
            .unwrap_or_else(|| created_date.with_timezone(&Local).date_naive());
        let deadline = self.deadline.unwrap_or(start_date);
        let has_positive_target = self.target_amount.map_or(false, |t| t > 0.0);
        let goal_type = self.goal_type.unwrap_or(if has_positive_target {
            GoalType::Quantitative
        } else {
            GoalType::Qualitative
        });

        Some(Goal {
            id: self.id,
            name: self.name,
            goal_type,
            start_date,
            deadline,
            created_date,
            target_amount: self.target_amount,
            current_amount: self.current_amount,
            is_achieved: self.is_achieved,
            notes: self
                .notes
                .into_iter()
                .map(|n| Note {
                    id: n.id,
                    created_date: n.created_date.unwrap_or(now),
                    content: n.content,
                    progress_amount: n.progress_amount,
                })
                .collect(),
            progress_color_argb: self.progress_color_argb,
        })
    }
}

/// Strip `//` and `/* */` comments and trailing commas before parsing.
/// Hand-edited or legacy documents may contain both; string contents are
/// left untouched, and a document without either comes back unchanged.
fn normalize_document(raw: &str) -> String {
    strip_trailing_commas(&strip_comments(raw))
}

fn strip_comments(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars().peekable();
    let mut in_string = false;
    while let Some(c) = chars.next() {
        if in_string {
            out.push(c);
            if c == '\\' {
                if let Some(escaped) = chars.next() {
                    out.push(escaped);
                }
            } else if c == '"' {
                in_string = false;
            }
            continue;
        }
        match c {
            '"' => {
                in_string = true;
                out.push(c);
            }
            '/' => match chars.peek() {
                Some('/') => {
                    for n in chars.by_ref() {
                        if n == '\n' {
                            out.push('\n');
                            break;
                        }
                    }
                }
                Some('*') => {
                    chars.next();
                    let mut prev = '\0';
                    for n in chars.by_ref() {
                        if prev == '*' && n == '/' {
                            break;
                        }
                        prev = n;
                    }
                }
                _ => out.push(c),
            },
            _ => out.push(c),
        }
    }
    out
}

fn strip_trailing_commas(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars().peekable();
    let mut in_string = false;
    while let Some(c) = chars.next() {
        if in_string {
            out.push(c);
            if c == '\\' {
                if let Some(escaped) = chars.next() {
                    out.push(escaped);
                }
            } else if c == '"' {
                in_string = false;
            }
            continue;
        }
        match c {
            '"' => {
                in_string = true;
                out.push(c);
            }
            ',' => {
                let next_significant = chars.clone().find(|n| !n.is_whitespace());
                if !matches!(next_significant, Some('}') | Some(']')) {
                    out.push(c);
                }
            }
            _ => out.push(c),
        }
    }
    out
}

/// A JSON-file-backed repository for storing and retrieving goals.
pub struct JsonGoalStore {
    connection: JsonConnection,
    goals: Vec<Goal>,
}

impl JsonGoalStore {
    /// Open the store, loading whatever the goal document holds. Never
    /// fails on document content; see the module docs for the recovery
    /// behavior.
    pub fn open(connection: JsonConnection) -> Self {
        let goals = Self::load_goals(&connection);
        info!("Loaded {} goal(s) from storage", goals.len());
        Self { connection, goals }
    }

    fn load_goals(connection: &JsonConnection) -> Vec<Goal> {
        let path = connection.goals_file_path();
        if !path.exists() {
            debug!("No goal document at {:?}, starting empty", path);
            return Vec::new();
        }

        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(err) => {
                warn!("Goal document unreadable ({err}), backing it up");
                Self::backup_bad_file(connection);
                return Vec::new();
            }
        };
        if raw.trim().is_empty() {
            return Vec::new();
        }

        let stored: Vec<StoredGoal> = match serde_json::from_str(&normalize_document(&raw)) {
            Ok(stored) => stored,
            Err(err) => {
                warn!("Goal document corrupt ({err}), backing it up");
                Self::backup_bad_file(connection);
                return Vec::new();
            }
        };

        let now = Utc::now();
        let total = stored.len();
        let goals: Vec<Goal> = stored.into_iter().filter_map(|g| g.into_goal(now)).collect();
        if goals.len() < total {
            warn!("Discarded {} goal record(s) with blank ids", total - goals.len());
        }
        goals
    }

    /// Move the bad document aside under a timestamped name so the user can
    /// recover it by hand. Backup failures are logged and otherwise ignored;
    /// this is a one-time recovery path, not retried.
    fn backup_bad_file(connection: &JsonConnection) {
        let path = connection.goals_file_path();
        let stamp = Local::now().format("%Y%m%d%H%M%S");
        let backup = connection
            .base_dir()
            .join(format!("goals.json.backup.{stamp}"));
        match fs::rename(&path, &backup) {
            Ok(()) => info!("Backed up bad goal document to {:?}", backup),
            Err(err) => warn!("Could not back up bad goal document: {err}"),
        }
    }

    /// Rewrite the full document. Atomic: serialized to a temp file first,
    /// then renamed over the previous version.
    fn save(&self) -> Result<(), StorageError> {
        let path = self.connection.goals_file_path();
        let json = serde_json::to_string_pretty(&self.goals)?;

        let temp_path = path.with_extension("tmp");
        fs::write(&temp_path, json).map_err(|source| StorageError::Write {
            path: temp_path.clone(),
            source,
        })?;
        fs::rename(&temp_path, &path).map_err(|source| StorageError::Write { path, source })?;
        Ok(())
    }
}

impl GoalStore for JsonGoalStore {
    fn get_all(&self) -> Vec<Goal> {
        let mut goals = self.goals.clone();
        goals.sort_by_key(|g| g.deadline);
        goals
    }

    fn get(&self, goal_id: &str) -> Option<Goal> {
        self.goals.iter().find(|g| g.id == goal_id).cloned()
    }

    fn add(&mut self, goal: Goal) -> Result<(), StorageError> {
        self.goals.push(goal);
        self.save()
    }

    fn update(&mut self, goal: Goal) -> Result<(), StorageError> {
        match self.goals.iter_mut().find(|g| g.id == goal.id) {
            Some(existing) => *existing = goal,
            None => {
                warn!("Update for unknown goal id {}, ignoring", goal.id);
                return Ok(());
            }
        }
        self.save()
    }

    fn delete(&mut self, goal_id: &str) -> Result<(), StorageError> {
        self.goals.retain(|g| g.id != goal_id);
        self.save()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn setup_store() -> (JsonGoalStore, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let connection = JsonConnection::new(temp_dir.path()).unwrap();
        (JsonGoalStore::open(connection), temp_dir)
    }

    fn sample_goal(name: &str, deadline: NaiveDate) -> Goal {
        Goal::new(
            name,
            GoalType::Qualitative,
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            deadline,
        )
    }

    #[test]
    fn round_trips_goals_through_the_document() {
        let temp_dir = TempDir::new().unwrap();
        let connection = JsonConnection::new(temp_dir.path()).unwrap();

        let mut goal = sample_goal("learn rust", NaiveDate::from_ymd_opt(2024, 6, 1).unwrap());
        goal.add_note("chapter one done", Some(10.0));
        {
            let mut store = JsonGoalStore::open(connection.clone());
            store.add(goal.clone()).unwrap();
        }

        let reopened = JsonGoalStore::open(connection);
        let loaded = reopened.get(&goal.id).expect("goal should survive reopen");
        assert_eq!(loaded.name, "learn rust");
        assert_eq!(loaded.notes.len(), 1);
        assert_eq!(loaded.current_amount, 10.0);
    }

    #[test]
    fn get_all_orders_by_deadline_ascending() {
        let (mut store, _temp_dir) = setup_store();
        let late = sample_goal("late", NaiveDate::from_ymd_opt(2024, 12, 1).unwrap());
        let early = sample_goal("early", NaiveDate::from_ymd_opt(2024, 2, 1).unwrap());
        let mid = sample_goal("mid", NaiveDate::from_ymd_opt(2024, 6, 1).unwrap());
        store.add(late).unwrap();
        store.add(early).unwrap();
        store.add(mid).unwrap();

        let names: Vec<String> = store.get_all().into_iter().map(|g| g.name).collect();
        assert_eq!(names, ["early", "mid", "late"]);
    }

    #[test]
    fn corrupt_document_is_backed_up_and_store_starts_empty() {
        let temp_dir = TempDir::new().unwrap();
        let connection = JsonConnection::new(temp_dir.path()).unwrap();
        fs::write(connection.goals_file_path(), "this is { not json").unwrap();

        let store = JsonGoalStore::open(connection.clone());
        assert!(store.get_all().is_empty());
        assert!(!connection.goals_file_path().exists());

        let backup_exists = fs::read_dir(temp_dir.path()).unwrap().any(|entry| {
            entry
                .unwrap()
                .file_name()
                .to_string_lossy()
                .starts_with("goals.json.backup.")
        });
        assert!(backup_exists, "corrupt document should be preserved");
    }

    #[test]
    fn empty_document_loads_as_empty_collection() {
        let temp_dir = TempDir::new().unwrap();
        let connection = JsonConnection::new(temp_dir.path()).unwrap();
        fs::write(connection.goals_file_path(), "   \n").unwrap();

        let store = JsonGoalStore::open(connection.clone());
        assert!(store.get_all().is_empty());
        // Whitespace is not corruption; no backup is taken.
        assert!(connection.goals_file_path().exists());
    }

    #[test]
    fn blank_id_records_are_discarded() {
        let temp_dir = TempDir::new().unwrap();
        let connection = JsonConnection::new(temp_dir.path()).unwrap();
        fs::write(
            connection.goals_file_path(),
            r#"[
                {"id": "   ", "name": "ghost", "deadline": "2024-06-01"},
                {"id": "g1", "name": "real", "deadline": "2024-06-01"}
            ]"#,
        )
        .unwrap();

        let store = JsonGoalStore::open(connection);
        let goals = store.get_all();
        assert_eq!(goals.len(), 1);
        assert_eq!(goals[0].name, "real");
    }

    #[test]
    fn missing_fields_are_back_filled() {
        let temp_dir = TempDir::new().unwrap();
        let connection = JsonConnection::new(temp_dir.path()).unwrap();
        fs::write(
            connection.goals_file_path(),
            r#"[
                {"id": "untyped-with-target", "name": "a", "deadline": "2024-06-01", "targetAmount": 50.0},
                {"id": "untyped-no-target", "name": "b", "deadline": "2024-06-01"}
            ]"#,
        )
        .unwrap();

        let store = JsonGoalStore::open(connection);
        let a = store.get("untyped-with-target").unwrap();
        let b = store.get("untyped-no-target").unwrap();

        // Type derives from the presence of a positive target.
        assert_eq!(a.goal_type, GoalType::Quantitative);
        assert_eq!(b.goal_type, GoalType::Qualitative);
        // Start date falls back to the (defaulted) creation date's day.
        assert_eq!(a.start_date, a.created_date.with_timezone(&Local).date_naive());
        assert_eq!(a.current_amount, 0.0);
        assert!(a.notes.is_empty());
    }

    #[test]
    fn legacy_pascal_case_field_names_are_accepted() {
        let temp_dir = TempDir::new().unwrap();
        let connection = JsonConnection::new(temp_dir.path()).unwrap();
        fs::write(
            connection.goals_file_path(),
            r#"[{
                "Id": "legacy",
                "Name": "Old Record",
                "Type": "Quantitative",
                "StartDate": "2024-01-01",
                "Deadline": "2024-03-01",
                "TargetAmount": 100.0,
                "CurrentAmount": 25.0,
                "IsAchieved": false,
                "Notes": [{"Id": "n1", "Content": "kept", "ProgressAmount": 25.0}]
            }]"#,
        )
        .unwrap();

        let store = JsonGoalStore::open(connection);
        let goal = store.get("legacy").expect("legacy record should load");
        assert_eq!(goal.name, "Old Record");
        assert_eq!(goal.goal_type, GoalType::Quantitative);
        assert_eq!(goal.current_amount, 25.0);
        assert_eq!(goal.notes.len(), 1);
        assert_eq!(goal.notes[0].content, "kept");
    }

    #[test]
    fn negative_legacy_color_integers_reinterpret_as_argb() {
        let temp_dir = TempDir::new().unwrap();
        let connection = JsonConnection::new(temp_dir.path()).unwrap();
        // -14575885 is 0xFF2196F3 stored through a signed 32-bit integer.
        fs::write(
            connection.goals_file_path(),
            r#"[{
                "Id": "legacy-colored",
                "Name": "Blue",
                "StartDate": "2024-01-01",
                "Deadline": "2024-06-01",
                "ProgressColorArgb": -14575885
            }]"#,
        )
        .unwrap();

        let store = JsonGoalStore::open(connection.clone());
        let goal = store.get("legacy-colored").expect("record should load");
        assert_eq!(goal.progress_color_argb, Some(0xFF2196F3));
        // The document was valid; it must not go down the backup path.
        assert!(connection.goals_file_path().exists());
    }

    #[test]
    fn comments_and_trailing_commas_are_tolerated() {
        let temp_dir = TempDir::new().unwrap();
        let connection = JsonConnection::new(temp_dir.path()).unwrap();
        fs::write(
            connection.goals_file_path(),
            r#"[
                // edited by hand
                {
                    "id": "annotated",
                    "name": "see https://example.com/plan",
                    "deadline": "2024-06-01", /* kept from last year */
                },
            ]"#,
        )
        .unwrap();

        let store = JsonGoalStore::open(connection.clone());
        let goal = store.get("annotated").expect("record should load");
        // Slashes inside strings are not comments.
        assert_eq!(goal.name, "see https://example.com/plan");
        assert!(connection.goals_file_path().exists());
    }

    #[test]
    fn update_replaces_by_id_and_ignores_unknown_ids() {
        let (mut store, _temp_dir) = setup_store();
        let mut goal = sample_goal("before", NaiveDate::from_ymd_opt(2024, 6, 1).unwrap());
        store.add(goal.clone()).unwrap();

        goal.name = "after".to_string();
        store.update(goal.clone()).unwrap();
        assert_eq!(store.get(&goal.id).unwrap().name, "after");

        let stranger = sample_goal("stranger", NaiveDate::from_ymd_opt(2024, 6, 1).unwrap());
        store.update(stranger.clone()).unwrap();
        assert!(store.get(&stranger.id).is_none());
    }

    #[test]
    fn delete_removes_the_goal() {
        let (mut store, _temp_dir) = setup_store();
        let goal = sample_goal("doomed", NaiveDate::from_ymd_opt(2024, 6, 1).unwrap());
        store.add(goal.clone()).unwrap();
        store.delete(&goal.id).unwrap();
        assert!(store.get(&goal.id).is_none());
        assert!(store.get_all().is_empty());
    }

    #[test]
    fn document_is_pretty_printed() {
        let (mut store, temp_dir) = setup_store();
        store
            .add(sample_goal("pretty", NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()))
            .unwrap();
        let raw = fs::read_to_string(temp_dir.path().join("goals.json")).unwrap();
        assert!(raw.contains('\n'), "document should be human-readable");
    }
}
