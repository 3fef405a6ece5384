//! # JSON Storage Module
//!
//! File-based storage for the deadline tracker: the full goal collection
//! lives in one pretty-printed `goals.json` document under the per-user
//! application data directory.
//!
//! ## Features
//!
//! - Full CRUD over the goal collection with atomic file writes
//! - Timestamped backup and empty restart when the document is corrupt
//! - Backward-compatible defaulting for records written by older versions

pub mod connection;
pub mod goal_store;

pub use connection::JsonConnection;
pub use goal_store::{JsonGoalStore, StorageError};
