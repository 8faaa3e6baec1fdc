//! # PromptVault Store
//!
//! Persistence and session state for PromptVault.
//!
//! This crate provides:
//! - A string key-value abstraction with in-memory and `SQLite` backends
//! - Per-user asset collections, seeded with samples for guests
//! - Local accounts with a login session and personal AI key
//! - The [`Workspace`] session context and JSON export

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod auth;
pub mod export;
pub mod kv;
pub mod repository;
pub mod samples;
pub mod scope;
pub mod sqlite;
pub mod workspace;

pub use auth::{AuthError, AuthService, User};
pub use export::{export_json, export_to_path, ExportError, DEFAULT_EXPORT_FILE};
pub use kv::{KeyValueStore, MemoryStore, StorageError};
pub use repository::AssetRepository;
pub use scope::ScopeKey;
pub use sqlite::SqliteStore;
pub use workspace::{Workspace, WorkspaceError};
