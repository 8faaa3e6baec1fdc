//! # PromptVault Core
//!
//! Asset model, version ledger, and word-level comparison for PromptVault.
//!
//! This crate provides:
//! - Prompt and idea assets with an append-only version history
//! - Exact `vX.Y` version labels that advance by one tenth per edit
//! - Word-level diffs between two versions and a compare-mode state machine
//! - Catalog filtering/sorting, display identifiers, and input validation

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod asset;
pub mod catalog;
pub mod compare;
pub mod draft;
pub mod ids;
pub mod label;
pub mod ledger;

pub use asset::{Asset, AssetError, AssetKind, Version};
pub use catalog::{AssetFilter, CatalogQuery, SortDirection, SortField, SortOption};
pub use compare::{compare, CompareSession, CompareState, Comparison, Segment, SegmentKind};
pub use draft::{merge_tags, AssetDraft, ValidationError};
pub use ids::{next_display_id, next_free_display_id};
pub use label::VersionLabel;
pub use ledger::{LedgerError, INITIAL_CHANGELOG};
