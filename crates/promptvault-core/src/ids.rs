//! Display identifiers for assets.
//!
//! Identifiers are `{prefix}-{n:03}` where `n` is one more than the number of
//! existing assets of the same kind. The counter is derived, not stored, so
//! deleting an asset and creating another can reproduce an identifier that
//! was handed out before. [`next_free_display_id`] steps past such repeats.

use crate::asset::{Asset, AssetKind};

/// Identifier for the next asset of `kind`, given the current collection.
#[must_use]
pub fn next_display_id(kind: AssetKind, assets: &[Asset]) -> String {
    let count = assets.iter().filter(|a| a.kind == kind).count();
    format_display_id(kind, count + 1)
}

/// Like [`next_display_id`], but moves up the sequence until the identifier
/// is not held by any asset in `assets`.
#[must_use]
pub fn next_free_display_id(kind: AssetKind, assets: &[Asset]) -> String {
    let start = assets.iter().filter(|a| a.kind == kind).count() + 1;
    (start..)
        .map(|n| format_display_id(kind, n))
        .find(|id| assets.iter().all(|a| a.id != *id))
        .unwrap_or_else(|| format_display_id(kind, start))
}

/// Format a 1-based sequence number as a display identifier.
#[must_use]
pub fn format_display_id(kind: AssetKind, sequence: usize) -> String {
    format!("{}-{sequence:03}", kind.prefix())
}
