//! Plain-text rendering of assets, histories and comparisons.

use chrono::{DateTime, Local, Utc};
use promptvault_core::{Asset, Comparison, Segment, SegmentKind, Version};
use std::fmt::Write;

fn when(at: DateTime<Utc>) -> String {
    at.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string()
}

/// One catalog line: id, kind, head label, title and tags.
pub fn asset_row(asset: &Asset) -> String {
    let mut row = format!(
        "{:<6} {:<6} {:<6} {}",
        asset.id,
        asset.kind.to_string(),
        asset.current_version().to_string(),
        asset.title
    );
    if !asset.tags.is_empty() {
        let _ = write!(row, "  {}", asset.tags.join(" "));
    }
    row
}

/// Asset header followed by the content of `version`.
pub fn asset_detail(asset: &Asset, version: &Version) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} [{}] {}", asset.id, asset.kind, asset.title);
    let _ = writeln!(out, "Category: {}", asset.category);
    if !asset.tags.is_empty() {
        let _ = writeln!(out, "Tags:     {}", asset.tags.join(" "));
    }

    let marker = if version.version == asset.current_version() {
        " (current)"
    } else {
        ""
    };
    let _ = writeln!(
        out,
        "Version:  {}{marker}, {}: {}",
        version.version,
        when(version.timestamp),
        version.changelog
    );
    let _ = writeln!(out);
    out.push_str(&version.content);
    out
}

/// Newest-first version list with changelogs.
pub fn history(asset: &Asset) -> String {
    let mut out = String::new();
    for version in asset.list_versions() {
        let marker = if version.version == asset.current_version() {
            '*'
        } else {
            ' '
        };
        let _ = writeln!(
            out,
            "{marker} {:<6} {}  {}",
            version.version.to_string(),
            when(version.timestamp),
            version.changelog
        );
    }
    out
}

fn marked<'a>(segments: impl Iterator<Item = &'a Segment>) -> String {
    segments
        .map(|s| match s.kind {
            SegmentKind::Unchanged => s.text.clone(),
            SegmentKind::Added => format!("{{+{}+}}", s.text),
            SegmentKind::Removed => format!("[-{}-]", s.text),
        })
        .collect()
}

/// Both sides of a comparison, removals as `[-..-]` and additions as `{+..+}`.
pub fn comparison(cmp: &Comparison<'_>) -> String {
    let stats = cmp.stats();
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Comparing {} -> {} ({})",
        cmp.older.version,
        cmp.newer.version,
        if stats.has_changes() {
            stats.summary()
        } else {
            "identical".to_string()
        }
    );
    let _ = writeln!(out);
    let _ = writeln!(out, "--- {} {}", cmp.older.version, when(cmp.older.timestamp));
    let _ = writeln!(out, "{}", marked(cmp.older_view()));
    let _ = writeln!(out);
    let _ = writeln!(out, "+++ {} {}", cmp.newer.version, when(cmp.newer.timestamp));
    let _ = writeln!(out, "{}", marked(cmp.newer_view()));
    out
}
