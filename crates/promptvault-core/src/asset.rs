//! Asset and version types.
//!
//! An [`Asset`] owns an append-only list of [`Version`] snapshots. The
//! `content` and `currentVersion` fields duplicate the head of that list so
//! that stored payloads stay readable by other tools; [`Asset::head`] is the
//! source of truth and [`Asset::check_invariants`] verifies the copies.

use crate::label::VersionLabel;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The two kinds of managed text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AssetKind {
    /// A finished prompt
    Prompt,
    /// A rough idea that may become a prompt
    Idea,
}

impl AssetKind {
    /// Letter used in display identifiers (`P-001`, `I-001`).
    #[must_use]
    pub fn prefix(self) -> char {
        match self {
            AssetKind::Prompt => 'P',
            AssetKind::Idea => 'I',
        }
    }
}

impl fmt::Display for AssetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssetKind::Prompt => write!(f, "Prompt"),
            AssetKind::Idea => write!(f, "Idea"),
        }
    }
}

impl FromStr for AssetKind {
    type Err = AssetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "prompt" | "p" => Ok(AssetKind::Prompt),
            "idea" | "i" => Ok(AssetKind::Idea),
            _ => Err(AssetError::UnknownKind(s.to_string())),
        }
    }
}

/// One immutable snapshot in an asset's history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Version {
    /// Label, strictly increasing along the history
    pub version: VersionLabel,
    /// Full text of this snapshot
    pub content: String,
    /// Note describing the change
    pub changelog: String,
    /// Creation instant
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub timestamp: DateTime<Utc>,
}

/// A managed text artifact with its full edit history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "AssetRecord")]
pub struct Asset {
    /// Display identifier, e.g. `P-004`
    pub id: String,
    /// Prompt or idea
    #[serde(rename = "type")]
    pub kind: AssetKind,
    /// Human-readable title
    pub title: String,
    /// Free-form category
    pub category: String,
    /// Hashtags, in entry order
    pub tags: Vec<String>,
    pub(crate) current_version: VersionLabel,
    pub(crate) content: String,
    pub(crate) versions: Vec<Version>,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub(crate) created_at: DateTime<Utc>,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub(crate) updated_at: DateTime<Utc>,
}

impl Asset {
    /// Label of the head version.
    #[must_use]
    pub fn current_version(&self) -> VersionLabel {
        self.current_version
    }

    /// Text of the head version.
    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }

    /// All versions, oldest first.
    #[must_use]
    pub fn versions(&self) -> &[Version] {
        &self.versions
    }

    /// When the asset was created.
    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// When the last version was appended.
    #[must_use]
    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Verify that the history is non-empty, labels strictly increase, and
    /// the cached head fields match the last version.
    ///
    /// # Errors
    ///
    /// Returns the first violated invariant.
    pub fn check_invariants(&self) -> Result<(), AssetError> {
        let head = self
            .versions
            .last()
            .ok_or_else(|| AssetError::EmptyHistory(self.id.clone()))?;

        if let Some(pair) = self
            .versions
            .windows(2)
            .find(|pair| pair[0].version >= pair[1].version)
        {
            return Err(AssetError::LabelsNotIncreasing {
                id: self.id.clone(),
                previous: pair[0].version,
                next: pair[1].version,
            });
        }

        if head.version != self.current_version {
            return Err(AssetError::StaleCurrentVersion {
                id: self.id.clone(),
                cached: self.current_version,
                head: head.version,
            });
        }

        if head.content != self.content {
            return Err(AssetError::StaleContent(self.id.clone()));
        }

        Ok(())
    }
}

/// Wire shape of an asset before its invariants are checked.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct AssetRecord {
    id: String,
    #[serde(rename = "type")]
    kind: AssetKind,
    title: String,
    #[serde(default)]
    category: String,
    #[serde(default)]
    tags: Vec<String>,
    current_version: VersionLabel,
    content: String,
    versions: Vec<Version>,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    created_at: DateTime<Utc>,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    updated_at: DateTime<Utc>,
}

impl TryFrom<AssetRecord> for Asset {
    type Error = AssetError;

    fn try_from(record: AssetRecord) -> Result<Self, Self::Error> {
        let asset = Asset {
            id: record.id,
            kind: record.kind,
            title: record.title,
            category: record.category,
            tags: record.tags,
            current_version: record.current_version,
            content: record.content,
            versions: record.versions,
            created_at: record.created_at,
            updated_at: record.updated_at,
        };
        asset.check_invariants()?;
        Ok(asset)
    }
}

/// Errors describing a malformed asset.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AssetError {
    /// Asset has no versions
    #[error("asset {0} has no versions")]
    EmptyHistory(String),
    /// Two consecutive versions are out of order
    #[error("asset {id}: label {next} does not follow {previous}")]
    LabelsNotIncreasing {
        /// Asset identifier
        id: String,
        /// Earlier label
        previous: VersionLabel,
        /// Later label
        next: VersionLabel,
    },
    /// `currentVersion` does not name the head
    #[error("asset {id}: current version {cached} but head is {head}")]
    StaleCurrentVersion {
        /// Asset identifier
        id: String,
        /// Cached label
        cached: VersionLabel,
        /// Actual head label
        head: VersionLabel,
    },
    /// `content` differs from the head content
    #[error("asset {0}: content does not match head version")]
    StaleContent(String),
    /// Unrecognized asset kind
    #[error("unknown asset kind: {0:?} (expected prompt or idea)")]
    UnknownKind(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    const STORED: &str = r##"{
        "id": "P-001",
        "type": "Prompt",
        "title": "English Translator Professional",
        "category": "Writing Assistant",
        "tags": ["#Translation", "#V1"],
        "currentVersion": "v1.1",
        "content": "second",
        "versions": [
            {"version": "v1.0", "content": "first", "changelog": "Initial version", "timestamp": 1700000000000},
            {"version": "v1.1", "content": "second", "changelog": "tweak", "timestamp": 1700000500000}
        ],
        "createdAt": 1700000000000,
        "updatedAt": 1700000500000
    }"##;

    #[test]
    fn decodes_stored_payload() {
        let asset: Asset = serde_json::from_str(STORED).unwrap();
        assert_eq!(asset.kind, AssetKind::Prompt);
        assert_eq!(asset.current_version().to_string(), "v1.1");
        assert_eq!(asset.versions().len(), 2);
        assert_eq!(asset.created_at().timestamp_millis(), 1_700_000_000_000);
    }

    #[test]
    fn encodes_camel_case_with_millisecond_timestamps() {
        let asset: Asset = serde_json::from_str(STORED).unwrap();
        let value = serde_json::to_value(&asset).unwrap();
        assert_eq!(value["type"], "Prompt");
        assert_eq!(value["currentVersion"], "v1.1");
        assert_eq!(value["updatedAt"], 1_700_000_500_000_i64);
        assert_eq!(value["versions"][0]["timestamp"], 1_700_000_000_000_i64);
    }

    #[test]
    fn rejects_stale_cached_content() {
        let tampered = STORED.replacen(r#""content": "second","#, r#""content": "other","#, 1);
        let err = serde_json::from_str::<Asset>(&tampered).unwrap_err();
        assert!(err.to_string().contains("content does not match"));
    }

    #[test]
    fn rejects_empty_history() {
        let mut value: serde_json::Value = serde_json::from_str(STORED).unwrap();
        value["versions"] = serde_json::json!([]);
        assert!(serde_json::from_value::<Asset>(value).is_err());
    }

    #[test]
    fn rejects_non_increasing_labels() {
        let mut value: serde_json::Value = serde_json::from_str(STORED).unwrap();
        value["versions"][1]["version"] = serde_json::json!("v1.0");
        value["currentVersion"] = serde_json::json!("v1.0");
        let err = serde_json::from_value::<Asset>(value).unwrap_err();
        assert!(err.to_string().contains("does not follow"));
    }

    #[test]
    fn kind_parsing_is_case_insensitive() {
        assert_eq!("Idea".parse::<AssetKind>().unwrap(), AssetKind::Idea);
        assert_eq!("PROMPT".parse::<AssetKind>().unwrap(), AssetKind::Prompt);
        assert!("note".parse::<AssetKind>().is_err());
        assert_eq!(AssetKind::Idea.prefix(), 'I');
    }
}
