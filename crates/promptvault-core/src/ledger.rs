//! Append-only version history.
//!
//! Every asset starts at `v1.0` and gains one version per saved edit. The
//! ledger never validates text; callers run [`crate::draft`] checks first.

use crate::asset::{Asset, AssetKind, Version};
use crate::label::{LabelError, VersionLabel};
use chrono::{DateTime, Utc};

/// Changelog recorded on the first version when the caller supplies none.
pub const INITIAL_CHANGELOG: &str = "Initial creation";

impl Asset {
    /// Create an asset whose history holds a single `v1.0` version.
    ///
    /// Title, category and tags start empty; set them on the returned value.
    #[must_use]
    pub fn create(
        id: impl Into<String>,
        kind: AssetKind,
        content: impl Into<String>,
        changelog: impl Into<String>,
        now: DateTime<Utc>,
    ) -> Self {
        let content = content.into();
        let first = Version {
            version: VersionLabel::INITIAL,
            content: content.clone(),
            changelog: changelog.into(),
            timestamp: now,
        };

        let asset = Self {
            id: id.into(),
            kind,
            title: String::new(),
            category: String::new(),
            tags: Vec::new(),
            current_version: first.version,
            content,
            versions: vec![first],
            created_at: now,
            updated_at: now,
        };
        tracing::debug!(id = %asset.id, kind = %asset.kind, "Created asset at v1.0");
        asset
    }

    /// Append a new head version labelled one tenth above the current one.
    ///
    /// Returns the appended version.
    pub fn append_version(
        &mut self,
        content: impl Into<String>,
        changelog: impl Into<String>,
        now: DateTime<Utc>,
    ) -> &Version {
        let label = self.current_version.next();
        let content = content.into();

        self.versions.push(Version {
            version: label,
            content: content.clone(),
            changelog: changelog.into(),
            timestamp: now,
        });
        self.current_version = label;
        self.content = content;
        self.updated_at = now;

        tracing::debug!(
            id = %self.id,
            version = %label,
            history_len = self.versions.len(),
            "Appended version"
        );
        self.head()
    }

    /// The most recent version.
    ///
    /// # Panics
    ///
    /// Never in practice: every constructor leaves at least one version.
    #[must_use]
    pub fn head(&self) -> &Version {
        self.versions
            .last()
            .expect("asset history is never empty")
    }

    /// Look up a version by label, or the head when `label` is `None`.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::NotFound`] if no version carries `label`.
    pub fn select_version(&self, label: Option<VersionLabel>) -> Result<&Version, LedgerError> {
        let Some(label) = label else {
            return Ok(self.head());
        };

        self.versions
            .iter()
            .find(|v| v.version == label)
            .ok_or_else(|| LedgerError::NotFound {
                id: self.id.clone(),
                label,
            })
    }

    /// Like [`Asset::select_version`], parsing the label from text first.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::InvalidLabel`] for malformed text and
    /// [`LedgerError::NotFound`] for unknown labels.
    pub fn select_version_str(&self, label: Option<&str>) -> Result<&Version, LedgerError> {
        let label = label.map(str::parse).transpose()?;
        self.select_version(label)
    }

    /// Versions from newest to oldest, for history displays.
    pub fn list_versions(&self) -> impl ExactSizeIterator<Item = &Version> {
        self.versions.iter().rev()
    }
}

/// Errors raised by ledger lookups.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LedgerError {
    /// Label is absent from the history
    #[error("asset {id} has no version {label}")]
    NotFound {
        /// Asset identifier
        id: String,
        /// Requested label
        label: VersionLabel,
    },
    /// Label text could not be parsed
    #[error(transparent)]
    InvalidLabel(#[from] LabelError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn t(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(1_700_000_000 + secs, 0).unwrap()
    }

    fn prompt(content: &str) -> Asset {
        Asset::create("P-001", AssetKind::Prompt, content, INITIAL_CHANGELOG, t(0))
    }

    #[test]
    fn create_starts_at_v1_0() {
        let asset = prompt("A");
        assert_eq!(asset.versions().len(), 1);
        assert_eq!(asset.current_version().to_string(), "v1.0");
        assert_eq!(asset.head().changelog, INITIAL_CHANGELOG);
        assert_eq!(asset.created_at(), asset.updated_at());
        asset.check_invariants().unwrap();
    }

    #[test]
    fn create_accepts_empty_content() {
        let asset = prompt("");
        assert_eq!(asset.content(), "");
        asset.check_invariants().unwrap();
    }

    #[test]
    fn append_updates_head_and_caches() {
        let mut asset = prompt("A");
        let appended = asset.append_version("B", "edit", t(60)).clone();

        assert_eq!(appended.version.to_string(), "v1.1");
        assert_eq!(asset.current_version(), appended.version);
        assert_eq!(asset.content(), "B");
        assert_eq!(asset.updated_at(), t(60));
        assert_eq!(asset.created_at(), t(0));
        asset.check_invariants().unwrap();
    }

    #[test]
    fn select_none_returns_head() {
        let mut asset = prompt("A");
        asset.append_version("B", "edit", t(1));
        let head = asset.select_version(None).unwrap();
        assert_eq!(head.content, asset.content());
    }

    #[test]
    fn select_by_label() {
        let mut asset = prompt("A");
        asset.append_version("B", "edit", t(1));

        let first = asset.select_version_str(Some("v1.0")).unwrap();
        assert_eq!(first.content, "A");

        let err = asset.select_version_str(Some("v3.0")).unwrap_err();
        assert!(matches!(err, LedgerError::NotFound { .. }));

        let err = asset.select_version_str(Some("latest")).unwrap_err();
        assert!(matches!(err, LedgerError::InvalidLabel(_)));
    }

    #[test]
    fn list_is_newest_first_without_reordering_storage() {
        let mut asset = prompt("A");
        asset.append_version("B", "b", t(1));
        asset.append_version("C", "c", t(2) + Duration::milliseconds(5));

        let listed: Vec<_> = asset.list_versions().map(|v| v.content.as_str()).collect();
        assert_eq!(listed, ["C", "B", "A"]);

        let stored: Vec<_> = asset.versions().iter().map(|v| v.content.as_str()).collect();
        assert_eq!(stored, ["A", "B", "C"]);
    }
}
