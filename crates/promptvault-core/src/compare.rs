//! Word-level comparison between two versions of an asset.
//!
//! [`compare`] orders the two versions by timestamp and tags every word run
//! as unchanged, added (only in the newer text) or removed (only in the
//! older text). Tokenization and alignment come from `similar`; this module
//! only fixes the ordering, tagging and the two display views:
//!
//! | View  | Segments shown       | Concatenates to  |
//! |-------|----------------------|------------------|
//! | older | unchanged + removed  | `older.content`  |
//! | newer | unchanged + added    | `newer.content`  |
//!
//! [`CompareSession`] tracks the compare mode of a history view.

use crate::asset::{Asset, Version};
use crate::label::VersionLabel;
use crate::ledger::LedgerError;
use similar::{ChangeTag, TextDiff};

/// How a segment relates to the two compared texts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SegmentKind {
    /// Present in both texts
    Unchanged,
    /// Present only in the newer text
    Added,
    /// Present only in the older text
    Removed,
}

impl From<ChangeTag> for SegmentKind {
    fn from(tag: ChangeTag) -> Self {
        match tag {
            ChangeTag::Equal => SegmentKind::Unchanged,
            ChangeTag::Insert => SegmentKind::Added,
            ChangeTag::Delete => SegmentKind::Removed,
        }
    }
}

/// A run of text sharing one [`SegmentKind`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    /// Relation to the compared texts
    pub kind: SegmentKind,
    /// The text, whitespace included
    pub text: String,
}

impl Segment {
    fn belongs_to_older(&self) -> bool {
        self.kind != SegmentKind::Added
    }

    fn belongs_to_newer(&self) -> bool {
        self.kind != SegmentKind::Removed
    }
}

/// Segment counts for a comparison.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DiffStats {
    /// Number of unchanged segments
    pub unchanged: usize,
    /// Number of added segments
    pub added: usize,
    /// Number of removed segments
    pub removed: usize,
}

impl DiffStats {
    /// Whether the two texts differ at all.
    #[must_use]
    pub fn has_changes(&self) -> bool {
        self.added > 0 || self.removed > 0
    }

    /// Short summary such as `+2 -1`.
    #[must_use]
    pub fn summary(&self) -> String {
        format!("+{} -{}", self.added, self.removed)
    }
}

/// Result of comparing two versions.
#[derive(Debug, Clone)]
pub struct Comparison<'a> {
    /// The version with the earlier timestamp
    pub older: &'a Version,
    /// The version with the later timestamp
    pub newer: &'a Version,
    /// All segments in document order
    pub segments: Vec<Segment>,
}

impl Comparison<'_> {
    /// Segments to render for the older version.
    pub fn older_view(&self) -> impl Iterator<Item = &Segment> {
        self.segments.iter().filter(|s| s.belongs_to_older())
    }

    /// Segments to render for the newer version.
    pub fn newer_view(&self) -> impl Iterator<Item = &Segment> {
        self.segments.iter().filter(|s| s.belongs_to_newer())
    }

    /// Text rebuilt from the older view.
    #[must_use]
    pub fn older_text(&self) -> String {
        self.older_view().map(|s| s.text.as_str()).collect()
    }

    /// Text rebuilt from the newer view.
    #[must_use]
    pub fn newer_text(&self) -> String {
        self.newer_view().map(|s| s.text.as_str()).collect()
    }

    /// Segment counts by kind.
    #[must_use]
    pub fn stats(&self) -> DiffStats {
        self.segments
            .iter()
            .fold(DiffStats::default(), |mut stats, segment| {
                match segment.kind {
                    SegmentKind::Unchanged => stats.unchanged += 1,
                    SegmentKind::Added => stats.added += 1,
                    SegmentKind::Removed => stats.removed += 1,
                }
                stats
            })
    }
}

/// Compare two versions of the same asset.
///
/// The version with the earlier timestamp becomes `older`. Equal timestamps
/// fall back to the version label, so argument order never decides.
#[must_use]
pub fn compare<'a>(primary: &'a Version, other: &'a Version) -> Comparison<'a> {
    let other_is_older = (other.timestamp, other.version) < (primary.timestamp, primary.version);
    let (older, newer) = if other_is_older {
        (other, primary)
    } else {
        (primary, other)
    };

    let segments = word_diff(&older.content, &newer.content);
    tracing::debug!(
        older = %older.version,
        newer = %newer.version,
        segments = segments.len(),
        "Compared versions"
    );

    Comparison {
        older,
        newer,
        segments,
    }
}

/// Word-level diff of two texts, with adjacent runs of the same kind merged.
#[must_use]
pub fn word_diff(old: &str, new: &str) -> Vec<Segment> {
    let diff = TextDiff::from_words(old, new);
    let mut segments: Vec<Segment> = Vec::new();

    for change in diff.iter_all_changes() {
        let kind = SegmentKind::from(change.tag());
        match segments.last_mut() {
            Some(last) if last.kind == kind => last.text.push_str(change.value()),
            _ => segments.push(Segment {
                kind,
                text: change.value().to_string(),
            }),
        }
    }

    segments
}

/// State of the compare mode in a history view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareState {
    /// One version displayed; `None` means the head
    Viewing {
        /// Version being displayed
        viewed: Option<VersionLabel>,
    },
    /// Compare mode entered, waiting for the second version
    SelectingTarget {
        /// Version fixed as the comparison base
        primary: VersionLabel,
    },
    /// Two versions selected and diffed
    Comparing {
        /// Comparison base
        primary: VersionLabel,
        /// Second selection
        target: VersionLabel,
    },
}

/// Compare-mode state machine for one asset's history view.
///
/// ```text
/// Viewing --enter_compare--> SelectingTarget
/// SelectingTarget --pick(v != primary)--> Comparing
/// Comparing --exit_compare--> Viewing
/// ```
///
/// Picking the primary as its own target is ignored.
#[derive(Debug, Clone)]
pub struct CompareSession {
    head: VersionLabel,
    state: CompareState,
}

impl CompareSession {
    /// Start in `Viewing` on the asset's head.
    #[must_use]
    pub fn new(asset: &Asset) -> Self {
        Self {
            head: asset.current_version(),
            state: CompareState::Viewing { viewed: None },
        }
    }

    /// Current state.
    #[must_use]
    pub fn state(&self) -> CompareState {
        self.state
    }

    /// Enter compare mode with the displayed version as primary.
    ///
    /// Ignored unless the session is `Viewing`.
    pub fn enter_compare(&mut self) -> CompareState {
        if let CompareState::Viewing { viewed } = self.state {
            self.state = CompareState::SelectingTarget {
                primary: viewed.unwrap_or(self.head),
            };
        }
        self.state
    }

    /// Select a version.
    ///
    /// While viewing this changes the displayed version (picking the head
    /// clears the selection). In compare mode it sets the target, unless
    /// `label` is the primary.
    pub fn pick(&mut self, label: VersionLabel) -> CompareState {
        self.state = match self.state {
            CompareState::Viewing { .. } => CompareState::Viewing {
                viewed: (label != self.head).then_some(label),
            },
            CompareState::SelectingTarget { primary } | CompareState::Comparing { primary, .. } => {
                if label == primary {
                    tracing::debug!(%label, "Ignoring pick of the primary version");
                    self.state
                } else {
                    CompareState::Comparing {
                        primary,
                        target: label,
                    }
                }
            }
        };
        self.state
    }

    /// Leave compare mode, clearing both selections.
    pub fn exit_compare(&mut self) -> CompareState {
        self.state = CompareState::Viewing { viewed: None };
        self.state
    }

    /// The selected pair, once both versions are chosen.
    #[must_use]
    pub fn pair(&self) -> Option<(VersionLabel, VersionLabel)> {
        match self.state {
            CompareState::Comparing { primary, target } => Some((primary, target)),
            _ => None,
        }
    }

    /// The version shown while viewing, resolved against `asset`.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::NotFound`] if the viewed label is unknown.
    pub fn viewed_version<'a>(&self, asset: &'a Asset) -> Result<&'a Version, LedgerError> {
        match self.state {
            CompareState::Viewing { viewed } => asset.select_version(viewed),
            CompareState::SelectingTarget { primary }
            | CompareState::Comparing { primary, .. } => asset.select_version(Some(primary)),
        }
    }

    /// Diff the selected pair, if the session is `Comparing`.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::NotFound`] if either label is unknown.
    pub fn comparison<'a>(&self, asset: &'a Asset) -> Result<Option<Comparison<'a>>, LedgerError> {
        let Some((primary, target)) = self.pair() else {
            return Ok(None);
        };
        let primary = asset.select_version(Some(primary))?;
        let target = asset.select_version(Some(target))?;
        Ok(Some(compare(primary, target)))
    }
}
